use serde::{Deserialize, Serialize};

use super::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use crate::game::{BotDifficulty, GameMode};

pub const MAX_BOT_DELAY_MS: u64 = 5_000;

fn default_bot_delay_ms() -> u64 {
    500
}

/// Startup defaults for a session; the UI changes mode and difficulty
/// at runtime through session commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub mode: GameMode,
    pub difficulty: BotDifficulty,
    /// Pause before the computer replies, so its move reads as a turn
    /// rather than an instant board change.
    #[serde(default = "default_bot_delay_ms")]
    pub bot_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::SinglePlayer,
            difficulty: BotDifficulty::Minimax,
            bot_delay_ms: default_bot_delay_ms(),
        }
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        if self.bot_delay_ms > MAX_BOT_DELAY_MS {
            return Err(format!(
                "Bot delay ({} ms) must not exceed {} ms",
                self.bot_delay_ms, MAX_BOT_DELAY_MS
            ));
        }
        Ok(())
    }
}

pub fn get_config_manager(
    file_path: &str,
) -> ConfigManager<FileContentConfigProvider, GameConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(file_path)
}
