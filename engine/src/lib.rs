pub mod config;
pub mod game;
pub mod logger;
pub mod session;

pub use game::{BotDifficulty, GameMode, GameStatus, Mark};
