mod board;
mod bot_controller;
mod game_state;
mod session_rng;
mod types;
mod win_detector;

pub use board::{Board, CELL_COUNT, available_moves, empty_board, is_board_full};
pub use bot_controller::{BotInput, calculate_minimax_move, calculate_move};
pub use game_state::{GameState, GameStateSnapshot};
pub use session_rng::SessionRng;
pub use types::{BotDifficulty, GameMode, GameStatus, Mark, ScoreBoard, WinningLine};
pub use win_detector::{WIN_LINES, check_win, check_win_with_line, evaluate};
