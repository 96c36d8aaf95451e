use super::board::{Board, CELL_COUNT, empty_board};
use super::types::{BotDifficulty, GameMode, GameStatus, Mark, ScoreBoard};
use super::win_detector::evaluate;

/// One game session: board, turn, outcome, win tally and
/// configuration. All mutation goes through the methods below; the
/// move selector only ever sees a copied snapshot.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    current_mark: Mark,
    status: GameStatus,
    scores: ScoreBoard,
    games_finished: u32,
    mode: GameMode,
    difficulty: BotDifficulty,
    last_move: Option<usize>,
}

/// Read-only copy of the session state, handed to UI layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameStateSnapshot {
    pub board: Board,
    pub current_mark: Mark,
    pub status: GameStatus,
    pub scores: ScoreBoard,
    pub mode: GameMode,
    pub difficulty: BotDifficulty,
    pub last_move: Option<usize>,
}

impl GameState {
    pub fn new(mode: GameMode, difficulty: BotDifficulty) -> Self {
        Self {
            board: empty_board(),
            current_mark: Mark::X,
            status: GameStatus::InProgress,
            scores: ScoreBoard::default(),
            games_finished: 0,
            mode,
            difficulty,
            last_move: None,
        }
    }

    #[cfg(test)]
    pub fn from_board(board: Board, current_mark: Mark, mode: GameMode) -> Self {
        let mut state = Self::new(mode, BotDifficulty::Minimax);
        state.board = board;
        state.current_mark = current_mark;
        state.status = evaluate(&board);
        state
    }

    pub fn place_mark(&mut self, index: usize, mark: Mark) -> Result<(), String> {
        if self.status != GameStatus::InProgress {
            return Err("Game is already over".to_string());
        }

        if mark != self.current_mark {
            return Err("Not your turn".to_string());
        }

        if index >= CELL_COUNT {
            return Err("Position out of bounds".to_string());
        }

        if self.board[index] != Mark::Empty {
            return Err("Cell is already marked".to_string());
        }

        self.board[index] = mark;
        self.last_move = Some(index);

        self.check_game_over();

        if self.status == GameStatus::InProgress {
            self.switch_turn();
        }

        Ok(())
    }

    fn switch_turn(&mut self) {
        self.current_mark = match self.current_mark {
            Mark::X => Mark::O,
            _ => Mark::X,
        };
    }

    fn check_game_over(&mut self) {
        self.status = evaluate(&self.board);

        if let Some(winner) = self.status.winner() {
            self.scores.record_win(winner);
        }
        if self.status.is_terminal() {
            self.games_finished += 1;
        }
    }

    /// Back to an empty board with X to open. The win tally and the
    /// games-finished counter are deliberately left alone.
    pub fn reset(&mut self) {
        self.board = empty_board();
        self.current_mark = Mark::X;
        self.status = GameStatus::InProgress;
        self.last_move = None;
    }

    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
        self.reset();
    }

    pub fn set_difficulty(&mut self, difficulty: BotDifficulty) {
        self.difficulty = difficulty;
        self.reset();
    }

    /// The computer's mark, when a computer is playing at all. The
    /// human always holds X in single-player games.
    pub fn bot_mark(&self) -> Option<Mark> {
        match self.mode {
            GameMode::SinglePlayer => Some(Mark::O),
            GameMode::TwoPlayer => None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn scores(&self) -> ScoreBoard {
        self.scores
    }

    pub fn games_finished(&self) -> u32 {
        self.games_finished
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn difficulty(&self) -> BotDifficulty {
        self.difficulty
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    pub fn snapshot(&self) -> GameStateSnapshot {
        GameStateSnapshot {
            board: self.board,
            current_mark: self.current_mark,
            status: self.status,
            scores: self.scores,
            mode: self.mode,
            difficulty: self.difficulty,
            last_move: self.last_move,
        }
    }
}
