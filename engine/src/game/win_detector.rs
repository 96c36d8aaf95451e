use super::board::{Board, is_board_full};
use super::types::{GameStatus, Mark, WinningLine};

/// The 8 line triples, enumerated rows first, then columns, then the
/// two diagonals. `evaluate` resolves boards with several complete
/// lines (unreachable in a legal game) to the first match in this
/// order.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub fn check_win(board: &Board) -> Option<Mark> {
    for [a, b, c] in WIN_LINES {
        let mark = board[a];
        if mark != Mark::Empty && board[b] == mark && board[c] == mark {
            return Some(mark);
        }
    }
    None
}

pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    for [a, b, c] in WIN_LINES {
        let mark = board[a];
        if mark != Mark::Empty && board[b] == mark && board[c] == mark {
            return Some(WinningLine::new(mark, a, c));
        }
    }
    None
}

pub fn evaluate(board: &Board) -> GameStatus {
    if let Some(mark) = check_win(board) {
        return match mark {
            Mark::X => GameStatus::XWon,
            Mark::O => GameStatus::OWon,
            Mark::Empty => unreachable!(),
        };
    }

    if is_board_full(board) {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}
