use super::types::Mark;

pub const BOARD_SIDE: usize = 3;
pub const CELL_COUNT: usize = BOARD_SIDE * BOARD_SIDE;

/// Row-major cells: 0..=2 top row, 3..=5 middle row, 6..=8 bottom row.
pub type Board = [Mark; CELL_COUNT];

pub fn empty_board() -> Board {
    [Mark::Empty; CELL_COUNT]
}

pub fn available_moves(board: &Board) -> Vec<usize> {
    board
        .iter()
        .enumerate()
        .filter_map(|(index, &cell)| (cell == Mark::Empty).then_some(index))
        .collect()
}

pub fn is_board_full(board: &Board) -> bool {
    board.iter().all(|&cell| cell != Mark::Empty)
}
