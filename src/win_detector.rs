use crate::board::Board;
use crate::types::{Line, Mark};

/// 3 rows, 3 columns, 2 diagonals. `check_win` reports the first fully
/// owned line in this order, so detection is deterministic.
pub const WINNING_LINES: [Line; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub fn check_win(board: &Board) -> Option<(Mark, Line)> {
    for line in WINNING_LINES {
        let [a, b, c] = line;
        let mark = board.cells()[a];
        if mark != Mark::Empty && board.cells()[b] == mark && board.cells()[c] == mark {
            return Some((mark, line));
        }
    }
    None
}

pub fn has_won(board: &Board, mark: Mark) -> bool {
    WINNING_LINES
        .iter()
        .any(|line| line.iter().all(|&index| board.cells()[index] == mark))
}

pub fn is_draw(board: &Board) -> bool {
    check_win(board).is_none() && board.is_full()
}
