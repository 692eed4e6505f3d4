use crate::types::{Mark, MoveError};

pub const CELL_COUNT: usize = 9;

/// 3x3 board as a plain value type. Search builds hypothetical boards by
/// copying; the live game board is never aliased.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Mark; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Mark::Empty; CELL_COUNT],
        }
    }

    pub fn from_cells(cells: [Mark; CELL_COUNT]) -> Self {
        Self { cells }
    }

    pub fn cell(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    pub fn cells(&self) -> &[Mark; CELL_COUNT] {
        &self.cells
    }

    pub fn is_empty_cell(&self, index: usize) -> bool {
        index < CELL_COUNT && self.cells[index] == Mark::Empty
    }

    pub fn with_move(&self, index: usize, mark: Mark) -> Result<Board, MoveError> {
        if mark == Mark::Empty || !self.is_empty_cell(index) {
            return Err(MoveError::InvalidMove);
        }
        let mut board = *self;
        board.cells[index] = mark;
        Ok(board)
    }

    pub(crate) fn set(&mut self, index: usize, mark: Mark) {
        debug_assert!(index < CELL_COUNT);
        self.cells[index] = mark;
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Mark::Empty)
    }

    pub fn available_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Mark::Empty)
            .map(|(index, _)| index)
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
