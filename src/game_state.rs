use crate::board::Board;
use crate::types::{GameStatus, Mark, MoveError};
use crate::win_detector::check_win;

/// One game from the first move to a terminal status. X always opens.
#[derive(Clone, Copy, Debug)]
pub struct GameState {
    board: Board,
    current_mark: Mark,
    status: GameStatus,
    last_move: Option<usize>,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_mark: Mark::X,
            status: GameStatus::InProgress,
            last_move: None,
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

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    pub fn place_mark(&mut self, index: usize) -> Result<(), MoveError> {
        if self.status.is_over() {
            return Err(MoveError::InvalidMove);
        }

        self.board = self.board.with_move(index, self.current_mark)?;
        self.last_move = Some(index);

        if let Some((mark, line)) = check_win(&self.board) {
            self.status = GameStatus::Won { mark, line };
        } else if self.board.is_full() {
            self.status = GameStatus::Draw;
        } else if let Some(next) = self.current_mark.opponent() {
            self.current_mark = next;
        }

        Ok(())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
