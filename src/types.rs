use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mark {
    Empty,
    X,
    O,
}

impl Mark {
    pub fn opponent(&self) -> Option<Mark> {
        match self {
            Mark::X => Some(Mark::O),
            Mark::O => Some(Mark::X),
            Mark::Empty => None,
        }
    }
}

/// Cell indices of one of the 8 winning combinations.
pub type Line = [usize; 3];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won { mark: Mark, line: Line },
    Draw,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    TwoHuman,
    HumanVsComputer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Optimal,
}

impl Difficulty {
    /// Chance of playing the minimax move instead of a random one.
    /// Redrawn for every computer move, not once per game.
    pub fn optimal_play_chance(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.0,
            Difficulty::Medium => 0.5,
            Difficulty::Hard => 0.8,
            Difficulty::Optimal => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveError {
    InvalidMove,
    NoMovesAvailable,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::InvalidMove => write!(f, "cell is occupied, out of range, or game is over"),
            MoveError::NoMovesAvailable => write!(f, "no empty cells to move into"),
        }
    }
}

impl std::error::Error for MoveError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    MoveApplied { index: usize, mark: Mark },
    GameWon { mark: Mark, line: Line },
    GameDrawn,
}
