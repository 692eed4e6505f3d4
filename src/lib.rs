pub mod board;
pub mod bot_controller;
pub mod broadcaster;
pub mod game_state;
pub mod logger;
pub mod session;
pub mod session_rng;
pub mod settings;
pub mod types;
pub mod win_detector;

pub use board::{Board, CELL_COUNT};
pub use bot_controller::{best_move, random_move, select_move};
pub use broadcaster::{ChannelBroadcaster, GameBroadcaster, SessionUpdate};
pub use game_state::GameState;
pub use session::{SessionController, SessionPhase, StateSnapshot};
pub use session_rng::SessionRng;
pub use settings::SessionSettings;
pub use types::{Difficulty, GameEvent, GameMode, GameStatus, Line, Mark, MoveError};
pub use win_detector::{WINNING_LINES, check_win, has_won, is_draw};
