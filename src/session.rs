use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::board::Board;
use crate::bot_controller::select_move;
use crate::broadcaster::GameBroadcaster;
use crate::game_state::GameState;
use crate::log;
use crate::session_rng::SessionRng;
use crate::settings::SessionSettings;
use crate::types::{Difficulty, GameEvent, GameMode, GameStatus, Mark};

/// Where the session is in its setup/play flow. Terminal outcomes live in
/// `GameStatus`, not here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    AwaitingMode,
    AwaitingDifficulty,
    AwaitingSymbol,
    InGame,
}

/// Observable state after any controller call: board, status, phase, and
/// whose mark moves next (`None` outside an in-progress game).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StateSnapshot {
    pub board: Board,
    pub status: GameStatus,
    pub phase: SessionPhase,
    pub mode: Option<GameMode>,
    pub difficulty: Difficulty,
    pub turn: Option<Mark>,
}

#[derive(Debug)]
struct SessionState {
    phase: SessionPhase,
    mode: Option<GameMode>,
    difficulty: Difficulty,
    human_mark: Option<Mark>,
    computer_mark: Option<Mark>,
    game: GameState,
    // Bumped on every reset and mode/difficulty change; in-flight computer
    // turns compare against it and become no-ops when stale.
    generation: u64,
}

impl SessionState {
    fn new() -> Self {
        Self {
            phase: SessionPhase::AwaitingMode,
            mode: None,
            difficulty: Difficulty::Easy,
            human_mark: None,
            computer_mark: None,
            game: GameState::new(),
            generation: 0,
        }
    }

    fn snapshot(&self) -> StateSnapshot {
        let turn = match (self.phase, self.game.status()) {
            (SessionPhase::InGame, GameStatus::InProgress) => Some(self.game.current_mark()),
            _ => None,
        };
        StateSnapshot {
            board: *self.game.board(),
            status: self.game.status(),
            phase: self.phase,
            mode: self.mode,
            difficulty: self.difficulty,
            turn,
        }
    }

    fn computer_to_move(&self) -> bool {
        self.phase == SessionPhase::InGame
            && self.game.status() == GameStatus::InProgress
            && self.mode == Some(GameMode::HumanVsComputer)
            && self.computer_mark == Some(self.game.current_mark())
    }
}

/// Turn controller. Owns the session state behind a mutex, accepts inputs
/// from the presentation layer, and drives computer turns on spawned tasks.
#[derive(Clone)]
pub struct SessionController<B: GameBroadcaster> {
    state: Arc<Mutex<SessionState>>,
    rng: Arc<Mutex<SessionRng>>,
    settings: SessionSettings,
    broadcaster: B,
    session_id: String,
}

impl<B: GameBroadcaster> SessionController<B> {
    pub fn new(settings: SessionSettings, broadcaster: B) -> Self {
        Self::with_session_id("local", settings, broadcaster)
    }

    pub fn with_session_id(session_id: &str, settings: SessionSettings, broadcaster: B) -> Self {
        let rng = match settings.rng_seed {
            Some(seed) => SessionRng::new(seed),
            None => SessionRng::from_random(),
        };
        Self {
            state: Arc::new(Mutex::new(SessionState::new())),
            rng: Arc::new(Mutex::new(rng)),
            settings,
            broadcaster,
            session_id: session_id.to_string(),
        }
    }

    pub async fn snapshot(&self) -> StateSnapshot {
        self.state.lock().await.snapshot()
    }

    /// Fixes the game mode and resets the board. Two-human games start
    /// immediately; computer games continue to difficulty selection.
    pub async fn set_mode(&self, mode: GameMode) {
        let snapshot = {
            let mut state = self.state.lock().await;
            state.generation += 1;
            state.mode = Some(mode);
            state.human_mark = None;
            state.computer_mark = None;
            state.game = GameState::new();
            state.phase = match mode {
                GameMode::TwoHuman => SessionPhase::InGame,
                GameMode::HumanVsComputer => SessionPhase::AwaitingDifficulty,
            };
            state.snapshot()
        };
        self.broadcaster.broadcast_state(snapshot).await;
    }

    /// Picks the opponent strength. Accepted any time in computer mode,
    /// so a player can re-pick mid-session; doing so restarts the game at
    /// symbol selection.
    pub async fn set_difficulty(&self, level: Difficulty) {
        let snapshot = {
            let mut state = self.state.lock().await;
            if state.mode != Some(GameMode::HumanVsComputer) {
                log!(
                    "[session:{}] Rejected difficulty {:?} outside computer mode",
                    self.session_id,
                    level
                );
                return;
            }
            state.generation += 1;
            state.difficulty = level;
            state.human_mark = None;
            state.computer_mark = None;
            state.game = GameState::new();
            state.phase = SessionPhase::AwaitingSymbol;
            state.snapshot()
        };
        self.broadcaster.broadcast_state(snapshot).await;
    }

    /// Binds the human to a mark and starts the game. The computer opens
    /// when it ends up holding X.
    pub async fn set_symbol(&self, mark: Mark) {
        let (snapshot, schedule) = {
            let mut state = self.state.lock().await;
            if state.phase != SessionPhase::AwaitingSymbol || mark == Mark::Empty {
                log!(
                    "[session:{}] Rejected symbol choice {:?}",
                    self.session_id,
                    mark
                );
                return;
            }
            state.human_mark = Some(mark);
            state.computer_mark = mark.opponent();
            state.phase = SessionPhase::InGame;
            (
                state.snapshot(),
                state.computer_to_move().then_some(state.generation),
            )
        };
        self.broadcaster.broadcast_state(snapshot).await;
        if let Some(generation) = schedule {
            self.spawn_computer_turn(generation);
        }
    }

    /// Applies a human move. Returns whether it was accepted; a rejected
    /// move leaves board and status untouched.
    pub async fn apply_move(&self, index: usize) -> bool {
        let outcome = {
            let mut state = self.state.lock().await;
            if state.phase != SessionPhase::InGame || state.game.status().is_over() {
                return false;
            }
            if state.mode == Some(GameMode::HumanVsComputer)
                && state.human_mark != Some(state.game.current_mark())
            {
                return false;
            }

            let mark = state.game.current_mark();
            match state.game.place_mark(index) {
                Ok(()) => Some((
                    index,
                    mark,
                    state.snapshot(),
                    state.game.status(),
                    state.computer_to_move().then_some(state.generation),
                )),
                Err(e) => {
                    log!(
                        "[session:{}] Rejected move at {}: {}",
                        self.session_id,
                        index,
                        e
                    );
                    None
                }
            }
        };

        let Some((index, mark, snapshot, status, schedule)) = outcome else {
            return false;
        };
        self.emit_move(index, mark, snapshot, status).await;
        if let Some(generation) = schedule {
            self.spawn_computer_turn(generation);
        }
        true
    }

    /// Clears the board but keeps mode, difficulty, and symbols.
    pub async fn reset(&self) {
        let (snapshot, schedule) = {
            let mut state = self.state.lock().await;
            state.generation += 1;
            state.game = GameState::new();
            (
                state.snapshot(),
                state.computer_to_move().then_some(state.generation),
            )
        };
        self.broadcaster.broadcast_state(snapshot).await;
        if let Some(generation) = schedule {
            self.spawn_computer_turn(generation);
        }
    }

    /// Discards every choice and returns to mode selection.
    pub async fn full_reset(&self) {
        let snapshot = {
            let mut state = self.state.lock().await;
            let generation = state.generation + 1;
            *state = SessionState::new();
            state.generation = generation;
            state.snapshot()
        };
        self.broadcaster.broadcast_state(snapshot).await;
    }

    fn spawn_computer_turn(&self, scheduled_generation: u64) {
        let controller = self.clone();
        tokio::spawn(async move {
            controller.run_computer_turn(scheduled_generation).await;
        });
    }

    async fn run_computer_turn(&self, scheduled_generation: u64) {
        let delay = {
            let state = self.state.lock().await;
            if state.generation != scheduled_generation || !state.computer_to_move() {
                return;
            }
            self.settings.think_delay(state.difficulty)
        };

        sleep(delay).await;

        let outcome = {
            let mut state = self.state.lock().await;
            // A reset or mode change may have landed while thinking.
            if state.generation != scheduled_generation || !state.computer_to_move() {
                return;
            }
            let (Some(bot_mark), Some(human_mark)) = (state.computer_mark, state.human_mark)
            else {
                return;
            };

            let selected = {
                let mut rng = self.rng.lock().await;
                let difficulty = state.difficulty;
                select_move(state.game.board(), difficulty, bot_mark, human_mark, &mut rng)
            };
            let index = match selected {
                Ok(index) => index,
                Err(e) => {
                    // The turn guards should make this unreachable.
                    debug_assert!(false, "computer move selection failed: {e}");
                    log!(
                        "[session:{}] Computer move selection failed: {}",
                        self.session_id,
                        e
                    );
                    return;
                }
            };

            match state.game.place_mark(index) {
                Ok(()) => Some((
                    index,
                    bot_mark,
                    state.snapshot(),
                    state.game.status(),
                    state.computer_to_move().then_some(state.generation),
                )),
                Err(e) => {
                    log!(
                        "[session:{}] Computer failed to place mark at {}: {}",
                        self.session_id,
                        index,
                        e
                    );
                    None
                }
            }
        };

        let Some((index, mark, snapshot, status, reschedule)) = outcome else {
            return;
        };
        self.emit_move(index, mark, snapshot, status).await;
        if let Some(generation) = reschedule {
            self.spawn_computer_turn(generation);
        }
    }

    async fn emit_move(&self, index: usize, mark: Mark, snapshot: StateSnapshot, status: GameStatus) {
        self.broadcaster
            .broadcast_event(GameEvent::MoveApplied { index, mark })
            .await;
        self.broadcaster.broadcast_state(snapshot).await;
        match status {
            GameStatus::Won { mark, line } => {
                self.broadcaster
                    .broadcast_event(GameEvent::GameWon { mark, line })
                    .await;
            }
            GameStatus::Draw => {
                self.broadcaster.broadcast_event(GameEvent::GameDrawn).await;
            }
            GameStatus::InProgress => {}
        }
    }
}
