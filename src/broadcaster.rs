use std::future::Future;

use tokio::sync::mpsc;

use crate::session::StateSnapshot;
use crate::types::GameEvent;

/// Sink for session output. The presentation layer implements this to
/// render boards and react to moves, wins, and draws; the engine never
/// reaches into presentation state itself.
pub trait GameBroadcaster: Send + Sync + Clone + 'static {
    fn broadcast_state(&self, snapshot: StateSnapshot) -> impl Future<Output = ()> + Send;

    fn broadcast_event(&self, event: GameEvent) -> impl Future<Output = ()> + Send;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionUpdate {
    State(StateSnapshot),
    Event(GameEvent),
}

/// Broadcaster that forwards everything into an unbounded channel, for
/// collaborators that consume updates from a receiver loop.
#[derive(Clone)]
pub struct ChannelBroadcaster {
    tx: mpsc::UnboundedSender<SessionUpdate>,
}

impl ChannelBroadcaster {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SessionUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl GameBroadcaster for ChannelBroadcaster {
    async fn broadcast_state(&self, snapshot: StateSnapshot) {
        let _ = self.tx.send(SessionUpdate::State(snapshot));
    }

    async fn broadcast_event(&self, event: GameEvent) {
        let _ = self.tx.send(SessionUpdate::Event(event));
    }
}
