mod broadcaster;
mod game_session;

pub use broadcaster::{GameBroadcaster, GameOverNotification, MarkPlaced};
pub use game_session::{GameSession, GameSessionState, SessionCommand, SessionSummary};
