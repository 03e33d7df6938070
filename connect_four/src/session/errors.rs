//! Session synchronizer error types.

use thiserror::Error;

use super::state::SessionState;
use crate::game::BoardError;

/// Errors surfaced by session operations.
///
/// Remote failures are passed through untouched so a stalled poll or a lost
/// move is never mistaken for a normal "still waiting" snapshot.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("not your turn (session is {0})")]
    NotYourTurn(SessionState),
    #[error("no current game")]
    NoCurrentGame,
    #[error("no game available to join")]
    NoGameAvailable,
    #[error("remote snapshot did not carry a game id")]
    MissingGameId,
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Remote(#[from] anyhow::Error),
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;
