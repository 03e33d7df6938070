use serde::{Deserialize, Serialize};
use std::fmt;

use crate::net::messages::Snapshot;

/// The local player's relationship to a remote game.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No snapshot received yet.
    #[default]
    Initial,
    /// No opponent has joined.
    Waiting,
    MyTurn,
    TheirTurn,
    Won,
    Lost,
}

impl SessionState {
    /// States in which the session keeps asking the remote for news.
    #[must_use]
    pub const fn is_polling(self) -> bool {
        matches!(self, Self::Waiting | Self::TheirTurn)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Initial => "initial",
            Self::Waiting => "waiting",
            Self::MyTurn => "myturn",
            Self::TheirTurn => "theirturn",
            Self::Won => "won",
            Self::Lost => "lost",
        };
        write!(f, "{repr}")
    }
}

/// Derives the session state from a remote snapshot.
///
/// Outcome beats lobby status, which beats turn order.
#[must_use]
pub fn derive_state(snapshot: &Snapshot) -> SessionState {
    match snapshot.winner {
        Some(winner) if winner == snapshot.player => SessionState::Won,
        Some(_) => SessionState::Lost,
        None if snapshot.is_waiting() => SessionState::Waiting,
        None if snapshot.next == Some(snapshot.player) => SessionState::MyTurn,
        None => SessionState::TheirTurn,
    }
}
