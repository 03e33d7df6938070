use serde::{Deserialize, Serialize};
use std::fmt;

use crate::game::{Board, BoardResult, Cell, Player};

/// Identifier of a remotely hosted game.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Extracts the id from a listing path of the form `/game/<id>`.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        match path.split('/').nth(2) {
            Some(id) if !id.is_empty() => Some(Self::new(id)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lobby status reported by the remote authority.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// No opponent has joined yet.
    Waiting,
    #[default]
    Active,
    /// Any status this client does not know. Treated like `Active`.
    #[serde(other)]
    Other,
}

/// A remote-authoritative view of one game at one instant, from the
/// perspective of `player`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<GameId>,
    pub player: Player,
    #[serde(default)]
    pub next: Option<Player>,
    #[serde(default)]
    pub winner: Option<Player>,
    #[serde(default)]
    pub state: GameStatus,
    #[serde(default)]
    pub width: usize,
    #[serde(default)]
    pub height: usize,
    #[serde(default)]
    pub cells: Vec<Cell>,
}

impl Snapshot {
    /// Builds a local board mirroring this snapshot, validating its shape.
    pub fn board(&self) -> BoardResult<Board> {
        Board::from_cells(
            self.width,
            self.height,
            self.cells.clone(),
            self.next.unwrap_or(Player::One),
            self.winner,
        )
    }

    pub fn is_waiting(&self) -> bool {
        self.state == GameStatus::Waiting
    }
}

/// Response of the list-games endpoint.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameList {
    /// Paths of the form `/game/<id>`.
    pub games: Vec<String>,
}

impl GameList {
    /// Ids of every listed game, skipping malformed paths.
    pub fn ids(&self) -> Vec<GameId> {
        self.games
            .iter()
            .filter_map(|path| GameId::from_path(path))
            .collect()
    }
}
