//! Remote game API seam used by the session synchronizer.
//!
//! The trait abstracts the remote authority so the synchronizer can run
//! against an HTTP client in production and a scripted mock in tests.

use async_trait::async_trait;
use std::sync::Arc;

use crate::net::messages::{GameId, GameList, Snapshot};

/// Operations offered by a remote game authority.
#[async_trait]
pub trait GameApi: Send + Sync {
    /// Create a game and return its first snapshot.
    async fn create_game(&self) -> anyhow::Result<Snapshot>;

    /// List games that can be joined.
    async fn list_games(&self) -> anyhow::Result<GameList>;

    /// Fetch the latest snapshot of a game.
    async fn fetch_game(&self, id: &GameId) -> anyhow::Result<Snapshot>;

    /// Drop a mark into `column` and return the resulting snapshot.
    async fn submit_move(&self, id: &GameId, column: usize) -> anyhow::Result<Snapshot>;
}

#[async_trait]
impl<T: GameApi + ?Sized> GameApi for Arc<T> {
    async fn create_game(&self) -> anyhow::Result<Snapshot> {
        (**self).create_game().await
    }

    async fn list_games(&self) -> anyhow::Result<GameList> {
        (**self).list_games().await
    }

    async fn fetch_game(&self, id: &GameId) -> anyhow::Result<Snapshot> {
        (**self).fetch_game(id).await
    }

    async fn submit_move(&self, id: &GameId, column: usize) -> anyhow::Result<Snapshot> {
        (**self).submit_move(id, column).await
    }
}
