//! HTTP API client for a four-in-a-row game server.

use anyhow::{Context, Result};
use async_trait::async_trait;
use connect_four::{GameApi, GameId, GameList, Snapshot};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// API client for communicating with the game server
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Create a client whose requests give up after `timeout`
    pub fn with_timeout(base_url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a new game on the server
    pub async fn new_game(&self) -> Result<Snapshot> {
        let response = self
            .client
            .post(format!("{}/newgame", self.base_url))
            .header("Content-Type", "application/json")
            .send()
            .await
            .context("Failed to send new game request")?;

        read_json(response, "New game").await
    }

    /// List all games known to the server
    pub async fn list(&self) -> Result<GameList> {
        let response = self
            .client
            .get(format!("{}/listgames", self.base_url))
            .send()
            .await
            .context("Failed to list games")?;

        read_json(response, "List games").await
    }

    /// Fetch the latest snapshot of a game
    pub async fn game(&self, id: &GameId) -> Result<Snapshot> {
        let response = self
            .client
            .get(format!("{}/game/{}", self.base_url, id))
            .send()
            .await
            .with_context(|| format!("Failed to fetch game {id}"))?;

        read_json(response, "Fetch game").await
    }

    /// Drop a mark into `column` of a game
    pub async fn make_move(&self, id: &GameId, column: usize) -> Result<Snapshot> {
        let response = self
            .client
            .post(format!("{}/move/{}/{}", self.base_url, id, column))
            .header("Content-Type", "application/json")
            .send()
            .await
            .context("Failed to send move request")?;

        read_json(response, "Move").await
    }
}

/// Turns a non-2xx response into an error carrying its status and body,
/// otherwise decodes the JSON body.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response, what: &str) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|e| format!("Failed to read error response: {}", e));
        anyhow::bail!("{} failed ({}): {}", what, status, error_text);
    }

    response
        .json()
        .await
        .with_context(|| format!("Failed to parse {} response", what.to_lowercase()))
}

#[async_trait]
impl GameApi for ApiClient {
    async fn create_game(&self) -> Result<Snapshot> {
        self.new_game().await
    }

    async fn list_games(&self) -> Result<GameList> {
        self.list().await
    }

    async fn fetch_game(&self, id: &GameId) -> Result<Snapshot> {
        self.game(id).await
    }

    async fn submit_move(&self, id: &GameId, column: usize) -> Result<Snapshot> {
        self.make_move(id, column).await
    }
}
