//! Session synchronizer for games hosted by a remote authority.
//!
//! This module implements:
//! - Derivation of the local session state from remote snapshots
//! - Move submission gated on the local player's turn
//! - A background poller that runs while waiting on the remote
//! - Change-only notifications to subscribers
//!
//! ## Example
//!
//! ```no_run
//! use connect_four::session::{GameApi, SessionConfig, SessionSynchronizer};
//!
//! async fn play<A: GameApi + 'static>(api: A) -> Result<(), Box<dyn std::error::Error>> {
//!     let session = SessionSynchronizer::new(api, SessionConfig::default());
//!     let mut events = session.subscribe();
//!
//!     session.start_new_game().await?;
//!     while let Some(event) = events.recv().await {
//!         println!("{event:?}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod errors;
pub mod state;
pub mod synchronizer;

pub use api::GameApi;
pub use errors::{SessionError, SessionResult};
pub use state::{SessionState, derive_state};
pub use synchronizer::{SessionConfig, SessionEvent, SessionSynchronizer};
