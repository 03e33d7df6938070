//! # Connect Four
//!
//! A four-in-a-row implementation split into a local board engine and a
//! synchronizer for games hosted by a remote authority.
//!
//! ## Core Modules
//!
//! - [`game`]: Board grid, gravity drops, turn rotation and win detection
//! - [`net`]: Snapshot and listing shapes exchanged with a remote authority
//! - [`session`]: Session state derivation, move submission and polling
//!
//! ## Example
//!
//! ```
//! use connect_four::{Board, Player};
//!
//! let mut board = Board::standard();
//! for _ in 0..3 {
//!     board.insert_move(0).unwrap();
//!     board.insert_move(1).unwrap();
//! }
//! board.insert_move(0).unwrap();
//! assert_eq!(board.winner(), Some(Player::One));
//! ```

/// Board engine and win detection.
pub mod game;
pub use game::{
    Board, BoardError, Cell, Phase, Player, Position,
    constants::{self, DEFAULT_HEIGHT, DEFAULT_WIDTH, WIN_LENGTH},
};

/// Wire shapes for the remote game API.
pub mod net;
pub use net::messages::{self, GameId, GameList, GameStatus, Snapshot};

/// Remote session synchronization.
pub mod session;
pub use session::{
    GameApi, SessionConfig, SessionError, SessionEvent, SessionState, SessionSynchronizer,
    derive_state,
};
