//! Four-in-a-row board engine.
//!
//! This module provides:
//! - The board grid with gravity drops and turn rotation
//! - Win detection along four axes from the last placed mark
//! - Player and cell types with their wire encodings

pub mod board;
pub mod constants;
pub mod entities;
pub mod errors;

pub use board::Board;
pub use entities::{Axis, Cell, Phase, Player, Position, UnknownMark};
pub use errors::{BoardError, BoardResult};
