use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Raised when a wire value is not a known player or cell mark.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("unknown mark {0}")]
pub struct UnknownMark(pub u8);

/// One of the two seats. Encoded as `1` and `2` on the wire.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// The player who moves after this one.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// The mark this player leaves on the board.
    #[must_use]
    pub const fn mark(self) -> Cell {
        match self {
            Self::One => Cell::One,
            Self::Two => Cell::Two,
        }
    }

    /// Display name used by text frontends.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::One => "Yellow",
            Self::Two => "Red",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<Player> for u8 {
    fn from(value: Player) -> Self {
        match value {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

impl TryFrom<u8> for Player {
    type Error = UnknownMark;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(UnknownMark(other)),
        }
    }
}

/// Contents of a single board cell. Encoded as `0`, `1` and `2` on the wire.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Cell {
    #[default]
    Empty,
    One,
    Two,
}

impl Cell {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Empty => ".",
            Self::One => "X",
            Self::Two => "O",
        };
        write!(f, "{repr}")
    }
}

impl From<Cell> for u8 {
    fn from(value: Cell) -> Self {
        match value {
            Cell::Empty => 0,
            Cell::One => 1,
            Cell::Two => 2,
        }
    }
}

impl TryFrom<u8> for Cell {
    type Error = UnknownMark;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Empty),
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(UnknownMark(other)),
        }
    }
}

/// Zero-based board coordinate. Row 0 is the top row.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    #[must_use]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Steps once by `(d_row, d_column)`, returning `None` when that would
    /// leave the non-negative quadrant.
    #[must_use]
    pub fn offset(self, d_row: isize, d_column: isize) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(d_row)?,
            column: self.column.checked_add_signed(d_column)?,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// A line through the board along which four-in-a-row is checked.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Axis {
    Horizontal,
    Vertical,
    /// Top-left to bottom-right.
    MainDiagonal,
    /// Bottom-left to top-right.
    AntiDiagonal,
}

impl Axis {
    pub const ALL: [Self; 4] = [
        Self::Horizontal,
        Self::Vertical,
        Self::MainDiagonal,
        Self::AntiDiagonal,
    ];

    /// The two opposite `(d_row, d_column)` steps spanning this axis.
    #[must_use]
    pub const fn directions(self) -> [(isize, isize); 2] {
        match self {
            Self::Horizontal => [(0, -1), (0, 1)],
            Self::Vertical => [(-1, 0), (1, 0)],
            Self::MainDiagonal => [(-1, -1), (1, 1)],
            Self::AntiDiagonal => [(1, -1), (-1, 1)],
        }
    }
}

/// Lifecycle of a single game on a board.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    InProgress,
    /// Terminal. Carries the player who completed four in a row.
    Decided(Player),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_player() {
        assert_eq!(Player::One.other(), Player::Two);
        assert_eq!(Player::Two.other(), Player::One);
    }

    #[test]
    fn test_player_wire_encoding() {
        assert_eq!(serde_json::to_string(&Player::Two).unwrap(), "2");
        assert_eq!(serde_json::from_str::<Player>("1").unwrap(), Player::One);
        assert!(serde_json::from_str::<Player>("0").is_err());
        assert!(serde_json::from_str::<Player>("3").is_err());
    }

    #[test]
    fn test_cell_wire_encoding() {
        let cells: Vec<Cell> = serde_json::from_str("[0, 1, 2]").unwrap();
        assert_eq!(cells, vec![Cell::Empty, Cell::One, Cell::Two]);
        assert_eq!(serde_json::to_string(&cells).unwrap(), "[0,1,2]");
        assert!(serde_json::from_str::<Cell>("7").is_err());
    }

    #[test]
    fn test_position_offset_stops_at_zero() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.offset(-1, 0), None);
        assert_eq!(origin.offset(0, -1), None);
        assert_eq!(origin.offset(1, 1), Some(Position::new(1, 1)));
    }

    #[test]
    fn test_axis_directions_are_opposite() {
        for axis in Axis::ALL {
            let [(r1, c1), (r2, c2)] = axis.directions();
            assert_eq!((r1, c1), (-r2, -c2), "{axis:?}");
        }
    }
}
