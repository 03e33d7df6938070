//! The board engine: grid ownership, gravity drops, turn rotation and win
//! detection against the last placed mark.

use log::{debug, info};
use std::fmt;

use super::constants::{DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_STREAK};
use super::entities::{Axis, Cell, Phase, Player, Position};
use super::errors::{BoardError, BoardResult};

/// A rectangular four-in-a-row board.
///
/// Cells are stored row-major with the top row first, so the cell at
/// `(row, column)` lives at `row * width + column`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    active_player: Player,
    winner: Option<Player>,
}

impl Board {
    /// Creates an empty board with `Player::One` to move.
    pub fn new(width: usize, height: usize) -> BoardResult<Self> {
        let len = width.checked_mul(height).unwrap_or(0);
        Self::from_cells(width, height, vec![Cell::Empty; len], Player::One, None)
    }

    /// Creates the classic 7x6 board.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cells: vec![Cell::Empty; DEFAULT_WIDTH * DEFAULT_HEIGHT],
            active_player: Player::One,
            winner: None,
        }
    }

    /// Rebuilds a board from existing cells, e.g. a remote snapshot.
    pub fn from_cells(
        width: usize,
        height: usize,
        cells: Vec<Cell>,
        active_player: Player,
        winner: Option<Player>,
    ) -> BoardResult<Self> {
        if width == 0 || height == 0 || width.checked_mul(height) != Some(cells.len()) {
            return Err(BoardError::InvalidDimensions {
                width,
                height,
                cells: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
            active_player,
            winner,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The player whose mark the next successful move places.
    pub fn active_player(&self) -> Player {
        self.active_player
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn phase(&self) -> Phase {
        match self.winner {
            Some(player) => Phase::Decided(player),
            None => Phase::InProgress,
        }
    }

    /// Cell contents, or `None` when the coordinate is off the board.
    pub fn get(&self, row: usize, column: usize) -> Option<Cell> {
        if row >= self.height || column >= self.width {
            return None;
        }
        Some(self.cells[row * self.width + column])
    }

    fn cell_at(&self, position: Position) -> Option<Cell> {
        self.get(position.row, position.column)
    }

    /// Maps a flat cell index, e.g. a clicked button, to its column.
    pub fn column_of_index(&self, index: usize) -> BoardResult<usize> {
        self.position_of_index(index).map(|p| p.column)
    }

    /// Maps a flat cell index to its `(row, column)` coordinate.
    pub fn position_of_index(&self, index: usize) -> BoardResult<Position> {
        if index >= self.cells.len() {
            return Err(BoardError::InvalidIndex {
                index,
                len: self.cells.len(),
            });
        }
        Ok(Position::new(index / self.width, index % self.width))
    }

    /// A column is full once its top cell is occupied. Columns outside the
    /// board count as full.
    pub fn is_column_full(&self, column: usize) -> bool {
        self.get(0, column).is_none_or(|cell| !cell.is_empty())
    }

    pub fn is_full(&self) -> bool {
        (0..self.width).all(|column| self.is_column_full(column))
    }

    /// Columns that still accept a mark. Empty once the game is decided.
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.winner.is_some() {
            return Vec::new();
        }
        (0..self.width)
            .filter(|&column| !self.is_column_full(column))
            .collect()
    }

    /// Drops the active player's mark into `column`.
    ///
    /// On success the mark lands in the lowest empty row, the turn passes to
    /// the other player and the move is checked for a win. Every error leaves
    /// the board untouched.
    pub fn insert_move(&mut self, column: usize) -> BoardResult<Position> {
        if let Some(winner) = self.winner {
            return Err(BoardError::GameAlreadyDecided(winner));
        }
        if column >= self.width {
            return Err(BoardError::InvalidColumn {
                column,
                width: self.width,
            });
        }

        let row = (0..self.height)
            .rev()
            .find(|&row| self.cells[row * self.width + column].is_empty())
            .ok_or(BoardError::ColumnFull(column))?;

        let mover = self.active_player;
        let position = Position::new(row, column);
        self.cells[row * self.width + column] = mover.mark();
        self.active_player = mover.other();
        debug!("{mover} placed at {position}");

        if self.evaluate_win(position) {
            info!("{mover} wins with the move at {position}");
            self.winner = Some(mover);
        }

        Ok(position)
    }

    /// Checks whether the mark at `position` completes four in a row on any
    /// axis. An empty or off-board position never wins.
    pub fn evaluate_win(&self, position: Position) -> bool {
        let mark = match self.cell_at(position) {
            Some(cell) if !cell.is_empty() => cell,
            _ => return false,
        };

        Axis::ALL.iter().any(|axis| {
            let streak: usize = axis
                .directions()
                .iter()
                .map(|&step| self.count_direction(position, step, mark))
                .sum();
            streak >= MAX_STREAK
        })
    }

    /// Counts consecutive `mark` cells stepping away from `start` by `step`,
    /// excluding `start` itself. Stops at the first mismatch, at the board
    /// edge, or after `MAX_STREAK` matches.
    pub fn count_direction(&self, start: Position, step: (isize, isize), mark: Cell) -> usize {
        let (d_row, d_column) = step;
        let mut count = 0;
        let mut current = start;
        while count < MAX_STREAK {
            match current.offset(d_row, d_column) {
                Some(next) if self.cell_at(next) == Some(mark) => {
                    current = next;
                    count += 1;
                }
                _ => break,
            }
        }
        count
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            let line: Vec<String> = row.iter().map(ToString::to_string).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
