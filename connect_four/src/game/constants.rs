/// Width of the classic board.
pub const DEFAULT_WIDTH: usize = 7;

/// Height of the classic board.
pub const DEFAULT_HEIGHT: usize = 6;

/// Number of collinear marks needed to win.
pub const WIN_LENGTH: usize = 4;

/// Furthest a streak ever needs to be followed in one direction. The placed
/// mark supplies the remaining one.
pub const MAX_STREAK: usize = WIN_LENGTH - 1;
