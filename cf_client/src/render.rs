//! Plain-text rendering of boards, snapshots and session status.

use connect_four::{Board, Player, SessionState, Snapshot};

/// Renders the board with a column index header.
pub fn render_board(board: &Board) -> String {
    let header: Vec<String> = (0..board.width()).map(|c| (c % 10).to_string()).collect();
    format!("{}\n{}{}", header.join(" "), board, winner_line(board.winner()))
}

/// Announces the winner, or the game's name while undecided.
pub fn winner_line(winner: Option<Player>) -> String {
    match winner {
        Some(player) => format!("{player} wins!"),
        None => "Four in a row".to_string(),
    }
}

/// Short description of a session state for the status line.
pub fn status_line(state: SessionState) -> &'static str {
    match state {
        SessionState::Initial => "No game yet. Type 'new' or 'join'.",
        SessionState::Waiting => "Waiting for an opponent...",
        SessionState::MyTurn => "Your turn.",
        SessionState::TheirTurn => "Opponent's turn...",
        SessionState::Won => "You won!",
        SessionState::Lost => "You lost.",
    }
}

/// Renders a remote snapshot. Snapshots without a usable board, such as a
/// lobby still waiting for an opponent, render as a note instead.
pub fn render_snapshot(snapshot: &Snapshot) -> String {
    match snapshot.board() {
        Ok(board) => format!("You are {}.\n{}", snapshot.player, render_board(&board)),
        Err(e) => format!("You are {}. (no board: {e})\n", snapshot.player),
    }
}
