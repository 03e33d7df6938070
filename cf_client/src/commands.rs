use std::fmt;

/// A command typed at the client prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a new game.
    NewGame,
    /// Attach to the first game listed by the server.
    Join,
    /// Fetch the current game once.
    Refresh,
    /// Print the board again.
    Show,
    /// Drop a mark into a zero-based column.
    Move(usize),
    Help,
    Quit,
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Move command missing its column.
    MoveMissingColumn,
    /// Column is not a non-negative integer.
    InvalidColumn(String),
    /// Unrecognized command.
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveMissingColumn => {
                write!(f, "Move requires a column (e.g., 'move 3')")
            }
            Self::InvalidColumn(value) => write!(
                f,
                "Invalid column '{}'. Must be a number counted from 0 (e.g., 'move 3')",
                value
            ),
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{}'. Type 'help' to see available commands",
                cmd
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Help text listing every command.
pub const HELP: &str = "\
new
        Start a new game.
join
        Join the first game listed by the server.
refresh
        Fetch the current game now.
show
        Print the board.
move <column> | <column>
        Drop a mark into a column, counted from 0.
help
        Show this help.
quit
        Leave the client.
";

/// Parse a command string into a Command.
///
/// # Examples
///
/// ```
/// use cf_client::commands::{Command, parse_command};
///
/// assert_eq!(parse_command("new"), Ok(Command::NewGame));
/// assert_eq!(parse_command("move 3"), Ok(Command::Move(3)));
/// assert_eq!(parse_command("4"), Ok(Command::Move(4)));
/// ```
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let trimmed = input.trim();

    // Try single-word commands first
    match trimmed {
        "new" => return Ok(Command::NewGame),
        "join" => return Ok(Command::Join),
        "refresh" => return Ok(Command::Refresh),
        "show" => return Ok(Command::Show),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        _ => {}
    }

    // A bare number is a move
    if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
        return parse_column(trimmed).map(Command::Move);
    }

    let parts: Vec<&str> = trimmed.split_ascii_whitespace().collect();
    match parts.first() {
        Some(&"move") => match parts.get(1) {
            Some(value) => parse_column(value).map(Command::Move),
            None => Err(ParseError::MoveMissingColumn),
        },
        _ => Err(ParseError::UnrecognizedCommand(trimmed.to_string())),
    }
}

fn parse_column(value: &str) -> Result<usize, ParseError> {
    value
        .parse::<usize>()
        .map_err(|_| ParseError::InvalidColumn(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_word_commands() {
        assert_eq!(parse_command("new"), Ok(Command::NewGame));
        assert_eq!(parse_command("join"), Ok(Command::Join));
        assert_eq!(parse_command("refresh"), Ok(Command::Refresh));
        assert_eq!(parse_command("show"), Ok(Command::Show));
        assert_eq!(parse_command("help"), Ok(Command::Help));
        assert_eq!(parse_command("?"), Ok(Command::Help));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
        assert_eq!(parse_command("exit"), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_with_surrounding_whitespace() {
        assert_eq!(parse_command("  new  "), Ok(Command::NewGame));
        assert_eq!(parse_command("\tmove   2 "), Ok(Command::Move(2)));
    }

    #[test]
    fn test_parse_move() {
        assert_eq!(parse_command("move 0"), Ok(Command::Move(0)));
        assert_eq!(parse_command("move 6"), Ok(Command::Move(6)));
    }

    #[test]
    fn test_parse_bare_column() {
        assert_eq!(parse_command("5"), Ok(Command::Move(5)));
    }

    #[test]
    fn test_parse_move_without_column() {
        assert_eq!(parse_command("move"), Err(ParseError::MoveMissingColumn));
    }

    #[test]
    fn test_parse_move_with_invalid_column() {
        assert!(matches!(
            parse_command("move abc"),
            Err(ParseError::InvalidColumn(_))
        ));
        assert!(matches!(
            parse_command("move -1"),
            Err(ParseError::InvalidColumn(_))
        ));
    }

    #[test]
    fn test_parse_unrecognized() {
        assert!(matches!(
            parse_command("dance"),
            Err(ParseError::UnrecognizedCommand(_))
        ));
        assert!(matches!(
            parse_command(""),
            Err(ParseError::UnrecognizedCommand(_))
        ));
    }

    #[test]
    fn test_parse_error_messages() {
        let err = parse_command("jump").unwrap_err();
        assert!(err.to_string().contains("Type 'help'"));
        let err = parse_command("move x").unwrap_err();
        assert!(err.to_string().contains("'x'"));
    }
}
