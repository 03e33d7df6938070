//! A four-in-a-row client.
//!
//! Plays a hot-seat game on a local board, or joins a game hosted by a
//! server and keeps it in sync by polling.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use pico_args::Arguments;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use cf_client::{
    api_client::ApiClient,
    commands::{Command, HELP as COMMANDS_HELP, parse_command},
    config::{ClientConfig, ConfigOverrides},
    render::{render_board, render_snapshot, status_line},
};
use connect_four::{Board, SessionError, SessionEvent, SessionSynchronizer};

const HELP: &str = "\
Play four in a row

USAGE:
  cf_client [OPTIONS]

OPTIONS:
  --server URL          Server URL  [default: http://localhost:5000]
  --poll-ms MS          Poll interval while waiting  [default: 1000]
  --width W             Board width for offline games  [default: 7]
  --height H            Board height for offline games  [default: 6]
  --offline             Play a local hot-seat game instead of joining a server

FLAGS:
  -h, --help            Print help information

ENVIRONMENT:
  CONNECT_FOUR_SERVER, CONNECT_FOUR_POLL_MS, CONNECT_FOUR_REQUEST_TIMEOUT_SECS,
  CONNECT_FOUR_WIDTH, CONNECT_FOUR_HEIGHT, RUST_LOG
";

struct Args {
    overrides: ConfigOverrides,
    offline: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        overrides: ConfigOverrides {
            server_url: pargs.opt_value_from_str("--server")?,
            poll_ms: pargs.opt_value_from_str("--poll-ms")?,
            width: pargs.opt_value_from_str("--width")?,
            height: pargs.opt_value_from_str("--height")?,
        },
        offline: pargs.contains("--offline"),
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        warn!("Ignoring unknown arguments: {remaining:?}");
    }

    let config = ClientConfig::from_env(args.overrides).context("Invalid configuration")?;
    debug!("Loaded configuration: {config:?}");

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    if args.offline {
        run_offline(&config, &mut input).await
    } else {
        run_online(&config, &mut input).await
    }
}

/// Reads the next command, skipping blank lines and reporting parse errors.
/// Returns `None` on end of input.
async fn next_command(input: &mut Lines<BufReader<Stdin>>) -> Result<Option<Command>> {
    while let Some(line) = input.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Ok(command) => return Ok(Some(command)),
            Err(e) => eprintln!("{e}"),
        }
    }
    Ok(None)
}

async fn run_offline(config: &ClientConfig, input: &mut Lines<BufReader<Stdin>>) -> Result<()> {
    let mut board = Board::new(config.width, config.height)?;
    info!("Offline game on a {}x{} board", config.width, config.height);
    print_offline(&board);

    while let Some(command) = next_command(input).await? {
        match command {
            Command::NewGame => {
                board = Board::new(config.width, config.height)?;
                print_offline(&board);
            }
            Command::Move(column) => match board.insert_move(column) {
                Ok(_) => print_offline(&board),
                Err(e) => eprintln!("{e}"),
            },
            Command::Show | Command::Refresh => print_offline(&board),
            Command::Join => eprintln!("There is no server to join in offline mode"),
            Command::Help => print!("{COMMANDS_HELP}"),
            Command::Quit => break,
        }
    }
    Ok(())
}

fn print_offline(board: &Board) {
    println!("{}", render_board(board));
    if board.winner().is_none() {
        println!("{} to move.", board.active_player());
    }
}

async fn run_online(config: &ClientConfig, input: &mut Lines<BufReader<Stdin>>) -> Result<()> {
    let api = ApiClient::with_timeout(config.server_url.clone(), config.request_timeout)?;
    info!("Connecting to {}", api.base_url());

    let session = SessionSynchronizer::new(api, config.session());
    let mut events = session.subscribe();
    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                SessionEvent::StateChanged { state, snapshot } => {
                    println!("{}", render_snapshot(&snapshot));
                    println!("{}", status_line(state));
                }
                SessionEvent::PollFailed { message } => {
                    eprintln!("Lost contact with the server: {message}");
                    eprintln!("Type 'refresh' to try again.");
                }
            }
        }
    });

    match session.join_current_game().await {
        Ok(_) => {}
        Err(SessionError::NoGameAvailable) => println!("No game yet. Type 'new' to start one."),
        Err(e) => eprintln!("Could not join a game: {e}"),
    }

    while let Some(command) = next_command(input).await? {
        let result = match command {
            Command::NewGame => session.start_new_game().await,
            Command::Join => session.join_current_game().await,
            Command::Refresh => session.refresh().await,
            Command::Move(column) => session.submit_move(column).await,
            Command::Show => {
                match session.snapshot().await {
                    Some(snapshot) => println!("{}", render_snapshot(&snapshot)),
                    None => println!("No game yet."),
                }
                println!("{}", status_line(session.state().await));
                continue;
            }
            Command::Help => {
                print!("{COMMANDS_HELP}");
                continue;
            }
            Command::Quit => break,
        };

        if let Err(e) = result {
            eprintln!("{e}");
        }
    }

    session.stop_polling().await;
    drop(session);
    printer.abort();
    Ok(())
}
