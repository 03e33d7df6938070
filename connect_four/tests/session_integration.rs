/// Integration tests for the session synchronizer against an in-process
/// authority that hosts a real board and plays the opponent seat.
use async_trait::async_trait;
use connect_four::{
    Board, GameApi, GameId, GameList, GameStatus, Player, SessionConfig, SessionError,
    SessionEvent, SessionState, SessionSynchronizer, Snapshot,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

/// Hosts one game at a time. The local client always sits in seat one; the
/// opponent answers with its scripted columns whenever it is polled on its turn.
struct LocalAuthority {
    board: Mutex<Option<Board>>,
    opponent_moves: Mutex<VecDeque<usize>>,
    games_created: Mutex<u32>,
}

impl LocalAuthority {
    fn new(opponent_moves: &[usize]) -> Self {
        Self {
            board: Mutex::new(None),
            opponent_moves: Mutex::new(opponent_moves.iter().copied().collect()),
            games_created: Mutex::new(0),
        }
    }

    fn snapshot(&self, board: &Board) -> Snapshot {
        Snapshot {
            id: Some(GameId::new(self.games_created.lock().unwrap().to_string())),
            player: Player::One,
            next: Some(board.active_player()),
            winner: board.winner(),
            state: GameStatus::Active,
            width: board.width(),
            height: board.height(),
            cells: board.cells().to_vec(),
        }
    }
}

#[async_trait]
impl GameApi for LocalAuthority {
    async fn create_game(&self) -> anyhow::Result<Snapshot> {
        *self.games_created.lock().unwrap() += 1;
        let board = Board::standard();
        let snapshot = self.snapshot(&board);
        *self.board.lock().unwrap() = Some(board);
        Ok(snapshot)
    }

    async fn list_games(&self) -> anyhow::Result<GameList> {
        let created = *self.games_created.lock().unwrap();
        Ok(GameList {
            games: (1..=created).map(|id| format!("/game/{id}")).collect(),
        })
    }

    async fn fetch_game(&self, _id: &GameId) -> anyhow::Result<Snapshot> {
        let mut guard = self.board.lock().unwrap();
        let board = guard.as_mut().ok_or_else(|| anyhow::anyhow!("no game"))?;
        if board.winner().is_none() && board.active_player() == Player::Two {
            if let Some(column) = self.opponent_moves.lock().unwrap().pop_front() {
                board.insert_move(column)?;
            }
        }
        Ok(self.snapshot(board))
    }

    async fn submit_move(&self, _id: &GameId, column: usize) -> anyhow::Result<Snapshot> {
        let mut guard = self.board.lock().unwrap();
        let board = guard.as_mut().ok_or_else(|| anyhow::anyhow!("no game"))?;
        if board.active_player() != Player::One {
            anyhow::bail!("not your turn");
        }
        board.insert_move(column)?;
        Ok(self.snapshot(board))
    }
}

fn session(authority: LocalAuthority) -> SessionSynchronizer<LocalAuthority> {
    SessionSynchronizer::new(
        authority,
        SessionConfig {
            poll_interval: Duration::from_millis(5),
            ..SessionConfig::default()
        },
    )
}

async fn wait_for_state(events: &mut mpsc::Receiver<SessionEvent>, wanted: SessionState) {
    loop {
        let event = timeout(Duration::from_secs(2), events.recv())
            .await
            .expect("timed out waiting for state")
            .expect("event channel closed");
        if let SessionEvent::StateChanged { state, .. } = event {
            if state == wanted {
                return;
            }
        }
    }
}

#[tokio::test]
async fn test_full_game_won_by_local_player() {
    let session = session(LocalAuthority::new(&[6, 6, 6]));
    let mut events = session.subscribe();

    assert_eq!(session.start_new_game().await.unwrap(), SessionState::MyTurn);
    wait_for_state(&mut events, SessionState::MyTurn).await;
    for _ in 0..3 {
        assert_eq!(session.submit_move(0).await.unwrap(), SessionState::TheirTurn);
        wait_for_state(&mut events, SessionState::MyTurn).await;
    }
    assert_eq!(session.submit_move(0).await.unwrap(), SessionState::Won);

    let snapshot = session.snapshot().await.unwrap();
    assert_eq!(snapshot.winner, Some(Player::One));
    assert!(!session.is_polling().await);
}

#[tokio::test]
async fn test_full_game_lost_to_opponent() {
    let session = session(LocalAuthority::new(&[6, 6, 6, 6]));
    let mut events = session.subscribe();

    session.start_new_game().await.unwrap();
    wait_for_state(&mut events, SessionState::MyTurn).await;
    for column in [0, 1, 2] {
        session.submit_move(column).await.unwrap();
        wait_for_state(&mut events, SessionState::MyTurn).await;
    }
    session.submit_move(0).await.unwrap();
    wait_for_state(&mut events, SessionState::Lost).await;

    assert!(matches!(
        session.submit_move(3).await,
        Err(SessionError::NotYourTurn(SessionState::Lost))
    ));
}

#[tokio::test]
async fn test_rejected_remote_move_surfaces_error() {
    let session = session(LocalAuthority::new(&[0, 0, 0]));
    let mut events = session.subscribe();
    session.start_new_game().await.unwrap();
    wait_for_state(&mut events, SessionState::MyTurn).await;

    // Column 0 alternates between both seats until it is full.
    for _ in 0..3 {
        session.submit_move(0).await.unwrap();
        wait_for_state(&mut events, SessionState::MyTurn).await;
    }
    let err = session.submit_move(0).await.unwrap_err();
    assert!(matches!(err, SessionError::Remote(_)));
    assert!(err.to_string().contains("column 0 is full"));
    assert_eq!(session.state().await, SessionState::MyTurn);
}

#[tokio::test]
async fn test_join_after_new_game_elsewhere() {
    let authority = Arc::new(LocalAuthority::new(&[]));
    let host = SessionSynchronizer::new(Arc::clone(&authority), SessionConfig::default());
    host.start_new_game().await.unwrap();

    let guest = SessionSynchronizer::new(Arc::clone(&authority), SessionConfig::default());
    assert_eq!(guest.join_current_game().await.unwrap(), SessionState::MyTurn);
    assert_eq!(guest.game_id().await, Some(GameId::new("1")));
}
