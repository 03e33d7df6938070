//! Session synchronizer: keeps a local session state in step with a remote
//! game through move submission and background polling.

use log::{debug, error, info, warn};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;
use tokio::{sync::mpsc, task::JoinHandle};

use super::api::GameApi;
use super::errors::{SessionError, SessionResult};
use super::state::{SessionState, derive_state};
use crate::game::BoardError;
use crate::net::messages::{GameId, Snapshot};

/// Poll cadence used while waiting on the remote.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Capacity of each subscriber channel.
pub const DEFAULT_EVENT_BUFFER: usize = 64;

/// Session tuning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Delay before each background fetch.
    pub poll_interval: Duration,
    /// Capacity of each subscriber channel. Events for a full channel are dropped.
    pub event_buffer: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            event_buffer: DEFAULT_EVENT_BUFFER,
        }
    }
}

/// Notifications delivered to subscribers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// The derived state changed. Carries the snapshot that caused it.
    StateChanged {
        state: SessionState,
        snapshot: Snapshot,
    },
    /// A background fetch failed and polling stopped. Call
    /// [`SessionSynchronizer::refresh`] to resume.
    PollFailed { message: String },
}

/// State guarded by the session's async mutex. Every remote call is made
/// while holding it, so calls and derivations never interleave.
#[derive(Debug, Default)]
struct SessionCore {
    state: SessionState,
    snapshot: Option<Snapshot>,
    game_id: Option<GameId>,
    /// Bumped whenever a poller must stop; a poller only acts while its
    /// generation is current.
    generation: u64,
    /// True while a poller of the current generation is alive.
    polling: bool,
}

struct Shared<A> {
    api: A,
    config: SessionConfig,
    core: tokio::sync::Mutex<SessionCore>,
    subscribers: Mutex<Vec<mpsc::Sender<SessionEvent>>>,
    poller: Mutex<Option<JoinHandle<()>>>,
}

impl<A: GameApi> Shared<A> {
    /// Stores `snapshot`, re-derives the state and notifies subscribers if
    /// it changed.
    fn apply_snapshot(&self, core: &mut SessionCore, snapshot: Snapshot) -> SessionState {
        let state = derive_state(&snapshot);
        core.snapshot = Some(snapshot.clone());
        if state != core.state {
            debug!("Session state {} -> {}", core.state, state);
            core.state = state;
            if state.is_terminal() {
                info!("Game finished: {state}");
            }
            self.notify(SessionEvent::StateChanged { state, snapshot });
        }
        state
    }

    fn notify(&self, event: SessionEvent) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subscribers.retain(|sender| match sender.try_send(event.clone()) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!("Subscriber channel full, dropping session event");
                true
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                debug!("Subscriber disconnected, removing");
                false
            }
        });
    }

    fn abort_poller(&self) {
        let handle = self
            .poller
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.abort();
        }
    }
}

/// Tracks one remote game from the local player's seat.
///
/// Cloning yields another handle to the same session. Background polling
/// stops on its own once the last handle is dropped.
pub struct SessionSynchronizer<A> {
    shared: Arc<Shared<A>>,
}

impl<A> Clone for SessionSynchronizer<A> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<A: GameApi + 'static> SessionSynchronizer<A> {
    pub fn new(api: A, config: SessionConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                api,
                config,
                core: tokio::sync::Mutex::new(SessionCore::default()),
                subscribers: Mutex::new(Vec::new()),
                poller: Mutex::new(None),
            }),
        }
    }

    /// Registers a new listener for session events.
    pub fn subscribe(&self) -> mpsc::Receiver<SessionEvent> {
        let (sender, receiver) = mpsc::channel(self.shared.config.event_buffer.max(1));
        self.shared
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sender);
        receiver
    }

    /// Current state. Waits for any in-flight remote call to finish.
    pub async fn state(&self) -> SessionState {
        self.shared.core.lock().await.state
    }

    /// Latest snapshot received, if any.
    pub async fn snapshot(&self) -> Option<Snapshot> {
        self.shared.core.lock().await.snapshot.clone()
    }

    pub async fn game_id(&self) -> Option<GameId> {
        self.shared.core.lock().await.game_id.clone()
    }

    /// Whether a background poller is running for the current game.
    pub async fn is_polling(&self) -> bool {
        self.shared.core.lock().await.polling
    }

    /// Requests a new remote game and adopts it, superseding any running
    /// poller. Subscribers always hear about the adopted game. If the remote
    /// fails to produce a usable game, the previous game stays current and
    /// resumes polling.
    pub async fn start_new_game(&self) -> SessionResult<SessionState> {
        self.shared.abort_poller();
        let mut core = self.shared.core.lock().await;
        core.generation += 1;
        core.polling = false;

        let created = match self.shared.api.create_game().await {
            Ok(snapshot) => snapshot
                .id
                .clone()
                .map(|id| (id, snapshot))
                .ok_or(SessionError::MissingGameId),
            Err(e) => Err(e.into()),
        };
        let (id, snapshot) = match created {
            Ok(created) => created,
            Err(e) => {
                warn!("New game not started, keeping the current one: {e}");
                self.ensure_polling(&mut core);
                return Err(e);
            }
        };

        info!("Started game {id}");
        core.game_id = Some(id);
        core.state = SessionState::Initial;
        let state = self.shared.apply_snapshot(&mut core, snapshot);
        self.ensure_polling(&mut core);
        Ok(state)
    }

    /// Attaches to the first listed game unless a game is already known,
    /// then fetches it.
    pub async fn join_current_game(&self) -> SessionResult<SessionState> {
        let mut core = self.shared.core.lock().await;
        if core.game_id.is_none() {
            let listing = self.shared.api.list_games().await?;
            let id = listing
                .ids()
                .into_iter()
                .next()
                .ok_or(SessionError::NoGameAvailable)?;
            info!("Joining game {id}");
            core.game_id = Some(id);
        }
        self.refresh_locked(&mut core).await
    }

    /// Fetches the current game once and resumes polling if appropriate.
    pub async fn refresh(&self) -> SessionResult<SessionState> {
        let mut core = self.shared.core.lock().await;
        self.refresh_locked(&mut core).await
    }

    /// Submits a move. Only allowed on the local player's turn; otherwise
    /// nothing is sent.
    pub async fn submit_move(&self, column: usize) -> SessionResult<SessionState> {
        let mut core = self.shared.core.lock().await;
        if core.state != SessionState::MyTurn {
            return Err(SessionError::NotYourTurn(core.state));
        }
        let id = core.game_id.clone().ok_or(SessionError::NoCurrentGame)?;
        if let Some(width) = core.snapshot.as_ref().map(|s| s.width).filter(|&w| w > 0) {
            if column >= width {
                return Err(BoardError::InvalidColumn { column, width }.into());
            }
        }

        debug!("Submitting column {column} to game {id}");
        let snapshot = self.shared.api.submit_move(&id, column).await?;
        let state = self.shared.apply_snapshot(&mut core, snapshot);
        self.ensure_polling(&mut core);
        Ok(state)
    }

    /// Stops background polling. The session keeps its state; `refresh`
    /// starts polling again.
    pub async fn stop_polling(&self) {
        self.shared.abort_poller();
        let mut core = self.shared.core.lock().await;
        core.generation += 1;
        core.polling = false;
    }

    async fn refresh_locked(&self, core: &mut SessionCore) -> SessionResult<SessionState> {
        let id = core.game_id.clone().ok_or(SessionError::NoCurrentGame)?;
        let snapshot = self.shared.api.fetch_game(&id).await?;
        let state = self.shared.apply_snapshot(core, snapshot);
        self.ensure_polling(core);
        Ok(state)
    }

    /// Spawns a poller unless one is already running or the state does not
    /// call for one. Must be called with the core locked.
    fn ensure_polling(&self, core: &mut SessionCore) {
        if core.polling || !core.state.is_polling() {
            return;
        }
        core.polling = true;
        let generation = core.generation;
        debug!("Starting poller (generation {generation})");
        let handle = tokio::spawn(poll_loop(Arc::downgrade(&self.shared), generation));
        *self
            .shared
            .poller
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(handle);
    }
}

/// Fetches the game every `poll_interval` until the state no longer calls
/// for polling, the generation moves on, or the session is dropped.
async fn poll_loop<A: GameApi>(shared: Weak<Shared<A>>, generation: u64) {
    loop {
        let interval = match shared.upgrade() {
            Some(shared) => shared.config.poll_interval,
            None => return,
        };
        tokio::time::sleep(interval).await;

        let Some(shared) = shared.upgrade() else {
            return;
        };
        let mut core = shared.core.lock().await;
        if core.generation != generation {
            debug!("Poller generation {generation} superseded");
            return;
        }
        let Some(id) = core.game_id.clone().filter(|_| core.state.is_polling()) else {
            core.polling = false;
            return;
        };

        match shared.api.fetch_game(&id).await {
            Ok(snapshot) => {
                let state = shared.apply_snapshot(&mut core, snapshot);
                if !state.is_polling() {
                    debug!("Poller stopping in state {state}");
                    core.polling = false;
                    return;
                }
            }
            Err(e) => {
                error!("Polling game {id} failed: {e:#}");
                core.polling = false;
                shared.notify(SessionEvent::PollFailed {
                    message: format!("{e:#}"),
                });
                return;
            }
        }
    }
}
