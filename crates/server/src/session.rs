use crate::errors::SessionError;
use crate::events::{EventBatch, EventBuffer};
use crate::types::{EventCursor, SessionConfig, SessionStatus};
use sim_core::{Game, Tick};
use sim_host::GameHost;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Internal state of a session.
pub struct SessionInner<G: Game> {
    pub host: GameHost<G>,
    pub events: EventBuffer<G::Event>,
    pub status: SessionStatus,
}

/// Thread-safe handle to a real-time session.
///
/// Every operation locks the whole session, so the tick loop and callers
/// never observe a half-applied update.
pub struct SessionHandle<G: Game> {
    inner: Arc<Mutex<SessionInner<G>>>,
    shutdown: Arc<AtomicBool>,
    tick_hz: u32,
}

impl<G: Game> Clone for SessionHandle<G> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            shutdown: self.shutdown.clone(),
            tick_hz: self.tick_hz,
        }
    }
}

impl<G: Game> SessionHandle<G> {
    pub fn new(game: G, config: &SessionConfig) -> Self {
        let host = GameHost::new(game, config.tick_hz);
        let tick_hz = host.tick_hz();
        Self {
            inner: Arc::new(Mutex::new(SessionInner {
                host,
                events: EventBuffer::new(config.event_buffer_capacity),
                status: SessionStatus::Running,
            })),
            shutdown: Arc::new(AtomicBool::new(false)),
            tick_hz,
        }
    }

    pub fn tick_hz(&self) -> u32 {
        self.tick_hz
    }

    pub fn should_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }

    fn ensure_open(&self) -> Result<(), SessionError> {
        if self.should_shutdown() {
            Err(SessionError::Shutdown)
        } else {
            Ok(())
        }
    }

    /// Stop advancing the simulation. World state is kept.
    pub async fn pause(&self) -> Result<(), SessionError> {
        self.ensure_open()?;
        let mut inner = self.inner.lock().await;
        inner.host.pause();
        if inner.status == SessionStatus::Running {
            inner.status = SessionStatus::Paused;
        }
        Ok(())
    }

    pub async fn resume(&self) -> Result<(), SessionError> {
        self.ensure_open()?;
        let mut inner = self.inner.lock().await;
        inner.host.resume();
        if inner.status == SessionStatus::Paused {
            inner.status = SessionStatus::Running;
        }
        Ok(())
    }

    /// Restart the game from its initial state, including a finished one.
    pub async fn restart(&self) -> Result<(), SessionError> {
        self.ensure_open()?;
        let mut inner = self.inner.lock().await;
        inner.host.restart();
        inner.events.clear();
        inner.status = SessionStatus::Running;
        Ok(())
    }

    /// Step one tick and update status.
    /// Returns true once the loop should exit.
    pub async fn step_one_tick(&self) -> bool {
        let mut inner = self.inner.lock().await;

        match inner.status {
            SessionStatus::Shutdown => return true,
            SessionStatus::Paused | SessionStatus::Finished(_) => return false,
            SessionStatus::Running => {}
        }

        if let Some(events) = inner.host.step_one_tick() {
            let tick = inner.host.current_tick();
            for event in events {
                inner.events.push(tick, event);
            }
        }

        if let Some(outcome) = inner.host.is_terminal() {
            tracing::info!(tick = inner.host.current_tick(), ?outcome, "session finished");
            inner.status = SessionStatus::Finished(outcome);
        }

        false
    }

    pub async fn poll_events(&self, cursor: EventCursor) -> EventBatch<G::Event> {
        let inner = self.inner.lock().await;
        inner.events.read_from(cursor)
    }

    pub async fn status(&self) -> SessionStatus {
        let inner = self.inner.lock().await;
        inner.status
    }

    pub async fn current_tick(&self) -> Tick {
        let inner = self.inner.lock().await;
        inner.host.current_tick()
    }

    /// Read the game under the session lock.
    pub async fn with_game<T>(&self, f: impl FnOnce(&G) -> T) -> T {
        let inner = self.inner.lock().await;
        f(inner.host.game())
    }

    /// Mutate the game under the session lock, between ticks.
    pub async fn with_game_mut<T>(&self, f: impl FnOnce(&mut G) -> T) -> Result<T, SessionError> {
        self.ensure_open()?;
        let mut inner = self.inner.lock().await;
        Ok(f(inner.host.game_mut()))
    }

    /// Stop the tick loop. Further control calls fail.
    pub async fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
        let mut inner = self.inner.lock().await;
        inner.status = SessionStatus::Shutdown;
    }
}
