use sim_core::{TerminalOutcome, Tick};

/// Tracks position in an event stream for cursor-based retrieval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct EventCursor(pub u64);

/// Status of a running session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    Paused,
    Finished(TerminalOutcome),
    Shutdown,
}

/// An event from the session with sequence number for cursor tracking.
#[derive(Clone, Debug)]
pub struct ServerEvent<E> {
    pub sequence: u64,
    pub tick: Tick,
    pub event: E,
}

/// Configuration for a real-time session.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Fixed simulation rate (ticks per second).
    pub tick_hz: u32,
    /// Capacity of the event ring buffer.
    pub event_buffer_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_hz: 60,
            event_buffer_capacity: 1024,
        }
    }
}
