pub mod errors;
pub mod events;
pub mod session;
pub mod tick_loop;
pub mod types;

pub use errors::SessionError;
pub use events::{EventBatch, EventBuffer};
pub use session::SessionHandle;
pub use tick_loop::{run_tick_loop, spawn_tick_loop};
pub use types::{EventCursor, ServerEvent, SessionConfig, SessionStatus};
