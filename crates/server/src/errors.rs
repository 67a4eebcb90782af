use std::fmt;

/// Error for control operations on a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The session has been shut down and no longer accepts commands.
    Shutdown,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Shutdown => write!(f, "session has been shut down"),
        }
    }
}

impl std::error::Error for SessionError {}
