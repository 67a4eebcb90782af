use crate::entity::EntityId;
use std::fmt;

/// Error for registry operations on a specific entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// The entity was never created or has been destroyed.
    NoSuchEntity(EntityId),
}

impl fmt::Display for EcsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EcsError::NoSuchEntity(id) => write!(f, "entity {} does not exist", id),
        }
    }
}

impl std::error::Error for EcsError {}
