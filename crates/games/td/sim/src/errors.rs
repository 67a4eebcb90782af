use crate::components::PathTag;
use crate::config::Cost;
use sim_core::EcsError;
use std::fmt;

/// Error when constructing a component from invalid data.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentError {
    /// Attack speed must be a positive, finite number of attacks per second.
    InvalidAttackSpeed(f32),
    /// A path needs at least one waypoint.
    EmptyPath(PathTag),
}

impl fmt::Display for ComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentError::InvalidAttackSpeed(speed) => {
                write!(f, "attack speed must be positive, got {}", speed)
            }
            ComponentError::EmptyPath(tag) => write!(f, "path '{}' has no waypoints", tag),
        }
    }
}

impl std::error::Error for ComponentError {}

/// Error when placing a tower.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceTowerError {
    /// The ledger cannot cover the tower's cost. Nothing was spent.
    InsufficientResources { needed: Cost, available: Cost },
    /// The game is over; restart before building.
    GameFinished,
    /// The tower's stats are unusable.
    InvalidTower(ComponentError),
    Entity(EcsError),
}

impl fmt::Display for PlaceTowerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceTowerError::InsufficientResources { needed, available } => write!(
                f,
                "insufficient resources: need {} manpower / {} supply, have {} / {}",
                needed.manpower, needed.supply, available.manpower, available.supply
            ),
            PlaceTowerError::GameFinished => write!(f, "game has finished"),
            PlaceTowerError::InvalidTower(e) => write!(f, "invalid tower: {}", e),
            PlaceTowerError::Entity(e) => write!(f, "tower entity: {}", e),
        }
    }
}

impl std::error::Error for PlaceTowerError {}

impl From<ComponentError> for PlaceTowerError {
    fn from(e: ComponentError) -> Self {
        PlaceTowerError::InvalidTower(e)
    }
}

impl From<EcsError> for PlaceTowerError {
    fn from(e: EcsError) -> Self {
        PlaceTowerError::Entity(e)
    }
}

/// Error when loading a level.
#[derive(Debug, Clone, PartialEq)]
pub enum LevelError {
    /// No layout exists for this level id.
    UnknownLevel(u32),
    /// A layout table entry is malformed.
    InvalidLayout(ComponentError),
    Entity(EcsError),
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::UnknownLevel(id) => write!(f, "unknown level {}", id),
            LevelError::InvalidLayout(e) => write!(f, "invalid level layout: {}", e),
            LevelError::Entity(e) => write!(f, "level entity: {}", e),
        }
    }
}

impl std::error::Error for LevelError {}

impl From<ComponentError> for LevelError {
    fn from(e: ComponentError) -> Self {
        LevelError::InvalidLayout(e)
    }
}

impl From<EcsError> for LevelError {
    fn from(e: EcsError) -> Self {
        LevelError::Entity(e)
    }
}

/// Error when reading or writing the persisted ledger.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "store i/o failed: {}", e),
            StoreError::Parse(e) => write!(f, "store data is malformed: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Parse(e)
    }
}
