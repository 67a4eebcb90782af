use crate::components::PathTag;
use crate::config::{EnemyKind, TowerKind};
use crate::tutorial::TutorialStep;
use glam::Vec2;
use sim_core::EntityId;

/// Notifications emitted by the simulation, each at most once per cause.
#[derive(Clone, Debug, PartialEq)]
pub enum TdEvent {
    ResourcesChanged {
        manpower: u32,
        supply: u32,
    },
    TowerPlaced {
        id: EntityId,
        kind: TowerKind,
        position: Vec2,
    },
    WaveStarted {
        wave: u32,
        size: u32,
    },
    /// The wave cap was reached; no further enemies will spawn.
    AllWavesSpawned {
        waves: u32,
    },
    EnemySpawned {
        id: EntityId,
        kind: EnemyKind,
        path: PathTag,
    },
    ProjectileFired {
        tower: EntityId,
        projectile: EntityId,
    },
    EnemyDefeated {
        id: EntityId,
        kind: EnemyKind,
        reward: u32,
    },
    EnemyReachedEnd {
        id: EntityId,
    },
    /// An enemy's route vanished and it was removed.
    EnemyOrphaned {
        id: EntityId,
        path: PathTag,
    },
    LivesChanged {
        lives: u32,
    },
    GameOver,
    GameWon,
    TutorialStepStarted {
        step: TutorialStep,
        message: &'static str,
    },
}
