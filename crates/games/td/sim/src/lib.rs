pub mod components;
pub mod config;
pub mod errors;
pub mod events;
pub mod game;
pub mod ledger;
pub mod levels;
pub mod observe;
pub mod resources;
pub mod store;
pub mod systems;
pub mod tutorial;

pub use components::{
    ComponentKind, Enemy, Health, Path, PathStyle, PathTag, Projectile, ProjectileBehavior,
    TdComponents, Tower, Transform,
};
pub use config::{Cost, EnemyKind, EnemyStats, TdConfig, TowerKind, TowerRange, TowerStats};
pub use errors::{ComponentError, LevelError, PlaceTowerError, StoreError};
pub use events::TdEvent;
pub use game::TdGame;
pub use ledger::{Balance, Ledger};
pub use levels::{level_ids, load_level, LevelLayout, LevelTower};
pub use observe::build_snapshot;
pub use resources::{SlowZone, TdResources, Viewport};
pub use store::{JsonFileStore, LedgerStore, MemoryStore};
pub use tutorial::{Tutorial, TutorialStep};
