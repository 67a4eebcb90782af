pub mod component;
pub mod entity;
pub mod errors;
pub mod game;
pub mod registry;
pub mod storage;
pub mod system;
pub mod time;
pub mod types;
pub mod world;

pub use component::{Component, ComponentSet, Query};
pub use entity::{EntityAllocator, EntityId};
pub use errors::EcsError;
pub use game::{Game, TerminalOutcome};
pub use registry::Registry;
pub use storage::Storage;
pub use system::System;
pub use time::{FrameTime, Millis, SimClock};
pub use types::Tick;
pub use world::World;
