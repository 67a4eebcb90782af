//! The per-tick pipeline, registered in this order: spawn, movement, attack.

mod attack;
mod movement;
mod spawn;

pub use attack::AttackSystem;
pub use movement::MovementSystem;
pub use spawn::{spawn_enemy, SpawnSystem};

use crate::components::{Path, PathTag, TdComponents};
use glam::Vec2;
use sim_core::Registry;

/// Look up a route by tag among the Path entities currently in the world.
pub fn find_path<'a>(registry: &'a Registry<TdComponents>, tag: &PathTag) -> Option<&'a Path> {
    registry
        .components()
        .path
        .iter()
        .map(|(_, path)| path)
        .find(|path| path.tag() == tag)
}

/// Move from `from` toward `to` by at most `max_step`, never past `to`.
pub(crate) fn step_towards(from: Vec2, to: Vec2, max_step: f32) -> Vec2 {
    let offset = to - from;
    let distance = offset.length();
    if distance <= max_step || distance <= f32::EPSILON {
        to
    } else {
        from + offset / distance * max_step
    }
}
