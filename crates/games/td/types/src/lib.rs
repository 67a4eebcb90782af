//! Serializable read-only views of the tower-defense world.
//!
//! Produced by `sim_td::observe` for renderers, debug tools and the headless
//! runner's snapshot dump.

use serde::{Deserialize, Serialize};

/// A point in absolute screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct ViewportInfo {
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct HealthInfo {
    pub current: u32,
    pub max: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct EnemyInfo {
    pub enemy_type: String,
    pub speed: f32,
    pub path: String,
    pub next_waypoint: usize,
    pub in_slow_zone: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct TowerInfo {
    pub tower_type: String,
    pub damage: u32,
    /// Targets closer than this are ignored. Zero for disc-shaped ranges.
    pub inner_range: f32,
    pub range: f32,
    pub attack_interval_ms: f64,
    /// Simulation time of the last shot, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_attack_ms: Option<f64>,
}

/// How a projectile finds what it hits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(tag = "type")]
pub enum ProjectileInfo {
    Tracking {
        damage: u32,
        speed: f32,
        target: u64,
    },
    Area {
        damage: u32,
        speed: f32,
        destination: Point,
        radius: f32,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct PathInfo {
    pub tag: String,
    /// Waypoints in absolute coordinates for the current viewport.
    pub waypoints: Vec<Point>,
    pub color: [u8; 4],
    pub width: f32,
    pub visible: bool,
}

/// Every component of one entity. Absent components are omitted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct EntityInfo {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<HealthInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enemy: Option<EnemyInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tower: Option<TowerInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projectile: Option<ProjectileInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathInfo>,
}

/// Full world state at one tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct WorldSnapshot {
    pub tick: u64,
    pub time_ms: f64,
    pub level: u32,

    pub manpower: u32,
    pub supply: u32,
    pub lives: u32,
    pub wave: u32,

    pub viewport: ViewportInfo,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tutorial_step: Option<String>,
    /// "Win" or "Lose" once the game has ended.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,

    pub entities: Vec<EntityInfo>,
}
