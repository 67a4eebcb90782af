//! Plain data attached to entities. No behaviour beyond small accessors.

use crate::config::{EnemyKind, TowerKind, TowerRange, TowerStats};
use crate::errors::ComponentError;
use crate::resources::Viewport;
use glam::Vec2;
use sim_core::{component, ComponentSet, EntityId, Millis, Storage};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec2,
}

impl Transform {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Subtract `amount`, flooring at 0. Returns true if this hit killed.
    pub fn apply_damage(&mut self, amount: u32) -> bool {
        let was_alive = self.current > 0;
        self.current = self.current.saturating_sub(amount);
        was_alive && self.current == 0
    }

    pub fn is_dead(&self) -> bool {
        self.current == 0
    }
}

/// Names one logical route.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathTag(String);

impl PathTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PathTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathStyle {
    pub color: [u8; 4],
    pub width: f32,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            color: [0x8b, 0x5a, 0x2b, 0xff],
            width: 40.0,
        }
    }
}

/// A route in normalized screen space (`[0,1] x [0,1]`).
///
/// Always holds at least one waypoint. Absolute coordinates are derived on
/// demand because the viewport can change size at any time.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    tag: PathTag,
    waypoints: Vec<Vec2>,
    pub style: PathStyle,
    pub visible: bool,
}

impl Path {
    pub fn new(tag: PathTag, waypoints: Vec<Vec2>) -> Result<Self, ComponentError> {
        if waypoints.is_empty() {
            return Err(ComponentError::EmptyPath(tag));
        }
        Ok(Self {
            tag,
            waypoints,
            style: PathStyle::default(),
            visible: true,
        })
    }

    pub fn with_style(mut self, style: PathStyle) -> Self {
        self.style = style;
        self
    }

    pub fn tag(&self) -> &PathTag {
        &self.tag
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Fewer than two points can position an enemy but cannot be drawn.
    pub fn is_renderable(&self) -> bool {
        self.waypoints.len() >= 2
    }

    pub fn to_absolute(&self, viewport: &Viewport) -> Vec<Vec2> {
        self.waypoints
            .iter()
            .map(|&p| viewport.to_absolute(p))
            .collect()
    }

    /// First waypoint in absolute coordinates.
    pub fn start(&self, viewport: &Viewport) -> Vec2 {
        viewport.to_absolute(self.waypoints[0])
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub speed: f32,
    pub original_speed: f32,
    pub reward: u32,
    pub path: PathTag,
    /// Index of the waypoint being walked to. Only ever increases.
    pub next_waypoint: usize,
    pub in_slow_zone: bool,
    pub reward_granted: bool,
}

impl Enemy {
    pub fn new(kind: EnemyKind, path: PathTag) -> Self {
        let stats = kind.stats();
        Self {
            kind,
            speed: stats.speed,
            original_speed: stats.speed,
            reward: stats.reward,
            path,
            next_waypoint: 0,
            in_slow_zone: false,
            reward_granted: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tower {
    pub kind: TowerKind,
    pub damage: u32,
    pub range: TowerRange,
    /// Multiplier on the base projectile speed.
    pub projectile_speed: f32,
    pub splash_radius: Option<f32>,
    attack_interval: Millis,
    last_attack: Option<Millis>,
}

impl Tower {
    pub fn new(kind: TowerKind) -> Result<Self, ComponentError> {
        Self::with_stats(kind, kind.stats())
    }

    /// Build a tower from explicit stats. Attack speed must be positive.
    pub fn with_stats(kind: TowerKind, stats: TowerStats) -> Result<Self, ComponentError> {
        if !(stats.attack_speed.is_finite() && stats.attack_speed > 0.0) {
            return Err(ComponentError::InvalidAttackSpeed(stats.attack_speed));
        }
        Ok(Self {
            kind,
            damage: stats.damage,
            range: stats.range,
            projectile_speed: stats.projectile_speed,
            splash_radius: stats.splash_radius,
            attack_interval: Millis::new(1_000.0 / stats.attack_speed as f64),
            last_attack: None,
        })
    }

    pub fn attack_interval(&self) -> Millis {
        self.attack_interval
    }

    pub fn last_attack(&self) -> Option<Millis> {
        self.last_attack
    }

    /// A tower that has never fired is ready immediately.
    pub fn can_attack(&self, now: Millis) -> bool {
        match self.last_attack {
            None => true,
            Some(last) => now.since(last) >= self.attack_interval,
        }
    }

    /// Start the cooldown. The timestamp never moves backwards.
    pub fn record_attack(&mut self, now: Millis) {
        self.last_attack = match self.last_attack {
            Some(last) if last > now => Some(last),
            _ => Some(now),
        };
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProjectileBehavior {
    /// Homes on a live entity; dies without effect if the target is gone.
    Tracking { target: EntityId },
    /// Flies to a fixed point and damages everything within `radius`.
    Area { destination: Vec2, radius: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projectile {
    pub damage: u32,
    /// Pixels per second.
    pub speed: f32,
    pub behavior: ProjectileBehavior,
}

impl Projectile {
    pub fn tracking(target: EntityId, damage: u32, speed: f32) -> Self {
        Self {
            damage,
            speed,
            behavior: ProjectileBehavior::Tracking { target },
        }
    }

    pub fn area(destination: Vec2, radius: f32, damage: u32, speed: f32) -> Self {
        Self {
            damage,
            speed,
            behavior: ProjectileBehavior::Area {
                destination,
                radius,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Transform,
    Health,
    Path,
    Enemy,
    Tower,
    Projectile,
}

/// Every component table of the game.
#[derive(Debug, Default)]
pub struct TdComponents {
    pub transform: Storage<Transform>,
    pub health: Storage<Health>,
    pub path: Storage<Path>,
    pub enemy: Storage<Enemy>,
    pub tower: Storage<Tower>,
    pub projectile: Storage<Projectile>,
}

impl ComponentSet for TdComponents {
    type Kind = ComponentKind;

    fn remove_entity(&mut self, id: EntityId) {
        self.transform.remove(id);
        self.health.remove(id);
        self.path.remove(id);
        self.enemy.remove(id);
        self.tower.remove(id);
        self.projectile.remove(id);
    }

    fn contains_kind(&self, id: EntityId, kind: ComponentKind) -> bool {
        match kind {
            ComponentKind::Transform => self.transform.contains(id),
            ComponentKind::Health => self.health.contains(id),
            ComponentKind::Path => self.path.contains(id),
            ComponentKind::Enemy => self.enemy.contains(id),
            ComponentKind::Tower => self.tower.contains(id),
            ComponentKind::Projectile => self.projectile.contains(id),
        }
    }

    fn clear(&mut self) {
        self.transform.clear();
        self.health.clear();
        self.path.clear();
        self.enemy.clear();
        self.tower.clear();
        self.projectile.clear();
    }
}

component!(TdComponents, Transform, transform, ComponentKind::Transform);
component!(TdComponents, Health, health, ComponentKind::Health);
component!(TdComponents, Path, path, ComponentKind::Path);
component!(TdComponents, Enemy, enemy, ComponentKind::Enemy);
component!(TdComponents, Tower, tower, ComponentKind::Tower);
component!(TdComponents, Projectile, projectile, ComponentKind::Projectile);
