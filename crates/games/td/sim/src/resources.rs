use crate::components::PathTag;
use crate::config::TdConfig;
use crate::events::TdEvent;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Screen size used to turn normalized path coordinates into pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn to_absolute(&self, normalized: Vec2) -> Vec2 {
        normalized * Vec2::new(self.width, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1000.0, 1000.0)
    }
}

/// Region of the map that slows enemies, e.g. fog or mud.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlowZone {
    /// Normalized corners of the affected rectangle.
    pub min: Vec2,
    pub max: Vec2,
    /// Speed factor applied inside the zone.
    pub multiplier: f32,
    /// Inactive zones leave every enemy at its original speed.
    pub active: bool,
}

impl SlowZone {
    pub fn new(min: Vec2, max: Vec2, multiplier: f32) -> Self {
        Self {
            min,
            max,
            multiplier,
            active: true,
        }
    }

    pub fn contains(&self, position: Vec2, viewport: &Viewport) -> bool {
        let min = viewport.to_absolute(self.min);
        let max = viewport.to_absolute(self.max);
        position.x >= min.x && position.x <= max.x && position.y >= min.y && position.y <= max.y
    }
}

/// State shared by all systems besides the registry.
pub struct TdResources {
    pub config: TdConfig,
    pub viewport: Viewport,
    pub slow_zone: Option<SlowZone>,
    /// Routes new enemies may be assigned to.
    pub routes: Vec<PathTag>,
    /// Stop opening waves after this many. `None` plays forever.
    pub max_waves: Option<u32>,
    pub rng: StdRng,
    /// Outbox drained by the game after every update.
    pub events: Vec<TdEvent>,
}

impl TdResources {
    pub fn new(config: TdConfig, seed: u64) -> Self {
        Self {
            config,
            viewport: Viewport::default(),
            slow_zone: None,
            routes: Vec::new(),
            max_waves: None,
            rng: StdRng::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: TdEvent) {
        self.events.push(event);
    }
}
