use glam::Vec2;
use sim_core::Millis;

/// Enemy archetypes, light to heavy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Goblin,
    Orc,
    Troll,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Goblin, EnemyKind::Orc, EnemyKind::Troll];

    pub fn stats(self) -> EnemyStats {
        match self {
            EnemyKind::Goblin => EnemyStats {
                health: 30,
                speed: 60.0,
                reward: 5,
            },
            EnemyKind::Orc => EnemyStats {
                health: 60,
                speed: 40.0,
                reward: 10,
            },
            EnemyKind::Troll => EnemyStats {
                health: 120,
                speed: 25.0,
                reward: 20,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EnemyKind::Goblin => "Goblin",
            EnemyKind::Orc => "Orc",
            EnemyKind::Troll => "Troll",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStats {
    pub health: u32,
    /// Pixels per second.
    pub speed: f32,
    /// Supply granted when defeated.
    pub reward: u32,
}

/// Tower archetypes. Archer fires ranged single shots, Cannon lobs splash
/// shells and Mage hits a ring around itself but not point blank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TowerKind {
    Archer,
    Cannon,
    Mage,
}

/// How a tower's range is shaped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TowerRange {
    /// Targets with `distance <= outer`.
    Disc { outer: f32 },
    /// Targets with `inner < distance <= outer`.
    Ring { inner: f32, outer: f32 },
}

impl TowerRange {
    pub fn contains(&self, distance: f32) -> bool {
        match *self {
            TowerRange::Disc { outer } => distance <= outer,
            TowerRange::Ring { inner, outer } => distance > inner && distance <= outer,
        }
    }

    pub fn outer(&self) -> f32 {
        match *self {
            TowerRange::Disc { outer } | TowerRange::Ring { outer, .. } => outer,
        }
    }
}

/// Price of an action in both resources.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cost {
    pub manpower: u32,
    pub supply: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerStats {
    pub damage: u32,
    pub range: TowerRange,
    /// Attacks per second.
    pub attack_speed: f32,
    /// Multiplier on [`TdConfig::projectile_base_speed`].
    pub projectile_speed: f32,
    /// Set for towers that fire area shells.
    pub splash_radius: Option<f32>,
    pub cost: Cost,
}

impl TowerKind {
    pub const ALL: [TowerKind; 3] = [TowerKind::Archer, TowerKind::Cannon, TowerKind::Mage];

    pub fn stats(self) -> TowerStats {
        match self {
            TowerKind::Archer => TowerStats {
                damage: 10,
                range: TowerRange::Disc { outer: 150.0 },
                attack_speed: 1.0,
                projectile_speed: 1.5,
                splash_radius: None,
                cost: Cost {
                    manpower: 30,
                    supply: 10,
                },
            },
            TowerKind::Cannon => TowerStats {
                damage: 25,
                range: TowerRange::Disc { outer: 120.0 },
                attack_speed: 0.5,
                projectile_speed: 1.0,
                splash_radius: Some(50.0),
                cost: Cost {
                    manpower: 40,
                    supply: 25,
                },
            },
            TowerKind::Mage => TowerStats {
                damage: 15,
                range: TowerRange::Ring {
                    inner: 60.0,
                    outer: 200.0,
                },
                attack_speed: 0.8,
                projectile_speed: 1.2,
                splash_radius: None,
                cost: Cost {
                    manpower: 35,
                    supply: 30,
                },
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TowerKind::Archer => "Archer",
            TowerKind::Cannon => "Cannon",
            TowerKind::Mage => "Mage",
        }
    }
}

#[derive(Clone, Debug)]
pub struct TdConfig {
    // Economy
    pub starting_manpower: u32,
    pub starting_supply: u32,
    /// Name of the persisted store holding the ledger balance.
    pub store_name: String,

    // Waves
    pub spawn_interval: Millis,
    /// Enemies in wave `n` = `wave_base_size + n`.
    pub wave_base_size: u32,
    /// Where enemies appear when their route is missing.
    pub default_spawn: Vec2,

    // Motion
    pub waypoint_radius: f32,
    pub area_arrival_radius: f32,
    pub tracking_hit_radius: f32,
    /// Pixels per second before the tower multiplier.
    pub projectile_base_speed: f32,
    pub slow_zone_multiplier: f32,

    pub lives: u32,
}

impl Default for TdConfig {
    fn default() -> Self {
        Self {
            starting_manpower: 100,
            starting_supply: 50,
            store_name: "game_data".to_string(),

            spawn_interval: Millis::new(2_000.0),
            wave_base_size: 3,
            default_spawn: Vec2::new(100.0, 100.0),

            waypoint_radius: 5.0,
            area_arrival_radius: 5.0,
            tracking_hit_radius: 10.0,
            projectile_base_speed: 300.0,
            slow_zone_multiplier: 0.5,

            lives: 10,
        }
    }
}
