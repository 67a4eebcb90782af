//! Fixed level tables: routes, pre-built towers and wave caps.

use crate::components::{Path, PathStyle, PathTag, TdComponents, Tower, Transform};
use crate::config::TowerKind;
use crate::errors::LevelError;
use crate::resources::Viewport;
use glam::Vec2;
use sim_core::{EcsError, EntityId, Registry};

struct RouteDef {
    tag: &'static str,
    /// Normalized waypoints.
    points: &'static [(f32, f32)],
    color: [u8; 4],
}

struct LevelDef {
    id: u32,
    routes: &'static [RouteDef],
    /// Towers present at load, at normalized positions. They cost nothing.
    towers: &'static [(TowerKind, f32, f32)],
    max_waves: Option<u32>,
    tutorial: bool,
}

const DIRT: [u8; 4] = [0x8b, 0x5a, 0x2b, 0xff];
const STONE: [u8; 4] = [0x80, 0x80, 0x80, 0xff];

const LEVELS: &[LevelDef] = &[
    LevelDef {
        id: 1,
        routes: &[RouteDef {
            tag: "main",
            points: &[(0.3, 0.3), (0.7, 0.3), (0.7, 0.5), (0.9, 0.5)],
            color: DIRT,
        }],
        towers: &[],
        max_waves: Some(3),
        tutorial: true,
    },
    LevelDef {
        id: 2,
        routes: &[
            RouteDef {
                tag: "north",
                points: &[(0.0, 0.2), (0.5, 0.2), (0.5, 0.6), (1.0, 0.6)],
                color: DIRT,
            },
            RouteDef {
                tag: "south",
                points: &[(0.0, 0.8), (0.3, 0.8), (0.3, 0.6), (1.0, 0.6)],
                color: STONE,
            },
        ],
        towers: &[(TowerKind::Archer, 0.4, 0.4)],
        max_waves: Some(5),
        tutorial: false,
    },
    LevelDef {
        id: 3,
        routes: &[
            RouteDef {
                tag: "west",
                points: &[(0.0, 0.1), (0.2, 0.1), (0.2, 0.9), (0.5, 0.9), (0.5, 0.5)],
                color: DIRT,
            },
            RouteDef {
                tag: "east",
                points: &[(1.0, 0.1), (0.8, 0.1), (0.8, 0.9), (0.5, 0.9), (0.5, 0.5)],
                color: STONE,
            },
        ],
        towers: &[(TowerKind::Archer, 0.35, 0.5), (TowerKind::Mage, 0.65, 0.5)],
        max_waves: Some(8),
        tutorial: false,
    },
];

/// A pre-built tower and its normalized position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelTower {
    pub id: EntityId,
    pub anchor: Vec2,
}

/// What a loaded level put into the world.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelLayout {
    pub id: u32,
    pub routes: Vec<PathTag>,
    pub towers: Vec<LevelTower>,
    pub max_waves: Option<u32>,
    pub tutorial: bool,
}

impl LevelLayout {
    /// Move the level's towers to match a resized viewport.
    /// Towers destroyed since loading are skipped.
    pub fn reposition_towers(&self, registry: &mut Registry<TdComponents>, viewport: &Viewport) {
        for tower in &self.towers {
            if let Some(transform) = registry.get_component_mut::<Transform>(tower.id) {
                transform.position = viewport.to_absolute(tower.anchor);
            }
        }
    }
}

/// Ids of every level with a layout.
pub fn level_ids() -> impl Iterator<Item = u32> {
    LEVELS.iter().map(|level| level.id)
}

/// Create the Path entities and starting towers of a level.
pub fn load_level(
    registry: &mut Registry<TdComponents>,
    viewport: &Viewport,
    id: u32,
) -> Result<LevelLayout, LevelError> {
    let def = LEVELS
        .iter()
        .find(|level| level.id == id)
        .ok_or(LevelError::UnknownLevel(id))?;

    let mut routes = Vec::with_capacity(def.routes.len());
    for route in def.routes {
        let tag = PathTag::new(route.tag);
        let waypoints = route.points.iter().map(|&(x, y)| Vec2::new(x, y)).collect();
        let path = Path::new(tag.clone(), waypoints)?.with_style(PathStyle {
            color: route.color,
            ..PathStyle::default()
        });
        let entity = registry.create_entity();
        registry.add_component(entity, path)?;
        routes.push(tag);
    }

    let mut towers = Vec::with_capacity(def.towers.len());
    for &(kind, x, y) in def.towers {
        let tower = Tower::new(kind)?;
        let anchor = Vec2::new(x, y);
        let id = insert_tower(registry, tower, viewport.to_absolute(anchor))?;
        towers.push(LevelTower { id, anchor });
    }

    tracing::info!(
        level = id,
        routes = routes.len(),
        towers = towers.len(),
        "level loaded"
    );
    Ok(LevelLayout {
        id,
        routes,
        towers,
        max_waves: def.max_waves,
        tutorial: def.tutorial,
    })
}

/// Create a tower entity at an absolute position.
pub(crate) fn insert_tower(
    registry: &mut Registry<TdComponents>,
    tower: Tower,
    position: Vec2,
) -> Result<EntityId, EcsError> {
    let id = registry.create_entity();
    registry.add_component(id, Transform { position })?;
    registry.add_component(id, tower)?;
    Ok(id)
}
