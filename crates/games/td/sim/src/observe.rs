use crate::components::{Path, ProjectileBehavior, TdComponents};
use crate::config::TowerRange;
use crate::game::TdGame;
use crate::resources::Viewport;
use glam::Vec2;
use sim_core::{EntityId, TerminalOutcome};
use td_types::{
    EnemyInfo, EntityInfo, HealthInfo, PathInfo, Point, ProjectileInfo, TowerInfo, ViewportInfo,
    WorldSnapshot,
};

fn point(v: Vec2) -> Point {
    Point { x: v.x, y: v.y }
}

pub fn build_snapshot(game: &TdGame) -> WorldSnapshot {
    let viewport = game.resources().viewport;
    let balance = game.ledger().balance();
    let components = game.registry().components();

    let entities = game
        .all_entities()
        .into_iter()
        .map(|id| entity_info(components, &viewport, id))
        .collect();

    WorldSnapshot {
        tick: game.tick(),
        time_ms: game.now().as_f64(),
        level: game.layout().id,

        manpower: balance.manpower,
        supply: balance.supply,
        lives: game.lives(),
        wave: game.wave(),

        viewport: ViewportInfo {
            width: viewport.width,
            height: viewport.height,
        },

        tutorial_step: game.tutorial_step().map(|step| format!("{:?}", step)),
        outcome: sim_core::Game::is_terminal(game).map(|outcome| match outcome {
            TerminalOutcome::Win => "Win".to_string(),
            TerminalOutcome::Lose => "Lose".to_string(),
        }),

        entities,
    }
}

fn entity_info(components: &TdComponents, viewport: &Viewport, id: EntityId) -> EntityInfo {
    EntityInfo {
        id: id.raw(),
        position: components.transform.get(id).map(|t| point(t.position)),
        health: components.health.get(id).map(|h| HealthInfo {
            current: h.current,
            max: h.max,
        }),
        enemy: components.enemy.get(id).map(|e| EnemyInfo {
            enemy_type: e.kind.name().to_string(),
            speed: e.speed,
            path: e.path.to_string(),
            next_waypoint: e.next_waypoint,
            in_slow_zone: e.in_slow_zone,
        }),
        tower: components.tower.get(id).map(|t| {
            let inner_range = match t.range {
                TowerRange::Disc { .. } => 0.0,
                TowerRange::Ring { inner, .. } => inner,
            };
            TowerInfo {
                tower_type: t.kind.name().to_string(),
                damage: t.damage,
                inner_range,
                range: t.range.outer(),
                attack_interval_ms: t.attack_interval().as_f64(),
                last_attack_ms: t.last_attack().map(|m| m.as_f64()),
            }
        }),
        projectile: components.projectile.get(id).map(|p| match p.behavior {
            ProjectileBehavior::Tracking { target } => ProjectileInfo::Tracking {
                damage: p.damage,
                speed: p.speed,
                target: target.raw(),
            },
            ProjectileBehavior::Area {
                destination,
                radius,
            } => ProjectileInfo::Area {
                damage: p.damage,
                speed: p.speed,
                destination: point(destination),
                radius,
            },
        }),
        path: components.path.get(id).map(|p| path_info(p, viewport)),
    }
}

fn path_info(path: &Path, viewport: &Viewport) -> PathInfo {
    PathInfo {
        tag: path.tag().to_string(),
        waypoints: path.to_absolute(viewport).into_iter().map(point).collect(),
        color: path.style.color,
        width: path.style.width,
        visible: path.visible,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TdConfig, TowerKind};
    use crate::store::MemoryStore;

    #[test]
    fn test_snapshot_reflects_world() {
        let mut game = TdGame::new(TdConfig::default(), 1, 3, Box::new(MemoryStore::new())).unwrap();
        game.set_screen_size(1000.0, 500.0);
        let tower = game.place_tower(320.0, 200.0, TowerKind::Mage).unwrap();

        let snapshot = build_snapshot(&game);
        assert_eq!(snapshot.level, 1);
        assert_eq!((snapshot.manpower, snapshot.supply), (65, 20));
        assert_eq!(snapshot.lives, 10);
        assert_eq!(snapshot.tutorial_step.as_deref(), Some("DefeatEnemy"));
        assert_eq!(snapshot.outcome, None);

        let path = snapshot
            .entities
            .iter()
            .find_map(|e| e.path.as_ref())
            .unwrap();
        assert_eq!(path.tag, "main");
        assert_eq!(path.waypoints[0], Point { x: 300.0, y: 150.0 });

        let tower = snapshot
            .entities
            .iter()
            .find(|e| e.id == tower.raw())
            .and_then(|e| e.tower.as_ref())
            .unwrap();
        assert_eq!(tower.tower_type, "Mage");
        assert_eq!(tower.inner_range, 60.0);
        assert_eq!(tower.last_attack_ms, None);
    }
}
