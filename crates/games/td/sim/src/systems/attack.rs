use crate::components::{Enemy, Projectile, TdComponents, Tower, Transform};
use crate::events::TdEvent;
use crate::resources::TdResources;
use sim_core::{EcsError, EntityId, FrameTime, Registry, System};

/// Fires at the first enemy in range of each ready tower.
///
/// Targeting takes the first match in creation order; there is no distance
/// sorting. A tower with nothing in range stays idle and keeps its cooldown
/// elapsed.
#[derive(Debug, Default)]
pub struct AttackSystem;

impl AttackSystem {
    pub fn new() -> Self {
        Self
    }
}

impl System<TdComponents, TdResources> for AttackSystem {
    fn name(&self) -> &'static str {
        "attack"
    }

    fn update(
        &mut self,
        registry: &mut Registry<TdComponents>,
        resources: &mut TdResources,
        frame: &FrameTime,
    ) -> Result<(), EcsError> {
        let towers = registry.query_with::<(Transform, Tower)>();
        let enemies = registry.query_with::<(Transform, Enemy)>();

        for tower_id in towers {
            let (origin, tower) = match (
                registry.get_component::<Transform>(tower_id),
                registry.get_component::<Tower>(tower_id),
            ) {
                (Some(t), Some(tower)) => (t.position, tower.clone()),
                _ => continue,
            };
            if !tower.can_attack(frame.now) {
                continue;
            }

            let target = enemies.iter().copied().find_map(|enemy| {
                registry
                    .get_component::<Transform>(enemy)
                    .filter(|t| tower.range.contains(origin.distance(t.position)))
                    .map(|t| (enemy, t.position))
            });
            let (target, target_position) = match target {
                Some(found) => found,
                None => continue,
            };

            let speed = resources.config.projectile_base_speed * tower.projectile_speed;
            let projectile = match tower.splash_radius {
                Some(radius) => Projectile::area(target_position, radius, tower.damage, speed),
                None => Projectile::tracking(target, tower.damage, speed),
            };
            let shot = fire(registry, origin, projectile)?;

            if let Some(tower) = registry.get_component_mut::<Tower>(tower_id) {
                tower.record_attack(frame.now);
            }
            tracing::trace!(tower = %tower_id, %target, projectile = %shot, "tower fired");
            resources.emit(TdEvent::ProjectileFired {
                tower: tower_id,
                projectile: shot,
            });
        }

        Ok(())
    }
}

fn fire(
    registry: &mut Registry<TdComponents>,
    origin: glam::Vec2,
    projectile: Projectile,
) -> Result<EntityId, EcsError> {
    let id = registry.create_entity();
    registry.add_component(id, Transform { position: origin })?;
    registry.add_component(id, projectile)?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Health, PathTag, ProjectileBehavior};
    use crate::config::{EnemyKind, TdConfig, TowerKind};
    use glam::Vec2;
    use sim_core::World;

    type TdWorld = World<TdComponents, TdResources>;

    fn world() -> TdWorld {
        let mut world = World::new(TdResources::new(TdConfig::default(), 0));
        world.add_system(Box::new(AttackSystem::new()));
        world
    }

    fn tower(world: &mut TdWorld, kind: TowerKind, x: f32, y: f32) -> EntityId {
        let registry = world.registry_mut();
        let id = registry.create_entity();
        registry.add_component(id, Transform::new(x, y)).unwrap();
        registry.add_component(id, Tower::new(kind).unwrap()).unwrap();
        id
    }

    fn enemy(world: &mut TdWorld, x: f32, y: f32) -> EntityId {
        let registry = world.registry_mut();
        let id = registry.create_entity();
        registry.add_component(id, Transform::new(x, y)).unwrap();
        registry.add_component(id, Health::new(30)).unwrap();
        registry
            .add_component(id, Enemy::new(EnemyKind::Goblin, PathTag::new("main")))
            .unwrap();
        id
    }

    fn projectiles(world: &TdWorld) -> Vec<Projectile> {
        let registry = world.registry();
        registry
            .query_with::<(Projectile,)>()
            .into_iter()
            .filter_map(|id| registry.get_component::<Projectile>(id).copied())
            .collect()
    }

    #[test]
    fn test_first_enemy_in_range_wins() {
        let mut world = world();
        tower(&mut world, TowerKind::Archer, 0.0, 0.0);
        let _far = enemy(&mut world, 400.0, 0.0);
        let first = enemy(&mut world, 140.0, 0.0);
        let _closer = enemy(&mut world, 20.0, 0.0);

        world.update(0.016);
        let shots = projectiles(&world);
        assert_eq!(shots.len(), 1);
        assert_eq!(
            shots[0].behavior,
            ProjectileBehavior::Tracking { target: first }
        );
        assert_eq!(shots[0].damage, 10);
        assert_eq!(shots[0].speed, 450.0);
    }

    #[test]
    fn test_idle_tower_does_not_start_cooldown() {
        let mut world = world();
        let archer = tower(&mut world, TowerKind::Archer, 0.0, 0.0);

        world.update(0.5);
        let state = world.registry().get_component::<Tower>(archer).unwrap();
        assert_eq!(state.last_attack(), None);

        enemy(&mut world, 50.0, 0.0);
        world.update(0.016);
        assert_eq!(projectiles(&world).len(), 1);
    }

    #[test]
    fn test_cooldown_gates_the_next_shot() {
        let mut world = world();
        tower(&mut world, TowerKind::Archer, 0.0, 0.0);
        enemy(&mut world, 50.0, 0.0);

        world.update(0.25);
        assert_eq!(projectiles(&world).len(), 1);
        world.update(0.5);
        world.update(0.25);
        assert_eq!(projectiles(&world).len(), 1);
        world.update(0.25);
        assert_eq!(projectiles(&world).len(), 2);
    }

    #[test]
    fn test_mage_cannot_hit_point_blank() {
        let mut world = world();
        tower(&mut world, TowerKind::Mage, 0.0, 0.0);
        enemy(&mut world, 30.0, 0.0);

        world.update(0.016);
        assert!(projectiles(&world).is_empty());

        let ring = enemy(&mut world, 100.0, 0.0);
        world.update(0.016);
        assert_eq!(
            projectiles(&world)[0].behavior,
            ProjectileBehavior::Tracking { target: ring }
        );
    }

    #[test]
    fn test_cannon_lobs_area_shells() {
        let mut world = world();
        tower(&mut world, TowerKind::Cannon, 0.0, 0.0);
        enemy(&mut world, 0.0, 100.0);

        world.update(0.016);
        assert_eq!(
            projectiles(&world)[0].behavior,
            ProjectileBehavior::Area {
                destination: Vec2::new(0.0, 100.0),
                radius: 50.0,
            }
        );
    }
}
