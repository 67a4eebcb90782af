use crate::components::{Enemy, Health, Projectile, ProjectileBehavior, TdComponents, Transform};
use crate::events::TdEvent;
use crate::resources::TdResources;
use crate::systems::{find_path, step_towards};
use glam::Vec2;
use sim_core::{EcsError, EntityId, FrameTime, Registry, System};

/// Walks enemies along their routes, then flies projectiles and applies
/// their damage. Both passes share one tick so a projectile never scores
/// against an enemy already removed this tick.
#[derive(Debug, Default)]
pub struct MovementSystem;

impl MovementSystem {
    pub fn new() -> Self {
        Self
    }
}

impl System<TdComponents, TdResources> for MovementSystem {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn update(
        &mut self,
        registry: &mut Registry<TdComponents>,
        resources: &mut TdResources,
        frame: &FrameTime,
    ) -> Result<(), EcsError> {
        advance_enemies(registry, resources, frame.delta_secs);
        advance_projectiles(registry, resources, frame.delta_secs);
        Ok(())
    }
}

fn advance_enemies(registry: &mut Registry<TdComponents>, resources: &mut TdResources, dt: f32) {
    let viewport = resources.viewport;
    let zone = resources.slow_zone.filter(|z| z.active);
    let waypoint_radius = resources.config.waypoint_radius;

    for id in registry.query_with::<(Transform, Enemy)>() {
        let route = match registry.get_component::<Enemy>(id) {
            Some(enemy) => enemy.path.clone(),
            None => continue,
        };
        let waypoints = match find_path(registry, &route) {
            Some(path) => path.to_absolute(&viewport),
            None => {
                tracing::warn!(%id, route = %route, "enemy has no path, removing");
                registry.destroy_entity(id);
                resources.emit(TdEvent::EnemyOrphaned { id, path: route });
                continue;
            }
        };

        let components = registry.components_mut();
        let (transform, enemy) = match (
            components.transform.get_mut(id),
            components.enemy.get_mut(id),
        ) {
            (Some(t), Some(e)) => (t, e),
            _ => continue,
        };

        match zone {
            Some(zone) => {
                let inside = zone.contains(transform.position, &viewport);
                if inside != enemy.in_slow_zone {
                    enemy.in_slow_zone = inside;
                    enemy.speed = if inside {
                        enemy.original_speed * zone.multiplier
                    } else {
                        enemy.original_speed
                    };
                }
            }
            None => {
                enemy.in_slow_zone = false;
                enemy.speed = enemy.original_speed;
            }
        }

        let target = match waypoints.get(enemy.next_waypoint) {
            Some(&target) => target,
            None => {
                tracing::debug!(%id, "enemy reached the end of its path");
                registry.destroy_entity(id);
                resources.emit(TdEvent::EnemyReachedEnd { id });
                continue;
            }
        };

        if transform.position.distance(target) <= waypoint_radius {
            enemy.next_waypoint += 1;
        } else {
            transform.position = step_towards(transform.position, target, enemy.speed * dt);
        }
    }
}

fn advance_projectiles(
    registry: &mut Registry<TdComponents>,
    resources: &mut TdResources,
    dt: f32,
) {
    for id in registry.query_with::<(Transform, Projectile)>() {
        let (position, projectile) = match (
            registry.get_component::<Transform>(id),
            registry.get_component::<Projectile>(id),
        ) {
            (Some(t), Some(p)) => (t.position, *p),
            _ => continue,
        };
        let max_step = projectile.speed * dt;

        match projectile.behavior {
            ProjectileBehavior::Area {
                destination,
                radius,
            } => {
                let next = step_towards(position, destination, max_step);
                set_position(registry, id, next);
                if next.distance(destination) <= resources.config.area_arrival_radius {
                    splash(registry, resources, destination, radius, projectile.damage);
                    registry.destroy_entity(id);
                }
            }
            ProjectileBehavior::Tracking { target } => {
                let target_position = match registry.get_component::<Transform>(target) {
                    Some(t) if registry.has_component::<Enemy>(target) => t.position,
                    _ => {
                        tracing::trace!(%id, %target, "projectile lost its target");
                        registry.destroy_entity(id);
                        continue;
                    }
                };
                let next = step_towards(position, target_position, max_step);
                set_position(registry, id, next);
                if next.distance(target_position) <= resources.config.tracking_hit_radius {
                    damage_enemy(registry, resources, target, projectile.damage);
                    registry.destroy_entity(id);
                }
            }
        }
    }
}

fn set_position(registry: &mut Registry<TdComponents>, id: EntityId, position: Vec2) {
    if let Some(transform) = registry.get_component_mut::<Transform>(id) {
        transform.position = position;
    }
}

fn splash(
    registry: &mut Registry<TdComponents>,
    resources: &mut TdResources,
    center: Vec2,
    radius: f32,
    damage: u32,
) {
    for enemy in registry.query_with::<(Transform, Enemy)>() {
        let hit = registry
            .get_component::<Transform>(enemy)
            .map_or(false, |t| t.position.distance(center) <= radius);
        if hit {
            damage_enemy(registry, resources, enemy, damage);
        }
    }
}

/// Apply damage. A kill reports the reward once and removes the enemy.
fn damage_enemy(
    registry: &mut Registry<TdComponents>,
    resources: &mut TdResources,
    id: EntityId,
    damage: u32,
) {
    let dead = match registry.get_component_mut::<Health>(id) {
        Some(health) => {
            health.apply_damage(damage);
            health.is_dead()
        }
        None => return,
    };
    if !dead {
        return;
    }

    if let Some(enemy) = registry.get_component_mut::<Enemy>(id) {
        if !enemy.reward_granted {
            enemy.reward_granted = true;
            let (kind, reward) = (enemy.kind, enemy.reward);
            tracing::debug!(%id, kind = kind.name(), reward, "enemy defeated");
            resources.emit(TdEvent::EnemyDefeated { id, kind, reward });
        }
    }
    registry.destroy_entity(id);
}
