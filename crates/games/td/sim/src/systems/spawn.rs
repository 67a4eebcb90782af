use crate::components::{Enemy, Health, PathTag, TdComponents, Transform};
use crate::config::EnemyKind;
use crate::events::TdEvent;
use crate::resources::TdResources;
use crate::systems::find_path;
use rand::seq::SliceRandom;
use sim_core::{EcsError, EntityId, FrameTime, Millis, Registry, System};

/// Route used when a level declares none.
const FALLBACK_ROUTE: &str = "main";

/// Opens waves of growing size and releases one enemy per spawn interval.
#[derive(Debug, Default)]
pub struct SpawnSystem {
    wave: u32,
    enemies_in_wave: u32,
    enemies_spawned: u32,
    last_spawn: Millis,
    all_spawned: bool,
}

impl SpawnSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn enemies_in_wave(&self) -> u32 {
        self.enemies_in_wave
    }

    pub fn enemies_spawned(&self) -> u32 {
        self.enemies_spawned
    }

    /// Returns false once the wave cap is reached.
    fn open_wave(&mut self, resources: &mut TdResources) -> bool {
        if let Some(max) = resources.max_waves {
            if self.wave >= max {
                if !self.all_spawned {
                    self.all_spawned = true;
                    tracing::info!(waves = self.wave, "all waves spawned");
                    resources.emit(TdEvent::AllWavesSpawned { waves: self.wave });
                }
                return false;
            }
        }

        self.wave += 1;
        self.enemies_in_wave = resources.config.wave_base_size + self.wave;
        self.enemies_spawned = 0;
        tracing::info!(wave = self.wave, size = self.enemies_in_wave, "wave started");
        resources.emit(TdEvent::WaveStarted {
            wave: self.wave,
            size: self.enemies_in_wave,
        });
        true
    }
}

impl System<TdComponents, TdResources> for SpawnSystem {
    fn name(&self) -> &'static str {
        "spawn"
    }

    fn update(
        &mut self,
        registry: &mut Registry<TdComponents>,
        resources: &mut TdResources,
        frame: &FrameTime,
    ) -> Result<(), EcsError> {
        if self.enemies_spawned >= self.enemies_in_wave && !self.open_wave(resources) {
            return Ok(());
        }

        let due = frame.now.since(self.last_spawn) >= resources.config.spawn_interval;
        if due && self.enemies_spawned < self.enemies_in_wave {
            let kind = EnemyKind::ALL
                .choose(&mut resources.rng)
                .copied()
                .unwrap_or(EnemyKind::Goblin);
            let route = resources
                .routes
                .choose(&mut resources.rng)
                .cloned()
                .unwrap_or_else(|| PathTag::new(FALLBACK_ROUTE));

            spawn_enemy(registry, resources, kind, route)?;
            self.last_spawn = frame.now;
            self.enemies_spawned += 1;
        }

        Ok(())
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Create an enemy at the start of its route.
///
/// A route with no Path entity places the enemy at the configured default
/// position instead; movement will later remove it as orphaned.
pub fn spawn_enemy(
    registry: &mut Registry<TdComponents>,
    resources: &mut TdResources,
    kind: EnemyKind,
    route: PathTag,
) -> Result<EntityId, EcsError> {
    let start = match find_path(registry, &route) {
        Some(path) => path.start(&resources.viewport),
        None => {
            tracing::warn!(route = %route, "no path for new enemy, using default spawn");
            resources.config.default_spawn
        }
    };

    let id = registry.create_entity();
    registry.add_component(id, Transform { position: start })?;
    registry.add_component(id, Health::new(kind.stats().health))?;
    registry.add_component(id, Enemy::new(kind, route.clone()))?;

    tracing::debug!(%id, kind = kind.name(), route = %route, "enemy spawned");
    resources.emit(TdEvent::EnemySpawned {
        id,
        kind,
        path: route,
    });
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Path;
    use crate::config::TdConfig;
    use glam::Vec2;
    use sim_core::World;

    fn world(max_waves: Option<u32>) -> World<TdComponents, TdResources> {
        let mut resources = TdResources::new(TdConfig::default(), 7);
        resources.routes = vec![PathTag::new("main")];
        resources.max_waves = max_waves;
        let mut world = World::new(resources);
        let path = Path::new(
            PathTag::new("main"),
            vec![Vec2::new(0.3, 0.3), Vec2::new(0.9, 0.5)],
        )
        .unwrap();
        let registry = world.registry_mut();
        let id = registry.create_entity();
        registry.add_component(id, path).unwrap();
        world.add_system(Box::new(SpawnSystem::new()));
        world
    }

    fn enemies(world: &World<TdComponents, TdResources>) -> usize {
        world.registry().query_with::<(Enemy,)>().len()
    }

    #[test]
    fn test_first_wave_opens_immediately_and_spawns_on_interval() {
        let mut world = world(None);

        world.update(0.5);
        assert_eq!(
            world.resources().events,
            vec![TdEvent::WaveStarted { wave: 1, size: 4 }]
        );
        assert_eq!(enemies(&world), 0);

        world.update(1.5);
        assert_eq!(enemies(&world), 1);

        // Next spawn needs another full interval.
        world.update(1.75);
        assert_eq!(enemies(&world), 1);
        world.update(0.25);
        assert_eq!(enemies(&world), 2);
    }

    #[test]
    fn test_enemies_start_on_their_route() {
        let mut world = world(None);
        world.update(2.0);

        let id = world.registry().query_with::<(Enemy,)>()[0];
        let transform = world.registry().get_component::<Transform>(id).unwrap();
        assert_eq!(transform.position, Vec2::new(300.0, 300.0));
        let enemy = world.registry().get_component::<Enemy>(id).unwrap();
        assert_eq!(enemy.next_waypoint, 0);
        assert!(!enemy.reward_granted);
    }

    #[test]
    fn test_waves_grow_by_one() {
        let mut world = world(None);
        // Wave 1 holds 4 enemies; the fifth spawn belongs to wave 2.
        for _ in 0..4 {
            world.update(2.0);
        }
        assert!(!world
            .resources()
            .events
            .contains(&TdEvent::WaveStarted { wave: 2, size: 5 }));

        world.update(2.0);
        assert!(world
            .resources()
            .events
            .contains(&TdEvent::WaveStarted { wave: 2, size: 5 }));
        assert_eq!(enemies(&world), 5);
    }

    #[test]
    fn test_wave_cap_stops_spawning_once() {
        let mut world = world(Some(1));
        for _ in 0..10 {
            world.update(2.0);
        }
        assert_eq!(enemies(&world), 4);
        let capped = world
            .resources()
            .events
            .iter()
            .filter(|e| matches!(e, TdEvent::AllWavesSpawned { waves: 1 }))
            .count();
        assert_eq!(capped, 1);
    }

    #[test]
    fn test_missing_route_uses_default_position() {
        let mut resources = TdResources::new(TdConfig::default(), 1);
        let mut registry = Registry::new();
        let id = spawn_enemy(
            &mut registry,
            &mut resources,
            EnemyKind::Troll,
            PathTag::new("nowhere"),
        )
        .unwrap();

        let transform = registry.get_component::<Transform>(id).unwrap();
        assert_eq!(transform.position, resources.config.default_spawn);
        assert_eq!(registry.get_component::<Health>(id), Some(&Health::new(120)));
    }

    #[test]
    fn test_reset_restarts_wave_count() {
        let mut spawn = SpawnSystem::new();
        spawn.wave = 3;
        spawn.enemies_spawned = 2;
        spawn.all_spawned = true;
        System::<TdComponents, TdResources>::reset(&mut spawn);
        assert_eq!(spawn.wave(), 0);
        assert_eq!(spawn.enemies_spawned(), 0);
        assert!(!spawn.all_spawned);
    }
}
