use crate::components::{ComponentKind, PathTag, TdComponents, Tower};
use crate::config::{Cost, EnemyKind, TdConfig, TowerKind};
use crate::errors::{LevelError, PlaceTowerError};
use crate::events::TdEvent;
use crate::ledger::{Balance, Ledger};
use crate::levels::{insert_tower, load_level, LevelLayout};
use crate::resources::{SlowZone, TdResources, Viewport};
use crate::store::LedgerStore;
use crate::systems::{self, AttackSystem, MovementSystem, SpawnSystem};
use crate::tutorial::{Tutorial, TutorialStep};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sim_core::{EcsError, EntityId, Game, Millis, Registry, TerminalOutcome, World};

/// One level of the game: the ECS world plus the ledger, lives and tutorial
/// around it.
///
/// Systems only report what happened; `step` settles their events against
/// the ledger and lives.
pub struct TdGame {
    world: World<TdComponents, TdResources>,
    ledger: Ledger,
    layout: LevelLayout,
    seed: u64,
    tutorial: Tutorial,
    lives: u32,
    wave: u32,
    all_waves_spawned: bool,
    outcome: Option<TerminalOutcome>,
    /// Events raised between steps, flushed on the next step.
    pending: Vec<TdEvent>,
}

impl TdGame {
    pub fn new(
        config: TdConfig,
        level: u32,
        seed: u64,
        store: Box<dyn LedgerStore>,
    ) -> Result<Self, LevelError> {
        let starting = Balance::new(config.starting_manpower, config.starting_supply);
        let lives = config.lives;

        let mut world = World::new(TdResources::new(config, seed));
        world.add_system(Box::new(SpawnSystem::new()));
        world.add_system(Box::new(MovementSystem::new()));
        world.add_system(Box::new(AttackSystem::new()));

        let mut game = Self {
            world,
            ledger: Ledger::open(starting, store),
            layout: LevelLayout {
                id: level,
                routes: Vec::new(),
                towers: Vec::new(),
                max_waves: None,
                tutorial: false,
            },
            seed,
            tutorial: Tutorial::disabled(),
            lives,
            wave: 0,
            all_waves_spawned: false,
            outcome: None,
            pending: Vec::new(),
        };
        game.load(level)?;
        Ok(game)
    }

    fn load(&mut self, level: u32) -> Result<(), LevelError> {
        let (registry, resources) = self.world.split_mut();
        let layout = load_level(registry, &resources.viewport, level)?;
        resources.routes = layout.routes.clone();
        resources.max_waves = layout.max_waves;

        self.tutorial = if layout.tutorial {
            Tutorial::start(&mut self.pending)
        } else {
            Tutorial::disabled()
        };
        self.layout = layout;
        Ok(())
    }

    /// Resize the viewport. Level towers keep their normalized spot; towers
    /// placed by the player keep their absolute position.
    pub fn set_screen_size(&mut self, width: f32, height: f32) {
        tracing::debug!(width, height, "viewport resized");
        let (registry, resources) = self.world.split_mut();
        resources.viewport = Viewport::new(width, height);
        self.layout.reposition_towers(registry, &resources.viewport);
    }

    /// Build a tower at an absolute position, paying its cost.
    ///
    /// Either the ledger is charged and the tower exists, or neither happens.
    pub fn place_tower(
        &mut self,
        x: f32,
        y: f32,
        kind: TowerKind,
    ) -> Result<EntityId, PlaceTowerError> {
        if self.outcome.is_some() {
            return Err(PlaceTowerError::GameFinished);
        }

        let stats = kind.stats();
        let tower = Tower::with_stats(kind, stats)?;
        let available: Cost = self.ledger.balance().into();
        if !self.ledger.consume(stats.cost.manpower, stats.cost.supply) {
            tracing::debug!(kind = kind.name(), ?available, "cannot afford tower");
            return Err(PlaceTowerError::InsufficientResources {
                needed: stats.cost,
                available,
            });
        }

        let position = Vec2::new(x, y);
        let id = match insert_tower(self.world.registry_mut(), tower, position) {
            Ok(id) => id,
            Err(e) => {
                self.ledger.add_manpower(stats.cost.manpower);
                self.ledger.add_supply(stats.cost.supply);
                return Err(e.into());
            }
        };
        tracing::info!(%id, kind = kind.name(), x, y, "tower placed");

        self.push_resources_changed();
        let placed = TdEvent::TowerPlaced { id, kind, position };
        self.pending.push(placed.clone());
        self.tutorial.observe(&placed, &mut self.pending);
        Ok(id)
    }

    /// Slow every enemy inside a normalized rectangle.
    pub fn set_slow_zone(&mut self, min: Vec2, max: Vec2) {
        let multiplier = self.world.resources().config.slow_zone_multiplier;
        self.world.resources_mut().slow_zone = Some(SlowZone::new(min, max, multiplier));
    }

    pub fn set_slow_zone_active(&mut self, active: bool) {
        if let Some(zone) = self.world.resources_mut().slow_zone.as_mut() {
            zone.active = active;
        }
    }

    pub fn clear_slow_zone(&mut self) {
        self.world.resources_mut().slow_zone = None;
    }

    /// Put an enemy on a route outside the wave schedule.
    pub fn spawn_enemy(&mut self, kind: EnemyKind, route: &str) -> Result<EntityId, EcsError> {
        let (registry, resources) = self.world.split_mut();
        systems::spawn_enemy(registry, resources, kind, PathTag::new(route))
    }

    pub fn all_entities(&self) -> Vec<EntityId> {
        self.world.registry().query_all()
    }

    pub fn entities_with(&self, kind: ComponentKind) -> Vec<EntityId> {
        self.world.registry().query_kind(kind)
    }

    pub fn registry(&self) -> &Registry<TdComponents> {
        self.world.registry()
    }

    pub fn resources(&self) -> &TdResources {
        self.world.resources()
    }

    pub fn config(&self) -> &TdConfig {
        &self.world.resources().config
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    pub fn layout(&self) -> &LevelLayout {
        &self.layout
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn tutorial_step(&self) -> Option<TutorialStep> {
        self.tutorial.step()
    }

    pub fn tick(&self) -> u64 {
        self.world.clock().tick()
    }

    pub fn now(&self) -> Millis {
        self.world.clock().now()
    }

    fn push_resources_changed(&mut self) {
        let balance = self.ledger.balance();
        self.pending.push(TdEvent::ResourcesChanged {
            manpower: balance.manpower,
            supply: balance.supply,
        });
    }

    /// Apply one system event to the ledger and lives and pass it on.
    fn settle(&mut self, event: TdEvent, out_events: &mut Vec<TdEvent>) {
        match event {
            TdEvent::EnemyDefeated { reward, .. } => {
                self.ledger.add_supply(reward);
                out_events.push(event.clone());
                let balance = self.ledger.balance();
                out_events.push(TdEvent::ResourcesChanged {
                    manpower: balance.manpower,
                    supply: balance.supply,
                });
            }
            TdEvent::EnemyReachedEnd { .. } => {
                out_events.push(event.clone());
                self.lives = self.lives.saturating_sub(1);
                out_events.push(TdEvent::LivesChanged { lives: self.lives });
                if self.lives == 0 && self.outcome.is_none() {
                    tracing::info!(wave = self.wave, "game over");
                    self.outcome = Some(TerminalOutcome::Lose);
                    out_events.push(TdEvent::GameOver);
                }
            }
            TdEvent::WaveStarted { wave, .. } => {
                self.wave = wave;
                out_events.push(event.clone());
            }
            TdEvent::AllWavesSpawned { .. } => {
                self.all_waves_spawned = true;
                out_events.push(event.clone());
            }
            _ => out_events.push(event.clone()),
        }
        self.tutorial.observe(&event, out_events);
    }

    fn check_victory(&mut self, out_events: &mut Vec<TdEvent>) {
        if self.outcome.is_some() || !self.all_waves_spawned {
            return;
        }
        if self.world.registry().query_kind(ComponentKind::Enemy).is_empty() {
            tracing::info!(waves = self.wave, lives = self.lives, "game won");
            self.outcome = Some(TerminalOutcome::Win);
            out_events.push(TdEvent::GameWon);
        }
    }
}

impl Game for TdGame {
    type Event = TdEvent;

    fn step(&mut self, delta_secs: f32, out_events: &mut Vec<TdEvent>) {
        out_events.append(&mut self.pending);
        if self.outcome.is_some() {
            return;
        }

        self.world.update(delta_secs);

        let events = std::mem::take(&mut self.world.resources_mut().events);
        for event in events {
            self.settle(event, out_events);
        }
        self.check_victory(out_events);
    }

    /// Clear the world and replay the level from the start.
    fn restart(&mut self) {
        tracing::info!(level = self.layout.id, "restarting level");
        self.world.clear_entities();
        self.world.reset_systems();
        self.world.reset_clock();

        let lives = {
            let resources = self.world.resources_mut();
            resources.events.clear();
            resources.rng = StdRng::seed_from_u64(self.seed);
            resources.config.lives
        };
        self.lives = lives;
        self.wave = 0;
        self.all_waves_spawned = false;
        self.outcome = None;
        self.pending.clear();

        self.ledger.reset();
        self.push_resources_changed();

        if let Err(e) = self.load(self.layout.id) {
            tracing::error!("failed to reload level: {}", e);
        }
    }

    fn is_terminal(&self) -> Option<TerminalOutcome> {
        self.outcome
    }
}
