use crate::component::ComponentSet;
use crate::registry::Registry;
use crate::system::System;
use crate::time::{FrameTime, SimClock};

/// Owns the registry, shared resources and the ordered system pipeline.
pub struct World<S: ComponentSet, R> {
    registry: Registry<S>,
    resources: R,
    systems: Vec<Box<dyn System<S, R> + Send>>,
    clock: SimClock,
}

impl<S: ComponentSet, R> World<S, R> {
    pub fn new(resources: R) -> Self {
        Self {
            registry: Registry::new(),
            resources,
            systems: Vec::new(),
            clock: SimClock::new(),
        }
    }

    /// Append a system to the end of the pipeline.
    pub fn add_system(&mut self, system: Box<dyn System<S, R> + Send>) {
        tracing::debug!(system = system.name(), order = self.systems.len(), "system registered");
        self.systems.push(system);
    }

    /// Run every system once, in registration order.
    ///
    /// A system error is logged and the remaining systems still run.
    pub fn update(&mut self, delta_secs: f32) -> FrameTime {
        if !(delta_secs.is_finite() && delta_secs >= 0.0) {
            tracing::warn!(delta_secs, "ignoring invalid update delta");
        }
        let frame = self.clock.advance(delta_secs);

        for system in &mut self.systems {
            if let Err(e) = system.update(&mut self.registry, &mut self.resources, &frame) {
                tracing::error!(system = system.name(), tick = frame.tick, "system failed: {}", e);
            }
        }

        frame
    }

    /// Drop every entity. Registered systems are untouched.
    pub fn clear_entities(&mut self) {
        self.registry.clear();
    }

    pub fn reset_systems(&mut self) {
        for system in &mut self.systems {
            system.reset();
        }
    }

    pub fn reset_clock(&mut self) {
        self.clock.reset();
    }

    pub fn registry(&self) -> &Registry<S> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry<S> {
        &mut self.registry
    }

    pub fn resources(&self) -> &R {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut R {
        &mut self.resources
    }

    /// Mutable access to registry and resources at the same time.
    pub fn split_mut(&mut self) -> (&mut Registry<S>, &mut R) {
        (&mut self.registry, &mut self.resources)
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn system_names(&self) -> Vec<&'static str> {
        self.systems.iter().map(|s| s.name()).collect()
    }
}
