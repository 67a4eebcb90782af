use crate::component::ComponentSet;
use crate::errors::EcsError;
use crate::registry::Registry;
use crate::time::FrameTime;

/// One stage of the per-tick pipeline.
///
/// The scheduler passes the registry and the shared resources explicitly on
/// every call; systems hold no reference to the world between ticks.
pub trait System<S: ComponentSet, R> {
    fn name(&self) -> &'static str;

    fn update(
        &mut self,
        registry: &mut Registry<S>,
        resources: &mut R,
        frame: &FrameTime,
    ) -> Result<(), EcsError>;

    /// Forget per-run state (counters, timers). Called on restart.
    fn reset(&mut self) {}
}
