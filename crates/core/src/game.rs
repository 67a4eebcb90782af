#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerminalOutcome {
    Win,
    Lose,
}

/// A simulation a host can drive with fixed time steps.
pub trait Game {
    type Event: Clone + Send + 'static;

    /// Advance the simulation by `delta_secs`, appending any notifications.
    fn step(&mut self, delta_secs: f32, out_events: &mut Vec<Self::Event>);

    /// Return to the initial state of the current level.
    fn restart(&mut self);

    fn is_terminal(&self) -> Option<TerminalOutcome>;
}
