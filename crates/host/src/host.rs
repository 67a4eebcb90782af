use sim_core::{Game, TerminalOutcome, Tick};

#[derive(Debug)]
pub struct RunResult<G: Game> {
    pub outcome: Option<TerminalOutcome>,
    pub final_tick: Tick,
    pub events: Vec<G::Event>,
}

/// Drives a [`Game`] with a fixed time step of `1 / tick_hz` seconds.
///
/// Pausing only stops scheduling: the game is untouched until resumed.
pub struct GameHost<G: Game> {
    game: G,
    current_tick: Tick,
    tick_hz: u32,
    paused: bool,
}

impl<G: Game> GameHost<G> {
    pub fn new(game: G, tick_hz: u32) -> Self {
        Self {
            game,
            current_tick: 0,
            tick_hz: tick_hz.max(1),
            paused: false,
        }
    }

    /// Seconds simulated by one tick.
    pub fn delta_secs(&self) -> f32 {
        1.0 / self.tick_hz as f32
    }

    pub fn pause(&mut self) {
        if !self.paused {
            tracing::info!(tick = self.current_tick, "paused");
        }
        self.paused = true;
    }

    pub fn resume(&mut self) {
        if self.paused {
            tracing::info!(tick = self.current_tick, "resumed");
        }
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Reset the game and the tick counter, and unpause.
    pub fn restart(&mut self) {
        tracing::info!(tick = self.current_tick, "restarting");
        self.game.restart();
        self.current_tick = 0;
        self.paused = false;
    }

    pub fn run_for_ticks(&mut self, max_ticks: Tick) -> RunResult<G> {
        let mut all_events = Vec::new();

        for _ in 0..max_ticks {
            match self.step_one_tick() {
                Some(events) => all_events.extend(events),
                None => break,
            }
        }

        RunResult {
            outcome: self.game.is_terminal(),
            final_tick: self.current_tick,
            events: all_events,
        }
    }

    /// Advance by one tick. Returns None if paused or the game is already
    /// terminal, otherwise the events from this tick.
    pub fn step_one_tick(&mut self) -> Option<Vec<G::Event>> {
        if self.paused || self.game.is_terminal().is_some() {
            return None;
        }

        self.current_tick += 1;

        let mut tick_events = Vec::new();
        let delta = self.delta_secs();
        self.game.step(delta, &mut tick_events);

        Some(tick_events)
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    pub fn tick_hz(&self) -> u32 {
        self.tick_hz
    }

    pub fn is_terminal(&self) -> Option<TerminalOutcome> {
        self.game.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Accumulates simulated time; wins once `target` seconds have passed.
    struct Timer {
        elapsed: f32,
        target: f32,
        restarts: u32,
    }

    impl Game for Timer {
        type Event = f32;

        fn step(&mut self, delta_secs: f32, out_events: &mut Vec<f32>) {
            self.elapsed += delta_secs;
            out_events.push(self.elapsed);
        }

        fn restart(&mut self) {
            self.elapsed = 0.0;
            self.restarts += 1;
        }

        fn is_terminal(&self) -> Option<TerminalOutcome> {
            (self.elapsed >= self.target).then_some(TerminalOutcome::Win)
        }
    }

    fn host(target: f32) -> GameHost<Timer> {
        GameHost::new(
            Timer {
                elapsed: 0.0,
                target,
                restarts: 0,
            },
            10,
        )
    }

    #[test]
    fn test_fixed_step() {
        let mut host = host(100.0);
        let events = host.step_one_tick().unwrap();
        assert_eq!(events.len(), 1);
        assert!((events[0] - 0.1).abs() < 1e-6);
        assert_eq!(host.current_tick(), 1);
    }

    #[test]
    fn test_pause_blocks_steps() {
        let mut host = host(100.0);
        host.step_one_tick();
        host.pause();

        assert!(host.step_one_tick().is_none());
        let result = host.run_for_ticks(5);
        assert!(result.events.is_empty());
        assert_eq!(result.final_tick, 1);
        assert!((host.game().elapsed - 0.1).abs() < 1e-6);

        host.resume();
        assert!(host.step_one_tick().is_some());
        assert_eq!(host.current_tick(), 2);
    }

    #[test]
    fn test_run_stops_on_terminal() {
        let mut host = host(0.45);
        let result = host.run_for_ticks(100);

        assert_eq!(result.outcome, Some(TerminalOutcome::Win));
        assert_eq!(result.final_tick, 5);
        assert_eq!(result.events.len(), 5);
        assert!(host.step_one_tick().is_none());
    }

    #[test]
    fn test_restart_resets_and_unpauses() {
        let mut host = host(100.0);
        host.run_for_ticks(3);
        host.pause();
        host.restart();

        assert!(!host.is_paused());
        assert_eq!(host.current_tick(), 0);
        assert_eq!(host.game().restarts, 1);
        assert_eq!(host.game().elapsed, 0.0);
    }

    #[test]
    fn test_zero_tick_hz_is_clamped() {
        let host = GameHost::new(
            Timer {
                elapsed: 0.0,
                target: 1.0,
                restarts: 0,
            },
            0,
        );
        assert_eq!(host.tick_hz(), 1);
        assert_eq!(host.delta_secs(), 1.0);
    }
}
