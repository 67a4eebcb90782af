use crate::types::Tick;

/// Simulation timestamp or duration in milliseconds.
///
/// The simulation never reads a wall clock: every timestamp is derived from
/// the deltas handed to [`SimClock::advance`].
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Millis(f64);

impl Millis {
    pub const ZERO: Self = Self(0.0);

    /// Create from milliseconds.
    pub const fn new(millis: f64) -> Self {
        Self(millis)
    }

    /// Create from whole seconds.
    pub fn from_secs(secs: u32) -> Self {
        Self(secs as f64 * 1_000.0)
    }

    /// Create from fractional seconds.
    pub fn from_secs_f32(secs: f32) -> Self {
        Self(secs as f64 * 1_000.0)
    }

    pub const fn as_f64(self) -> f64 {
        self.0
    }

    /// Time elapsed since `earlier`. Negative if `earlier` lies in the future.
    pub fn since(self, earlier: Millis) -> Millis {
        Self(self.0 - earlier.0)
    }
}

impl core::ops::Add for Millis {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl core::ops::AddAssign for Millis {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl core::ops::Sub for Millis {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

/// Timing information handed to every system for one scheduler update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTime {
    pub tick: Tick,
    pub delta_secs: f32,
    /// Simulation time at the end of this update.
    pub now: Millis,
}

/// Accumulates simulation time from update deltas.
#[derive(Clone, Debug, Default)]
pub struct SimClock {
    tick: Tick,
    now: Millis,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `delta_secs` and return the frame timing for this update.
    ///
    /// Non-finite or negative deltas advance the tick but not the time.
    pub fn advance(&mut self, delta_secs: f32) -> FrameTime {
        let delta_secs = if delta_secs.is_finite() && delta_secs > 0.0 {
            delta_secs
        } else {
            0.0
        };
        self.tick += 1;
        self.now += Millis::from_secs_f32(delta_secs);
        FrameTime {
            tick: self.tick,
            delta_secs,
            now: self.now,
        }
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_from_secs() {
        assert_eq!(Millis::from_secs(2).as_f64(), 2_000.0);
        assert_eq!(Millis::from_secs_f32(0.5).as_f64(), 500.0);
    }

    #[test]
    fn test_millis_arithmetic() {
        let a = Millis::new(1_500.0);
        let b = Millis::new(500.0);

        assert_eq!((a + b).as_f64(), 2_000.0);
        assert_eq!((a - b).as_f64(), 1_000.0);
        assert_eq!(b.since(a).as_f64(), -1_000.0);
    }

    #[test]
    fn test_clock_accumulates_deltas() {
        let mut clock = SimClock::new();

        let first = clock.advance(0.016);
        assert_eq!(first.tick, 1);
        assert!((first.now.as_f64() - 16.0).abs() < 1e-3);

        let second = clock.advance(0.016);
        assert_eq!(second.tick, 2);
        assert!((second.now.as_f64() - 32.0).abs() < 1e-3);
    }

    #[test]
    fn test_clock_ignores_bad_deltas() {
        let mut clock = SimClock::new();

        let frame = clock.advance(-1.0);
        assert_eq!(frame.delta_secs, 0.0);
        let frame = clock.advance(f32::NAN);
        assert_eq!(frame.delta_secs, 0.0);

        assert_eq!(clock.tick(), 2);
        assert_eq!(clock.now(), Millis::ZERO);
    }

    #[test]
    fn test_clock_reset() {
        let mut clock = SimClock::new();
        clock.advance(1.0);
        clock.reset();
        assert_eq!(clock.tick(), 0);
        assert_eq!(clock.now(), Millis::ZERO);
    }
}
