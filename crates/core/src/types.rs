/// Monotonic count of scheduler updates since the last clock reset.
pub type Tick = u64;
