use crate::domain::RefreshRate;
use std::time::Duration;

/// Upper bound on how long the event loop waits for input, so key presses stay
/// responsive even at slow refresh rates
pub const MAX_POLL_MS: u64 = 250;

/// How often task tiles are redrawn
pub fn tick_duration(rate: RefreshRate) -> Duration {
    rate.duration()
}

/// How long to wait for input before the next tick check
pub fn poll_duration(rate: RefreshRate) -> Duration {
    Duration::from_millis(rate.millis().min(MAX_POLL_MS))
}
