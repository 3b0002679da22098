//! Randomized politeness pauses

use rand::Rng;
use std::time::Duration;

use crate::config::DelayRange;

/// Draw a pause uniformly from `range`; zero for an empty range
#[must_use]
pub fn jittered(range: DelayRange) -> Duration {
    if range.max_ms == 0 {
        return Duration::ZERO;
    }
    let lo = range.min_ms.min(range.max_ms);
    let ms = rand::rng().random_range(lo..=range.max_ms);
    Duration::from_millis(ms)
}

/// Sleep for a pause drawn from `range`
pub async fn pause(range: DelayRange) {
    let delay = jittered(range);
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
