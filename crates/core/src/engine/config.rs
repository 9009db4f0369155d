use std::time::Duration;

use crate::constants::{MARQUEE_INTERVAL, MARQUEE_WIDTH, REFRESH_INTERVAL, ROTATE_INTERVAL};

/// Timer periods and window size of a [`TickerEngine`](super::TickerEngine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub refresh_interval: Duration,
    pub rotate_interval: Duration,
    pub marquee_interval: Duration,
    pub marquee_width: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            refresh_interval: REFRESH_INTERVAL,
            rotate_interval: ROTATE_INTERVAL,
            marquee_interval: MARQUEE_INTERVAL,
            marquee_width: MARQUEE_WIDTH,
        }
    }
}
