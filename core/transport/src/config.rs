use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Distance from the right edge the cursor may reach before auto-follow scrolls.
    pub follow_margin_px: f64,
    /// Share of the visible window left in front of a seek target.
    pub seek_lead_fraction: f64,
    pub tick_interval_ms: u64,
}

impl TransportConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            follow_margin_px: 30.0,
            seek_lead_fraction: 0.1,
            tick_interval_ms: 16,
        }
    }
}
