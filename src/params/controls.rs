//! Timing of the amplitude button and avatar interaction.

use std::time::Duration;

/// Debounce and decay cadence for the amplitude controller
#[derive(Debug, Clone)]
pub struct ControlTiming {
    /// Delay after the last button press before decay starts
    pub debounce: Duration,

    /// Period between decay steps once decay has started
    pub decay_interval: Duration,

    /// How long the avatar holds its gesture after the interaction key
    pub interaction_hold: Duration,
}

impl Default for ControlTiming {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(2000),
            decay_interval: Duration::from_millis(2000),
            interaction_hold: Duration::from_millis(1500),
        }
    }
}
