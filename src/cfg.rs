#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::prelude::Duration;

/// Default time to live of one refreshed series
fn default_ttl() -> Duration {
    Duration::from_hours(1.0)
}

/// [crate::prelude::RefreshCache] and [crate::prelude::Tracker] configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct Config {
    /// Series are considered stale once they are older than this.
    /// Staleness is evaluated lazily, on each query.
    #[cfg_attr(feature = "serde", serde(default = "default_ttl"))]
    pub ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self { ttl: default_ttl() }
    }
}

impl Config {
    /// Returns [Config] with desired time to live.
    pub fn with_ttl(&self, ttl: Duration) -> Self {
        let mut s = *self;
        s.ttl = ttl;
        s
    }
}
