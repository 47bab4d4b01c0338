//! # Global runtime configuration.
//!
//! Provides [`Config`] centralized settings for the glowvisor runtime.
//!
//! Config is used in three places:
//! 1. **Runtime creation**: `Glowvisor::builder(config, presenter)`
//! 2. **Registry**: size of the per-pair lock table
//! 3. **Command surface**: tick length and the default duration for `effect`
//!
//! ## Sentinel values
//! - `default_ticks = 0` → permanent (no expiry timer)
//! - `lock_stripes = 0` / `bus_capacity = 0` → clamped to 1

use std::time::Duration;

/// Global configuration for the glowvisor runtime.
///
/// ## Field semantics
/// - `bus_capacity`: Event bus ring buffer size (min 1)
/// - `lock_stripes`: Number of per-pair exclusion stripes (min 1)
/// - `tick`: Length of one command-surface time unit
/// - `default_ticks`: Duration used by `effect` when no ticks are given (`0` = permanent)
/// - `grace`: How long shutdown waits for subscriber workers to flush
///
/// ## Notes
/// All fields are public for flexibility. Prefer the helper accessors to avoid
/// sprinkling sentinel checks (`0`) across the codebase.
#[derive(Clone, Debug)]
pub struct Config {
    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Receivers that lag behind more than `bus_capacity` messages see `Lagged`
    /// and skip older items.
    pub bus_capacity: usize,

    /// Number of lock stripes guarding per-pair critical sections.
    ///
    /// Two pairs only contend if they hash to the same stripe. Operations on the
    /// same pair always contend.
    pub lock_stripes: usize,

    /// Wall-clock length of one tick, the unit operators type on the command line.
    pub tick: Duration,

    /// Ticks applied by `effect` when the operator gives none (`0` = permanent).
    pub default_ticks: u32,

    /// Maximum time to wait for subscriber workers to flush during shutdown.
    pub grace: Duration,
}

impl Config {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Returns the lock stripe count clamped to a minimum of 1.
    #[inline]
    pub fn lock_stripes_clamped(&self) -> usize {
        self.lock_stripes.max(1)
    }

    /// Converts a tick count to a duration.
    ///
    /// - `0` → `None` (permanent)
    /// - `n` → `Some(n × tick)`, saturating
    #[inline]
    pub fn ticks_to_duration(&self, ticks: u32) -> Option<Duration> {
        if ticks == 0 {
            None
        } else {
            Some(self.tick.saturating_mul(ticks))
        }
    }

    /// Returns the default effect duration as an `Option` (`None` = permanent).
    #[inline]
    pub fn default_duration(&self) -> Option<Duration> {
        self.ticks_to_duration(self.default_ticks)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `bus_capacity = 1024`
    /// - `lock_stripes = 64`
    /// - `tick = 50ms` (20 ticks per second)
    /// - `default_ticks = 0` (permanent)
    /// - `grace = 5s`
    fn default() -> Self {
        Self {
            bus_capacity: 1024,
            lock_stripes: 64,
            tick: Duration::from_millis(50),
            default_ticks: 0,
            grace: Duration::from_secs(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_ticks_is_permanent() {
        let cfg = Config::default();
        assert_eq!(cfg.ticks_to_duration(0), None);
        assert_eq!(cfg.default_duration(), None);
    }

    #[test]
    fn test_ticks_scale_by_tick_length() {
        let cfg = Config::default();
        assert_eq!(cfg.ticks_to_duration(20), Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_sentinels_are_clamped() {
        let cfg = Config {
            bus_capacity: 0,
            lock_stripes: 0,
            ..Config::default()
        };
        assert_eq!(cfg.bus_capacity_clamped(), 1);
        assert_eq!(cfg.lock_stripes_clamped(), 1);
    }
}
