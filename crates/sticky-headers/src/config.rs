#![forbid(unsafe_code)]

//! Tap detection configuration.
//!
//! Defaults follow common touch platform values. Hosts can deserialize a
//! [`TapConfig`] from their own settings file (every field is optional) or
//! override individual fields from the environment with
//! [`TapConfig::from_env`].

use std::time::Duration;

use serde::{Deserialize, Serialize};
use sticky_core::logging::warn;

/// Errors from configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `double_tap_timeout_ms` is zero, so no second tap could ever qualify.
    ZeroDoubleTapTimeout,
    /// The minimum double-tap gap is not below the double-tap timeout.
    MinTimeNotBelowTimeout { min_ms: u64, timeout_ms: u64 },
    /// `long_press_timeout_ms` is zero, so no press could ever be a tap.
    ZeroLongPressTimeout,
    /// A slop distance is negative.
    NegativeSlop { field: &'static str, value: i32 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDoubleTapTimeout => write!(f, "double_tap_timeout_ms must be > 0"),
            Self::MinTimeNotBelowTimeout { min_ms, timeout_ms } => write!(
                f,
                "double_tap_min_time_ms ({min_ms}) must be below double_tap_timeout_ms ({timeout_ms})"
            ),
            Self::ZeroLongPressTimeout => write!(f, "long_press_timeout_ms must be > 0"),
            Self::NegativeSlop { field, value } => write!(f, "{field} must be >= 0, got {value}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Timing and distance thresholds for tap recognition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TapConfig {
    /// Maximum gap between the first tap's release and the second press.
    pub double_tap_timeout_ms: u64,
    /// Minimum gap between release and second press; faster presses are
    /// treated as a bouncing pointer, not a double tap.
    pub double_tap_min_time_ms: u64,
    /// A press held this long is a long press, never a tap.
    pub long_press_timeout_ms: u64,
    /// Movement beyond this distance turns a press into a drag.
    pub touch_slop: i32,
    /// Maximum distance between the two presses of a double tap.
    pub double_tap_slop: i32,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            double_tap_timeout_ms: 300,
            double_tap_min_time_ms: 40,
            long_press_timeout_ms: 500,
            touch_slop: 8,
            double_tap_slop: 100,
        }
    }
}

impl TapConfig {
    #[must_use]
    pub fn double_tap_timeout(&self) -> Duration {
        Duration::from_millis(self.double_tap_timeout_ms)
    }

    #[must_use]
    pub fn double_tap_min_time(&self) -> Duration {
        Duration::from_millis(self.double_tap_min_time_ms)
    }

    #[must_use]
    pub fn long_press_timeout(&self) -> Duration {
        Duration::from_millis(self.long_press_timeout_ms)
    }

    /// Check that the thresholds can actually recognize taps.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.double_tap_timeout_ms == 0 {
            return Err(ConfigError::ZeroDoubleTapTimeout);
        }
        if self.double_tap_min_time_ms >= self.double_tap_timeout_ms {
            return Err(ConfigError::MinTimeNotBelowTimeout {
                min_ms: self.double_tap_min_time_ms,
                timeout_ms: self.double_tap_timeout_ms,
            });
        }
        if self.long_press_timeout_ms == 0 {
            return Err(ConfigError::ZeroLongPressTimeout);
        }
        if self.touch_slop < 0 {
            return Err(ConfigError::NegativeSlop {
                field: "touch_slop",
                value: self.touch_slop,
            });
        }
        if self.double_tap_slop < 0 {
            return Err(ConfigError::NegativeSlop {
                field: "double_tap_slop",
                value: self.double_tap_slop,
            });
        }
        Ok(())
    }

    /// Defaults overridden by `STICKY_TAP_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Defaults overridden through a custom environment lookup.
    ///
    /// Values that fail to parse are ignored with a warning.
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        override_from(&get_env, "STICKY_TAP_DOUBLE_TAP_TIMEOUT_MS", &mut config.double_tap_timeout_ms);
        override_from(&get_env, "STICKY_TAP_DOUBLE_TAP_MIN_TIME_MS", &mut config.double_tap_min_time_ms);
        override_from(&get_env, "STICKY_TAP_LONG_PRESS_TIMEOUT_MS", &mut config.long_press_timeout_ms);
        override_from(&get_env, "STICKY_TAP_TOUCH_SLOP", &mut config.touch_slop);
        override_from(&get_env, "STICKY_TAP_DOUBLE_TAP_SLOP", &mut config.double_tap_slop);
        config
    }
}

fn override_from<F, T>(get_env: &F, key: &str, slot: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let Some(raw) = get_env(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => *slot = value,
        Err(_) => warn!(key, value = %raw, "ignoring unparseable tap setting"),
    }
}
