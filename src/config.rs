//! System configuration parameters
//!
//! All tunable parameters for the door controller. Defaults reproduce the
//! fixed constants of the deployed unit; every value can be overridden from
//! a JSON file or command-line flags (see `main.rs`).

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pins::{self, PinMap};

/// Core door configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorConfig {
    // --- Auth ---
    /// Length of one token window (seconds)
    pub token_window_secs: u64,

    // --- Orchestrator ---
    /// Maximum wait for sensor confirmation after a drive command (milliseconds)
    pub confirm_timeout_ms: u64,
    /// Sleep between two sensor polls (milliseconds)
    pub poll_interval_ms: u64,

    // --- Hardware ---
    /// PWM frequency of the RGB indicator channels (Hz)
    pub pwm_frequency_hz: u32,
    /// Role-to-pin mapping
    pub pins: PinMap,

    // --- Status report ---
    /// Network label reported by the status endpoint
    pub wifi_network: String,
    /// Estimated power-supply level reported by the status endpoint (0-100%)
    pub power_supply_percent: u8,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            token_window_secs: 60,
            confirm_timeout_ms: 10_000,
            poll_interval_ms: 20,
            pwm_frequency_hz: pins::LED_PWM_FREQ_HZ,
            pins: PinMap::default(),
            wifi_network: "staff-net".to_string(),
            power_supply_percent: 100,
        }
    }
}

impl DoorConfig {
    /// Reject out-of-range values. Nothing is clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token_window_secs == 0 {
            return Err(ConfigError::ValidationFailed("token_window_secs must be > 0"));
        }
        if self.confirm_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed("confirm_timeout_ms must be > 0"));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("poll_interval_ms must be > 0"));
        }
        if self.poll_interval_ms >= self.confirm_timeout_ms {
            return Err(ConfigError::ValidationFailed(
                "poll_interval_ms must be below confirm_timeout_ms",
            ));
        }
        if self.pwm_frequency_hz == 0 {
            return Err(ConfigError::ValidationFailed("pwm_frequency_hz must be > 0"));
        }
        if self.power_supply_percent > 100 {
            return Err(ConfigError::ValidationFailed("power_supply_percent must be <= 100"));
        }
        if !self.pins.is_unique() {
            return Err(ConfigError::ValidationFailed("pins must not share a GPIO"));
        }
        Ok(())
    }

    /// Orchestrator timing derived from this config.
    pub fn timing(&self) -> Timing {
        Timing {
            confirm_timeout: Duration::from_millis(self.confirm_timeout_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }
}

/// Bounded-wait parameters for one actuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub confirm_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        DoorConfig::default().timing()
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    pub host: String,
    /// Port to bind to (default: 4000)
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// On-disk configuration file layout (`--config path.json`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub door: DoorConfig,
    pub server: ServerConfig,
}
