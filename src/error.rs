//! Unified error types for the door controller.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! HTTP layer's error mapping in one place. All variants are `Copy` so they
//! can be passed out of the orchestrator and across the blocking-task
//! boundary without allocation.
//!
//! A confirmation timeout is **not** an error: it is a normal terminal
//! outcome of the orchestrator (see [`crate::fsm::DoorState::TimedOut`]).

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A pin or PWM channel could not be claimed, read, or written.
    Hardware(HardwareFault),
    /// A request carried a missing or stale token.
    Auth(AuthError),
    /// Configuration is invalid or incomplete.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hardware(e) => write!(f, "hardware fault: {e}"),
            Self::Auth(e) => write!(f, "auth: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Hardware faults
// ---------------------------------------------------------------------------

/// Faults raised by the GPIO backend or the drivers on top of it.
///
/// Each variant carries the BCM pin number involved so the log line points
/// at the wire to check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareFault {
    /// A driver was used before `initialize()` or after `shutdown()`.
    NotInitialized,
    /// The backend refused to hand out the pin (already claimed, no access).
    PinUnavailable(u8),
    /// Reading a digital input failed.
    GpioReadFailed(u8),
    /// Driving a digital output failed.
    GpioWriteFailed(u8),
    /// Updating a PWM duty cycle failed.
    PwmWriteFailed(u8),
}

impl fmt::Display for HardwareFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "hardware not initialized"),
            Self::PinUnavailable(pin) => write!(f, "GPIO{pin} unavailable"),
            Self::GpioReadFailed(pin) => write!(f, "GPIO{pin} read failed"),
            Self::GpioWriteFailed(pin) => write!(f, "GPIO{pin} write failed"),
            Self::PwmWriteFailed(pin) => write!(f, "PWM on GPIO{pin} write failed"),
        }
    }
}

impl std::error::Error for HardwareFault {}

impl From<HardwareFault> for Error {
    fn from(e: HardwareFault) -> Self {
        Self::Hardware(e)
    }
}

// ---------------------------------------------------------------------------
// Auth errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// Token missing or not equal to the current window's token.
    Unauthorized,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "unauthorized"),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<AuthError> for Error {
    fn from(e: AuthError) -> Self {
        Self::Auth(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Startup-time configuration problems. These abort the process; they are
/// never produced per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The shared token secret is absent or empty.
    MissingSecret,
    /// A field failed range validation. The message names the field.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSecret => write!(f, "shared API secret is not set"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
