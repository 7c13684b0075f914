//! Rotating API token: HMAC-SHA256 over the current time window.
//!
//! ```text
//!   window = floor(unix_secs / window_secs)
//!   token  = hex(HMAC-SHA256(key = secret, msg = decimal(window)))
//! ```
//!
//! Two requests in the same window see byte-identical tokens; the previous
//! window is not accepted, so a caller that fetched a token just before a
//! boundary has to fetch again.
//!
//! Crypto is handled by the `hmac-sha256` crate; the comparison against the
//! caller's string is constant-time via `subtle`.

use core::fmt::Write as _;
use std::sync::Arc;

use log::warn;
use subtle::ConstantTimeEq;

use crate::app::ports::Clock;
use crate::error::{AuthError, ConfigError};

/// Lowercase hex of a 32-byte digest.
pub type AuthToken = heapless::String<64>;

pub struct TokenService {
    secret: Vec<u8>,
    window_secs: u64,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// An empty secret is a startup fault.
    pub fn new(
        secret: impl Into<Vec<u8>>,
        window_secs: u64,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        if window_secs == 0 {
            return Err(ConfigError::ValidationFailed("token_window_secs must be > 0"));
        }
        Ok(Self {
            secret,
            window_secs,
            clock,
        })
    }

    pub fn window_index(&self, unix_secs: u64) -> u64 {
        unix_secs / self.window_secs
    }

    /// Token for the window containing `unix_secs`.
    pub fn token_at(&self, unix_secs: u64) -> AuthToken {
        self.token_for_window(self.window_index(unix_secs))
    }

    pub fn token_for_window(&self, window: u64) -> AuthToken {
        let mut msg: heapless::String<20> = heapless::String::new();
        // u64::MAX has 20 digits.
        let _ = write!(msg, "{window}");
        let digest = hmac_sha256::HMAC::mac(msg.as_bytes(), &self.secret);

        let mut token = AuthToken::new();
        for byte in digest {
            let _ = write!(token, "{byte:02x}");
        }
        token
    }

    pub fn current(&self) -> AuthToken {
        self.token_at(self.clock.unix_secs())
    }

    /// Exact match against the current window's token.
    pub fn validate(&self, candidate: &str) -> Result<(), AuthError> {
        let expected = self.current();
        if bool::from(expected.as_bytes().ct_eq(candidate.as_bytes())) {
            Ok(())
        } else {
            warn!("auth: rejected token (len {})", candidate.len());
            Err(AuthError::Unauthorized)
        }
    }

    /// `None` (no `key` parameter at all) is rejected like a wrong token.
    pub fn validate_opt(&self, candidate: Option<&str>) -> Result<(), AuthError> {
        self.validate(candidate.unwrap_or_default())
    }
}
