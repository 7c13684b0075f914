//! Fuzz target: `TokenService::validate`
//!
//! Splits the input into a secret, a clock value and a candidate token.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - A candidate validates only when it equals the current token exactly
//! - The current token always validates
//!
//! cargo fuzz run fuzz_token_validate

#![no_main]

use std::sync::Arc;

use door_opener::adapters::time::SimClock;
use door_opener::auth::TokenService;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 9 {
        return;
    }

    let (clock_bytes, rest) = data.split_at(8);
    let now = u64::from_le_bytes(clock_bytes.try_into().unwrap()) % 8_000_000_000;
    let secret_len = usize::from(rest[0]).min(rest.len() - 1);
    let (secret, candidate) = rest[1..].split_at(secret_len);

    let Ok(svc) = TokenService::new(secret.to_vec(), 60, Arc::new(SimClock::at_unix(now))) else {
        assert!(secret.is_empty(), "only an empty secret may be refused");
        return;
    };

    let current = svc.current();
    assert!(svc.validate(&current).is_ok());

    let candidate = String::from_utf8_lossy(candidate);
    let ok = svc.validate(&candidate).is_ok();
    assert_eq!(ok, candidate == current.as_str());
});
