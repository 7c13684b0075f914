//! Fuzz target: JSON config file parsing + validation
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - A config that passes `validate()` yields a usable timing (poll < timeout)
//!
//! cargo fuzz run fuzz_config_parse

#![no_main]

use door_opener::config::FileConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(cfg) = serde_json::from_slice::<FileConfig>(data) else {
        return;
    };
    if cfg.door.validate().is_ok() {
        let t = cfg.door.timing();
        assert!(t.poll_interval < t.confirm_timeout);
        assert!(cfg.door.pins.is_unique());
    }
});
