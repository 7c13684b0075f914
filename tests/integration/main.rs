//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against the recording mock or the simulated board. No real hardware and
//! no real delay: every clock is simulated.

mod api_tests;
mod mock_hw;
mod orchestrator_tests;
mod service_tests;
