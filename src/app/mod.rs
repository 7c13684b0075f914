//! Application core: door domain logic, no direct I/O.
//!
//! Commands come in as [`commands::DoorIntent`], events go out through the
//! [`ports::EventSink`] port, and every hardware interaction goes through
//! the port traits in [`ports`], so the whole layer runs against the
//! simulated board in tests.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
