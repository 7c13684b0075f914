//! Door opener library.
//!
//! Authenticated open/close of a motorized door with end-stop confirmation
//! and an RGB status indicator. Hardware is reached only through the port
//! traits in [`app::ports`]; the Raspberry Pi backend is behind the `rpi`
//! feature, and the simulated board in [`adapters::sim_board`] is always
//! available for tests and host runs.

#![deny(unused_must_use)]

pub mod adapters;
pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod drivers;
pub mod error;
pub mod fsm;
pub mod logs;
pub mod pins;
pub mod sensors;

pub use error::{Error, Result};
