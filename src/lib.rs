//! Website price configurator.
//!
//! Library crate exposing the wizard state machine, pricing engine and
//! handoff transports for the binary host and integration tests.

pub mod config;
pub mod types;
pub mod pricing;
pub mod wizard;
pub mod handoff;
