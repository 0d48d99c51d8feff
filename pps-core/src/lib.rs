//! Platform-independent core of the 1PPS generator.
//!
//! The firmware crate wires these pieces to the hardware; everything here is
//! pure arithmetic and state, so it is testable on the host.

#![no_std]

pub mod config;
pub mod engine;

pub use config::{ClockDivider, ConfigError, Params, Prescaler, PulseConfig};
pub use engine::PulseEngine;
