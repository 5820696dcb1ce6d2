//! Core types for the espresso-emu Wii U CPU emulator
//!
//! This crate provides the foundational error handling, configuration,
//! and logging infrastructure shared by the other emulator crates.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{Config, CpuConfig, JitMode};
pub use error::{CpuError, MemoryError, Result};
