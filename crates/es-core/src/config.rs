//! Configuration system for the espresso-emu emulator

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub cpu: CpuConfig,
    pub debug: DebugConfig,
}

/// CPU emulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CpuConfig {
    pub jit_mode: JitMode,
    /// Restrict JIT verification to a single block address; 0 verifies
    /// every block.
    pub verify_address: u32,
    /// Skip FPSCR updates in generated code
    pub jit_opt_no_fpscr_state: bool,
    /// Keep CR/XER fields split across host registers
    pub jit_opt_split_fields: bool,
    /// Constant-fold floating-point operations at translation time
    pub jit_opt_fold_constant_fp: bool,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            jit_mode: JitMode::default(),
            verify_address: 0,
            jit_opt_no_fpscr_state: false,
            jit_opt_split_fields: false,
            jit_opt_fold_constant_fp: false,
        }
    }
}

/// CPU execution backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum JitMode {
    Interpreter,
    #[default]
    Jit,
    /// JIT with per-instruction verification against the interpreter
    Verify,
}

/// Debugging settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DebugConfig {
    pub trace_instructions: bool,
}

impl Config {
    /// Parse a configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self, crate::error::CpuError> {
        toml::from_str(text).map_err(|e| crate::error::CpuError::Config(e.to_string()))
    }

    /// Serialize the configuration to TOML text
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).expect("config serialization cannot fail")
    }
}
