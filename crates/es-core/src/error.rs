//! Error types for the espresso-emu emulator

use thiserror::Error;

/// CPU emulation errors
#[derive(Error, Debug)]
pub enum CpuError {
    #[error("Illegal instruction at 0x{addr:08X}: 0x{word:08X}")]
    IllegalInstruction { addr: u32, word: u32 },

    #[error("Memory error: {0}")]
    Memory(#[from] MemoryError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unsupported feature: {0}")]
    Unsupported(String),
}

/// Guest memory errors
#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("Invalid address: 0x{0:08X}")]
    InvalidAddress(u32),

    #[error("Access of {size} bytes at 0x{addr:08X} crosses end of guest memory")]
    OutOfRange { addr: u32, size: u32 },

    #[error("Alignment error: address 0x{addr:08X} not aligned to {align}")]
    AlignmentError { addr: u32, align: u32 },
}

/// Result type alias for emulator operations
pub type Result<T> = std::result::Result<T, CpuError>;
