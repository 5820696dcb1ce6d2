//! Espresso (PowerPC 750CL) instruction set core for espresso-emu
//!
//! This crate implements the CPU-facing half of the emulator that does not
//! generate native code: instruction decoding and encoding, disassembly,
//! the reference interpreter dispatch table, and the JIT verification
//! oracle that cross-checks generated code against the interpreter one
//! instruction at a time.
//!
//! The decode tables are built once by [`InstructionSet::new`] and are
//! immutable afterwards, so every core thread can share one set by
//! reference with no synchronisation on the decode path.

pub mod catalog;
pub mod disassembler;
pub mod fields;
pub mod instruction;
pub mod instruction_set;
pub mod interpreter;
pub mod state;
pub mod verify;

pub use catalog::{InstructionAlias, InstructionId, InstructionInfo, InstructionOpcode};
pub use disassembler::{disassemble, Argument, Disassembly};
pub use fields::{decode_spr, encode_spr, InstructionField};
pub use instruction::Instruction;
pub use instruction_set::InstructionSet;
pub use interpreter::{Handler, HandlerTable};
pub use state::Core;
pub use verify::{JitOptFlags, Verifier};
