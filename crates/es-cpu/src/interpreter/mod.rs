//! Instruction interpreter
//!
//! A flat handler table indexed by [`InstructionId`]. Handlers mutate the
//! core in place and read or write guest memory through [`Memory`]. The
//! caller sets `nia` to the fall-through address before dispatch; branch
//! handlers overwrite it.

mod branch;
mod float;
mod integer;
mod loadstore;
mod system;

use es_core::error::{CpuError, Result};
use es_memory::Memory;

use crate::catalog::InstructionId;
use crate::instruction::Instruction;
use crate::instruction_set::InstructionSet;
use crate::state::Core;

pub type Handler = fn(&mut Core, &Memory, Instruction) -> Result<()>;

pub struct HandlerTable {
    handlers: Vec<Option<Handler>>,
}

impl HandlerTable {
    pub fn new() -> Self {
        let mut table = HandlerTable {
            handlers: vec![None; InstructionId::COUNT],
        };

        integer::register(&mut table);
        loadstore::register(&mut table);
        branch::register(&mut table);
        system::register(&mut table);
        float::register(&mut table);

        table
    }

    pub fn register(&mut self, id: InstructionId, handler: Handler) {
        self.handlers[id as usize] = Some(handler);
    }

    pub fn get(&self, id: InstructionId) -> Option<Handler> {
        self.handlers[id as usize]
    }

    /// Handler for `id`. Panics when none is registered; callers that can
    /// tolerate a gap use [`HandlerTable::get`].
    pub fn handler(&self, id: InstructionId) -> Handler {
        self.get(id)
            .unwrap_or_else(|| panic!("no handler registered for {:?}", id))
    }
}

impl Default for HandlerTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Execute the single instruction at `core.cia`.
///
/// On return `core.nia` holds the next address; the caller advances
/// `cia` itself.
pub fn step(
    core: &mut Core,
    mem: &Memory,
    set: &InstructionSet,
    table: &HandlerTable,
) -> Result<()> {
    let word = Instruction(mem.read::<u32>(core.cia)?);
    let info = set.decode(word).ok_or(CpuError::IllegalInstruction {
        addr: core.cia,
        word: word.0,
    })?;

    core.nia = core.cia.wrapping_add(4);

    let handler = table
        .get(info.id)
        .ok_or_else(|| CpuError::Unsupported(info.name.to_string()))?;

    handler(core, mem, word)
}

/// Effective address for the d-form load and store instructions
fn ea_d(core: &Core, instr: Instruction) -> u32 {
    let base = if instr.ra() == 0 {
        0
    } else {
        core.gpr[instr.ra()]
    };
    base.wrapping_add(instr.d() as u32)
}

/// Effective address for the x-form load and store instructions
fn ea_x(core: &Core, instr: Instruction) -> u32 {
    let base = if instr.ra() == 0 {
        0
    } else {
        core.gpr[instr.ra()]
    };
    base.wrapping_add(core.gpr[instr.rb()])
}

/// Effective address for update forms, which always use rA
fn ea_d_update(core: &Core, instr: Instruction) -> u32 {
    core.gpr[instr.ra()].wrapping_add(instr.d() as u32)
}

fn ea_x_update(core: &Core, instr: Instruction) -> u32 {
    core.gpr[instr.ra()].wrapping_add(core.gpr[instr.rb()])
}
