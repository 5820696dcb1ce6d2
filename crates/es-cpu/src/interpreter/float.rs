//! Floating-point move handlers
//!
//! These operate on the raw ps0 bit image, so NaN payloads pass through
//! untouched.

use es_core::error::Result;
use es_memory::Memory;

use crate::catalog::InstructionId;
use crate::instruction::Instruction;
use crate::state::Core;

use super::HandlerTable;

const SIGN_BIT: u64 = 1 << 63;

pub fn register(table: &mut HandlerTable) {
    table.register(InstructionId::Fmr, fmr);
    table.register(InstructionId::Fneg, fneg);
    table.register(InstructionId::Fabs, fabs);
    table.register(InstructionId::Fnabs, fnabs);
}

fn finish_move(core: &mut Core, instr: Instruction, bits: u64) {
    core.fpr[instr.frd()].ps0 = bits;

    if instr.rc() {
        // cr1 receives the FPSCR exception summary nibble
        core.set_crf(1, core.fpscr >> 28);
    }
}

fn fmr(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let bits = core.fpr[instr.frb()].ps0;
    finish_move(core, instr, bits);
    Ok(())
}

fn fneg(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let bits = core.fpr[instr.frb()].ps0 ^ SIGN_BIT;
    finish_move(core, instr, bits);
    Ok(())
}

fn fabs(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let bits = core.fpr[instr.frb()].ps0 & !SIGN_BIT;
    finish_move(core, instr, bits);
    Ok(())
}

fn fnabs(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let bits = core.fpr[instr.frb()].ps0 | SIGN_BIT;
    finish_move(core, instr, bits);
    Ok(())
}
