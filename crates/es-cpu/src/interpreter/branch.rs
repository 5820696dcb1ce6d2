//! Branch handlers
//!
//! Targets are written to `nia`; the caller has already set it to the
//! fall-through address.

use es_core::error::Result;
use es_memory::Memory;

use crate::catalog::InstructionId;
use crate::fields::InstructionField;
use crate::instruction::{sign_extend, Instruction};
use crate::state::Core;

use super::HandlerTable;

pub fn register(table: &mut HandlerTable) {
    table.register(InstructionId::B, b);
    table.register(InstructionId::Bc, bc);
    table.register(InstructionId::Bcctr, bcctr);
    table.register(InstructionId::Bclr, bclr);
}

fn b(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let offset = sign_extend(instr.field(InstructionField::Li) << 2, 26) as u32;
    let base = if instr.aa() { 0 } else { core.cia };

    if instr.lk() {
        core.lr = core.cia.wrapping_add(4);
    }

    core.nia = base.wrapping_add(offset);
    Ok(())
}

/// BO condition test. Bit 4 skips the CR test, bit 3 selects the wanted
/// CR value, bit 2 skips the CTR test, bit 1 selects CTR zero or
/// non-zero. The CTR decrement happens whenever its test is enabled.
fn condition_holds(core: &mut Core, instr: Instruction, decrement: bool) -> bool {
    let bo = instr.bo();

    let ctr_ok = if bo & 0b00100 != 0 {
        true
    } else {
        if decrement {
            core.ctr = core.ctr.wrapping_sub(1);
        }

        if bo & 0b00010 != 0 {
            core.ctr == 0
        } else {
            core.ctr != 0
        }
    };

    let cond_ok = if bo & 0b10000 != 0 {
        true
    } else {
        core.crb(instr.bi() as usize) == (bo >> 3) & 1
    };

    ctr_ok && cond_ok
}

fn bc(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let taken = condition_holds(core, instr, true);

    if instr.lk() {
        core.lr = core.cia.wrapping_add(4);
    }

    if taken {
        let offset = sign_extend(instr.field(InstructionField::Bd) << 2, 16) as u32;
        let base = if instr.aa() { 0 } else { core.cia };
        core.nia = base.wrapping_add(offset);
    }

    Ok(())
}

fn bcctr(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    // the CTR form never decrements
    let taken = condition_holds(core, instr, false);

    if instr.lk() {
        core.lr = core.cia.wrapping_add(4);
    }

    if taken {
        core.nia = core.ctr & !3;
    }

    Ok(())
}

fn bclr(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let taken = condition_holds(core, instr, true);
    let target = core.lr & !3;

    if instr.lk() {
        core.lr = core.cia.wrapping_add(4);
    }

    if taken {
        core.nia = target;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction_set::InstructionSet;
    use crate::interpreter::HandlerTable;
    use crate::state::ConditionRegisterFlag;

    fn run(core: &mut Core, id: InstructionId, setup: impl FnOnce(&mut Instruction)) {
        let set = InstructionSet::new();
        let table = HandlerTable::new();
        let mem = Memory::new(0x100);
        let mut instr = set.encode(id);
        setup(&mut instr);
        core.nia = core.cia.wrapping_add(4);
        table.handler(id)(core, &mem, instr).unwrap();
    }

    #[test]
    fn test_branch_relative_and_absolute() {
        let mut core = Core::new(0);
        core.cia = 0x1000;

        run(&mut core, InstructionId::B, |i| {
            i.set_field(InstructionField::Li, 4);
        });
        assert_eq!(core.nia, 0x1010);
        assert_eq!(core.lr, 0);

        run(&mut core, InstructionId::B, |i| {
            i.set_field(InstructionField::Li, 4);
            i.set_field(InstructionField::Aa, 1);
            i.set_field(InstructionField::Lk, 1);
        });
        assert_eq!(core.nia, 0x10);
        assert_eq!(core.lr, 0x1004);
    }

    #[test]
    fn test_branch_backwards() {
        let mut core = Core::new(0);
        core.cia = 0x1000;

        run(&mut core, InstructionId::B, |i| {
            i.set_field(InstructionField::Li, (-4i32 as u32) & 0xFF_FFFF);
        });
        assert_eq!(core.nia, 0xFF0);
    }

    #[test]
    fn test_conditional_on_cr_bit() {
        let mut core = Core::new(0);
        core.cia = 0x2000;
        core.set_crf(0, ConditionRegisterFlag::EQUAL.bits());

        // beq +8
        run(&mut core, InstructionId::Bc, |i| {
            i.set_field(InstructionField::Bo, 12);
            i.set_field(InstructionField::Bi, 2);
            i.set_field(InstructionField::Bd, 2);
        });
        assert_eq!(core.nia, 0x2008);

        // bne +8 falls through
        run(&mut core, InstructionId::Bc, |i| {
            i.set_field(InstructionField::Bo, 4);
            i.set_field(InstructionField::Bi, 2);
            i.set_field(InstructionField::Bd, 2);
        });
        assert_eq!(core.nia, 0x2004);
    }

    #[test]
    fn test_bdnz_decrements_ctr() {
        let mut core = Core::new(0);
        core.cia = 0x3000;
        core.ctr = 2;

        // bdnz -4
        run(&mut core, InstructionId::Bc, |i| {
            i.set_field(InstructionField::Bo, 16);
            i.set_field(InstructionField::Bd, (-1i32 as u32) & 0x3FFF);
        });
        assert_eq!(core.ctr, 1);
        assert_eq!(core.nia, 0x2FFC);

        // second time the counter hits zero and falls through
        run(&mut core, InstructionId::Bc, |i| {
            i.set_field(InstructionField::Bo, 16);
            i.set_field(InstructionField::Bd, (-1i32 as u32) & 0x3FFF);
        });
        assert_eq!(core.ctr, 0);
        assert_eq!(core.nia, 0x3004);
    }

    #[test]
    fn test_blr_reads_old_lr() {
        let mut core = Core::new(0);
        core.cia = 0x4000;
        core.lr = 0x5003; // low bits dropped

        run(&mut core, InstructionId::Bclr, |i| {
            i.set_field(InstructionField::Bo, 20);
            i.set_field(InstructionField::Lk, 1);
        });
        assert_eq!(core.nia, 0x5000);
        assert_eq!(core.lr, 0x4004);
    }

    #[test]
    fn test_bctr() {
        let mut core = Core::new(0);
        core.cia = 0x6000;
        core.ctr = 0x7000;

        run(&mut core, InstructionId::Bcctr, |i| {
            i.set_field(InstructionField::Bo, 20);
        });
        assert_eq!(core.nia, 0x7000);
        // bo 20 ignores the counter, which stays untouched
        assert_eq!(core.ctr, 0x7000);
    }
}
