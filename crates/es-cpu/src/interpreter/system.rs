//! System register moves, condition register logic and barriers

use es_core::error::{CpuError, Result};
use es_memory::Memory;

use crate::catalog::InstructionId;
use crate::instruction::Instruction;
use crate::state::{Core, Gqr};

use super::HandlerTable;

const SPR_XER: u32 = 1;
const SPR_LR: u32 = 8;
const SPR_CTR: u32 = 9;
const SPR_GQR0: u32 = 912;
const SPR_GQR7: u32 = 919;

const TBR_TBL: u32 = 268;
const TBR_TBU: u32 = 269;

pub fn register(table: &mut HandlerTable) {
    use InstructionId as I;

    table.register(I::Mfspr, mfspr);
    table.register(I::Mtspr, mtspr);
    table.register(I::Mftb, mftb);
    table.register(I::Mfcr, mfcr);
    table.register(I::Mtcrf, mtcrf);
    table.register(I::Mcrxr, mcrxr);
    table.register(I::Mfmsr, mfmsr);
    table.register(I::Mtmsr, mtmsr);
    table.register(I::Mcrf, mcrf);
    table.register(I::Crand, crand);
    table.register(I::Crandc, crandc);
    table.register(I::Creqv, creqv);
    table.register(I::Crnand, crnand);
    table.register(I::Crnor, crnor);
    table.register(I::Cror, cror);
    table.register(I::Crorc, crorc);
    table.register(I::Crxor, crxor);
    table.register(I::Sync, barrier);
    table.register(I::Isync, barrier);
    table.register(I::Eieio, barrier);
    table.register(I::Dcbf, barrier);
    table.register(I::Dcbst, barrier);
    table.register(I::Dcbt, barrier);
    table.register(I::Dcbtst, barrier);
    table.register(I::Icbi, barrier);
}

fn mfspr(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let value = match instr.spr() {
        SPR_XER => core.xer.0,
        SPR_LR => core.lr,
        SPR_CTR => core.ctr,
        n @ SPR_GQR0..=SPR_GQR7 => core.gqr[(n - SPR_GQR0) as usize].0,
        n => return Err(CpuError::Unsupported(format!("mfspr {}", n))),
    };

    core.gpr[instr.rd()] = value;
    Ok(())
}

fn mtspr(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let value = core.gpr[instr.rs()];

    match instr.spr() {
        SPR_XER => core.xer.0 = value,
        SPR_LR => core.lr = value,
        SPR_CTR => core.ctr = value,
        n @ SPR_GQR0..=SPR_GQR7 => core.gqr[(n - SPR_GQR0) as usize] = Gqr(value),
        n => return Err(CpuError::Unsupported(format!("mtspr {}", n))),
    }

    Ok(())
}

fn mftb(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let value = match instr.tbr() {
        TBR_TBL => core.tb as u32,
        TBR_TBU => (core.tb >> 32) as u32,
        n => return Err(CpuError::Unsupported(format!("mftb {}", n))),
    };

    core.gpr[instr.rd()] = value;
    Ok(())
}

fn mfcr(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    core.gpr[instr.rd()] = core.cr;
    Ok(())
}

fn mtcrf(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let crm = instr.crm();
    let mut mask = 0u32;

    for field in 0..8 {
        if crm & (0x80 >> field) != 0 {
            mask |= 0xF << (28 - field * 4);
        }
    }

    core.cr = (core.gpr[instr.rs()] & mask) | (core.cr & !mask);
    Ok(())
}

fn mcrxr(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    core.set_crf(instr.crfd(), core.xer.crxr());
    core.xer.0 &= 0x0FFF_FFFF;
    Ok(())
}

fn mfmsr(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    core.gpr[instr.rd()] = core.msr;
    Ok(())
}

fn mtmsr(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    core.msr = core.gpr[instr.rs()];
    Ok(())
}

fn mcrf(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let value = core.crf(instr.crfs());
    core.set_crf(instr.crfd(), value);
    Ok(())
}

macro_rules! cr_logic {
    ($name:ident, |$a:ident, $b:ident| $expr:expr) => {
        fn $name(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
            let $a = core.crb(instr.crba());
            let $b = core.crb(instr.crbb());
            core.set_crb(instr.crbd(), ($expr) & 1);
            Ok(())
        }
    };
}

cr_logic!(crand, |a, b| a & b);
cr_logic!(crandc, |a, b| a & !b);
cr_logic!(creqv, |a, b| !(a ^ b));
cr_logic!(crnand, |a, b| !(a & b));
cr_logic!(crnor, |a, b| !(a | b));
cr_logic!(cror, |a, b| a | b);
cr_logic!(crorc, |a, b| a | !b);
cr_logic!(crxor, |a, b| a ^ b);

/// Synchronisation and cache hint instructions have no architectural
/// effect here.
fn barrier(_core: &mut Core, _mem: &Memory, _instr: Instruction) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::InstructionField;
    use crate::instruction_set::InstructionSet;
    use crate::interpreter::HandlerTable;

    fn run(core: &mut Core, id: InstructionId, setup: impl FnOnce(&mut Instruction)) -> Result<()> {
        let set = InstructionSet::new();
        let table = HandlerTable::new();
        let mem = Memory::new(0x100);
        let mut instr = set.encode(id);
        setup(&mut instr);
        table.handler(id)(core, &mem, instr)
    }

    #[test]
    fn test_spr_moves() {
        let mut core = Core::new(0);
        core.gpr[4] = 0x1234;

        run(&mut core, InstructionId::Mtspr, |i| {
            i.set_field(InstructionField::RS, 4);
            i.set_field(InstructionField::Spr, 8);
        })
        .unwrap();
        assert_eq!(core.lr, 0x1234);

        run(&mut core, InstructionId::Mfspr, |i| {
            i.set_field(InstructionField::RD, 5);
            i.set_field(InstructionField::Spr, 8);
        })
        .unwrap();
        assert_eq!(core.gpr[5], 0x1234);

        core.gpr[4] = 0x0004_0000;
        run(&mut core, InstructionId::Mtspr, |i| {
            i.set_field(InstructionField::RS, 4);
            i.set_field(InstructionField::Spr, 915);
        })
        .unwrap();
        assert_eq!(core.gqr[3].0, 0x0004_0000);
    }

    #[test]
    fn test_unknown_spr_is_unsupported() {
        let mut core = Core::new(0);
        let err = run(&mut core, InstructionId::Mfspr, |i| {
            i.set_field(InstructionField::RD, 5);
            i.set_field(InstructionField::Spr, 287);
        })
        .unwrap_err();
        assert!(matches!(err, CpuError::Unsupported(_)));
    }

    #[test]
    fn test_mftb_halves() {
        let mut core = Core::new(0);
        core.tb = 0x11112222_33334444;

        run(&mut core, InstructionId::Mftb, |i| {
            i.set_field(InstructionField::RD, 3);
            i.set_field(InstructionField::Tbr, TBR_TBL);
        })
        .unwrap();
        assert_eq!(core.gpr[3], 0x3333_4444);

        run(&mut core, InstructionId::Mftb, |i| {
            i.set_field(InstructionField::RD, 3);
            i.set_field(InstructionField::Tbr, TBR_TBU);
        })
        .unwrap();
        assert_eq!(core.gpr[3], 0x1111_2222);
    }

    #[test]
    fn test_mtcrf_partial_mask() {
        let mut core = Core::new(0);
        core.cr = 0xFFFF_FFFF;
        core.gpr[4] = 0x1234_5678;

        // update cr0 and cr7 only
        run(&mut core, InstructionId::Mtcrf, |i| {
            i.set_field(InstructionField::RS, 4);
            i.set_field(InstructionField::Crm, 0x81);
        })
        .unwrap();
        assert_eq!(core.cr, 0x1FFF_FFF8);
    }

    #[test]
    fn test_mcrxr_clears_xer_bits() {
        let mut core = Core::new(0);
        core.xer.0 = 0xE000_0042;

        run(&mut core, InstructionId::Mcrxr, |i| {
            i.set_field(InstructionField::CrfD, 3);
        })
        .unwrap();
        assert_eq!(core.crf(3), 0xE);
        assert_eq!(core.xer.0, 0x0000_0042);
    }

    #[test]
    fn test_cr_logic() {
        let mut core = Core::new(0);
        core.set_crb(4, 1);
        core.set_crb(5, 0);

        run(&mut core, InstructionId::Cror, |i| {
            i.set_field(InstructionField::CrbD, 6);
            i.set_field(InstructionField::CrbA, 4);
            i.set_field(InstructionField::CrbB, 5);
        })
        .unwrap();
        assert_eq!(core.crb(6), 1);

        run(&mut core, InstructionId::Crxor, |i| {
            i.set_field(InstructionField::CrbD, 6);
            i.set_field(InstructionField::CrbA, 6);
            i.set_field(InstructionField::CrbB, 6);
        })
        .unwrap();
        assert_eq!(core.crb(6), 0);

        run(&mut core, InstructionId::Creqv, |i| {
            i.set_field(InstructionField::CrbD, 7);
            i.set_field(InstructionField::CrbA, 7);
            i.set_field(InstructionField::CrbB, 7);
        })
        .unwrap();
        assert_eq!(core.crb(7), 1);
    }
}
