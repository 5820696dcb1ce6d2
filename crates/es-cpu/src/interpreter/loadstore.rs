//! Load and store handlers
//!
//! Guest memory is big-endian; [`Memory`] already byte-swaps on access,
//! so the byte-reverse forms store the host-order value by swapping
//! before the write.

use es_core::error::Result;
use es_memory::Memory;

use crate::catalog::InstructionId;
use crate::instruction::Instruction;
use crate::state::Core;

use super::{ea_d, ea_d_update, ea_x, ea_x_update, HandlerTable};

pub fn register(table: &mut HandlerTable) {
    use InstructionId as I;

    table.register(I::Lbz, lbz);
    table.register(I::Lbzu, lbzu);
    table.register(I::Lbzx, lbzx);
    table.register(I::Lbzux, lbzux);
    table.register(I::Lha, lha);
    table.register(I::Lhau, lhau);
    table.register(I::Lhax, lhax);
    table.register(I::Lhaux, lhaux);
    table.register(I::Lhz, lhz);
    table.register(I::Lhzu, lhzu);
    table.register(I::Lhzx, lhzx);
    table.register(I::Lhzux, lhzux);
    table.register(I::Lwz, lwz);
    table.register(I::Lwzu, lwzu);
    table.register(I::Lwzx, lwzx);
    table.register(I::Lwzux, lwzux);
    table.register(I::Stb, stb);
    table.register(I::Stbu, stbu);
    table.register(I::Stbx, stbx);
    table.register(I::Stbux, stbux);
    table.register(I::Sth, sth);
    table.register(I::Sthu, sthu);
    table.register(I::Sthx, sthx);
    table.register(I::Sthux, sthux);
    table.register(I::Stw, stw);
    table.register(I::Stwu, stwu);
    table.register(I::Stwx, stwx);
    table.register(I::Stwux, stwux);
    table.register(I::Lhbrx, lhbrx);
    table.register(I::Lwbrx, lwbrx);
    table.register(I::Sthbrx, sthbrx);
    table.register(I::Stwbrx, stwbrx);
    table.register(I::Lmw, lmw);
    table.register(I::Stmw, stmw);
    table.register(I::Lswi, lswi);
    table.register(I::Lswx, lswx);
    table.register(I::Stswi, stswi);
    table.register(I::Stswx, stswx);
    table.register(I::Dcbz, dcbz);
    table.register(I::DcbzL, dcbz);
    table.register(I::Lfs, lfs);
    table.register(I::Lfsu, lfsu);
    table.register(I::Lfsx, lfsx);
    table.register(I::Lfsux, lfsux);
    table.register(I::Lfd, lfd);
    table.register(I::Lfdu, lfdu);
    table.register(I::Lfdx, lfdx);
    table.register(I::Lfdux, lfdux);
    table.register(I::Stfs, stfs);
    table.register(I::Stfsu, stfsu);
    table.register(I::Stfsx, stfsx);
    table.register(I::Stfsux, stfsux);
    table.register(I::Stfd, stfd);
    table.register(I::Stfdu, stfdu);
    table.register(I::Stfdx, stfdx);
    table.register(I::Stfdux, stfdux);
    table.register(I::Stfiwx, stfiwx);
}

macro_rules! load {
    ($name:ident, $ea:ident, $ty:ty, $store:expr) => {
        fn $name(core: &mut Core, mem: &Memory, instr: Instruction) -> Result<()> {
            let ea = $ea(core, instr);
            let value = mem.read::<$ty>(ea)?;
            #[allow(clippy::redundant_closure_call)]
            ($store)(core, instr, value);
            Ok(())
        }
    };
}

macro_rules! load_update {
    ($name:ident, $ea:ident, $ty:ty, $store:expr) => {
        fn $name(core: &mut Core, mem: &Memory, instr: Instruction) -> Result<()> {
            let ea = $ea(core, instr);
            let value = mem.read::<$ty>(ea)?;
            #[allow(clippy::redundant_closure_call)]
            ($store)(core, instr, value);
            core.gpr[instr.ra()] = ea;
            Ok(())
        }
    };
}

fn store_zero<T: Into<u32>>(core: &mut Core, instr: Instruction, value: T) {
    core.gpr[instr.rd()] = value.into();
}

fn store_algebraic(core: &mut Core, instr: Instruction, value: u16) {
    core.gpr[instr.rd()] = value as i16 as i32 as u32;
}

fn store_single(core: &mut Core, instr: Instruction, value: u32) {
    let bits = (f32::from_bits(value) as f64).to_bits();
    core.fpr[instr.frd()].ps0 = bits;
    core.fpr[instr.frd()].ps1 = bits;
}

fn store_double(core: &mut Core, instr: Instruction, value: u64) {
    core.fpr[instr.frd()].ps0 = value;
}

load!(lbz, ea_d, u8, store_zero::<u8>);
load_update!(lbzu, ea_d_update, u8, store_zero::<u8>);
load!(lbzx, ea_x, u8, store_zero::<u8>);
load_update!(lbzux, ea_x_update, u8, store_zero::<u8>);
load!(lha, ea_d, u16, store_algebraic);
load_update!(lhau, ea_d_update, u16, store_algebraic);
load!(lhax, ea_x, u16, store_algebraic);
load_update!(lhaux, ea_x_update, u16, store_algebraic);
load!(lhz, ea_d, u16, store_zero::<u16>);
load_update!(lhzu, ea_d_update, u16, store_zero::<u16>);
load!(lhzx, ea_x, u16, store_zero::<u16>);
load_update!(lhzux, ea_x_update, u16, store_zero::<u16>);
load!(lwz, ea_d, u32, store_zero::<u32>);
load_update!(lwzu, ea_d_update, u32, store_zero::<u32>);
load!(lwzx, ea_x, u32, store_zero::<u32>);
load_update!(lwzux, ea_x_update, u32, store_zero::<u32>);
load!(lfs, ea_d, u32, store_single);
load_update!(lfsu, ea_d_update, u32, store_single);
load!(lfsx, ea_x, u32, store_single);
load_update!(lfsux, ea_x_update, u32, store_single);
load!(lfd, ea_d, u64, store_double);
load_update!(lfdu, ea_d_update, u64, store_double);
load!(lfdx, ea_x, u64, store_double);
load_update!(lfdux, ea_x_update, u64, store_double);

macro_rules! store {
    ($name:ident, $ea:ident, $ty:ty, $value:expr) => {
        fn $name(core: &mut Core, mem: &Memory, instr: Instruction) -> Result<()> {
            let ea = $ea(core, instr);
            #[allow(clippy::redundant_closure_call)]
            let value: $ty = ($value)(core, instr);
            mem.write::<$ty>(ea, value)?;
            Ok(())
        }
    };
}

macro_rules! store_update {
    ($name:ident, $ea:ident, $ty:ty, $value:expr) => {
        fn $name(core: &mut Core, mem: &Memory, instr: Instruction) -> Result<()> {
            let ea = $ea(core, instr);
            #[allow(clippy::redundant_closure_call)]
            let value: $ty = ($value)(core, instr);
            mem.write::<$ty>(ea, value)?;
            core.gpr[instr.ra()] = ea;
            Ok(())
        }
    };
}

fn gpr_u8(core: &mut Core, instr: Instruction) -> u8 {
    core.gpr[instr.rs()] as u8
}

fn gpr_u16(core: &mut Core, instr: Instruction) -> u16 {
    core.gpr[instr.rs()] as u16
}

fn gpr_u32(core: &mut Core, instr: Instruction) -> u32 {
    core.gpr[instr.rs()]
}

fn fpr_single(core: &mut Core, instr: Instruction) -> u32 {
    (core.fpr[instr.frs()].ps0_f64() as f32).to_bits()
}

fn fpr_double(core: &mut Core, instr: Instruction) -> u64 {
    core.fpr[instr.frs()].ps0
}

fn fpr_low_word(core: &mut Core, instr: Instruction) -> u32 {
    core.fpr[instr.frs()].ps0 as u32
}

store!(stb, ea_d, u8, gpr_u8);
store_update!(stbu, ea_d_update, u8, gpr_u8);
store!(stbx, ea_x, u8, gpr_u8);
store_update!(stbux, ea_x_update, u8, gpr_u8);
store!(sth, ea_d, u16, gpr_u16);
store_update!(sthu, ea_d_update, u16, gpr_u16);
store!(sthx, ea_x, u16, gpr_u16);
store_update!(sthux, ea_x_update, u16, gpr_u16);
store!(stw, ea_d, u32, gpr_u32);
store_update!(stwu, ea_d_update, u32, gpr_u32);
store!(stwx, ea_x, u32, gpr_u32);
store_update!(stwux, ea_x_update, u32, gpr_u32);
store!(stfs, ea_d, u32, fpr_single);
store_update!(stfsu, ea_d_update, u32, fpr_single);
store!(stfsx, ea_x, u32, fpr_single);
store_update!(stfsux, ea_x_update, u32, fpr_single);
store!(stfd, ea_d, u64, fpr_double);
store_update!(stfdu, ea_d_update, u64, fpr_double);
store!(stfdx, ea_x, u64, fpr_double);
store_update!(stfdux, ea_x_update, u64, fpr_double);
store!(stfiwx, ea_x, u32, fpr_low_word);

fn lhbrx(core: &mut Core, mem: &Memory, instr: Instruction) -> Result<()> {
    let ea = ea_x(core, instr);
    core.gpr[instr.rd()] = mem.read::<u16>(ea)?.swap_bytes() as u32;
    Ok(())
}

fn lwbrx(core: &mut Core, mem: &Memory, instr: Instruction) -> Result<()> {
    let ea = ea_x(core, instr);
    core.gpr[instr.rd()] = mem.read::<u32>(ea)?.swap_bytes();
    Ok(())
}

fn sthbrx(core: &mut Core, mem: &Memory, instr: Instruction) -> Result<()> {
    let ea = ea_x(core, instr);
    mem.write::<u16>(ea, (core.gpr[instr.rs()] as u16).swap_bytes())?;
    Ok(())
}

fn stwbrx(core: &mut Core, mem: &Memory, instr: Instruction) -> Result<()> {
    let ea = ea_x(core, instr);
    mem.write::<u32>(ea, core.gpr[instr.rs()].swap_bytes())?;
    Ok(())
}

fn lmw(core: &mut Core, mem: &Memory, instr: Instruction) -> Result<()> {
    let mut ea = ea_d(core, instr);

    for reg in instr.rd()..32 {
        core.gpr[reg] = mem.read::<u32>(ea)?;
        ea = ea.wrapping_add(4);
    }

    Ok(())
}

fn stmw(core: &mut Core, mem: &Memory, instr: Instruction) -> Result<()> {
    let mut ea = ea_d(core, instr);

    for reg in instr.rs()..32 {
        mem.write::<u32>(ea, core.gpr[reg])?;
        ea = ea.wrapping_add(4);
    }

    Ok(())
}

/// Move `count` bytes from memory into registers starting at rD,
/// filling each register high byte first and wrapping r31 to r0.
fn load_string(core: &mut Core, mem: &Memory, start: usize, mut ea: u32, count: u32) -> Result<()> {
    let mut reg = start;
    core.gpr[reg] = 0;

    for i in 0..count {
        if i > 0 && i % 4 == 0 {
            reg = (reg + 1) % 32;
            core.gpr[reg] = 0;
        }

        let byte = mem.read::<u8>(ea)? as u32;
        core.gpr[reg] |= byte << (24 - 8 * (i % 4));
        ea = ea.wrapping_add(1);
    }

    Ok(())
}

fn store_string(core: &mut Core, mem: &Memory, start: usize, mut ea: u32, count: u32) -> Result<()> {
    let mut reg = start;

    for i in 0..count {
        if i > 0 && i % 4 == 0 {
            reg = (reg + 1) % 32;
        }

        let byte = (core.gpr[reg] >> (24 - 8 * (i % 4))) as u8;
        mem.write::<u8>(ea, byte)?;
        ea = ea.wrapping_add(1);
    }

    Ok(())
}

fn lswi(core: &mut Core, mem: &Memory, instr: Instruction) -> Result<()> {
    let ea = if instr.ra() == 0 {
        0
    } else {
        core.gpr[instr.ra()]
    };
    let count = if instr.nb() == 0 { 32 } else { instr.nb() };
    load_string(core, mem, instr.rd(), ea, count)
}

fn lswx(core: &mut Core, mem: &Memory, instr: Instruction) -> Result<()> {
    let ea = ea_x(core, instr);
    let count = core.xer.byte_count();
    if count == 0 {
        return Ok(());
    }
    load_string(core, mem, instr.rd(), ea, count)
}

fn stswi(core: &mut Core, mem: &Memory, instr: Instruction) -> Result<()> {
    let ea = if instr.ra() == 0 {
        0
    } else {
        core.gpr[instr.ra()]
    };
    let count = if instr.nb() == 0 { 32 } else { instr.nb() };
    store_string(core, mem, instr.rs(), ea, count)
}

fn stswx(core: &mut Core, mem: &Memory, instr: Instruction) -> Result<()> {
    let ea = ea_x(core, instr);
    store_string(core, mem, instr.rs(), ea, core.xer.byte_count())
}

/// Zero one 32-byte cache block
fn dcbz(core: &mut Core, mem: &Memory, instr: Instruction) -> Result<()> {
    let ea = ea_x(core, instr) & !31;

    for offset in (0u32..32).step_by(4) {
        mem.write::<u32>(ea + offset, 0)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InstructionId;
    use crate::fields::InstructionField;
    use crate::instruction_set::InstructionSet;
    use crate::interpreter::HandlerTable;

    fn run(
        core: &mut Core,
        mem: &Memory,
        id: InstructionId,
        setup: impl FnOnce(&mut Instruction),
    ) {
        let set = InstructionSet::new();
        let table = HandlerTable::new();
        let mut instr = set.encode(id);
        setup(&mut instr);
        table.handler(id)(core, mem, instr).unwrap();
    }

    #[test]
    fn test_load_zero_and_algebraic() {
        let mem = Memory::new(0x1000);
        let mut core = Core::new(0);
        mem.write::<u16>(0x100, 0x8001).unwrap();
        core.gpr[1] = 0x100;

        run(&mut core, &mem, InstructionId::Lhz, |i| {
            i.set_field(InstructionField::RD, 3);
            i.set_field(InstructionField::RA, 1);
        });
        assert_eq!(core.gpr[3], 0x8001);

        run(&mut core, &mem, InstructionId::Lha, |i| {
            i.set_field(InstructionField::RD, 3);
            i.set_field(InstructionField::RA, 1);
        });
        assert_eq!(core.gpr[3], 0xFFFF_8001);
    }

    #[test]
    fn test_update_forms_write_back_ea() {
        let mem = Memory::new(0x1000);
        let mut core = Core::new(0);
        mem.write::<u32>(0x108, 0xDEADBEEF).unwrap();
        core.gpr[1] = 0x100;

        run(&mut core, &mem, InstructionId::Lwzu, |i| {
            i.set_field(InstructionField::RD, 3);
            i.set_field(InstructionField::RA, 1);
            i.set_field(InstructionField::D, 8);
        });
        assert_eq!(core.gpr[3], 0xDEADBEEF);
        assert_eq!(core.gpr[1], 0x108);

        core.gpr[4] = 0x1234;
        run(&mut core, &mem, InstructionId::Stwu, |i| {
            i.set_field(InstructionField::RS, 4);
            i.set_field(InstructionField::RA, 1);
            i.set_field(InstructionField::D, 8);
        });
        assert_eq!(core.gpr[1], 0x110);
        assert_eq!(mem.read::<u32>(0x110).unwrap(), 0x1234);
    }

    #[test]
    fn test_ra_zero_means_zero_base() {
        let mem = Memory::new(0x1000);
        let mut core = Core::new(0);
        core.gpr[0] = 0xBAD; // must be ignored
        mem.write::<u32>(0x40, 7).unwrap();

        run(&mut core, &mem, InstructionId::Lwz, |i| {
            i.set_field(InstructionField::RD, 3);
            i.set_field(InstructionField::RA, 0);
            i.set_field(InstructionField::D, 0x40);
        });
        assert_eq!(core.gpr[3], 7);
    }

    #[test]
    fn test_byte_reverse_round_trip() {
        let mem = Memory::new(0x1000);
        let mut core = Core::new(0);
        core.gpr[1] = 0x200;
        core.gpr[4] = 0x1122_3344;

        run(&mut core, &mem, InstructionId::Stwbrx, |i| {
            i.set_field(InstructionField::RS, 4);
            i.set_field(InstructionField::RA, 1);
        });
        // big-endian memory now holds the swapped value
        assert_eq!(mem.read::<u32>(0x200).unwrap(), 0x4433_2211);

        run(&mut core, &mem, InstructionId::Lwbrx, |i| {
            i.set_field(InstructionField::RD, 5);
            i.set_field(InstructionField::RA, 1);
        });
        assert_eq!(core.gpr[5], 0x1122_3344);
    }

    #[test]
    fn test_multiple_words() {
        let mem = Memory::new(0x1000);
        let mut core = Core::new(0);
        core.gpr[1] = 0x300;
        for reg in 29..32 {
            core.gpr[reg] = reg as u32;
        }

        run(&mut core, &mem, InstructionId::Stmw, |i| {
            i.set_field(InstructionField::RS, 29);
            i.set_field(InstructionField::RA, 1);
        });
        assert_eq!(mem.read::<u32>(0x300).unwrap(), 29);
        assert_eq!(mem.read::<u32>(0x308).unwrap(), 31);

        let mut other = Core::new(0);
        other.gpr[1] = 0x300;
        run(&mut other, &mem, InstructionId::Lmw, |i| {
            i.set_field(InstructionField::RD, 29);
            i.set_field(InstructionField::RA, 1);
        });
        assert_eq!(other.gpr[29], 29);
        assert_eq!(other.gpr[31], 31);
    }

    #[test]
    fn test_string_ops_partial_register() {
        let mem = Memory::new(0x1000);
        let mut core = Core::new(0);
        core.gpr[1] = 0x400;
        core.gpr[5] = 0xAABB_CCDD;
        core.gpr[6] = 0x1122_3344;

        // store 6 bytes from r5, r6
        run(&mut core, &mem, InstructionId::Stswi, |i| {
            i.set_field(InstructionField::RS, 5);
            i.set_field(InstructionField::RA, 1);
            i.set_field(InstructionField::Nb, 6);
        });
        assert_eq!(mem.read::<u32>(0x400).unwrap(), 0xAABB_CCDD);
        assert_eq!(mem.read::<u16>(0x404).unwrap(), 0x1122);

        // load them back into r8, r9
        run(&mut core, &mem, InstructionId::Lswi, |i| {
            i.set_field(InstructionField::RD, 8);
            i.set_field(InstructionField::RA, 1);
            i.set_field(InstructionField::Nb, 6);
        });
        assert_eq!(core.gpr[8], 0xAABB_CCDD);
        assert_eq!(core.gpr[9], 0x1122_0000);
    }

    #[test]
    fn test_dcbz_aligns_down() {
        let mem = Memory::new(0x1000);
        let mut core = Core::new(0);
        mem.fill_zero(0, 0x1000).unwrap();
        for addr in (0x500u32..0x540).step_by(4) {
            mem.write::<u32>(addr, 0xFFFF_FFFF).unwrap();
        }
        core.gpr[1] = 0x52C;

        run(&mut core, &mem, InstructionId::Dcbz, |i| {
            i.set_field(InstructionField::RA, 1);
        });
        assert_eq!(mem.read::<u32>(0x51C).unwrap(), 0xFFFF_FFFF);
        assert_eq!(mem.read::<u32>(0x520).unwrap(), 0);
        assert_eq!(mem.read::<u32>(0x53C).unwrap(), 0);
    }

    #[test]
    fn test_float_single_load_store() {
        let mem = Memory::new(0x1000);
        let mut core = Core::new(0);
        core.gpr[1] = 0x600;
        mem.write::<u32>(0x600, 1.5f32.to_bits()).unwrap();

        run(&mut core, &mem, InstructionId::Lfs, |i| {
            i.set_field(InstructionField::FrD, 1);
            i.set_field(InstructionField::RA, 1);
        });
        assert_eq!(core.fpr[1].ps0_f64(), 1.5);
        assert_eq!(core.fpr[1].ps1_f64(), 1.5);

        run(&mut core, &mem, InstructionId::Stfs, |i| {
            i.set_field(InstructionField::FrS, 1);
            i.set_field(InstructionField::RA, 1);
            i.set_field(InstructionField::D, 8);
        });
        assert_eq!(mem.read::<u32>(0x608).unwrap(), 1.5f32.to_bits());
    }

    #[test]
    fn test_double_load_keeps_bits() {
        let mem = Memory::new(0x1000);
        let mut core = Core::new(0);
        core.gpr[1] = 0x700;
        let bits = 1.0000000000000002f64.to_bits();
        mem.write::<u64>(0x700, bits).unwrap();

        run(&mut core, &mem, InstructionId::Lfd, |i| {
            i.set_field(InstructionField::FrD, 2);
            i.set_field(InstructionField::RA, 1);
        });
        assert_eq!(core.fpr[2].ps0, bits);

        run(&mut core, &mem, InstructionId::Stfd, |i| {
            i.set_field(InstructionField::FrS, 2);
            i.set_field(InstructionField::RA, 1);
            i.set_field(InstructionField::D, 8);
        });
        assert_eq!(mem.read::<u64>(0x708).unwrap(), bits);
    }

    #[test]
    fn test_stfiwx_stores_low_word() {
        let mem = Memory::new(0x1000);
        let mut core = Core::new(0);
        core.gpr[1] = 0x800;
        core.fpr[3].ps0 = 0x11223344_AABBCCDD;

        run(&mut core, &mem, InstructionId::Stfiwx, |i| {
            i.set_field(InstructionField::FrS, 3);
            i.set_field(InstructionField::RA, 1);
        });
        assert_eq!(mem.read::<u32>(0x800).unwrap(), 0xAABB_CCDD);
    }
}
