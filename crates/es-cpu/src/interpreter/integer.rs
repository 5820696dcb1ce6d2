//! Integer arithmetic, logical, rotate, shift and compare handlers

use es_core::error::Result;
use es_memory::Memory;

use crate::catalog::InstructionId;
use crate::instruction::Instruction;
use crate::state::{ConditionRegisterFlag, Core};

use super::HandlerTable;

pub fn register(table: &mut HandlerTable) {
    use InstructionId as I;

    table.register(I::Add, add);
    table.register(I::Addc, addc);
    table.register(I::Adde, adde);
    table.register(I::Addi, addi);
    table.register(I::Addic, addic);
    table.register(I::Addicx, addicx);
    table.register(I::Addis, addis);
    table.register(I::Addme, addme);
    table.register(I::Addze, addze);
    table.register(I::Subf, subf);
    table.register(I::Subfc, subfc);
    table.register(I::Subfe, subfe);
    table.register(I::Subfic, subfic);
    table.register(I::Subfme, subfme);
    table.register(I::Subfze, subfze);
    table.register(I::Neg, neg);
    table.register(I::Mulli, mulli);
    table.register(I::Mullw, mullw);
    table.register(I::Mulhw, mulhw);
    table.register(I::Mulhwu, mulhwu);
    table.register(I::Divw, divw);
    table.register(I::Divwu, divwu);
    table.register(I::Cmp, cmp);
    table.register(I::Cmpi, cmpi);
    table.register(I::Cmpl, cmpl);
    table.register(I::Cmpli, cmpli);
    table.register(I::And, and);
    table.register(I::Andc, andc);
    table.register(I::Andi, andi);
    table.register(I::Andis, andis);
    table.register(I::Or, or);
    table.register(I::Orc, orc);
    table.register(I::Ori, ori);
    table.register(I::Oris, oris);
    table.register(I::Xor, xor);
    table.register(I::Xori, xori);
    table.register(I::Xoris, xoris);
    table.register(I::Nand, nand);
    table.register(I::Nor, nor);
    table.register(I::Eqv, eqv);
    table.register(I::Extsb, extsb);
    table.register(I::Extsh, extsh);
    table.register(I::Cntlzw, cntlzw);
    table.register(I::Rlwimi, rlwimi);
    table.register(I::Rlwinm, rlwinm);
    table.register(I::Rlwnm, rlwnm);
    table.register(I::Slw, slw);
    table.register(I::Srw, srw);
    table.register(I::Sraw, sraw);
    table.register(I::Srawi, srawi);
}

/// a + b + c with carry-out and signed overflow
fn add_with_carry(a: u32, b: u32, c: u32) -> (u32, bool, bool) {
    let wide = a as u64 + b as u64 + c as u64;
    let result = wide as u32;
    let carry = wide > u32::MAX as u64;
    let overflow = ((a ^ result) & (b ^ result)) & 0x8000_0000 != 0;
    (result, carry, overflow)
}

fn finish_add(
    core: &mut Core,
    instr: Instruction,
    result: u32,
    carry: bool,
    overflow: bool,
    record_carry: bool,
) {
    core.gpr[instr.rd()] = result;

    if record_carry {
        core.xer.set_ca(carry);
    }

    if instr.oe() {
        core.xer.set_overflow(overflow);
    }

    if instr.rc() {
        core.update_cr0(result);
    }
}

fn add(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let (result, carry, overflow) =
        add_with_carry(core.gpr[instr.ra()], core.gpr[instr.rb()], 0);
    finish_add(core, instr, result, carry, overflow, false);
    Ok(())
}

fn addc(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let (result, carry, overflow) =
        add_with_carry(core.gpr[instr.ra()], core.gpr[instr.rb()], 0);
    finish_add(core, instr, result, carry, overflow, true);
    Ok(())
}

fn adde(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let (result, carry, overflow) = add_with_carry(
        core.gpr[instr.ra()],
        core.gpr[instr.rb()],
        core.xer.ca() as u32,
    );
    finish_add(core, instr, result, carry, overflow, true);
    Ok(())
}

fn addi(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let base = if instr.ra() == 0 {
        0
    } else {
        core.gpr[instr.ra()]
    };
    core.gpr[instr.rd()] = base.wrapping_add(instr.simm() as u32);
    Ok(())
}

fn addic(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let (result, carry, _) = add_with_carry(core.gpr[instr.ra()], instr.simm() as u32, 0);
    core.gpr[instr.rd()] = result;
    core.xer.set_ca(carry);
    Ok(())
}

fn addicx(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let (result, carry, _) = add_with_carry(core.gpr[instr.ra()], instr.simm() as u32, 0);
    core.gpr[instr.rd()] = result;
    core.xer.set_ca(carry);
    core.update_cr0(result);
    Ok(())
}

fn addis(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let base = if instr.ra() == 0 {
        0
    } else {
        core.gpr[instr.ra()]
    };
    core.gpr[instr.rd()] = base.wrapping_add((instr.simm() as u32) << 16);
    Ok(())
}

fn addme(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let (result, carry, overflow) =
        add_with_carry(core.gpr[instr.ra()], 0xFFFF_FFFF, core.xer.ca() as u32);
    finish_add(core, instr, result, carry, overflow, true);
    Ok(())
}

fn addze(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let (result, carry, overflow) =
        add_with_carry(core.gpr[instr.ra()], 0, core.xer.ca() as u32);
    finish_add(core, instr, result, carry, overflow, true);
    Ok(())
}

fn subf(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let (result, carry, overflow) =
        add_with_carry(!core.gpr[instr.ra()], core.gpr[instr.rb()], 1);
    finish_add(core, instr, result, carry, overflow, false);
    Ok(())
}

fn subfc(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let (result, carry, overflow) =
        add_with_carry(!core.gpr[instr.ra()], core.gpr[instr.rb()], 1);
    finish_add(core, instr, result, carry, overflow, true);
    Ok(())
}

fn subfe(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let (result, carry, overflow) = add_with_carry(
        !core.gpr[instr.ra()],
        core.gpr[instr.rb()],
        core.xer.ca() as u32,
    );
    finish_add(core, instr, result, carry, overflow, true);
    Ok(())
}

fn subfic(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let (result, carry, _) = add_with_carry(!core.gpr[instr.ra()], instr.simm() as u32, 1);
    core.gpr[instr.rd()] = result;
    core.xer.set_ca(carry);
    Ok(())
}

fn subfme(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let (result, carry, overflow) =
        add_with_carry(!core.gpr[instr.ra()], 0xFFFF_FFFF, core.xer.ca() as u32);
    finish_add(core, instr, result, carry, overflow, true);
    Ok(())
}

fn subfze(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let (result, carry, overflow) =
        add_with_carry(!core.gpr[instr.ra()], 0, core.xer.ca() as u32);
    finish_add(core, instr, result, carry, overflow, true);
    Ok(())
}

fn neg(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let a = core.gpr[instr.ra()];
    let result = (!a).wrapping_add(1);
    core.gpr[instr.rd()] = result;

    if instr.oe() {
        core.xer.set_overflow(a == 0x8000_0000);
    }

    if instr.rc() {
        core.update_cr0(result);
    }

    Ok(())
}

fn mulli(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let a = core.gpr[instr.ra()] as i32 as i64;
    core.gpr[instr.rd()] = (a.wrapping_mul(instr.simm() as i64)) as u32;
    Ok(())
}

fn mullw(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let a = core.gpr[instr.ra()] as i32 as i64;
    let b = core.gpr[instr.rb()] as i32 as i64;
    let product = a.wrapping_mul(b);
    let result = product as u32;
    core.gpr[instr.rd()] = result;

    if instr.oe() {
        core.xer.set_overflow(product != product as i32 as i64);
    }

    if instr.rc() {
        core.update_cr0(result);
    }

    Ok(())
}

fn mulhw(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let a = core.gpr[instr.ra()] as i32 as i64;
    let b = core.gpr[instr.rb()] as i32 as i64;
    let result = (a.wrapping_mul(b) >> 32) as u32;
    core.gpr[instr.rd()] = result;

    if instr.rc() {
        core.update_cr0(result);
    }

    Ok(())
}

fn mulhwu(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let a = core.gpr[instr.ra()] as u64;
    let b = core.gpr[instr.rb()] as u64;
    let result = (a * b >> 32) as u32;
    core.gpr[instr.rd()] = result;

    if instr.rc() {
        core.update_cr0(result);
    }

    Ok(())
}

fn divw(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let a = core.gpr[instr.ra()] as i32;
    let b = core.gpr[instr.rb()] as i32;
    let invalid = b == 0 || (a == i32::MIN && b == -1);
    let result = if invalid { 0 } else { a.wrapping_div(b) as u32 };
    core.gpr[instr.rd()] = result;

    if instr.oe() {
        core.xer.set_overflow(invalid);
    }

    if instr.rc() {
        core.update_cr0(result);
    }

    Ok(())
}

fn divwu(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let a = core.gpr[instr.ra()];
    let b = core.gpr[instr.rb()];
    let invalid = b == 0;
    let result = if invalid { 0 } else { a / b };
    core.gpr[instr.rd()] = result;

    if instr.oe() {
        core.xer.set_overflow(invalid);
    }

    if instr.rc() {
        core.update_cr0(result);
    }

    Ok(())
}

fn compare(core: &mut Core, instr: Instruction, lt: bool, gt: bool) {
    let mut flags = if lt {
        ConditionRegisterFlag::LESS_THAN
    } else if gt {
        ConditionRegisterFlag::GREATER_THAN
    } else {
        ConditionRegisterFlag::EQUAL
    };

    if core.xer.so() {
        flags |= ConditionRegisterFlag::SUMMARY_OVERFLOW;
    }

    core.set_crf(instr.crfd(), flags.bits());
}

fn cmp(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let a = core.gpr[instr.ra()] as i32;
    let b = core.gpr[instr.rb()] as i32;
    compare(core, instr, a < b, a > b);
    Ok(())
}

fn cmpi(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let a = core.gpr[instr.ra()] as i32;
    let b = instr.simm();
    compare(core, instr, a < b, a > b);
    Ok(())
}

fn cmpl(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let a = core.gpr[instr.ra()];
    let b = core.gpr[instr.rb()];
    compare(core, instr, a < b, a > b);
    Ok(())
}

fn cmpli(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let a = core.gpr[instr.ra()];
    let b = instr.uimm();
    compare(core, instr, a < b, a > b);
    Ok(())
}

fn finish_logical(core: &mut Core, instr: Instruction, result: u32) {
    core.gpr[instr.ra()] = result;

    if instr.rc() {
        core.update_cr0(result);
    }
}

fn and(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let result = core.gpr[instr.rs()] & core.gpr[instr.rb()];
    finish_logical(core, instr, result);
    Ok(())
}

fn andc(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let result = core.gpr[instr.rs()] & !core.gpr[instr.rb()];
    finish_logical(core, instr, result);
    Ok(())
}

fn andi(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let result = core.gpr[instr.rs()] & instr.uimm();
    core.gpr[instr.ra()] = result;
    core.update_cr0(result);
    Ok(())
}

fn andis(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let result = core.gpr[instr.rs()] & (instr.uimm() << 16);
    core.gpr[instr.ra()] = result;
    core.update_cr0(result);
    Ok(())
}

fn or(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let result = core.gpr[instr.rs()] | core.gpr[instr.rb()];
    finish_logical(core, instr, result);
    Ok(())
}

fn orc(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let result = core.gpr[instr.rs()] | !core.gpr[instr.rb()];
    finish_logical(core, instr, result);
    Ok(())
}

fn ori(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    core.gpr[instr.ra()] = core.gpr[instr.rs()] | instr.uimm();
    Ok(())
}

fn oris(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    core.gpr[instr.ra()] = core.gpr[instr.rs()] | (instr.uimm() << 16);
    Ok(())
}

fn xor(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let result = core.gpr[instr.rs()] ^ core.gpr[instr.rb()];
    finish_logical(core, instr, result);
    Ok(())
}

fn xori(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    core.gpr[instr.ra()] = core.gpr[instr.rs()] ^ instr.uimm();
    Ok(())
}

fn xoris(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    core.gpr[instr.ra()] = core.gpr[instr.rs()] ^ (instr.uimm() << 16);
    Ok(())
}

fn nand(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let result = !(core.gpr[instr.rs()] & core.gpr[instr.rb()]);
    finish_logical(core, instr, result);
    Ok(())
}

fn nor(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let result = !(core.gpr[instr.rs()] | core.gpr[instr.rb()]);
    finish_logical(core, instr, result);
    Ok(())
}

fn eqv(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let result = !(core.gpr[instr.rs()] ^ core.gpr[instr.rb()]);
    finish_logical(core, instr, result);
    Ok(())
}

fn extsb(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let result = core.gpr[instr.rs()] as u8 as i8 as i32 as u32;
    finish_logical(core, instr, result);
    Ok(())
}

fn extsh(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let result = core.gpr[instr.rs()] as u16 as i16 as i32 as u32;
    finish_logical(core, instr, result);
    Ok(())
}

fn cntlzw(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let result = core.gpr[instr.rs()].leading_zeros();
    finish_logical(core, instr, result);
    Ok(())
}

/// Mask of bits mb..=me in MSB-first numbering, wrapping when mb > me
fn rotate_mask(mb: u32, me: u32) -> u32 {
    let head = u32::MAX >> mb;
    let tail = u32::MAX << (31 - me);

    if mb <= me {
        head & tail
    } else {
        head | tail
    }
}

fn rlwimi(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let sh = instr.sh();
    let mask = rotate_mask(instr.mb(), instr.me());
    let rotated = core.gpr[instr.rs()].rotate_left(sh);
    let result = (rotated & mask) | (core.gpr[instr.ra()] & !mask);
    finish_logical(core, instr, result);
    Ok(())
}

fn rlwinm(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let mask = rotate_mask(instr.mb(), instr.me());
    let result = core.gpr[instr.rs()].rotate_left(instr.sh()) & mask;
    finish_logical(core, instr, result);
    Ok(())
}

fn rlwnm(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let mask = rotate_mask(instr.mb(), instr.me());
    let sh = core.gpr[instr.rb()] & 0x1F;
    let result = core.gpr[instr.rs()].rotate_left(sh) & mask;
    finish_logical(core, instr, result);
    Ok(())
}

fn slw(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let sh = core.gpr[instr.rb()] & 0x3F;
    let result = if sh > 31 {
        0
    } else {
        core.gpr[instr.rs()] << sh
    };
    finish_logical(core, instr, result);
    Ok(())
}

fn srw(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let sh = core.gpr[instr.rb()] & 0x3F;
    let result = if sh > 31 {
        0
    } else {
        core.gpr[instr.rs()] >> sh
    };
    finish_logical(core, instr, result);
    Ok(())
}

fn shift_right_algebraic(core: &mut Core, instr: Instruction, sh: u32) {
    let value = core.gpr[instr.rs()] as i32;

    let (result, carry) = if sh > 31 {
        ((value >> 31) as u32, value < 0)
    } else {
        let shifted_out = value as u32 & ((1u32 << sh) - 1);
        (((value >> sh) as u32), value < 0 && shifted_out != 0)
    };

    core.xer.set_ca(carry);
    finish_logical(core, instr, result);
}

fn sraw(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let sh = core.gpr[instr.rb()] & 0x3F;
    shift_right_algebraic(core, instr, sh);
    Ok(())
}

fn srawi(core: &mut Core, _mem: &Memory, instr: Instruction) -> Result<()> {
    let sh = instr.sh();
    shift_right_algebraic(core, instr, sh);
    Ok(())
}
