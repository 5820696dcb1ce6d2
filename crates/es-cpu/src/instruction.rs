//! The 32-bit instruction word

use crate::fields::{decode_spr, encode_spr, InstructionField};

/// A raw 32-bit Espresso instruction word.
///
/// Field access is explicit mask-and-shift through the field layout
/// table; there is no overlapping storage. The SPR selector is the one
/// field that is not a plain contiguous span: its two 5-bit halves are
/// stored swapped and are reassembled on extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction(pub u32);

impl Instruction {
    /// Extract the value of a physical field.
    ///
    /// Panics if called on a marker field.
    pub fn field(self, field: InstructionField) -> u32 {
        let raw = (self.0 & field.bitmask()) >> field.start();
        if field == InstructionField::Spr {
            decode_spr(raw)
        } else {
            raw
        }
    }

    /// Insert a value into a physical field, replacing its old contents.
    ///
    /// Panics if called on a marker field.
    pub fn set_field(&mut self, field: InstructionField, value: u32) {
        let value = if field == InstructionField::Spr {
            encode_spr(value)
        } else {
            value
        };
        let mask = field.bitmask();
        self.0 = (self.0 & !mask) | ((value << field.start()) & mask);
    }

    // Shorthand accessors for the fields the interpreter and verifier
    // touch constantly.

    pub fn rd(self) -> usize {
        self.field(InstructionField::RD) as usize
    }

    pub fn rs(self) -> usize {
        self.field(InstructionField::RS) as usize
    }

    pub fn ra(self) -> usize {
        self.field(InstructionField::RA) as usize
    }

    pub fn rb(self) -> usize {
        self.field(InstructionField::RB) as usize
    }

    pub fn frd(self) -> usize {
        self.field(InstructionField::FrD) as usize
    }

    pub fn frs(self) -> usize {
        self.field(InstructionField::FrS) as usize
    }

    pub fn frb(self) -> usize {
        self.field(InstructionField::FrB) as usize
    }

    pub fn crfd(self) -> usize {
        self.field(InstructionField::CrfD) as usize
    }

    pub fn crfs(self) -> usize {
        self.field(InstructionField::CrfS) as usize
    }

    pub fn crbd(self) -> usize {
        self.field(InstructionField::CrbD) as usize
    }

    pub fn crba(self) -> usize {
        self.field(InstructionField::CrbA) as usize
    }

    pub fn crbb(self) -> usize {
        self.field(InstructionField::CrbB) as usize
    }

    pub fn bo(self) -> u32 {
        self.field(InstructionField::Bo)
    }

    pub fn bi(self) -> u32 {
        self.field(InstructionField::Bi)
    }

    pub fn sh(self) -> u32 {
        self.field(InstructionField::Sh)
    }

    pub fn mb(self) -> u32 {
        self.field(InstructionField::Mb)
    }

    pub fn me(self) -> u32 {
        self.field(InstructionField::Me)
    }

    pub fn nb(self) -> u32 {
        self.field(InstructionField::Nb)
    }

    pub fn crm(self) -> u32 {
        self.field(InstructionField::Crm)
    }

    /// Deinterleaved SPR number
    pub fn spr(self) -> u32 {
        self.field(InstructionField::Spr)
    }

    /// Raw time base register number
    pub fn tbr(self) -> u32 {
        self.field(InstructionField::Tbr)
    }

    /// Sign-extended 16-bit displacement
    pub fn d(self) -> i32 {
        self.field(InstructionField::D) as i16 as i32
    }

    /// Sign-extended 16-bit immediate
    pub fn simm(self) -> i32 {
        self.field(InstructionField::Simm) as i16 as i32
    }

    pub fn uimm(self) -> u32 {
        self.field(InstructionField::Uimm)
    }

    /// Sign-extended 12-bit paired-single displacement
    pub fn qd(self) -> i32 {
        sign_extend(self.field(InstructionField::Qd), 12)
    }

    pub fn rc(self) -> bool {
        self.field(InstructionField::Rc) != 0
    }

    pub fn oe(self) -> bool {
        self.field(InstructionField::Oe) != 0
    }

    pub fn aa(self) -> bool {
        self.field(InstructionField::Aa) != 0
    }

    pub fn lk(self) -> bool {
        self.field(InstructionField::Lk) != 0
    }
}

impl From<u32> for Instruction {
    fn from(word: u32) -> Self {
        Self(word)
    }
}

/// Sign extend the low `bits` bits of `value`
pub fn sign_extend(value: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((value << shift) as i32) >> shift
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::InstructionField as F;

    #[test]
    fn test_field_extraction() {
        // addi r3, r1, 8
        let instr = Instruction(0x38610008);
        assert_eq!(instr.field(F::Opcd), 14);
        assert_eq!(instr.rd(), 3);
        assert_eq!(instr.ra(), 1);
        assert_eq!(instr.simm(), 8);
    }

    #[test]
    fn test_field_insertion() {
        let mut instr = Instruction(0);
        instr.set_field(F::Opcd, 14);
        instr.set_field(F::RD, 3);
        instr.set_field(F::RA, 1);
        instr.set_field(F::Simm, 8);
        assert_eq!(instr.0, 0x38610008);
    }

    #[test]
    fn test_spr_field_interleaves() {
        // mfspr rD, LR encodes SPR 8 with the halves swapped
        let mut instr = Instruction(0);
        instr.set_field(F::Spr, 8);
        assert_eq!(instr.field(F::Spr), 8);
        assert_eq!((instr.0 & F::Spr.bitmask()) >> F::Spr.start(), 0x100);
    }

    #[test]
    fn test_sign_extend() {
        assert_eq!(sign_extend(0xFFFF, 16), -1);
        assert_eq!(sign_extend(0x7FFF, 16), 0x7FFF);
        assert_eq!(sign_extend(0x800, 12), -2048);
        assert_eq!(sign_extend(5, 12), 5);
    }
}
