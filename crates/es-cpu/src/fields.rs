//! Instruction field layout table
//!
//! Fields are authored in the PowerPC manual's bit numbering, where bit 0
//! is the most significant bit of the 32-bit word. The accessors translate
//! that into LSB-relative shift positions, which is what the decoder,
//! encoder and disassembler actually work with.
//!
//! Marker fields carry no physical bits; they only record implicit
//! register touches (for example "this instruction reads LR") and must
//! never be asked for a bit position.

/// A named bit-field of the 32-bit instruction word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstructionField {
    // Opcode discriminants
    Opcd,
    Xo1,
    Xo2,
    Xo3,
    Xo4,

    // Operand fields
    Aa,
    Bd,
    Bi,
    Bo,
    CrbA,
    CrbB,
    CrbD,
    CrfD,
    CrfS,
    Crm,
    D,
    Fm,
    FrA,
    FrB,
    FrC,
    FrD,
    FrS,
    Frc,
    I,
    Imm,
    Kcn,
    L,
    Li,
    Lk,
    Mb,
    Me,
    Nb,
    Oe,
    Qd,
    Qi,
    Qw,
    RA,
    RB,
    Rc,
    RD,
    RS,
    Sh,
    Simm,
    Spr,
    Sr,
    Tbr,
    To,
    Uimm,
    W,

    // Reserved ranges that must decode as zero
    Rsv6,
    Rsv6_9,
    Rsv6_10,
    Rsv9,
    Rsv9_10,
    Rsv11,
    Rsv11_15,
    Rsv14_15,
    Rsv15,
    Rsv16_20,
    Rsv16_29,
    Rsv20,
    Rsv30,
    Rsv31,

    // Marker fields: implicit register touches, no physical bits
    Aoe,
    Arc,
    Cr0,
    Cr1,
    Ctr,
    FcrIdi,
    FcrIsi,
    FcrSnan,
    FcrZdz,
    Fprf,
    Fpscr,
    Lr,
    Ps,
    Rsrv,
    XerC,
    XerO,
    XerSo,
}

impl InstructionField {
    /// Bit span in manual numbering (bit 0 = MSB), or None for markers
    fn msb_span(self) -> Option<(u32, u32)> {
        use InstructionField::*;
        let span = match self {
            Opcd => (0, 5),
            Xo1 => (21, 30),
            Xo2 => (22, 30),
            Xo3 => (25, 30),
            Xo4 => (26, 30),
            Aa => (30, 30),
            Bd => (16, 29),
            Bi => (11, 15),
            Bo => (6, 10),
            CrbA => (11, 15),
            CrbB => (16, 20),
            CrbD => (6, 10),
            CrfD => (6, 8),
            CrfS => (11, 13),
            Crm => (12, 19),
            D => (16, 31),
            Fm => (7, 14),
            FrA => (11, 15),
            FrB => (16, 20),
            FrC => (21, 25),
            FrD => (6, 10),
            FrS => (6, 10),
            Frc => (31, 31),
            I => (17, 19),
            Imm => (16, 19),
            Kcn => (6, 30),
            L => (10, 10),
            Li => (6, 29),
            Lk => (31, 31),
            Mb => (21, 25),
            Me => (26, 30),
            Nb => (16, 20),
            Oe => (21, 21),
            Qd => (20, 31),
            Qi => (22, 24),
            Qw => (21, 21),
            RA => (11, 15),
            RB => (16, 20),
            Rc => (31, 31),
            RD => (6, 10),
            RS => (6, 10),
            Sh => (16, 20),
            Simm => (16, 31),
            Spr => (11, 20),
            Sr => (12, 15),
            Tbr => (11, 20),
            To => (6, 10),
            Uimm => (16, 31),
            W => (16, 16),
            Rsv6 => (6, 6),
            Rsv6_9 => (6, 9),
            Rsv6_10 => (6, 10),
            Rsv9 => (9, 9),
            Rsv9_10 => (9, 10),
            Rsv11 => (11, 11),
            Rsv11_15 => (11, 15),
            Rsv14_15 => (14, 15),
            Rsv15 => (15, 15),
            Rsv16_20 => (16, 20),
            Rsv16_29 => (16, 29),
            Rsv20 => (20, 20),
            Rsv30 => (30, 30),
            Rsv31 => (31, 31),
            Aoe | Arc | Cr0 | Cr1 | Ctr | FcrIdi | FcrIsi | FcrSnan | FcrZdz | Fprf | Fpscr
            | Lr | Ps | Rsrv | XerC | XerO | XerSo => return None,
        };
        Some(span)
    }

    /// True for bookkeeping-only fields with no physical bit position
    pub fn is_marker(self) -> bool {
        self.msb_span().is_none()
    }

    fn span_or_panic(self) -> (u32, u32) {
        self.msb_span()
            .unwrap_or_else(|| panic!("bit position requested for marker field {:?}", self))
    }

    /// First bit of the field as a shift distance from the LSB
    pub fn start(self) -> u32 {
        let (_, last) = self.span_or_panic();
        31 - last
    }

    /// Last bit of the field as a shift distance from the LSB
    pub fn end(self) -> u32 {
        let (first, _) = self.span_or_panic();
        31 - first
    }

    /// Width of the field in bits
    pub fn width(self) -> u32 {
        self.end() - self.start() + 1
    }

    /// Absolute bitmask of the field within the instruction word
    pub fn bitmask(self) -> u32 {
        let width = self.width();
        let mask = if width == 32 { u32::MAX } else { (1 << width) - 1 };
        mask << self.start()
    }
}

/// Reassemble the 10-bit SPR selector from its interleaved encoding.
///
/// The instruction word stores the selector as two swapped 5-bit halves.
pub fn decode_spr(raw: u32) -> u32 {
    ((raw << 5) & 0x3E0) | ((raw >> 5) & 0x1F)
}

/// Exact inverse of [`decode_spr`]
pub fn encode_spr(spr: u32) -> u32 {
    ((spr << 5) & 0x3E0) | ((spr >> 5) & 0x1F)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PHYSICAL: &[InstructionField] = &[
        InstructionField::Opcd,
        InstructionField::Xo1,
        InstructionField::Xo2,
        InstructionField::Xo3,
        InstructionField::Xo4,
        InstructionField::Aa,
        InstructionField::Bd,
        InstructionField::Bi,
        InstructionField::Bo,
        InstructionField::CrbA,
        InstructionField::CrbB,
        InstructionField::CrbD,
        InstructionField::CrfD,
        InstructionField::CrfS,
        InstructionField::Crm,
        InstructionField::D,
        InstructionField::Fm,
        InstructionField::FrA,
        InstructionField::FrB,
        InstructionField::FrC,
        InstructionField::FrD,
        InstructionField::FrS,
        InstructionField::Frc,
        InstructionField::I,
        InstructionField::Imm,
        InstructionField::Kcn,
        InstructionField::L,
        InstructionField::Li,
        InstructionField::Lk,
        InstructionField::Mb,
        InstructionField::Me,
        InstructionField::Nb,
        InstructionField::Oe,
        InstructionField::Qd,
        InstructionField::Qi,
        InstructionField::Qw,
        InstructionField::RA,
        InstructionField::RB,
        InstructionField::Rc,
        InstructionField::RD,
        InstructionField::RS,
        InstructionField::Sh,
        InstructionField::Simm,
        InstructionField::Spr,
        InstructionField::Sr,
        InstructionField::Tbr,
        InstructionField::To,
        InstructionField::Uimm,
        InstructionField::W,
        InstructionField::Rsv6,
        InstructionField::Rsv16_20,
        InstructionField::Rsv16_29,
        InstructionField::Rsv31,
    ];

    #[test]
    fn test_field_invariants() {
        for &field in ALL_PHYSICAL {
            assert!(field.start() <= field.end(), "{:?}", field);
            assert!(field.end() < 32, "{:?}", field);
            assert_eq!(field.width(), field.end() - field.start() + 1, "{:?}", field);
            assert_eq!(
                field.bitmask().count_ones(),
                field.width(),
                "{:?}",
                field
            );
        }
    }

    #[test]
    fn test_known_positions() {
        // opcd occupies the top six bits
        assert_eq!(InstructionField::Opcd.start(), 26);
        assert_eq!(InstructionField::Opcd.bitmask(), 0xFC00_0000);
        // rc is the bottom bit
        assert_eq!(InstructionField::Rc.start(), 0);
        assert_eq!(InstructionField::Rc.bitmask(), 1);
        // rD sits below opcd
        assert_eq!(InstructionField::RD.start(), 21);
        assert_eq!(InstructionField::RD.width(), 5);
        // d is the low halfword
        assert_eq!(InstructionField::D.bitmask(), 0xFFFF);
    }

    #[test]
    fn test_marker_detection() {
        assert!(InstructionField::Lr.is_marker());
        assert!(InstructionField::XerC.is_marker());
        assert!(!InstructionField::RA.is_marker());
    }

    #[test]
    #[should_panic(expected = "marker field")]
    fn test_marker_position_panics() {
        let _ = InstructionField::Lr.start();
    }

    #[test]
    fn test_spr_interleave_round_trip() {
        for spr in 0..1024 {
            assert_eq!(decode_spr(encode_spr(spr)), spr);
        }
        // LR is SPR 8: halves swapped in the raw field
        assert_eq!(encode_spr(8), 0x100);
        assert_eq!(decode_spr(0x100), 8);
    }
}
