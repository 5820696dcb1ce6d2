//! Espresso register state
//!
//! [`Core`] is the full architectural state of one core. It is a plain
//! value type so the verifier can snapshot it with a copy and compare
//! snapshots field by field.

use bitflags::bitflags;

bitflags! {
    /// Value of one 4-bit condition register field. The floating-point
    /// and compare interpretations share the same bit positions.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ConditionRegisterFlag: u32 {
        const SUMMARY_OVERFLOW = 1 << 0;
        const ZERO = 1 << 1;
        const POSITIVE = 1 << 2;
        const NEGATIVE = 1 << 3;

        const UNORDERED = Self::SUMMARY_OVERFLOW.bits();
        const EQUAL = Self::ZERO.bits();
        const GREATER_THAN = Self::POSITIVE.bits();
        const LESS_THAN = Self::NEGATIVE.bits();
    }
}

bitflags! {
    /// FPSCR exception and status bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FpscrFlags: u32 {
        const VXCVI = 1 << 8;
        const VXSQRT = 1 << 9;
        const VXSOFT = 1 << 10;
        const VXVC = 1 << 19;
        const VXIMZ = 1 << 20;
        const VXZDZ = 1 << 21;
        const VXIDI = 1 << 22;
        const VXISI = 1 << 23;
        const VXSNAN = 1 << 24;
        const XX = 1 << 25;
        const ZX = 1 << 26;
        const UX = 1 << 27;
        const OX = 1 << 28;
        const VX = 1 << 29;
        const FEX = 1 << 30;
        const FX = 1u32 << 31;

        const ALL_VX = Self::VXSNAN.bits() | Self::VXISI.bits() | Self::VXIDI.bits()
            | Self::VXZDZ.bits() | Self::VXIMZ.bits() | Self::VXVC.bits()
            | Self::VXSOFT.bits() | Self::VXSQRT.bits() | Self::VXCVI.bits();
        const ALL_EXCEPTIONS = Self::ALL_VX.bits() | Self::OX.bits() | Self::UX.bits()
            | Self::ZX.bits() | Self::XX.bits();
    }
}

/// FPSCR FPRF field, bits 12..=16
pub const FPSCR_FPRF: u32 = 0x1F << 12;
/// FPSCR FI bit
pub const FPSCR_FI: u32 = 1 << 17;
/// FPSCR FR bit
pub const FPSCR_FR: u32 = 1 << 18;

/// One floating-point register as a paired single. `ps0` holds the full
/// double image so scalar loads keep their precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FprPair {
    pub ps0: u64,
    pub ps1: u64,
}

impl FprPair {
    pub fn ps0_f64(&self) -> f64 {
        f64::from_bits(self.ps0)
    }

    pub fn ps1_f64(&self) -> f64 {
        f64::from_bits(self.ps1)
    }

    pub fn set_ps0_f64(&mut self, value: f64) {
        self.ps0 = value.to_bits();
    }

    pub fn set_ps1_f64(&mut self, value: f64) {
        self.ps1 = value.to_bits();
    }
}

/// Quantised element type stored in a GQR type field.
///
/// Values 1 to 3 are reserved and behave as `Floating`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantizedType {
    Floating,
    Unsigned8,
    Unsigned16,
    Signed8,
    Signed16,
}

impl QuantizedType {
    pub fn from_raw(raw: u32) -> Self {
        match raw & 0x7 {
            4 => QuantizedType::Unsigned8,
            5 => QuantizedType::Unsigned16,
            6 => QuantizedType::Signed8,
            7 => QuantizedType::Signed16,
            _ => QuantizedType::Floating,
        }
    }

    /// Size in bytes of one stored element
    pub fn size(&self) -> u32 {
        match self {
            QuantizedType::Floating => 4,
            QuantizedType::Unsigned8 | QuantizedType::Signed8 => 1,
            QuantizedType::Unsigned16 | QuantizedType::Signed16 => 2,
        }
    }
}

/// Graphics quantisation register
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gqr(pub u32);

impl Gqr {
    pub fn st_type(&self) -> QuantizedType {
        QuantizedType::from_raw(self.0 & 0x7)
    }

    pub fn st_scale(&self) -> u32 {
        (self.0 >> 8) & 0x3F
    }

    pub fn ld_type(&self) -> QuantizedType {
        QuantizedType::from_raw((self.0 >> 16) & 0x7)
    }

    pub fn ld_scale(&self) -> u32 {
        (self.0 >> 24) & 0x3F
    }
}

/// Fixed-point exception register
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Xer(pub u32);

impl Xer {
    pub fn ca(&self) -> bool {
        self.0 & (1 << 29) != 0
    }

    pub fn set_ca(&mut self, value: bool) {
        self.0 = (self.0 & !(1 << 29)) | ((value as u32) << 29);
    }

    pub fn ov(&self) -> bool {
        self.0 & (1 << 30) != 0
    }

    pub fn so(&self) -> bool {
        self.0 & (1 << 31) != 0
    }

    pub fn set_overflow(&mut self, value: bool) {
        if value {
            self.0 |= (1 << 30) | (1 << 31);
        } else {
            self.0 &= !(1 << 30);
        }
    }

    /// Byte count consumed by lswx and stswx
    pub fn byte_count(&self) -> u32 {
        self.0 & 0x7F
    }

    /// Top four bits, moved to a CR field by mcrxr
    pub fn crxr(&self) -> u32 {
        self.0 >> 28
    }
}

/// Architectural state of one core
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Core {
    pub id: u32,

    /// Address of the instruction currently executing
    pub cia: u32,
    /// Address of the next instruction
    pub nia: u32,

    pub gpr: [u32; 32],
    pub fpr: [FprPair; 32],
    pub gqr: [Gqr; 8],

    pub cr: u32,
    pub lr: u32,
    pub ctr: u32,
    pub xer: Xer,
    pub msr: u32,
    pub fpscr: u32,

    pub tb: u64,

    pub reserve: bool,
    pub reserve_address: u32,
    pub reserve_data: u32,
}

impl Core {
    pub fn new(id: u32) -> Self {
        Core {
            id,
            cia: 0,
            nia: 0,
            gpr: [0; 32],
            fpr: [FprPair::default(); 32],
            gqr: [Gqr::default(); 8],
            cr: 0,
            lr: 0,
            ctr: 0,
            xer: Xer::default(),
            msr: 0,
            fpscr: 0,
            tb: 0,
            reserve: false,
            reserve_address: 0,
            reserve_data: 0,
        }
    }

    /// Value of condition register field `field`, cr0 being the most
    /// significant nibble
    pub fn crf(&self, field: usize) -> u32 {
        debug_assert!(field < 8);
        (self.cr >> (28 - field * 4)) & 0xF
    }

    pub fn set_crf(&mut self, field: usize, value: u32) {
        debug_assert!(field < 8);
        let shift = 28 - field * 4;
        self.cr = (self.cr & !(0xF << shift)) | ((value & 0xF) << shift);
    }

    /// Condition register bit, numbered from the most significant bit
    pub fn crb(&self, bit: usize) -> u32 {
        debug_assert!(bit < 32);
        (self.cr >> (31 - bit)) & 1
    }

    pub fn set_crb(&mut self, bit: usize, value: u32) {
        debug_assert!(bit < 32);
        let shift = 31 - bit;
        self.cr = (self.cr & !(1 << shift)) | ((value & 1) << shift);
    }

    /// Set cr0 from a signed result and the sticky XER[SO] bit
    pub fn update_cr0(&mut self, result: u32) {
        let mut flags = if (result as i32) < 0 {
            ConditionRegisterFlag::NEGATIVE
        } else if result == 0 {
            ConditionRegisterFlag::ZERO
        } else {
            ConditionRegisterFlag::POSITIVE
        };

        if self.xer.so() {
            flags |= ConditionRegisterFlag::SUMMARY_OVERFLOW;
        }

        self.set_crf(0, flags.bits());
    }

    /// Set the FPSCR FPCC field (low four bits of FPRF)
    pub fn set_fpcc(&mut self, value: u32) {
        self.fpscr = (self.fpscr & !(0xF << 12)) | ((value & 0xF) << 12);
    }
}

impl Default for Core {
    fn default() -> Self {
        Core::new(0)
    }
}
