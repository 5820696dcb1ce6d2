//! Espresso instruction catalog
//!
//! One [`InstructionInfo`] record per instruction: the opcode pattern used
//! to build the decode trie, the fields read and written (including marker
//! fields for implicit register touches), and the flag fields that modify
//! the displayed mnemonic. The alias list provides friendlier mnemonics
//! for common encodings and is only consulted by the disassembler.
//!
//! The tables are plain data built by [`build_instruction_infos`] and
//! [`build_aliases`]; nothing here is lazily initialised.

use crate::fields::InstructionField;

/// Unique identifier for each Espresso instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InstructionId {
    // Integer arithmetic
    Add,
    Addc,
    Adde,
    Addi,
    Addic,
    Addicx,
    Addis,
    Addme,
    Addze,
    Divw,
    Divwu,
    Mulhw,
    Mulhwu,
    Mulli,
    Mullw,
    Neg,
    Subf,
    Subfc,
    Subfe,
    Subfic,
    Subfme,
    Subfze,
    // Integer compare
    Cmp,
    Cmpi,
    Cmpl,
    Cmpli,
    // Integer logical
    And,
    Andc,
    Andi,
    Andis,
    Cntlzw,
    Eqv,
    Extsb,
    Extsh,
    Nand,
    Nor,
    Or,
    Orc,
    Ori,
    Oris,
    Xor,
    Xori,
    Xoris,
    // Integer rotate
    Rlwimi,
    Rlwinm,
    Rlwnm,
    // Integer shift
    Slw,
    Sraw,
    Srawi,
    Srw,
    // Floating-point arithmetic
    Fadd,
    Fadds,
    Fdiv,
    Fdivs,
    Fmul,
    Fmuls,
    Fres,
    Frsqrte,
    Fsub,
    Fsubs,
    Fsel,
    // Floating-point multiply-add
    Fmadd,
    Fmadds,
    Fmsub,
    Fmsubs,
    Fnmadd,
    Fnmadds,
    Fnmsub,
    Fnmsubs,
    // Floating-point rounding and conversion
    Fctiw,
    Fctiwz,
    Frsp,
    // Floating-point compare
    Fcmpo,
    Fcmpu,
    // Floating-point status and control register
    Mcrfs,
    Mffs,
    Mtfsb0,
    Mtfsb1,
    Mtfsf,
    Mtfsfi,
    // Integer load
    Lbz,
    Lbzu,
    Lbzx,
    Lbzux,
    Lha,
    Lhau,
    Lhax,
    Lhaux,
    Lhz,
    Lhzu,
    Lhzx,
    Lhzux,
    Lwz,
    Lwzu,
    Lwzx,
    Lwzux,
    // Integer store
    Stb,
    Stbu,
    Stbx,
    Stbux,
    Sth,
    Sthu,
    Sthx,
    Sthux,
    Stw,
    Stwu,
    Stwx,
    Stwux,
    // Integer load and store with byte reverse
    Lhbrx,
    Lwbrx,
    Sthbrx,
    Stwbrx,
    // Integer load and store multiple
    Lmw,
    Stmw,
    // Integer load and store string
    Lswi,
    Lswx,
    Stswi,
    Stswx,
    // Memory synchronisation
    Eieio,
    Isync,
    Lwarx,
    Stwcx,
    Sync,
    // Floating-point load
    Lfd,
    Lfdu,
    Lfdx,
    Lfdux,
    Lfs,
    Lfsu,
    Lfsx,
    Lfsux,
    // Floating-point store
    Stfd,
    Stfdu,
    Stfdx,
    Stfdux,
    Stfiwx,
    Stfs,
    Stfsu,
    Stfsx,
    Stfsux,
    // Floating-point move
    Fabs,
    Fmr,
    Fnabs,
    Fneg,
    // Branch
    B,
    Bc,
    Bcctr,
    Bclr,
    // Condition register logical
    Crand,
    Crandc,
    Creqv,
    Crnand,
    Crnor,
    Cror,
    Crorc,
    Crxor,
    Mcrf,
    // System linkage
    Rfi,
    Kc,
    Sc,
    // Trap
    Tw,
    Twi,
    // Processor control
    Mcrxr,
    Mfcr,
    Mfmsr,
    Mfspr,
    Mftb,
    Mtcrf,
    Mtmsr,
    Mtspr,
    // Cache management
    Dcbf,
    Dcbi,
    Dcbst,
    Dcbt,
    Dcbtst,
    Dcbz,
    Icbi,
    DcbzL,
    // Segment register manipulation
    Mfsr,
    Mfsrin,
    Mtsr,
    Mtsrin,
    // Lookaside buffer management
    Tlbie,
    Tlbsync,
    // External control
    Eciwx,
    Ecowx,
    // Paired-single load and store
    PsqL,
    PsqLu,
    PsqLx,
    PsqLux,
    PsqSt,
    PsqStu,
    PsqStx,
    PsqStux,
    // Paired-single arithmetic
    PsAdd,
    PsDiv,
    PsMul,
    PsSub,
    PsAbs,
    PsNabs,
    PsNeg,
    PsSel,
    PsRes,
    PsRsqrte,
    PsMsub,
    PsMadd,
    PsNmsub,
    PsNmadd,
    PsMr,
    PsSum0,
    PsSum1,
    PsMuls0,
    PsMuls1,
    PsMadds0,
    PsMadds1,
    PsCmpu0,
    PsCmpo0,
    PsCmpu1,
    PsCmpo1,
    PsMerge00,
    PsMerge01,
    PsMerge10,
    PsMerge11,
}

impl InstructionId {
    /// Number of catalogued instructions
    pub const COUNT: usize = InstructionId::PsMerge11 as usize + 1;
}

/// One constraint of an instruction's or alias's opcode pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionOpcode {
    /// Field must equal a constant
    Constant {
        field: InstructionField,
        value: u32,
    },
    /// Field must equal another field's extracted value (aliases only)
    FieldEquals {
        field: InstructionField,
        other: InstructionField,
    },
}

/// Identity record for one instruction
#[derive(Debug, Clone)]
pub struct InstructionInfo {
    pub id: InstructionId,
    pub name: &'static str,
    pub fullname: &'static str,
    /// Ordered pattern; order determines decode-trie depth
    pub opcode: Vec<InstructionOpcode>,
    pub read: Vec<InstructionField>,
    pub write: Vec<InstructionField>,
    /// Flag fields that append a mnemonic suffix when set
    pub flags: Vec<InstructionField>,
}

/// A friendlier display mnemonic for a subset of one instruction's
/// encodings
#[derive(Debug, Clone)]
pub struct InstructionAlias {
    pub name: &'static str,
    pub id: InstructionId,
    pub opcode: Vec<InstructionOpcode>,
}

macro_rules! op {
    (! $f:ident) => {
        InstructionOpcode::Constant {
            field: InstructionField::$f,
            value: 0,
        }
    };
    ($f:ident == $v:expr) => {
        InstructionOpcode::Constant {
            field: InstructionField::$f,
            value: $v,
        }
    };
    ($f:ident eq $g:ident) => {
        InstructionOpcode::FieldEquals {
            field: InstructionField::$f,
            other: InstructionField::$g,
        }
    };
}

macro_rules! ins {
    ($infos:ident, $id:ident, $name:expr, $full:expr,
     w($($w:ident),*), r($($r:ident),*), f($($f:ident),*),
     $(($($pat:tt)+)),+) => {
        $infos.push(InstructionInfo {
            id: InstructionId::$id,
            name: $name,
            fullname: $full,
            opcode: vec![$(op!($($pat)+)),+],
            read: vec![$(InstructionField::$r),*],
            write: vec![$(InstructionField::$w),*],
            flags: vec![$(InstructionField::$f),*],
        });
    };
}

macro_rules! alias {
    ($list:ident, $name:expr, $id:ident, $(($($pat:tt)+)),+) => {
        $list.push(InstructionAlias {
            name: $name,
            id: InstructionId::$id,
            opcode: vec![$(op!($($pat)+)),+],
        });
    };
}

/// Build the full instruction catalog in id order.
pub fn build_instruction_infos() -> Vec<InstructionInfo> {
    let mut infos = Vec::with_capacity(InstructionId::COUNT);

    // Integer arithmetic
    ins!(infos, Add, "add", "Add", w(RD), r(RA, RB), f(Oe, Rc), (Opcd == 31), (Xo2 == 266));
    ins!(infos, Addc, "addc", "Add with Carry", w(RD, XerC), r(RA, RB), f(Oe, Rc), (Opcd == 31), (Xo2 == 10));
    ins!(infos, Adde, "adde", "Add Extended", w(RD), r(RA, RB, XerC), f(Oe, Rc), (Opcd == 31), (Xo2 == 138));
    ins!(infos, Addi, "addi", "Add Immediate", w(RD), r(RA, Simm), f(), (Opcd == 14));
    ins!(infos, Addic, "addic", "Add Immediate with Carry", w(RD, XerC), r(RA, Simm), f(), (Opcd == 12));
    ins!(infos, Addicx, "addicx", "Add Immediate with Carry and Record", w(RD, XerC), r(RA, Simm), f(Aoe, Arc), (Opcd == 13));
    ins!(infos, Addis, "addis", "Add Immediate Shifted", w(RD), r(RA, Simm), f(), (Opcd == 15));
    ins!(infos, Addme, "addme", "Add to Minus One Extended", w(RD), r(RA, XerC), f(Oe, Rc), (Opcd == 31), (Xo2 == 234), (!Rsv16_20));
    ins!(infos, Addze, "addze", "Add to Zero Extended", w(RD), r(RA, XerC), f(Oe, Rc), (Opcd == 31), (Xo2 == 202), (!Rsv16_20));
    ins!(infos, Divw, "divw", "Divide Word", w(RD), r(RA, RB), f(Oe, Rc), (Opcd == 31), (Xo2 == 491));
    ins!(infos, Divwu, "divwu", "Divide Word Unsigned", w(RD), r(RA, RB), f(Oe, Rc), (Opcd == 31), (Xo2 == 459));
    ins!(infos, Mulhw, "mulhw", "Multiply High Word", w(RD), r(RA, RB), f(Rc), (Opcd == 31), (Xo2 == 75));
    ins!(infos, Mulhwu, "mulhwu", "Multiply High Word Unsigned", w(RD), r(RA, RB), f(Rc), (Opcd == 31), (Xo2 == 11));
    ins!(infos, Mulli, "mulli", "Multiply Low Immediate", w(RD), r(RA, Simm), f(), (Opcd == 7));
    ins!(infos, Mullw, "mullw", "Multiply Low Word", w(RD), r(RA, RB), f(Oe, Rc), (Opcd == 31), (Xo2 == 235));
    ins!(infos, Neg, "neg", "Negate", w(RD), r(RA), f(Oe, Rc), (Opcd == 31), (Xo2 == 104), (!Rsv16_20));
    ins!(infos, Subf, "subf", "Subtract From", w(RD), r(RA, RB), f(Oe, Rc), (Opcd == 31), (Xo2 == 40));
    ins!(infos, Subfc, "subfc", "Subtract From with Carry", w(RD), r(RA, RB), f(Oe, Rc), (Opcd == 31), (Xo2 == 8));
    ins!(infos, Subfe, "subfe", "Subtract From Extended", w(RD), r(RA, RB, XerC), f(Oe, Rc), (Opcd == 31), (Xo2 == 136));
    ins!(infos, Subfic, "subfic", "Subtract From Immediate with Carry", w(RD, XerC), r(RA, Simm), f(), (Opcd == 8));
    ins!(infos, Subfme, "subfme", "Subtract From Minus One Extended", w(RD), r(RA, XerC), f(Oe, Rc), (Opcd == 31), (Xo2 == 232), (!Rsv16_20));
    ins!(infos, Subfze, "subfze", "Subtract From Zero Extended", w(RD), r(RA, XerC), f(Oe, Rc), (Opcd == 31), (Xo2 == 200), (!Rsv16_20));

    // Integer compare
    ins!(infos, Cmp, "cmp", "Compare", w(CrfD), r(RA, RB, XerSo), f(L), (Opcd == 31), (Xo1 == 0), (!Rsv9), (!Rsv31));
    ins!(infos, Cmpi, "cmpi", "Compare Immediate", w(CrfD), r(RA, Simm, XerSo), f(L), (Opcd == 11), (!Rsv9));
    ins!(infos, Cmpl, "cmpl", "Compare Logical", w(CrfD), r(RA, RB, XerSo), f(L), (Opcd == 31), (Xo1 == 32), (!Rsv9), (!Rsv31));
    ins!(infos, Cmpli, "cmpli", "Compare Logical Immediate", w(CrfD), r(RA, Uimm, XerSo), f(L), (Opcd == 10), (!Rsv9));

    // Integer logical
    ins!(infos, And, "and", "AND", w(RA), r(RS, RB), f(Rc), (Opcd == 31), (Xo1 == 28));
    ins!(infos, Andc, "andc", "AND with Complement", w(RA), r(RS, RB), f(Rc), (Opcd == 31), (Xo1 == 60));
    ins!(infos, Andi, "andi", "AND Immediate", w(RA), r(RS, Uimm), f(Aoe, Arc), (Opcd == 28));
    ins!(infos, Andis, "andis", "AND Immediate Shifted", w(RA), r(RS, Uimm), f(Aoe, Arc), (Opcd == 29));
    ins!(infos, Cntlzw, "cntlzw", "Count Leading Zeroes Word", w(RA), r(RS), f(Rc), (Opcd == 31), (Xo1 == 26), (!Rsv16_20));
    ins!(infos, Eqv, "eqv", "Equivalent", w(RA), r(RS, RB), f(Rc), (Opcd == 31), (Xo1 == 284));
    ins!(infos, Extsb, "extsb", "Extend Sign Byte", w(RA), r(RS), f(Rc), (Opcd == 31), (Xo1 == 954), (!Rsv16_20));
    ins!(infos, Extsh, "extsh", "Extend Sign Half Word", w(RA), r(RS), f(Rc), (Opcd == 31), (Xo1 == 922), (!Rsv16_20));
    ins!(infos, Nand, "nand", "NAND", w(RA), r(RS, RB), f(Rc), (Opcd == 31), (Xo1 == 476));
    ins!(infos, Nor, "nor", "NOR", w(RA), r(RS, RB), f(Rc), (Opcd == 31), (Xo1 == 124));
    ins!(infos, Or, "or", "OR", w(RA), r(RS, RB), f(Rc), (Opcd == 31), (Xo1 == 444));
    ins!(infos, Orc, "orc", "OR with Complement", w(RA), r(RS, RB), f(Rc), (Opcd == 31), (Xo1 == 412));
    ins!(infos, Ori, "ori", "OR Immediate", w(RA), r(RS, Uimm), f(), (Opcd == 24));
    ins!(infos, Oris, "oris", "OR Immediate Shifted", w(RA), r(RS, Uimm), f(), (Opcd == 25));
    ins!(infos, Xor, "xor", "XOR", w(RA), r(RS, RB), f(Rc), (Opcd == 31), (Xo1 == 316));
    ins!(infos, Xori, "xori", "XOR Immediate", w(RA), r(RS, Uimm), f(), (Opcd == 26));
    ins!(infos, Xoris, "xoris", "XOR Immediate Shifted", w(RA), r(RS, Uimm), f(), (Opcd == 27));

    // Integer rotate
    ins!(infos, Rlwimi, "rlwimi", "Rotate Left Word Immediate then Mask Insert", w(RA), r(RA, RS, Sh, Mb, Me), f(Rc), (Opcd == 20));
    ins!(infos, Rlwinm, "rlwinm", "Rotate Left Word Immediate then AND with Mask", w(RA), r(RS, Sh, Mb, Me), f(Rc), (Opcd == 21));
    ins!(infos, Rlwnm, "rlwnm", "Rotate Left Word then AND with Mask", w(RA), r(RS, RB, Mb, Me), f(Rc), (Opcd == 23));

    // Integer shift
    ins!(infos, Slw, "slw", "Shift Left Word", w(RA), r(RS, RB), f(Rc), (Opcd == 31), (Xo1 == 24));
    ins!(infos, Sraw, "sraw", "Shift Right Arithmetic Word", w(RA, XerC), r(RS, RB), f(Rc), (Opcd == 31), (Xo1 == 792));
    ins!(infos, Srawi, "srawi", "Shift Right Arithmetic Word Immediate", w(RA, XerC), r(RS, Sh), f(Rc), (Opcd == 31), (Xo1 == 824));
    ins!(infos, Srw, "srw", "Shift Right Word", w(RA), r(RS, RB), f(Rc), (Opcd == 31), (Xo1 == 536));

    // Floating-point arithmetic
    ins!(infos, Fadd, "fadd", "Floating Add", w(FrD, FcrIsi, FcrSnan), r(FrA, FrB), f(Frc), (Opcd == 63), (Xo4 == 21));
    ins!(infos, Fadds, "fadds", "Floating Add Single", w(FrD, FcrIsi, FcrSnan), r(FrA, FrB), f(Frc), (Opcd == 59), (Xo4 == 21));
    ins!(infos, Fdiv, "fdiv", "Floating Divide", w(FrD, FcrZdz, FcrIdi, FcrSnan), r(FrA, FrB), f(Frc), (Opcd == 63), (Xo4 == 18));
    ins!(infos, Fdivs, "fdivs", "Floating Divide Single", w(FrD), r(FrA, FrB), f(Frc), (Opcd == 59), (Xo4 == 18));
    ins!(infos, Fmul, "fmul", "Floating Multiply", w(FrD), r(FrA, FrC), f(Frc), (Opcd == 63), (Xo4 == 25));
    ins!(infos, Fmuls, "fmuls", "Floating Multiply Single", w(FrD), r(FrA, FrC), f(Frc), (Opcd == 59), (Xo4 == 25));
    ins!(infos, Fres, "fres", "Floating Reciprocal Estimate Single", w(FrD), r(FrB), f(Frc), (Opcd == 59), (Xo4 == 24));
    ins!(infos, Frsqrte, "frsqrte", "Floating Reciprocal Square Root Estimate", w(FrD), r(FrB), f(Frc), (Opcd == 63), (Xo4 == 26));
    ins!(infos, Fsub, "fsub", "Floating Sub", w(FrD), r(FrA, FrB), f(Frc), (Opcd == 63), (Xo4 == 20));
    ins!(infos, Fsubs, "fsubs", "Floating Sub Single", w(FrD), r(FrA, FrB), f(Frc), (Opcd == 59), (Xo4 == 20));
    ins!(infos, Fsel, "fsel", "Floating Select", w(FrD), r(FrA, FrB, FrC), f(Frc), (Opcd == 63), (Xo4 == 23));

    // Floating-point multiply-add
    ins!(infos, Fmadd, "fmadd", "Floating Multiply-Add", w(FrD), r(FrA, FrC, FrB), f(Rc), (Opcd == 63), (Xo4 == 29));
    ins!(infos, Fmadds, "fmadds", "Floating Multiply-Add Single", w(FrD), r(FrA, FrC, FrB), f(Rc), (Opcd == 59), (Xo4 == 29));
    ins!(infos, Fmsub, "fmsub", "Floating Multiply-Sub", w(FrD), r(FrA, FrC, FrB), f(Rc), (Opcd == 63), (Xo4 == 28));
    ins!(infos, Fmsubs, "fmsubs", "Floating Multiply-Sub Single", w(FrD), r(FrA, FrC, FrB), f(Rc), (Opcd == 59), (Xo4 == 28));
    ins!(infos, Fnmadd, "fnmadd", "Floating Negative Multiply-Add", w(FrD), r(FrA, FrC, FrB), f(Rc), (Opcd == 63), (Xo4 == 31));
    ins!(infos, Fnmadds, "fnmadds", "Floating Negative Multiply-Add Single", w(FrD), r(FrA, FrC, FrB), f(Rc), (Opcd == 59), (Xo4 == 31));
    ins!(infos, Fnmsub, "fnmsub", "Floating Negative Multiply-Sub", w(FrD), r(FrA, FrC, FrB), f(Rc), (Opcd == 63), (Xo4 == 30));
    ins!(infos, Fnmsubs, "fnmsubs", "Floating Negative Multiply-Sub Single", w(FrD), r(FrA, FrC, FrB), f(Rc), (Opcd == 59), (Xo4 == 30));

    // Floating-point rounding and conversion
    ins!(infos, Fctiw, "fctiw", "Floating Convert to Integer Word", w(FrD), r(FrB), f(Rc), (Opcd == 63), (Xo1 == 14));
    ins!(infos, Fctiwz, "fctiwz", "Floating Convert to Integer Word with Round toward Zero", w(FrD), r(FrB), f(Rc), (Opcd == 63), (Xo1 == 15));
    ins!(infos, Frsp, "frsp", "Floating Round to Single", w(FrD), r(FrB), f(Rc), (Opcd == 63), (Xo1 == 12));

    // Floating-point compare
    ins!(infos, Fcmpo, "fcmpo", "Floating Compare Ordered", w(CrfD), r(FrA, FrB), f(), (Opcd == 63), (Xo1 == 32), (!Rsv9_10), (!Rsv31));
    ins!(infos, Fcmpu, "fcmpu", "Floating Compare Unordered", w(CrfD), r(FrA, FrB), f(), (Opcd == 63), (Xo1 == 0), (!Rsv9_10), (!Rsv31));

    // Floating-point status and control register
    ins!(infos, Mcrfs, "mcrfs", "", w(CrfD), r(CrfS), f(), (Opcd == 63), (Xo1 == 64), (!Rsv9_10), (!Rsv14_15), (!Rsv16_20), (!Rsv31));
    ins!(infos, Mffs, "mffs", "", w(FrD), r(), f(Rc), (Opcd == 63), (Xo1 == 583), (!Rsv11_15), (!Rsv16_20));
    ins!(infos, Mtfsb0, "mtfsb0", "", w(), r(CrfD), f(Rc), (Opcd == 63), (Xo1 == 70), (!Rsv11_15), (!Rsv16_20));
    ins!(infos, Mtfsb1, "mtfsb1", "", w(), r(CrfD), f(Rc), (Opcd == 63), (Xo1 == 38), (!Rsv11_15), (!Rsv16_20));
    ins!(infos, Mtfsf, "mtfsf", "", w(), r(Fm, FrB), f(Rc), (Opcd == 63), (Xo1 == 711), (!Rsv6), (!Rsv15));
    ins!(infos, Mtfsfi, "mtfsfi", "", w(CrfD), r(), f(Rc, Imm), (Opcd == 63), (Xo1 == 134), (!Rsv9_10), (!Rsv11_15), (!Rsv20));

    // Integer load
    ins!(infos, Lbz, "lbz", "Load Byte and Zero", w(RD), r(RA, D), f(), (Opcd == 34));
    ins!(infos, Lbzu, "lbzu", "Load Byte and Zero with Update", w(RD, RA), r(RA, D), f(), (Opcd == 35));
    ins!(infos, Lbzx, "lbzx", "Load Byte and Zero Indexed", w(RD), r(RA, RB), f(), (Opcd == 31), (Xo1 == 87), (!Rsv31));
    ins!(infos, Lbzux, "lbzux", "Load Byte and Zero with Update Indexed", w(RD, RA), r(RA, RB), f(), (Opcd == 31), (Xo1 == 119), (!Rsv31));
    ins!(infos, Lha, "lha", "Load Half Word Algebraic", w(RD), r(RA, D), f(), (Opcd == 42));
    ins!(infos, Lhau, "lhau", "Load Half Word Algebraic with Update", w(RD, RA), r(RA, D), f(), (Opcd == 43));
    ins!(infos, Lhax, "lhax", "Load Half Word Algebraic Indexed", w(RD), r(RA, RB), f(), (Opcd == 31), (Xo1 == 343), (!Rsv31));
    ins!(infos, Lhaux, "lhaux", "Load Half Word Algebraic with Update Indexed", w(RD, RA), r(RA, RB), f(), (Opcd == 31), (Xo1 == 375), (!Rsv31));
    ins!(infos, Lhz, "lhz", "Load Half Word and Zero", w(RD), r(RA, D), f(), (Opcd == 40));
    ins!(infos, Lhzu, "lhzu", "Load Half Word and Zero with Update", w(RD, RA), r(RA, D), f(), (Opcd == 41));
    ins!(infos, Lhzx, "lhzx", "Load Half Word and Zero Indexed", w(RD), r(RA, RB), f(), (Opcd == 31), (Xo1 == 279), (!Rsv31));
    ins!(infos, Lhzux, "lhzux", "Load Half Word and Zero with Update Indexed", w(RD, RA), r(RA, RB), f(), (Opcd == 31), (Xo1 == 311), (!Rsv31));
    ins!(infos, Lwz, "lwz", "Load Word and Zero", w(RD), r(RA, D), f(), (Opcd == 32));
    ins!(infos, Lwzu, "lwzu", "Load Word and Zero with Update", w(RD, RA), r(RA, D), f(), (Opcd == 33));
    ins!(infos, Lwzx, "lwzx", "Load Word and Zero Indexed", w(RD), r(RA, RB), f(), (Opcd == 31), (Xo1 == 23), (!Rsv31));
    ins!(infos, Lwzux, "lwzux", "Load Word and Zero with Update Indexed", w(RD, RA), r(RA, RB), f(), (Opcd == 31), (Xo1 == 55), (!Rsv31));

    // Integer store
    ins!(infos, Stb, "stb", "Store Byte", w(), r(RS, RA, D), f(), (Opcd == 38));
    ins!(infos, Stbu, "stbu", "Store Byte with Update", w(RA), r(RS, RA, D), f(), (Opcd == 39));
    ins!(infos, Stbx, "stbx", "Store Byte Indexed", w(), r(RS, RA, RB), f(), (Opcd == 31), (Xo1 == 215), (!Rsv31));
    ins!(infos, Stbux, "stbux", "Store Byte with Update Indexed", w(RA), r(RS, RA, RB), f(), (Opcd == 31), (Xo1 == 247), (!Rsv31));
    ins!(infos, Sth, "sth", "Store Half Word", w(), r(RS, RA, D), f(), (Opcd == 44));
    ins!(infos, Sthu, "sthu", "Store Half Word with Update", w(RA), r(RS, RA, D), f(), (Opcd == 45));
    ins!(infos, Sthx, "sthx", "Store Half Word Indexed", w(), r(RS, RA, RB), f(), (Opcd == 31), (Xo1 == 407), (!Rsv31));
    ins!(infos, Sthux, "sthux", "Store Half Word with Update Indexed", w(RA), r(RS, RA, RB), f(), (Opcd == 31), (Xo1 == 439), (!Rsv31));
    ins!(infos, Stw, "stw", "Store Word", w(), r(RS, RA, D), f(), (Opcd == 36));
    ins!(infos, Stwu, "stwu", "Store Word with Update", w(RA), r(RS, RA, D), f(), (Opcd == 37));
    ins!(infos, Stwx, "stwx", "Store Word Indexed", w(), r(RS, RA, RB), f(), (Opcd == 31), (Xo1 == 151), (!Rsv31));
    ins!(infos, Stwux, "stwux", "Store Word with Update Indexed", w(RA), r(RS, RA, RB), f(), (Opcd == 31), (Xo1 == 183), (!Rsv31));

    // Integer load and store with byte reverse
    ins!(infos, Lhbrx, "lhbrx", "Load Half Word Byte-Reverse Indexed", w(RD), r(RA, RB), f(), (Opcd == 31), (Xo1 == 790), (!Rsv31));
    ins!(infos, Lwbrx, "lwbrx", "Load Word Byte-Reverse Indexed", w(RD), r(RA, RB), f(), (Opcd == 31), (Xo1 == 534), (!Rsv31));
    ins!(infos, Sthbrx, "sthbrx", "Store Half Word Byte-Reverse Indexed", w(), r(RS, RA, RB), f(), (Opcd == 31), (Xo1 == 918), (!Rsv31));
    ins!(infos, Stwbrx, "stwbrx", "Store Word Byte-Reverse Indexed", w(), r(RS, RA, RB), f(), (Opcd == 31), (Xo1 == 662), (!Rsv31));

    // Integer load and store multiple
    ins!(infos, Lmw, "lmw", "Load Multiple Words", w(RD), r(RA, D), f(), (Opcd == 46));
    ins!(infos, Stmw, "stmw", "Store Multiple Words", w(), r(RS, RA, D), f(), (Opcd == 47));

    // Integer load and store string
    ins!(infos, Lswi, "lswi", "Load String Word Immediate", w(RD), r(RA, Nb), f(), (Opcd == 31), (Xo1 == 597), (!Rsv31));
    ins!(infos, Lswx, "lswx", "Load String Word Indexed", w(RD), r(RA, RB), f(), (Opcd == 31), (Xo1 == 533), (!Rsv31));
    ins!(infos, Stswi, "stswi", "Store String Word Immediate", w(), r(RS, RA, Nb), f(), (Opcd == 31), (Xo1 == 725), (!Rsv31));
    ins!(infos, Stswx, "stswx", "Store String Word Indexed", w(), r(RS, RA, RB), f(), (Opcd == 31), (Xo1 == 661), (!Rsv31));

    // Memory synchronisation
    ins!(infos, Eieio, "eieio", "Enforce In-Order Execution of I/O", w(), r(), f(), (Opcd == 31), (Xo1 == 854), (!Rsv6_10), (!Rsv11_15), (!Rsv16_20), (!Rsv31));
    ins!(infos, Isync, "isync", "Instruction Synchronise", w(), r(), f(), (Opcd == 19), (Xo1 == 150), (!Rsv6_10), (!Rsv11_15), (!Rsv16_20), (!Rsv31));
    ins!(infos, Lwarx, "lwarx", "Load Word and Reserve Indexed", w(RD, Rsrv), r(RA, RB), f(), (Opcd == 31), (Xo1 == 20), (!Rsv31));
    ins!(infos, Stwcx, "stwcx", "Store Word Conditional Indexed", w(Rsrv), r(RS, RA, RB), f(), (Opcd == 31), (Xo1 == 150), (Rsv31 == 1));
    ins!(infos, Sync, "sync", "Synchronise", w(), r(), f(L), (Opcd == 31), (Xo1 == 598), (!Rsv6_9), (!Rsv11_15), (!Rsv16_20), (!Rsv31));

    // Floating-point load
    ins!(infos, Lfd, "lfd", "Load Floating-Point Double", w(FrD), r(RA, D), f(), (Opcd == 50));
    ins!(infos, Lfdu, "lfdu", "Load Floating-Point Double with Update", w(FrD, RA), r(RA, D), f(), (Opcd == 51));
    ins!(infos, Lfdx, "lfdx", "Load Floating-Point Double Indexed", w(FrD), r(RA, RB), f(), (Opcd == 31), (Xo1 == 599), (!Rsv31));
    ins!(infos, Lfdux, "lfdux", "Load Floating-Point Double with Update Indexed", w(FrD, RA), r(RA, RB), f(), (Opcd == 31), (Xo1 == 631), (!Rsv31));
    ins!(infos, Lfs, "lfs", "Load Floating-Point Single", w(FrD), r(RA, D), f(), (Opcd == 48));
    ins!(infos, Lfsu, "lfsu", "Load Floating-Point Single with Update", w(FrD, RA), r(RA, D), f(), (Opcd == 49));
    ins!(infos, Lfsx, "lfsx", "Load Floating-Point Single Indexed", w(FrD), r(RA, RB), f(), (Opcd == 31), (Xo1 == 535), (!Rsv31));
    ins!(infos, Lfsux, "lfsux", "Load Floating-Point Single with Update Indexed", w(FrD, RA), r(RA, RB), f(), (Opcd == 31), (Xo1 == 567), (!Rsv31));

    // Floating-point store
    ins!(infos, Stfd, "stfd", "Store Floating-Point Double", w(), r(FrS, RA, D), f(), (Opcd == 54));
    ins!(infos, Stfdu, "stfdu", "Store Floating-Point Double with Update", w(RA), r(FrS, RA, D), f(), (Opcd == 55));
    ins!(infos, Stfdx, "stfdx", "Store Floating-Point Double Indexed", w(), r(FrS, RA, RB), f(), (Opcd == 31), (Xo1 == 727), (!Rsv31));
    ins!(infos, Stfdux, "stfdux", "Store Floating-Point Double with Update Indexed", w(RA), r(FrS, RA, RB), f(), (Opcd == 31), (Xo1 == 759), (!Rsv31));
    ins!(infos, Stfiwx, "stfiwx", "Store Floating-Point as Integer Word Indexed", w(), r(FrS, RA, RB), f(), (Opcd == 31), (Xo1 == 983), (!Rsv31));
    ins!(infos, Stfs, "stfs", "Store Floating-Point Single", w(), r(FrS, RA, D), f(), (Opcd == 52));
    ins!(infos, Stfsu, "stfsu", "Store Floating-Point Single with Update", w(RA), r(FrS, RA, D), f(), (Opcd == 53));
    ins!(infos, Stfsx, "stfsx", "Store Floating-Point Single Indexed", w(), r(FrS, RA, RB), f(), (Opcd == 31), (Xo1 == 663), (!Rsv31));
    ins!(infos, Stfsux, "stfsux", "Store Floating-Point Single with Update Indexed", w(RA), r(FrS, RA, RB), f(), (Opcd == 31), (Xo1 == 695), (!Rsv31));

    // Floating-point move
    ins!(infos, Fabs, "fabs", "Floating Absolute Value", w(FrD), r(FrB), f(Rc), (Opcd == 63), (Xo1 == 264), (!Rsv11_15));
    ins!(infos, Fmr, "fmr", "Floating Move Register", w(FrD), r(FrB), f(Rc), (Opcd == 63), (Xo1 == 72), (!Rsv11_15));
    ins!(infos, Fnabs, "fnabs", "Floating Negative Absolute Value", w(FrD), r(FrB), f(Rc), (Opcd == 63), (Xo1 == 136), (!Rsv11_15));
    ins!(infos, Fneg, "fneg", "Floating Negate", w(FrD), r(FrB), f(Rc), (Opcd == 63), (Xo1 == 40), (!Rsv11_15));

    // Branch
    ins!(infos, B, "b", "Branch", w(), r(Li), f(Aa, Lk), (Opcd == 18));
    ins!(infos, Bc, "bc", "Branch Conditional", w(Bo), r(Bi, Bd), f(Aa, Lk), (Opcd == 16));
    ins!(infos, Bcctr, "bcctr", "Branch Conditional to CTR", w(Bo), r(Bi, Ctr), f(Lk), (Opcd == 19), (Xo1 == 528), (!Rsv16_20));
    ins!(infos, Bclr, "bclr", "Branch Conditional to LR", w(Bo), r(Bi, Lr), f(Lk), (Opcd == 19), (Xo1 == 16), (!Rsv16_20));

    // Condition register logical
    ins!(infos, Crand, "crand", "Condition Register AND", w(CrbD), r(CrbA, CrbB), f(), (Opcd == 19), (Xo1 == 257), (!Rsv31));
    ins!(infos, Crandc, "crandc", "Condition Register AND with Complement", w(CrbD), r(CrbA, CrbB), f(), (Opcd == 19), (Xo1 == 129), (!Rsv31));
    ins!(infos, Creqv, "creqv", "Condition Register Equivalent", w(CrbD), r(CrbA, CrbB), f(), (Opcd == 19), (Xo1 == 289), (!Rsv31));
    ins!(infos, Crnand, "crnand", "Condition Register NAND", w(CrbD), r(CrbA, CrbB), f(), (Opcd == 19), (Xo1 == 225), (!Rsv31));
    ins!(infos, Crnor, "crnor", "Condition Register NOR", w(CrbD), r(CrbA, CrbB), f(), (Opcd == 19), (Xo1 == 33), (!Rsv31));
    ins!(infos, Cror, "cror", "Condition Register OR", w(CrbD), r(CrbA, CrbB), f(), (Opcd == 19), (Xo1 == 449), (!Rsv31));
    ins!(infos, Crorc, "crorc", "Condition Register OR with Complement", w(CrbD), r(CrbA, CrbB), f(), (Opcd == 19), (Xo1 == 417), (!Rsv31));
    ins!(infos, Crxor, "crxor", "Condition Register XOR", w(CrbD), r(CrbA, CrbB), f(), (Opcd == 19), (Xo1 == 193), (!Rsv31));
    ins!(infos, Mcrf, "mcrf", "Move Condition Register Field", w(CrfD), r(CrfS), f(), (Opcd == 19), (Xo1 == 0), (!Rsv9_10), (!Rsv14_15), (!Rsv16_20), (!Rsv31));

    // System linkage
    ins!(infos, Rfi, "rfi", "", w(), r(), f(), (Opcd == 19), (Xo1 == 50), (!Rsv6_10), (!Rsv11_15), (!Rsv16_20), (!Rsv31));
    // kc must come before sc so its table claims the _31 slot first
    ins!(infos, Kc, "kc", "krncall", w(), r(Kcn), f(), (Opcd == 17), (Rsv31 == 1));
    ins!(infos, Sc, "sc", "Syscall", w(), r(), f(), (Opcd == 17), (!Rsv6_10), (!Rsv11_15), (!Rsv16_29), (Rsv30 == 1), (!Rsv31));

    // Trap
    ins!(infos, Tw, "tw", "", w(), r(To, RA, RB), f(), (Opcd == 31), (Xo1 == 4), (!Rsv31));
    ins!(infos, Twi, "twi", "", w(), r(To, RA, Simm), f(), (Opcd == 3));

    // Processor control
    ins!(infos, Mcrxr, "mcrxr", "Move to Condition Register from XERO", w(CrfD), r(XerO), f(), (Opcd == 31), (Xo1 == 512), (!Rsv9_10), (!Rsv11_15), (!Rsv16_20), (!Rsv31));
    // The Espresso ignores bit 11 and treats mfocrf/mtocrf as mfcr/mtcrf.
    ins!(infos, Mfcr, "mfcr", "Move from Condition Register", w(RD), r(), f(), (Opcd == 31), (Xo1 == 19), (!Rsv20), (!Rsv31));
    ins!(infos, Mfmsr, "mfmsr", "Move from Machine State Register", w(RD), r(), f(), (Opcd == 31), (Xo1 == 83), (!Rsv11_15), (!Rsv16_20), (!Rsv31));
    ins!(infos, Mfspr, "mfspr", "Move from Special Purpose Register", w(RD), r(Spr), f(), (Opcd == 31), (Xo1 == 339), (!Rsv31));
    ins!(infos, Mftb, "mftb", "Move from Time Base Register", w(RD), r(Tbr), f(), (Opcd == 31), (Xo1 == 371), (!Rsv31));
    ins!(infos, Mtcrf, "mtcrf", "Move to Condition Register Fields", w(Crm), r(RS), f(), (Opcd == 31), (Xo1 == 144), (!Rsv20), (!Rsv31));
    ins!(infos, Mtmsr, "mtmsr", "Move to Machine State Register", w(), r(RS), f(), (Opcd == 31), (Xo1 == 146), (!Rsv11_15), (!Rsv16_20), (!Rsv31));
    ins!(infos, Mtspr, "mtspr", "Move to Special Purpose Register", w(Spr), r(RS), f(), (Opcd == 31), (Xo1 == 467), (!Rsv31));

    // Cache management
    ins!(infos, Dcbf, "dcbf", "", w(), r(RA, RB), f(), (Opcd == 31), (Xo1 == 86), (!Rsv6_10), (!Rsv31));
    ins!(infos, Dcbi, "dcbi", "", w(), r(RA, RB), f(), (Opcd == 31), (Xo1 == 470), (!Rsv6_10), (!Rsv31));
    ins!(infos, Dcbst, "dcbst", "", w(), r(RA, RB), f(), (Opcd == 31), (Xo1 == 54), (!Rsv6_10), (!Rsv31));
    ins!(infos, Dcbt, "dcbt", "", w(), r(RA, RB), f(), (Opcd == 31), (Xo1 == 278), (!Rsv6_10), (!Rsv31));
    ins!(infos, Dcbtst, "dcbtst", "", w(), r(RA, RB), f(), (Opcd == 31), (Xo1 == 246), (!Rsv6_10), (!Rsv31));
    ins!(infos, Dcbz, "dcbz", "", w(), r(RA, RB), f(), (Opcd == 31), (Xo1 == 1014), (!Rsv6_10), (!Rsv31));
    ins!(infos, Icbi, "icbi", "", w(), r(RA, RB), f(), (Opcd == 31), (Xo1 == 982), (!Rsv6_10), (!Rsv31));
    ins!(infos, DcbzL, "dcbz_l", "", w(), r(RA, RB), f(), (Opcd == 4), (Xo1 == 1014), (!Rsv6_10), (!Rsv31));

    // Segment register manipulation
    ins!(infos, Mfsr, "mfsr", "Move from Segment Register", w(RD), r(Sr), f(), (Opcd == 31), (Xo1 == 595), (!Rsv11), (!Rsv16_20), (!Rsv31));
    ins!(infos, Mfsrin, "mfsrin", "Move from Segment Register Indirect", w(RD), r(RB), f(), (Opcd == 31), (Xo1 == 659), (!Rsv11_15), (!Rsv31));
    ins!(infos, Mtsr, "mtsr", "Move to Segment Register", w(), r(RD, Sr), f(), (Opcd == 31), (Xo1 == 210), (!Rsv11), (!Rsv16_20), (!Rsv31));
    ins!(infos, Mtsrin, "mtsrin", "Move to Segment Register Indirect", w(), r(RD, RB), f(), (Opcd == 31), (Xo1 == 242), (!Rsv11_15), (!Rsv31));

    // Lookaside buffer management
    ins!(infos, Tlbie, "tlbie", "", w(), r(RB), f(), (Opcd == 31), (Xo1 == 306), (!Rsv6_10), (!Rsv11_15), (!Rsv31));
    ins!(infos, Tlbsync, "tlbsync", "", w(), r(), f(), (Opcd == 31), (Xo1 == 566), (!Rsv6_10), (!Rsv11_15), (!Rsv16_20), (!Rsv31));

    // External control
    ins!(infos, Eciwx, "eciwx", "", w(RD), r(RA, RB), f(), (Opcd == 31), (Xo1 == 310), (!Rsv31));
    ins!(infos, Ecowx, "ecowx", "", w(RD), r(RA, RB), f(), (Opcd == 31), (Xo1 == 438), (!Rsv31));

    // Paired-single load and store
    ins!(infos, PsqL, "psq_l", "Paired Single Load", w(FrD), r(RA, Qd), f(W, I), (Opcd == 56));
    ins!(infos, PsqLu, "psq_lu", "Paired Single Load with Update", w(FrD), r(RA, Qd), f(W, I), (Opcd == 57));
    ins!(infos, PsqLx, "psq_lx", "Paired Single Load Indexed", w(FrD), r(RA, RB), f(Qw, Qi), (Opcd == 4), (Xo3 == 6), (!Rsv31));
    ins!(infos, PsqLux, "psq_lux", "Paired Single Load with Update Indexed", w(FrD), r(RA, RB), f(Qw, Qi), (Opcd == 4), (Xo3 == 38), (!Rsv31));
    ins!(infos, PsqSt, "psq_st", "Paired Single Store", w(FrD), r(RA, Qd), f(W, I), (Opcd == 60));
    ins!(infos, PsqStu, "psq_stu", "Paired Single Store with Update", w(FrD), r(RA, Qd), f(W, I), (Opcd == 61));
    ins!(infos, PsqStx, "psq_stx", "Paired Single Store Indexed", w(FrS), r(RA, RB), f(Qw, Qi), (Opcd == 4), (Xo3 == 7), (!Rsv31));
    ins!(infos, PsqStux, "psq_stux", "Paired Single Store with Update Indexed", w(FrS), r(RA, RB), f(Qw, Qi), (Opcd == 4), (Xo3 == 39), (!Rsv31));

    // Paired-single arithmetic
    ins!(infos, PsAdd, "ps_add", "Paired Single Add", w(FrD, Fpscr), r(FrA, FrB), f(Rc), (Opcd == 4), (Xo4 == 21));
    ins!(infos, PsDiv, "ps_div", "Paired Single Divide", w(FrD, Fpscr), r(FrA, FrB), f(Rc), (Opcd == 4), (Xo4 == 18));
    ins!(infos, PsMul, "ps_mul", "Paired Single Multiply", w(FrD, Fpscr), r(FrA, FrC), f(Rc), (Opcd == 4), (Xo4 == 25));
    ins!(infos, PsSub, "ps_sub", "Paired Single Subtract", w(FrD, Fpscr), r(FrA, FrB), f(Rc), (Opcd == 4), (Xo4 == 20));
    ins!(infos, PsAbs, "ps_abs", "Paired Single Absolute", w(FrD), r(FrB), f(Rc), (Opcd == 4), (Xo1 == 264), (!Rsv11_15));
    ins!(infos, PsNabs, "ps_nabs", "Paired Single Negate Absolute", w(FrD), r(FrB), f(Rc), (Opcd == 4), (Xo1 == 136), (!Rsv11_15));
    ins!(infos, PsNeg, "ps_neg", "Paired Single Negate", w(FrD), r(FrB), f(Rc), (Opcd == 4), (Xo1 == 40), (!Rsv11_15));
    ins!(infos, PsSel, "ps_sel", "Paired Single Select", w(FrD), r(FrA, FrC, FrB), f(Rc), (Opcd == 4), (Xo4 == 23));
    ins!(infos, PsRes, "ps_res", "Paired Single Reciprocal", w(FrD, Fpscr), r(FrB), f(Rc), (Opcd == 4), (Xo4 == 24));
    ins!(infos, PsRsqrte, "ps_rsqrte", "Paired Single Reciprocal Square Root Estimate", w(FrD, Fpscr), r(FrB), f(Rc), (Opcd == 4), (Xo4 == 26));
    ins!(infos, PsMsub, "ps_msub", "Paired Single Multiply and Subtract", w(FrD, Fpscr), r(FrA, FrC, FrB), f(Rc), (Opcd == 4), (Xo4 == 28));
    ins!(infos, PsMadd, "ps_madd", "Paired Single Multiply and Add", w(FrD, Fpscr), r(FrA, FrC, FrB), f(Rc), (Opcd == 4), (Xo4 == 29));
    ins!(infos, PsNmsub, "ps_nmsub", "Paired Single Negate Multiply and Subtract", w(FrD, Fpscr), r(FrA, FrC, FrB), f(Rc), (Opcd == 4), (Xo4 == 30));
    ins!(infos, PsNmadd, "ps_nmadd", "Paired Single Negate Multiply and Add", w(FrD, Fpscr), r(FrA, FrC, FrB), f(Rc), (Opcd == 4), (Xo4 == 31));
    ins!(infos, PsMr, "ps_mr", "Paired Single Move Register", w(FrD), r(FrB), f(Rc), (Opcd == 4), (Xo1 == 72), (!Rsv11_15));
    ins!(infos, PsSum0, "ps_sum0", "Paired Single Sum High", w(FrD, Fpscr), r(FrA, FrC, FrB), f(Rc), (Opcd == 4), (Xo4 == 10));
    ins!(infos, PsSum1, "ps_sum1", "Paired Single Sum Low", w(FrD, Fpscr), r(FrA, FrC, FrB), f(Rc), (Opcd == 4), (Xo4 == 11));
    ins!(infos, PsMuls0, "ps_muls0", "Paired Single Multiply Scalar High", w(FrD, Fpscr), r(FrA, FrC), f(Rc), (Opcd == 4), (Xo4 == 12));
    ins!(infos, PsMuls1, "ps_muls1", "Paired Single Multiply Scalar Low", w(FrD, Fpscr), r(FrA, FrC), f(Rc), (Opcd == 4), (Xo4 == 13));
    ins!(infos, PsMadds0, "ps_madds0", "Paired Single Multiply and Add Scalar High", w(FrD, Fpscr), r(FrA, FrC, FrB), f(Rc), (Opcd == 4), (Xo4 == 14));
    ins!(infos, PsMadds1, "ps_madds1", "Paired Single Multiply and Add Scalar Low", w(FrD, Fpscr), r(FrA, FrC, FrB), f(Rc), (Opcd == 4), (Xo4 == 15));
    ins!(infos, PsCmpu0, "ps_cmpu0", "Paired Single Compare Unordered High", w(CrfD, Fpscr), r(FrA, FrB), f(), (Opcd == 4), (Xo1 == 0), (!Rsv9_10), (!Rsv31));
    ins!(infos, PsCmpo0, "ps_cmpo0", "Paired Single Compare Ordered High", w(CrfD, Fpscr), r(FrA, FrB), f(), (Opcd == 4), (Xo1 == 32), (!Rsv9_10), (!Rsv31));
    ins!(infos, PsCmpu1, "ps_cmpu1", "Paired Single Compare Unordered Low", w(CrfD, Fpscr), r(FrA, FrB), f(), (Opcd == 4), (Xo1 == 64), (!Rsv9_10), (!Rsv31));
    ins!(infos, PsCmpo1, "ps_cmpo1", "Paired Single Compare Ordered Low", w(CrfD, Fpscr), r(FrA, FrB), f(), (Opcd == 4), (Xo1 == 96), (!Rsv9_10), (!Rsv31));
    ins!(infos, PsMerge00, "ps_merge00", "Paired Single Merge High", w(FrD), r(FrA, FrB), f(Rc), (Opcd == 4), (Xo1 == 528));
    ins!(infos, PsMerge01, "ps_merge01", "Paired Single Merge Direct", w(FrD), r(FrA, FrB), f(Rc), (Opcd == 4), (Xo1 == 560));
    ins!(infos, PsMerge10, "ps_merge10", "Paired Single Merge Swapped", w(FrD), r(FrA, FrB), f(Rc), (Opcd == 4), (Xo1 == 592));
    ins!(infos, PsMerge11, "ps_merge11", "Paired Single Merge Low", w(FrD), r(FrA, FrB), f(Rc), (Opcd == 4), (Xo1 == 624));

    infos
}

/// Build the alias catalog. Order matters: the first structural match in
/// this list wins.
pub fn build_aliases() -> Vec<InstructionAlias> {
    let mut aliases = Vec::new();

    alias!(aliases, "nop", Ori, (RA == 0), (RS == 0), (Uimm == 0));
    alias!(aliases, "mr", Or, (RS eq RB));
    alias!(aliases, "not", Nor, (RS eq RB));
    alias!(aliases, "li", Addi, (RA == 0));
    alias!(aliases, "lis", Addis, (RA == 0));

    alias!(aliases, "crclr", Crxor, (CrbA eq CrbD), (CrbB eq CrbD));
    alias!(aliases, "crset", Creqv, (CrbA eq CrbD), (CrbB eq CrbD));
    alias!(aliases, "crmove", Cror, (CrbA eq CrbB));
    alias!(aliases, "crnot", Crnor, (CrbA eq CrbB));

    alias!(aliases, "mfxer", Mfspr, (Spr == 1));
    alias!(aliases, "mflr", Mfspr, (Spr == 8));
    alias!(aliases, "mfctr", Mfspr, (Spr == 9));
    alias!(aliases, "mtxer", Mtspr, (Spr == 1));
    alias!(aliases, "mtlr", Mtspr, (Spr == 8));
    alias!(aliases, "mtctr", Mtspr, (Spr == 9));

    aliases
}
