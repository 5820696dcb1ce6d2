//! Textual disassembly
//!
//! Produces one line per instruction word: the mnemonic (replaced by an
//! alias when one matches, with flag suffixes appended) followed by a
//! comma-separated operand list. Operands are the instruction's written
//! fields that are not also read, then its read fields, in catalog order.

use std::fmt;

use crate::catalog::{InstructionId, InstructionInfo, InstructionOpcode};
use crate::fields::InstructionField;
use crate::instruction::{sign_extend, Instruction};
use crate::instruction_set::InstructionSet;

/// One rendered operand
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    /// Branch target, absolute after adding the current address
    Address(u32),
    /// Named register such as `r3`, `f1`, `crf2`, `spr8`
    Register(String),
    /// Immediate shown in hex when above 9
    ValueUnsigned(u32),
    /// Immediate shown in signed hex when outside -9..=9
    ValueSigned(i32),
    /// Small constant always shown in decimal
    ConstantUnsigned(u32),
    /// Operand field with no rendering rule
    Invalid,
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Address(address) => write!(f, "@{:08X}", address),
            Argument::Register(name) => f.write_str(name),
            Argument::ValueUnsigned(value) => {
                if *value > 9 {
                    write!(f, "0x{:x}", value)
                } else {
                    write!(f, "{}", value)
                }
            }
            Argument::ValueSigned(value) => {
                if *value < -9 {
                    write!(f, "-0x{:x}", -value)
                } else if *value > 9 {
                    write!(f, "0x{:x}", value)
                } else {
                    write!(f, "{}", value)
                }
            }
            Argument::ConstantUnsigned(value) => write!(f, "{}", value),
            Argument::Invalid => f.write_str("???"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Disassembly {
    pub id: InstructionId,
    pub name: String,
    pub address: u32,
    pub args: Vec<Argument>,
    pub text: String,
}

/// Render one operand field, or `None` for fields that never display
/// (opcode fields, name modifiers, markers).
fn disassemble_field(cia: u32, instr: Instruction, field: InstructionField) -> Option<Argument> {
    use InstructionField as F;

    if field.is_marker() {
        return None;
    }

    let arg = match field {
        F::Bd => {
            let offset = sign_extend(instr.field(F::Bd) << 2, 16);
            let base = if instr.aa() { 0 } else { cia };
            Argument::Address(base.wrapping_add(offset as u32))
        }
        F::Li => {
            let offset = sign_extend(instr.field(F::Li) << 2, 26);
            let base = if instr.aa() { 0 } else { cia };
            Argument::Address(base.wrapping_add(offset as u32))
        }
        F::Bi | F::Bo | F::CrbA | F::CrbB | F::CrbD | F::Crm | F::Fm | F::I | F::Kcn | F::Mb
        | F::Me | F::Nb | F::Sh | F::Sr | F::To => Argument::ConstantUnsigned(instr.field(field)),
        F::CrfD | F::CrfS => Argument::Register(format!("crf{}", instr.field(field))),
        F::FrA | F::FrB | F::FrC | F::FrD | F::FrS => {
            Argument::Register(format!("f{}", instr.field(field)))
        }
        F::RA | F::RB | F::RD | F::RS => Argument::Register(format!("r{}", instr.field(field))),
        F::D | F::Simm => Argument::ValueSigned(sign_extend(instr.field(field), 16)),
        F::Qd => Argument::ValueSigned(sign_extend(instr.field(F::Qd), 12)),
        F::Imm | F::Uimm => Argument::ValueUnsigned(instr.field(field)),
        // TODO: name SPRs symbolically once an SPR table exists
        F::Spr => Argument::Register(format!("spr{}", instr.field(F::Spr))),
        F::Tbr => Argument::Register(format!("tbr{}", instr.field(F::Tbr))),
        F::Opcd | F::Xo1 | F::Xo2 | F::Xo3 | F::Xo4 => return None,
        F::Aa | F::Lk | F::Oe | F::Rc => return None,
        _ => Argument::Invalid,
    };

    Some(arg)
}

/// Disassemble one instruction word located at `address`.
///
/// Returns `None` when the word does not decode.
pub fn disassemble(
    set: &InstructionSet,
    instr: Instruction,
    address: u32,
) -> Option<Disassembly> {
    let info = set.decode(instr)?;
    let alias = set.find_alias(info, instr);

    let mut dis = Disassembly {
        id: info.id,
        name: alias.map(|a| a.name).unwrap_or(info.name).to_string(),
        address,
        args: Vec::new(),
        text: String::new(),
    };

    let mut fields: Vec<InstructionField> = Vec::new();

    for &field in &info.write {
        if info.read.contains(&field) || fields.contains(&field) || field.is_marker() {
            continue;
        }
        fields.push(field);
    }

    for &field in &info.read {
        if !fields.contains(&field) {
            fields.push(field);
        }
    }

    for field in fields {
        // Fields constrained by the alias pattern are implied by its name
        if let Some(alias) = alias {
            let constrained = alias.opcode.iter().any(|op| match *op {
                InstructionOpcode::Constant { field: f, .. } => f == field,
                InstructionOpcode::FieldEquals { field: f, .. } => f == field,
            });

            if constrained {
                continue;
            }
        }

        if let Some(arg) = disassemble_field(address, instr, field) {
            dis.args.push(arg);
        }
    }

    if matches!(
        info.id,
        InstructionId::Bc | InstructionId::Bcctr | InstructionId::Bclr
    ) {
        check_branch_condition_alias(instr, info, &mut dis);
    }

    for &field in &info.flags {
        match field {
            InstructionField::Aa if instr.aa() => dis.name.push('a'),
            InstructionField::Lk if instr.lk() => dis.name.push('l'),
            InstructionField::Oe if instr.oe() => dis.name.push('o'),
            InstructionField::Rc if instr.rc() => dis.name.push('.'),
            _ => {}
        }
    }

    dis.text = dis.name.clone();

    for (index, arg) in dis.args.iter().enumerate() {
        dis.text.push_str(if index == 0 { " " } else { ", " });
        dis.text.push_str(&arg.to_string());
    }

    Some(dis)
}

/// Replace conditional branch mnemonics with their canonical condition
/// forms. The bo and bi operands are always the first two arguments.
fn check_branch_condition_alias(instr: Instruction, info: &InstructionInfo, dis: &mut Disassembly) {
    let bo = instr.field(InstructionField::Bo);
    let bi = instr.field(InstructionField::Bi);

    if bo == 20 && bi % 4 == 0 {
        dis.args.drain(0..2);
        dis.name = match info.id {
            InstructionId::Bcctr => "bctr",
            InstructionId::Bclr => "blr",
            _ => "b",
        }
        .to_string();
        return;
    }

    let name = match (bo, bi % 4) {
        (12, 0) => "blt",
        (4, 1) => "ble",
        (12, 2) => "beq",
        (4, 0) => "bge",
        (12, 1) => "bgt",
        (4, 2) => "bne",
        (12, 3) => "bso",
        (4, 3) => "bns",
        _ => return,
    };

    dis.args.drain(0..2);
    dis.args.push(Argument::Register(format!("cr{}", bi / 4)));
    dis.name = name.to_string();
}
