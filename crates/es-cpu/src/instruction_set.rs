//! Instruction identification
//!
//! [`InstructionSet`] owns the catalog and a decode trie built from each
//! instruction's opcode pattern. Trie positions live in one flat arena and
//! link to each other by index, so a built set is a few contiguous
//! allocations rather than a pointer web.
//!
//! A position holds one dense child table per opcode field seen at that
//! depth. Decoding reads the instruction's value for each table's field in
//! insertion order and descends into the first non-empty child, which is
//! how `kc` (keyed on bit 31) and `sc` (keyed on the reserved ranges)
//! coexist under primary opcode 17.

use crate::catalog::{
    build_aliases, build_instruction_infos, InstructionAlias, InstructionId, InstructionInfo,
    InstructionOpcode,
};
use crate::fields::InstructionField;
use crate::instruction::Instruction;

/// Arena index of an absent child
const EMPTY: u32 = u32::MAX;

/// Dense child table for one field: indexed by the field's extracted
/// value, `EMPTY` where no instruction claims that value.
struct FieldMap {
    field: InstructionField,
    children: Vec<u32>,
}

/// One trie position
#[derive(Default)]
struct Position {
    instr: Option<InstructionId>,
    maps: Vec<FieldMap>,
}

pub struct InstructionSet {
    infos: Vec<InstructionInfo>,
    aliases: Vec<InstructionAlias>,
    positions: Vec<Position>,
}

impl InstructionSet {
    /// Build the set from the full catalog.
    ///
    /// Panics if two catalog entries claim the same trie leaf, which
    /// means the opcode patterns are ambiguous.
    pub fn new() -> Self {
        Self::from_parts(build_instruction_infos(), build_aliases())
    }

    /// Build from explicit tables. Used by tests that need a reduced or
    /// reordered catalog.
    pub fn from_parts(infos: Vec<InstructionInfo>, aliases: Vec<InstructionAlias>) -> Self {
        let mut set = InstructionSet {
            infos,
            aliases,
            positions: vec![Position::default()],
        };

        for index in 0..set.infos.len() {
            set.insert(index);
        }

        set
    }

    fn insert(&mut self, index: usize) {
        let opcode = self.infos[index].opcode.clone();
        let id = self.infos[index].id;
        let name = self.infos[index].name;
        let mut pos = 0u32;

        let (last, prefix) = opcode
            .split_last()
            .unwrap_or_else(|| panic!("{} has an empty opcode pattern", name));

        for op in prefix {
            let (field, value) = constant(op, name);
            self.add_map(pos, field);
            pos = self.child(pos, field, value);
        }

        let (field, value) = constant(last, name);
        self.add_map(pos, field);
        let leaf = self.child(pos, field, value);
        let leaf = &mut self.positions[leaf as usize];

        if let Some(other) = leaf.instr {
            panic!(
                "{} and {} decode to the same trie leaf",
                self.infos[other as usize].name, name
            );
        }

        leaf.instr = Some(id);
    }

    /// Ensure `pos` has a child table for `field`.
    fn add_map(&mut self, pos: u32, field: InstructionField) {
        let position = &mut self.positions[pos as usize];

        if position.maps.iter().any(|m| m.field == field) {
            return;
        }

        position.maps.push(FieldMap {
            field,
            children: vec![EMPTY; 1 << field.width()],
        });
    }

    /// Get the child of `pos` under `field == value`, allocating it if
    /// absent.
    fn child(&mut self, pos: u32, field: InstructionField, value: u32) -> u32 {
        let next = self.positions.len() as u32;
        let slot = self.positions[pos as usize]
            .maps
            .iter_mut()
            .find(|m| m.field == field)
            .map(|m| &mut m.children[value as usize])
            .unwrap_or_else(|| panic!("no child table for {:?}", field));

        if *slot != EMPTY {
            return *slot;
        }

        *slot = next;
        self.positions.push(Position::default());
        next
    }

    /// Decode an instruction word to its catalog entry, or `None` for an
    /// illegal encoding.
    pub fn decode(&self, instr: Instruction) -> Option<&InstructionInfo> {
        let mut pos = 0u32;

        loop {
            let position = &self.positions[pos as usize];
            let mut next = EMPTY;

            for map in &position.maps {
                let value = instr.field(map.field);
                let child = map.children[value as usize];

                if child == EMPTY {
                    continue;
                }

                let node = &self.positions[child as usize];

                if node.instr.is_some() || !node.maps.is_empty() {
                    next = child;
                    break;
                }
            }

            if next == EMPTY {
                return None;
            }

            let node = &self.positions[next as usize];

            if node.maps.is_empty() {
                return node.instr.map(|id| &self.infos[id as usize]);
            }

            pos = next;
        }
    }

    /// Encode the canonical form of an instruction: every pattern constant
    /// placed in its field, all operand fields zero.
    pub fn encode(&self, id: InstructionId) -> Instruction {
        let info = self.find(id);
        let mut word = 0u32;

        for op in &info.opcode {
            let (field, value) = constant(op, info.name);
            word |= value << field.start();
        }

        Instruction(word)
    }

    /// Catalog entry for an id
    pub fn find(&self, id: InstructionId) -> &InstructionInfo {
        &self.infos[id as usize]
    }

    pub fn infos(&self) -> &[InstructionInfo] {
        &self.infos
    }

    pub fn aliases(&self) -> &[InstructionAlias] {
        &self.aliases
    }

    /// Check whether `instr` matches the opcode pattern of `id`. Pattern
    /// fields are compared raw, without SPR bit interleaving.
    pub fn is_a(&self, id: InstructionId, instr: Instruction) -> bool {
        self.find(id).opcode.iter().all(|op| match *op {
            InstructionOpcode::Constant { field, value } => {
                (instr.0 & field.bitmask()) >> field.start() == value
            }
            InstructionOpcode::FieldEquals { .. } => false,
        })
    }

    /// First alias whose pattern matches this decoded instruction
    pub fn find_alias(
        &self,
        info: &InstructionInfo,
        instr: Instruction,
    ) -> Option<&InstructionAlias> {
        find_match(&self.aliases, info, instr)
    }
}

impl Default for InstructionSet {
    fn default() -> Self {
        Self::new()
    }
}

/// First alias in `aliases` for `info.id` whose every pattern term holds
/// for `instr`.
pub fn find_match<'a>(
    aliases: &'a [InstructionAlias],
    info: &InstructionInfo,
    instr: Instruction,
) -> Option<&'a InstructionAlias> {
    aliases.iter().find(|alias| {
        alias.id == info.id
            && alias.opcode.iter().all(|op| match *op {
                InstructionOpcode::Constant { field, value } => instr.field(field) == value,
                InstructionOpcode::FieldEquals { field, other } => {
                    instr.field(field) == instr.field(other)
                }
            })
    })
}

fn constant(op: &InstructionOpcode, name: &str) -> (InstructionField, u32) {
    match *op {
        InstructionOpcode::Constant { field, value } => (field, value),
        InstructionOpcode::FieldEquals { .. } => {
            panic!("{} pattern compares two fields", name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InstructionId;

    #[test]
    fn test_build_succeeds() {
        let set = InstructionSet::new();
        assert_eq!(set.infos().len(), InstructionId::COUNT);
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let set = InstructionSet::new();

        for index in 0..InstructionId::COUNT {
            let info = &set.infos()[index];
            let word = set.encode(info.id);
            let decoded = set
                .decode(word)
                .unwrap_or_else(|| panic!("{} did not decode", info.name));
            assert_eq!(decoded.id, info.id, "{}", info.name);
        }
    }

    #[test]
    fn test_decode_is_deterministic() {
        let set = InstructionSet::new();
        let word = Instruction(0x7C632214);

        let first = set.decode(word).map(|i| i.id);
        for _ in 0..8 {
            assert_eq!(set.decode(word).map(|i| i.id), first);
        }
        assert_eq!(first, Some(InstructionId::Add));
    }

    #[test]
    fn test_decode_unclaimed_word() {
        let set = InstructionSet::new();
        assert!(set.decode(Instruction(0)).is_none());
        assert!(set.decode(Instruction(0xFFFF_FFFF)).is_none());
        // opcd 31 with an unused extended opcode
        assert!(set.decode(Instruction(0x7C00_0FFE)).is_none());
    }

    #[test]
    fn test_kc_and_sc_share_primary_opcode() {
        let set = InstructionSet::new();

        let kc = set.encode(InstructionId::Kc);
        assert_eq!(set.decode(kc).map(|i| i.id), Some(InstructionId::Kc));

        let sc = set.encode(InstructionId::Sc);
        assert_eq!(set.decode(sc).map(|i| i.id), Some(InstructionId::Sc));
        assert_eq!(sc.0, (17 << 26) | 2);
    }

    #[test]
    fn test_is_a_checks_whole_pattern() {
        let set = InstructionSet::new();
        let add = Instruction(0x7C632214);

        assert!(set.is_a(InstructionId::Add, add));
        assert!(!set.is_a(InstructionId::Subf, add));
        // same primary opcode, different extended opcode
        assert!(!set.is_a(InstructionId::Addc, add));
    }

    #[test]
    fn test_operand_bits_do_not_change_identity() {
        let set = InstructionSet::new();
        let base = set.encode(InstructionId::Add).0;

        for (rd, ra, rb) in [(0u32, 0u32, 0u32), (3, 4, 5), (31, 31, 31)] {
            let word = Instruction(base | (rd << 21) | (ra << 16) | (rb << 11));
            assert_eq!(set.decode(word).map(|i| i.id), Some(InstructionId::Add));
        }
    }

    #[test]
    #[should_panic(expected = "same trie leaf")]
    fn test_duplicate_leaf_is_fatal() {
        let mut infos = build_instruction_infos();
        let mut copy = infos[0].clone();
        copy.id = InstructionId::Subf;
        infos.push(copy);
        InstructionSet::from_parts(infos, Vec::new());
    }

    #[test]
    fn test_find_alias_first_match_wins() {
        let set = InstructionSet::new();
        let or_info = set.find(InstructionId::Or);

        // or r3, r4, r4 displays as mr
        let mut word = set.encode(InstructionId::Or);
        word.set_field(InstructionField::RA, 3);
        word.set_field(InstructionField::RS, 4);
        word.set_field(InstructionField::RB, 4);
        let alias = set.find_alias(or_info, word).map(|a| a.name);
        assert_eq!(alias, Some("mr"));

        // or r3, r4, r5 has no alias
        word.set_field(InstructionField::RB, 5);
        assert!(set.find_alias(or_info, word).is_none());
    }
}
