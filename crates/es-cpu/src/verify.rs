//! JIT verification oracle
//!
//! Wraps each JIT-executed instruction in a pre/post pair. The pre hook
//! snapshots the core and the bytes the instruction will write; the post
//! hook saves the JIT's memory writes, restores the pre-image, replays
//! the instruction in the interpreter and compares every register and
//! written byte. A process-wide lock keeps other cores out of memory for
//! the whole window so the replayed bytes are attributable.
//!
//! A mismatch is a bug in the JIT, not a recoverable condition: it is
//! logged and then aborts.

use bitflags::bitflags;
use parking_lot::{Mutex, MutexGuard};
use tracing::{error, warn};

use es_core::config::CpuConfig;
use es_core::error::Result;
use es_memory::Memory;

use crate::catalog::InstructionId;
use crate::disassembler::disassemble;
use crate::instruction::Instruction;
use crate::instruction_set::InstructionSet;
use crate::interpreter::HandlerTable;
use crate::state::{Core, FPSCR_FI, FPSCR_FPRF, FPSCR_FR};

bitflags! {
    /// JIT optimisations that intentionally diverge from architectural
    /// FPSCR and CR state
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct JitOptFlags: u32 {
        /// The JIT does not model FPSCR at all
        const NO_FPSCR_STATE = 1 << 0;
        /// CR and the FPSCR result fields live in split host registers
        const SPLIT_FIELDS = 1 << 1;
        /// Constant folding skips FI and FR updates
        const FOLD_CONSTANT_FP = 1 << 2;
    }
}

impl JitOptFlags {
    pub fn from_config(config: &CpuConfig) -> Self {
        let mut flags = JitOptFlags::empty();

        if config.jit_opt_no_fpscr_state {
            flags |= JitOptFlags::NO_FPSCR_STATE;
        }

        if config.jit_opt_split_fields {
            flags |= JitOptFlags::SPLIT_FIELDS;
        }

        if config.jit_opt_fold_constant_fp {
            flags |= JitOptFlags::FOLD_CONSTANT_FP;
        }

        flags
    }

    /// FPSCR bits excluded from comparison under these optimisations
    pub fn fpscr_ignore_mask(&self) -> u32 {
        if self.contains(JitOptFlags::NO_FPSCR_STATE) {
            return u32::MAX;
        }

        let mut mask = 0;

        if self.contains(JitOptFlags::SPLIT_FIELDS) {
            mask |= FPSCR_FPRF | FPSCR_FI | FPSCR_FR;
        }

        if self.contains(JitOptFlags::FOLD_CONSTANT_FP) {
            mask |= FPSCR_FI | FPSCR_FR;
        }

        mask
    }
}

/// Largest store pre-image: stmw of all 32 registers
const MAX_MEMORY_SIZE: usize = 128;

/// Keeps other cores out of guest memory while one instruction is being
/// verified
static MEMORY_LOCK: Mutex<()> = Mutex::new(());

/// Scratch state carried from the pre hook to the post hook
struct VerifyBuffer {
    core_copy: Core,
    memory_address: u32,
    memory_size: u32,
    pre_jit: [u8; MAX_MEMORY_SIZE],
    post_jit: [u8; MAX_MEMORY_SIZE],
}

impl VerifyBuffer {
    fn new() -> Self {
        VerifyBuffer {
            core_copy: Core::new(0),
            memory_address: 0,
            memory_size: 0,
            pre_jit: [0; MAX_MEMORY_SIZE],
            post_jit: [0; MAX_MEMORY_SIZE],
        }
    }
}

pub struct Verifier<'a> {
    set: &'a InstructionSet,
    handlers: HandlerTable,
    opt_flags: JitOptFlags,
    /// Only verify instructions at this address; zero verifies all
    verify_address: u32,
    buffer: VerifyBuffer,
    pending: Option<InstructionId>,
    mem_guard: Option<MutexGuard<'static, ()>>,
}

/// Instructions whose results cannot be reproduced by replay: they are
/// resynchronised instead of compared.
pub fn is_exempt(id: InstructionId) -> bool {
    matches!(
        id,
        InstructionId::Kc | InstructionId::Lwarx | InstructionId::Mftb | InstructionId::Stwcx
    )
}

/// Instructions that read or write guest memory and therefore take the
/// global memory lock for verification. kc is included because a kernel
/// call may touch arbitrary memory.
pub fn touches_memory(id: InstructionId) -> bool {
    use InstructionId as I;

    matches!(
        id,
        I::Lbz | I::Lbzu
            | I::Lbzx
            | I::Lbzux
            | I::Lhz
            | I::Lhzu
            | I::Lhzx
            | I::Lhzux
            | I::Lhbrx
            | I::Lha
            | I::Lhau
            | I::Lhax
            | I::Lhaux
            | I::Lwz
            | I::Lwzu
            | I::Lwzx
            | I::Lwzux
            | I::Lwbrx
            | I::Lwarx
            | I::Lfs
            | I::Lfsu
            | I::Lfsx
            | I::Lfsux
            | I::Lfd
            | I::Lfdu
            | I::Lfdx
            | I::Lfdux
            | I::Lmw
            | I::Lswi
            | I::Lswx
            | I::PsqL
            | I::PsqLu
            | I::PsqLx
            | I::PsqLux
            | I::Stb
            | I::Stbu
            | I::Stbx
            | I::Stbux
            | I::Sth
            | I::Sthu
            | I::Sthx
            | I::Sthux
            | I::Sthbrx
            | I::Stw
            | I::Stwu
            | I::Stwx
            | I::Stwux
            | I::Stwbrx
            | I::Stwcx
            | I::Stfs
            | I::Stfsu
            | I::Stfsx
            | I::Stfsux
            | I::Stfiwx
            | I::Stfd
            | I::Stfdu
            | I::Stfdx
            | I::Stfdux
            | I::Stmw
            | I::Stswi
            | I::Stswx
            | I::Dcbz
            | I::DcbzL
            | I::PsqSt
            | I::PsqStu
            | I::PsqStx
            | I::PsqStux
            | I::Kc
    )
}

impl<'a> Verifier<'a> {
    pub fn new(set: &'a InstructionSet, opt_flags: JitOptFlags, verify_address: u32) -> Self {
        Verifier {
            set,
            handlers: HandlerTable::new(),
            opt_flags,
            verify_address,
            buffer: VerifyBuffer::new(),
            pending: None,
            mem_guard: None,
        }
    }

    pub fn from_config(set: &'a InstructionSet, config: &CpuConfig) -> Self {
        Self::new(set, JitOptFlags::from_config(config), config.verify_address)
    }

    pub fn should_verify(&self, address: u32) -> bool {
        self.verify_address == 0 || self.verify_address == address
    }

    /// Snapshot state before the JIT executes the instruction at
    /// `core.cia`.
    ///
    /// Returns false when this instruction is not being verified, in
    /// which case the post hook is a no-op.
    pub fn pre_instruction(
        &mut self,
        core: &Core,
        mem: &Memory,
        instr: Instruction,
    ) -> Result<bool> {
        self.pending = None;

        if !self.should_verify(core.cia) {
            return Ok(false);
        }

        let info = match self.set.decode(instr) {
            Some(info) => info,
            None => return Ok(false),
        };

        if touches_memory(info.id) {
            self.mem_guard = Some(MEMORY_LOCK.lock());
        }

        self.buffer.core_copy = *core;
        self.lookup_memory_target(info.id, instr);

        let size = self.buffer.memory_size as usize;
        debug_assert!(size <= MAX_MEMORY_SIZE);

        if size > 0 {
            if let Err(e) = mem.read_into(self.buffer.memory_address, &mut self.buffer.pre_jit[..size]) {
                self.mem_guard = None;
                return Err(e.into());
            }
        }

        self.pending = Some(info.id);
        Ok(true)
    }

    /// Compare JIT results against an interpreter replay. Must run after
    /// the JIT has executed the instruction snapshotted by
    /// [`Verifier::pre_instruction`].
    pub fn post_instruction(
        &mut self,
        core: &Core,
        mem: &Memory,
        instr: Instruction,
    ) -> Result<()> {
        let id = match self.pending.take() {
            Some(id) => id,
            None => return Ok(()),
        };

        if is_exempt(id) {
            self.resync(core);
            return Ok(());
        }

        let replay = match self.handlers.get(id) {
            Some(replay) => replay,
            None => {
                // No reference implementation to replay against
                warn!("cannot verify {:?}: no interpreter handler", id);
                self.resync(core);
                return Ok(());
            }
        };

        let cia = self.buffer.core_copy.cia;
        let size = self.buffer.memory_size as usize;

        // Save what the JIT wrote and restore the pre-image for replay
        let replay_result = (|| {
            if size > 0 {
                mem.read_into(self.buffer.memory_address, &mut self.buffer.post_jit[..size])?;
                mem.write_from(self.buffer.memory_address, &self.buffer.pre_jit[..size])?;
            }

            self.buffer.core_copy.nia = cia.wrapping_add(4);
            replay(&mut self.buffer.core_copy, mem, instr)
        })();

        // Last memory mutation is done, let other cores back in
        self.mem_guard = None;
        replay_result?;

        self.compare(core, mem, instr, id, cia);
        Ok(())
    }

    /// Accept the JIT state as truth without comparing. Used for the
    /// exempt instructions and after external state changes.
    pub fn resync(&mut self, core: &Core) {
        self.buffer.core_copy = *core;
        self.mem_guard = None;
    }

    fn describe(&self, instr: Instruction, cia: u32) -> String {
        disassemble(self.set, instr, cia)
            .map(|d| d.text)
            .unwrap_or_else(|| format!("0x{:08X}", instr.0))
    }

    fn fail(&self, message: String) -> ! {
        error!("{}", message);
        panic!("{}", message);
    }

    fn compare(&self, core: &Core, mem: &Memory, instr: Instruction, id: InstructionId, cia: u32) {
        let expected = &self.buffer.core_copy;

        if core.nia != expected.nia {
            self.fail(format!(
                "Wrong NIA at 0x{:X}: {}\n      Found: 0x{:08X}\n   Expected: 0x{:08X}",
                cia,
                self.describe(instr, cia),
                core.nia,
                expected.nia
            ));
        }

        for i in 0..32 {
            if core.gpr[i] != expected.gpr[i] {
                self.fail(format!(
                    "Wrong value in GPR {} at 0x{:X}: {}\n      Found: 0x{:08X}\n   Expected: 0x{:08X}",
                    i,
                    cia,
                    self.describe(instr, cia),
                    core.gpr[i],
                    expected.gpr[i]
                ));
            }
        }

        for i in 0..32 {
            if !fpr_matches(core.fpr[i].ps0, expected.fpr[i].ps0) {
                self.fail(format!(
                    "Wrong value in FPR {} at 0x{:X}: {}\n      Found: 0x{:08X}_{:08X} ({:e})\n   Expected: 0x{:08X}_{:08X} ({:e})",
                    i,
                    cia,
                    self.describe(instr, cia),
                    (core.fpr[i].ps0 >> 32) as u32,
                    core.fpr[i].ps0 as u32,
                    core.fpr[i].ps0_f64(),
                    (expected.fpr[i].ps0 >> 32) as u32,
                    expected.fpr[i].ps0 as u32,
                    expected.fpr[i].ps0_f64()
                ));
            }

            if !fpr_matches(core.fpr[i].ps1, expected.fpr[i].ps1) {
                self.fail(format!(
                    "Wrong value in PS1 {} at 0x{:X}: {}\n      Found: 0x{:08X}_{:08X} ({:e})\n   Expected: 0x{:08X}_{:08X} ({:e})",
                    i,
                    cia,
                    self.describe(instr, cia),
                    (core.fpr[i].ps1 >> 32) as u32,
                    core.fpr[i].ps1 as u32,
                    core.fpr[i].ps1_f64(),
                    (expected.fpr[i].ps1 >> 32) as u32,
                    expected.fpr[i].ps1 as u32,
                    expected.fpr[i].ps1_f64()
                ));
            }
        }

        for i in 0..8 {
            if core.gqr[i] != expected.gqr[i] {
                self.fail(format!(
                    "Wrong value in GQR {} at 0x{:X}: {}\n      Found: 0x{:08X}\n   Expected: 0x{:08X}",
                    i,
                    cia,
                    self.describe(instr, cia),
                    core.gqr[i].0,
                    expected.gqr[i].0
                ));
            }
        }

        if core.lr != expected.lr {
            self.fail(format!(
                "Wrong value in LR at 0x{:X}: {}\n      Found: 0x{:08X}\n   Expected: 0x{:08X}",
                cia,
                self.describe(instr, cia),
                core.lr,
                expected.lr
            ));
        }

        if core.ctr != expected.ctr {
            self.fail(format!(
                "Wrong value in CTR at 0x{:X}: {}\n      Found: 0x{:08X}\n   Expected: 0x{:08X}",
                cia,
                self.describe(instr, cia),
                core.ctr,
                expected.ctr
            ));
        }

        // CR lives in split host registers under this optimisation and
        // only converges at block boundaries
        if !self.opt_flags.contains(JitOptFlags::SPLIT_FIELDS) && core.cr != expected.cr {
            self.fail(format!(
                "Wrong value in CR at 0x{:X}: {}\n      Found: 0x{:08X}\n   Expected: 0x{:08X}",
                cia,
                self.describe(instr, cia),
                core.cr,
                expected.cr
            ));
        }

        if core.xer != expected.xer {
            self.fail(format!(
                "Wrong value in XER at 0x{:X}: {}\n      Found: 0x{:08X}\n   Expected: 0x{:08X}",
                cia,
                self.describe(instr, cia),
                core.xer.0,
                expected.xer.0
            ));
        }

        let fpscr_mask = !self.opt_flags.fpscr_ignore_mask();
        if (core.fpscr & fpscr_mask) != (expected.fpscr & fpscr_mask) {
            self.fail(format!(
                "Wrong value in FPSCR at 0x{:X}: {}\n      Found: 0x{:08X}\n   Expected: 0x{:08X}",
                cia,
                self.describe(instr, cia),
                core.fpscr,
                expected.fpscr
            ));
        }

        self.compare_memory(mem, instr, id, cia);
    }

    fn compare_memory(&self, mem: &Memory, instr: Instruction, id: InstructionId, cia: u32) {
        use InstructionId as I;

        let address = self.buffer.memory_address;
        let size = self.buffer.memory_size as usize;

        for i in 0..size {
            let found = self.buffer.post_jit[i];
            let expected = mem.read::<u8>(address + i as u32).unwrap_or(0);

            if found == expected {
                continue;
            }

            // Group the diff output to match the store width
            let mut address_str = format!("0x{:X}", address);
            let (found_str, expected_str) = match id {
                I::Stswi | I::Stswx => {
                    address_str.push_str(&format!("+0x{:X}", i));
                    (format!("0x{:02X}", found), format!("0x{:02X}", expected))
                }
                I::Stmw => {
                    let offset = i & !3;
                    address_str.push_str(&format!("+0x{:X}", offset));
                    (
                        format!("0x{:08X}", read_be_word(&self.buffer.post_jit, offset)),
                        format!(
                            "0x{:08X}",
                            mem.read::<u32>(address + offset as u32).unwrap_or(0)
                        ),
                    )
                }
                _ if size == 8 => (
                    format!(
                        "0x{:08X}_{:08X}",
                        read_be_word(&self.buffer.post_jit, 0),
                        read_be_word(&self.buffer.post_jit, 4)
                    ),
                    format!(
                        "0x{:08X}_{:08X}",
                        mem.read::<u32>(address).unwrap_or(0),
                        mem.read::<u32>(address + 4).unwrap_or(0)
                    ),
                ),
                _ if size == 4 => (
                    format!("0x{:08X}", read_be_word(&self.buffer.post_jit, 0)),
                    format!("0x{:08X}", mem.read::<u32>(address).unwrap_or(0)),
                ),
                _ if size == 2 => (
                    format!(
                        "0x{:04X}",
                        u16::from_be_bytes([self.buffer.post_jit[0], self.buffer.post_jit[1]])
                    ),
                    format!("0x{:04X}", mem.read::<u16>(address).unwrap_or(0)),
                ),
                _ => (format!("0x{:02X}", found), format!("0x{:02X}", expected)),
            };

            self.fail(format!(
                "Wrong data written to {} at 0x{:X}: {}\n      Found: {}\n   Expected: {}",
                address_str,
                cia,
                self.describe(instr, cia),
                found_str,
                expected_str
            ));
        }
    }

    /// Work out the byte range the instruction will store to, so the
    /// pre-image can be saved. Loads leave the size at zero.
    fn lookup_memory_target(&mut self, id: InstructionId, instr: Instruction) {
        use InstructionId as I;

        let core = &self.buffer.core_copy;

        self.buffer.memory_size = match id {
            I::Stb | I::Stbu | I::Stbx | I::Stbux => 1,
            I::Sth | I::Sthu | I::Sthx | I::Sthux | I::Sthbrx => 2,
            I::Stw | I::Stwu | I::Stwx | I::Stwux | I::Stwbrx | I::Stwcx | I::Stfs | I::Stfsu
            | I::Stfsx | I::Stfsux | I::Stfiwx => 4,
            I::Stfd | I::Stfdu | I::Stfdx | I::Stfdux => 8,
            I::Stmw => 4 * (32 - instr.rs() as u32),
            I::Stswi => {
                if instr.nb() == 0 {
                    32
                } else {
                    instr.nb()
                }
            }
            I::Stswx => core.xer.byte_count(),
            I::Dcbz | I::DcbzL => 32,
            I::PsqSt | I::PsqStu => {
                let gqr = core.gqr[instr.field(crate::fields::InstructionField::I) as usize];
                let single = instr.field(crate::fields::InstructionField::W) != 0;
                gqr.st_type().size() * if single { 1 } else { 2 }
            }
            I::PsqStx | I::PsqStux => {
                let gqr = core.gqr[instr.field(crate::fields::InstructionField::Qi) as usize];
                let single = instr.field(crate::fields::InstructionField::Qw) != 0;
                gqr.st_type().size() * if single { 1 } else { 2 }
            }
            _ => {
                self.buffer.memory_size = 0;
                return;
            }
        };

        let base = if instr.ra() == 0 {
            0
        } else {
            core.gpr[instr.ra()]
        };

        self.buffer.memory_address = match id {
            I::Stb | I::Stbu | I::Sth | I::Sthu | I::Stw | I::Stwu | I::Stmw | I::Stfs
            | I::Stfsu | I::Stfd | I::Stfdu => base.wrapping_add(instr.d() as u32),
            I::Stbx | I::Stbux | I::Sthx | I::Sthux | I::Sthbrx | I::Stwx | I::Stwux
            | I::Stwbrx | I::Stwcx | I::Stswx | I::Stfsx | I::Stfsux | I::Stfiwx | I::Stfdx
            | I::Stfdux | I::PsqStx | I::PsqStux => base.wrapping_add(core.gpr[instr.rb()]),
            I::Stswi => base,
            I::Dcbz | I::DcbzL => base.wrapping_add(core.gpr[instr.rb()]) & !31,
            I::PsqSt | I::PsqStu => base.wrapping_add(instr.qd() as u32),
            _ => unreachable!("missing memory address calculation for {:?}", id),
        };
    }
}

/// Bitwise equality with one forgiveness: quiet NaNs that differ only in
/// sign compare equal, since host FP hardware does not preserve NaN
/// signs the way the Espresso does.
fn fpr_matches(found: u64, expected: u64) -> bool {
    const SIGN: u64 = 1 << 63;

    if found == expected {
        return true;
    }

    (found ^ expected) == SIGN && is_quiet_nan(found)
}

fn is_quiet_nan(bits: u64) -> bool {
    bits & 0x7FF0_0000_0000_0000 == 0x7FF0_0000_0000_0000
        && bits & 0x0008_0000_0000_0000 != 0
}

fn read_be_word(buf: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ])
}
