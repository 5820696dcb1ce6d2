//! End-to-end tests for the JIT verification oracle
//!
//! The "JIT" here is the interpreter run against the live core, which
//! lets the tests drive the full pre/post window and then corrupt state
//! between the two hooks to prove mismatches are caught.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use es_cpu::{
    Core, HandlerTable, Instruction, InstructionField, InstructionId, InstructionSet, JitOptFlags,
    Verifier,
};
use es_memory::Memory;

fn build(id: InstructionId, fields: &[(InstructionField, u32)]) -> Instruction {
    let set = InstructionSet::new();
    let mut instr = set.encode(id);
    for &(field, value) in fields {
        instr.set_field(field, value);
    }
    instr
}

/// Execute one instruction the way a generated block would, nia first
/// and then the handler.
fn run_jit(core: &mut Core, mem: &Memory, table: &HandlerTable, set: &InstructionSet, instr: Instruction) {
    let info = set.decode(instr).expect("word must decode");
    core.nia = core.cia.wrapping_add(4);
    table
        .handler(info.id)(core, mem, instr)
        .expect("instruction must execute");
}

/// Full verification window around one instruction.
fn verify_one(
    verifier: &mut Verifier<'_>,
    table: &HandlerTable,
    set: &InstructionSet,
    core: &mut Core,
    mem: &Memory,
    instr: Instruction,
) {
    verifier
        .pre_instruction(core, mem, instr)
        .expect("pre hook must succeed");
    run_jit(core, mem, table, set, instr);
    verifier
        .post_instruction(core, mem, instr)
        .expect("post hook must succeed");
    core.cia = core.nia;
}

#[test]
fn test_register_instructions_verify_clean() {
    let set = InstructionSet::new();
    let table = HandlerTable::new();
    let mem = Memory::new(0x1000);
    let mut core = Core::new(0);
    let mut verifier = Verifier::new(&set, JitOptFlags::empty(), 0);

    core.gpr[1] = 100;
    core.gpr[4] = 7;

    // addi r3, r1, 8
    let addi = build(
        InstructionId::Addi,
        &[
            (InstructionField::RD, 3),
            (InstructionField::RA, 1),
            (InstructionField::Simm, 8),
        ],
    );
    verify_one(&mut verifier, &table, &set, &mut core, &mem, addi);
    assert_eq!(core.gpr[3], 108);

    // add. r5, r3, r4
    let mut add = build(
        InstructionId::Add,
        &[
            (InstructionField::RD, 5),
            (InstructionField::RA, 3),
            (InstructionField::RB, 4),
        ],
    );
    add.set_field(InstructionField::Rc, 1);
    verify_one(&mut verifier, &table, &set, &mut core, &mem, add);
    assert_eq!(core.gpr[5], 115);
    assert_eq!(core.cia, 8);
}

#[test]
fn test_store_instructions_verify_clean() {
    let set = InstructionSet::new();
    let table = HandlerTable::new();
    let mem = Memory::new(0x10000);
    let mut core = Core::new(0);
    let mut verifier = Verifier::new(&set, JitOptFlags::empty(), 0);

    core.gpr[1] = 0x8000;
    core.gpr[3] = 0xCAFE_F00D;

    let stw = build(
        InstructionId::Stw,
        &[
            (InstructionField::RS, 3),
            (InstructionField::RA, 1),
            (InstructionField::D, 0x10),
        ],
    );
    verify_one(&mut verifier, &table, &set, &mut core, &mem, stw);
    assert_eq!(mem.read::<u32>(0x8010).unwrap(), 0xCAFE_F00D);

    // stmw r29, 0x20(r1) writes three registers
    core.gpr[29] = 1;
    core.gpr[30] = 2;
    core.gpr[31] = 3;
    let stmw = build(
        InstructionId::Stmw,
        &[
            (InstructionField::RS, 29),
            (InstructionField::RA, 1),
            (InstructionField::D, 0x20),
        ],
    );
    verify_one(&mut verifier, &table, &set, &mut core, &mem, stmw);
    assert_eq!(mem.read::<u32>(0x8028).unwrap(), 3);

    // dcbz clears the whole line
    mem.write::<u32>(0x8100, 0xFFFF_FFFF).unwrap();
    core.gpr[4] = 0x8104;
    let dcbz = build(InstructionId::Dcbz, &[(InstructionField::RB, 4)]);
    verify_one(&mut verifier, &table, &set, &mut core, &mem, dcbz);
    assert_eq!(mem.read::<u32>(0x8100).unwrap(), 0);
}

#[test]
fn test_corrupted_register_is_caught() {
    let set = InstructionSet::new();
    let table = HandlerTable::new();
    let mem = Memory::new(0x1000);
    let mut core = Core::new(0);
    let mut verifier = Verifier::new(&set, JitOptFlags::empty(), 0);

    let addi = build(
        InstructionId::Addi,
        &[(InstructionField::RD, 3), (InstructionField::Simm, 1)],
    );

    verifier.pre_instruction(&core, &mem, addi).unwrap();
    run_jit(&mut core, &mem, &table, &set, addi);
    core.gpr[5] = 0xBAD;

    let result = catch_unwind(AssertUnwindSafe(|| {
        verifier.post_instruction(&core, &mem, addi).unwrap();
    }));
    let message = *result.unwrap_err().downcast::<String>().unwrap();
    assert!(message.contains("GPR 5"), "unexpected message: {}", message);
}

#[test]
fn test_corrupted_store_data_is_caught() {
    let set = InstructionSet::new();
    let table = HandlerTable::new();
    let mem = Memory::new(0x1000);
    let mut core = Core::new(0);
    let mut verifier = Verifier::new(&set, JitOptFlags::empty(), 0);

    core.gpr[1] = 0x100;
    core.gpr[3] = 0x1234_5678;

    let stw = build(
        InstructionId::Stw,
        &[(InstructionField::RS, 3), (InstructionField::RA, 1)],
    );

    verifier.pre_instruction(&core, &mem, stw).unwrap();
    run_jit(&mut core, &mem, &table, &set, stw);
    // A miscompiled store wrote the wrong word
    mem.write::<u32>(0x100, 0xDEAD_BEEF).unwrap();

    let result = catch_unwind(AssertUnwindSafe(|| {
        verifier.post_instruction(&core, &mem, stw).unwrap();
    }));
    let message = *result.unwrap_err().downcast::<String>().unwrap();
    assert!(
        message.contains("Wrong data written"),
        "unexpected message: {}",
        message
    );
    assert!(message.contains("0xDEADBEEF"), "unexpected message: {}", message);
}

#[test]
fn test_fpscr_divergence_masked_by_opt_flags() {
    let set = InstructionSet::new();
    let table = HandlerTable::new();
    let mem = Memory::new(0x1000);

    let addi = build(
        InstructionId::Addi,
        &[(InstructionField::RD, 3), (InstructionField::Simm, 1)],
    );

    // Without the flag the stale FPSCR is a mismatch
    let mut core = Core::new(0);
    let mut strict = Verifier::new(&set, JitOptFlags::empty(), 0);
    strict.pre_instruction(&core, &mem, addi).unwrap();
    run_jit(&mut core, &mem, &table, &set, addi);
    core.fpscr = 0x8000_0000;
    let result = catch_unwind(AssertUnwindSafe(|| {
        strict.post_instruction(&core, &mem, addi).unwrap();
    }));
    assert!(result.is_err());

    // With NO_FPSCR_STATE the same divergence is expected
    let mut core = Core::new(0);
    let mut relaxed = Verifier::new(&set, JitOptFlags::NO_FPSCR_STATE, 0);
    relaxed.pre_instruction(&core, &mem, addi).unwrap();
    run_jit(&mut core, &mem, &table, &set, addi);
    core.fpscr = 0x8000_0000;
    relaxed.post_instruction(&core, &mem, addi).unwrap();
}

#[test]
fn test_fpscr_mask_matrix() {
    let set = InstructionSet::new();
    let table = HandlerTable::new();
    let mem = Memory::new(0x1000);

    let addi = build(
        InstructionId::Addi,
        &[(InstructionField::RD, 3), (InstructionField::Simm, 1)],
    );

    // (flags, fpscr corruption, expected to pass)
    let cases = [
        (JitOptFlags::SPLIT_FIELDS, 0x0001_F000u32, true), // FPRF
        (JitOptFlags::SPLIT_FIELDS, 1 << 17, true),        // FI
        (JitOptFlags::SPLIT_FIELDS, 1 << 31, false),       // FX
        (JitOptFlags::FOLD_CONSTANT_FP, 1 << 17, true),    // FI
        (JitOptFlags::FOLD_CONSTANT_FP, 1 << 18, true),    // FR
        (JitOptFlags::FOLD_CONSTANT_FP, 1 << 12, false),   // FPRF
        (JitOptFlags::empty(), 1 << 17, false),
    ];

    for (flags, corruption, passes) in cases {
        let mut core = Core::new(0);
        let mut verifier = Verifier::new(&set, flags, 0);
        verifier.pre_instruction(&core, &mem, addi).unwrap();
        run_jit(&mut core, &mem, &table, &set, addi);
        core.fpscr ^= corruption;

        let result = catch_unwind(AssertUnwindSafe(|| {
            verifier.post_instruction(&core, &mem, addi).unwrap();
        }));
        assert_eq!(
            result.is_ok(),
            passes,
            "flags {:?} corruption 0x{:08X}",
            flags,
            corruption
        );
    }
}

#[test]
fn test_clean_execution_sweep() {
    let set = InstructionSet::new();
    let table = HandlerTable::new();
    let mem = Memory::new(0x10000);
    let mut core = Core::new(0);
    let mut verifier = Verifier::new(&set, JitOptFlags::empty(), 0);

    core.gpr[1] = 0x4000;

    // A faithful JIT never trips the oracle, whatever the operands
    for value in [0u32, 1, 0x7FFF_FFFF, 0x8000_0000, 0xFFFF_FFFF] {
        for displacement in [0u32, 4, 0x7FC] {
            core.gpr[3] = value;

            let stw = build(
                InstructionId::Stw,
                &[
                    (InstructionField::RS, 3),
                    (InstructionField::RA, 1),
                    (InstructionField::D, displacement),
                ],
            );
            verify_one(&mut verifier, &table, &set, &mut core, &mem, stw);

            let addic = build(
                InstructionId::Addic,
                &[
                    (InstructionField::RD, 4),
                    (InstructionField::RA, 3),
                    (InstructionField::Simm, 0xFFFF),
                ],
            );
            verify_one(&mut verifier, &table, &set, &mut core, &mem, addic);
        }
    }
}

#[test]
fn test_split_fields_skips_cr_compare() {
    let set = InstructionSet::new();
    let table = HandlerTable::new();
    let mem = Memory::new(0x1000);

    let addi = build(
        InstructionId::Addi,
        &[(InstructionField::RD, 3), (InstructionField::Simm, 1)],
    );

    let mut core = Core::new(0);
    let mut verifier = Verifier::new(&set, JitOptFlags::SPLIT_FIELDS, 0);
    verifier.pre_instruction(&core, &mem, addi).unwrap();
    run_jit(&mut core, &mem, &table, &set, addi);
    core.cr = 0x1234_5678;
    verifier.post_instruction(&core, &mem, addi).unwrap();
}

#[test]
fn test_exempt_instruction_resyncs() {
    let set = InstructionSet::new();
    let table = HandlerTable::new();
    let mem = Memory::new(0x1000);
    let mut core = Core::new(0);
    let mut verifier = Verifier::new(&set, JitOptFlags::empty(), 0);

    // mftb r3: the replay could never reproduce the timebase read, so
    // whatever the JIT produced is accepted
    let mftb = build(InstructionId::Mftb, &[(InstructionField::RD, 3)]);
    verifier.pre_instruction(&core, &mem, mftb).unwrap();
    core.nia = core.cia.wrapping_add(4);
    core.gpr[3] = 0x5EED;
    verifier.post_instruction(&core, &mem, mftb).unwrap();
    core.cia = core.nia;

    // and verification continues cleanly from the resynced state
    let addi = build(
        InstructionId::Addi,
        &[
            (InstructionField::RD, 4),
            (InstructionField::RA, 3),
            (InstructionField::Simm, 1),
        ],
    );
    verify_one(&mut verifier, &table, &set, &mut core, &mem, addi);
    assert_eq!(core.gpr[4], 0x5EEE);
}

#[test]
fn test_address_filter_skips_other_blocks() {
    let set = InstructionSet::new();
    let table = HandlerTable::new();
    let mem = Memory::new(0x1000);
    let mut core = Core::new(0);
    let mut verifier = Verifier::new(&set, JitOptFlags::empty(), 0x500);

    let addi = build(
        InstructionId::Addi,
        &[(InstructionField::RD, 3), (InstructionField::Simm, 1)],
    );

    let active = verifier.pre_instruction(&core, &mem, addi).unwrap();
    assert!(!active);

    run_jit(&mut core, &mem, &table, &set, addi);
    core.gpr[7] = 0xBAD;
    // post is inert for a skipped instruction, even with corrupt state
    verifier.post_instruction(&core, &mem, addi).unwrap();
}

#[test]
fn test_concurrent_store_verification() {
    let set = Arc::new(InstructionSet::new());
    let mem = Arc::new(Memory::new(0x1000));

    // Both workers verify stores to the same word. The global memory
    // lock makes each pre/post window atomic, so every replay sees
    // exactly the bytes its own JIT wrote.
    let workers: Vec<_> = (0..2u32)
        .map(|worker| {
            let set = Arc::clone(&set);
            let mem = Arc::clone(&mem);
            thread::spawn(move || {
                let table = HandlerTable::new();
                let mut core = Core::new(worker);
                let mut verifier = Verifier::new(&set, JitOptFlags::empty(), 0);

                core.gpr[1] = 0x800;
                core.gpr[3] = 0xAAAA_AAAA + worker;

                let mut stw = set.encode(InstructionId::Stw);
                stw.set_field(InstructionField::RS, 3);
                stw.set_field(InstructionField::RA, 1);

                for _ in 0..200 {
                    core.cia = 0;
                    verify_one(&mut verifier, &table, &set, &mut core, &mem, stw);
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().expect("verification worker panicked");
    }
}
