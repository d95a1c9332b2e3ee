//! Tests for architectural state: registers, condition codes and memories.

use apex_sim::common::SimError;
use apex_sim::core::arch::flags::ConditionCodes;
use apex_sim::core::arch::gpr::RegisterFile;
use apex_sim::core::memory::{CodeMemory, DataMemory};
use apex_sim::isa::{Instruction, Opcode};
use rstest::rstest;

/// Tests that a fresh register file is zeroed and fully ready.
#[test]
fn test_register_file_initial_state() {
    let regs = RegisterFile::new(32);
    assert_eq!(regs.len(), 32);
    assert!(regs.values().iter().all(|&v| v == 0));
    assert!((0..32).all(|r| regs.is_ready(r)));
}

/// Tests that R0 is an ordinary writable register.
#[test]
fn test_register_zero_is_writable() {
    let mut regs = RegisterFile::new(32);
    regs.write(0, 5);
    assert_eq!(regs.read(0), 5);
}

/// Tests pending and ready transitions.
#[test]
fn test_register_ready_bits() {
    let mut regs = RegisterFile::new(8);
    regs.mark_pending(3);
    assert!(!regs.is_ready(3));
    assert!(regs.is_ready(2));
    regs.write(3, -9);
    assert!(!regs.is_ready(3));
    regs.mark_ready(3);
    assert!(regs.is_ready(3));
    assert_eq!(regs.read(3), -9);
}

/// Tests that condition codes start cleared and valid.
#[test]
fn test_flags_default() {
    let flags = ConditionCodes::default();
    assert!(flags.valid);
    assert!(!flags.zero && !flags.negative && !flags.positive);
}

/// Tests that exactly one of Z, N and P is set after an update.
#[test]
fn test_flags_update() {
    let mut flags = ConditionCodes::default();
    flags.update(0);
    assert!(flags.zero && !flags.negative && !flags.positive);
    flags.update(-4);
    assert!(!flags.zero && flags.negative && !flags.positive);
    flags.update(17);
    assert!(!flags.zero && !flags.negative && flags.positive);
}

/// Tests every conditional branch against zero, negative and positive results.
#[rstest]
#[case(Opcode::Bz, [true, false, false])]
#[case(Opcode::Bnz, [false, true, true])]
#[case(Opcode::Bn, [false, true, false])]
#[case(Opcode::Bnn, [true, false, true])]
#[case(Opcode::Bp, [false, false, true])]
#[case(Opcode::Bnp, [true, true, false])]
fn test_branch_conditions(#[case] op: Opcode, #[case] expected: [bool; 3]) {
    let mut flags = ConditionCodes::default();
    for (result, taken) in [0, -1, 1].into_iter().zip(expected) {
        flags.update(result);
        assert_eq!(flags.branch_taken(op), taken, "{} after result {}", op, result);
    }
}

/// Tests that non-branch opcodes never report a taken branch.
#[test]
fn test_branch_taken_non_branch() {
    let mut flags = ConditionCodes::default();
    flags.update(0);
    assert!(!flags.branch_taken(Opcode::Jump));
    assert!(!flags.branch_taken(Opcode::Add));
}

/// Tests the pc-to-index mapping of code memory.
#[test]
fn test_code_memory_fetch() {
    let program = vec![
        Instruction::new(Opcode::Movc, 1, 0, 0, 1),
        Instruction::new(Opcode::Movc, 2, 0, 0, 2),
        Instruction::bare(Opcode::Halt),
    ];
    let code = CodeMemory::new(program, 4000, 4);
    assert_eq!(code.fetch(4000).map(|i| i.imm), Some(1));
    assert_eq!(code.fetch(4004).map(|i| i.imm), Some(2));
    assert_eq!(code.fetch(4008).map(|i| i.opcode), Some(Opcode::Halt));
    assert!(code.fetch(4012).is_none());
    assert!(code.fetch(3996).is_none());
    assert!(code.fetch(4002).is_none());
    assert_eq!(code.pc_of(2), 4008);
}

/// Tests data memory reads and writes.
#[test]
fn test_data_memory_access() {
    let mut mem = DataMemory::new(16);
    assert_eq!(mem.read(4000, 3).unwrap(), 0);
    mem.write(4000, 3, 99).unwrap();
    assert_eq!(mem.read(4000, 3).unwrap(), 99);
    assert_eq!(mem.words()[3], 99);
}

/// Tests that out-of-range data accesses report the offending pc and address.
#[test]
fn test_data_memory_out_of_range() {
    let mut mem = DataMemory::new(16);
    match mem.read(4008, 16) {
        Err(SimError::DataAddressOutOfRange { pc, address, size }) => {
            assert_eq!((pc, address, size), (4008, 16, 16));
        }
        other => panic!("expected out-of-range error, got {:?}", other),
    }
    assert!(mem.write(4012, -1, 1).is_err());
}
