//! Tests for opcode parsing, classification and instruction formatting.

use apex_sim::isa::{Instruction, Opcode};
use apex_sim::sim::loader::parse_line;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Tests mnemonic parsing, including case and the EX-OR alias.
#[test]
fn test_opcode_from_str() {
    assert_eq!("ADD".parse::<Opcode>(), Ok(Opcode::Add));
    assert_eq!("movc".parse::<Opcode>(), Ok(Opcode::Movc));
    assert_eq!("EX-OR".parse::<Opcode>(), Ok(Opcode::Xor));
    assert_eq!("XOR".parse::<Opcode>(), Ok(Opcode::Xor));
    assert!("ADDI".parse::<Opcode>().is_err());
    assert!("".parse::<Opcode>().is_err());
}

/// Tests the flag-producer class used by the condition-code protocol.
#[test]
fn test_flag_producers() {
    for op in [
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::Div,
        Opcode::Addl,
        Opcode::Subl,
        Opcode::Cmp,
        Opcode::Cml,
    ] {
        assert!(op.is_flag_producer(), "{} should produce flags", op);
    }
    for op in [Opcode::And, Opcode::Or, Opcode::Xor, Opcode::Movc, Opcode::Load, Opcode::Bz] {
        assert!(!op.is_flag_producer(), "{} should not produce flags", op);
    }
    assert!(Opcode::Movc.updates_flags());
}

/// Tests the branch and multi-cycle classes.
#[test]
fn test_control_classes() {
    assert!(Opcode::Bnn.is_conditional_branch());
    assert!(!Opcode::Jump.is_conditional_branch());
    assert!(Opcode::Jalr.is_jump());
    assert!(Opcode::Mul.is_multi_cycle());
    assert!(Opcode::Div.is_multi_cycle());
    assert!(!Opcode::Add.is_multi_cycle());
}

/// Tests the registers each instruction reads.
#[test]
fn test_instruction_sources() {
    let add = Instruction::new(Opcode::Add, 1, 2, 3, 0);
    assert_eq!(add.sources(), [Some(2), Some(3)]);

    let store = Instruction::new(Opcode::Store, 0, 4, 5, 8);
    assert_eq!(store.sources(), [Some(4), Some(5)]);

    let load = Instruction::new(Opcode::Load, 1, 2, 0, 4);
    assert_eq!(load.sources(), [Some(2), None]);

    let movc = Instruction::new(Opcode::Movc, 1, 0, 0, 9);
    assert_eq!(movc.sources(), [None, None]);

    let bz = Instruction::new(Opcode::Bz, 0, 0, 0, 8);
    assert_eq!(bz.sources(), [None, None]);
}

/// Tests the registers each instruction writes.
#[test]
fn test_instruction_destinations() {
    let loadp = Instruction::new(Opcode::Loadp, 1, 2, 0, 4);
    assert_eq!(loadp.destinations(), [Some(1), Some(2)]);

    let storep = Instruction::new(Opcode::Storep, 0, 4, 5, 0);
    assert_eq!(storep.destinations(), [Some(5), None]);

    let jalr = Instruction::new(Opcode::Jalr, 7, 2, 0, 0);
    assert_eq!(jalr.destinations(), [Some(7), None]);

    let store = Instruction::new(Opcode::Store, 0, 4, 5, 0);
    assert_eq!(store.destinations(), [None, None]);

    let cmp = Instruction::new(Opcode::Cmp, 0, 1, 2, 0);
    assert_eq!(cmp.destinations(), [None, None]);
}

/// Tests that formatting an instruction yields text the loader accepts.
#[rstest]
#[case("ADD,R1,R2,R3")]
#[case("MOVC,R1,#-5")]
#[case("LOADP,R1,R2,#4")]
#[case("STORE,R1,R2,#0")]
#[case("BNZ,#-12")]
#[case("CMP,R1,R2")]
#[case("CML,R3,#7")]
#[case("JUMP,R1,#0")]
#[case("HALT")]
fn test_instruction_display(#[case] text: &str) {
    let inst = parse_line(1, text).unwrap();
    assert_eq!(inst.to_string(), text);
}
