//! Tests for program text parsing and loading.

use std::io::Write;

use apex_sim::common::SimError;
use apex_sim::isa::{Instruction, Opcode};
use apex_sim::sim::loader::{load_program, parse_program};
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

/// Tests parsing of every operand layout.
#[test]
fn test_parse_all_forms() {
    let text = "\
MOVC,R1,#10
ADD,R2,R1,R1
ADDL,R3,R2,#-4
LOAD,R4,R0,#8
STOREP,R4,R5,#0
JALR,R6,R1,#0
CMP,R1,R2
CML,R1,#3
BNZ,#-8
JUMP,R2,#4
NOP
HALT
";
    let program = parse_program(text).unwrap();
    assert_eq!(
        program,
        vec![
            Instruction::new(Opcode::Movc, 1, 0, 0, 10),
            Instruction::new(Opcode::Add, 2, 1, 1, 0),
            Instruction::new(Opcode::Addl, 3, 2, 0, -4),
            Instruction::new(Opcode::Load, 4, 0, 0, 8),
            Instruction::new(Opcode::Storep, 0, 4, 5, 0),
            Instruction::new(Opcode::Jalr, 6, 1, 0, 0),
            Instruction::new(Opcode::Cmp, 0, 1, 2, 0),
            Instruction::new(Opcode::Cml, 0, 1, 0, 3),
            Instruction::new(Opcode::Bnz, 0, 0, 0, -8),
            Instruction::new(Opcode::Jump, 0, 2, 0, 4),
            Instruction::bare(Opcode::Nop),
            Instruction::bare(Opcode::Halt),
        ]
    );
}

/// Tests that blank lines and surrounding whitespace are ignored.
#[test]
fn test_parse_skips_blank_lines() {
    let program = parse_program("\n  MOVC, R1, #1  \n\n\r\nHALT\n").unwrap();
    assert_eq!(program.len(), 2);
    assert_eq!(program[0], Instruction::new(Opcode::Movc, 1, 0, 0, 1));
}

/// Tests that errors carry the 1-based line number of the bad line.
#[test]
fn test_parse_error_line_numbers() {
    let err = parse_program("MOVC,R1,#1\n\nFOO,R1\n").unwrap_err();
    assert_eq!(err.line, 3);
    assert!(err.message.contains("FOO"));

    let err = parse_program("ADD,R1,R2\n").unwrap_err();
    assert_eq!(err.line, 1);

    let err = parse_program("MOVC,R1,5\n").unwrap_err();
    assert!(err.message.contains("literal"));

    let err = parse_program("MOVC,X1,#5\n").unwrap_err();
    assert!(err.message.contains("register"));
}

/// Tests loading a program from a file.
#[test]
fn test_load_program_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "MOVC,R0,#5").unwrap();
    writeln!(file, "HALT").unwrap();

    let program = load_program(file.path()).unwrap();
    assert_eq!(program.len(), 2);
    assert_eq!(program[1].opcode, Opcode::Halt);
}

/// Tests that a parse failure names the file.
#[test]
fn test_load_program_parse_failure() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "MOVC,R0").unwrap();

    match load_program(file.path()) {
        Err(SimError::Parse { path, source }) => {
            assert_eq!(path, file.path());
            assert_eq!(source.line, 1);
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

/// Tests that a missing file is an I/O error.
#[test]
fn test_load_program_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.asm");
    assert!(matches!(load_program(&missing), Err(SimError::Io { .. })));
}
