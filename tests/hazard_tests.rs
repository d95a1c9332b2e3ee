//! Tests for register readiness and condition-code validity.

use apex_sim::config::Config;
use apex_sim::core::pipeline::hazards::{self, DecodeHazard};
use apex_sim::core::{CycleOutcome, Cpu};
use apex_sim::isa::Opcode;
use apex_sim::sim::loader::parse_program;
use pretty_assertions::assert_eq;

fn cpu(text: &str) -> Cpu {
    Cpu::new(parse_program(text).unwrap(), &Config::default()).unwrap()
}

/// Tests that a RAW dependency stalls Decode until the producer retires.
#[test]
fn test_raw_stall_until_writeback() {
    let mut cpu = cpu("MOVC,R1,#10\nADD,R2,R1,R1\nHALT");

    for _ in 0..3 {
        cpu.tick().unwrap();
    }
    assert_eq!(
        hazards::decode_hazard(&cpu),
        Some(DecodeHazard::Data { register: 1 })
    );
    cpu.tick().unwrap();
    assert_eq!(cpu.stats.stalls_data, 2);

    // MOVC commits in cycle 5 and ADD issues in the same cycle.
    cpu.tick().unwrap();
    assert_eq!(cpu.latches.execute.opcode, Opcode::Add);
    assert_eq!(cpu.latches.execute.rs1_value, 10);

    while cpu.tick().unwrap() == CycleOutcome::Advanced {}
    assert_eq!(cpu.regs.read(2), 20);
    assert_eq!(cpu.cycles(), 8);
    assert_eq!(cpu.stats.stalls_data, 2);
}

/// Tests that a register is never ready between its Decode and Writeback.
#[test]
fn test_ready_bit_window() {
    let mut cpu = cpu("MOVC,R1,#10\nADD,R2,R1,R1\nHALT");
    let mut ready_after = Vec::new();
    while cpu.tick().unwrap() == CycleOutcome::Advanced {
        ready_after.push(cpu.regs.is_ready(1));
    }
    // MOVC marks R1 pending in cycle 2 and commits it in cycle 5.
    assert_eq!(
        ready_after,
        vec![true, false, false, false, true, true, true, true]
    );
}

/// Tests that a register stays pending while a younger writer is in flight.
#[test]
fn test_overlapping_writers_keep_register_pending() {
    let mut cpu = cpu("MOVC,R1,#1\nMOVC,R1,#2\nADD,R2,R1,R1\nHALT");

    // First MOVC commits in cycle 5 while the second is in Memory.
    for _ in 0..5 {
        cpu.tick().unwrap();
    }
    assert_eq!(cpu.regs.read(1), 1);
    assert!(!cpu.regs.is_ready(1));

    while cpu.tick().unwrap() == CycleOutcome::Advanced {}
    assert_eq!(cpu.regs.read(1), 2);
    assert_eq!(cpu.regs.read(2), 4);
    assert!(cpu.regs.is_ready(1));
}

/// Tests that both sources are checked together before anything is marked
/// pending.
#[test]
fn test_atomic_source_check() {
    let mut cpu = cpu("MOVC,R1,#1\nMOVC,R2,#2\nADD,R3,R1,R2\nHALT");
    for _ in 0..4 {
        cpu.tick().unwrap();
    }
    // R1 commits next cycle, R2 one cycle later; ADD must not mark R3 pending yet.
    assert!(cpu.latches.decode.stalled);
    assert!(cpu.regs.is_ready(3));

    while cpu.tick().unwrap() == CycleOutcome::Advanced {}
    assert_eq!(cpu.regs.read(3), 3);
}

/// Tests the condition-code validity window around a flag producer.
#[test]
fn test_flags_valid_window() {
    let mut cpu = cpu(
        "MOVC,R1,#2\nSUBL,R1,R1,#1\nBZ,#12\nMOVC,R2,#99\nMOVC,R3,#77\nMOVC,R4,#5\nHALT",
    );
    let mut valid_after = Vec::new();
    for _ in 0..9 {
        cpu.tick().unwrap();
        valid_after.push(cpu.flags.valid);
    }
    // SUBL executes in cycle 6 and commits in cycle 8, when BZ issues.
    assert_eq!(
        valid_after,
        vec![true, true, true, true, true, false, false, true, true]
    );
    assert_eq!(cpu.stats.stalls_flags, 2);
    assert_eq!(cpu.stats.branches_not_taken, 1);
}

/// Tests that a branch waits while a flag producer is in flight.
#[test]
fn test_branch_stalls_on_invalid_flags() {
    let mut cpu = cpu("MOVC,R1,#2\nSUBL,R1,R1,#1\nBZ,#12\nHALT");
    for _ in 0..6 {
        cpu.tick().unwrap();
    }
    assert_eq!(cpu.latches.decode.opcode, Opcode::Bz);
    assert_eq!(hazards::decode_hazard(&cpu), Some(DecodeHazard::Flags));
}

/// Tests that MOVC sets flags without invalidating them.
#[test]
fn test_movc_does_not_invalidate_flags() {
    let mut cpu = cpu("MOVC,R1,#0\nBZ,#8\nMOVC,R2,#5\nHALT");
    while cpu.tick().unwrap() == CycleOutcome::Advanced {}
    assert_eq!(cpu.stats.stalls_flags, 0);
    assert_eq!(cpu.stats.branches_taken, 1);
    assert_eq!(cpu.regs.read(2), 0);
}

/// Tests the structural hazard raised by a multi-cycle Execute.
#[test]
fn test_structural_hazard() {
    let mut config = Config::default();
    config.pipeline.mul_div_latency = 4;
    let program = parse_program("MUL,R1,R2,R3\nMOVC,R4,#1\nHALT").unwrap();
    let mut cpu = Cpu::new(program, &config).unwrap();

    for _ in 0..3 {
        cpu.tick().unwrap();
    }
    assert!(cpu.latches.execute.stalled);
    assert!(cpu.latches.memory.empty);
    assert_eq!(hazards::decode_hazard(&cpu), Some(DecodeHazard::Structural));

    while cpu.tick().unwrap() == CycleOutcome::Advanced {}
    assert_eq!(cpu.stats.stalls_structural, 3);
    assert_eq!(cpu.regs.read(4), 1);
}
