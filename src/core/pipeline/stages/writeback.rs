//! Writeback (WB) Stage.
//!
//! Commits register results, releases the ready bits and the condition-code
//! validity bit when no younger in-flight instruction still owns them, and
//! counts the retired instruction.

use log::{debug, trace};

use crate::core::pipeline::hazards;
use crate::core::pipeline::traits::PipelineLatch;
use crate::core::Cpu;
use crate::isa::Opcode;

/// Result of one Writeback turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WritebackOutcome {
    /// Nothing occupied Writeback.
    Idle,
    /// An instruction retired.
    Retired,
    /// HALT retired; the simulation must stop before any other stage runs.
    Halt,
}

/// Executes the writeback stage of the instruction pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
///
/// # Returns
///
/// What happened in Writeback this cycle.
pub fn wb_stage(cpu: &mut Cpu) -> WritebackOutcome {
    if cpu.latches.writeback.is_empty() {
        return WritebackOutcome::Idle;
    }

    let latch = cpu.latches.writeback.take();
    let op = latch.opcode;
    trace!("WB  pc={} {}", latch.pc, latch.instruction());

    match op {
        Opcode::Loadp => {
            cpu.regs.write(latch.rs1, latch.rs1_value);
            cpu.regs.write(latch.rd, latch.result);
        }
        Opcode::Storep => cpu.regs.write(latch.rs2, latch.rs2_value),
        _ => {
            if let [Some(rd), None] = latch.destinations() {
                cpu.regs.write(rd, latch.result);
            }
        }
    }

    for reg in latch.destinations().into_iter().flatten() {
        hazards::release_register(cpu, reg);
    }

    if op.is_flag_producer() && !hazards::flag_producer_in_flight(&cpu.latches) {
        cpu.flags.valid = true;
    }

    let stats = &mut cpu.stats;
    stats.instructions_retired += 1;
    if op.is_load() {
        stats.inst_load += 1;
    } else if op.is_store() {
        stats.inst_store += 1;
    } else if op.is_conditional_branch() || op.is_jump() {
        stats.inst_branch += 1;
    } else if op.is_compare() {
        stats.inst_compare += 1;
    } else if op.is_register_arith() || op.is_immediate_arith() || op == Opcode::Movc {
        stats.inst_alu += 1;
    } else {
        stats.inst_other += 1;
    }

    if op == Opcode::Halt {
        cpu.halted = true;
        debug!("cycle {}: HALT retired at pc {}", cpu.clock, latch.pc);
        return WritebackOutcome::Halt;
    }

    WritebackOutcome::Retired
}
