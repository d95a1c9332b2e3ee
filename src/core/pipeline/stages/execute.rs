//! Execute (EX) Stage.
//!
//! This module implements the execution stage of the pipeline. It is responsible for:
//! - Computing ALU results and setting the condition codes.
//! - Computing effective addresses and post-incremented base values for memory ops.
//! - Resolving branches and jumps, and flushing the wrong path when they redirect.
//! - Holding MUL and DIV for their configured latency.

use log::{debug, trace};

use crate::common::constants::WORD_ALIGN_MASK;
use crate::core::control::flush_and_redirect;
use crate::core::pipeline::signals::{AluOp, OpBSrc};
use crate::core::pipeline::traits::PipelineLatch;
use crate::core::units::alu::Alu;
use crate::core::units::lsu::Lsu;
use crate::core::Cpu;
use crate::isa::Opcode;

/// Executes the Execute stage of the pipeline.
///
/// Consumes the Execute latch and produces the Memory latch. While a
/// multi-cycle instruction is being held, the Execute latch stays stalled
/// and Memory receives a bubble.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
pub fn execute_stage(cpu: &mut Cpu) {
    if cpu.latches.execute.is_empty() {
        return;
    }

    let op = cpu.latches.execute.opcode;

    if op.is_flag_producer() {
        cpu.flags.valid = false;
    }

    if op.is_multi_cycle() && cpu.mul_div_latency > 1 {
        let latch = &mut cpu.latches.execute;
        if !latch.stalled {
            latch.stalled = true;
            cpu.ex_cycles_remaining = cpu.mul_div_latency - 1;
            trace!("EX  pc={} {} busy for {} cycle(s)", latch.pc, op, cpu.mul_div_latency);
            return;
        }
        cpu.ex_cycles_remaining = cpu.ex_cycles_remaining.saturating_sub(1);
        if cpu.ex_cycles_remaining > 0 {
            return;
        }
    }

    let mut latch = cpu.latches.execute.take();
    latch.stalled = false;
    trace!("EX  pc={} {}", latch.pc, latch.instruction());

    match op {
        Opcode::Movc => {
            latch.result = latch.imm;
            cpu.flags.update(latch.result);
        }
        Opcode::Load | Opcode::Loadp => {
            latch.memory_address = Lsu::effective_address(latch.rs1_value, latch.imm);
            if op == Opcode::Loadp {
                latch.rs1_value = Lsu::post_increment(latch.rs1_value);
            }
        }
        Opcode::Store | Opcode::Storep => {
            latch.memory_address = Lsu::effective_address(latch.rs2_value, latch.imm);
            if op == Opcode::Storep {
                latch.rs2_value = Lsu::post_increment(latch.rs2_value);
            }
        }
        Opcode::Jump | Opcode::Jalr => {
            let target = latch.rs1_value.wrapping_add(latch.imm) & WORD_ALIGN_MASK;
            if op == Opcode::Jalr {
                latch.result = latch.pc.wrapping_add(cpu.instruction_width) as i32;
            } else {
                latch.result = target;
            }
            cpu.stats.branches_taken += 1;
            debug!("cycle {}: {} at pc {} jumps to {}", cpu.clock, op, latch.pc, target);
            flush_and_redirect(cpu, target as u32);
        }
        _ if op.is_conditional_branch() => {
            if cpu.flags.branch_taken(op) {
                let target = (latch.pc as i32).wrapping_add(latch.imm);
                latch.result = target;
                cpu.stats.branches_taken += 1;
                debug!("cycle {}: {} at pc {} taken to {}", cpu.clock, op, latch.pc, target);
                flush_and_redirect(cpu, target as u32);
            } else {
                cpu.stats.branches_not_taken += 1;
            }
        }
        _ => {
            if let Some((alu_op, b_src)) = AluOp::for_opcode(op) {
                let b = match b_src {
                    OpBSrc::Reg2 => latch.rs2_value,
                    OpBSrc::Imm => latch.imm,
                };
                latch.result = Alu::execute(alu_op, latch.rs1_value, b);
                if op.updates_flags() {
                    cpu.flags.update(latch.result);
                }
            }
        }
    }

    cpu.latches.memory = latch;
}
