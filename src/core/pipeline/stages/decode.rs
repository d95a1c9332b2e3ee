//! Instruction Decode / Register Read (ID) Stage.
//!
//! Decode checks the hazards of its occupant, reads the source registers,
//! marks the destination registers pending, and issues the instruction to
//! Execute. A blocked instruction stays in place with its latch marked
//! stalled and is re-checked on the next cycle.

use log::{debug, trace};

use crate::core::pipeline::hazards::{self, DecodeHazard};
use crate::core::pipeline::traits::PipelineLatch;
use crate::core::Cpu;
use crate::isa::Opcode;

/// Executes the decode stage of the instruction pipeline.
///
/// HALT issues like any other instruction but also stops Fetch for good and
/// discards whatever Fetch already holds, so nothing follows it into the
/// pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
pub fn decode_stage(cpu: &mut Cpu) {
    if cpu.latches.decode.is_empty() {
        return;
    }

    if let Some(hazard) = hazards::decode_hazard(cpu) {
        cpu.latches.decode.stalled = true;
        match hazard {
            DecodeHazard::Structural => cpu.stats.stalls_structural += 1,
            DecodeHazard::Data { .. } => cpu.stats.stalls_data += 1,
            DecodeHazard::Flags => cpu.stats.stalls_flags += 1,
        }
        debug!(
            "cycle {}: decode stall at pc {} ({}): {:?}",
            cpu.clock,
            cpu.latches.decode.pc,
            cpu.latches.decode.instruction(),
            hazard
        );
        return;
    }

    let mut latch = cpu.latches.decode.take();
    latch.stalled = false;

    let [src1, src2] = latch.instruction().sources();
    if let Some(reg) = src1 {
        latch.rs1_value = cpu.regs.read(reg);
    }
    if let Some(reg) = src2 {
        latch.rs2_value = cpu.regs.read(reg);
    }

    for reg in latch.destinations().into_iter().flatten() {
        cpu.regs.mark_pending(reg);
    }

    if latch.opcode == Opcode::Halt {
        cpu.fetch_halted = true;
        cpu.latches.fetch.flush();
        debug!("cycle {}: HALT decoded at pc {}, fetch stopped", cpu.clock, latch.pc);
    }

    trace!("ID  pc={} {}", latch.pc, latch.instruction());

    cpu.latches.execute = latch;
}
