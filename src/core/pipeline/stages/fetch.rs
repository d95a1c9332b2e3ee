//! Instruction Fetch (IF) Stage.
//!
//! Fetch reads the instruction at the program counter, advances the counter
//! by one instruction width, and hands the instruction to Decode when Decode
//! has room. It is the only stage that advances the counter in sequential
//! flow.

use log::trace;

use crate::core::pipeline::latches::StageLatch;
use crate::core::pipeline::traits::PipelineLatch;
use crate::core::Cpu;

/// Executes the fetch stage of the instruction pipeline.
///
/// Does nothing once a HALT has been decoded, and nothing in a cycle in
/// which Execute redirected the program counter. If Decode still holds an
/// instruction (it stalled this cycle), the fetched instruction is kept in
/// the Fetch latch and offered again next cycle instead of fetching anew.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
pub fn fetch_stage(cpu: &mut Cpu) {
    if cpu.fetch_halted {
        cpu.latches.fetch.flush();
        return;
    }

    if cpu.fetch_from_next_cycle {
        cpu.fetch_from_next_cycle = false;
        return;
    }

    if cpu.latches.fetch.is_empty() {
        let Some(inst) = cpu.code.fetch(cpu.pc) else {
            return;
        };
        cpu.latches.fetch = StageLatch::from_instruction(cpu.pc, inst);
        trace!("IF  pc={} {}", cpu.pc, inst);
        cpu.pc = cpu.pc.wrapping_add(cpu.instruction_width);
    }

    if cpu.latches.decode.is_empty() {
        let mut latch = cpu.latches.fetch.take();
        latch.stalled = false;
        cpu.latches.decode = latch;
    } else {
        cpu.latches.fetch.stalled = true;
        cpu.stats.stalls_fetch += 1;
    }
}
