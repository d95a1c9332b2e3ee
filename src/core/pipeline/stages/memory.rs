//! Memory Access (MEM) Stage.
//!
//! Performs the single data memory access of LOAD, LOADP, STORE and STOREP.
//! Every other opcode passes through untouched. Memory never stalls.

use log::trace;

use crate::common::SimResult;
use crate::core::pipeline::traits::PipelineLatch;
use crate::core::Cpu;

/// Executes the memory access stage of the instruction pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
///
/// # Returns
///
/// An error if a load or store addresses a word outside data memory.
pub fn mem_stage(cpu: &mut Cpu) -> SimResult<()> {
    if cpu.latches.memory.is_empty() {
        return Ok(());
    }

    let latch = &mut cpu.latches.memory;
    let op = latch.opcode;

    if op.is_load() {
        latch.result = cpu.data_memory.read(latch.pc, latch.memory_address)?;
        trace!("MEM pc={} load [{}] -> {}", latch.pc, latch.memory_address, latch.result);
    } else if op.is_store() {
        cpu.data_memory
            .write(latch.pc, latch.memory_address, latch.rs1_value)?;
        trace!("MEM pc={} store {} -> [{}]", latch.pc, latch.rs1_value, latch.memory_address);
    }

    cpu.latches.writeback = cpu.latches.memory.take();
    Ok(())
}
