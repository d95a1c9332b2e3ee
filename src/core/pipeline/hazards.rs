//! Hazard Detection.
//!
//! The pipeline never forwards operands. Instead Decode holds an instruction
//! until every source register is ready, until the condition codes are
//! valid (conditional branches only), and until Execute has room for it.
//! Writeback uses the same latch scans to decide whether a committed
//! register or the condition codes can be released.

use crate::core::arch::gpr::RegisterFile;
use crate::core::pipeline::latches::{Latches, StageLatch};
use crate::core::Cpu;

/// Reason Decode cannot issue its instruction this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeHazard {
    /// Execute is still holding a multi-cycle instruction.
    Structural,
    /// A source register awaits a write from an in-flight instruction.
    Data { register: usize },
    /// A conditional branch is waiting for the condition codes to settle.
    Flags,
}

/// Checks every source register of the Decode occupant in one pass.
///
/// Returns the first register that is not ready, or `None` if all sources
/// can be read. Both sources of a two-source instruction are checked before
/// anything is marked pending, so a partially ready pair never issues.
///
/// # Arguments
///
/// * `regs` - Register file holding the ready vector
/// * `latch` - Decode latch
pub fn blocked_source(regs: &RegisterFile, latch: &StageLatch) -> Option<usize> {
    latch
        .instruction()
        .sources()
        .into_iter()
        .flatten()
        .find(|&reg| !regs.is_ready(reg))
}

/// Determines whether the Decode occupant must stall this cycle.
///
/// Must be called after Execute has run for the cycle, so an occupied
/// Execute latch means Execute is holding its instruction.
///
/// # Returns
///
/// The hazard that blocks issue, or `None` if the instruction can advance.
pub fn decode_hazard(cpu: &Cpu) -> Option<DecodeHazard> {
    let latch = &cpu.latches.decode;
    if latch.empty {
        return None;
    }
    if !cpu.latches.execute.empty {
        return Some(DecodeHazard::Structural);
    }
    if let Some(register) = blocked_source(&cpu.regs, latch) {
        return Some(DecodeHazard::Data { register });
    }
    if latch.opcode.is_conditional_branch() && !cpu.flags.valid {
        return Some(DecodeHazard::Flags);
    }
    None
}

/// Returns `true` if an instruction in Execute or Memory will still write
/// `reg`.
///
/// Called from Writeback, which runs first in the cycle, so the Execute and
/// Memory latches hold instructions younger than the one committing.
pub fn pending_writer(latches: &Latches, reg: usize) -> bool {
    latches.execute.writes(reg) || latches.memory.writes(reg)
}

/// Returns `true` if a flag-producing instruction sits in Execute or Memory.
pub fn flag_producer_in_flight(latches: &Latches) -> bool {
    latches.execute.produces_flags() || latches.memory.produces_flags()
}

/// Marks `reg` ready after a commit unless a younger in-flight instruction
/// still owns it.
pub fn release_register(cpu: &mut Cpu, reg: usize) {
    if !pending_writer(&cpu.latches, reg) {
        cpu.regs.mark_ready(reg);
    }
}
