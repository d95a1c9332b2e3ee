//! Control-flow redirection.
//!
//! Branches and jumps resolve in Execute. Because stages run from Writeback
//! back to Fetch, Execute runs before Decode and Fetch in the same cycle,
//! so a single flush can discard the wrong-path instructions before they
//! make progress. Only Fetch and Decode can hold instructions younger than
//! the one resolving in Execute; Memory and Writeback hold older ones that
//! must still retire.

use log::debug;

use crate::core::pipeline::traits::PipelineLatch;
use crate::core::Cpu;

/// Squashes the Fetch and Decode latches and redirects the program counter.
///
/// Fetch is suppressed for the rest of the cycle, so the first instruction
/// of the new path is fetched on the next cycle.
///
/// # Arguments
///
/// * `cpu` - CPU whose pipeline is redirected
/// * `target` - New program counter
pub fn flush_and_redirect(cpu: &mut Cpu, target: u32) {
    let squashed = [&cpu.latches.fetch, &cpu.latches.decode]
        .iter()
        .filter(|latch| !latch.is_empty())
        .count() as u64;

    cpu.latches.fetch.flush();
    cpu.latches.decode.flush();
    cpu.pc = target;
    cpu.fetch_from_next_cycle = true;

    cpu.stats.flushes += 1;
    cpu.stats.squashed_instructions += squashed;

    debug!(
        "cycle {}: redirect to pc {}, squashed {} instruction(s)",
        cpu.clock, target, squashed
    );
}
