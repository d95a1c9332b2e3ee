//! Simulation driver.
//!
//! Ticks the CPU until HALT retires or one of two independent limits is
//! reached: a cycle budget and an optional retired-instruction limit. Limits
//! are checked at cycle boundaries only, never mid-cycle.

use std::fmt;

use log::info;

use crate::common::SimResult;
use crate::core::{CycleOutcome, Cpu};

/// Stop conditions for a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunLimits {
    /// Maximum number of completed cycles.
    pub max_cycles: u64,
    /// Stop once this many instructions have retired.
    pub max_instructions: Option<u64>,
}

impl RunLimits {
    /// Limits with only a cycle budget.
    pub fn cycles(max_cycles: u64) -> Self {
        Self {
            max_cycles,
            max_instructions: None,
        }
    }
}

/// Why a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// HALT retired in Writeback.
    Halted,
    /// The cycle budget ran out before HALT retired.
    CycleBudgetExhausted,
    /// The retired-instruction limit was reached.
    InstructionLimitReached,
    /// The user ended an interactive run.
    UserQuit,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            StopReason::Halted => "halted",
            StopReason::CycleBudgetExhausted => "cycle budget exhausted",
            StopReason::InstructionLimitReached => "instruction limit reached",
            StopReason::UserQuit => "stopped by user",
        };
        f.write_str(text)
    }
}

/// Outcome of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub reason: StopReason,
    /// Completed cycles.
    pub cycles: u64,
    /// Retired instructions.
    pub instructions: u64,
}

/// Drives a [`Cpu`] under a set of [`RunLimits`].
pub struct Simulator {
    pub cpu: Cpu,
    pub limits: RunLimits,
}

impl Simulator {
    pub fn new(cpu: Cpu, limits: RunLimits) -> Self {
        Self { cpu, limits }
    }

    /// Checks the stop conditions at a cycle boundary.
    ///
    /// A HALT waiting in Writeback always gets to retire, since its commit
    /// happens before any stage of the next cycle runs.
    fn limit_reached(&self) -> Option<StopReason> {
        if self.cpu.halted {
            return Some(StopReason::Halted);
        }
        if self.cpu.halt_pending() {
            return None;
        }
        if self.cpu.cycles() >= self.limits.max_cycles {
            return Some(StopReason::CycleBudgetExhausted);
        }
        if let Some(max) = self.limits.max_instructions {
            if self.cpu.instructions_completed() >= max {
                return Some(StopReason::InstructionLimitReached);
            }
        }
        None
    }

    /// Runs one cycle unless a stop condition already holds.
    ///
    /// # Returns
    ///
    /// `Some(reason)` once the run is over, `None` if it can continue.
    pub fn step(&mut self) -> SimResult<Option<StopReason>> {
        if let Some(reason) = self.limit_reached() {
            return Ok(Some(reason));
        }
        match self.cpu.tick()? {
            CycleOutcome::Halted => Ok(Some(StopReason::Halted)),
            CycleOutcome::Advanced => Ok(self.limit_reached()),
        }
    }

    /// Runs until a stop condition holds.
    pub fn run(&mut self) -> SimResult<RunSummary> {
        let reason = loop {
            if let Some(reason) = self.step()? {
                break reason;
            }
        };
        Ok(self.finish(reason))
    }

    /// Summarizes the run so far under `reason`.
    pub fn finish(&self, reason: StopReason) -> RunSummary {
        let summary = RunSummary {
            reason,
            cycles: self.cpu.cycles(),
            instructions: self.cpu.instructions_completed(),
        };
        info!(
            "simulation ended ({}): {} cycle(s), {} instruction(s)",
            summary.reason, summary.cycles, summary.instructions
        );
        summary
    }
}
