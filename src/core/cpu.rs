//! CPU state and cycle sequencing.
//!
//! A cycle runs the five stages in reverse pipeline order: Writeback,
//! Memory, Execute, Decode, Fetch. Each stage reads its own latch before the
//! upstream stage overwrites it, so no stage observes a same-cycle write
//! from a stage that is ahead of it in program order.

use log::{debug, info};

use super::arch::flags::ConditionCodes;
use super::arch::gpr::RegisterFile;
use super::memory::{CodeMemory, DataMemory};
use super::pipeline::latches::{Latches, StageLatch};
use super::pipeline::stages::{self, WritebackOutcome};
use crate::common::{SimError, SimResult};
use crate::config::Config;
use crate::isa::{Instruction, Opcode};
use crate::stats::SimStats;

/// Result of one call to [`Cpu::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// All five stages ran and the clock advanced.
    Advanced,
    /// HALT retired in Writeback; no other stage ran and the clock did not
    /// advance.
    Halted,
}

/// The APEX processor.
pub struct Cpu {
    /// Address of the next instruction Fetch will read.
    pub pc: u32,
    /// Number of the cycle in progress; starts at 1.
    pub clock: u64,
    pub regs: RegisterFile,
    pub flags: ConditionCodes,
    pub data_memory: DataMemory,
    pub code: CodeMemory,
    pub latches: Latches,

    /// Set once HALT is decoded; Fetch produces nothing afterwards.
    pub fetch_halted: bool,
    /// Set by a redirect; Fetch skips the rest of the current cycle.
    pub fetch_from_next_cycle: bool,
    /// Cycles a multi-cycle instruction still needs in Execute.
    pub ex_cycles_remaining: u32,
    pub mul_div_latency: u32,
    pub instruction_width: u32,

    /// Set once HALT retires.
    pub halted: bool,
    /// Print the stage contents at the start of every cycle.
    pub trace: bool,
    pub stats: SimStats,
}

impl Cpu {
    /// Builds a CPU with `program` loaded at the configured start pc.
    ///
    /// # Arguments
    ///
    /// * `program` - Decoded instructions, in address order
    /// * `config` - Architectural sizes and pipeline timing
    ///
    /// # Returns
    ///
    /// The CPU, or an error if the configuration is invalid, the program is
    /// empty, or an instruction names a register the register file lacks.
    pub fn new(program: Vec<Instruction>, config: &Config) -> SimResult<Self> {
        config.validate()?;
        if program.is_empty() {
            return Err(SimError::EmptyProgram);
        }

        let code = CodeMemory::new(
            program,
            config.pipeline.start_pc,
            config.pipeline.instruction_width,
        );
        let count = config.memory.register_count;
        for (idx, inst) in code.instructions().iter().enumerate() {
            if let Some(index) = inst.registers().find(|&r| r >= count) {
                return Err(SimError::RegisterOutOfRange {
                    pc: code.pc_of(idx),
                    index,
                    count,
                });
            }
        }

        info!(
            "loaded {} instruction(s) at pc {}",
            code.len(),
            config.pipeline.start_pc
        );

        Ok(Self {
            pc: config.pipeline.start_pc,
            clock: 1,
            regs: RegisterFile::new(count),
            flags: ConditionCodes::default(),
            data_memory: DataMemory::new(config.memory.data_memory_size),
            code,
            latches: Latches::default(),
            fetch_halted: false,
            fetch_from_next_cycle: false,
            ex_cycles_remaining: 0,
            mul_div_latency: config.pipeline.mul_div_latency,
            instruction_width: config.pipeline.instruction_width,
            halted: false,
            trace: config.general.trace_instructions,
            stats: SimStats::default(),
        })
    }

    /// Advances the pipeline by one clock cycle.
    ///
    /// Writeback runs first. If it retires HALT the cycle ends there: no
    /// other stage runs and the clock is not advanced.
    ///
    /// # Returns
    ///
    /// Whether the cycle completed or the CPU halted, or an error if a
    /// load or store addressed a word outside data memory. On error no
    /// stage has run and the state is as it was before the call.
    pub fn tick(&mut self) -> SimResult<CycleOutcome> {
        if self.halted {
            return Ok(CycleOutcome::Halted);
        }

        let mem = &self.latches.memory;
        if !mem.empty && (mem.opcode.is_load() || mem.opcode.is_store()) {
            self.data_memory.check(mem.pc, mem.memory_address)?;
        }

        if self.trace {
            self.print_pipeline_diagram();
        }

        if stages::wb_stage(self) == WritebackOutcome::Halt {
            info!(
                "halted after {} cycle(s), {} instruction(s)",
                self.cycles(),
                self.instructions_completed()
            );
            return Ok(CycleOutcome::Halted);
        }

        stages::mem_stage(self)?;
        stages::execute_stage(self);
        stages::decode_stage(self);
        stages::fetch_stage(self);

        self.clock += 1;
        self.stats.cycles += 1;
        Ok(CycleOutcome::Advanced)
    }

    /// Number of completed cycles.
    pub fn cycles(&self) -> u64 {
        self.clock - 1
    }

    /// Number of retired instructions, NOP and HALT included.
    pub fn instructions_completed(&self) -> u64 {
        self.stats.instructions_retired
    }

    /// Returns `true` if HALT sits in the Writeback latch and will retire at
    /// the start of the next tick.
    pub fn halt_pending(&self) -> bool {
        let wb = &self.latches.writeback;
        !wb.empty && wb.opcode == Opcode::Halt
    }

    /// Prints what each stage is about to process this cycle.
    pub fn print_pipeline_diagram(&self) {
        println!("--------------------------------");
        println!("Clock Cycle #: {}", self.clock);
        println!("--------------------------------");
        for (name, latch) in self.latches.iter() {
            println!("{:<12}: {}", name, self.describe(latch));
        }
    }

    fn describe(&self, latch: &StageLatch) -> String {
        if latch.empty {
            return "EMPTY".to_string();
        }
        let hold = if latch.stalled { " [stalled]" } else { "" };
        format!("(I{}: {}) {}{}", self.index_of(latch.pc), latch.pc, latch.instruction(), hold)
    }

    fn index_of(&self, pc: u32) -> u32 {
        pc.saturating_sub(self.code.base()) / self.instruction_width
    }

    /// Prints the final architectural state.
    ///
    /// # Arguments
    ///
    /// * `memory_words` - Number of data memory words to include
    pub fn dump_state(&self, memory_words: usize) {
        self.flags.dump();
        self.regs.dump();
        self.data_memory.dump(memory_words);
        debug!("pc at dump: {}", self.pc);
    }
}
