//! Simulation statistics collection and reporting.
//!
//! Tracks cycle and instruction counts, the retired instruction mix, branch
//! outcomes, flushes, and the stalls each hazard class caused.

use std::fs;
use std::path::Path;
use std::time::Instant;

use serde::Serialize;

use crate::common::{SimError, SimResult};

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug, Serialize)]
pub struct SimStats {
    #[serde(skip)]
    start_time: Instant,
    pub cycles: u64,
    pub instructions_retired: u64,

    pub inst_alu: u64,
    pub inst_load: u64,
    pub inst_store: u64,
    pub inst_branch: u64,
    pub inst_compare: u64,
    pub inst_other: u64,

    /// Taken conditional branches plus JUMP and JALR.
    pub branches_taken: u64,
    pub branches_not_taken: u64,
    pub flushes: u64,
    pub squashed_instructions: u64,

    pub stalls_data: u64,
    pub stalls_flags: u64,
    pub stalls_structural: u64,
    pub stalls_fetch: u64,
}

impl Default for SimStats {
    /// Returns the default value.
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_compare: 0,
            inst_other: 0,
            branches_taken: 0,
            branches_not_taken: 0,
            flushes: 0,
            squashed_instructions: 0,
            stalls_data: 0,
            stalls_flags: 0,
            stalls_structural: 0,
            stalls_fetch: 0,
        }
    }
}

impl SimStats {
    /// Serializes the counters as pretty-printed JSON.
    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the counters as JSON to `path`.
    pub fn write_json(&self, path: impl AsRef<Path>) -> SimResult<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Prints a formatted summary of all simulation statistics.
    ///
    /// Displays IPC/CPI, the stall breakdown, the instruction mix and the
    /// branch outcomes in a human-readable format.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();

        let cyc = self.cycles.max(1);
        let instr = self.instructions_retired.max(1);

        let ipc = self.instructions_retired as f64 / cyc as f64;
        let cpi = self.cycles as f64 / instr as f64;
        let pct = |n: u64, of: u64| (n as f64 / of as f64) * 100.0;

        println!("\n==========================================================");
        println!("APEX PIPELINE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {:.4} s", seconds);
        println!("sim_cycles               {}", self.cycles);
        println!("sim_insts                {}", self.instructions_retired);
        println!("sim_ipc                  {:.4}", ipc);
        println!("sim_cpi                  {:.4}", cpi);
        println!("----------------------------------------------------------");
        println!("STALLS");
        println!(
            "  stalls.data            {} ({:.2}%)",
            self.stalls_data,
            pct(self.stalls_data, cyc)
        );
        println!(
            "  stalls.flags           {} ({:.2}%)",
            self.stalls_flags,
            pct(self.stalls_flags, cyc)
        );
        println!(
            "  stalls.structural      {} ({:.2}%)",
            self.stalls_structural,
            pct(self.stalls_structural, cyc)
        );
        println!(
            "  stalls.fetch           {} ({:.2}%)",
            self.stalls_fetch,
            pct(self.stalls_fetch, cyc)
        );
        println!("----------------------------------------------------------");
        println!("INSTRUCTION MIX");
        for (name, count) in [
            ("op.alu", self.inst_alu),
            ("op.load", self.inst_load),
            ("op.store", self.inst_store),
            ("op.branch", self.inst_branch),
            ("op.compare", self.inst_compare),
            ("op.other", self.inst_other),
        ] {
            println!("  {:<22} {} ({:.2}%)", name, count, pct(count, instr));
        }
        println!("----------------------------------------------------------");
        println!("CONTROL FLOW");
        println!("  branch.taken           {}", self.branches_taken);
        println!("  branch.not_taken       {}", self.branches_not_taken);
        println!("  flushes                {}", self.flushes);
        println!("  squashed               {}", self.squashed_instructions);
        println!("==========================================================");
    }
}
