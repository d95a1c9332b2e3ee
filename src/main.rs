//! APEX Pipeline Simulator CLI.
//!
//! The main executable for the simulator. It parses the command line, loads
//! the configuration and the program, runs the simulation, and prints the
//! final state.
//!
//! # Usage
//!
//! ```text
//! apex-sim <input_file> simulate <cycles>
//! apex-sim <input_file> display <cycles>
//! ```
//!
//! `display` prints every stage's content at the start of each cycle.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};

use apex_sim::common::SimResult;
use apex_sim::config::Config;
use apex_sim::core::Cpu;
use apex_sim::sim::loader;
use apex_sim::sim::{RunLimits, RunSummary, Simulator, StopReason};

/// What to do with the program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Function {
    /// Run and print the final state.
    Simulate,
    /// Run with the per-cycle stage dump enabled.
    Display,
}

/// Command-line arguments for the APEX simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "APEX five-stage pipeline simulator")]
struct Args {
    /// Program text file.
    input_file: PathBuf,

    /// Run mode.
    #[arg(value_enum)]
    function: Function,

    /// Maximum number of cycles to simulate.
    cycles: u64,

    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also stop once this many instructions have retired.
    #[arg(long)]
    max_instructions: Option<u64>,

    /// Wait for Enter after every cycle; `q` stops the run.
    #[arg(long)]
    step: bool,

    /// Write the statistics as JSON to this file.
    #[arg(long)]
    stats_json: Option<PathBuf>,
}

/// Main entry point for the APEX simulator.
///
/// Exits with status 1 on a usage error, a construction failure or a fatal
/// runtime error, and with status 0 otherwise.
fn main() {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            process::exit(1);
        }
        Err(e) => e.exit(),
    };

    if let Err(e) = run(&args) {
        eprintln!("APEX_Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> SimResult<()> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if args.function == Function::Display {
        config.general.trace_instructions = true;
    }

    let program = loader::load_program(&args.input_file)?;
    let cpu = Cpu::new(program, &config)?;
    let limits = RunLimits {
        max_cycles: args.cycles,
        max_instructions: args.max_instructions,
    };
    let mut sim = Simulator::new(cpu, limits);

    let summary = if args.step {
        run_interactive(&mut sim)?
    } else {
        sim.run()?
    };

    report(&sim, &summary, &config);

    if let Some(path) = &args.stats_json {
        sim.cpu.stats.write_json(path)?;
    }
    Ok(())
}

/// Runs one cycle per line read from stdin until the run ends or the user
/// enters `q`.
fn run_interactive(sim: &mut Simulator) -> SimResult<RunSummary> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if let Some(reason) = sim.step()? {
            return Ok(sim.finish(reason));
        }
        println!("Press any key to advance CPU Clock or <q> to quit:");
        match lines.next() {
            Some(Ok(line)) if line.trim().eq_ignore_ascii_case("q") => {
                return Ok(sim.finish(StopReason::UserQuit));
            }
            Some(Ok(_)) => {}
            _ => return Ok(sim.finish(StopReason::UserQuit)),
        }
    }
}

fn report(sim: &Simulator, summary: &RunSummary, config: &Config) {
    match summary.reason {
        StopReason::Halted => println!(
            "APEX_CPU: Simulation Complete, cycles = {} instructions = {}",
            summary.cycles, summary.instructions
        ),
        reason => println!(
            "APEX_CPU: Simulation Stopped ({}), cycles = {} instructions = {}",
            reason, summary.cycles, summary.instructions
        ),
    }

    if config.general.display_state {
        sim.cpu.dump_state(config.general.memory_dump_words);
    }
    sim.cpu.stats.print();
}
