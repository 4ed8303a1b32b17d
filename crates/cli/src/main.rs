//! Memory workload driver CLI.
//!
//! This binary provides a single entry point for running workloads. It performs:
//! 1. **Run:** Load a JSON config (or defaults), apply flag overrides, simulate, print stats.
//! 2. **Trace generation:** Write a destination-sorted `src dst` index trace for NMP trace-drain runs.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::{fs, process};
use tracing::info;
use tracing_subscriber::EnvFilter;

use nmpsim_core::Simulator;
use nmpsim_core::common::SimError;
use nmpsim_core::config::{Config, NmpMode, WorkloadKind};
use nmpsim_core::sim::generator;

#[derive(Parser, Debug)]
#[command(
    name = "nmpsim",
    author,
    version,
    about = "Cycle-stepped memory workload driver",
    long_about = "Drive a memory timing engine with a synthetic workload or the NMP pipeline.\n\nExamples:\n  nmpsim run --workload nmp --cycles 10000\n  nmpsim run --workload nmp --mode trace-drain --trace sorted_index_array.txt\n  nmpsim run --config run.json --json\n  nmpsim gen-trace --output sorted_index_array.txt"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a workload against the reference timing engine.
    Run {
        /// JSON configuration file; defaults are used for anything it omits.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Workload to drive (overrides the config).
        #[arg(short, long, value_enum)]
        workload: Option<WorkloadArg>,

        /// NMP compute mode (overrides the config).
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,

        /// Trace file for trace-replay and NMP trace-drain.
        #[arg(short, long)]
        trace: Option<PathBuf>,

        /// Number of cycles to simulate.
        #[arg(long)]
        cycles: Option<u64>,

        /// Seed for the random and stream workloads.
        #[arg(long)]
        seed: Option<u64>,

        /// Print statistics as JSON instead of text.
        #[arg(long)]
        json: bool,

        /// Statistics sections to print (summary, traffic, nmp); all when omitted.
        #[arg(long = "stats", num_args = 1..)]
        sections: Vec<String>,
    },

    /// Generate a destination-sorted index trace.
    GenTrace {
        /// Output file.
        #[arg(short, long)]
        output: PathBuf,

        /// Number of (src, dst) pairs.
        #[arg(long, default_value_t = generator::DEFAULT_ROWS)]
        rows: usize,

        /// Number of distinct source rows.
        #[arg(long, default_value_t = generator::DEFAULT_ITEMS)]
        items: u64,

        /// Largest destination value.
        #[arg(long, default_value_t = generator::DEFAULT_MAX_DST)]
        max_dst: u64,

        /// Random seed.
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum WorkloadArg {
    Random,
    Stream,
    TraceReplay,
    VectorAdd,
    Nmp,
}

impl From<WorkloadArg> for WorkloadKind {
    fn from(arg: WorkloadArg) -> Self {
        match arg {
            WorkloadArg::Random => Self::Random,
            WorkloadArg::Stream => Self::Stream,
            WorkloadArg::TraceReplay => Self::TraceReplay,
            WorkloadArg::VectorAdd => Self::VectorAdd,
            WorkloadArg::Nmp => Self::Nmp,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Paired,
    TraceDrain,
}

impl From<ModeArg> for NmpMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Paired => Self::Paired,
            ModeArg::TraceDrain => Self::TraceDrain,
        }
    }
}

/// Flag overrides applied on top of the loaded configuration.
#[derive(Debug)]
struct RunArgs {
    config: Option<PathBuf>,
    workload: Option<WorkloadArg>,
    mode: Option<ModeArg>,
    trace: Option<PathBuf>,
    cycles: Option<u64>,
    seed: Option<u64>,
    json: bool,
    sections: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run {
            config,
            workload,
            mode,
            trace,
            cycles,
            seed,
            json,
            sections,
        } => cmd_run(RunArgs {
            config,
            workload,
            mode,
            trace,
            cycles,
            seed,
            json,
            sections,
        }),
        Commands::GenTrace {
            output,
            rows,
            items,
            max_dst,
            seed,
        } => cmd_gen_trace(&output, rows, items, max_dst, seed),
    };

    if let Err(e) = result {
        eprintln!("\n[!] FATAL: {e}");
        process::exit(1);
    }
}

/// Loads the config file (if any) and applies flag overrides.
fn build_config(args: &RunArgs) -> Result<Config, SimError> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| {
                SimError::InvalidConfig(format!("cannot read '{}': {e}", path.display()))
            })?;
            let config = Config::from_json(&text)?;
            info!(path = %path.display(), "configuration loaded");
            config
        }
        None => Config::default(),
    };

    if let Some(workload) = args.workload {
        config.workload.kind = workload.into();
    }
    if let Some(mode) = args.mode {
        config.workload.nmp.mode = mode.into();
    }
    if let Some(trace) = &args.trace {
        config.workload.trace_path = Some(trace.clone());
    }
    if let Some(cycles) = args.cycles {
        config.general.max_cycles = cycles;
    }
    if let Some(seed) = args.seed {
        config.general.seed = seed;
    }
    if !args.sections.is_empty() {
        config.general.stats_sections.clone_from(&args.sections);
    }
    config.validate()?;
    Ok(config)
}

/// Builds the simulator, runs it for the configured cycle count, and prints statistics.
fn cmd_run(args: RunArgs) -> Result<(), SimError> {
    let config = build_config(&args)?;
    let mut sim = Simulator::new(&config)?;

    println!(
        "[*] Workload: {}  Cycles: {}  Controller: {:?}  Queue depth: {}",
        sim.workload.name(),
        config.general.max_cycles,
        config.memory.controller,
        config.memory.queue_depth
    );

    let stats = sim.run(config.general.max_cycles);
    if args.json {
        println!("{}", serde_json::to_string_pretty(stats).map_err(SimError::Report)?);
    } else {
        stats.print_sections(&config.general.stats_sections);
    }
    Ok(())
}

/// Writes a generated index trace to `output`.
fn cmd_gen_trace(
    output: &Path,
    rows: usize,
    items: u64,
    max_dst: u64,
    seed: u64,
) -> Result<(), SimError> {
    let entries = generator::generate_index_array(rows, items, max_dst, seed);
    generator::write_pair_trace(output, &entries)?;
    println!(
        "[*] Sorted index array ({} pairs) exported to '{}'",
        entries.len(),
        output.display()
    );
    Ok(())
}
