//! Trace-driven branch predictor simulator.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use bpsim::report::write_report;
use bpsim::stats::SimStats;
use bpsim::trace::TraceReader;
use bpsim::{Mode, SimConfig, Simulation};

#[derive(Parser)]
#[command(name = "sim", about = "Trace-driven branch predictor simulator")]
struct Cli {
    /// Log predictor geometry and per-branch summaries to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate a bimodal predictor (counters indexed by address)
    Bimodal {
        /// log2 of the prediction table size
        index_bits: u32,
        /// Path to the input trace
        trace: PathBuf,
    },
    /// Simulate a gshare predictor (counters indexed by address XOR history)
    Gshare {
        /// log2 of the prediction table size
        index_bits: u32,
        /// Global history register width in bits (at most INDEX_BITS)
        history_bits: u32,
        /// Path to the input trace
        trace: PathBuf,
    },
    /// Accept hybrid predictor parameters (no chooser model is implemented)
    Hybrid {
        /// log2 of the chooser table size
        chooser_bits: u32,
        /// log2 of the gshare table size
        gshare_index_bits: u32,
        /// Gshare history register width in bits
        gshare_history_bits: u32,
        /// log2 of the bimodal table size
        bimodal_index_bits: u32,
        /// Path to the input trace
        trace: PathBuf,
    },
}

impl Command {
    fn into_parts(self) -> (Mode, PathBuf) {
        match self {
            Command::Bimodal { index_bits, trace } => {
                (Mode::Bimodal { index_bits }, trace)
            }
            Command::Gshare { index_bits, history_bits, trace } => {
                (Mode::Gshare { index_bits, history_bits }, trace)
            }
            Command::Hybrid {
                chooser_bits,
                gshare_index_bits,
                gshare_history_bits,
                bimodal_index_bits,
                trace,
            } => (
                Mode::Hybrid {
                    chooser_bits,
                    gshare_index_bits,
                    gshare_history_bits,
                    bimodal_index_bits,
                },
                trace,
            ),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    } else {
        env_logger::init();
    }

    let (mode, trace_path) = args.command.into_parts();
    let config = SimConfig::new(mode)?;
    let mut sim = Simulation::new(&config)?;

    let reader = TraceReader::open(&trace_path)
        .with_context(|| format!("unable to open trace file {}", trace_path.display()))?;

    let start = Instant::now();
    sim.run(reader)?;
    let elapsed = start.elapsed();

    let stats = sim.stats();
    log::info!(
        "processed {} branches ({} unique) in {:.2?}",
        stats.predictions(),
        stats.num_unique_branches(),
        elapsed
    );
    log_branch_summary(stats);

    let argv0 = std::env::args().next().unwrap_or_else(|| "sim".to_string());
    let command = format!("{} {} {}", argv0, config.mode, trace_path.display());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &command, &config, stats, sim.predictor())?;
    out.flush()?;
    Ok(())
}

/// Log the branches that dominate the trace and the ones the predictor
/// handled worst.
fn log_branch_summary(stats: &SimStats) {
    if stats.predictions() == 0 || !log::log_enabled!(log::Level::Info) {
        return;
    }

    log::info!("most executed branches:");
    for (addr, data) in stats.most_executed(10) {
        log::info!(
            "  {:012x}: {:>10} occurrences, {:6.2}% hit, {:6.2}% taken",
            addr,
            data.occ,
            data.hit_rate() * 100.0,
            data.taken_ratio() * 100.0
        );
    }

    log::info!("lowest hit-rate branches (at least 100 occurrences):");
    for (addr, data) in stats.lowest_hit_rate(10, 100) {
        log::info!(
            "  {:012x}: {:>8}/{:<8} hits, {:6.2}% hit rate",
            addr,
            data.hits,
            data.occ,
            data.hit_rate() * 100.0
        );
    }
}
