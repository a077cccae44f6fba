//! Rendering the end-of-run report.

use std::io::{self, Write};

use crate::config::SimConfig;
use crate::predictor::DirectionPredictor;
use crate::stats::SimStats;

/// Write the final report: the echoed command, the prediction totals, and
/// the full counter table in index order.
///
/// `command` is the resolved invocation, echoed verbatim under the
/// `COMMAND` heading. Rendering reads the simulation state without
/// consuming it, so a report can be written more than once.
pub fn write_report<W: Write>(
    w: &mut W,
    command: &str,
    config: &SimConfig,
    stats: &SimStats,
    predictor: &DirectionPredictor,
) -> io::Result<()> {
    writeln!(w, "COMMAND")?;
    writeln!(w, "{}", command)?;
    writeln!(w, "OUTPUT")?;
    writeln!(w, "number of predictions:    {}", stats.predictions())?;
    writeln!(w, "number of mispredictions: {}", stats.mispredictions())?;
    match stats.misprediction_rate() {
        Some(rate) => {
            writeln!(w, "misprediction rate:       {:.2}%", rate * 100.0)?;
        }
        None => {
            writeln!(w, "misprediction rate:       undefined (no branches)")?;
        }
    }
    writeln!(w, "FINAL {} CONTENTS", config.mode.name().to_uppercase())?;
    for (index, counter) in predictor.counters().iter().enumerate() {
        writeln!(w, "{}\t{}", index, counter.state())?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::branch::BranchRecord;
    use crate::config::Mode;
    use crate::sim::Simulation;
    use crate::Outcome;

    fn render(command: &str, config: &SimConfig, sim: &Simulation) -> String {
        let mut out = Vec::new();
        write_report(&mut out, command, config, sim.stats(), sim.predictor()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn report_layout_is_exact() {
        let config = SimConfig::new(Mode::Bimodal { index_bits: 2 }).unwrap();
        let mut sim = Simulation::new(&config).unwrap();
        for (addr, outcome) in [(0x4, Outcome::T), (0x4, Outcome::T), (0x4, Outcome::N), (0x10, Outcome::T)] {
            sim.step(&BranchRecord::new(addr, outcome));
        }

        let text = render("sim bimodal 2 trace.txt", &config, &sim);
        assert_eq!(
            text,
            "COMMAND\n\
             sim bimodal 2 trace.txt\n\
             OUTPUT\n\
             number of predictions:    4\n\
             number of mispredictions: 1\n\
             misprediction rate:       25.00%\n\
             FINAL BIMODAL CONTENTS\n\
             0\t3\n\
             1\t2\n\
             2\t2\n\
             3\t2\n"
        );
    }

    #[test]
    fn rate_keeps_two_decimal_places() {
        let config = SimConfig::new(Mode::Bimodal { index_bits: 1 }).unwrap();
        let mut sim = Simulation::new(&config).unwrap();
        // Every record maps to slot 1. The trailing not-taken run costs
        // two misses before the counter crosses to the not-taken side.
        for _ in 0..963 {
            sim.step(&BranchRecord::new(0x4, Outcome::T));
        }
        for _ in 0..37 {
            sim.step(&BranchRecord::new(0x4, Outcome::N));
        }
        assert_eq!(sim.stats().predictions(), 1000);
        assert_eq!(sim.stats().mispredictions(), 2);

        let text = render("sim bimodal 1 trace.txt", &config, &sim);
        assert!(
            text.contains("misprediction rate:       0.20%"),
            "unexpected report:\n{}",
            text
        );
    }

    #[test]
    fn rate_formats_fractional_percentages() {
        use crate::predictor::IndexStrategy;

        let config = SimConfig::new(Mode::Bimodal { index_bits: 1 }).unwrap();
        let predictor = DirectionPredictor::new(IndexStrategy::Bimodal, 1, 0);
        let mut stats = SimStats::new();
        for i in 0..1000u64 {
            let actual = if i < 37 { Outcome::N } else { Outcome::T };
            stats.record(&BranchRecord::new(0x4, actual), Outcome::T);
        }

        let mut out = Vec::new();
        write_report(&mut out, "sim bimodal 1 trace.txt", &config, &stats, &predictor).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("number of mispredictions: 37"));
        assert!(text.contains("misprediction rate:       3.70%"));
    }

    #[test]
    fn empty_run_reports_an_undefined_rate() {
        let config = SimConfig::new(Mode::Gshare { index_bits: 1, history_bits: 1 }).unwrap();
        let sim = Simulation::new(&config).unwrap();
        let text = render("sim gshare 1 1 trace.txt", &config, &sim);
        assert!(text.contains("number of predictions:    0"));
        assert!(text.contains("misprediction rate:       undefined (no branches)"));
        assert!(text.contains("FINAL GSHARE CONTENTS"));
    }

    #[test]
    fn rendering_is_repeatable() {
        let config = SimConfig::new(Mode::Bimodal { index_bits: 2 }).unwrap();
        let mut sim = Simulation::new(&config).unwrap();
        sim.step(&BranchRecord::new(0x4, Outcome::N));
        let first = render("sim bimodal 2 t", &config, &sim);
        let second = render("sim bimodal 2 t", &config, &sim);
        assert_eq!(first, second);
    }
}
