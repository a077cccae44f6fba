//! The trace-processing loop.

use crate::branch::BranchRecord;
use crate::config::{ConfigError, SimConfig};
use crate::predictor::DirectionPredictor;
use crate::stats::SimStats;
use crate::trace::TraceError;

/// Drives a [DirectionPredictor] over a stream of branch records,
/// accumulating [SimStats].
pub struct Simulation {
    predictor: DirectionPredictor,
    stats: SimStats,
}

impl Simulation {
    /// Build the simulation described by a validated configuration.
    pub fn new(config: &SimConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            predictor: DirectionPredictor::from_config(config)?,
            stats: SimStats::new(),
        })
    }

    /// Process a single branch record.
    ///
    /// The history update comes strictly last: a branch's own outcome must
    /// never influence its own prediction.
    pub fn step(&mut self, record: &BranchRecord) {
        // Map the branch address (and, for gshare, the current history)
        // to a counter
        let index = self.predictor.index(record.addr);

        // Make a prediction
        let prediction = self.predictor.predict(index);

        // Train the counter with the resolved outcome
        self.predictor.update(index, record.outcome);
        self.stats.record(record, prediction);

        // Fold the resolved outcome into the global history
        self.predictor.update_history(record.outcome);
    }

    /// Drain a record source, processing every record in order.
    /// The first error from the source ends the run.
    pub fn run<I>(&mut self, records: I) -> Result<(), TraceError>
    where
        I: IntoIterator<Item = Result<BranchRecord, TraceError>>,
    {
        for record in records {
            self.step(&record?);
        }
        Ok(())
    }

    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    pub fn predictor(&self) -> &DirectionPredictor {
        &self.predictor
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Mode;
    use crate::Outcome;

    fn sim(mode: Mode) -> Simulation {
        let config = SimConfig::new(mode).unwrap();
        Simulation::new(&config).unwrap()
    }

    fn rec(addr: u64, outcome: Outcome) -> BranchRecord {
        BranchRecord::new(addr, outcome)
    }

    #[test]
    fn predictions_track_records_one_to_one() {
        let mut sim = sim(Mode::Bimodal { index_bits: 4 });
        for i in 0..10 {
            sim.step(&rec(i * 4, Outcome::T));
        }
        assert_eq!(sim.stats().predictions(), 10);
    }

    #[test]
    fn first_taken_branch_hits_the_weakly_taken_counter() {
        // Fresh counters read 2 and predict taken, so a taken branch is a
        // hit and strengthens the counter to 3.
        let mut sim = sim(Mode::Bimodal { index_bits: 2 });
        sim.step(&rec(0x4, Outcome::T));
        assert_eq!(sim.stats().mispredictions(), 0);
        assert_eq!(sim.predictor().counters()[1].state(), 3);

        // The same branch resolving not-taken is now a miss, and the
        // counter weakens back to 2.
        sim.step(&rec(0x4, Outcome::N));
        assert_eq!(sim.stats().mispredictions(), 1);
        assert_eq!(sim.predictor().counters()[1].state(), 2);
    }

    #[test]
    fn history_tracks_outcomes_not_predictions() {
        let mut sim = sim(Mode::Gshare { index_bits: 3, history_bits: 3 });
        for outcome in [Outcome::T, Outcome::N, Outcome::T, Outcome::T] {
            sim.step(&rec(0x40, outcome));
        }
        assert_eq!(sim.predictor().history().value(), 0b110);
    }

    #[test]
    fn bimodal_runs_never_touch_history() {
        let mut sim = sim(Mode::Bimodal { index_bits: 3 });
        for outcome in [Outcome::T, Outcome::T, Outcome::N] {
            sim.step(&rec(0x8, outcome));
        }
        assert_eq!(sim.predictor().history().len(), 0);
        assert_eq!(sim.predictor().history().value(), 0);
    }

    #[test]
    fn run_stops_at_the_first_source_error() {
        let mut sim = sim(Mode::Bimodal { index_bits: 2 });
        let records = vec![
            Ok(rec(0x4, Outcome::T)),
            Err(TraceError::Malformed(2, "bogus".to_string())),
            Ok(rec(0x8, Outcome::T)),
        ];
        assert!(sim.run(records).is_err());
        assert_eq!(sim.stats().predictions(), 1);
    }

    #[test]
    fn hybrid_configurations_are_refused() {
        let config = SimConfig::new(Mode::Hybrid {
            chooser_bits: 8,
            gshare_index_bits: 10,
            gshare_history_bits: 4,
            bimodal_index_bits: 6,
        })
        .unwrap();
        assert_eq!(
            Simulation::new(&config).err(),
            Some(ConfigError::HybridUnsupported),
        );
    }
}
