//! A pattern history table driven by address or address-XOR-history
//! indexing.

use crate::config::{ConfigError, Mode, SimConfig};
use crate::history::GlobalHistoryRegister;
use crate::predictor::counter::SaturatingCounter;
use crate::predictor::IndexStrategy;
use crate::Outcome;

/// A table of `2^index_bits` saturating counters plus the global history
/// register that (for gshare) folds into the index.
///
/// The geometry and indexing strategy are fixed at construction; the only
/// mutable state is the counters and the history register.
pub struct DirectionPredictor {
    /// Table of 2-bit counters, all starting weakly-taken
    data: Vec<SaturatingCounter>,
    /// Directions of the most recently resolved branches
    ghr: GlobalHistoryRegister,
    /// Index derivation strategy
    strategy: IndexStrategy,
    /// log2 of the number of table entries
    index_bits: u32,
}

impl DirectionPredictor {
    /// Build a predictor with the given strategy and geometry.
    ///
    /// `history_bits` must not exceed `index_bits`; [SimConfig] validation
    /// guarantees this for configurations built through it.
    pub fn new(strategy: IndexStrategy, index_bits: u32, history_bits: u32) -> Self {
        assert!(history_bits <= index_bits);
        let size = 1usize << index_bits;
        let res = Self {
            data: vec![SaturatingCounter::WEAKLY_TAKEN; size],
            ghr: GlobalHistoryRegister::new(history_bits as usize),
            strategy,
            index_bits,
        };
        log::debug!(
            "built {:?} predictor: {} entries, {} history bits, {} storage bits",
            strategy,
            size,
            history_bits,
            res.storage_bits()
        );
        res
    }

    /// Build the predictor described by a validated configuration.
    ///
    /// Hybrid configurations are refused here, before any trace input is
    /// consumed: the parameters parse but no chooser model exists.
    pub fn from_config(config: &SimConfig) -> Result<Self, ConfigError> {
        match config.mode {
            Mode::Bimodal { index_bits } => {
                Ok(Self::new(IndexStrategy::Bimodal, index_bits, 0))
            }
            Mode::Gshare { index_bits, history_bits } => {
                Ok(Self::new(IndexStrategy::Gshare, index_bits, history_bits))
            }
            Mode::Hybrid { .. } => Err(ConfigError::HybridUnsupported),
        }
    }

    /// Returns the number of entries in the table.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Returns a mask corresponding to the number of entries in the table.
    fn index_mask(&self) -> usize {
        self.size() - 1
    }

    /// Number of bits of predictor state (counters plus history register).
    pub fn storage_bits(&self) -> usize {
        self.size() * 2 + self.ghr.len()
    }

    /// Returns the global history register.
    pub fn history(&self) -> &GlobalHistoryRegister {
        &self.ghr
    }

    /// Returns the counters in index order.
    pub fn counters(&self) -> &[SaturatingCounter] {
        &self.data
    }

    /// Map a branch address to a table index.
    ///
    /// The two low-order address bits are dropped (instruction alignment)
    /// and the next `index_bits` bits select a slot. The gshare strategy
    /// XORs global history into the high end of the index, so aliasing
    /// branches can still be told apart by the path leading to them. See
    /// "Combining Branch Predictors" (McFarling, 1993).
    pub fn index(&self, addr: u64) -> usize {
        let base = (addr >> 2) as usize & self.index_mask();
        match self.strategy {
            IndexStrategy::Bimodal => base,
            IndexStrategy::Gshare => {
                let shamt = self.index_bits - self.ghr.len() as u32;
                base ^ (self.ghr.value() << shamt)
            }
        }
    }

    /// Return the predicted direction for a table slot. Reads no state
    /// other than the counter.
    pub fn predict(&self, index: usize) -> Outcome {
        self.data[index].predict()
    }

    /// Train the counter at `index` with the resolved outcome.
    pub fn update(&mut self, index: usize, outcome: Outcome) {
        self.data[index].update(outcome);
    }

    /// Record the resolved outcome in the global history register.
    ///
    /// Runs once per branch for every strategy, strictly after the counter
    /// update. History tracks resolved directions, never predictions.
    pub fn update_history(&mut self, outcome: Outcome) {
        self.ghr.record(outcome);
    }
}
