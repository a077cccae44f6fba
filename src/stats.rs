//! Accumulating prediction statistics.

use std::collections::BTreeMap;

use itertools::Itertools;

use crate::branch::{BranchRecord, Outcome};

/// Statistics gathered over one simulated trace.
///
/// Counts only ever move up; the totals follow every processed record
/// whether or not the counter that produced the prediction saturated.
pub struct SimStats {
    /// Number of branches processed
    predictions: u64,
    /// Number of branches whose predicted direction disagreed with the
    /// resolved outcome
    mispredictions: u64,
    /// Per-branch data, keyed by branch address
    branches: BTreeMap<u64, BranchData>,
}

impl SimStats {
    pub fn new() -> Self {
        Self {
            predictions: 0,
            mispredictions: 0,
            branches: BTreeMap::new(),
        }
    }

    /// Record one resolved branch and the direction predicted for it.
    pub fn record(&mut self, record: &BranchRecord, prediction: Outcome) {
        let hit = prediction == record.outcome;
        self.predictions += 1;
        if !hit {
            self.mispredictions += 1;
        }

        let data = self.branches.entry(record.addr).or_insert_with(BranchData::new);
        data.occ += 1;
        if hit {
            data.hits += 1;
        }
        if record.outcome == Outcome::T {
            data.taken += 1;
        }
    }

    /// Total number of predictions made.
    pub fn predictions(&self) -> u64 {
        self.predictions
    }

    /// Total number of mispredictions.
    pub fn mispredictions(&self) -> u64 {
        self.mispredictions
    }

    /// The misprediction rate over the whole run, in `0.0..=1.0`.
    ///
    /// `None` when no branches were processed: the rate is undefined
    /// there, not zero.
    pub fn misprediction_rate(&self) -> Option<f64> {
        if self.predictions == 0 {
            return None;
        }
        Some(self.mispredictions as f64 / self.predictions as f64)
    }

    /// Returns the number of unique branch addresses observed.
    pub fn num_unique_branches(&self) -> usize {
        self.branches.len()
    }

    /// Returns the data collected for a particular branch.
    pub fn get(&self, addr: u64) -> Option<&BranchData> {
        self.branches.get(&addr)
    }

    /// The `n` most frequently executed branches, most frequent first.
    pub fn most_executed(&self, n: usize) -> Vec<(u64, &BranchData)> {
        self.branches
            .iter()
            .sorted_by_key(|(_, data)| data.occ)
            .rev()
            .take(n)
            .map(|(addr, data)| (*addr, data))
            .collect()
    }

    /// Branches with the lowest hit rates, worst first. Branches executed
    /// fewer than `min_occ` times are ignored.
    pub fn lowest_hit_rate(&self, n: usize, min_occ: u64) -> Vec<(u64, &BranchData)> {
        self.branches
            .iter()
            .filter(|(_, data)| data.occ >= min_occ)
            .sorted_by(|x, y| x.1.hit_rate().partial_cmp(&y.1.hit_rate()).unwrap())
            .take(n)
            .map(|(addr, data)| (*addr, data))
            .collect()
    }
}

impl Default for SimStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-branch statistics.
pub struct BranchData {
    /// Number of times this branch was encountered
    pub occ: u64,
    /// Number of correct predictions for this branch
    pub hits: u64,
    /// Number of times this branch was resolved taken
    pub taken: u64,
}

impl BranchData {
    pub fn new() -> Self {
        Self { occ: 0, hits: 0, taken: 0 }
    }

    pub fn hit_rate(&self) -> f64 {
        self.hits as f64 / self.occ as f64
    }

    pub fn taken_ratio(&self) -> f64 {
        self.taken as f64 / self.occ as f64
    }

    pub fn is_always_taken(&self) -> bool {
        self.taken == self.occ
    }

    pub fn is_never_taken(&self) -> bool {
        self.taken == 0
    }
}

impl Default for BranchData {
    fn default() -> Self {
        Self::new()
    }
}
