//! Branch direction predictor models.

pub mod counter;
pub mod table;

pub use counter::*;
pub use table::*;

/// How a branch address is turned into a table index.
///
/// Fixed when the predictor is built; per-branch code matches on this
/// closed set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexStrategy {
    /// Low-order address bits select the counter.
    Bimodal,
    /// Low-order address bits XOR global history select the counter.
    Gshare,
}
