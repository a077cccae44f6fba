//! Trace-driven branch predictor simulation.
//!
//! Replays recorded branch outcomes against a model of a hardware
//! direction predictor (bimodal or gshare) and reports prediction
//! accuracy along with the final counter table.

pub mod branch;
pub mod config;
pub mod history;
pub mod predictor;
pub mod report;
pub mod sim;
pub mod stats;
pub mod trace;

pub use branch::*;
pub use config::*;
pub use history::*;
pub use predictor::*;
pub use sim::*;
