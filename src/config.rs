//! Simulator configuration.

use thiserror::Error;

/// Widest permitted table, as log2 of the number of entries.
pub const MAX_INDEX_BITS: u32 = 30;

/// The predictor organization being modeled.
///
/// The set is closed: each variant carries exactly the parameters its
/// model needs, and anything driving a simulation matches on it rather
/// than on a mode name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Counters indexed by branch address alone.
    Bimodal { index_bits: u32 },

    /// Counters indexed by branch address XOR global history.
    Gshare { index_bits: u32, history_bits: u32 },

    /// A chooser table selecting between gshare and bimodal components.
    ///
    /// The parameters are parsed and validated, but no chooser model is
    /// implemented: building a simulation from this mode fails with
    /// [ConfigError::HybridUnsupported].
    Hybrid {
        chooser_bits: u32,
        gshare_index_bits: u32,
        gshare_history_bits: u32,
        bimodal_index_bits: u32,
    },
}

impl Mode {
    /// The mode name as written on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bimodal { .. } => "bimodal",
            Self::Gshare { .. } => "gshare",
            Self::Hybrid { .. } => "hybrid",
        }
    }
}

// Renders the mode the way it is spelled on the command line: the name
// followed by its numeric parameters, in argument order.
impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Self::Bimodal { index_bits } => {
                write!(f, "bimodal {}", index_bits)
            }
            Self::Gshare { index_bits, history_bits } => {
                write!(f, "gshare {} {}", index_bits, history_bits)
            }
            Self::Hybrid {
                chooser_bits,
                gshare_index_bits,
                gshare_history_bits,
                bimodal_index_bits,
            } => {
                write!(
                    f,
                    "hybrid {} {} {} {}",
                    chooser_bits,
                    gshare_index_bits,
                    gshare_history_bits,
                    bimodal_index_bits
                )
            }
        }
    }
}

/// Errors raised while validating a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be between 1 and {max}, got {got}", max = MAX_INDEX_BITS)]
    TableBitsOutOfRange { name: &'static str, got: u32 },

    #[error("history bits ({history_bits}) cannot exceed index bits ({index_bits})")]
    HistoryTooWide { history_bits: u32, index_bits: u32 },

    #[error("hybrid parameters are accepted but no chooser model is implemented")]
    HybridUnsupported,
}

/// A validated configuration, fixed for the lifetime of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimConfig {
    pub mode: Mode,
}

impl SimConfig {
    /// Validate a mode and freeze it into a configuration.
    ///
    /// Table widths must lie in `1..=MAX_INDEX_BITS` and a history register
    /// can never be wider than the index it folds into. A history width of
    /// zero is accepted: such a gshare degenerates to bimodal.
    pub fn new(mode: Mode) -> Result<Self, ConfigError> {
        match mode {
            Mode::Bimodal { index_bits } => {
                check_table_bits("index bits", index_bits)?;
            }
            Mode::Gshare { index_bits, history_bits } => {
                check_table_bits("index bits", index_bits)?;
                check_history_bits(history_bits, index_bits)?;
            }
            Mode::Hybrid {
                chooser_bits,
                gshare_index_bits,
                gshare_history_bits,
                bimodal_index_bits,
            } => {
                check_table_bits("chooser bits", chooser_bits)?;
                check_table_bits("gshare index bits", gshare_index_bits)?;
                check_table_bits("bimodal index bits", bimodal_index_bits)?;
                check_history_bits(gshare_history_bits, gshare_index_bits)?;
            }
        }
        Ok(Self { mode })
    }
}

fn check_table_bits(name: &'static str, got: u32) -> Result<(), ConfigError> {
    if got == 0 || got > MAX_INDEX_BITS {
        return Err(ConfigError::TableBitsOutOfRange { name, got });
    }
    Ok(())
}

fn check_history_bits(history_bits: u32, index_bits: u32) -> Result<(), ConfigError> {
    if history_bits > index_bits {
        return Err(ConfigError::HistoryTooWide { history_bits, index_bits });
    }
    Ok(())
}
