//! Types for branches and their resolved directions.

/// A branch outcome.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Not-taken
    N,
    /// Taken
    T,
}

impl Outcome {
    pub fn from_bool(x: bool) -> Self {
        match x {
            true => Self::T,
            false => Self::N,
        }
    }

    /// The single-character form used by trace files.
    pub fn as_char(self) -> char {
        match self {
            Self::T => 't',
            Self::N => 'n',
        }
    }
}

impl std::ops::Not for Outcome {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Self::N => Self::T,
            Self::T => Self::N,
        }
    }
}

impl From<bool> for Outcome {
    fn from(x: bool) -> Self {
        Self::from_bool(x)
    }
}

impl From<Outcome> for bool {
    fn from(x: Outcome) -> bool {
        match x {
            Outcome::T => true,
            Outcome::N => false,
        }
    }
}

impl std::fmt::Debug for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A record of one executed branch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BranchRecord {
    /// The program counter value for this branch
    pub addr: u64,

    /// The resolved direction for this branch
    pub outcome: Outcome,
}

impl BranchRecord {
    pub fn new(addr: u64, outcome: Outcome) -> Self {
        Self { addr, outcome }
    }
}
