//! Reading branch traces.
//!
//! A trace is a text file with one branch per line: a hexadecimal address
//! and a single-character direction, like
//!
//! ```text
//! 3b3444 t
//! 3b3448 n
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::branch::{BranchRecord, Outcome};

/// Errors raised while reading a trace.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read trace")]
    Io(#[from] io::Error),

    #[error("trace line {0}: expected `<address> <outcome>`, got `{1}`")]
    Malformed(usize, String),

    #[error("trace line {0}: bad branch address `{1}`")]
    BadAddress(usize, String),

    #[error("trace line {0}: bad outcome `{1}` (expected `t` or `n`)")]
    BadOutcome(usize, String),
}

/// An iterator of [BranchRecord]s drawn from a line-oriented reader.
///
/// Blank lines are skipped. Any line that fails to parse ends the
/// iteration with an error carrying its 1-based line number.
pub struct TraceReader<R> {
    input: R,
    line: usize,
}

impl TraceReader<BufReader<File>> {
    /// Open a trace file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(input: R) -> Self {
        Self { input, line: 0 }
    }

    fn parse(&self, text: &str) -> Result<BranchRecord, TraceError> {
        let mut fields = text.split_whitespace();
        let (addr, outcome) = match (fields.next(), fields.next(), fields.next()) {
            (Some(addr), Some(outcome), None) => (addr, outcome),
            _ => {
                return Err(TraceError::Malformed(self.line, text.trim().to_string()));
            }
        };

        let digits = addr
            .strip_prefix("0x")
            .or_else(|| addr.strip_prefix("0X"))
            .unwrap_or(addr);
        let addr = u64::from_str_radix(digits, 16)
            .map_err(|_| TraceError::BadAddress(self.line, addr.to_string()))?;

        let outcome = match outcome {
            "t" | "T" => Outcome::T,
            "n" | "N" => Outcome::N,
            other => {
                return Err(TraceError::BadOutcome(self.line, other.to_string()));
            }
        };

        Ok(BranchRecord { addr, outcome })
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<BranchRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = String::new();
        loop {
            buf.clear();
            self.line += 1;
            match self.input.read_line(&mut buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(TraceError::Io(e))),
            }
            if buf.trim().is_empty() {
                continue;
            }
            return Some(self.parse(&buf));
        }
    }
}
