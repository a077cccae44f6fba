//! Global branch history tracking.

use bitvec::prelude::*;

use crate::Outcome;

/// A shift register holding the directions of the most recently resolved
/// branches.
///
/// The newest outcome occupies the most-significant bit (index `len - 1`)
/// and the oldest is discarded out of index 0, so [Self::value] matches the
/// history operand expected by gshare index folding.
pub struct GlobalHistoryRegister {
    data: BitVec<usize, Lsb0>,
    len: usize,
}

// NOTE: This *reverses* all of the bits: the leftmost character is the
// most-significant bit (the newest outcome) and the rightmost is the oldest.
impl std::fmt::Display for GlobalHistoryRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let x: String = self.data.as_bitslice().iter().by_vals()
            .map(|b| if b { '1' } else { '0' })
            .rev()
            .collect();
        write!(f, "{}", x)
    }
}

impl GlobalHistoryRegister {
    /// Create a register with the specified length in bits.
    /// All bits in the register are initialized to zero.
    ///
    /// A zero-length register is legal: it records nothing and always
    /// reads as zero.
    pub fn new(len: usize) -> Self {
        assert!(len <= usize::BITS as usize);
        Self {
            data: bitvec![usize, Lsb0; 0; len],
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Record the direction of the most recently resolved branch.
    ///
    /// The register shifts one position toward index 0 and the new outcome
    /// (taken = 1) enters at index `len - 1`.
    pub fn record(&mut self, outcome: Outcome) {
        if self.len == 0 {
            return;
        }
        let newest = match outcome {
            Outcome::T => 1usize,
            Outcome::N => 0usize,
        };
        let next = (self.value() >> 1) | (newest << (self.len - 1));
        self.data.store(next);
    }

    /// Return the register contents as an unsigned integer.
    pub fn value(&self) -> usize {
        if self.len == 0 {
            return 0;
        }
        self.data.load::<usize>()
    }
}
