//! This module defines the `Tape`, an unbounded two-way sequence of binary cells.
//!
//! Cells are stored in two growable regions: non-negative positions live in `right`
//! at index `pos`, negative positions live in `left` at index `-pos - 1`. Reads outside
//! both regions return `Bit::Zero`; writes zero-fill the gap up to the written cell.

use crate::encoder;
use crate::types::Bit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A binary tape that is blank (all zeros) everywhere it has not been written.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tape {
    right: Vec<Bit>,
    left: Vec<Bit>,
}

/// Where a position is stored.
enum Slot {
    Right(usize),
    Left(usize),
}

fn slot(pos: i64) -> Slot {
    if pos >= 0 {
        Slot::Right(pos as usize)
    } else {
        // -pos - 1 never overflows for negative i64
        Slot::Left((-(pos + 1)) as usize)
    }
}

impl Tape {
    /// Creates a blank tape with nothing materialized.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tape whose cells `0..bits.len()` hold `bits`.
    pub fn from_bits(bits: &[bool]) -> Self {
        Self {
            right: bits.iter().map(|&b| Bit::from(b)).collect(),
            left: Vec::new(),
        }
    }

    /// Creates a tape holding a unary argument list: for each run `n`, `n` ones
    /// followed by a single zero, starting at position 0.
    pub fn from_unary_runs(runs: &[usize]) -> Self {
        Self {
            right: encoder::encode(runs),
            left: Vec::new(),
        }
    }

    /// Reads the cell at `pos`. Never fails.
    pub fn read(&self, pos: i64) -> Bit {
        let cell = match slot(pos) {
            Slot::Right(i) => self.right.get(i),
            Slot::Left(i) => self.left.get(i),
        };
        cell.copied().unwrap_or_default()
    }

    /// Writes `bit` at `pos`, materializing every cell between the current boundary
    /// and `pos` as `Zero` first.
    ///
    /// Storage is dense, so the cost grows with the distance from the origin. A
    /// position whose gap cannot be allocated (e.g. near `i64::MAX`) aborts with
    /// the allocator's capacity panic.
    pub fn write(&mut self, pos: i64, bit: Bit) {
        let (cells, i) = match slot(pos) {
            Slot::Right(i) => (&mut self.right, i),
            Slot::Left(i) => (&mut self.left, i),
        };
        if i >= cells.len() {
            cells.resize(i + 1, Bit::Zero);
        }
        cells[i] = bit;
    }

    /// Writes a `One` at `pos`.
    pub fn print(&mut self, pos: i64) {
        self.write(pos, Bit::One);
    }

    /// Writes a `Zero` at `pos`.
    pub fn erase(&mut self, pos: i64) {
        self.write(pos, Bit::Zero);
    }

    /// The most negative materialized position, or 0 if nothing left of the origin
    /// has been written.
    pub fn start(&self) -> i64 {
        -(self.left.len() as i64)
    }

    /// One past the largest materialized non-negative position.
    pub fn end(&self) -> i64 {
        self.right.len() as i64
    }

    /// Whether `pos` lies inside `start()..end()`.
    pub fn contains(&self, pos: i64) -> bool {
        (self.start()..self.end()).contains(&pos)
    }

    /// Returns an independent deep copy of this tape.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Iterates over the materialized cells from `start()` to `end() - 1`.
    pub fn cells(&self) -> impl Iterator<Item = Bit> + '_ {
        self.left.iter().rev().chain(self.right.iter()).copied()
    }

    /// Counts the printed cells.
    pub fn ones(&self) -> usize {
        self.cells().filter(|bit| bit.is_one()).count()
    }

    /// Renders the materialized cells as a string of `'0'` and `'1'`.
    pub fn to_display_string(&self) -> String {
        self.cells().map(Bit::as_char).collect()
    }
}

impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}
