//! This module provides the unary encoding used for machine arguments and results.
//!
//! A value `n` is written as `n` consecutive `One` cells. An argument list places a single
//! `Zero` after each value, so `[3, 0, 2]` becomes `11100110`.

use crate::types::Bit;

/// Encodes a list of values as a unary argument list.
///
/// # Arguments
///
/// * `runs` - The values to encode, in order.
///
/// # Returns
///
/// * `Vec<Bit>` - `runs[i]` ones followed by one zero, for each value.
pub fn encode(runs: &[usize]) -> Vec<Bit> {
    let mut cells = Vec::with_capacity(runs.iter().sum::<usize>() + runs.len());
    for &run in runs {
        cells.extend(std::iter::repeat(Bit::One).take(run));
        cells.push(Bit::Zero);
    }
    cells
}

/// Decodes the runs of `One` cells in `cells`, left to right.
///
/// Empty runs (adjacent zeros) contribute nothing, and a run that reaches the end of
/// the input without a terminating zero is still counted.
pub fn decode<I>(cells: I) -> Vec<usize>
where
    I: IntoIterator<Item = Bit>,
{
    let mut values = Vec::new();
    let mut run = 0;

    for bit in cells {
        match bit {
            Bit::One => run += 1,
            Bit::Zero if run > 0 => {
                values.push(run);
                run = 0;
            }
            Bit::Zero => {}
        }
    }

    if run > 0 {
        values.push(run);
    }

    values
}
