//! Possibility lookup table, built once at solver construction.
//!
//! For every count of unknown cells in a line, and every combination of
//! missing volts and missing points, the table lists each distinct way
//! the missing values can be distributed over the unknown cells. Lines
//! consult the table instead of re-enumerating compositions on every
//! propagation step.

use super::SolverError;
use crate::{CandidateSet, Value};

/// One way to distribute a line's missing values over its unknown cells:
/// counts per value, irrespective of which cell gets which value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Distribution {
    pub(crate) ones: u8,
    pub(crate) twos: u8,
    pub(crate) threes: u8,
    pub(crate) volts: u8,
}

impl Distribution {
    /// Number of cells this distribution fills.
    pub(crate) fn fields(&self) -> usize {
        self.ones as usize + self.twos as usize + self.threes as usize + self.volts as usize
    }

    /// Point-sum of the distributed values.
    pub(crate) fn points(&self) -> u32 {
        self.ones as u32 + 2 * self.twos as u32 + 3 * self.threes as u32
    }

    /// Candidate bits of every value with a nonzero count.
    pub(crate) fn value_mask(&self) -> CandidateSet {
        let mut mask = CandidateSet::EMPTY;
        if self.ones > 0 {
            mask.insert(Value::One);
        }
        if self.twos > 0 {
            mask.insert(Value::Two);
        }
        if self.threes > 0 {
            mask.insert(Value::Three);
        }
        if self.volts > 0 {
            mask.insert(Value::Volt);
        }
        mask
    }

    /// Remaining counts in [`Value::ALL`] order, for the feasibility search.
    pub(crate) fn counts(&self) -> [u8; 4] {
        [self.ones, self.twos, self.threes, self.volts]
    }
}

/// Distributions for every `(missing fields, missing volts, missing points)`
/// triple up to a maximum line length. Immutable after construction.
#[derive(Debug)]
pub(crate) struct LookupTable {
    /// `tables[m - 1][code]` holds the distributions for `m` unknown cells
    /// at the code derived from the missing volt- and point-counts.
    tables: Vec<Vec<Vec<Distribution>>>,
}

impl LookupTable {
    /// Build the table for lines up to `max_line_len` cells.
    ///
    /// Deterministic pure function of its argument. For `m` unknown cells
    /// there are exactly `(m + 1)^2` codes: volt-counts `b` in `0..=m`,
    /// each spanning point-sums `(m - b) * 1 ..= (m - b) * 3` (a single
    /// zero-point slot when every missing cell is a volt).
    pub(crate) fn build(max_line_len: usize) -> Result<Self, SolverError> {
        let mut tables = Vec::new();
        tables
            .try_reserve_exact(max_line_len)
            .map_err(|_| SolverError::TableCapacity)?;

        for m in 1..=max_line_len {
            let mut slots: Vec<Vec<Distribution>> = Vec::new();
            slots
                .try_reserve_exact((m + 1) * (m + 1))
                .map_err(|_| SolverError::TableCapacity)?;

            for volts in 0..=m {
                let point_fields = m - volts;
                if point_fields == 0 {
                    slots.push(vec![Distribution {
                        ones: 0,
                        twos: 0,
                        threes: 0,
                        volts: volts as u8,
                    }]);
                    continue;
                }
                for points in point_fields..=3 * point_fields {
                    let records = enumerate(point_fields, points, volts);
                    debug_assert!(records
                        .iter()
                        .all(|r| r.fields() == m && r.points() == points as u32));
                    slots.push(records);
                }
            }

            debug_assert_eq!(slots.len(), (m + 1) * (m + 1));
            tables.push(slots);
        }

        Ok(LookupTable { tables })
    }

    /// Distributions matching a line's missing counts.
    ///
    /// Callers must have checked the achievable range first:
    /// `missing_volts <= missing_fields` and `missing_points` within
    /// `[missing_fields - missing_volts, 3 * (missing_fields - missing_volts)]`.
    pub(crate) fn distributions(
        &self,
        missing_fields: usize,
        missing_volts: u32,
        missing_points: u32,
    ) -> &[Distribution] {
        let code = Self::code(missing_fields, missing_volts as usize, missing_points as usize);
        &self.tables[missing_fields - 1][code]
    }

    /// Cumulative offset of the `(volts, points)` slot for `m` unknown cells:
    /// the slot counts of all lower volt-counts, plus the offset of `points`
    /// within its own range.
    fn code(m: usize, volts: usize, points: usize) -> usize {
        let mut code = 0;
        for v in 0..volts {
            code += 2 * (m - v) + 1;
        }
        code + points - (m - volts)
    }
}

/// Enumerate every distinct multiset of `{1, 2, 3}` values filling
/// `point_fields` cells and summing to `target`.
///
/// Walks canonical non-decreasing compositions: start from all ones;
/// while below target, bump the last cell still under 3; after recording
/// a hit, sweep cell pairs at increasing index offset and move one point
/// from a higher-valued cell to a lower one wherever the gap exceeds 1.
/// Every composition visited is non-decreasing, so each count-tuple
/// appears exactly once.
fn enumerate(point_fields: usize, target: usize, volts: usize) -> Vec<Distribution> {
    debug_assert!(point_fields >= 1);
    debug_assert!((point_fields..=3 * point_fields).contains(&target));

    let mut cells = vec![1u8; point_fields];
    let mut total = point_fields;
    let mut out = Vec::new();

    loop {
        if total < target {
            for cell in cells.iter_mut().rev() {
                if *cell < 3 {
                    *cell += 1;
                    break;
                }
            }
        }

        total = cells.iter().map(|&c| c as usize).sum();
        if total < target {
            continue;
        }

        let mut dist = Distribution {
            ones: 0,
            twos: 0,
            threes: 0,
            volts: volts as u8,
        };
        for &cell in &cells {
            match cell {
                1 => dist.ones += 1,
                2 => dist.twos += 1,
                _ => dist.threes += 1,
            }
        }
        out.push(dist);

        let mut advanced = false;
        'sweep: for offset in 1..point_fields {
            for j in (offset..point_fields).rev() {
                if cells[j] > cells[j - offset] + 1 {
                    cells[j] -= 1;
                    cells[j - offset] += 1;
                    advanced = true;
                    break 'sweep;
                }
            }
        }
        if !advanced {
            break;
        }
    }

    out
}
