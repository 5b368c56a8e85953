use crate::{Axis, Value, MAX_DIMENSION};
use serde::{Deserialize, Serialize};

/// Outcome of propagating one line, or of one full sweep over the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineResult {
    /// No cell mask changed.
    NoChange,
    /// At least one cell mask was narrowed or confirmed.
    Changed,
    /// The line's targets cannot be met given current confirmations.
    Contradiction,
}

/// Errors surfaced by [`Solver`](crate::Solver) construction and mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverError {
    /// A board axis has zero length.
    EmptyBoard,
    /// A board axis exceeds [`MAX_DIMENSION`].
    BoardTooLarge { axis: Axis, size: usize },
    /// The lookup table could not be allocated; the instance is unusable.
    TableCapacity,
    /// A hint array's length does not match the board dimensions.
    HintShape {
        expected_columns: usize,
        expected_rows: usize,
    },
    /// A line's targets are unachievable for its length; nothing was changed.
    HintOutOfRange {
        axis: Axis,
        index: usize,
        points: u32,
        volts: u32,
    },
    /// The hints admit no solution at all, independent of any user choice.
    Unsatisfiable,
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverError::EmptyBoard => write!(f, "board dimensions must be at least 1x1"),
            SolverError::BoardTooLarge { axis, size } => {
                write!(
                    f,
                    "{} count {} exceeds the maximum of {}",
                    axis, size, MAX_DIMENSION
                )
            }
            SolverError::TableCapacity => {
                write!(f, "failed to allocate the possibility lookup table")
            }
            SolverError::HintShape {
                expected_columns,
                expected_rows,
            } => {
                write!(
                    f,
                    "hint arrays must cover {} columns and {} rows",
                    expected_columns, expected_rows
                )
            }
            SolverError::HintOutOfRange {
                axis,
                index,
                points,
                volts,
            } => {
                write!(
                    f,
                    "{} {} cannot reach {} points with {} volts",
                    axis, index, points, volts
                )
            }
            SolverError::Unsatisfiable => {
                write!(f, "the board's hints admit no solution")
            }
        }
    }
}

impl std::error::Error for SolverError {}

/// The most recent user-set cell, kept for one-step rollback.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Decision {
    pub(crate) column: usize,
    pub(crate) row: usize,
    pub(crate) value: Value,
}
