//! Core Voltorb Flip deduction engine.
//!
//! A rectangular board hides a value from {1, 2, 3, Volt} in every cell.
//! Each row and column carries two targets: the sum of points along the
//! line (a Volt scores 0) and the number of Volts in the line. Given the
//! targets and any confirmed cells, [`Solver`] narrows each unknown cell
//! to the set of values that can still appear in a legal line assignment,
//! and propagates those deductions to a fixed point.
//!
//! The engine is a pure library: no rendering, no I/O, no process state.
//! Callers drive it through [`Solver::set_hints`], [`Solver::set_cell`]
//! and [`Solver::unset_cell`] and read cells back as [`CandidateSet`]s.

pub mod solver;

pub use solver::{LineResult, Solver, SolverError};

use serde::{Deserialize, Serialize};

/// Largest supported board dimension per axis.
///
/// Bounds both the lookup-table size and the per-line feasibility search,
/// which grows combinatorially with line length.
pub const MAX_DIMENSION: usize = 255;

/// A cell value: the three point tiles plus the Volt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    One,
    Two,
    Three,
    Volt,
}

impl Value {
    /// All values, in candidate-bit order.
    pub const ALL: [Value; 4] = [Value::One, Value::Two, Value::Three, Value::Volt];

    /// Points this value contributes to a line's point-sum.
    pub fn points(self) -> u32 {
        match self {
            Value::One => 1,
            Value::Two => 2,
            Value::Three => 3,
            Value::Volt => 0,
        }
    }

    /// Bit used for this value inside a [`CandidateSet`].
    fn bit(self) -> u8 {
        match self {
            Value::One => 0b0001,
            Value::Two => 0b0010,
            Value::Three => 0b0100,
            Value::Volt => 0b1000,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::One => write!(f, "1"),
            Value::Two => write!(f, "2"),
            Value::Three => write!(f, "3"),
            Value::Volt => write!(f, "V"),
        }
    }
}

/// Bit-set of values a cell can still hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateSet(u8);

impl CandidateSet {
    /// No values possible. A cell must never end up here; the solver
    /// treats an emptied set as a contradiction.
    pub const EMPTY: CandidateSet = CandidateSet(0);

    /// Full uncertainty: any of the four values.
    pub const ALL: CandidateSet = CandidateSet(0b1111);

    /// Set containing exactly one value.
    pub fn only(value: Value) -> Self {
        CandidateSet(value.bit())
    }

    pub fn contains(self, value: Value) -> bool {
        self.0 & value.bit() != 0
    }

    pub fn insert(&mut self, value: Value) {
        self.0 |= value.bit();
    }

    pub fn remove(&mut self, value: Value) {
        self.0 &= !value.bit();
    }

    /// Copy of this set with `value` removed.
    pub fn without(self, value: Value) -> Self {
        CandidateSet(self.0 & !value.bit())
    }

    pub fn union(self, other: CandidateSet) -> Self {
        CandidateSet(self.0 | other.0)
    }

    pub fn intersection(self, other: CandidateSet) -> Self {
        CandidateSet(self.0 & other.0)
    }

    /// Number of values in the set.
    pub fn len(self) -> u32 {
        self.0.count_ones()
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The single remaining value, if exactly one is left.
    pub fn single(self) -> Option<Value> {
        if self.0.count_ones() != 1 {
            return None;
        }
        Value::ALL.into_iter().find(|v| self.contains(*v))
    }

    /// Iterate over the values in the set, in candidate-bit order.
    pub fn iter(self) -> impl Iterator<Item = Value> {
        Value::ALL.into_iter().filter(move |v| self.contains(*v))
    }
}

impl std::fmt::Display for CandidateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for value in Value::ALL {
            if self.contains(value) {
                write!(f, "{}", value)?;
            } else {
                write!(f, "-")?;
            }
        }
        Ok(())
    }
}

/// One cell of the board: remaining candidates plus the confirmed flag.
///
/// Propagation sets `confirmed` only once a single candidate remains;
/// [`Solver::set_cell`] force-confirms a user-chosen value directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub candidates: CandidateSet,
    pub confirmed: bool,
}

impl Cell {
    /// Fully unknown cell.
    pub fn unknown() -> Self {
        Cell {
            candidates: CandidateSet::ALL,
            confirmed: false,
        }
    }

    /// Confirmed cell holding exactly `value`.
    pub fn confirmed(value: Value) -> Self {
        Cell {
            candidates: CandidateSet::only(value),
            confirmed: true,
        }
    }
}

/// A row or a column of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Column,
    Row,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Column => write!(f, "column"),
            Axis::Row => write!(f, "row"),
        }
    }
}

/// Per-line targets for both axes: point-sums and volt-counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hints {
    pub column_points: Vec<u32>,
    pub row_points: Vec<u32>,
    pub column_volts: Vec<u32>,
    pub row_volts: Vec<u32>,
}

impl Hints {
    pub fn new(
        column_points: Vec<u32>,
        row_points: Vec<u32>,
        column_volts: Vec<u32>,
        row_volts: Vec<u32>,
    ) -> Self {
        Hints {
            column_points,
            row_points,
            column_volts,
            row_volts,
        }
    }

    /// All-zero targets for a board of the given dimensions.
    pub fn zeroed(columns: usize, rows: usize) -> Self {
        Hints {
            column_points: vec![0; columns],
            row_points: vec![0; rows],
            column_volts: vec![0; columns],
            row_volts: vec![0; rows],
        }
    }
}

/// Playing field owned by one [`Solver`]: dimensions, cells, the
/// user-confirmed marks and the installed hints.
///
/// Cells are stored column-major (`column * rows + row`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Board {
    pub(crate) columns: usize,
    pub(crate) rows: usize,
    pub(crate) cells: Vec<Cell>,
    pub(crate) user_confirmed: Vec<bool>,
    pub(crate) hints: Hints,
}

impl Board {
    pub(crate) fn new(columns: usize, rows: usize) -> Self {
        Board {
            columns,
            rows,
            cells: vec![Cell::unknown(); columns * rows],
            user_confirmed: vec![false; columns * rows],
            hints: Hints::zeroed(columns, rows),
        }
    }

    /// Linear index of a cell, column-major.
    pub(crate) fn index(&self, column: usize, row: usize) -> usize {
        assert!(
            column < self.columns && row < self.rows,
            "cell ({}, {}) outside {}x{} board",
            column,
            row,
            self.columns,
            self.rows
        );
        column * self.rows + row
    }

    /// Number of cells in a line of the given axis.
    pub(crate) fn line_len(&self, axis: Axis) -> usize {
        match axis {
            Axis::Column => self.rows,
            Axis::Row => self.columns,
        }
    }

    /// Number of lines on the given axis.
    pub(crate) fn line_count(&self, axis: Axis) -> usize {
        match axis {
            Axis::Column => self.columns,
            Axis::Row => self.rows,
        }
    }

    /// Linear index of the `pos`-th cell of line `index` on `axis`.
    pub(crate) fn line_cell(&self, axis: Axis, index: usize, pos: usize) -> usize {
        match axis {
            Axis::Column => index * self.rows + pos,
            Axis::Row => pos * self.rows + index,
        }
    }

    /// Target point-sum of a line.
    pub(crate) fn line_points(&self, axis: Axis, index: usize) -> u32 {
        match axis {
            Axis::Column => self.hints.column_points[index],
            Axis::Row => self.hints.row_points[index],
        }
    }

    /// Target volt-count of a line.
    pub(crate) fn line_volts(&self, axis: Axis, index: usize) -> u32 {
        match axis {
            Axis::Column => self.hints.column_volts[index],
            Axis::Row => self.hints.row_volts[index],
        }
    }

    /// Reset every cell that is not user-confirmed to full uncertainty.
    pub(crate) fn reset_unconfirmed(&mut self) {
        for (cell, user) in self.cells.iter_mut().zip(&self.user_confirmed) {
            if !user {
                *cell = Cell::unknown();
            }
        }
    }
}
