//! Solver orchestrator.
//!
//! Owns the authoritative board and a working snapshot, drives per-line
//! propagation to a fixed point after every mutation, and rolls back the
//! most recent user decision when it causes a contradiction.

mod assignment;
mod line;
mod lookup;
mod types;

use crate::{Axis, Board, CandidateSet, Cell, Hints, Value, MAX_DIMENSION};
use line::propagate_line;
use lookup::LookupTable;
use types::Decision;

pub use types::{LineResult, SolverError};

/// Deduction engine for one puzzle instance.
///
/// Construction precomputes the possibility lookup table for the longest
/// line; afterwards every mutation ([`set_hints`](Solver::set_hints),
/// [`set_cell`](Solver::set_cell), [`unset_cell`](Solver::unset_cell))
/// synchronously propagates all line constraints to a fixed point before
/// returning. Deductions are written to a working snapshot and committed
/// to the authoritative board only once a full sweep makes no further
/// change, so a rolled-back contradiction restores the last committed
/// stable state.
#[derive(Debug)]
pub struct Solver {
    board: Board,
    working: Vec<Cell>,
    lookup: LookupTable,
    last_decision: Option<Decision>,
}

impl Solver {
    /// Create a solver for a `rows` x `columns` board with zeroed hints.
    ///
    /// Dimensions must be between 1 and [`MAX_DIMENSION`] per axis. The
    /// board starts fully unknown; install targets with
    /// [`set_hints`](Solver::set_hints) before setting cells.
    pub fn new(rows: usize, columns: usize) -> Result<Self, SolverError> {
        if rows == 0 || columns == 0 {
            return Err(SolverError::EmptyBoard);
        }
        if columns > MAX_DIMENSION {
            return Err(SolverError::BoardTooLarge {
                axis: Axis::Column,
                size: columns,
            });
        }
        if rows > MAX_DIMENSION {
            return Err(SolverError::BoardTooLarge {
                axis: Axis::Row,
                size: rows,
            });
        }

        let lookup = LookupTable::build(rows.max(columns))?;
        let board = Board::new(columns, rows);
        let working = board.cells.clone();
        Ok(Solver {
            board,
            working,
            lookup,
            last_decision: None,
        })
    }

    pub fn column_count(&self) -> usize {
        self.board.columns
    }

    pub fn row_count(&self) -> usize {
        self.board.rows
    }

    /// Candidate mask of a cell.
    ///
    /// Panics if the coordinates are outside the board.
    pub fn cell(&self, column: usize, row: usize) -> CandidateSet {
        self.board.cells[self.board.index(column, row)].candidates
    }

    /// Whether a cell's value is established, by deduction or by the user.
    pub fn is_confirmed(&self, column: usize, row: usize) -> bool {
        self.board.cells[self.board.index(column, row)].confirmed
    }

    /// Whether a cell was confirmed by an explicit user action.
    pub fn is_user_confirmed(&self, column: usize, row: usize) -> bool {
        self.board.user_confirmed[self.board.index(column, row)]
    }

    /// The currently installed line targets.
    pub fn hints(&self) -> &Hints {
        &self.board.hints
    }

    /// Force-confirm a cell to a user-chosen value and re-propagate.
    ///
    /// The choice is recorded as the last user decision: if it makes the
    /// board contradictory, the solver restores the previous stable state
    /// with `value` excluded from this cell's mask and the user flag
    /// cleared. Returns the cell's resulting mask, which propagation may
    /// narrow further but never widen. `Err(Unsatisfiable)` means the
    /// board admits no solution even after the rollback; the cell then
    /// keeps the written confirmation, since no stable state exists to
    /// commit or restore.
    pub fn set_cell(
        &mut self,
        column: usize,
        row: usize,
        value: Value,
    ) -> Result<CandidateSet, SolverError> {
        let idx = self.board.index(column, row);
        self.board.cells[idx] = Cell::confirmed(value);
        self.board.user_confirmed[idx] = true;
        self.last_decision = Some(Decision { column, row, value });

        self.solve_until_stable()?;
        Ok(self.board.cells[idx].candidates)
    }

    /// Clear a cell back to full uncertainty and re-derive the board.
    ///
    /// Removing a clue can invalidate any downstream deduction, so every
    /// cell that is not user-confirmed is reset before propagation runs
    /// again from scratch. The retracted choice can no longer be rolled
    /// back, so the decision slot is dropped.
    pub fn unset_cell(&mut self, column: usize, row: usize) -> Result<CandidateSet, SolverError> {
        let idx = self.board.index(column, row);
        self.board.cells[idx] = Cell::unknown();
        self.board.user_confirmed[idx] = false;
        self.last_decision = None;

        self.board.reset_unconfirmed();
        self.solve_until_stable()?;
        Ok(self.board.cells[idx].candidates)
    }

    /// Install line targets and re-derive the board.
    ///
    /// Each line's targets must be achievable for its length
    /// (`volts <= len` and `len - volts <= points <= 3 * (len - volts)`);
    /// otherwise the call is rejected and no state changes. On success
    /// every non-user-confirmed cell is reset and propagation runs to a
    /// fixed point: `Ok(true)` if the board stabilized, `Ok(false)` if
    /// the hints turned out to be globally unsatisfiable.
    pub fn set_hints(&mut self, hints: &Hints) -> Result<bool, SolverError> {
        self.validate_hints(hints)?;

        self.board.hints = hints.clone();
        self.board.reset_unconfirmed();
        match self.solve_until_stable() {
            Ok(()) => Ok(true),
            Err(SolverError::Unsatisfiable) => Ok(false),
            Err(other) => Err(other),
        }
    }

    fn validate_hints(&self, hints: &Hints) -> Result<(), SolverError> {
        let columns = self.board.columns;
        let rows = self.board.rows;
        if hints.column_points.len() != columns
            || hints.column_volts.len() != columns
            || hints.row_points.len() != rows
            || hints.row_volts.len() != rows
        {
            return Err(SolverError::HintShape {
                expected_columns: columns,
                expected_rows: rows,
            });
        }

        for (axis, len, points, volts) in [
            (Axis::Column, rows, &hints.column_points, &hints.column_volts),
            (Axis::Row, columns, &hints.row_points, &hints.row_volts),
        ] {
            for (index, (&p, &v)) in points.iter().zip(volts).enumerate() {
                let (p_len, v_len) = (p as usize, v as usize);
                let achievable =
                    v_len <= len && p_len + v_len >= len && p_len <= (len - v_len) * 3;
                if !achievable {
                    return Err(SolverError::HintOutOfRange {
                        axis,
                        index,
                        points: p,
                        volts: v,
                    });
                }
            }
        }
        Ok(())
    }

    /// Run full sweeps until a fixed point, rolling back the last user
    /// decision on contradiction.
    ///
    /// The working snapshot starts as a copy of the authoritative board
    /// and is committed back only from the no-change case. A second
    /// contradiction after the single rollback (or any contradiction
    /// with no user decision on record) means the hints themselves are
    /// unsatisfiable.
    fn solve_until_stable(&mut self) -> Result<(), SolverError> {
        self.working.copy_from_slice(&self.board.cells);

        loop {
            match self.sweep() {
                LineResult::NoChange => {
                    self.board.cells.copy_from_slice(&self.working);
                    return Ok(());
                }
                LineResult::Changed => continue,
                LineResult::Contradiction => match self.last_decision.take() {
                    Some(decision) => {
                        // The user's choice, not the puzzle, caused the
                        // contradiction: restore the stable state minus
                        // that one option.
                        self.working.copy_from_slice(&self.board.cells);
                        let idx = self.board.index(decision.column, decision.row);
                        self.working[idx] = Cell {
                            candidates: CandidateSet::ALL.without(decision.value),
                            confirmed: false,
                        };
                        self.board.user_confirmed[idx] = false;
                    }
                    None => return Err(SolverError::Unsatisfiable),
                },
            }
        }
    }

    /// One pass over every column, then every row.
    fn sweep(&mut self) -> LineResult {
        let mut changed = false;
        for axis in [Axis::Column, Axis::Row] {
            for index in 0..self.board.line_count(axis) {
                match propagate_line(&mut self.working, &self.board, &self.lookup, axis, index) {
                    LineResult::Contradiction => return LineResult::Contradiction,
                    LineResult::Changed => changed = true,
                    LineResult::NoChange => {}
                }
            }
        }
        if changed {
            LineResult::Changed
        } else {
            LineResult::NoChange
        }
    }
}
