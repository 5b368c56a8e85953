//! Per-line propagation: narrow the unknown cells of one row or column.

use super::assignment::feasible_values;
use super::lookup::LookupTable;
use super::LineResult;
use crate::{Axis, Board, CandidateSet, Cell, Value};

/// Narrow every unknown cell of line `index` on `axis` against the line's
/// targets, mutating the working snapshot in place.
///
/// Tallies the confirmed cells, derives the missing field/point/volt
/// counts, fetches the matching distributions and intersects each unknown
/// cell's mask with the union of per-cell feasible values across all
/// feasible distributions. A cell narrowed to a single value is marked
/// confirmed.
pub(crate) fn propagate_line(
    working: &mut [Cell],
    board: &Board,
    lookup: &LookupTable,
    axis: Axis,
    index: usize,
) -> LineResult {
    let len = board.line_len(axis);

    let mut confirmed_fields = 0usize;
    let mut confirmed_points = 0u32;
    let mut confirmed_volts = 0u32;
    let mut open: Vec<(usize, CandidateSet)> = Vec::with_capacity(len);

    for pos in 0..len {
        let idx = board.line_cell(axis, index, pos);
        let cell = working[idx];
        if cell.confirmed {
            confirmed_fields += 1;
            if let Some(value) = cell.candidates.single() {
                confirmed_points += value.points();
                if value == Value::Volt {
                    confirmed_volts += 1;
                }
            }
        } else {
            open.push((idx, cell.candidates));
        }
    }

    let missing_fields = len - confirmed_fields;
    if missing_fields == 0 {
        return LineResult::NoChange;
    }

    let Some(missing_points) = board.line_points(axis, index).checked_sub(confirmed_points) else {
        return LineResult::Contradiction;
    };
    let Some(missing_volts) = board.line_volts(axis, index).checked_sub(confirmed_volts) else {
        return LineResult::Contradiction;
    };
    if missing_volts as usize > missing_fields {
        return LineResult::Contradiction;
    }
    let point_fields = (missing_fields - missing_volts as usize) as u32;
    if missing_points < point_fields || missing_points > 3 * point_fields {
        return LineResult::Contradiction;
    }

    let masks: Vec<CandidateSet> = open.iter().map(|&(_, mask)| mask).collect();
    let mut allowed = vec![CandidateSet::EMPTY; masks.len()];
    let mut any_feasible = false;
    for dist in lookup.distributions(missing_fields, missing_volts, missing_points) {
        if let Some(per_cell) = feasible_values(dist, &masks) {
            any_feasible = true;
            for (acc, cell) in allowed.iter_mut().zip(per_cell) {
                *acc = acc.union(cell);
            }
        }
    }
    if !any_feasible {
        return LineResult::Contradiction;
    }

    let mut changed = false;
    for ((idx, mask), allowed) in open.into_iter().zip(allowed) {
        let narrowed = mask.intersection(allowed);
        if narrowed.is_empty() {
            return LineResult::Contradiction;
        }
        let confirm = narrowed.single().is_some();
        let new_cell = Cell {
            candidates: narrowed,
            confirmed: confirm,
        };
        if new_cell != working[idx] {
            working[idx] = new_cell;
            changed = true;
        }
    }

    if changed {
        LineResult::Changed
    } else {
        LineResult::NoChange
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(columns: usize, rows: usize) -> (Board, LookupTable) {
        let board = Board::new(columns, rows);
        let lookup = LookupTable::build(columns.max(rows)).unwrap();
        (board, lookup)
    }

    #[test]
    fn test_narrows_to_distribution_values() {
        // One column of two cells: 1 point and 1 volt missing.
        let (mut board, lookup) = setup(1, 2);
        board.hints.column_points = vec![1];
        board.hints.column_volts = vec![1];
        board.hints.row_points = vec![1, 0];
        board.hints.row_volts = vec![0, 1];

        let mut working = board.cells.clone();
        let result = propagate_line(&mut working, &board, &lookup, Axis::Column, 0);
        assert_eq!(result, LineResult::Changed);
        let expected = CandidateSet::only(Value::One).union(CandidateSet::only(Value::Volt));
        assert_eq!(working[0].candidates, expected);
        assert_eq!(working[1].candidates, expected);
        assert!(!working[0].confirmed);
    }

    #[test]
    fn test_confirmed_neighbor_forces_last_cell() {
        let (mut board, lookup) = setup(1, 2);
        board.hints.column_points = vec![1];
        board.hints.column_volts = vec![1];

        let mut working = board.cells.clone();
        working[0] = Cell::confirmed(Value::Volt);
        let result = propagate_line(&mut working, &board, &lookup, Axis::Column, 0);
        assert_eq!(result, LineResult::Changed);
        assert_eq!(working[1].candidates.single(), Some(Value::One));
        assert!(working[1].confirmed);
    }

    #[test]
    fn test_fully_confirmed_line_is_no_change() {
        let (mut board, lookup) = setup(1, 2);
        board.hints.column_points = vec![3];
        board.hints.column_volts = vec![0];

        let mut working = board.cells.clone();
        working[0] = Cell::confirmed(Value::One);
        working[1] = Cell::confirmed(Value::Two);
        let result = propagate_line(&mut working, &board, &lookup, Axis::Column, 0);
        assert_eq!(result, LineResult::NoChange);
    }

    #[test]
    fn test_overshot_points_is_contradiction() {
        let (mut board, lookup) = setup(1, 3);
        board.hints.column_points = vec![3];
        board.hints.column_volts = vec![0];

        let mut working = board.cells.clone();
        working[0] = Cell::confirmed(Value::Three);
        working[1] = Cell::confirmed(Value::Two);
        let result = propagate_line(&mut working, &board, &lookup, Axis::Column, 0);
        assert_eq!(result, LineResult::Contradiction);
    }

    #[test]
    fn test_unreachable_points_is_contradiction() {
        // 3 unknown cells with 1 volt can sum to at most 6.
        let (mut board, lookup) = setup(1, 3);
        board.hints.column_points = vec![7];
        board.hints.column_volts = vec![1];

        let mut working = board.cells.clone();
        let result = propagate_line(&mut working, &board, &lookup, Axis::Column, 0);
        assert_eq!(result, LineResult::Contradiction);
    }

    #[test]
    fn test_masks_block_every_distribution() {
        // 2 points over 2 cells means two 1s, but one cell lost its 1 bit.
        let (mut board, lookup) = setup(1, 2);
        board.hints.column_points = vec![2];
        board.hints.column_volts = vec![0];

        let mut working = board.cells.clone();
        working[0].candidates = CandidateSet::ALL.without(Value::One);
        let result = propagate_line(&mut working, &board, &lookup, Axis::Column, 0);
        assert_eq!(result, LineResult::Contradiction);
    }

    #[test]
    fn test_row_axis_strides_across_columns() {
        // 3x1 board, row 0 needs 2 points and 1 volt over 3 cells.
        let (mut board, lookup) = setup(3, 1);
        board.hints.row_points = vec![2];
        board.hints.row_volts = vec![1];

        let mut working = board.cells.clone();
        let result = propagate_line(&mut working, &board, &lookup, Axis::Row, 0);
        assert_eq!(result, LineResult::Changed);
        let expected = CandidateSet::only(Value::One).union(CandidateSet::only(Value::Volt));
        for idx in 0..3 {
            assert_eq!(working[idx].candidates, expected);
        }
    }

    #[test]
    fn test_idempotent_on_stable_line() {
        let (mut board, lookup) = setup(1, 2);
        board.hints.column_points = vec![1];
        board.hints.column_volts = vec![1];

        let mut working = board.cells.clone();
        assert_eq!(
            propagate_line(&mut working, &board, &lookup, Axis::Column, 0),
            LineResult::Changed
        );
        assert_eq!(
            propagate_line(&mut working, &board, &lookup, Axis::Column, 0),
            LineResult::NoChange
        );
    }
}
