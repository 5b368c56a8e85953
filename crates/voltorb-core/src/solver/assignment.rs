//! Assignment feasibility: which values of a distribution can land on
//! which unknown cell.
//!
//! Given one distribution and the current candidate masks of a line's
//! unknown cells, the checker searches for complete assignments that use
//! the whole distribution and respect every mask, and reports per cell
//! the union of values seen across all legal assignments. The search is
//! an explicit stack walk over the cell slots rather than deep recursion,
//! so its stack usage stays flat on long lines.

use super::lookup::Distribution;
use crate::{CandidateSet, Value};

/// Per-cell feasible values for `dist` against `masks`, or `None` when no
/// complete legal assignment exists.
///
/// A value is feasible for a cell when at least one assignment of the
/// whole distribution places it there while every other cell also
/// receives a value inside its mask. The walk places one value per
/// depth (depth = cell slot), trying the at most four distinct values
/// with a remaining count, and backtracks in place; every completed
/// placement ORs its values into the per-cell accumulators.
pub(crate) fn feasible_values(
    dist: &Distribution,
    masks: &[CandidateSet],
) -> Option<Vec<CandidateSet>> {
    debug_assert_eq!(dist.fields(), masks.len());
    let n = masks.len();
    if n == 0 {
        return Some(Vec::new());
    }

    let mut remaining = dist.counts();
    // Most each accumulator can reach; lets the walk stop once saturated.
    let caps: Vec<CandidateSet> = masks
        .iter()
        .map(|m| m.intersection(dist.value_mask()))
        .collect();

    let mut feasible = vec![CandidateSet::EMPTY; n];
    let mut found_any = false;

    // placed[d] = index into Value::ALL chosen at depth d.
    let mut placed = vec![0usize; n];
    let mut depth = 0;
    let mut next = 0usize;

    loop {
        if depth == n {
            found_any = true;
            for (slot, &vi) in placed.iter().enumerate() {
                feasible[slot].insert(Value::ALL[vi]);
            }
            if feasible == caps {
                break;
            }
            depth -= 1;
            let vi = placed[depth];
            remaining[vi] += 1;
            next = vi + 1;
            continue;
        }

        while next < 4 {
            if remaining[next] > 0 && masks[depth].contains(Value::ALL[next]) {
                break;
            }
            next += 1;
        }

        if next < 4 {
            remaining[next] -= 1;
            placed[depth] = next;
            depth += 1;
            next = 0;
        } else {
            if depth == 0 {
                break;
            }
            depth -= 1;
            let vi = placed[depth];
            remaining[vi] += 1;
            next = vi + 1;
        }
    }

    if found_any {
        Some(feasible)
    } else {
        None
    }
}
