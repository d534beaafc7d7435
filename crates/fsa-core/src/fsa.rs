// Compressed-row FSA storage.

use std::ops::Range;

use crate::arc::{self, Arc};
use crate::{FsaError, FsaView};

/// A finite state acceptor stored as a compressed-row arc table.
///
/// `arc_indexes` has one entry per state plus a trailing sentinel: the arcs
/// leaving state `s` are `arcs[arc_indexes[s]..arc_indexes[s + 1]]`. State 0
/// is the start state and the last state is the final state.
///
/// Construction only checks the table layout. Use
/// [`properties::is_valid`](crate::properties::is_valid) and
/// [`properties::is_top_sorted`](crate::properties::is_top_sorted) to check
/// the semantic requirements of downstream algorithms.
#[derive(Clone, PartialEq, Eq)]
pub struct Fsa {
    arc_indexes: Vec<i32>,
    arcs: Vec<Arc>,
}

impl std::fmt::Debug for Fsa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fsa")
            .field("num_states", &self.num_states())
            .field("num_arcs", &self.arcs.len())
            .finish()
    }
}

impl Default for Fsa {
    fn default() -> Self {
        Self::empty()
    }
}

impl Fsa {
    /// The FSA with no states and no arcs.
    pub fn empty() -> Self {
        Self {
            arc_indexes: Vec::new(),
            arcs: Vec::new(),
        }
    }

    /// Build an FSA from a prepared index table and arc list.
    ///
    /// `arc_indexes` must be empty (for the empty FSA) or have
    /// `num_states + 1` non-decreasing entries starting at 0 and ending at
    /// `arcs.len()`. Every arc must name states in `0..num_states`.
    pub fn new(arc_indexes: Vec<i32>, arcs: Vec<Arc>) -> Result<Self, FsaError> {
        if arc_indexes.is_empty() {
            if !arcs.is_empty() {
                return Err(FsaError::IndexLength {
                    expected: 1,
                    actual: 0,
                });
            }
            return Ok(Self::empty());
        }

        let num_arcs = arcs.len();
        if arc_indexes[0] != 0 {
            return Err(FsaError::IndexOutOfRange {
                value: arc_indexes[0],
                num_arcs,
            });
        }
        for (state, pair) in arc_indexes.windows(2).enumerate() {
            if pair[1] < pair[0] {
                return Err(FsaError::IndexNotMonotonic { state });
            }
        }
        let last = arc_indexes[arc_indexes.len() - 1];
        if last < 0 || last as usize != num_arcs {
            return Err(FsaError::IndexOutOfRange {
                value: last,
                num_arcs,
            });
        }

        let num_states = arc_indexes.len() - 1;
        check_states(&arcs, num_states)?;

        Ok(Self { arc_indexes, arcs })
    }

    /// Build an FSA with `num_states` states from an unordered arc list.
    ///
    /// Arcs are grouped by source state; the relative order of arcs leaving
    /// the same state is preserved.
    pub fn from_arcs(num_states: usize, mut arcs: Vec<Arc>) -> Result<Self, FsaError> {
        if num_states == 0 {
            if !arcs.is_empty() {
                return Err(FsaError::StateOutOfRange {
                    arc_index: 0,
                    state: arcs[0].src_state,
                    num_states,
                });
            }
            return Ok(Self::empty());
        }
        check_states(&arcs, num_states)?;

        arcs.sort_by_key(|a| a.src_state);

        let mut arc_indexes = vec![0i32; num_states + 1];
        for a in &arcs {
            arc_indexes[a.src_state as usize + 1] += 1;
        }
        for s in 0..num_states {
            arc_indexes[s + 1] += arc_indexes[s];
        }

        Ok(Self { arc_indexes, arcs })
    }

    pub fn num_states(&self) -> usize {
        self.arc_indexes.len().saturating_sub(1)
    }

    pub fn num_arcs(&self) -> usize {
        self.arcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arc_indexes.is_empty()
    }

    /// All arcs, grouped by source state.
    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    /// The compressed-row index table (`num_states + 1` entries, or none).
    pub fn arc_indexes(&self) -> &[i32] {
        &self.arc_indexes
    }

    /// Arcs leaving `state`.
    pub fn leaving_arcs(&self, state: usize) -> &[Arc] {
        &self.arcs[self.state_arc_range(state)]
    }

    /// The arc table as a flat `i32` buffer, three entries per arc.
    pub fn arcs_as_i32(&self) -> &[i32] {
        arc::arcs_as_i32(&self.arcs)
    }

    #[inline]
    fn state_arc_range(&self, state: usize) -> Range<usize> {
        self.arc_indexes[state] as usize..self.arc_indexes[state + 1] as usize
    }
}

impl FsaView for Fsa {
    #[inline]
    fn num_states(&self) -> usize {
        Fsa::num_states(self)
    }

    #[inline]
    fn num_arcs(&self) -> usize {
        self.arcs.len()
    }

    #[inline]
    fn arc_range(&self, state: usize) -> Range<usize> {
        self.state_arc_range(state)
    }

    #[inline]
    fn src_state(&self, arc_index: usize) -> usize {
        self.arcs[arc_index].src_state as usize
    }

    #[inline]
    fn dest_state(&self, arc_index: usize) -> usize {
        self.arcs[arc_index].dest_state as usize
    }

    #[inline]
    fn label(&self, arc_index: usize) -> i32 {
        self.arcs[arc_index].label
    }
}

fn check_states(arcs: &[Arc], num_states: usize) -> Result<(), FsaError> {
    for (arc_index, a) in arcs.iter().enumerate() {
        for state in [a.src_state, a.dest_state] {
            if state < 0 || state as usize >= num_states {
                return Err(FsaError::StateOutOfRange {
                    arc_index,
                    state,
                    num_states,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FINAL_SYMBOL;

    fn chain() -> Fsa {
        Fsa::from_arcs(3, vec![Arc::new(1, 2, FINAL_SYMBOL), Arc::new(0, 1, 4)]).unwrap()
    }

    #[test]
    fn empty_fsa() {
        let fsa = Fsa::empty();
        assert!(fsa.is_empty());
        assert_eq!(fsa.num_states(), 0);
        assert_eq!(fsa.num_arcs(), 0);
        assert_eq!(Fsa::default(), fsa);
        assert_eq!(Fsa::new(Vec::new(), Vec::new()).unwrap(), fsa);
        assert_eq!(Fsa::from_arcs(0, Vec::new()).unwrap(), fsa);
    }

    #[test]
    fn from_arcs_groups_by_source() {
        let fsa = chain();
        assert_eq!(fsa.num_states(), 3);
        assert_eq!(fsa.arc_indexes(), &[0, 1, 2, 2]);
        assert_eq!(fsa.arcs()[0], Arc::new(0, 1, 4));
        assert_eq!(fsa.leaving_arcs(1), &[Arc::new(1, 2, FINAL_SYMBOL)]);
        assert!(fsa.leaving_arcs(2).is_empty());
    }

    #[test]
    fn from_arcs_keeps_order_within_state() {
        let fsa = Fsa::from_arcs(
            3,
            vec![
                Arc::new(1, 2, FINAL_SYMBOL),
                Arc::new(0, 1, 9),
                Arc::new(0, 1, 3),
            ],
        )
        .unwrap();
        assert_eq!(fsa.leaving_arcs(0), &[Arc::new(0, 1, 9), Arc::new(0, 1, 3)]);
    }

    #[test]
    fn view_matches_storage() {
        let fsa = chain();
        assert_eq!(FsaView::start_state(&fsa), 0);
        assert_eq!(FsaView::final_state(&fsa), 2);
        assert_eq!(fsa.arc_range(0), 0..1);
        assert_eq!(fsa.arc_range(2), 2..2);
        assert_eq!(fsa.src_state(1), 1);
        assert_eq!(fsa.dest_state(1), 2);
        assert_eq!(fsa.label(1), FINAL_SYMBOL);
    }

    #[test]
    fn view_through_reference() {
        let fsa = chain();
        let r = &fsa;
        assert_eq!(FsaView::num_states(&r), 3);
        assert_eq!(FsaView::arc_range(&r, 1), 1..2);
    }

    #[test]
    fn new_accepts_consistent_table() {
        let fsa = Fsa::new(
            vec![0, 2, 3, 3],
            vec![Arc::new(0, 1, 1), Arc::new(0, 2, FINAL_SYMBOL), Arc::new(1, 2, FINAL_SYMBOL)],
        )
        .unwrap();
        assert_eq!(fsa.num_states(), 3);
        assert_eq!(fsa.arc_range(0), 0..2);
    }

    #[test]
    fn new_rejects_non_monotonic_table() {
        let err = Fsa::new(vec![0, 2, 1, 2], vec![Arc::new(0, 1, 1), Arc::new(0, 2, 1)])
            .unwrap_err();
        assert!(matches!(err, FsaError::IndexNotMonotonic { state: 1 }));
    }

    #[test]
    fn new_rejects_wrong_sentinel() {
        let err = Fsa::new(vec![0, 1, 1], vec![Arc::new(0, 1, 1), Arc::new(0, 1, 2)])
            .unwrap_err();
        assert!(matches!(
            err,
            FsaError::IndexOutOfRange {
                value: 1,
                num_arcs: 2
            }
        ));
    }

    #[test]
    fn new_rejects_arcs_without_states() {
        let err = Fsa::new(Vec::new(), vec![Arc::new(0, 0, 1)]).unwrap_err();
        assert!(matches!(err, FsaError::IndexLength { .. }));
    }

    #[test]
    fn from_arcs_rejects_out_of_range_state() {
        let err = Fsa::from_arcs(2, vec![Arc::new(0, 1, 1), Arc::new(1, 5, -1)]).unwrap_err();
        assert!(matches!(
            err,
            FsaError::StateOutOfRange {
                arc_index: 1,
                state: 5,
                num_states: 2
            }
        ));
    }

    #[test]
    fn flat_view() {
        let fsa = chain();
        assert_eq!(fsa.arcs_as_i32(), &[0, 1, 4, 1, 2, -1]);
    }

    #[test]
    fn debug_is_summary() {
        let s = format!("{:?}", chain());
        assert_eq!(s, "Fsa { num_states: 3, num_arcs: 2 }");
    }
}
