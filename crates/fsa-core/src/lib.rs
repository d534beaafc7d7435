//! Finite state acceptors stored as arc lists.
//!
//! This crate provides the FSA representation that the weight computations
//! in `fsa-weights` run over, plus the structural predicates that decide
//! whether an FSA is fit for them.
//!
//! # Architecture
//!
//! - [`arc`] -- Plain-old-data arc record and label constants
//! - [`fsa`] -- Compressed-row FSA storage
//! - [`properties`] -- Validity, topological order and other structural checks
//!
//! Weights are never stored in the FSA; callers keep per-arc weights in a
//! separate slice indexed by arc position.

use std::ops::Range;

pub mod arc;
pub mod fsa;
pub mod properties;

pub use arc::{Arc, EPSILON, FINAL_SYMBOL};
pub use fsa::Fsa;

/// Error type for FSA construction.
#[derive(Debug, thiserror::Error)]
pub enum FsaError {
    #[error("arc index table has length {actual}, expected {expected}")]
    IndexLength { expected: usize, actual: usize },
    #[error("arc index table is not monotonic at state {state}")]
    IndexNotMonotonic { state: usize },
    #[error("arc index table entry {value} out of range for {num_arcs} arcs")]
    IndexOutOfRange { value: i32, num_arcs: usize },
    #[error("arc {arc_index} refers to state {state}, but the FSA has {num_states} states")]
    StateOutOfRange {
        arc_index: usize,
        state: i32,
        num_states: usize,
    },
}

/// Read-only enumeration interface over an FSA.
///
/// States are numbered `0..num_states()`. The arcs leaving a state occupy a
/// contiguous range of arc indexes, and ranges appear in ascending state
/// order. Per-arc data (such as weights) lives outside the FSA and is
/// indexed by the same arc index.
pub trait FsaView {
    /// Number of states.
    fn num_states(&self) -> usize;

    /// Number of arcs.
    fn num_arcs(&self) -> usize;

    /// The start state. Only meaningful when the FSA is non-empty.
    fn start_state(&self) -> usize {
        0
    }

    /// The final state: the last state by convention. Only meaningful when
    /// the FSA is non-empty.
    fn final_state(&self) -> usize {
        self.num_states().saturating_sub(1)
    }

    /// Arc indexes of the arcs leaving `state`.
    fn arc_range(&self, state: usize) -> Range<usize>;

    /// Source state of an arc.
    fn src_state(&self, arc_index: usize) -> usize;

    /// Destination state of an arc.
    fn dest_state(&self, arc_index: usize) -> usize;

    /// Label of an arc.
    fn label(&self, arc_index: usize) -> i32;
}

impl<T: FsaView + ?Sized> FsaView for &T {
    fn num_states(&self) -> usize {
        (**self).num_states()
    }

    fn num_arcs(&self) -> usize {
        (**self).num_arcs()
    }

    fn start_state(&self) -> usize {
        (**self).start_state()
    }

    fn final_state(&self) -> usize {
        (**self).final_state()
    }

    fn arc_range(&self, state: usize) -> Range<usize> {
        (**self).arc_range(state)
    }

    fn src_state(&self, arc_index: usize) -> usize {
        (**self).src_state(arc_index)
    }

    fn dest_state(&self, arc_index: usize) -> usize {
        (**self).dest_state(arc_index)
    }

    fn label(&self, arc_index: usize) -> i32 {
        (**self).label(arc_index)
    }
}
