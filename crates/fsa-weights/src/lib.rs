//! Forward and backward state weights over topologically sorted FSAs.
//!
//! Given an FSA (through [`fsa_core::FsaView`]) and a slice of per-arc
//! weights, this crate computes for every state the best or total weight of
//! the paths from the start state to it (forward) and from it to the final
//! state (backward). Weights are log-domain scores where larger is better.
//!
//! # Architecture
//!
//! - [`semiring`] -- Max-weight and log-sum algebras, and the runtime selector
//! - [`forward`] -- Forward pass in ascending state order
//! - [`backward`] -- Backward pass in descending state order
//! - [`wfsa`] -- [`WfsaWithFbWeights`], an FSA bundled with both passes' results
//! - [`cost`] -- Sign conversion between costs and weights
//!
//! # Preconditions
//!
//! Every pass assumes the FSA satisfies
//! [`is_valid`](fsa_core::properties::is_valid) and
//! [`is_top_sorted`](fsa_core::properties::is_top_sorted), has no self-loops
//! ([`has_self_loops`](fsa_core::properties::has_self_loops) is false), and
//! that the arc weight slice has one entry per arc. Length mismatches panic; structural
//! violations are only caught by debug assertions or by
//! [`WfsaWithFbWeights::try_new`].

pub mod backward;
pub mod cost;
pub mod forward;
pub mod semiring;
pub mod wfsa;

pub use backward::{
    compute_backward_log_sum_weights, compute_backward_max_weights, compute_backward_weights,
};
pub use forward::{
    compute_forward_log_sum_weights, compute_forward_max_weights, compute_forward_weights,
};
pub use semiring::{FbWeightType, LogSumWeight, MaxWeight, Semiring};
pub use wfsa::WfsaWithFbWeights;

/// Error type for checked construction and selector parsing.
#[derive(Debug, thiserror::Error)]
pub enum FbError {
    #[error("arc weights have length {actual}, but the FSA has {expected} arcs")]
    ArcWeightsLength { expected: usize, actual: usize },
    #[error("FSA is not valid")]
    InvalidFsa,
    #[error("FSA is not topologically sorted")]
    NotTopSorted,
    #[error("FSA has self-loops")]
    SelfLoops,
    #[error("unknown weight type: {0}")]
    UnknownWeightType(String),
}

/// Panic unless the buffers match the FSA's state and arc counts.
#[inline]
pub(crate) fn check_lengths<F: fsa_core::FsaView + ?Sized>(
    fsa: &F,
    arc_weights: &[f32],
    state_weights: &[f32],
) {
    assert_eq!(
        state_weights.len(),
        fsa.num_states(),
        "state weight buffer must have one entry per state"
    );
    assert_eq!(
        arc_weights.len(),
        fsa.num_arcs(),
        "arc weights must have one entry per arc"
    );
}
