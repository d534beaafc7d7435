// Forward pass: best or total weight from the start state to every state.

use fsa_core::FsaView;

use crate::check_lengths;
use crate::semiring::{LogSumWeight, MaxWeight, Semiring};

/// Compute forward state weights under the semiring `S`.
///
/// On return `state_weights[s]` is the `S`-sum, over all paths from the start
/// state to `s`, of the `S`-product of the arc weights along the path. It is
/// `S::ONE` for the start state and `S::ZERO` for states no path reaches.
///
/// The FSA must satisfy `is_valid` and `is_top_sorted` and have no
/// self-loops: states are visited once in ascending order, so every
/// contribution to a state is written before that state is read.
///
/// # Panics
///
/// If `state_weights.len() != fsa.num_states()` or
/// `arc_weights.len() != fsa.num_arcs()`.
pub fn compute_forward_weights<S, F>(fsa: &F, arc_weights: &[f32], state_weights: &mut [f32])
where
    S: Semiring,
    F: FsaView + ?Sized,
{
    check_lengths(fsa, arc_weights, state_weights);
    let num_states = fsa.num_states();
    if num_states == 0 {
        return;
    }

    state_weights.fill(S::ZERO);
    state_weights[fsa.start_state()] = S::ONE;

    for state in 0..num_states {
        let src_weight = state_weights[state];
        if src_weight == S::ZERO {
            continue;
        }
        for arc_index in fsa.arc_range(state) {
            let dest = fsa.dest_state(arc_index);
            let candidate = S::times(src_weight, arc_weights[arc_index]);
            state_weights[dest] = S::plus(state_weights[dest], candidate);
        }
    }
}

/// Forward weights under the max-weight semiring: the most positive weight
/// along any path from the start state, or `-inf` if there is none.
pub fn compute_forward_max_weights<F: FsaView + ?Sized>(
    fsa: &F,
    arc_weights: &[f32],
    state_weights: &mut [f32],
) {
    compute_forward_weights::<MaxWeight, F>(fsa, arc_weights, state_weights);
}

/// Forward weights under the log-sum semiring: the log of the total
/// exponentiated weight of all paths from the start state.
pub fn compute_forward_log_sum_weights<F: FsaView + ?Sized>(
    fsa: &F,
    arc_weights: &[f32],
    state_weights: &mut [f32],
) {
    compute_forward_weights::<LogSumWeight, F>(fsa, arc_weights, state_weights);
}
