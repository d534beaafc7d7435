// Backward pass: best or total weight from every state to the final state.

use fsa_core::FsaView;

use crate::check_lengths;
use crate::semiring::{LogSumWeight, MaxWeight, Semiring};

/// Compute backward state weights under the semiring `S`.
///
/// On return `state_weights[s]` is the `S`-sum, over all paths from `s` to
/// the final state, of the `S`-product of the arc weights along the path. It
/// is `S::ONE` for the final state and `S::ZERO` for states that cannot reach
/// it.
///
/// States are visited once in descending order. Since a top-sorted FSA
/// without self-loops has no arc into a lower-or-equal state, every
/// destination is final by the time its sources are folded.
///
/// # Panics
///
/// If `state_weights.len() != fsa.num_states()` or
/// `arc_weights.len() != fsa.num_arcs()`.
pub fn compute_backward_weights<S, F>(fsa: &F, arc_weights: &[f32], state_weights: &mut [f32])
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
    state_weights[fsa.final_state()] = S::ONE;

    for state in (0..num_states).rev() {
        let mut acc = state_weights[state];
        for arc_index in fsa.arc_range(state) {
            let dest_weight = state_weights[fsa.dest_state(arc_index)];
            if dest_weight == S::ZERO {
                continue;
            }
            acc = S::plus(acc, S::times(arc_weights[arc_index], dest_weight));
        }
        state_weights[state] = acc;
    }
}

/// Backward weights under the max-weight semiring: the most positive weight
/// along any path to the final state, or `-inf` if there is none.
pub fn compute_backward_max_weights<F: FsaView + ?Sized>(
    fsa: &F,
    arc_weights: &[f32],
    state_weights: &mut [f32],
) {
    compute_backward_weights::<MaxWeight, F>(fsa, arc_weights, state_weights);
}

/// Backward weights under the log-sum semiring.
pub fn compute_backward_log_sum_weights<F: FsaView + ?Sized>(
    fsa: &F,
    arc_weights: &[f32],
    state_weights: &mut [f32],
) {
    compute_backward_weights::<LogSumWeight, F>(fsa, arc_weights, state_weights);
}
