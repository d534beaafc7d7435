// An FSA bundled with its arc weights and both passes' state weights.

use fsa_core::properties::{has_self_loops, is_top_sorted, is_valid};
use fsa_core::{Fsa, FsaView};
use tracing::debug;

use crate::FbError;
use crate::backward::compute_backward_weights;
use crate::forward::compute_forward_weights;
use crate::semiring::{FbWeightType, LogSumWeight, MaxWeight, Semiring};

/// A weighted FSA with forward and backward state weights.
///
/// Borrows the FSA and its arc weights for `'a`; both must stay alive (and
/// unmodified, which the borrow guarantees) for as long as this value
/// exists. The state weights are computed once in the constructor and are
/// read-only afterwards.
///
/// Both weight arrays share one allocation of `2 * num_states` entries: the
/// forward weights occupy the first half and the backward weights the
/// second.
///
/// With these, downstream code can compute the total weight
/// (`forward[final]`, equal to `backward[start]`) and per-arc posteriors
/// (`forward[src] + arc_weight + backward[dest] - total`).
pub struct WfsaWithFbWeights<'a, F: FsaView + ?Sized = Fsa> {
    fsa: &'a F,
    arc_weights: &'a [f32],
    weight_type: FbWeightType,
    /// Forward weights in `[..num_states]`, backward weights after.
    mem: Box<[f32]>,
}

impl<F: FsaView + ?Sized> std::fmt::Debug for WfsaWithFbWeights<'_, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WfsaWithFbWeights")
            .field("num_states", &self.num_states())
            .field("num_arcs", &self.arc_weights.len())
            .field("weight_type", &self.weight_type)
            .field("total_weight", &self.total_weight())
            .finish()
    }
}

impl<'a, F: FsaView + ?Sized> WfsaWithFbWeights<'a, F> {
    /// Run the forward and backward passes over `fsa` under the semiring
    /// selected by `t`.
    ///
    /// The FSA must satisfy `is_valid` and `is_top_sorted` and have no
    /// self-loops. Those checks are debug assertions only; use
    /// [`try_new`](Self::try_new) to have them reported as errors in every
    /// build.
    ///
    /// # Panics
    ///
    /// If `arc_weights.len() != fsa.num_arcs()`.
    pub fn new(fsa: &'a F, arc_weights: &'a [f32], t: FbWeightType) -> Self {
        assert_eq!(
            arc_weights.len(),
            fsa.num_arcs(),
            "arc weights must have one entry per arc"
        );
        debug_assert!(is_valid(fsa), "FSA is not valid");
        debug_assert!(is_top_sorted(fsa), "FSA is not topologically sorted");
        debug_assert!(!has_self_loops(fsa), "FSA has self-loops");

        let num_states = fsa.num_states();
        let mut mem = vec![0.0f32; 2 * num_states].into_boxed_slice();
        match t {
            FbWeightType::MaxWeight => {
                compute_both::<MaxWeight, F>(fsa, arc_weights, &mut mem);
            }
            FbWeightType::LogSumWeight => {
                compute_both::<LogSumWeight, F>(fsa, arc_weights, &mut mem);
            }
        }

        let wfsa = Self {
            fsa,
            arc_weights,
            weight_type: t,
            mem,
        };
        debug!(
            num_states,
            num_arcs = arc_weights.len(),
            weight_type = %t,
            total_weight = wfsa.total_weight(),
            "computed forward/backward weights"
        );
        wfsa
    }

    /// Like [`new`](Self::new), but checks every precondition first and
    /// returns the first one that fails.
    pub fn try_new(fsa: &'a F, arc_weights: &'a [f32], t: FbWeightType) -> Result<Self, FbError> {
        if arc_weights.len() != fsa.num_arcs() {
            debug!(
                expected = fsa.num_arcs(),
                actual = arc_weights.len(),
                "arc weight length mismatch"
            );
            return Err(FbError::ArcWeightsLength {
                expected: fsa.num_arcs(),
                actual: arc_weights.len(),
            });
        }
        if !is_valid(fsa) {
            debug!(num_states = fsa.num_states(), "rejecting invalid FSA");
            return Err(FbError::InvalidFsa);
        }
        if !is_top_sorted(fsa) {
            debug!(num_states = fsa.num_states(), "rejecting FSA that is not top-sorted");
            return Err(FbError::NotTopSorted);
        }
        if has_self_loops(fsa) {
            debug!(num_states = fsa.num_states(), "rejecting FSA with self-loops");
            return Err(FbError::SelfLoops);
        }
        Ok(Self::new(fsa, arc_weights, t))
    }

    /// The FSA the weights were computed over.
    pub fn fsa(&self) -> &'a F {
        self.fsa
    }

    /// The arc weights, indexed by arc.
    pub fn arc_weights(&self) -> &'a [f32] {
        self.arc_weights
    }

    pub fn weight_type(&self) -> FbWeightType {
        self.weight_type
    }

    pub fn num_states(&self) -> usize {
        self.mem.len() / 2
    }

    /// Forward weights, indexed by state.
    pub fn forward_state_weights(&self) -> &[f32] {
        &self.mem[..self.num_states()]
    }

    /// Backward weights, indexed by state.
    pub fn backward_state_weights(&self) -> &[f32] {
        &self.mem[self.num_states()..]
    }

    /// Weight of the whole FSA: `forward[final]`, or `-inf` when it is empty.
    pub fn total_weight(&self) -> f32 {
        if self.num_states() == 0 {
            return f32::NEG_INFINITY;
        }
        self.forward_state_weights()[self.fsa.final_state()]
    }

    /// Posterior of one arc relative to the total weight.
    ///
    /// Under the log-sum semiring this is the log probability that a path
    /// drawn in proportion to its weight uses the arc. Under the max-weight
    /// semiring it is how far the best path through the arc falls short of
    /// the overall best path (0 for arcs on a best path). Arcs on no complete
    /// path get `-inf`.
    pub fn arc_posterior(&self, arc_index: usize) -> f32 {
        let total = self.total_weight();
        let forward = self.forward_state_weights()[self.fsa.src_state(arc_index)];
        let backward = self.backward_state_weights()[self.fsa.dest_state(arc_index)];
        if total == f32::NEG_INFINITY
            || forward == f32::NEG_INFINITY
            || backward == f32::NEG_INFINITY
        {
            return f32::NEG_INFINITY;
        }
        forward + self.arc_weights[arc_index] + backward - total
    }

    /// [`arc_posterior`](Self::arc_posterior) for every arc, in arc order.
    pub fn arc_posteriors(&self) -> Vec<f32> {
        (0..self.arc_weights.len())
            .map(|arc_index| self.arc_posterior(arc_index))
            .collect()
    }

    /// For each arc, whether its posterior is within `beam` of the best.
    ///
    /// Arcs outside the beam (and arcs on no complete path) are `false`.
    pub fn arcs_within_beam(&self, beam: f32) -> Vec<bool> {
        (0..self.arc_weights.len())
            .map(|arc_index| self.arc_posterior(arc_index) >= -beam)
            .collect()
    }
}

/// Forward pass into the first half of `mem`, backward into the second.
fn compute_both<S: Semiring, F: FsaView + ?Sized>(fsa: &F, arc_weights: &[f32], mem: &mut [f32]) {
    let (forward, backward) = mem.split_at_mut(fsa.num_states());
    compute_forward_weights::<S, F>(fsa, arc_weights, forward);
    compute_backward_weights::<S, F>(fsa, arc_weights, backward);
}
