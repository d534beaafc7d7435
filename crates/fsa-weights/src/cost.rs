// Sign conversion between costs (negative log-probs, smaller is better) and
// weights (log-probs, larger is better).

/// Negate costs into weights. `+inf` cost becomes `-inf` weight.
pub fn costs_to_weights(costs: &[f32]) -> Vec<f32> {
    costs.iter().map(|&c| -c).collect()
}

/// Negate weights into costs. `-inf` weight becomes `+inf` cost.
pub fn weights_to_costs(weights: &[f32]) -> Vec<f32> {
    weights.iter().map(|&w| -w).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negates_finite_values() {
        assert_eq!(costs_to_weights(&[1.5, 0.0, -2.0]), vec![-1.5, 0.0, 2.0]);
        assert_eq!(weights_to_costs(&[-1.5, 3.0]), vec![1.5, -3.0]);
    }

    #[test]
    fn maps_infinities() {
        assert_eq!(costs_to_weights(&[f32::INFINITY]), vec![f32::NEG_INFINITY]);
        assert_eq!(weights_to_costs(&[f32::NEG_INFINITY]), vec![f32::INFINITY]);
    }

    #[test]
    fn empty_input() {
        assert!(costs_to_weights(&[]).is_empty());
    }
}
