// Semirings over log-domain f32 weights, and the runtime selector between them.

use std::fmt;
use std::str::FromStr;

use crate::FbError;

/// An algebra for combining path weights.
///
/// `plus` combines the weights of alternative paths and `times` extends a
/// path by one arc. [`ZERO`](Semiring::ZERO) is the identity of `plus` and
/// absorbs under `times`; it marks "no path". [`ONE`](Semiring::ONE) is the
/// identity of `times`.
///
/// Both semirings here share `ZERO = -inf`, `ONE = 0` and `times = +`; they
/// differ in `plus`.
pub trait Semiring {
    const ZERO: f32;
    const ONE: f32;

    /// Combine two alternatives.
    fn plus(a: f32, b: f32) -> f32;

    /// Extend a path weight by an arc weight.
    #[inline]
    fn times(a: f32, b: f32) -> f32 {
        a + b
    }
}

/// Viterbi algebra: keep the single best path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaxWeight;

impl Semiring for MaxWeight {
    const ZERO: f32 = f32::NEG_INFINITY;
    const ONE: f32 = 0.0;

    #[inline]
    fn plus(a: f32, b: f32) -> f32 {
        if a >= b { a } else { b }
    }
}

/// Forward-backward algebra: sum probabilities over all paths, in log space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogSumWeight;

/// `ln(f32::EPSILON)`. Below this difference `ln(1 + exp(lo - hi))` is under
/// `f32::EPSILON`, so returning `hi` bounds the absolute error by that amount.
const MIN_LOG_DIFF: f32 = -15.942_385;

impl Semiring for LogSumWeight {
    const ZERO: f32 = f32::NEG_INFINITY;
    const ONE: f32 = 0.0;

    #[inline]
    fn plus(a: f32, b: f32) -> f32 {
        if a == f32::NEG_INFINITY {
            return b;
        }
        if b == f32::NEG_INFINITY {
            return a;
        }
        let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
        let diff = lo - hi;
        if diff >= MIN_LOG_DIFF {
            hi + diff.exp().ln_1p()
        } else {
            hi
        }
    }
}

/// Runtime choice of semiring for [`WfsaWithFbWeights`](crate::WfsaWithFbWeights).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FbWeightType {
    /// Best path: the most positive weight sum along any single path.
    #[default]
    MaxWeight,
    /// Total weight: log of the summed exponentiated path weights.
    LogSumWeight,
}

impl fmt::Display for FbWeightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FbWeightType::MaxWeight => f.write_str("max"),
            FbWeightType::LogSumWeight => f.write_str("log-sum"),
        }
    }
}

impl FromStr for FbWeightType {
    type Err = FbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "max" | "viterbi" => Ok(FbWeightType::MaxWeight),
            "log-sum" | "logsum" | "forward-backward" => Ok(FbWeightType::LogSumWeight),
            _ => Err(FbError::UnknownWeightType(s.to_string())),
        }
    }
}
