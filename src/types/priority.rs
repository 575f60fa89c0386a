//! Priority scoring for delivery orders.
//!
//! ## Overview
//!
//! A priority score ranks outstanding orders: a higher score is served
//! first. Scores are `rust_decimal::Decimal` rather than `f64` so that the
//! priority index has a total, platform-independent order (no NaN, no
//! rounding drift between identical inputs).
//!
//! ## Default Formula
//!
//! ```text
//! score = 0.3 * (value / 50) - 0.7 * placed_at
//! ```
//!
//! Earlier orders and higher-value orders score higher.
//!
//! ## Examples
//!
//! ```
//! use glide_dispatch::types::priority::{PriorityScorer, WeightedScorer};
//! use rust_decimal::Decimal;
//!
//! let scorer = WeightedScorer::default();
//! // 0.3 * (50 / 50) - 0.7 * 0 = 0.3
//! assert_eq!(scorer.score(0, 50), Some(Decimal::new(3, 1)));
//! // 0.3 * (100 / 50) - 0.7 * 2 = -0.8
//! assert_eq!(scorer.score(2, 100), Some(Decimal::new(-8, 1)));
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Default weight applied to the normalized order value: 0.3
pub const DEFAULT_VALUE_WEIGHT: Decimal = Decimal::from_parts(3, 0, 0, false, 1);

/// Default weight applied to the placement time: 0.7
pub const DEFAULT_TIME_WEIGHT: Decimal = Decimal::from_parts(7, 0, 0, false, 1);

/// Default divisor normalizing the order value: 50
pub const DEFAULT_VALUE_NORMALIZER: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Computes the priority score of an order from its inputs.
///
/// Implemented by [`WeightedScorer`] and by any
/// `Fn(u64, u64) -> Option<Decimal>` taking `(placed_at, value)`.
pub trait PriorityScorer {
    /// Score an order placed at `placed_at` with monetary `value`
    ///
    /// # Returns
    ///
    /// * `Some(Decimal)` - The priority score
    /// * `None` - If the score cannot be computed (overflow, zero divisor)
    fn score(&self, placed_at: u64, value: u64) -> Option<Decimal>;
}

impl<F> PriorityScorer for F
where
    F: Fn(u64, u64) -> Option<Decimal>,
{
    #[inline]
    fn score(&self, placed_at: u64, value: u64) -> Option<Decimal> {
        self(placed_at, value)
    }
}

/// Linear scorer: `value_weight * (value / value_normalizer) - time_weight * placed_at`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedScorer {
    /// Weight of the normalized value term
    pub value_weight: Decimal,

    /// Weight of the placement time term
    pub time_weight: Decimal,

    /// Divisor applied to the raw value (must be non-zero)
    pub value_normalizer: Decimal,
}

impl Default for WeightedScorer {
    fn default() -> Self {
        Self {
            value_weight: DEFAULT_VALUE_WEIGHT,
            time_weight: DEFAULT_TIME_WEIGHT,
            value_normalizer: DEFAULT_VALUE_NORMALIZER,
        }
    }
}

impl WeightedScorer {
    /// Create a scorer with explicit weights
    pub fn new(value_weight: Decimal, time_weight: Decimal, value_normalizer: Decimal) -> Self {
        Self {
            value_weight,
            time_weight,
            value_normalizer,
        }
    }

    /// Check the normalizer is usable as a divisor
    pub fn is_valid(&self) -> bool {
        !self.value_normalizer.is_zero()
    }
}

impl PriorityScorer for WeightedScorer {
    fn score(&self, placed_at: u64, value: u64) -> Option<Decimal> {
        let normalized = Decimal::from(value).checked_div(self.value_normalizer)?;
        let value_term = self.value_weight.checked_mul(normalized)?;
        let time_term = self.time_weight.checked_mul(Decimal::from(placed_at))?;
        value_term.checked_sub(time_term)
    }
}

/// Lossy conversion of a score for display purposes
pub fn score_to_f64(score: Decimal) -> f64 {
    score.to_f64().unwrap_or(0.0)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_constants() {
        assert_eq!(DEFAULT_VALUE_WEIGHT, dec("0.3"));
        assert_eq!(DEFAULT_TIME_WEIGHT, dec("0.7"));
        assert_eq!(DEFAULT_VALUE_NORMALIZER, dec("50"));
    }

    #[test]
    fn test_default_formula() {
        let scorer = WeightedScorer::default();
        assert_eq!(scorer.score(0, 50), Some(dec("0.3")));
        assert_eq!(scorer.score(0, 10), Some(dec("0.06")));
        assert_eq!(scorer.score(0, 0), Some(Decimal::ZERO));
        assert_eq!(scorer.score(10, 500), Some(dec("-4")));
    }

    #[test]
    fn test_default_scorer_handles_full_input_range() {
        let scorer = WeightedScorer::default();
        assert!(scorer.score(u64::MAX, u64::MAX).is_some());
        assert!(scorer.score(u64::MAX, 0).is_some());
    }

    #[test]
    fn test_earlier_and_richer_orders_score_higher() {
        let scorer = WeightedScorer::default();
        assert!(scorer.score(1, 100) > scorer.score(2, 100));
        assert!(scorer.score(1, 200) > scorer.score(1, 100));
    }

    #[test]
    fn test_score_is_exact() {
        // 0.3 * (7 / 50) = 0.042, no binary rounding
        let scorer = WeightedScorer::default();
        assert_eq!(scorer.score(0, 7), Some(dec("0.042")));
    }

    #[test]
    fn test_zero_normalizer_has_no_score() {
        let scorer = WeightedScorer::new(dec("0.3"), dec("0.7"), Decimal::ZERO);
        assert!(!scorer.is_valid());
        assert_eq!(scorer.score(10, 1_000), None);
    }

    #[test]
    fn test_overflowing_weights_have_no_score() {
        let scorer = WeightedScorer::new(Decimal::ONE, Decimal::MAX, Decimal::ONE);
        assert!(scorer.is_valid());
        assert_eq!(scorer.score(2, 50), None);
        // placed_at 0 keeps the time term at zero
        assert_eq!(scorer.score(0, 50), Some(Decimal::from(50)));

        let scorer = WeightedScorer::new(Decimal::MAX, Decimal::ZERO, Decimal::ONE);
        assert_eq!(scorer.score(0, 2), None);
    }

    #[test]
    fn test_closure_scorer() {
        let by_value = |_placed_at: u64, value: u64| Some(Decimal::from(value));
        assert_eq!(by_value.score(99, 12), Some(Decimal::from(12)));
    }

    #[test]
    fn test_score_to_f64() {
        assert!((score_to_f64(dec("0.3")) - 0.3).abs() < 1e-12);
    }
}
