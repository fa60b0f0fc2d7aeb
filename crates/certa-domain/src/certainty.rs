//! Certainty-factor arithmetic
//!
//! Certainty factors (CF) are scalars in [0.0, 1.0] expressing belief strength.
//! Two combinations are used by the engine:
//!
//! - **OR-combination** for independent evidence about the same fact:
//!   `a + b * (1 - a)`
//! - **AND-combination** for jointly required conditions: `min(...)`
//!
//! A rule's firing confidence is its own weight attenuated by the combined
//! condition confidence: `rule_cf * min(condition_cfs)`.

/// Full certainty
pub const CERTAIN: f64 = 1.0;

/// No supporting evidence
pub const NONE: f64 = 0.0;

/// Combine two independent pieces of evidence (probabilistic OR)
///
/// Monotone: the result is never below `max(a, b)` for inputs in [0, 1], and it
/// only reaches 1.0 when one of the inputs is 1.0.
///
/// # Examples
///
/// ```
/// use certa_domain::certainty::combine_or;
///
/// assert!((combine_or(0.5, 0.5) - 0.75).abs() < 1e-12);
/// ```
pub fn combine_or(a: f64, b: f64) -> f64 {
    a + b * (1.0 - a)
}

/// Fold a sequence of confidences left-to-right with [`combine_or`]
///
/// Returns `None` for an empty sequence.
pub fn combine_all_or<I>(cfs: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut iter = cfs.into_iter();
    let first = iter.next()?;
    Some(iter.fold(first, combine_or))
}

/// Conjunction of condition confidences (minimum)
///
/// Returns `None` for an empty sequence.
pub fn combine_and<I>(cfs: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    cfs.into_iter().reduce(f64::min)
}

/// Scale a combined condition confidence by the rule's own weight
pub fn attenuate(rule_cf: f64, condition_cf: f64) -> f64 {
    rule_cf * condition_cf
}

/// Whether `cf` is a usable certainty factor
pub fn is_valid(cf: f64) -> bool {
    cf.is_finite() && (NONE..=CERTAIN).contains(&cf)
}

/// Clamp a finite value into [0, 1]; non-finite values become full certainty
pub fn clamp(cf: f64) -> f64 {
    if cf.is_finite() {
        cf.clamp(NONE, CERTAIN)
    } else {
        CERTAIN
    }
}

/// Render a confidence as a percentage with two decimals (e.g. `90.00%`)
pub fn format_percent(cf: f64) -> String {
    format!("{:.2}%", cf * 100.0)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: OR-combination never decreases belief
        #[test]
        fn test_or_is_monotone(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
            let combined = combine_or(a, b);
            prop_assert!(combined + 1e-12 >= a.max(b));
            prop_assert!(combined <= 1.0 + 1e-12);
        }

        /// Property: OR-combination is symmetric
        #[test]
        fn test_or_is_symmetric(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
            prop_assert!((combine_or(a, b) - combine_or(b, a)).abs() < 1e-12);
        }

        /// Property: AND-combination picks the weakest condition
        #[test]
        fn test_and_is_min(cfs in proptest::collection::vec(0.0f64..=1.0, 1..8)) {
            let min = cfs.iter().cloned().fold(f64::INFINITY, f64::min);
            prop_assert_eq!(combine_and(cfs), Some(min));
        }
    }
}
