//! Composite risk from per-indicator classes.

use crate::domain::{OverallRisk, RiskClass, round_to};

/// Mean score at or above which the composite is danger.
pub const DANGER_CUTOFF: f64 = 2.5;
/// Mean score at or above which the composite is warning.
pub const WARNING_CUTOFF: f64 = 1.8;

/// Unweighted mean of the indicator scores, classified with the global
/// cut-points. Returns `None` for an empty input.
pub fn aggregate<I>(classes: I) -> Option<OverallRisk>
where
    I: IntoIterator<Item = RiskClass>,
{
    let (sum, n) = classes
        .into_iter()
        .fold((0u32, 0u32), |(sum, n), class| (sum + u32::from(class.score()), n + 1));
    if n == 0 {
        return None;
    }

    let mean = f64::from(sum) / f64::from(n);
    let class = composite_class(mean);
    Some(OverallRisk {
        class,
        text: class.composite_label().to_string(),
        score: round_to(mean, 2),
    })
}

/// Classify a mean score with the global cut-points.
pub fn composite_class(mean: f64) -> RiskClass {
    if mean >= DANGER_CUTOFF {
        RiskClass::Danger
    } else if mean >= WARNING_CUTOFF {
        RiskClass::Warning
    } else {
        RiskClass::Safe
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RiskClass::{Danger, Safe, Warning};

    #[test]
    fn all_safe() {
        let overall = aggregate([Safe; 5]).unwrap();
        assert_eq!(overall.class, Safe);
        assert_eq!(overall.score, 1.0);
        assert_eq!(overall.text, "저위험");
    }

    #[test]
    fn all_danger() {
        let overall = aggregate([Danger; 5]).unwrap();
        assert_eq!(overall.class, Danger);
        assert_eq!(overall.score, 3.0);
        assert_eq!(overall.text, "고위험");
    }

    #[test]
    fn equal_mix_is_warning() {
        let overall = aggregate([Safe, Warning, Danger, Danger, Warning, Safe]).unwrap();
        assert_eq!(overall.score, 2.0);
        assert_eq!(overall.class, Warning);
        assert_eq!(overall.text, "중간위험");
    }

    #[test]
    fn order_does_not_matter() {
        let a = aggregate([Danger, Safe, Warning, Safe, Safe]).unwrap();
        let b = aggregate([Safe, Safe, Safe, Warning, Danger]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.score, 1.6);
        assert_eq!(a.class, Safe);
    }

    #[test]
    fn cutoffs_are_inclusive() {
        // 9 / 5 = 1.8
        let at_warning = aggregate([Danger, Warning, Warning, Safe, Safe]).unwrap();
        assert_eq!(at_warning.score, 1.8);
        assert_eq!(at_warning.class, Warning);

        // 5 / 2 = 2.5
        let at_danger = aggregate([Danger, Warning]).unwrap();
        assert_eq!(at_danger.score, 2.5);
        assert_eq!(at_danger.class, Danger);
    }

    #[test]
    fn score_is_rounded_to_two_decimals() {
        let overall = aggregate([Safe, Safe, Warning]).unwrap();
        assert_eq!(overall.score, 1.33);
    }

    #[test]
    fn empty_input_has_no_composite() {
        assert!(aggregate(Vec::new()).is_none());
    }
}
