//! Threshold classification of a single indicator value.

use crate::domain::{IndicatorConfig, RiskClass};

/// Classify `value` against the thresholds in `config`.
///
/// With `reverse = true` higher values are worse:
/// `value >= danger_high` is danger, `value >= midpoint` is warning.
/// Otherwise lower values are worse:
/// `value <= danger_low` is danger, `value <= midpoint` is warning.
///
/// Boundaries are inclusive toward the worse class. A NaN value is classified
/// as danger so a broken number never shows up as safe.
pub fn classify(value: f64, config: &IndicatorConfig) -> RiskClass {
    if value.is_nan() {
        return RiskClass::Danger;
    }

    let mid = config.midpoint();
    if config.reverse {
        if value >= config.danger_high {
            RiskClass::Danger
        } else if value >= mid {
            RiskClass::Warning
        } else {
            RiskClass::Safe
        }
    } else if value <= config.danger_low {
        RiskClass::Danger
    } else if value <= mid {
        RiskClass::Warning
    } else {
        RiskClass::Safe
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Catalog, IndicatorKey};

    fn config(danger_low: f64, danger_high: f64, reverse: bool) -> IndicatorConfig {
        IndicatorConfig {
            name: "test".to_string(),
            unit: "%".to_string(),
            min: danger_low - 10.0,
            max: danger_high + 10.0,
            danger_low,
            danger_high,
            reverse,
            description: String::new(),
        }
    }

    #[test]
    fn exchange_rate_fallback_is_danger() {
        let cfg = config(1250.0, 1400.0, true);
        assert_eq!(cfg.midpoint(), 1325.0);
        assert_eq!(classify(1450.0, &cfg), RiskClass::Danger);
    }

    #[test]
    fn reserve_ratio_between_low_and_mid_is_warning() {
        let cfg = config(20.0, 30.0, false);
        assert_eq!(classify(24.4, &cfg), RiskClass::Warning);
    }

    #[test]
    fn thresholds_are_inclusive_toward_worse_class() {
        let higher_worse = config(2.0, 3.5, true);
        assert_eq!(classify(3.5, &higher_worse), RiskClass::Danger);
        assert_eq!(classify(2.75, &higher_worse), RiskClass::Warning);
        assert_eq!(classify(2.7499, &higher_worse), RiskClass::Safe);

        let lower_worse = config(-1.0, 0.5, false);
        assert_eq!(classify(-1.0, &lower_worse), RiskClass::Danger);
        assert_eq!(classify(-0.25, &lower_worse), RiskClass::Warning);
        assert_eq!(classify(-0.2499, &lower_worse), RiskClass::Safe);
    }

    #[test]
    fn nan_is_danger() {
        assert_eq!(classify(f64::NAN, &config(0.0, 1.0, true)), RiskClass::Danger);
        assert_eq!(classify(f64::NAN, &config(0.0, 1.0, false)), RiskClass::Danger);
    }

    #[test]
    fn classification_is_monotonic_for_every_catalog_entry() {
        let catalog = Catalog::standard();
        for key in IndicatorKey::ALL {
            let cfg = catalog.config(key).unwrap();
            let span = cfg.max - cfg.min;
            let steps = 400;

            // Walk from best to worst; the class must never improve.
            let mut prev = RiskClass::Safe;
            for i in 0..=steps {
                let u = i as f64 / steps as f64;
                let value = if cfg.reverse {
                    cfg.min - span + u * 3.0 * span
                } else {
                    cfg.max + span - u * 3.0 * span
                };
                let class = classify(value, cfg);
                assert!(class >= prev, "{key}: {value} went from {prev:?} to {class:?}");
                prev = class;
            }
            assert_eq!(prev, RiskClass::Danger, "{key}");
        }
    }
}
