//! Re-identification risk.

use serde::{Deserialize, Serialize};

use crate::equivalence::EquivalenceClasses;

/// Prosecutor-style risk per equivalence class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    /// Highest class risk; 1.0 means some record is unique.
    pub max_risk: f64,
    /// Unweighted mean of class risks. Each class counts once regardless of
    /// how many records it holds, so this is risk-per-class, not
    /// risk-per-record.
    pub avg_risk: f64,
    /// `1 / size` for every class, in first-seen class order.
    pub risks: Vec<f64>,
}

/// Computes `1 / size` for every class along with the max and unweighted
/// mean. With no classes every figure is zero.
pub fn reidentification_risk(classes: &EquivalenceClasses) -> RiskMetrics {
    let risks: Vec<f64> = classes.classes().iter().map(|c| c.risk()).collect();

    if risks.is_empty() {
        return RiskMetrics {
            max_risk: 0.0,
            avg_risk: 0.0,
            risks,
        };
    }

    let max_risk = risks.iter().copied().fold(f64::MIN, f64::max);
    let avg_risk = risks.iter().sum::<f64>() / risks.len() as f64;

    RiskMetrics {
        max_risk,
        avg_risk,
        risks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    fn classes_for(values: &[&str]) -> EquivalenceClasses {
        let data = Dataset::new(
            vec!["qi".to_string()],
            values.iter().map(|v| vec![(*v).to_string()]).collect(),
        )
        .unwrap();
        EquivalenceClasses::build(&data, &["qi"]).unwrap()
    }

    #[test]
    fn risk_is_inverse_class_size() {
        let risk = reidentification_risk(&classes_for(&["a", "a", "b", "b", "b"]));
        assert_eq!(risk.risks.len(), 2);
        assert!((risk.risks[0] - 0.5).abs() < 1e-12);
        assert!((risk.risks[1] - 1.0 / 3.0).abs() < 1e-12);
        assert!((risk.max_risk - 0.5).abs() < 1e-12);
    }

    #[test]
    fn average_is_unweighted_over_classes() {
        // Record-weighted mean would be (1 + 4 * 0.25) / 5 = 0.4.
        let risk = reidentification_risk(&classes_for(&["u", "g", "g", "g", "g"]));
        assert!((risk.avg_risk - (1.0 + 0.25) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn unique_record_has_risk_one() {
        let risk = reidentification_risk(&classes_for(&["a", "b", "c"]));
        assert!((risk.max_risk - 1.0).abs() < f64::EPSILON);
        assert!((risk.avg_risk - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn no_classes_is_zero_risk() {
        let risk = reidentification_risk(&classes_for(&[]));
        assert!(risk.risks.is_empty());
        assert!(risk.max_risk.abs() < f64::EPSILON);
        assert!(risk.avg_risk.abs() < f64::EPSILON);
    }
}
