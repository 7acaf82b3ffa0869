//! Metric engine.
//!
//! Pure functions over a dataset and its equivalence classes. None of them
//! depend on `k`, so the whole bundle is computed once per dataset and shared
//! by every threshold evaluated against it.
//!
//! | Metric | Scope |
//! |--------|-------|
//! | [`reidentification_risk`] | equivalence classes |
//! | [`class_statistics`] | equivalence classes |
//! | [`information_loss`] | quasi-identifier columns |
//! | [`suppression_rate`] | every cell of the table |
//! | [`discernibility`] | equivalence classes |

mod distribution;
mod loss;
mod risk;
mod suppression;

pub use distribution::{ClassStatistics, class_statistics, size_variance};
pub use loss::{ColumnLoss, InformationLoss, information_loss};
pub use risk::{RiskMetrics, reidentification_risk};
pub use suppression::{Suppression, suppression_rate};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Result;
use crate::dataset::Dataset;
use crate::equivalence::EquivalenceClasses;
use crate::markers::Markers;

/// Every k-independent metric for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub risk: RiskMetrics,
    pub classes: ClassStatistics,
    pub information_loss: InformationLoss,
    pub suppression: Suppression,
    pub discernibility: u64,
}

impl Metrics {
    /// Computes the full bundle. `classes` must have been built from
    /// `dataset` over `quasi_identifiers`.
    pub fn compute<S: AsRef<str>>(
        dataset: &Dataset,
        quasi_identifiers: &[S],
        classes: &EquivalenceClasses,
        markers: &Markers,
    ) -> Result<Self> {
        debug_assert_eq!(classes.record_count(), dataset.len());

        let metrics = Self {
            risk: reidentification_risk(classes),
            classes: class_statistics(classes),
            information_loss: information_loss(dataset, quasi_identifiers, markers)?,
            suppression: suppression_rate(dataset, markers),
            discernibility: discernibility(classes),
        };

        debug!(
            classes = metrics.classes.num_classes,
            min_class_size = metrics.classes.min_size,
            max_risk = metrics.risk.max_risk,
            average_loss = metrics.information_loss.average_loss,
            discernibility = metrics.discernibility,
            "Computed metrics"
        );

        Ok(metrics)
    }
}

/// Discernibility metric: the sum of squared class sizes. Each record is
/// charged the size of the class it hides in; lower is more private.
pub fn discernibility(classes: &EquivalenceClasses) -> u64 {
    classes
        .sizes()
        .map(|size| {
            let size = size as u64;
            size * size
        })
        .sum()
}
