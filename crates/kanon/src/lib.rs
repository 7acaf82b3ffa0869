//! Equivalence-class analysis and k-anonymity evaluation for anonymized
//! tabular data.
//!
//! Given a dataset whose quasi-identifying attributes have already been
//! generalized or suppressed, this crate partitions records into equivalence
//! classes, measures re-identification risk, quantifies the information lost
//! to anonymization and judges whether a target threshold `k` is met.
//!
//! # Pipeline
//!
//! ```text
//! Dataset ──► classifier ──► equivalence ──► metrics ──► judge ──► MetricReport
//!             (QI set)       (classes)       (k-free)    (per k)
//! ```
//!
//! Everything up to and including the metric bundle is independent of `k`,
//! so [`Evaluator`] computes it once and shares it across every threshold
//! it is asked about. Only the judge is parameterized by `k`.
//!
//! # Example
//!
//! ```
//! use kanon::{Dataset, EvaluationConfig, Evaluator};
//!
//! let dataset = Dataset::new(
//!     vec!["age".to_string(), "zip".to_string(), "name".to_string()],
//!     vec![
//!         vec!["20-29".into(), "902**".into(), "*".into()],
//!         vec!["20-29".into(), "902**".into(), "*".into()],
//!         vec!["30-39".into(), "902**".into(), "*".into()],
//!         vec!["30-39".into(), "902**".into(), "*".into()],
//!         vec!["30-39".into(), "902**".into(), "*".into()],
//!     ],
//! )
//! .unwrap();
//!
//! let evaluator = Evaluator::new(&dataset, EvaluationConfig::default()).unwrap();
//! let report = evaluator.evaluate(2).unwrap();
//!
//! assert!(report.satisfies_k_anonymity);
//! assert_eq!(report.quasi_identifiers, vec!["age", "zip"]);
//! assert_eq!(report.discernibility_metric, 13);
//! ```

use thiserror::Error;

pub mod classifier;
pub mod dataset;
pub mod equivalence;
pub mod evaluator;
pub mod judge;
pub mod markers;
pub mod metrics;
pub mod report;

pub use classifier::{QuasiIdentifiers, classify, resolve_quasi_identifiers};
pub use dataset::Dataset;
pub use equivalence::{ClassKey, EquivalenceClass, EquivalenceClasses};
pub use evaluator::{EvaluationConfig, Evaluator, KEvaluation, evaluate};
pub use judge::{TargetK, Verdict, judge};
pub use markers::{CellKind, Markers};
pub use metrics::Metrics;
pub use report::MetricReport;

#[derive(Debug, Error)]
pub enum KanonError {
    /// A referenced column is missing, a QI override is malformed, or the
    /// dataset itself is not well formed.
    #[error("Invalid input `{parameter}`: {reason}")]
    InvalidInput { parameter: String, reason: String },

    /// The anonymity threshold is not a positive integer.
    #[error("Invalid parameter `{parameter}` = {value}: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        value: String,
        reason: String,
    },

    /// The dataset has nothing to evaluate.
    #[error("Degenerate input: {reason}")]
    DegenerateInput { reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl KanonError {
    pub(crate) fn invalid_input(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, KanonError>;
