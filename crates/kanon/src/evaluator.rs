//! Evaluation pipeline.
//!
//! [`Evaluator::new`] runs the k-independent stages once (QI resolution,
//! equivalence classes, metric bundle). [`Evaluator::evaluate`] then only
//! judges a threshold and assembles a report, so any number of `k` values can
//! be checked against the same dataset cheaply, and concurrently: the
//! evaluator is read-only after construction.

use chrono::Utc;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::classifier::{QuasiIdentifiers, resolve_quasi_identifiers};
use crate::dataset::Dataset;
use crate::equivalence::EquivalenceClasses;
use crate::judge::{TargetK, judge_target};
use crate::markers::Markers;
use crate::metrics::Metrics;
use crate::report::MetricReport;
use crate::{KanonError, Result};

/// Settings recognised by the core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Explicit quasi-identifiers. `None` detects them from the data.
    pub quasi_identifiers: Option<Vec<String>>,
    pub markers: Markers,
}

impl EvaluationConfig {
    pub fn with_quasi_identifiers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.quasi_identifiers = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_markers(mut self, markers: Markers) -> Self {
        self.markers = markers;
        self
    }

    /// Checks the markers. The QI override is checked against a dataset in
    /// [`resolve_quasi_identifiers`].
    pub fn validate(&self) -> Result<()> {
        self.markers.validate()
    }
}

/// Result of one threshold in a batch. Each `k` succeeds or fails on its own.
#[derive(Debug)]
pub struct KEvaluation {
    pub k: i64,
    pub outcome: Result<MetricReport>,
}

/// Pipeline state shared across thresholds for one dataset.
#[derive(Debug)]
pub struct Evaluator<'a> {
    dataset: &'a Dataset,
    config: EvaluationConfig,
    quasi_identifiers: QuasiIdentifiers,
    classes: EquivalenceClasses,
    metrics: Metrics,
}

impl<'a> Evaluator<'a> {
    /// Runs every k-independent stage.
    ///
    /// # Errors
    ///
    /// - [`KanonError::InvalidInput`] for bad markers or a bad QI override.
    /// - [`KanonError::DegenerateInput`] if the dataset has no records.
    pub fn new(dataset: &'a Dataset, config: EvaluationConfig) -> Result<Self> {
        config.validate()?;

        if dataset.is_empty() {
            return Err(KanonError::DegenerateInput {
                reason: format!(
                    "dataset has no records ({} columns); there are no equivalence classes to judge",
                    dataset.column_count()
                ),
            });
        }
        if dataset.column_count() == 0 {
            warn!(
                records = dataset.len(),
                "Dataset has no columns; all records form one equivalence class"
            );
        }

        let quasi_identifiers = resolve_quasi_identifiers(dataset, &config)?;
        let classes = EquivalenceClasses::build(dataset, &quasi_identifiers)?;
        let metrics = Metrics::compute(dataset, &quasi_identifiers, &classes, &config.markers)?;

        debug!(
            records = dataset.len(),
            quasi_identifiers = ?&*quasi_identifiers,
            classes = classes.len(),
            "Evaluator ready"
        );

        Ok(Self {
            dataset,
            config,
            quasi_identifiers,
            classes,
            metrics,
        })
    }

    pub fn dataset(&self) -> &Dataset {
        self.dataset
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    pub fn quasi_identifiers(&self) -> &QuasiIdentifiers {
        &self.quasi_identifiers
    }

    pub fn classes(&self) -> &EquivalenceClasses {
        &self.classes
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Judges threshold `k` and assembles the report.
    ///
    /// # Errors
    ///
    /// Returns [`KanonError::InvalidParameter`] if `k` is not positive.
    pub fn evaluate(&self, k: i64) -> Result<MetricReport> {
        let target = TargetK::new(k)?;
        Ok(self.evaluate_target(target))
    }

    /// Infallible form of [`evaluate`](Self::evaluate).
    pub fn evaluate_target(&self, k: TargetK) -> MetricReport {
        let verdict = judge_target(&self.metrics.classes, &self.metrics.risk, k);

        info!(
            k = k.get(),
            records = self.dataset.len(),
            classes = self.metrics.classes.num_classes,
            min_class_size = self.metrics.classes.min_size,
            satisfies = verdict.satisfies,
            "Evaluated k-anonymity"
        );

        MetricReport {
            k_value: k.get(),
            quasi_identifiers: self.quasi_identifiers.to_vec(),
            num_records: self.dataset.len(),
            satisfies_k_anonymity: verdict.satisfies,
            risks: self.metrics.risk.clone(),
            equivalence_class_metrics: self.metrics.classes.clone(),
            information_loss: self.metrics.information_loss.clone(),
            suppression: self.metrics.suppression.clone(),
            discernibility_metric: self.metrics.discernibility,
            record_k_values: self.classes.record_k_values(),
            verdict,
            generated_at: Utc::now(),
        }
    }

    /// Evaluates several thresholds in parallel.
    ///
    /// Results come back in input order. A failing `k` yields an `Err` in its
    /// own slot and never affects the others.
    pub fn evaluate_many(&self, ks: &[i64]) -> Vec<KEvaluation> {
        ks.par_iter()
            .map(|&k| {
                let outcome = self.evaluate(k);
                if let Err(e) = &outcome {
                    warn!(k, error = %e, "Evaluation failed");
                }
                KEvaluation { k, outcome }
            })
            .collect()
    }
}

/// One-shot evaluation of a single threshold.
pub fn evaluate(dataset: &Dataset, config: EvaluationConfig, k: i64) -> Result<MetricReport> {
    // k is checked before any O(n) stage runs.
    let target = TargetK::new(k)?;
    Ok(Evaluator::new(dataset, config)?.evaluate_target(target))
}
