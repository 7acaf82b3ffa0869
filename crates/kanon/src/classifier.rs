//! Quasi-identifier detection.
//!
//! A column is a quasi-identifier unless every one of its cells is the
//! full-suppression token. Fully suppressed columns carry no information
//! about any individual and are dropped from grouping and loss accounting.

use std::collections::HashSet;
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::dataset::Dataset;
use crate::evaluator::EvaluationConfig;
use crate::markers::{CellKind, Markers};
use crate::{KanonError, Result};

/// Ordered set of quasi-identifier column names, in dataset column order
/// when detected automatically, or in the caller's order when overridden.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuasiIdentifiers(Vec<String>);

impl QuasiIdentifiers {
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl Deref for QuasiIdentifiers {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Per-column breakdown of cell kinds, used for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub is_quasi_identifier: bool,
    pub original: usize,
    pub generalized: usize,
    pub suppressed: usize,
}

/// Detects quasi-identifiers by scanning every column.
///
/// Output order follows the dataset's column order. A column with no records
/// is uniformly suppressed by vacuity, so an empty dataset yields no QIs.
pub fn classify(dataset: &Dataset, markers: &Markers) -> QuasiIdentifiers {
    let qis: Vec<String> = dataset
        .columns()
        .iter()
        .enumerate()
        .filter(|(index, _)| {
            dataset
                .column_values(*index)
                .any(|value| !markers.is_suppressed(value))
        })
        .map(|(_, name)| name.clone())
        .collect();

    debug!(
        columns = dataset.column_count(),
        quasi_identifiers = qis.len(),
        "Classified columns"
    );

    QuasiIdentifiers(qis)
}

/// Returns the explicit override from `config` after checking it against the
/// dataset, or falls back to [`classify`].
///
/// # Errors
///
/// Returns [`KanonError::InvalidInput`] if the override is empty, repeats a
/// column, or names a column the dataset does not have.
pub fn resolve_quasi_identifiers(
    dataset: &Dataset,
    config: &EvaluationConfig,
) -> Result<QuasiIdentifiers> {
    let Some(names) = &config.quasi_identifiers else {
        let qis = classify(dataset, &config.markers);
        if qis.is_empty() && dataset.column_count() > 0 {
            warn!(
                columns = dataset.column_count(),
                "Every column is fully suppressed; all records form one equivalence class"
            );
        }
        return Ok(qis);
    };

    if names.is_empty() {
        return Err(KanonError::invalid_input(
            "quasi_identifiers",
            "override list is empty; omit it to detect quasi-identifiers automatically",
        ));
    }

    let mut seen = HashSet::with_capacity(names.len());
    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(KanonError::invalid_input(
                "quasi_identifiers",
                format!("column `{name}` is listed more than once"),
            ));
        }
        if dataset.column_index(name).is_none() {
            return Err(KanonError::invalid_input(
                "quasi_identifiers",
                format!("column `{name}` does not exist in the dataset"),
            ));
        }
    }

    debug!(quasi_identifiers = ?names, "Using explicit quasi-identifier override");
    Ok(QuasiIdentifiers(names.clone()))
}

/// Counts cell kinds per column and flags which columns are quasi-identifiers.
pub fn column_profiles(dataset: &Dataset, markers: &Markers) -> Vec<ColumnProfile> {
    dataset
        .columns()
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let mut profile = ColumnProfile {
                name: name.clone(),
                is_quasi_identifier: false,
                original: 0,
                generalized: 0,
                suppressed: 0,
            };
            for value in dataset.column_values(index) {
                match markers.classify(value) {
                    CellKind::Original => profile.original += 1,
                    CellKind::Generalized => profile.generalized += 1,
                    CellKind::Suppressed => profile.suppressed += 1,
                }
            }
            profile.is_quasi_identifier = profile.suppressed < dataset.len();
            profile
        })
        .collect()
}
