//! Information loss over quasi-identifier columns.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::markers::{CellKind, Markers};
use crate::{KanonError, Result};

/// Loss figures for one quasi-identifier column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnLoss {
    pub column: String,
    /// Distinct literal values. Markers and generalized values count as
    /// values of their own; `"902**"` and `"90210"` are two distinct values.
    pub distinct_values: usize,
    pub suppressed_count: usize,
    pub generalized_count: usize,
    pub asterisk_percentage: f64,
    pub generalized_percentage: f64,
    /// `(suppressed + generalized) / total_records * 100`.
    pub total_loss_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InformationLoss {
    /// One entry per quasi-identifier, in QI order.
    pub columns: Vec<ColumnLoss>,
    /// Mean of `total_loss_percentage` across the QI columns; zero when
    /// there are none.
    pub average_loss: f64,
}

impl InformationLoss {
    pub fn column(&self, name: &str) -> Option<&ColumnLoss> {
        self.columns.iter().find(|c| c.column == name)
    }
}

/// Measures how much of each quasi-identifier column was suppressed or
/// generalized. Non-QI columns are not visited.
///
/// With zero records every percentage is zero.
///
/// # Errors
///
/// Returns [`KanonError::InvalidInput`] if a QI is not a column of the
/// dataset.
pub fn information_loss<S: AsRef<str>>(
    dataset: &Dataset,
    quasi_identifiers: &[S],
    markers: &Markers,
) -> Result<InformationLoss> {
    let total = dataset.len();
    let mut columns = Vec::with_capacity(quasi_identifiers.len());

    for name in quasi_identifiers {
        let name = name.as_ref();
        let index = dataset.column_index(name).ok_or_else(|| {
            KanonError::invalid_input(
                "quasi_identifiers",
                format!("column `{name}` does not exist in the dataset"),
            )
        })?;

        let mut distinct = HashSet::new();
        let mut suppressed_count = 0;
        let mut generalized_count = 0;
        for value in dataset.column_values(index) {
            distinct.insert(value);
            match markers.classify(value) {
                CellKind::Suppressed => suppressed_count += 1,
                CellKind::Generalized => generalized_count += 1,
                CellKind::Original => {}
            }
        }

        columns.push(ColumnLoss {
            column: name.to_string(),
            distinct_values: distinct.len(),
            suppressed_count,
            generalized_count,
            asterisk_percentage: percentage(suppressed_count, total),
            generalized_percentage: percentage(generalized_count, total),
            total_loss_percentage: percentage(suppressed_count + generalized_count, total),
        });
    }

    let average_loss = if columns.is_empty() {
        0.0
    } else {
        columns.iter().map(|c| c.total_loss_percentage).sum::<f64>() / columns.len() as f64
    };

    Ok(InformationLoss {
        columns,
        average_loss,
    })
}

pub(crate) fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
