//! Table-wide suppression rate.

use serde::{Deserialize, Serialize};

use super::loss::percentage;
use crate::dataset::Dataset;
use crate::markers::Markers;

/// Share of all cells, in every column, equal to the suppression token.
///
/// Unlike [`InformationLoss`](super::InformationLoss) this is not limited to
/// quasi-identifiers: fully suppressed direct identifiers count too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suppression {
    pub suppressed_cells: usize,
    pub total_cells: usize,
    /// `suppressed_cells / total_cells`, in `[0, 1]`.
    pub ratio: f64,
    /// `ratio * 100`.
    pub percentage: f64,
}

/// Counts suppressed cells across the whole table. An empty table has a
/// rate of zero.
pub fn suppression_rate(dataset: &Dataset, markers: &Markers) -> Suppression {
    let suppressed_cells = dataset
        .rows()
        .iter()
        .flatten()
        .filter(|cell| markers.is_suppressed(cell))
        .count();
    let total_cells = dataset.cell_count();

    Suppression {
        suppressed_cells,
        total_cells,
        ratio: percentage(suppressed_cells, total_cells) / 100.0,
        percentage: percentage(suppressed_cells, total_cells),
    }
}
