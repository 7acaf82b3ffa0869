//! Metric report for one `(dataset, k)` evaluation.
//!
//! Field names are the stable contract consumed by exporters and
//! visualisation tools. The report owns all of its data; nothing in it
//! borrows from the dataset it describes.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::judge::Verdict;
use crate::metrics::{ClassStatistics, InformationLoss, RiskMetrics, Suppression};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricReport {
    pub k_value: u64,
    pub quasi_identifiers: Vec<String>,
    pub num_records: usize,
    pub satisfies_k_anonymity: bool,
    pub risks: RiskMetrics,
    pub equivalence_class_metrics: ClassStatistics,
    pub information_loss: InformationLoss,
    pub suppression: Suppression,
    pub discernibility_metric: u64,
    /// Size of each record's equivalence class, in record order.
    pub record_k_values: Vec<usize>,
    pub verdict: Verdict,
    pub generated_at: DateTime<Utc>,
}

impl MetricReport {
    /// Serialize the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Headline figures as ordered `(metric, value)` pairs. Percentages are
    /// rendered with two decimals and a trailing `%`.
    pub fn summary_rows(&self) -> Vec<(&'static str, String)> {
        let ec = &self.equivalence_class_metrics;
        vec![
            ("K Value", self.k_value.to_string()),
            (
                "Satisfies K-Anonymity",
                self.satisfies_k_anonymity.to_string(),
            ),
            (
                "Maximum Re-identification Risk",
                format!("{:.2}%", self.risks.max_risk * 100.0),
            ),
            (
                "Average Re-identification Risk",
                format!("{:.2}%", self.risks.avg_risk * 100.0),
            ),
            ("Number of Equivalence Classes", ec.num_classes.to_string()),
            ("Minimum Equivalence Class Size", ec.min_size.to_string()),
            ("Maximum Equivalence Class Size", ec.max_size.to_string()),
            ("Average Equivalence Class Size", format!("{:.2}", ec.avg_size)),
            (
                "Equivalence Class Size Variance",
                format!("{:.2}", ec.size_variance),
            ),
            ("Unique Records", ec.unique_records.to_string()),
            (
                "Unique Records Percentage",
                format!("{:.2}%", ec.unique_records_percentage),
            ),
            (
                "Average Information Loss",
                format!("{:.2}%", self.information_loss.average_loss),
            ),
            (
                "Suppression Rate",
                format!("{:.2}%", self.suppression.percentage),
            ),
            ("Discernibility Metric", self.discernibility_metric.to_string()),
        ]
    }

    /// Render [`summary_rows`](Self::summary_rows) as a two-column CSV with a
    /// `Metric,Value` header.
    pub fn to_csv(&self) -> String {
        let rows = self
            .summary_rows()
            .iter()
            .map(|(metric, value)| format!("{},{}\n", csv_escape(metric), csv_escape(value)))
            .collect::<String>();
        format!("Metric,Value\n{rows}")
    }

    pub fn to_csv_file(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_csv())?;
        Ok(())
    }
}

/// Escape a CSV field value
///
/// Wraps the field in double quotes if it contains commas, double quotes,
/// or newlines. Internal double quotes are escaped by doubling them.
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        let escaped = field.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        field.to_string()
    }
}
