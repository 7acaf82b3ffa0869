//! Equivalence-class size statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::equivalence::EquivalenceClasses;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassStatistics {
    pub total_records: usize,
    pub num_classes: usize,
    pub min_size: usize,
    pub max_size: usize,
    /// `total_records / num_classes`.
    pub avg_size: f64,
    /// Population variance of the class-size multiset.
    pub size_variance: f64,
    /// Number of classes holding exactly one record.
    pub unique_records: usize,
    /// `unique_records / total_records * 100`.
    pub unique_records_percentage: f64,
    /// Class size → number of classes with that size.
    pub size_distribution: BTreeMap<usize, usize>,
}

/// Summarizes the class-size multiset.
///
/// With zero records there are zero classes and every statistic is zero;
/// no division is attempted.
pub fn class_statistics(classes: &EquivalenceClasses) -> ClassStatistics {
    let total_records = classes.record_count();
    let num_classes = classes.len();

    let mut size_distribution = BTreeMap::new();
    for size in classes.sizes() {
        *size_distribution.entry(size).or_insert(0) += 1;
    }

    if num_classes == 0 || total_records == 0 {
        return ClassStatistics {
            total_records,
            num_classes,
            min_size: 0,
            max_size: 0,
            avg_size: 0.0,
            size_variance: 0.0,
            unique_records: 0,
            unique_records_percentage: 0.0,
            size_distribution,
        };
    }

    let min_size = classes.sizes().min().unwrap_or(0);
    let max_size = classes.sizes().max().unwrap_or(0);
    let avg_size = total_records as f64 / num_classes as f64;
    let unique_records = size_distribution.get(&1).copied().unwrap_or(0);

    ClassStatistics {
        total_records,
        num_classes,
        min_size,
        max_size,
        avg_size,
        size_variance: size_variance(classes.sizes()),
        unique_records,
        unique_records_percentage: unique_records as f64 / total_records as f64 * 100.0,
        size_distribution,
    }
}

/// Population variance (divides by n, not n - 1). Zero for an empty input.
pub fn size_variance(sizes: impl Iterator<Item = usize> + Clone) -> f64 {
    let n = sizes.clone().count();
    if n == 0 {
        return 0.0;
    }
    let mean = sizes.clone().sum::<usize>() as f64 / n as f64;
    sizes
        .map(|s| {
            let d = s as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n as f64
}
