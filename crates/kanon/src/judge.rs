//! K-anonymity verdict.
//!
//! A dataset is k-anonymous when its smallest equivalence class holds at
//! least `k` records. Two advisory flags ride along with the verdict for
//! reporting; neither affects whether the threshold is met.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::metrics::{ClassStatistics, RiskMetrics};
use crate::{KanonError, Result};

/// Risk above which the high-risk advisory is raised.
pub const HIGH_RISK_THRESHOLD: f64 = 0.5;

/// A validated, positive anonymity threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u64")]
pub struct TargetK(u64);

impl TargetK {
    /// # Errors
    ///
    /// Returns [`KanonError::InvalidParameter`] unless `k >= 1`.
    pub fn new(k: i64) -> Result<Self> {
        if k < 1 {
            return Err(KanonError::InvalidParameter {
                parameter: "k",
                value: k.to_string(),
                reason: "k must be a positive integer".to_string(),
            });
        }
        Ok(Self(k as u64))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<i64> for TargetK {
    type Error = KanonError;

    fn try_from(k: i64) -> Result<Self> {
        Self::new(k)
    }
}

impl From<TargetK> for u64 {
    fn from(k: TargetK) -> Self {
        k.0
    }
}

impl FromStr for TargetK {
    type Err = KanonError;

    fn from_str(s: &str) -> Result<Self> {
        let k = s
            .trim()
            .parse::<i64>()
            .map_err(|_| KanonError::InvalidParameter {
                parameter: "k",
                value: s.to_string(),
                reason: "k must be a positive integer".to_string(),
            })?;
        Self::new(k)
    }
}

impl fmt::Display for TargetK {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of judging one threshold against the class statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub k: u64,
    /// `min_class_size >= k`.
    pub satisfies: bool,
    pub min_class_size: usize,
    pub max_risk: f64,
    /// `max_risk > 0.5`, i.e. some class holds a single record.
    pub high_risk: bool,
    pub has_unique_records: bool,
    pub unique_records: usize,
    /// How many records the smallest class is short of `k`; zero when met.
    pub deficit: u64,
}

impl Verdict {
    /// Human-readable advisories for reporting, in a fixed order.
    pub fn advisories(&self) -> Vec<String> {
        let mut advisories = Vec::new();
        if !self.satisfies {
            advisories.push(format!(
                "The dataset does NOT satisfy k-anonymity for k={}: the smallest equivalence class has {} record(s) (should be >= {}).",
                self.k, self.min_class_size, self.k
            ));
        }
        if self.high_risk {
            advisories.push(format!(
                "Maximum re-identification risk is high ({:.2}%).",
                self.max_risk * 100.0
            ));
        }
        if self.has_unique_records {
            advisories.push(format!(
                "There are {} unique record(s) in the dataset.",
                self.unique_records
            ));
        }
        advisories
    }
}

/// Judges whether the class statistics meet threshold `k`. The risk
/// advisory reads `risk.max_risk` as computed by the metric engine.
///
/// # Errors
///
/// Returns [`KanonError::InvalidParameter`] if `k` is not positive.
pub fn judge(stats: &ClassStatistics, risk: &RiskMetrics, k: i64) -> Result<Verdict> {
    Ok(judge_target(stats, risk, TargetK::new(k)?))
}

/// Infallible form of [`judge`] for an already validated threshold.
pub fn judge_target(stats: &ClassStatistics, risk: &RiskMetrics, k: TargetK) -> Verdict {
    let k = k.get();
    let min = stats.min_size as u64;
    let satisfies = min >= k;
    let max_risk = risk.max_risk;

    Verdict {
        k,
        satisfies,
        min_class_size: stats.min_size,
        max_risk,
        high_risk: max_risk > HIGH_RISK_THRESHOLD,
        has_unique_records: stats.unique_records > 0,
        unique_records: stats.unique_records,
        deficit: if satisfies { 0 } else { k - min },
    }
}
