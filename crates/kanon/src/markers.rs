//! Suppression and generalization markers.
//!
//! Anonymization tools write a fixed token into a cell when the value is
//! fully suppressed (`*` by default) and embed a shorter wildcard run into a
//! value that was only partially generalized (`902**`). Both tokens are
//! configurable so the analysis works with schemes that use other markers.

use serde::{Deserialize, Serialize};

use crate::{KanonError, Result};

/// Default full-suppression token.
pub const DEFAULT_FULL_SUPPRESSION: &str = "*";

/// Default partial-generalization substring.
pub const DEFAULT_PARTIAL_GENERALIZATION: &str = "**";

/// How much of the original value survived anonymization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    /// Untouched original data.
    Original,
    /// Coarsened value that still carries some information.
    Generalized,
    /// Replaced entirely by the suppression token.
    Suppressed,
}

/// Marker configuration used to classify cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markers {
    pub full_suppression: String,
    pub partial_generalization: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            full_suppression: DEFAULT_FULL_SUPPRESSION.to_string(),
            partial_generalization: DEFAULT_PARTIAL_GENERALIZATION.to_string(),
        }
    }
}

impl Markers {
    pub fn new(
        full_suppression: impl Into<String>,
        partial_generalization: impl Into<String>,
    ) -> Result<Self> {
        let markers = Self {
            full_suppression: full_suppression.into(),
            partial_generalization: partial_generalization.into(),
        };
        markers.validate()?;
        Ok(markers)
    }

    /// Rejects marker pairs that would make classification ambiguous.
    pub fn validate(&self) -> Result<()> {
        if self.full_suppression.is_empty() {
            return Err(KanonError::invalid_input(
                "full_suppression_marker",
                "marker must not be empty",
            ));
        }
        if self.partial_generalization.is_empty() {
            // An empty substring is contained in every value.
            return Err(KanonError::invalid_input(
                "partial_generalization_marker",
                "marker must not be empty",
            ));
        }
        if self.full_suppression == self.partial_generalization {
            return Err(KanonError::invalid_input(
                "partial_generalization_marker",
                format!(
                    "marker {:?} is identical to the full-suppression marker",
                    self.partial_generalization
                ),
            ));
        }
        Ok(())
    }

    /// Returns true if the cell equals the full-suppression token.
    #[inline]
    pub fn is_suppressed(&self, value: &str) -> bool {
        value == self.full_suppression
    }

    /// Classifies a single cell. Suppression takes precedence: a cell equal
    /// to the suppression token is never counted as generalized, even when
    /// the token happens to contain the generalization substring.
    pub fn classify(&self, value: &str) -> CellKind {
        if self.is_suppressed(value) {
            CellKind::Suppressed
        } else if value.contains(self.partial_generalization.as_str()) {
            CellKind::Generalized
        } else {
            CellKind::Original
        }
    }
}
