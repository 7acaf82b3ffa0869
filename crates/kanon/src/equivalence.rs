//! Equivalence-class construction.
//!
//! Records are grouped by the tuple of their quasi-identifier values. The
//! key is an owned tuple compared structurally, so no choice of separator
//! can make two distinct tuples collide.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dataset::Dataset;
use crate::{KanonError, Result};

/// Quasi-identifier values of one record, in QI order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassKey(Vec<String>);

impl ClassKey {
    pub fn new(values: Vec<String>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    /// True for the key shared by every record when there are no QIs.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for ClassKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value:?}")?;
        }
        write!(f, ")")
    }
}

/// A group of records sharing one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquivalenceClass {
    pub key: ClassKey,
    /// Record indices in first-seen order.
    pub members: Vec<usize>,
}

impl EquivalenceClass {
    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// Re-identification risk of any member: `1 / size`.
    pub fn risk(&self) -> f64 {
        1.0 / self.members.len() as f64
    }
}

/// The partition of a dataset into equivalence classes.
///
/// Classes are kept in the order their first member appears in the dataset.
/// Every record belongs to exactly one class and the class sizes sum to the
/// record count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquivalenceClasses {
    classes: Vec<EquivalenceClass>,
    index: HashMap<ClassKey, usize>,
    record_class: Vec<usize>,
}

impl EquivalenceClasses {
    /// Partitions `dataset` by the named quasi-identifier columns.
    ///
    /// An empty QI list puts every record into a single class with an empty
    /// key. Runs in O(records × QIs).
    ///
    /// # Errors
    ///
    /// Returns [`KanonError::InvalidInput`] if a name is not a column of the
    /// dataset.
    pub fn build<S: AsRef<str>>(dataset: &Dataset, quasi_identifiers: &[S]) -> Result<Self> {
        let indices = quasi_identifiers
            .iter()
            .map(|name| {
                let name = name.as_ref();
                dataset.column_index(name).ok_or_else(|| {
                    KanonError::invalid_input(
                        "quasi_identifiers",
                        format!("column `{name}` does not exist in the dataset"),
                    )
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut classes: Vec<EquivalenceClass> = Vec::new();
        let mut index: HashMap<ClassKey, usize> = HashMap::new();
        let mut record_class = Vec::with_capacity(dataset.len());

        for (record, row) in dataset.rows().iter().enumerate() {
            let key = ClassKey(indices.iter().map(|&i| row[i].clone()).collect());
            let class = *index.entry(key).or_insert_with_key(|key| {
                classes.push(EquivalenceClass {
                    key: key.clone(),
                    members: Vec::new(),
                });
                classes.len() - 1
            });
            classes[class].members.push(record);
            record_class.push(class);
        }

        debug!(
            records = dataset.len(),
            quasi_identifiers = indices.len(),
            classes = classes.len(),
            "Built equivalence classes"
        );

        Ok(Self {
            classes,
            index,
            record_class,
        })
    }

    /// Classes in first-seen order.
    pub fn classes(&self) -> &[EquivalenceClass] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Number of records partitioned.
    pub fn record_count(&self) -> usize {
        self.record_class.len()
    }

    /// Class sizes in first-seen order.
    pub fn sizes(&self) -> impl Iterator<Item = usize> + Clone + '_ {
        self.classes.iter().map(EquivalenceClass::size)
    }

    /// Key → class size.
    pub fn counts(&self) -> HashMap<&ClassKey, usize> {
        self.classes.iter().map(|c| (&c.key, c.size())).collect()
    }

    /// Key → member record indices, each list in first-seen order.
    pub fn groups(&self) -> HashMap<&ClassKey, &[usize]> {
        self.classes
            .iter()
            .map(|c| (&c.key, c.members.as_slice()))
            .collect()
    }

    pub fn get(&self, key: &ClassKey) -> Option<&EquivalenceClass> {
        self.index.get(key).map(|&i| &self.classes[i])
    }

    /// The class containing `record`, if the index is in range.
    pub fn class_of(&self, record: usize) -> Option<&EquivalenceClass> {
        self.record_class.get(record).map(|&i| &self.classes[i])
    }

    /// The k-value of every record: the size of its equivalence class.
    pub fn record_k_values(&self) -> Vec<usize> {
        self.record_class
            .iter()
            .map(|&i| self.classes[i].size())
            .collect()
    }

    /// Up to `limit` classes ordered by ascending size, ties broken by
    /// first-seen order.
    pub fn smallest(&self, limit: usize) -> Vec<&EquivalenceClass> {
        let mut ordered: Vec<&EquivalenceClass> = self.classes.iter().collect();
        // Stable sort keeps first-seen order among equal sizes.
        ordered.sort_by_key(|c| c.size());
        ordered.truncate(limit);
        ordered
    }
}
