use catsync_types::RecordedValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Criterion id → value stored at the last synchronization.
///
/// Owned by the external sync ledger and handed to the engine read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordedCriteriaValues(BTreeMap<String, RecordedValue>);

impl RecordedCriteriaValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a recorded value, builder style.
    #[must_use]
    pub fn with(mut self, criterion_id: impl Into<String>, value: impl Into<RecordedValue>) -> Self {
        self.0.insert(criterion_id.into(), value.into());
        self
    }

    /// Returns the recorded value for a criterion, if any.
    pub fn get(&self, criterion_id: &str) -> Option<&RecordedValue> {
        self.0.get(criterion_id)
    }

    pub fn contains(&self, criterion_id: &str) -> bool {
        self.0.contains_key(criterion_id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RecordedValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<RecordedValue>> FromIterator<(K, V)> for RecordedCriteriaValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
