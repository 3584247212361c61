//! Conflict detection across related entities.
//!
//! The reconciler works on states the caller has already computed. When a
//! batch agrees it returns the agreed state; when it does not, it fails with
//! the complete grouping and leaves the resolution policy to the caller.

use crate::error::{RelevanceError, RelevanceResult};
use catsync_types::{ScopeId, TargetId};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Secondary grouping key inside a [`ConflictGroup`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    /// A single unscoped batch.
    Batch,
    Scope(ScopeId),
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Batch => f.write_str("batch"),
            GroupKey::Scope(scope_id) => write!(f, "scope {scope_id}"),
        }
    }
}

/// One row of a conflict: which targets produced `state` under `key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictEntry {
    pub key: GroupKey,
    pub state: bool,
    pub target_ids: Vec<TargetId>,
}

/// Computed state → (grouping key → target ids), for every disagreeing batch.
///
/// Only batches that actually disagree are present, and each of those is
/// present in full.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConflictGroup {
    states: BTreeMap<bool, BTreeMap<GroupKey, Vec<TargetId>>>,
}

impl ConflictGroup {
    fn add_batch(&mut self, key: GroupKey, states: &BTreeMap<TargetId, bool>) {
        for (target_id, state) in states {
            self.states
                .entry(*state)
                .or_default()
                .entry(key.clone())
                .or_default()
                .push(*target_id);
        }
    }

    /// Target ids that computed `state`, across all keys, sorted.
    pub fn target_ids(&self, state: bool) -> Vec<TargetId> {
        let mut ids: Vec<TargetId> = self
            .states
            .get(&state)
            .map(|by_key| by_key.values().flatten().copied().collect())
            .unwrap_or_default();
        ids.sort_unstable();
        ids
    }

    /// Target ids that computed `state` under one key.
    pub fn target_ids_in(&self, state: bool, key: &GroupKey) -> &[TargetId] {
        self.states
            .get(&state)
            .and_then(|by_key| by_key.get(key))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The grouping keys that disagree, sorted.
    pub fn keys(&self) -> Vec<&GroupKey> {
        let mut keys: Vec<&GroupKey> = self.states.values().flat_map(|m| m.keys()).collect();
        keys.sort();
        keys.dedup();
        keys
    }

    /// Number of (key, target) memberships.
    pub fn len(&self) -> usize {
        self.states
            .values()
            .flat_map(|m| m.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Flattened rows, ordered by key then state, for logging or shipping
    /// to a review queue.
    pub fn entries(&self) -> Vec<ConflictEntry> {
        let mut entries: Vec<ConflictEntry> = self
            .states
            .iter()
            .flat_map(|(state, by_key)| {
                by_key.iter().map(|(key, ids)| ConflictEntry {
                    key: key.clone(),
                    state: *state,
                    target_ids: ids.clone(),
                })
            })
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key).then(a.state.cmp(&b.state)));
        entries
    }
}

impl fmt::Display for ConflictGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries().iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            let ids: Vec<String> = entry.target_ids.iter().map(ToString::to_string).collect();
            write!(f, "{} {}=[{}]", entry.key, entry.state, ids.join(", "))?;
        }
        Ok(())
    }
}

/// The agreed state of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub state: bool,
    pub target_ids: Vec<TargetId>,
}

/// Validates that related entities computed the same state.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConflictReconciler;

impl ConflictReconciler {
    pub fn new() -> Self {
        Self
    }

    /// Reconciles one batch of related targets.
    pub fn reconcile(&self, states: &BTreeMap<TargetId, bool>) -> RelevanceResult<Reconciliation> {
        let state = agreed_state(states)?;
        match state {
            Some(state) => Ok(Reconciliation {
                state,
                target_ids: states.keys().copied().collect(),
            }),
            None => {
                let mut group = ConflictGroup::default();
                group.add_batch(GroupKey::Batch, states);
                Err(group.into())
            }
        }
    }

    /// Reconciles each scope's batch independently. Every disagreeing scope
    /// is reported in a single error.
    pub fn reconcile_scoped(
        &self,
        states: &BTreeMap<ScopeId, BTreeMap<TargetId, bool>>,
    ) -> RelevanceResult<BTreeMap<ScopeId, bool>> {
        if states.is_empty() {
            return Err(RelevanceError::EmptyBatch);
        }

        let mut agreed = BTreeMap::new();
        let mut group = ConflictGroup::default();
        for (scope_id, batch) in states {
            match agreed_state(batch)? {
                Some(state) => {
                    agreed.insert(scope_id.clone(), state);
                }
                None => group.add_batch(GroupKey::Scope(scope_id.clone()), batch),
            }
        }

        if group.is_empty() {
            Ok(agreed)
        } else {
            Err(group.into())
        }
    }
}

/// `Some(state)` when every value agrees, `None` on disagreement.
fn agreed_state(states: &BTreeMap<TargetId, bool>) -> RelevanceResult<Option<bool>> {
    let mut values = states.values().copied();
    let first = values.next().ok_or(RelevanceError::EmptyBatch)?;
    Ok(values.all(|v| v == first).then_some(first))
}
