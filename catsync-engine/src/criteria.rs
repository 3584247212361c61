//! Criteria evaluators: decide whether an entity needs re-synchronization.
//!
//! Every built-in evaluator has the same shape. It is inert until the ledger
//! holds a recorded value for its criterion, then recomputes the current
//! state in every scope of the tenant and reports `true` on the first scope
//! that diverges.

use crate::error::{RelevanceError, RelevanceResult};
use crate::provider::StateComputationProvider;
use crate::scope::TenantScopes;
use async_trait::async_trait;
use catsync_model::{Entity, EntityType, RecordedCriteriaValues};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::debug;

/// A named axis of change with a stored prior value and a recomputation rule.
#[async_trait]
pub trait CriteriaEvaluator: Send + Sync {
    /// Key of this criterion in [`RecordedCriteriaValues`].
    fn criterion_id(&self) -> &str;

    fn applies_to(&self, entity_type: EntityType) -> bool;

    /// Returns true if the current state differs from the recorded one.
    async fn requires_update(
        &self,
        entity: &Entity,
        recorded: &RecordedCriteriaValues,
    ) -> RelevanceResult<bool>;
}

/// Compares a recorded boolean against per-scope state from a provider.
pub struct ScopeStateCriterion {
    criterion_id: String,
    provider: Arc<dyn StateComputationProvider>,
    scopes: TenantScopes,
    concurrency: usize,
    entity_types: Vec<EntityType>,
}

impl ScopeStateCriterion {
    /// Creates an evaluator keyed by the provider's criterion id, applying
    /// to products.
    pub fn new(
        provider: Arc<dyn StateComputationProvider>,
        scopes: TenantScopes,
        concurrency: usize,
    ) -> Self {
        Self {
            criterion_id: provider.kind().criterion_id().to_string(),
            provider,
            scopes,
            concurrency: concurrency.max(1),
            entity_types: vec![EntityType::Product],
        }
    }

    /// Overrides the criterion id.
    #[must_use]
    pub fn with_id(mut self, criterion_id: impl Into<String>) -> Self {
        self.criterion_id = criterion_id.into();
        self
    }

    /// Overrides the entity types this criterion applies to.
    #[must_use]
    pub fn for_types(mut self, entity_types: Vec<EntityType>) -> Self {
        self.entity_types = entity_types;
        self
    }
}

#[async_trait]
impl CriteriaEvaluator for ScopeStateCriterion {
    fn criterion_id(&self) -> &str {
        &self.criterion_id
    }

    fn applies_to(&self, entity_type: EntityType) -> bool {
        self.entity_types.contains(&entity_type)
    }

    async fn requires_update(
        &self,
        entity: &Entity,
        recorded: &RecordedCriteriaValues,
    ) -> RelevanceResult<bool> {
        let Some(recorded_value) = recorded.get(&self.criterion_id) else {
            return Ok(false);
        };

        let scopes = self.scopes.resolve(&entity.tenant_key).await?;
        let provider = &self.provider;

        // Dropping the stream on return cancels computations still in flight.
        let mut states = stream::iter(scopes)
            .map(|scope| async move {
                let state = provider.get(entity, &scope, None).await;
                (scope, state)
            })
            .buffer_unordered(self.concurrency);

        while let Some((scope, state)) = states.next().await {
            let current = state?;
            if recorded_value.differs_from(current) {
                debug!(
                    "{} of {} diverged in scope {}: recorded {}, current {}",
                    self.criterion_id, entity.target_id, scope.scope_id, recorded_value, current
                );
                return Ok(true);
            }
        }

        Ok(false)
    }
}

/// Ordered set of criteria evaluators, assembled once at startup.
#[derive(Clone, Default)]
pub struct CriteriaRegistry {
    evaluators: Vec<Arc<dyn CriteriaEvaluator>>,
}

impl CriteriaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an evaluator. An evaluator with the same id is replaced in
    /// place, keeping its position.
    pub fn register(&mut self, evaluator: Arc<dyn CriteriaEvaluator>) {
        match self
            .evaluators
            .iter_mut()
            .find(|e| e.criterion_id() == evaluator.criterion_id())
        {
            Some(slot) => *slot = evaluator,
            None => self.evaluators.push(evaluator),
        }
    }

    #[must_use]
    pub fn with(mut self, evaluator: Arc<dyn CriteriaEvaluator>) -> Self {
        self.register(evaluator);
        self
    }

    pub fn get(&self, criterion_id: &str) -> Option<&Arc<dyn CriteriaEvaluator>> {
        self.evaluators
            .iter()
            .find(|e| e.criterion_id() == criterion_id)
    }

    /// Criterion ids in registration order.
    pub fn ids(&self) -> Vec<&str> {
        self.evaluators.iter().map(|e| e.criterion_id()).collect()
    }

    pub fn len(&self) -> usize {
        self.evaluators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evaluators.is_empty()
    }

    /// Evaluates one criterion. A criterion that does not apply to the
    /// entity's type reports `false`.
    pub async fn evaluate(
        &self,
        criterion_id: &str,
        entity: &Entity,
        recorded: &RecordedCriteriaValues,
    ) -> RelevanceResult<bool> {
        let evaluator = self
            .get(criterion_id)
            .ok_or_else(|| RelevanceError::UnknownCriterion(criterion_id.to_string()))?;
        if !evaluator.applies_to(entity.entity_type) {
            debug!(
                "Criterion {} does not apply to {} {}",
                criterion_id, entity.entity_type, entity.target_id
            );
            return Ok(false);
        }
        evaluator.requires_update(entity, recorded).await
    }

    /// Returns the ids of every applicable criterion that requires an
    /// update, in registration order. Stops at the first error.
    pub async fn changed_criteria(
        &self,
        entity: &Entity,
        recorded: &RecordedCriteriaValues,
    ) -> RelevanceResult<Vec<String>> {
        let mut changed = Vec::new();
        for evaluator in &self.evaluators {
            if !evaluator.applies_to(entity.entity_type) {
                continue;
            }
            if evaluator.requires_update(entity, recorded).await? {
                changed.push(evaluator.criterion_id().to_string());
            }
        }
        Ok(changed)
    }
}
