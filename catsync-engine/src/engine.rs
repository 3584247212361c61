//! The relevance engine: the operations exposed to the sync orchestrator.
//!
//! The engine is stateless between invocations. Collaborators are consulted
//! on every call, and nothing computed here is cached.

use crate::aspect::AspectMapper;
use crate::collaborators::{AspectAssignmentTable, EntityRepository, ScopeResolver};
use crate::config::EngineConfig;
use crate::criteria::{CriteriaEvaluator, CriteriaRegistry, ScopeStateCriterion};
use crate::deadline::LookupDeadline;
use crate::error::RelevanceResult;
use crate::provider::{ProviderKind, SnapshotStateProvider, StateComputationProvider};
use crate::reconciler::{ConflictReconciler, Reconciliation};
use crate::scope::TenantScopes;
use crate::strategy::CalculationStrategyRegistry;
use catsync_model::{Entity, RecordedCriteriaValues, Scope};
use catsync_types::{AspectSet, CalculationMethod, TargetId};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Decides whether catalog changes matter to the search index.
pub struct RelevanceEngine {
    config: EngineConfig,
    method: CalculationMethod,
    scopes: TenantScopes,
    status: Arc<SnapshotStateProvider>,
    stock_status: Arc<SnapshotStateProvider>,
    criteria: CriteriaRegistry,
    aspects: AspectMapper,
    reconciler: ConflictReconciler,
}

impl RelevanceEngine {
    /// Creates an engine with the built-in `status` and `stock_status`
    /// criteria registered.
    pub fn new(
        config: EngineConfig,
        scope_resolver: Arc<dyn ScopeResolver>,
        repository: Arc<dyn EntityRepository>,
        aspect_table: Arc<dyn AspectAssignmentTable>,
    ) -> Self {
        let deadline = LookupDeadline::new(config.lookup_timeout());
        let method = CalculationStrategyRegistry::new().resolve(&config.tenant);
        let scopes = TenantScopes::new(scope_resolver, deadline);

        let status = Arc::new(SnapshotStateProvider::status(repository.clone(), deadline));
        let stock_status = Arc::new(SnapshotStateProvider::stock_status(
            repository, deadline, method,
        ));

        let concurrency = config.effective_concurrency();
        let criteria = CriteriaRegistry::new()
            .with(Arc::new(ScopeStateCriterion::new(
                status.clone(),
                scopes.clone(),
                concurrency,
            )))
            .with(Arc::new(ScopeStateCriterion::new(
                stock_status.clone(),
                scopes.clone(),
                concurrency,
            )));

        debug!(
            "Relevance engine ready: method={}, concurrency={}, criteria={:?}",
            method,
            concurrency,
            criteria.ids()
        );

        Self {
            config,
            method,
            scopes,
            status,
            stock_status,
            criteria,
            aspects: AspectMapper::new(aspect_table),
            reconciler: ConflictReconciler::new(),
        }
    }

    /// Registers an additional criterion (or replaces a built-in one).
    #[must_use]
    pub fn with_criterion(mut self, evaluator: Arc<dyn CriteriaEvaluator>) -> Self {
        self.criteria.register(evaluator);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The resolved stock-status calculation method.
    pub fn calculation_method(&self) -> CalculationMethod {
        self.method
    }

    pub fn criteria(&self) -> &CriteriaRegistry {
        &self.criteria
    }

    /// Scope resolution as used by the built-in criteria, for hosts that
    /// register their own evaluators.
    pub fn tenant_scopes(&self) -> &TenantScopes {
        &self.scopes
    }

    pub fn provider(&self, kind: ProviderKind) -> Arc<dyn StateComputationProvider> {
        match kind {
            ProviderKind::Status => self.status.clone(),
            ProviderKind::StockStatus => self.stock_status.clone(),
        }
    }

    // ── Exposed operations ───────────────────────────────────────

    /// Returns true if `criterion_id`'s current value diverges from the
    /// recorded one in any scope of the entity's tenant.
    pub async fn evaluate_criterion(
        &self,
        criterion_id: &str,
        entity: &Entity,
        recorded: &RecordedCriteriaValues,
    ) -> RelevanceResult<bool> {
        self.criteria.evaluate(criterion_id, entity, recorded).await
    }

    /// Returns every criterion that requires an update, in registration order.
    pub async fn evaluate_all(
        &self,
        entity: &Entity,
        recorded: &RecordedCriteriaValues,
    ) -> RelevanceResult<Vec<String>> {
        self.criteria.changed_criteria(entity, recorded).await
    }

    /// Computes the current derived state of one entity in one scope.
    pub async fn compute_state(
        &self,
        kind: ProviderKind,
        entity: &Entity,
        scope: &Scope,
        parent: Option<&Entity>,
    ) -> RelevanceResult<bool> {
        self.provider(kind).get(entity, scope, parent).await
    }

    pub fn map_changed_attributes_to_aspects<S: AsRef<str>>(
        &self,
        changed_attribute_ids: &[S],
    ) -> AspectSet {
        self.aspects.map(changed_attribute_ids)
    }

    /// Validates an already computed batch of related states.
    pub fn reconcile(&self, states: &BTreeMap<TargetId, bool>) -> RelevanceResult<Reconciliation> {
        self.reconciler.reconcile(states)
    }

    /// Computes `kind` for a parent and its variants in one scope, then
    /// reconciles the batch.
    pub async fn reconcile_related(
        &self,
        kind: ProviderKind,
        parent: &Entity,
        variants: &[Entity],
        scope: &Scope,
    ) -> RelevanceResult<Reconciliation> {
        let provider = self.provider(kind);
        let mut states = BTreeMap::new();
        states.insert(parent.target_id, provider.get(parent, scope, None).await?);
        for variant in variants {
            let state = provider.get(variant, scope, Some(parent)).await?;
            states.insert(variant.target_id, state);
        }
        self.reconciler.reconcile(&states)
    }
}
