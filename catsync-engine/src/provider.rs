//! Derived-state providers: enabled/disabled and in-stock/out-of-stock.
//!
//! Both providers share one rule for variants: when the composite parent's
//! state is `false`, the variant's state is `false` regardless of its own
//! signal.

use crate::collaborators::EntityRepository;
use crate::deadline::LookupDeadline;
use crate::error::{RelevanceError, RelevanceResult};
use crate::strategy::CalculationStrategyRegistry;
use async_trait::async_trait;
use catsync_model::{Entity, EntitySnapshot, Scope};
use catsync_types::CalculationMethod;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Which derived state a provider computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Status,
    StockStatus,
}

impl ProviderKind {
    /// The criterion id under which this state is recorded in the ledger.
    pub const fn criterion_id(self) -> &'static str {
        match self {
            ProviderKind::Status => "status",
            ProviderKind::StockStatus => "stock_status",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.criterion_id())
    }
}

/// Computes the canonical boolean state of an entity in one scope.
#[async_trait]
pub trait StateComputationProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Computes the current state.
    ///
    /// `parent` overrides the entity's declared parent; when it is `None`
    /// the declared `target_parent_id` (if any) is used.
    async fn get(
        &self,
        entity: &Entity,
        scope: &Scope,
        parent: Option<&Entity>,
    ) -> RelevanceResult<bool>;
}

/// Provider backed by repository snapshots.
#[derive(Clone)]
pub struct SnapshotStateProvider {
    kind: ProviderKind,
    repository: Arc<dyn EntityRepository>,
    deadline: LookupDeadline,
    strategies: CalculationStrategyRegistry,
    method: CalculationMethod,
}

impl SnapshotStateProvider {
    /// Enabled/disabled provider. Reads the `enabled` signal.
    pub fn status(repository: Arc<dyn EntityRepository>, deadline: LookupDeadline) -> Self {
        Self {
            kind: ProviderKind::Status,
            repository,
            deadline,
            strategies: CalculationStrategyRegistry::new(),
            method: CalculationMethod::default(),
        }
    }

    /// In-stock provider using the given calculation method.
    pub fn stock_status(
        repository: Arc<dyn EntityRepository>,
        deadline: LookupDeadline,
        method: CalculationMethod,
    ) -> Self {
        Self {
            kind: ProviderKind::StockStatus,
            repository,
            deadline,
            strategies: CalculationStrategyRegistry::new(),
            method,
        }
    }

    /// The calculation method used for stock status.
    pub fn method(&self) -> CalculationMethod {
        self.method
    }

    async fn snapshot(&self, entity: &Entity) -> RelevanceResult<EntitySnapshot> {
        self.deadline
            .run("entity lookup", self.repository.get_by_id(entity.target_id))
            .await
    }

    fn own_state(&self, snapshot: &EntitySnapshot, scope: &Scope) -> RelevanceResult<bool> {
        match self.kind {
            ProviderKind::Status => snapshot
                .signals_for(&scope.scope_id)
                .enabled
                .ok_or_else(|| RelevanceError::UnresolvableCalculationInput {
                    target_id: snapshot.target_id,
                    scope_id: scope.scope_id.clone(),
                    signal: "status",
                }),
            ProviderKind::StockStatus => self.strategies.compute(self.method, snapshot, scope),
        }
    }
}

#[async_trait]
impl StateComputationProvider for SnapshotStateProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn get(
        &self,
        entity: &Entity,
        scope: &Scope,
        parent: Option<&Entity>,
    ) -> RelevanceResult<bool> {
        let snapshot = self.snapshot(entity).await?;

        let declared_parent = entity.parent();
        if let Some(parent) = parent.or(declared_parent.as_ref()) {
            let parent_snapshot = self.snapshot(parent).await?;
            if !self.own_state(&parent_snapshot, scope)? {
                debug!(
                    "{} of {} in scope {} forced false by parent {}",
                    self.kind, entity.target_id, scope.scope_id, parent.target_id
                );
                return Ok(false);
            }
        }

        self.own_state(&snapshot, scope)
    }
}
