mod common;

use async_trait::async_trait;
use catsync_engine::{
    CriteriaEvaluator, CriteriaRegistry, LookupDeadline, ProviderKind, RelevanceError,
    RelevanceResult, ScopeStateCriterion, SnapshotStateProvider, TenantScopes,
};
use catsync_model::{Entity, EntityType, RecordedCriteriaValues, ScopeSignals, StockItemSignal};
use catsync_types::CalculationMethod;
use common::*;
use std::sync::Arc;

fn stock_criterion(counting: &Arc<CountingCatalog>, concurrency: usize) -> ScopeStateCriterion {
    let provider = Arc::new(SnapshotStateProvider::stock_status(
        counting.clone(),
        LookupDeadline::unbounded(),
        CalculationMethod::StockItem,
    ));
    let scopes = TenantScopes::new(counting.clone(), LookupDeadline::unbounded());
    ScopeStateCriterion::new(provider, scopes, concurrency)
}

fn status_criterion(counting: &Arc<CountingCatalog>) -> ScopeStateCriterion {
    let provider = Arc::new(SnapshotStateProvider::status(
        counting.clone(),
        LookupDeadline::unbounded(),
    ));
    let scopes = TenantScopes::new(counting.clone(), LookupDeadline::unbounded());
    ScopeStateCriterion::new(provider, scopes, 2)
}

fn counting(catalog: Arc<catsync_engine::InMemoryCatalog>) -> Arc<CountingCatalog> {
    Arc::new(CountingCatalog::new(catalog))
}

// ── Identity ─────────────────────────────────────────────────────

#[test]
fn criterion_id_follows_provider_kind() {
    let c = counting(catalog());
    assert_eq!(stock_criterion(&c, 1).criterion_id(), "stock_status");
    assert_eq!(status_criterion(&c).criterion_id(), "status");
    assert_eq!(
        status_criterion(&c).with_id("enabled").criterion_id(),
        "enabled"
    );
}

#[test]
fn applies_to_products_by_default() {
    let c = counting(catalog());
    let criterion = stock_criterion(&c, 1);
    assert!(criterion.applies_to(EntityType::Product));
    assert!(!criterion.applies_to(EntityType::Category));

    let criterion = criterion.for_types(vec![EntityType::Category]);
    assert!(criterion.applies_to(EntityType::Category));
    assert!(!criterion.applies_to(EntityType::Product));
}

// ── Inert without a recorded value ───────────────────────────────

#[tokio::test]
async fn no_recorded_value_returns_false_without_lookups() {
    let c = counting(catalog());
    let criterion = stock_criterion(&c, 4);
    let recorded = RecordedCriteriaValues::new().with("status", true);

    // Entity 1 does not even exist: nothing may be consulted.
    assert!(!criterion.requires_update(&product(1), &recorded).await.unwrap());
    assert_eq!(c.scope_calls(), 0);
    assert_eq!(c.entity_calls(), 0);
}

// ── Exhaustive-scope law ─────────────────────────────────────────

#[tokio::test]
async fn all_scopes_match_returns_false() {
    let inner = catalog();
    inner.upsert(snapshot(1, live()));
    let c = counting(inner);
    let recorded = RecordedCriteriaValues::new().with("stock_status", true);

    assert!(!stock_criterion(&c, 4).requires_update(&product(1), &recorded).await.unwrap());
    assert_eq!(c.scope_calls(), 1);
    assert_eq!(c.entity_calls(), 2);
}

#[tokio::test]
async fn one_scope_diverging_returns_true() {
    let inner = catalog();
    inner.upsert(snapshot(1, live()));
    let c = counting(inner.clone());
    let recorded = RecordedCriteriaValues::new().with("stock_status", true);
    let criterion = stock_criterion(&c, 4);

    assert!(!criterion.requires_update(&product(1), &recorded).await.unwrap());

    inner
        .update(tid(1), |snap| {
            snap.scopes.insert(
                scope_id("fr"),
                ScopeSignals {
                    stock_item: Some(StockItemSignal::out_of_stock()),
                    ..Default::default()
                },
            );
        })
        .unwrap();

    assert!(criterion.requires_update(&product(1), &recorded).await.unwrap());
}

#[tokio::test]
async fn recorded_false_against_live_entity() {
    let inner = catalog();
    inner.upsert(snapshot(1, live()));
    let c = counting(inner);
    let recorded = RecordedCriteriaValues::new().with("status", false);

    assert!(status_criterion(&c).requires_update(&product(1), &recorded).await.unwrap());
}

#[tokio::test]
async fn loosely_typed_recorded_values() {
    let inner = catalog();
    inner.upsert(snapshot(1, live()));
    let c = counting(inner);
    let criterion = status_criterion(&c);

    let as_int = RecordedCriteriaValues::new().with("status", 1);
    assert!(!criterion.requires_update(&product(1), &as_int).await.unwrap());

    let as_text = RecordedCriteriaValues::new().with("status", "1");
    assert!(!criterion.requires_update(&product(1), &as_text).await.unwrap());

    let garbage = RecordedCriteriaValues::new().with("status", "maybe");
    assert!(criterion.requires_update(&product(1), &garbage).await.unwrap());
}

#[tokio::test]
async fn short_circuits_on_first_divergence() {
    let inner = catalog();
    for sid in ["de", "it", "es", "nl"] {
        inner.add_scope(&tenant(), scope_id(sid));
    }
    inner.upsert(snapshot(1, dead()));
    let c = counting(inner);
    let recorded = RecordedCriteriaValues::new().with("stock_status", true);

    assert!(stock_criterion(&c, 1).requires_update(&product(1), &recorded).await.unwrap());
    // Sequential fan-out: the first scope already diverges.
    assert_eq!(c.entity_calls(), 1);
}

#[tokio::test]
async fn zero_concurrency_is_treated_as_one() {
    let inner = catalog();
    inner.upsert(snapshot(1, live()));
    let c = counting(inner);
    let recorded = RecordedCriteriaValues::new().with("stock_status", true);

    assert!(!stock_criterion(&c, 0).requires_update(&product(1), &recorded).await.unwrap());
}

#[tokio::test]
async fn tenant_without_scopes_never_requires_update() {
    let inner = Arc::new(catsync_engine::InMemoryCatalog::new());
    inner.upsert(snapshot(1, dead()));
    let c = counting(inner);
    let recorded = RecordedCriteriaValues::new().with("stock_status", true);

    assert!(!stock_criterion(&c, 2).requires_update(&product(1), &recorded).await.unwrap());
}

#[tokio::test]
async fn variant_divergence_through_parent() {
    let inner = catalog();
    inner.upsert(snapshot(10, live()).with_scope(scope_id("en"), dead()));
    inner.upsert(snapshot(11, live()));
    let c = counting(inner);
    let recorded = RecordedCriteriaValues::new().with("status", true);

    assert!(status_criterion(&c).requires_update(&variant(11, 10), &recorded).await.unwrap());
}

// ── Errors ───────────────────────────────────────────────────────

#[tokio::test]
async fn missing_entity_propagates_unchanged() {
    let c = counting(catalog());
    let recorded = RecordedCriteriaValues::new().with("stock_status", true);

    let err = stock_criterion(&c, 2)
        .requires_update(&product(5), &recorded)
        .await
        .unwrap_err();
    assert!(matches!(err, RelevanceError::NoSuchEntity { target_id } if target_id == tid(5)));
}

// ── Registry ─────────────────────────────────────────────────────

struct FixedCriterion {
    id: &'static str,
    answer: bool,
}

#[async_trait]
impl CriteriaEvaluator for FixedCriterion {
    fn criterion_id(&self) -> &str {
        self.id
    }

    fn applies_to(&self, _entity_type: EntityType) -> bool {
        true
    }

    async fn requires_update(
        &self,
        _entity: &Entity,
        recorded: &RecordedCriteriaValues,
    ) -> RelevanceResult<bool> {
        Ok(recorded.contains(self.id) && self.answer)
    }
}

#[tokio::test]
async fn registry_unknown_criterion() {
    let registry = CriteriaRegistry::new();
    let err = registry
        .evaluate("visibility", &product(1), &RecordedCriteriaValues::new())
        .await
        .unwrap_err();
    assert!(matches!(err, RelevanceError::UnknownCriterion(id) if id == "visibility"));
}

#[tokio::test]
async fn registry_skips_inapplicable_entity_types() {
    let inner = catalog();
    inner.upsert(snapshot(1, dead()));
    let c = counting(inner);
    let registry = CriteriaRegistry::new().with(Arc::new(stock_criterion(&c, 1)));
    let recorded = RecordedCriteriaValues::new().with("stock_status", true);
    let category = product(1).with_type(EntityType::Category);

    assert!(!registry.evaluate("stock_status", &category, &recorded).await.unwrap());
    assert_eq!(c.entity_calls(), 0);
    assert!(registry.evaluate("stock_status", &product(1), &recorded).await.unwrap());
}

#[test]
fn registry_replaces_same_id_in_place() {
    let registry = CriteriaRegistry::new()
        .with(Arc::new(FixedCriterion { id: "a", answer: false }))
        .with(Arc::new(FixedCriterion { id: "b", answer: false }))
        .with(Arc::new(FixedCriterion { id: "a", answer: true }));

    assert_eq!(registry.ids(), vec!["a", "b"]);
    assert_eq!(registry.len(), 2);
    assert!(!registry.is_empty());
}

#[tokio::test]
async fn changed_criteria_in_registration_order() {
    let registry = CriteriaRegistry::new()
        .with(Arc::new(FixedCriterion { id: "z", answer: true }))
        .with(Arc::new(FixedCriterion { id: "m", answer: false }))
        .with(Arc::new(FixedCriterion { id: "a", answer: true }));
    let recorded = RecordedCriteriaValues::new()
        .with("z", true)
        .with("m", true)
        .with("a", true);

    let changed = registry.changed_criteria(&product(1), &recorded).await.unwrap();
    assert_eq!(changed, vec!["z".to_string(), "a".to_string()]);
}

#[tokio::test]
async fn registry_evaluates_built_in_kinds() {
    let inner = catalog();
    inner.upsert(snapshot(1, live()));
    let c = counting(inner);
    let registry = CriteriaRegistry::new()
        .with(Arc::new(status_criterion(&c)))
        .with(Arc::new(stock_criterion(&c, 2)));

    assert_eq!(
        registry.ids(),
        vec![ProviderKind::Status.criterion_id(), ProviderKind::StockStatus.criterion_id()]
    );
    let recorded = RecordedCriteriaValues::new()
        .with("status", true)
        .with("stock_status", false);
    let changed = registry.changed_criteria(&product(1), &recorded).await.unwrap();
    assert_eq!(changed, vec!["stock_status".to_string()]);
}
