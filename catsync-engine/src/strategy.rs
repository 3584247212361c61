//! Stock-status calculation strategies.
//!
//! Each [`CalculationMethod`] maps to one pure function over the resolved
//! scope signals. The table is closed: adding a method means adding a
//! variant and an arm in `strategy`.

use crate::config::TenantConfig;
use crate::error::{RelevanceError, RelevanceResult};
use catsync_model::{EntitySnapshot, Scope, ScopeSignals};
use catsync_types::CalculationMethod;
use tracing::warn;

/// A strategy reads one signal and yields `None` when it is absent.
type StrategyFn = fn(&ScopeSignals) -> Option<bool>;

#[derive(Clone, Copy)]
struct Strategy {
    signal: &'static str,
    compute: StrategyFn,
}

fn strategy(method: CalculationMethod) -> Strategy {
    let (signal, compute): (&'static str, StrategyFn) = match method {
        CalculationMethod::StockItem => ("stock_item", stock_item),
        CalculationMethod::StockRegistry => ("stock_registry", stock_registry),
        CalculationMethod::IsAvailable => ("is_available", is_available),
        CalculationMethod::IsSalable => ("is_salable", is_salable),
    };
    Strategy { signal, compute }
}

fn stock_item(signals: &ScopeSignals) -> Option<bool> {
    signals
        .stock_item
        .map(|item| !item.manage_stock || item.is_in_stock)
}

fn stock_registry(signals: &ScopeSignals) -> Option<bool> {
    signals.stock_registry_in_stock
}

fn is_available(signals: &ScopeSignals) -> Option<bool> {
    signals.is_available
}

fn is_salable(signals: &ScopeSignals) -> Option<bool> {
    signals.is_salable
}

/// Resolves the active calculation method and runs it.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalculationStrategyRegistry;

impl CalculationStrategyRegistry {
    pub fn new() -> Self {
        Self
    }

    /// Resolves the tenant's method. Missing or unrecognized identifiers
    /// resolve to `stock_item`; configuration may be stale and must not
    /// break indexing.
    pub fn resolve(&self, config: &TenantConfig) -> CalculationMethod {
        match config.calculation_method.as_deref() {
            None => CalculationMethod::default(),
            Some(raw) => CalculationMethod::parse(raw).unwrap_or_else(|| {
                warn!(
                    "Unknown stock calculation method {:?}, using {}",
                    raw,
                    CalculationMethod::default()
                );
                CalculationMethod::default()
            }),
        }
    }

    /// Returns the signal name a method reads.
    pub fn signal_for(&self, method: CalculationMethod) -> &'static str {
        strategy(method).signal
    }

    /// Computes the in-stock state of an entity in one scope with `method`.
    /// Pure: reads the snapshot only.
    pub fn compute(
        &self,
        method: CalculationMethod,
        snapshot: &EntitySnapshot,
        scope: &Scope,
    ) -> RelevanceResult<bool> {
        let strategy = strategy(method);
        let signals = snapshot.signals_for(&scope.scope_id);
        (strategy.compute)(&signals).ok_or_else(|| RelevanceError::UnresolvableCalculationInput {
            target_id: snapshot.target_id,
            scope_id: scope.scope_id.clone(),
            signal: strategy.signal,
        })
    }
}
