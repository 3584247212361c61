use serde::{Deserialize, Serialize};
use std::fmt;

/// Which underlying signal the stock-status calculation trusts.
///
/// The set is closed. Adding a method means adding a variant here and a
/// strategy function in the engine's registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMethod {
    /// The raw stock-item record (`is_in_stock`, `manage_stock`).
    #[default]
    StockItem,
    /// The stock registry abstraction's status.
    StockRegistry,
    /// The "is available for purchase" flag.
    IsAvailable,
    /// The "is salable" flag, which may already fold in reservations.
    IsSalable,
}

impl CalculationMethod {
    /// Every method, default first.
    pub const ALL: [CalculationMethod; 4] = [
        CalculationMethod::StockItem,
        CalculationMethod::StockRegistry,
        CalculationMethod::IsAvailable,
        CalculationMethod::IsSalable,
    ];

    /// Returns the configuration identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CalculationMethod::StockItem => "stock_item",
            CalculationMethod::StockRegistry => "stock_registry",
            CalculationMethod::IsAvailable => "is_available",
            CalculationMethod::IsSalable => "is_salable",
        }
    }

    /// Parses a configuration identifier exactly. Returns `None` for
    /// anything unrecognized; callers decide how to fall back.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|m| m.as_str() == value)
    }
}

impl fmt::Display for CalculationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
