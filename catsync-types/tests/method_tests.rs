use catsync_types::CalculationMethod;

#[test]
fn default_is_stock_item() {
    assert_eq!(CalculationMethod::default(), CalculationMethod::StockItem);
}

#[test]
fn parse_known_methods() {
    for method in CalculationMethod::ALL {
        assert_eq!(CalculationMethod::parse(method.as_str()), Some(method));
    }
    assert_eq!(
        CalculationMethod::parse("  is_salable "),
        Some(CalculationMethod::IsSalable)
    );
}

#[test]
fn parse_unknown_is_none() {
    assert_eq!(CalculationMethod::parse("legacy_mode"), None);
    assert_eq!(CalculationMethod::parse("IS_SALABLE"), None);
}

#[test]
fn serde_uses_snake_case() {
    assert_eq!(
        serde_json::to_string(&CalculationMethod::IsAvailable).unwrap(),
        r#""is_available""#
    );
}
