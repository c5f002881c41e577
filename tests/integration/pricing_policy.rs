//! Pricing scenarios across configuration sources.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use quote_wizard::config::AppConfig;
use quote_wizard::pricing::{
    compute_quote, PricingTable, FALLBACK_BASE_PRICE, MAX_TABLE_AMOUNT, QUOTE_CEILING,
};
use quote_wizard::types::{Field, SelectionSet};

fn selection(project: &str, pages: &str, design: &str) -> SelectionSet {
    let mut s = SelectionSet::default();
    s.set(Field::ProjectType, project);
    s.set(Field::PageCount, pages);
    s.set(Field::DesignTier, design);
    s
}

#[test]
fn test_documented_scenarios() {
    let table = PricingTable::default();

    let landing = compute_quote(&selection("landing", "5", "basic"), &table);
    assert_eq!((landing.min, landing.total, landing.max), (dec!(450), dec!(500), dec!(550)));

    let shop = compute_quote(&selection("ecommerce", "10", "premium"), &table);
    assert_eq!((shop.min, shop.total, shop.max), (dec!(4050), dec!(4500), dec!(4950)));

    let unknown = compute_quote(&selection("foo", "5", "basic"), &table);
    assert_eq!(unknown.total, FALLBACK_BASE_PRICE);
}

#[test]
fn test_same_policy_from_toml_and_options() {
    let from_toml = AppConfig::parse(
        r#"
        [pricing]
        basePriceLanding = 800
        per_page_rate = 75
        design_multiplier_custom = 2.5
        "#,
    )
    .unwrap()
    .pricing
    .to_table()
    .unwrap();

    let from_options = PricingTable::from_options([
        ("priceLanding", "800"),
        ("perPageRate", "75"),
        ("designMultiplierCustom", "2.5"),
    ]);

    assert_eq!(from_toml, from_options);

    // (800 + 7 × 75) × 2.5 = 3312.5 → 3313
    let q = compute_quote(&selection("landing", "12", "custom"), &from_toml);
    assert_eq!(q.total, dec!(3313));
    assert_eq!(q.min, dec!(2981));
    assert_eq!(q.max, dec!(3644));
}

#[test]
fn test_free_tier_policy() {
    let table = PricingTable::from_options([("designMultiplierBasic", "0")]);
    let q = compute_quote(&selection("custom", "30", "basic"), &table);
    assert_eq!(q.total, Decimal::ZERO);
    assert_eq!(q.min, Decimal::ZERO);
    assert_eq!(q.max, Decimal::ZERO);
}

#[test]
fn test_largest_accepted_policy_stays_bounded() {
    let cfg = AppConfig::parse(
        r#"
        [pricing]
        base_price_landing = 1e12
        base_price_custom = 1e12
        per_page_rate = 1e12
        design_multiplier_custom = 1e12
        "#,
    )
    .unwrap();
    let table = cfg.pricing.to_table().unwrap();
    assert_eq!(table.per_page_rate, MAX_TABLE_AMOUNT);

    // Whole-number prefix of the typed count is what gets priced
    let q = compute_quote(&selection("landing", "7 pages", "basic"), &table);
    assert_eq!(q.total, dec!(3000000000000));

    for pages in ["1", "3.5", "4000000000", "99999999999999999999999"] {
        for design in ["basic", "custom"] {
            let q = compute_quote(&selection("custom", pages, design), &table);
            assert!(q.min <= q.total && q.total <= q.max, "{pages}/{design}: {q}");
            assert!(q.total <= QUOTE_CEILING, "{pages}/{design}: {q}");
        }
    }
}

#[test]
fn test_out_of_range_policy_rejected_or_ignored() {
    assert!(AppConfig::parse("[pricing]\nbase_price_custom = 7e28\n").is_err());

    let table = PricingTable::from_options([("basePriceCustom", "70000000000000000000000000000")]);
    assert_eq!(table, PricingTable::default());
}
