//! Integration test for the bundled thali fixture sets.
//!
//! Menu: `fixtures/menus/thali.yml`, settings: veg curry price ₹60, two free veg curries.
//!
//! `thali` selection (rice, Full portion):
//!
//! 1. Fish Fry is the primary curry: Full ₹400 beats Chicken Curry's Full ₹350.
//!    - Fish x1: ₹400
//! 2. Chicken Curry is a divisible secondary, charged at its extra piece price.
//!    - Chicken x2: 2 × ₹50 = ₹100
//! 3. Dal and Aloo Gobi use the free quota, Paneer is charged the veg curry price.
//!    - Paneer x1: ₹60
//! 4. House Gravy x2 is free, rice is free because a primary curry exists.
//!
//! Expected total: ₹400 + ₹100 + ₹60 = ₹560.00 (56000 paise)
//!
//! `vegetarian` selection (roti, Half portion): no primary, so roti costs its Half
//! price of ₹140. Dal x1 and one Paneer use the quota, the second Paneer costs ₹60,
//! and Cucumber Raita (an extra) costs its base price ₹45. Expected total: ₹245.00.
//!
//! `clamped` selection (rice, Half portion): Mutton x3 and Egg x2 are single servings
//! and are priced as one each. Mutton's Half ₹280 anchors the order, Egg is a
//! non-divisible secondary at the flat ₹60. Expected total: ₹340.00.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::INR};
use testresult::TestResult;

use platter::{
    fixtures::{Fixture, FixtureError},
    menu::FoodId,
    payload::OrderPayload,
    pricing::{MissingChoice, PricingError, PricingWarning, price_order},
    receipt::Receipt,
};

fn minor_lines(order: &platter::pricing::aggregate::PricedOrder<'_>) -> Vec<(String, u32, i64)> {
    order
        .line_items()
        .iter()
        .map(|line| {
            (
                line.food_id().to_string(),
                line.quantity(),
                line.unit_price().to_minor_units(),
            )
        })
        .collect()
}

#[test]
fn thali_set_prices_fish_as_primary() -> TestResult {
    let fixture = Fixture::from_set("thali")?;

    let order = price_order(fixture.catalog()?, fixture.settings()?, fixture.selection()?)?;

    assert_eq!(order.total(), Money::from_minor(56_000, INR));
    assert!(order.reconciles());
    assert!(!order.is_degraded());

    assert_eq!(
        minor_lines(&order),
        vec![
            ("rice".to_string(), 1, 0),
            ("chicken".to_string(), 2, 5_000),
            ("fish".to_string(), 1, 40_000),
            ("dal".to_string(), 1, 0),
            ("aloo".to_string(), 1, 0),
            ("paneer".to_string(), 1, 6_000),
            ("gravy".to_string(), 2, 0),
        ]
    );

    Ok(())
}

#[test]
fn vegetarian_selection_charges_the_main_portion() -> TestResult {
    let mut fixture = Fixture::new();

    fixture
        .load_menu("thali")?
        .load_settings("thali")?
        .load_selection("vegetarian")?;

    let order = price_order(fixture.catalog()?, fixture.settings()?, fixture.selection()?)?;

    assert_eq!(order.total(), Money::from_minor(24_500, INR));
    assert_eq!(
        minor_lines(&order),
        vec![
            ("roti".to_string(), 1, 14_000),
            ("dal".to_string(), 1, 0),
            ("paneer".to_string(), 2, 3_000),
            ("raita".to_string(), 1, 4_500),
        ]
    );

    Ok(())
}

#[test]
fn clamped_selection_is_priced_at_the_cap_with_warnings() -> TestResult {
    let mut fixture = Fixture::new();

    fixture
        .load_menu("thali")?
        .load_settings("thali")?
        .load_selection("clamped")?;

    let order = price_order(fixture.catalog()?, fixture.settings()?, fixture.selection()?)?;

    assert_eq!(order.total(), Money::from_minor(34_000, INR));
    assert!(order.is_degraded());

    let warnings: Vec<_> = order.warnings().iter().cloned().collect();

    assert_eq!(
        warnings,
        vec![
            PricingWarning::QuantityClamped {
                food_id: FoodId::from("mutton"),
                requested: 3,
                priced: 1,
            },
            PricingWarning::QuantityClamped {
                food_id: FoodId::from("egg"),
                requested: 2,
                priced: 1,
            },
        ]
    );

    Ok(())
}

#[test]
fn legacy_settings_price_like_canonical_settings() -> TestResult {
    let canonical = Fixture::from_set("thali")?;
    let mut legacy = Fixture::new();

    legacy
        .load_menu("thali")?
        .load_settings("legacy")?
        .load_selection("thali")?;

    assert_eq!(canonical.settings()?, legacy.settings()?);

    let canonical_order = price_order(
        canonical.catalog()?,
        canonical.settings()?,
        canonical.selection()?,
    )?;
    let legacy_order = price_order(legacy.catalog()?, legacy.settings()?, legacy.selection()?)?;

    assert_eq!(canonical_order, legacy_order);

    Ok(())
}

#[test]
fn incomplete_selection_is_rejected() -> TestResult {
    let mut fixture = Fixture::new();

    fixture
        .load_menu("thali")?
        .load_settings("thali")?
        .load_selection("incomplete")?;

    let result = price_order(fixture.catalog()?, fixture.settings()?, fixture.selection()?);

    assert_eq!(
        result.err(),
        Some(PricingError::IncompleteSelection {
            missing: MissingChoice::Portion
        })
    );

    Ok(())
}

#[test]
fn unknown_fixture_set_is_an_io_error() {
    let result = Fixture::from_set("missing");

    assert!(matches!(result, Err(FixtureError::Io(_))));
}

#[test]
fn thali_payload_round_trips_through_receipt() -> TestResult {
    let fixture = Fixture::from_set("thali")?;

    let order = price_order(fixture.catalog()?, fixture.settings()?, fixture.selection()?)?;
    let payload = OrderPayload::from(&order);

    assert_eq!(payload.total, Decimal::new(56_000, 2));

    let json = serde_json::to_string(&payload)?;
    let stored: OrderPayload = serde_json::from_str(&json)?;
    let receipt = Receipt::from_payload(&stored, INR)?;

    assert_eq!(receipt.total(), order.total());

    let mut out = Vec::new();
    receipt.write_to(&mut out, fixture.catalog()?)?;

    let output = String::from_utf8(out)?;

    assert!(output.contains("Fish Fry"));
    assert!(output.contains("Paneer Butter Masala"));

    Ok(())
}
