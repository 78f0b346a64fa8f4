//! Menu Fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{self, Currency, EUR, GBP, INR, USD},
};
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    menu::{FoodId, FoodType, MenuItem, PortionName},
};

/// Wrapper for a menu in YAML
#[derive(Debug, Deserialize)]
pub struct MenuFixture {
    /// Currency code every price must use (e.g., "INR")
    pub currency: String,

    /// Map of food id -> menu item fixture
    pub items: FxHashMap<String, MenuItemFixture>,
}

/// Menu Item Fixture
#[derive(Debug, Deserialize)]
pub struct MenuItemFixture {
    /// Display name
    pub name: String,

    /// Raw food type ("main_meal", "curry", "gravy", ...)
    #[serde(rename = "type")]
    pub food_type: String,

    /// Free-text category
    #[serde(default)]
    pub category: Option<String>,

    /// Vegetarian flag
    #[serde(default)]
    pub veg: bool,

    /// Sold by the piece
    #[serde(default)]
    pub divisible: bool,

    /// Base price (e.g., "300.00 INR")
    #[serde(default)]
    pub base_price: Option<String>,

    /// Extra piece price
    #[serde(default)]
    pub extra_piece_price: Option<String>,

    /// Portion name -> price
    #[serde(default)]
    pub portions: FxHashMap<String, String>,
}

impl MenuItemFixture {
    /// Convert into a [`MenuItem`] with the given id.
    ///
    /// # Errors
    ///
    /// Returns an error if any price cannot be parsed.
    pub fn try_into_item(self, id: String) -> Result<MenuItem<'static>, FixtureError> {
        let portion_prices = self
            .portions
            .iter()
            .map(|(portion, price)| Ok((PortionName::new(portion.as_str()), parse_money(price)?)))
            .collect::<Result<_, FixtureError>>()?;

        Ok(MenuItem {
            id: FoodId::new(id),
            name: self.name,
            category: self.category,
            food_type: FoodType::parse(&self.food_type),
            is_veg: self.veg,
            is_divisible: self.divisible,
            base_price: self.base_price.as_deref().map(parse_money).transpose()?,
            extra_piece_price: self
                .extra_piece_price
                .as_deref()
                .map(parse_money)
                .transpose()?,
            portion_prices,
        })
    }
}

/// Parse price string (e.g., "2.99 GBP") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal or is negative, or if the
/// currency code is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    if amount < Decimal::ZERO {
        return Err(FixtureError::InvalidPrice(format!("Negative price: {s}")));
    }

    let currency = parse_currency(currency_code)?;
    let scale = Decimal::from(10_i64.pow(currency.exponent));

    let minor_units = amount
        .checked_mul(scale)
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}

/// Parse a price string straight into [`Money`].
///
/// # Errors
///
/// See [`parse_price`].
pub fn parse_money(s: &str) -> Result<Money<'static, Currency>, FixtureError> {
    let (minor_units, currency) = parse_price(s)?;

    Ok(Money::from_minor(minor_units, currency))
}

/// Resolve a supported currency code.
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] for codes outside GBP, USD, EUR and INR.
pub fn parse_currency(code: &str) -> Result<&'static iso::Currency, FixtureError> {
    match code.trim() {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        "INR" => Ok(INR),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}
