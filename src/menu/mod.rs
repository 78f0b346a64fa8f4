//! Menu

use std::fmt;

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

pub mod catalog;

/// Identifier of a menu item as known to the merchant catalog and the order API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoodId(String);

impl FoodId {
    /// Create a new food id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FoodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FoodId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for FoodId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Merchant-defined size tier, e.g. "Full" or "Half".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortionName(String);

impl PortionName {
    /// Create a new portion name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the raw portion name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PortionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PortionName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for PortionName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Declared type of a menu item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FoodType {
    /// A main dish (rice, bread, ...) that anchors the meal.
    MainMeal,

    /// A curry, vegetarian or not.
    Curry,

    /// A gravy or sauce served with the meal.
    Gravy,

    /// Anything the catalog declares with an unrecognised type.
    Other(String),
}

impl FoodType {
    /// Parse the raw type string stored by the catalog.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "main_meal" | "main" => FoodType::MainMeal,
            "curry" => FoodType::Curry,
            "gravy" => FoodType::Gravy,
            _ => FoodType::Other(raw.trim().to_string()),
        }
    }
}

impl From<&str> for FoodType {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

/// A single dish offered by the merchant.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem<'a> {
    /// Catalog identifier
    pub id: FoodId,

    /// Display name
    pub name: String,

    /// Free-text category, if the merchant set one
    pub category: Option<String>,

    /// Declared food type
    pub food_type: FoodType,

    /// Vegetarian flag
    pub is_veg: bool,

    /// Sold by the piece, so quantities above one are meaningful
    pub is_divisible: bool,

    /// Fallback price when no portion-specific price exists
    pub base_price: Option<Money<'a, Currency>>,

    /// Price of each piece beyond the first
    pub extra_piece_price: Option<Money<'a, Currency>>,

    /// Prices keyed by portion
    pub portion_prices: FxHashMap<PortionName, Money<'a, Currency>>,
}

impl<'a> MenuItem<'a> {
    /// Create a non-vegetarian, non-divisible item with a base price and no portion prices.
    pub fn new(
        id: impl Into<FoodId>,
        name: impl Into<String>,
        food_type: FoodType,
        base_price: Money<'a, Currency>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: None,
            food_type,
            is_veg: false,
            is_divisible: false,
            base_price: Some(base_price),
            extra_piece_price: None,
            portion_prices: FxHashMap::default(),
        }
    }

    /// Set the vegetarian flag.
    #[must_use]
    pub fn veg(mut self, is_veg: bool) -> Self {
        self.is_veg = is_veg;
        self
    }

    /// Set the divisible flag.
    #[must_use]
    pub fn divisible(mut self, is_divisible: bool) -> Self {
        self.is_divisible = is_divisible;
        self
    }

    /// Set the free-text category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the extra piece price.
    #[must_use]
    pub fn with_extra_piece_price(mut self, price: Money<'a, Currency>) -> Self {
        self.extra_piece_price = Some(price);
        self
    }

    /// Add or replace the price for a portion.
    #[must_use]
    pub fn with_portion_price(
        mut self,
        portion: impl Into<PortionName>,
        price: Money<'a, Currency>,
    ) -> Self {
        self.portion_prices.insert(portion.into(), price);
        self
    }

    /// Drop the base price.
    #[must_use]
    pub fn without_base_price(mut self) -> Self {
        self.base_price = None;
        self
    }

    /// Price at the given portion, falling back to the base price.
    pub fn price_for_portion(&self, portion: &PortionName) -> Option<Money<'a, Currency>> {
        self.portion_prices
            .get(portion)
            .copied()
            .or(self.base_price)
    }

    /// Price of each piece beyond the first, falling back to the base price.
    pub fn piece_price(&self) -> Option<Money<'a, Currency>> {
        self.extra_piece_price.or(self.base_price)
    }

    /// Iterate over every price configured on the item.
    pub fn prices(&self) -> impl Iterator<Item = &Money<'a, Currency>> {
        self.base_price
            .iter()
            .chain(self.extra_piece_price.iter())
            .chain(self.portion_prices.values())
    }
}
