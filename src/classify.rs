//! Food Classification

use crate::menu::{FoodType, MenuItem};

/// Pricing category of a menu item.
///
/// Assigned once when an item enters the [`Catalog`](crate::menu::catalog::Catalog); pricing
/// never looks at the raw type, flags or free-text fields again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodClass {
    /// Main dish that carries the portion price when no non-veg curry is chosen.
    Main,

    /// Gravies and sauces. Always free.
    Gravy,

    /// Vegetarian curry, subject to the free quota.
    VegCurry,

    /// Non-veg curry sold by the piece.
    NonVegCurryDivisible,

    /// Non-veg curry sold as a single serving.
    NonVegCurryNondivisible,

    /// Anything else on the menu.
    Other,
}

impl FoodClass {
    /// Whether the item can anchor the portion price.
    pub fn is_non_veg_curry(self) -> bool {
        matches!(
            self,
            FoodClass::NonVegCurryDivisible | FoodClass::NonVegCurryNondivisible
        )
    }

    /// Largest quantity a customer may select, if capped.
    pub fn max_quantity(self) -> Option<u32> {
        match self {
            FoodClass::NonVegCurryNondivisible => Some(1),
            _ => None,
        }
    }
}

/// Classify a menu item.
///
/// The gravy check runs first and wins over the veg flag: a non-veg gravy is still a gravy.
pub fn classify(item: &MenuItem<'_>) -> FoodClass {
    if item.food_type == FoodType::Gravy
        || mentions_gravy(&item.name)
        || item.category.as_deref().is_some_and(mentions_gravy)
    {
        return FoodClass::Gravy;
    }

    match (&item.food_type, item.is_veg, item.is_divisible) {
        (FoodType::MainMeal, _, _) => FoodClass::Main,
        (FoodType::Curry, true, _) => FoodClass::VegCurry,
        (FoodType::Curry, false, true) => FoodClass::NonVegCurryDivisible,
        (FoodType::Curry, false, false) => FoodClass::NonVegCurryNondivisible,
        _ => FoodClass::Other,
    }
}

/// Matches "gravy", "gravies", "sauce" and "sauces" anywhere in the text.
fn mentions_gravy(text: &str) -> bool {
    let text = text.to_lowercase();

    ["gravy", "gravies", "sauce"]
        .iter()
        .any(|needle| text.contains(needle))
}
