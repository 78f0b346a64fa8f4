//! Line Pricing
//!
//! | Class                        | Role      | Charge                                               |
//! |------------------------------|-----------|------------------------------------------------------|
//! | Main                         |           | 0 with a primary curry, else its portion price       |
//! | Gravy                        |           | 0                                                    |
//! | Veg curry                    |           | veg curry price per unit beyond the free quota       |
//! | Non-veg curry                | primary   | portion price, plus piece price per extra piece      |
//! | Non-veg curry, divisible     | secondary | piece price per unit                                 |
//! | Non-veg curry, non-divisible | secondary | veg curry price per unit                             |
//! | Other                        |           | portion price per unit                               |
//!
//! The piece price is the extra piece price, falling back to the base price.
//! Secondary non-divisible curries take the flat veg curry price rather than
//! their own price.

use crate::{
    classify::FoodClass,
    menu::{MenuItem, PortionName, catalog::CatalogEntry},
    pricing::{PricingError, PricingWarning, SelectedFood, Warnings, quota::VegAllocation},
    settings::StoreSettings,
};

/// Whether a non-veg curry anchors the portion price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Replaces the main dish's portion price
    Primary,

    /// Priced as an add-on
    Secondary,
}

/// Charges individual lines of one order, in minor units.
#[derive(Debug)]
pub struct LinePricer<'p> {
    portion: &'p PortionName,
    veg_curry_price: i64,
    warnings: &'p mut Warnings,
}

impl<'p> LinePricer<'p> {
    /// Create a pricer for the chosen portion.
    pub fn new(
        portion: &'p PortionName,
        settings: &StoreSettings<'_>,
        warnings: &'p mut Warnings,
    ) -> Self {
        Self {
            portion,
            veg_curry_price: settings.veg_curry_price().to_minor_units(),
            warnings,
        }
    }

    /// Charge for the main dish.
    pub fn main(&mut self, main: &CatalogEntry<'_>, has_primary: bool) -> i64 {
        if has_primary {
            return 0;
        }

        self.portion_price(main.item())
    }

    /// Charge for a selected curry, gravy or extra.
    ///
    /// # Errors
    ///
    /// - [`PricingError::MainInCurries`]: the food is a main dish.
    /// - [`PricingError::Overflow`]: the charge does not fit in minor units.
    pub fn food(
        &mut self,
        food: &SelectedFood<'_, '_>,
        role: Role,
        veg: VegAllocation,
    ) -> Result<i64, PricingError> {
        let item = food.entry.item();
        let quantity = i64::from(food.quantity);
        let overflow = || PricingError::Overflow(food.id().clone());

        match (food.class(), role) {
            (FoodClass::Main, _) => Err(PricingError::MainInCurries(food.id().clone())),
            (FoodClass::Gravy, _) => Ok(0),
            (FoodClass::VegCurry, _) => self
                .veg_curry_price
                .checked_mul(i64::from(veg.charged))
                .ok_or_else(overflow),
            (FoodClass::NonVegCurryDivisible, Role::Primary) => {
                let first = self.portion_price(item);
                let extra_pieces = quantity - 1;

                if extra_pieces == 0 {
                    return Ok(first);
                }

                self.piece_price(item)
                    .checked_mul(extra_pieces)
                    .and_then(|extra| extra.checked_add(first))
                    .ok_or_else(overflow)
            }
            (FoodClass::NonVegCurryNondivisible, Role::Primary) => Ok(self.portion_price(item)),
            (FoodClass::NonVegCurryDivisible, Role::Secondary) => self
                .piece_price(item)
                .checked_mul(quantity)
                .ok_or_else(overflow),
            (FoodClass::NonVegCurryNondivisible, Role::Secondary) => self
                .veg_curry_price
                .checked_mul(quantity)
                .ok_or_else(overflow),
            (FoodClass::Other, _) => self
                .portion_price(item)
                .checked_mul(quantity)
                .ok_or_else(overflow),
        }
    }

    fn portion_price(&mut self, item: &MenuItem<'_>) -> i64 {
        if let Some(price) = item.price_for_portion(self.portion) {
            return price.to_minor_units();
        }

        self.warnings.push(PricingWarning::UnresolvedPortionPrice {
            food_id: item.id.clone(),
            portion: self.portion.clone(),
        });

        0
    }

    fn piece_price(&mut self, item: &MenuItem<'_>) -> i64 {
        if let Some(price) = item.piece_price() {
            return price.to_minor_units();
        }

        self.warnings.push(PricingWarning::UnresolvedPiecePrice {
            food_id: item.id.clone(),
        });

        0
    }
}
