//! Pricing
//!
//! Turns a catalog snapshot, store settings and a customer [`Selection`] into a
//! [`PricedOrder`]. The pipeline runs leaf-first:
//!
//! 1. resolve every selected food against the catalog (classes were assigned on load),
//! 2. pick the primary non-veg curry ([`primary`]),
//! 3. spread the free veg curry quota ([`quota`]),
//! 4. charge each line ([`lines`]),
//! 5. total the charges and derive persisted unit prices ([`aggregate`]).
//!
//! Everything is pure: the same inputs always give the same order.

use std::fmt;

use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    classify::FoodClass,
    menu::{FoodId, PortionName, catalog::Catalog, catalog::CatalogEntry},
    pricing::{
        aggregate::{PricedOrder, aggregate},
        lines::{LinePricer, Role},
        primary::select_primary,
        quota::allocate_veg_quota,
    },
    selection::Selection,
    settings::StoreSettings,
};

pub mod aggregate;
pub mod lines;
pub mod primary;
pub mod quota;

/// Part of a selection that must be chosen before pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingChoice {
    /// No main dish chosen
    Main,

    /// No portion chosen
    Portion,
}

impl fmt::Display for MissingChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingChoice::Main => f.write_str("main dish"),
            MissingChoice::Portion => f.write_str("portion"),
        }
    }
}

/// Errors that stop an order from being priced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// The selection lacks a main dish or a portion.
    #[error("Incomplete selection: no {missing} chosen")]
    IncompleteSelection {
        /// What is missing
        missing: MissingChoice,
    },

    /// A selected food is not in the catalog.
    #[error("Unknown menu item: {0}")]
    UnknownItem(FoodId),

    /// The chosen main dish is not classified as a main.
    #[error("Menu item {0} is not a main dish")]
    NotAMain(FoodId),

    /// A main dish was selected as a curry or extra.
    #[error("Main dish {0} cannot be selected as a curry")]
    MainInCurries(FoodId),

    /// Settings and catalog are priced in different currencies (settings, catalog).
    #[error("Settings have currency {0}, but catalog has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// A charge does not fit in minor units.
    #[error("Price overflow while charging {0}")]
    Overflow(FoodId),
}

/// Something the engine priced around instead of failing on.
///
/// Carried on the [`PricedOrder`] so callers can refuse to submit a degraded order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingWarning {
    /// No price for the portion and no base price; charged as zero.
    UnresolvedPortionPrice {
        /// Affected food
        food_id: FoodId,
        /// Selected portion
        portion: PortionName,
    },

    /// No extra piece price and no base price; extra pieces charged as zero.
    UnresolvedPiecePrice {
        /// Affected food
        food_id: FoodId,
    },

    /// Quantity above the class cap; priced at the cap.
    QuantityClamped {
        /// Affected food
        food_id: FoodId,
        /// Quantity found on the selection
        requested: u32,
        /// Quantity priced
        priced: u32,
    },
}

impl fmt::Display for PricingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingWarning::UnresolvedPortionPrice { food_id, portion } => {
                write!(f, "{food_id} has no price for portion {portion}")
            }
            PricingWarning::UnresolvedPiecePrice { food_id } => {
                write!(f, "{food_id} has no extra piece price")
            }
            PricingWarning::QuantityClamped {
                food_id,
                requested,
                priced,
            } => write!(f, "{food_id} quantity {requested} priced as {priced}"),
        }
    }
}

/// Warnings collected while pricing one order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Warnings(SmallVec<[PricingWarning; 2]>);

impl Warnings {
    /// Create warnings from a list, without logging them.
    pub fn from_vec(warnings: Vec<PricingWarning>) -> Self {
        Self(warnings.into())
    }

    /// Record and log a warning.
    pub fn push(&mut self, warning: PricingWarning) {
        warn!(%warning, "pricing degraded");

        self.0.push(warning);
    }

    /// Iterate over recorded warnings.
    pub fn iter(&self) -> impl Iterator<Item = &PricingWarning> {
        self.0.iter()
    }

    /// Number of recorded warnings.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if pricing ran without degradations.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A selected food resolved against the catalog.
#[derive(Debug, Clone, Copy)]
pub struct SelectedFood<'c, 'a> {
    /// Catalog entry
    pub entry: &'c CatalogEntry<'a>,

    /// Quantity to price, already capped for the class
    pub quantity: u32,
}

impl SelectedFood<'_, '_> {
    /// Pricing class of the food.
    pub fn class(&self) -> FoodClass {
        self.entry.class()
    }

    /// Catalog id of the food.
    pub fn id(&self) -> &FoodId {
        self.entry.id()
    }
}

/// Price a selection.
///
/// # Errors
///
/// Returns a [`PricingError`] when the selection is incomplete, refers to
/// foods outside the catalog, or the settings use another currency.
/// Missing price data does not fail; see [`PricingWarning`].
pub fn price_order<'a>(
    catalog: &Catalog<'a>,
    settings: &StoreSettings<'a>,
    selection: &Selection,
) -> Result<PricedOrder<'a>, PricingError> {
    let main_id = selection.main().ok_or(PricingError::IncompleteSelection {
        missing: MissingChoice::Main,
    })?;

    let portion = selection
        .portion()
        .ok_or(PricingError::IncompleteSelection {
            missing: MissingChoice::Portion,
        })?;

    let main = catalog
        .get(main_id)
        .ok_or_else(|| PricingError::UnknownItem(main_id.clone()))?;

    if main.class() != FoodClass::Main {
        return Err(PricingError::NotAMain(main_id.clone()));
    }

    if settings.currency() != catalog.currency() {
        return Err(PricingError::CurrencyMismatch(
            settings.currency().iso_alpha_code,
            catalog.currency().iso_alpha_code,
        ));
    }

    let mut warnings = Warnings::default();
    let selected = resolve_selected(catalog, selection, &mut warnings)?;

    let primary = select_primary(&selected, portion);
    let veg = allocate_veg_quota(&selected, settings.free_veg_curries());

    if let Some(food) = primary.and_then(|idx| selected.get(idx)) {
        debug!(food_id = %food.id(), %portion, "primary curry selected");
    }

    let mut pricer = LinePricer::new(portion, settings, &mut warnings);
    let mut charges: SmallVec<[(FoodId, i64, u32); 8]> = SmallVec::new();

    charges.push((main.id().clone(), pricer.main(main, primary.is_some()), 1));

    for (idx, (food, allocation)) in selected.iter().zip(veg.iter()).enumerate() {
        let role = if primary == Some(idx) {
            Role::Primary
        } else {
            Role::Secondary
        };

        let charge = pricer.food(food, role, *allocation)?;

        charges.push((food.id().clone(), charge, food.quantity));
    }

    aggregate(charges, catalog.currency(), warnings)
}

fn resolve_selected<'c, 'a>(
    catalog: &'c Catalog<'a>,
    selection: &Selection,
    warnings: &mut Warnings,
) -> Result<SmallVec<[SelectedFood<'c, 'a>; 8]>, PricingError> {
    selection
        .curries()
        .filter(|(_, quantity)| *quantity > 0)
        .map(|(id, quantity)| {
            let entry = catalog
                .get(id)
                .ok_or_else(|| PricingError::UnknownItem(id.clone()))?;

            if entry.class() == FoodClass::Main {
                return Err(PricingError::MainInCurries(id.clone()));
            }

            let priced = entry
                .class()
                .max_quantity()
                .map_or(quantity, |max| quantity.min(max));

            if priced < quantity {
                warnings.push(PricingWarning::QuantityClamped {
                    food_id: id.clone(),
                    requested: quantity,
                    priced,
                });
            }

            Ok(SelectedFood {
                entry,
                quantity: priced,
            })
        })
        .collect()
}
