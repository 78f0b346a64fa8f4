//! Platter prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    classify::{FoodClass, classify},
    fixtures::{Fixture, FixtureError},
    menu::{
        FoodId, FoodType, MenuItem, PortionName,
        catalog::{Catalog, CatalogEntry, CatalogError, FoodKey},
    },
    payload::{OrderLinePayload, OrderPayload},
    pricing::{
        MissingChoice, PricingError, PricingWarning, Warnings,
        aggregate::{LineItem, PricedOrder},
        price_order,
    },
    receipt::{Receipt, ReceiptError},
    selection::Selection,
    settings::{SettingsError, StoreSettings, StoredSettings},
};
