//! Platter
//!
//! Platter prices fixed-structure meal orders: one main dish at a chosen portion,
//! plus any curries, gravies and extras. It picks the primary non-veg curry,
//! spreads the free veg curry quota and derives per-unit prices that always
//! re-sum to the order total.

pub mod classify;
pub mod fixtures;
pub mod menu;
pub mod payload;
pub mod prelude;
pub mod pricing;
pub mod receipt;
pub mod selection;
pub mod settings;
pub mod utils;
