//! Store Settings

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors resolving store settings from their stored form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// Neither the canonical nor the legacy name carries a veg curry price.
    #[error("No veg curry price configured")]
    MissingVegCurryPrice,

    /// Canonical and legacy names are both set and disagree.
    #[error("Setting {canonical} conflicts with legacy setting {legacy}")]
    ConflictingSetting {
        /// Canonical setting name
        canonical: &'static str,
        /// Legacy setting name
        legacy: &'static str,
    },

    /// The veg curry price is below zero.
    #[error("Setting {0} is negative")]
    NegativePrice(&'static str),

    /// Canonical and legacy prices are in different currencies.
    #[error("Setting {0} has currency {1}, but store has currency {2}")]
    CurrencyMismatch(&'static str, &'static str, &'static str),
}

/// Merchant pricing knobs read by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoreSettings<'a> {
    veg_curry_price: Money<'a, Currency>,
    free_veg_curries: u32,
}

impl<'a> StoreSettings<'a> {
    /// Create settings from canonical values.
    pub const fn new(veg_curry_price: Money<'a, Currency>, free_veg_curries: u32) -> Self {
        Self {
            veg_curry_price,
            free_veg_curries,
        }
    }

    /// Flat charge per chargeable veg curry unit, also used for secondary
    /// non-divisible non-veg curries.
    pub fn veg_curry_price(&self) -> Money<'a, Currency> {
        self.veg_curry_price
    }

    /// Number of veg curry units free per order.
    pub fn free_veg_curries(&self) -> u32 {
        self.free_veg_curries
    }

    /// Currency of the configured prices.
    pub fn currency(&self) -> &'a Currency {
        self.veg_curry_price.currency()
    }
}

/// Settings as stored by the store-configuration service, where the same
/// knob may appear under its current name or its legacy alias.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoredSettings<'a> {
    /// Canonical veg curry price
    pub veg_curry_price: Option<Money<'a, Currency>>,

    /// Legacy name for the veg curry price
    pub extra_veg_price: Option<Money<'a, Currency>>,

    /// Canonical free veg curry quota
    pub free_veg_curries: Option<u32>,

    /// Legacy name for the free veg curry quota
    pub default_veg_count: Option<u32>,
}

impl<'a> StoredSettings<'a> {
    /// Collapse canonical and legacy names into [`StoreSettings`].
    ///
    /// A missing quota means no free curries.
    ///
    /// # Errors
    ///
    /// - [`SettingsError::MissingVegCurryPrice`]: no price under either name.
    /// - [`SettingsError::ConflictingSetting`]: both names are set with different values.
    /// - [`SettingsError::CurrencyMismatch`]: both prices are set in different currencies.
    /// - [`SettingsError::NegativePrice`]: the resolved price is below zero.
    pub fn resolve(self) -> Result<StoreSettings<'a>, SettingsError> {
        let (name, veg_curry_price) = match (self.veg_curry_price, self.extra_veg_price) {
            (Some(canonical), Some(legacy)) if canonical.currency() != legacy.currency() => {
                return Err(SettingsError::CurrencyMismatch(
                    "extra_veg_price",
                    legacy.currency().iso_alpha_code,
                    canonical.currency().iso_alpha_code,
                ));
            }
            (Some(canonical), Some(legacy)) if canonical != legacy => {
                return Err(SettingsError::ConflictingSetting {
                    canonical: "veg_curry_price",
                    legacy: "extra_veg_price",
                });
            }
            (Some(price), _) => ("veg_curry_price", price),
            (None, Some(price)) => ("extra_veg_price", price),
            (None, None) => return Err(SettingsError::MissingVegCurryPrice),
        };

        if veg_curry_price.to_minor_units() < 0 {
            return Err(SettingsError::NegativePrice(name));
        }

        let free_veg_curries = match (self.free_veg_curries, self.default_veg_count) {
            (Some(canonical), Some(legacy)) if canonical != legacy => {
                return Err(SettingsError::ConflictingSetting {
                    canonical: "free_veg_curries",
                    legacy: "default_veg_count",
                });
            }
            (Some(count), _) | (None, Some(count)) => count,
            (None, None) => 0,
        };

        Ok(StoreSettings::new(veg_curry_price, free_veg_curries))
    }
}
