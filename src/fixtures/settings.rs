//! Settings Fixtures

use serde::Deserialize;

use crate::{
    fixtures::{FixtureError, menu::parse_money},
    settings::{StoreSettings, StoredSettings},
};

/// Store settings in YAML, under current or legacy names.
#[derive(Debug, Default, Deserialize)]
pub struct SettingsFixture {
    /// Veg curry price (e.g., "60.00 INR")
    #[serde(default)]
    pub veg_curry_price: Option<String>,

    /// Legacy name for `veg_curry_price`
    #[serde(default)]
    pub extra_veg_price: Option<String>,

    /// Free veg curry units per order
    #[serde(default)]
    pub free_veg_curries: Option<u32>,

    /// Legacy name for `free_veg_curries`
    #[serde(default)]
    pub default_veg_count: Option<u32>,
}

impl TryFrom<SettingsFixture> for StoreSettings<'static> {
    type Error = FixtureError;

    fn try_from(fixture: SettingsFixture) -> Result<Self, Self::Error> {
        let stored = StoredSettings {
            veg_curry_price: fixture.veg_curry_price.as_deref().map(parse_money).transpose()?,
            extra_veg_price: fixture.extra_veg_price.as_deref().map(parse_money).transpose()?,
            free_veg_curries: fixture.free_veg_curries,
            default_veg_count: fixture.default_veg_count,
        };

        Ok(stored.resolve()?)
    }
}
