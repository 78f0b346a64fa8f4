//! Fixtures

use std::{fs, path::PathBuf};

use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    fixtures::{
        menu::{MenuFixture, parse_currency},
        selection::SelectionFixture,
        settings::SettingsFixture,
    },
    menu::catalog::{Catalog, CatalogError},
    selection::Selection,
    settings::{SettingsError, StoreSettings},
};

pub mod menu;
pub mod selection;
pub mod settings;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Settings currency differs from the menu currency
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Menu could not be built
    #[error("Invalid menu: {0}")]
    Catalog(#[from] CatalogError),

    /// Settings could not be resolved
    #[error("Invalid settings: {0}")]
    Settings(#[from] SettingsError),

    /// A part of the fixture set was requested before it was loaded
    #[error("No {0} loaded")]
    NotLoaded(&'static str),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    catalog: Option<Catalog<'a>>,
    settings: Option<StoreSettings<'a>>,
    selection: Option<Selection>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: None,
            settings: None,
            selection: None,
        }
    }

    /// Load a menu from `menus/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a price is
    /// invalid, or if the catalog rejects an item.
    pub fn load_menu(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: MenuFixture = self.read("menus", name)?;
        let currency = parse_currency(&fixture.currency)?;

        let mut catalog = Catalog::new(currency);

        // Sorted so duplicate and currency errors are reported deterministically.
        let mut items: Vec<_> = fixture.items.into_iter().collect();
        items.sort_by(|(a, _), (b, _)| a.cmp(b));

        for (id, item_fixture) in items {
            catalog.insert(item_fixture.try_into_item(id)?)?;
        }

        check_currency(
            Some(catalog.currency()),
            self.settings.map(|settings| settings.currency()),
        )?;
        self.catalog = Some(catalog);

        Ok(self)
    }

    /// Load store settings from `settings/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the settings
    /// cannot be resolved.
    pub fn load_settings(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: SettingsFixture = self.read("settings", name)?;
        let settings = StoreSettings::try_from(fixture)?;

        check_currency(
            self.catalog.as_ref().map(Catalog::currency),
            Some(settings.currency()),
        )?;
        self.settings = Some(settings);

        Ok(self)
    }

    /// Load a selection from `selections/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_selection(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: SelectionFixture = self.read("selections", name)?;

        self.selection = Some(Selection::from(fixture));

        Ok(self)
    }

    /// Load a complete fixture set (menu, settings and selection with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture
            .load_menu(name)?
            .load_settings(name)?
            .load_selection(name)?;

        Ok(fixture)
    }

    /// Get the loaded catalog
    ///
    /// # Errors
    ///
    /// Returns an error if no menu has been loaded.
    pub fn catalog(&self) -> Result<&Catalog<'a>, FixtureError> {
        self.catalog.as_ref().ok_or(FixtureError::NotLoaded("menu"))
    }

    /// Get the loaded settings
    ///
    /// # Errors
    ///
    /// Returns an error if no settings have been loaded.
    pub fn settings(&self) -> Result<&StoreSettings<'a>, FixtureError> {
        self.settings
            .as_ref()
            .ok_or(FixtureError::NotLoaded("settings"))
    }

    /// Get the loaded selection
    ///
    /// # Errors
    ///
    /// Returns an error if no selection has been loaded.
    pub fn selection(&self) -> Result<&Selection, FixtureError> {
        self.selection
            .as_ref()
            .ok_or(FixtureError::NotLoaded("selection"))
    }

    fn read<T: serde::de::DeserializeOwned>(
        &self,
        category: &str,
        name: &str,
    ) -> Result<T, FixtureError> {
        let file_path = self.base_path.join(category).join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        Ok(serde_norway::from_str(&contents)?)
    }
}

fn check_currency(menu: Option<&Currency>, settings: Option<&Currency>) -> Result<(), FixtureError> {
    match (menu, settings) {
        (Some(menu), Some(settings)) if menu != settings => Err(FixtureError::CurrencyMismatch(
            menu.iso_alpha_code.to_string(),
            settings.iso_alpha_code.to_string(),
        )),
        _ => Ok(()),
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}
