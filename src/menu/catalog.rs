//! Catalog

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

use crate::{
    classify::{FoodClass, classify},
    menu::{FoodId, MenuItem},
};

new_key_type! {
    /// Food Key
    pub struct FoodKey;
}

/// Errors related to catalog construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// An item's price currency differs from the catalog currency (item, item currency, catalog currency).
    #[error("Item {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(FoodId, &'static str, &'static str),

    /// Two items share the same id.
    #[error("Duplicate menu item: {0}")]
    DuplicateItem(FoodId),

    /// An item has a price below zero.
    #[error("Item {0} has a negative price")]
    NegativePrice(FoodId),
}

/// A menu item together with the class it was assigned on insertion.
#[derive(Debug, Clone)]
pub struct CatalogEntry<'a> {
    item: MenuItem<'a>,
    class: FoodClass,
}

impl<'a> CatalogEntry<'a> {
    /// The menu item.
    pub fn item(&self) -> &MenuItem<'a> {
        &self.item
    }

    /// The pricing class.
    pub fn class(&self) -> FoodClass {
        self.class
    }

    /// Shortcut for the item id.
    pub fn id(&self) -> &FoodId {
        &self.item.id
    }
}

/// Read-only snapshot of the merchant's menu.
#[derive(Debug)]
pub struct Catalog<'a> {
    entries: SlotMap<FoodKey, CatalogEntry<'a>>,
    index: FxHashMap<FoodId, FoodKey>,
    currency: &'a Currency,
}

impl<'a> Catalog<'a> {
    /// Create an empty catalog priced in the given currency.
    pub fn new(currency: &'a Currency) -> Self {
        Catalog {
            entries: SlotMap::with_key(),
            index: FxHashMap::default(),
            currency,
        }
    }

    /// Create a catalog from a list of items.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if any item fails to insert.
    pub fn with_items(
        items: impl IntoIterator<Item = MenuItem<'a>>,
        currency: &'a Currency,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Catalog::new(currency);

        for item in items {
            catalog.insert(item)?;
        }

        Ok(catalog)
    }

    /// Classify and insert an item.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::DuplicateItem`]: an item with the same id already exists.
    /// - [`CatalogError::CurrencyMismatch`]: one of the item's prices is in another currency.
    /// - [`CatalogError::NegativePrice`]: one of the item's prices is below zero.
    pub fn insert(&mut self, item: MenuItem<'a>) -> Result<FoodKey, CatalogError> {
        if self.index.contains_key(&item.id) {
            return Err(CatalogError::DuplicateItem(item.id));
        }

        if let Some(price) = item.prices().find(|price| price.currency() != self.currency) {
            return Err(CatalogError::CurrencyMismatch(
                item.id.clone(),
                price.currency().iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if item.prices().any(|price| price.to_minor_units() < 0) {
            return Err(CatalogError::NegativePrice(item.id));
        }

        let class = classify(&item);
        let id = item.id.clone();
        let key = self.entries.insert(CatalogEntry { item, class });

        self.index.insert(id, key);

        Ok(key)
    }

    /// Look up an entry by its id.
    pub fn get(&self, id: &FoodId) -> Option<&CatalogEntry<'a>> {
        self.index.get(id).and_then(|key| self.entries.get(*key))
    }

    /// Look up an entry by its key.
    pub fn entry(&self, key: FoodKey) -> Option<&CatalogEntry<'a>> {
        self.entries.get(key)
    }

    /// Look up the key for an id.
    pub fn key(&self, id: &FoodId) -> Option<FoodKey> {
        self.index.get(id).copied()
    }

    /// Iterate over every entry.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry<'a>> {
        self.entries.values()
    }

    /// Get the number of items in the catalog.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the currency of the catalog.
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{
        Money,
        iso::{GBP, INR},
    };
    use testresult::TestResult;

    use crate::menu::FoodType;

    use super::*;

    fn dal<'a>() -> MenuItem<'a> {
        MenuItem::new("dal", "Dal Tadka", FoodType::Curry, Money::from_minor(6_000, INR)).veg(true)
    }

    #[test]
    fn insert_classifies_item() -> TestResult {
        let catalog = Catalog::with_items([dal()], INR)?;

        let entry = catalog.get(&FoodId::from("dal")).ok_or("missing dal")?;

        assert_eq!(entry.class(), FoodClass::VegCurry);
        assert_eq!(entry.item().name, "Dal Tadka");

        Ok(())
    }

    #[test]
    fn insert_rejects_duplicate_ids() -> TestResult {
        let mut catalog = Catalog::new(INR);

        catalog.insert(dal())?;

        assert_eq!(
            catalog.insert(dal()),
            Err(CatalogError::DuplicateItem(FoodId::from("dal")))
        );
        assert_eq!(catalog.len(), 1);

        Ok(())
    }

    #[test]
    fn insert_rejects_foreign_portion_price() {
        let item = dal().with_portion_price("Full", Money::from_minor(700, GBP));

        let result = Catalog::with_items([item], INR);

        assert!(matches!(
            result,
            Err(CatalogError::CurrencyMismatch(id, "GBP", "INR")) if id.as_str() == "dal"
        ));
    }

    #[test]
    fn insert_rejects_negative_prices() {
        let negative_base = MenuItem::new(
            "dal",
            "Dal Tadka",
            FoodType::Curry,
            Money::from_minor(-6_000, INR),
        );
        let negative_piece = dal().with_extra_piece_price(Money::from_minor(-1, INR));
        let negative_portion = dal().with_portion_price("Half", Money::from_minor(-3_000, INR));

        for item in [negative_base, negative_piece, negative_portion] {
            let mut catalog = Catalog::new(INR);

            assert_eq!(
                catalog.insert(item),
                Err(CatalogError::NegativePrice(FoodId::from("dal")))
            );
            assert!(catalog.is_empty());
        }
    }

    #[test]
    fn insert_accepts_zero_prices() -> TestResult {
        let free = dal().with_portion_price("Half", Money::from_minor(0, INR));

        let catalog = Catalog::with_items([free], INR)?;

        assert_eq!(catalog.len(), 1);

        Ok(())
    }

    #[test]
    fn key_and_entry_agree() -> TestResult {
        let catalog = Catalog::with_items([dal()], INR)?;

        let key = catalog.key(&FoodId::from("dal")).ok_or("missing key")?;
        let entry = catalog.entry(key).ok_or("missing entry")?;

        assert_eq!(entry.id().as_str(), "dal");
        assert!(catalog.get(&FoodId::from("paneer")).is_none());

        Ok(())
    }

    #[test]
    fn empty_catalog_reports_currency() {
        let catalog = Catalog::new(INR);

        assert!(catalog.is_empty());
        assert_eq!(catalog.iter().count(), 0);
        assert_eq!(catalog.currency(), INR);
    }
}
