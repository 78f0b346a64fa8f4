//! Selection

use smallvec::SmallVec;
use tracing::debug;

use crate::menu::{FoodId, PortionName, catalog::CatalogEntry};

/// What the customer has picked so far.
///
/// Curry entries keep the order in which they were first selected. That order
/// decides which veg curries use the free quota and breaks ties between
/// equally priced primary curry candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    main: Option<FoodId>,
    portion: Option<PortionName>,
    curries: SmallVec<[(FoodId, u32); 8]>,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose the main dish.
    pub fn choose_main(&mut self, main: impl Into<FoodId>) -> &mut Self {
        self.main = Some(main.into());
        self
    }

    /// Choose the portion size.
    pub fn choose_portion(&mut self, portion: impl Into<PortionName>) -> &mut Self {
        self.portion = Some(portion.into());
        self
    }

    /// The chosen main dish.
    pub fn main(&self) -> Option<&FoodId> {
        self.main.as_ref()
    }

    /// The chosen portion.
    pub fn portion(&self) -> Option<&PortionName> {
        self.portion.as_ref()
    }

    /// Iterate over selected curries and extras in selection order.
    pub fn curries(&self) -> impl Iterator<Item = (&FoodId, u32)> {
        self.curries.iter().map(|(id, quantity)| (id, *quantity))
    }

    /// Selected quantity of a food, zero if not selected.
    pub fn quantity(&self, id: &FoodId) -> u32 {
        self.position(id)
            .and_then(|idx| self.curries.get(idx))
            .map_or(0, |(_, quantity)| *quantity)
    }

    /// Number of distinct curries and extras selected.
    pub fn len(&self) -> usize {
        self.curries.len()
    }

    /// Check if no curries or extras are selected.
    pub fn is_empty(&self) -> bool {
        self.curries.is_empty()
    }

    /// Add quantity for a food without consulting the catalog.
    ///
    /// Used when rebuilding a selection from stored data; pricing still caps
    /// quantities per class.
    pub fn add(&mut self, id: impl Into<FoodId>, quantity: u32) -> &mut Self {
        let id = id.into();
        let current = self.quantity(&id);

        self.store(id, current.saturating_add(quantity));
        self
    }

    /// Add one unit of a food, respecting its class cap.
    ///
    /// Incrementing past the cap is a no-op. Returns the resulting quantity.
    pub fn increment(&mut self, entry: &CatalogEntry<'_>) -> u32 {
        let current = self.quantity(entry.id());

        self.set_quantity(entry, current.saturating_add(1))
    }

    /// Remove one unit of a food. Returns the resulting quantity.
    pub fn decrement(&mut self, id: &FoodId) -> u32 {
        let quantity = self.quantity(id).saturating_sub(1);

        self.store(id.clone(), quantity);

        quantity
    }

    /// Set the quantity of a food, clamped to its class cap. Zero removes it.
    ///
    /// Returns the stored quantity.
    pub fn set_quantity(&mut self, entry: &CatalogEntry<'_>, quantity: u32) -> u32 {
        let clamped = entry
            .class()
            .max_quantity()
            .map_or(quantity, |max| quantity.min(max));

        if clamped < quantity {
            debug!(
                food_id = %entry.id(),
                requested = quantity,
                clamped,
                "quantity clamped"
            );
        }

        self.store(entry.id().clone(), clamped);

        clamped
    }

    /// Deselect a food entirely.
    pub fn remove(&mut self, id: &FoodId) -> &mut Self {
        self.store(id.clone(), 0);
        self
    }

    fn position(&self, id: &FoodId) -> Option<usize> {
        self.curries.iter().position(|(selected, _)| selected == id)
    }

    fn store(&mut self, id: FoodId, quantity: u32) {
        match (self.position(&id), quantity) {
            (Some(idx), 0) => {
                self.curries.remove(idx);
            }
            (Some(idx), quantity) => {
                if let Some(entry) = self.curries.get_mut(idx) {
                    entry.1 = quantity;
                }
            }
            (None, 0) => {}
            (None, quantity) => self.curries.push((id, quantity)),
        }
    }
}
