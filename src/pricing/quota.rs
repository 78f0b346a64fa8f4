//! Veg Curry Quota

use smallvec::SmallVec;
use tracing::debug;

use crate::{classify::FoodClass, pricing::SelectedFood};

/// How the units of one selected food fall against the free veg curry quota.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VegAllocation {
    /// Units covered by the quota
    pub free: u32,

    /// Units charged at the veg curry price
    pub charged: u32,
}

/// Spread the order-wide free veg curry quota over the selection.
///
/// Veg curry entries are flattened into single units in selection order; the
/// first `free_quota` units of the whole order are free and every later unit
/// is charged. The quota is shared across curry types, not granted per type.
///
/// The result has one allocation per entry in `selected`; non-veg-curry
/// entries get an empty allocation.
pub fn allocate_veg_quota(
    selected: &[SelectedFood<'_, '_>],
    free_quota: u32,
) -> SmallVec<[VegAllocation; 8]> {
    let mut remaining = free_quota;

    let allocations: SmallVec<[VegAllocation; 8]> = selected
        .iter()
        .map(|food| {
            if food.class() != FoodClass::VegCurry {
                return VegAllocation::default();
            }

            let free = food.quantity.min(remaining);
            remaining -= free;

            VegAllocation {
                free,
                charged: food.quantity - free,
            }
        })
        .collect();

    debug!(
        free_quota,
        unused = remaining,
        charged = allocations.iter().map(|a| a.charged).sum::<u32>(),
        "veg quota allocated"
    );

    allocations
}
