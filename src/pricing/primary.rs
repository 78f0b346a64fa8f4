//! Primary Curry Selection

use crate::{menu::PortionName, pricing::SelectedFood};

/// Pick the non-veg curry whose portion price replaces the main dish's price.
///
/// Candidates are the selected non-veg curries (divisible or not); gravies and
/// veg curries are never eligible. The candidate with the highest price at
/// `portion` wins. On an exact tie the candidate selected first wins, so the
/// result depends on selection order only when prices are equal. A candidate
/// without any resolvable price competes as zero.
///
/// Returns the index of the winner in `selected`, or `None` for a vegetarian
/// order.
pub fn select_primary(selected: &[SelectedFood<'_, '_>], portion: &PortionName) -> Option<usize> {
    let mut best: Option<(usize, i64)> = None;

    for (idx, food) in selected.iter().enumerate() {
        if !food.class().is_non_veg_curry() || food.quantity == 0 {
            continue;
        }

        let price = food
            .entry
            .item()
            .price_for_portion(portion)
            .map_or(0, |price| price.to_minor_units());

        // Strictly greater: earlier candidates keep ties.
        if best.is_none_or(|(_, best_price)| price > best_price) {
            best = Some((idx, price));
        }
    }

    best.map(|(idx, _)| idx)
}
