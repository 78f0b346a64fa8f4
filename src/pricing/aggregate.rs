//! Order Totals

use rusty_money::{Money, iso::Currency};
use smallvec::{SmallVec, smallvec};

use crate::{
    menu::FoodId,
    pricing::{PricingError, Warnings},
};

/// One persisted order line.
///
/// `unit_price × quantity` is exactly the share of the food's charge carried by this line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem<'a> {
    food_id: FoodId,
    quantity: u32,
    unit_price: Money<'a, Currency>,
}

impl<'a> LineItem<'a> {
    /// Create a line item.
    pub fn new(food_id: FoodId, quantity: u32, unit_price: Money<'a, Currency>) -> Self {
        Self {
            food_id,
            quantity,
            unit_price,
        }
    }

    /// Food this line belongs to.
    pub fn food_id(&self) -> &FoodId {
        &self.food_id
    }

    /// Number of units, at least one.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Derived price per unit.
    pub fn unit_price(&self) -> Money<'a, Currency> {
        self.unit_price
    }

    /// `unit_price × quantity`, saturating at the bounds of minor units.
    pub fn line_total(&self) -> Money<'a, Currency> {
        let minor = self
            .unit_price
            .to_minor_units()
            .saturating_mul(i64::from(self.quantity));

        Money::from_minor(minor, self.unit_price.currency())
    }

    fn line_total_minor(&self) -> Option<i64> {
        self.unit_price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
    }
}

/// Result of pricing one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedOrder<'a> {
    line_items: SmallVec<[LineItem<'a>; 8]>,
    total: Money<'a, Currency>,
    warnings: Warnings,
}

impl<'a> PricedOrder<'a> {
    /// Amount to charge.
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Lines to persist, main dish first, then curries in selection order.
    pub fn line_items(&self) -> &[LineItem<'a>] {
        &self.line_items
    }

    /// Degradations hit while pricing.
    pub fn warnings(&self) -> &Warnings {
        &self.warnings
    }

    /// Check if any price had to be substituted or quantity clamped.
    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Currency of every amount on the order.
    pub fn currency(&self) -> &'a Currency {
        self.total.currency()
    }

    /// Check that the line items re-sum to the total without overflowing.
    pub fn reconciles(&self) -> bool {
        self.line_items
            .iter()
            .try_fold(0_i64, |sum, line| {
                line.line_total_minor()
                    .and_then(|total| sum.checked_add(total))
            })
            == Some(self.total.to_minor_units())
    }
}

/// Split one food's charge into lines whose unit prices re-sum to it exactly.
///
/// When `charge` divides evenly by `quantity` there is a single line. Otherwise
/// the remainder `r` is carried by a first line of `r` units one minor unit
/// dearer, followed by a line for the remaining units. A zero `quantity` is
/// treated as one.
pub fn split_charge<'a>(
    food_id: &FoodId,
    charge: i64,
    quantity: u32,
    currency: &'a Currency,
) -> SmallVec<[LineItem<'a>; 2]> {
    let quantity = quantity.max(1);
    let divisor = i64::from(quantity);
    let unit = charge.div_euclid(divisor);
    let remainder = charge.rem_euclid(divisor);

    if remainder == 0 {
        return smallvec![LineItem::new(
            food_id.clone(),
            quantity,
            Money::from_minor(unit, currency),
        )];
    }

    // remainder < divisor, which came from a u32.
    let dearer = u32::try_from(remainder).unwrap_or(quantity);

    smallvec![
        LineItem::new(
            food_id.clone(),
            dearer,
            Money::from_minor(unit + 1, currency)
        ),
        LineItem::new(
            food_id.clone(),
            quantity - dearer,
            Money::from_minor(unit, currency)
        ),
    ]
}

/// Total line charges and derive the persisted line items.
///
/// `charges` holds `(food, charge in minor units, quantity)` in output order.
/// Total and line items come from the same minor-unit charges, so the line
/// items always re-sum to the total.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the total does not fit in minor units.
pub fn aggregate<'a>(
    charges: impl IntoIterator<Item = (FoodId, i64, u32)>,
    currency: &'a Currency,
    warnings: Warnings,
) -> Result<PricedOrder<'a>, PricingError> {
    let mut total: i64 = 0;
    let mut line_items: SmallVec<[LineItem<'a>; 8]> = SmallVec::new();

    for (food_id, charge, quantity) in charges {
        total = total
            .checked_add(charge)
            .ok_or_else(|| PricingError::Overflow(food_id.clone()))?;

        line_items.extend(split_charge(&food_id, charge, quantity, currency));
    }

    let order = PricedOrder {
        line_items,
        total: Money::from_minor(total, currency),
        warnings,
    };

    debug_assert!(order.reconciles(), "line items must re-sum to the total");

    Ok(order)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{INR, JPY};
    use testresult::TestResult;

    use crate::pricing::PricingWarning;

    use super::*;

    fn minor(lines: &[LineItem<'_>]) -> Vec<(u32, i64)> {
        lines
            .iter()
            .map(|line| (line.quantity(), line.unit_price().to_minor_units()))
            .collect()
    }

    #[test]
    fn even_charge_is_a_single_line() {
        let lines = split_charge(&FoodId::from("fish"), 40_000, 2, INR);

        assert_eq!(minor(&lines), vec![(2, 20_000)]);
    }

    #[test]
    fn uneven_charge_splits_the_remainder() {
        let lines = split_charge(&FoodId::from("fish"), 41_000, 3, INR);

        assert_eq!(minor(&lines), vec![(2, 13_667), (1, 13_666)]);

        let sum: i64 = lines
            .iter()
            .map(|line| line.line_total().to_minor_units())
            .sum();

        assert_eq!(sum, 41_000);
    }

    #[test]
    fn zero_charge_is_a_single_free_line() {
        let lines = split_charge(&FoodId::from("jus"), 0, 4, INR);

        assert_eq!(minor(&lines), vec![(4, 0)]);
    }

    #[test]
    fn zero_quantity_is_treated_as_one() {
        let lines = split_charge(&FoodId::from("rice"), 300, 0, INR);

        assert_eq!(minor(&lines), vec![(1, 300)]);
    }

    #[test]
    fn split_respects_currencies_without_minor_units() {
        let lines = split_charge(&FoodId::from("fish"), 1_000, 3, JPY);

        assert_eq!(minor(&lines), vec![(1, 334), (2, 333)]);
    }

    #[test]
    fn aggregate_totals_and_reconciles() -> TestResult {
        let order = aggregate(
            [
                (FoodId::from("rice"), 0, 1),
                (FoodId::from("fish"), 41_000, 3),
                (FoodId::from("dal"), 6_000, 1),
            ],
            INR,
            Warnings::default(),
        )?;

        assert_eq!(order.total(), Money::from_minor(47_000, INR));
        assert_eq!(order.line_items().len(), 4);
        assert!(order.reconciles());
        assert!(!order.is_degraded());
        assert_eq!(order.currency(), INR);

        Ok(())
    }

    #[test]
    fn aggregate_reports_overflow() {
        let result = aggregate(
            [
                (FoodId::from("a"), i64::MAX, 1),
                (FoodId::from("b"), 1, 1),
            ],
            INR,
            Warnings::default(),
        );

        assert_eq!(result.err(), Some(PricingError::Overflow(FoodId::from("b"))));
    }

    #[test]
    fn line_total_saturates_instead_of_overflowing() {
        let line = LineItem::new(FoodId::from("fish"), 3, Money::from_minor(i64::MAX / 2, INR));

        assert_eq!(line.line_total(), Money::from_minor(i64::MAX, INR));
        assert_eq!(line.line_total_minor(), None);
    }

    #[test]
    fn aggregate_keeps_warnings() -> TestResult {
        let warnings = Warnings::from_vec(vec![PricingWarning::UnresolvedPiecePrice {
            food_id: FoodId::from("crab"),
        }]);

        let order = aggregate([(FoodId::from("rice"), 100, 1)], INR, warnings)?;

        assert!(order.is_degraded());
        assert_eq!(order.warnings().len(), 1);

        Ok(())
    }
}
