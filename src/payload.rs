//! Order Payload
//!
//! Shape of the line items handed to the order-creation API and read back for receipts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{menu::FoodId, pricing::aggregate::PricedOrder};

/// One `{food_id, quantity, price}` tuple, `price` being the derived unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLinePayload {
    /// Catalog id
    pub food_id: FoodId,

    /// Units on this line
    pub quantity: u32,

    /// Unit price in major units
    pub price: Decimal,
}

/// Order body submitted for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPayload {
    /// Persisted lines
    pub items: Vec<OrderLinePayload>,

    /// Order total in major units
    pub total: Decimal,
}

impl OrderLinePayload {
    /// `quantity × price`, or `None` if it does not fit in a [`Decimal`].
    pub fn line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

impl OrderPayload {
    /// Sum of `quantity × price` over every line, or `None` on overflow.
    pub fn line_sum(&self) -> Option<Decimal> {
        self.items.iter().try_fold(Decimal::ZERO, |sum, line| {
            line.line_total().and_then(|total| sum.checked_add(total))
        })
    }
}

impl From<&PricedOrder<'_>> for OrderPayload {
    fn from(order: &PricedOrder<'_>) -> Self {
        OrderPayload {
            items: order
                .line_items()
                .iter()
                .map(|line| OrderLinePayload {
                    food_id: line.food_id().clone(),
                    quantity: line.quantity(),
                    price: *line.unit_price().amount(),
                })
                .collect(),
            total: *order.total().amount(),
        }
    }
}
