//! Receipt

use std::{fmt::Write, io};

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    menu::{FoodId, catalog::Catalog},
    payload::{OrderLinePayload, OrderPayload},
    pricing::aggregate::PricedOrder,
};

/// Errors that can occur when reading back or printing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Stored lines do not add up to the stored total.
    #[error("Line items sum to {lines}, but order total is {total}")]
    TotalMismatch {
        /// Sum of `quantity × price`
        lines: Decimal,
        /// Stored total
        total: Decimal,
    },

    /// A stored line has no units.
    #[error("Line {0} has zero quantity")]
    EmptyLine(usize),

    /// Stored amounts are too large to add up.
    #[error("Line amounts overflow")]
    Overflow,

    /// A stored line refers to a food missing from the catalog.
    #[error("Missing menu item")]
    MissingItem(FoodId),

    /// IO error
    #[error("IO error")]
    IO,
}

/// An order as shown to the customer after submission.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    lines: SmallVec<[OrderLinePayload; 8]>,
    total: Decimal,
    currency: &'a Currency,
}

impl<'a> Receipt<'a> {
    /// Build a receipt from stored order lines, checking they reconcile.
    ///
    /// # Errors
    ///
    /// - [`ReceiptError::EmptyLine`]: a line has zero quantity.
    /// - [`ReceiptError::TotalMismatch`]: lines do not re-sum to the total.
    /// - [`ReceiptError::Overflow`]: line amounts are too large to re-sum.
    pub fn from_payload(
        payload: &OrderPayload,
        currency: &'a Currency,
    ) -> Result<Self, ReceiptError> {
        if let Some(idx) = payload.items.iter().position(|line| line.quantity == 0) {
            return Err(ReceiptError::EmptyLine(idx));
        }

        let lines = payload.line_sum().ok_or(ReceiptError::Overflow)?;

        if lines != payload.total {
            return Err(ReceiptError::TotalMismatch {
                lines,
                total: payload.total,
            });
        }

        Ok(Receipt {
            lines: payload.items.iter().cloned().collect(),
            total: payload.total,
            currency,
        })
    }

    /// Build a receipt straight from a freshly priced order.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if the order does not reconcile.
    pub fn from_order(order: &PricedOrder<'a>) -> Result<Self, ReceiptError> {
        Self::from_payload(&OrderPayload::from(order), order.currency())
    }

    /// Stored lines.
    pub fn lines(&self) -> &[OrderLinePayload] {
        &self.lines
    }

    /// Order total.
    pub fn total(&self) -> Money<'a, Currency> {
        Money::from_decimal(self.total, self.currency)
    }

    /// Currency used for all monetary values.
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }

    /// Prints the receipt.
    ///
    /// # Errors
    ///
    /// Returns an error if a line's food is not in `catalog` or writing fails.
    pub fn write_to(&self, mut out: impl io::Write, catalog: &Catalog<'_>) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Qty", "Unit Price", "Line Total"]);

        for (idx, line) in self.lines.iter().enumerate() {
            let entry = catalog
                .get(&line.food_id)
                .ok_or_else(|| ReceiptError::MissingItem(line.food_id.clone()))?;

            let line_total = line.line_total().ok_or(ReceiptError::Overflow)?;

            builder.push_record([
                format!("#{:<3}", idx + 1),
                entry.item().name.clone(),
                line.quantity.to_string(),
                self.money(line.price),
                self.money(line_total),
            ]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(
            1,
            HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
        );

        table.with(theme);
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..5), Alignment::right());

        let table_str = colorize_borders(&table.to_string());

        writeln!(out, "\n{table_str}").map_err(|_err| ReceiptError::IO)?;
        writeln!(out, " \x1b[1mTotal:\x1b[0m  {}\n", self.total()).map_err(|_err| ReceiptError::IO)
    }

    fn money(&self, amount: Decimal) -> String {
        Money::from_decimal(amount, self.currency).to_string()
    }
}

/// Wraps runs of box-drawing characters (U+2500..U+257F) in ANSI dark-grey escape codes.
fn colorize_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len() + 256);
    let mut in_run = false;

    for ch in table.chars() {
        let box_char = ('\u{2500}'..='\u{257F}').contains(&ch);

        if box_char && !in_run {
            _ = out.write_str("\x1b[90m");
            in_run = true;
        } else if !box_char && in_run {
            _ = out.write_str("\x1b[0m");
            in_run = false;
        }

        out.push(ch);
    }

    if in_run {
        _ = out.write_str("\x1b[0m");
    }

    out
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::INR;
    use testresult::TestResult;

    use crate::menu::{FoodType, MenuItem};

    use super::*;

    fn payload() -> OrderPayload {
        OrderPayload {
            items: vec![
                OrderLinePayload {
                    food_id: FoodId::from("rice"),
                    quantity: 1,
                    price: Decimal::ZERO,
                },
                OrderLinePayload {
                    food_id: FoodId::from("fish"),
                    quantity: 2,
                    price: Decimal::new(20_000, 2),
                },
            ],
            total: Decimal::new(40_000, 2),
        }
    }

    fn catalog<'a>() -> Result<Catalog<'a>, crate::menu::catalog::CatalogError> {
        Catalog::with_items(
            [
                MenuItem::new("rice", "Steamed Rice", FoodType::MainMeal, Money::from_minor(30_000, INR)),
                MenuItem::new("fish", "Fish Curry", FoodType::Curry, Money::from_minor(35_000, INR))
                    .divisible(true),
            ],
            INR,
        )
    }

    #[test]
    fn from_payload_accepts_reconciled_lines() -> TestResult {
        let receipt = Receipt::from_payload(&payload(), INR)?;

        assert_eq!(receipt.lines().len(), 2);
        assert_eq!(receipt.total(), Money::from_minor(40_000, INR));
        assert_eq!(receipt.currency(), INR);

        Ok(())
    }

    #[test]
    fn from_payload_rejects_mismatched_total() {
        let mut payload = payload();
        payload.total = Decimal::new(39_999, 2);

        let result = Receipt::from_payload(&payload, INR);

        assert!(matches!(result, Err(ReceiptError::TotalMismatch { .. })));
    }

    #[test]
    fn from_payload_rejects_empty_lines() {
        let mut payload = payload();

        if let Some(line) = payload.items.get_mut(0) {
            line.quantity = 0;
        }

        let result = Receipt::from_payload(&payload, INR);

        assert!(matches!(result, Err(ReceiptError::EmptyLine(0))));
    }

    #[test]
    fn from_payload_reports_overflow_instead_of_panicking() -> TestResult {
        let payload: OrderPayload = serde_json::from_str(
            r#"{"items":[{"food_id":"fish","quantity":2,"price":"70000000000000000000000000000"}],"total":"1"}"#,
        )?;

        let result = Receipt::from_payload(&payload, INR);

        assert!(matches!(result, Err(ReceiptError::Overflow)));

        Ok(())
    }

    #[test]
    fn from_payload_reports_overflow_in_the_sum() -> TestResult {
        let payload: OrderPayload = serde_json::from_str(
            r#"{"items":[
                {"food_id":"fish","quantity":1,"price":"70000000000000000000000000000"},
                {"food_id":"prawn","quantity":1,"price":"70000000000000000000000000000"}
            ],"total":"1"}"#,
        )?;

        let result = Receipt::from_payload(&payload, INR);

        assert!(matches!(result, Err(ReceiptError::Overflow)));

        Ok(())
    }

    #[test]
    fn write_to_renders_names_and_total() -> TestResult {
        let catalog = catalog()?;
        let receipt = Receipt::from_payload(&payload(), INR)?;

        let mut out = Vec::new();
        receipt.write_to(&mut out, &catalog)?;

        let output = String::from_utf8(out)?;

        assert!(output.contains("Steamed Rice"));
        assert!(output.contains("Fish Curry"));
        assert!(output.contains("Total:"));

        Ok(())
    }

    #[test]
    fn write_to_errors_on_missing_item() -> TestResult {
        let catalog = Catalog::new(INR);
        let receipt = Receipt::from_payload(&payload(), INR)?;

        let result = receipt.write_to(Vec::new(), &catalog);

        assert!(matches!(result, Err(ReceiptError::MissingItem(id)) if id.as_str() == "rice"));

        Ok(())
    }

    #[test]
    fn colorize_borders_wraps_box_runs() {
        assert_eq!(colorize_borders("a──b"), "a\x1b[90m──\x1b[0mb");
    }
}
