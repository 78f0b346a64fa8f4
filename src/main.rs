//! Platter
//!
//! Prices a selection from a fixture set and prints the receipt.
//!
//! Use `-f` to load a menu and settings fixture set by name
//! Use `-s` to price a different selection against that menu
//! Use `-p` to also print the order payload as JSON

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use platter::{
    fixtures::Fixture, payload::OrderPayload, pricing::price_order, receipt::Receipt,
    utils::OrderArgs,
};

/// Platter entry point
#[expect(clippy::print_stdout, reason = "CLI output")]
pub fn main() -> Result<()> {
    let args = OrderArgs::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let mut fixture = Fixture::new();

    fixture
        .load_menu(&args.fixture)?
        .load_settings(&args.fixture)?
        .load_selection(args.selection_name())?;

    let catalog = fixture.catalog()?;
    let order = price_order(catalog, fixture.settings()?, fixture.selection()?)?;

    info!(total = %order.total(), lines = order.line_items().len(), "order priced");

    if order.is_degraded() {
        warn!(warnings = order.warnings().len(), "order priced with degraded data");
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    Receipt::from_order(&order)?.write_to(&mut handle, catalog)?;

    for warning in order.warnings().iter() {
        println!("warning: {warning}");
    }

    if args.payload {
        println!("{}", serde_json::to_string_pretty(&OrderPayload::from(&order))?);
    }

    Ok(())
}
