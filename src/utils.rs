//! Utils

use clap::Parser;

/// Arguments for the `platter` binary
#[derive(Debug, Parser)]
#[command(name = "platter", about = "Price a meal order from a fixture set")]
pub struct OrderArgs {
    /// Fixture set to load the menu and settings from
    #[clap(short, long, default_value = "thali")]
    pub fixture: String,

    /// Selection fixture to price (defaults to the fixture set name)
    #[clap(short, long)]
    pub selection: Option<String>,

    /// Print the order payload as JSON after the receipt
    #[clap(short, long)]
    pub payload: bool,

    /// Log filter used when `RUST_LOG` is not set
    #[clap(long, env = "PLATTER_LOG", default_value = "warn")]
    pub log_level: String,
}

impl OrderArgs {
    /// Name of the selection fixture to load.
    pub fn selection_name(&self) -> &str {
        self.selection.as_deref().unwrap_or(&self.fixture)
    }
}
