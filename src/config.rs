use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::bulk::DEFAULT_CONFIRM_THRESHOLD;
use crate::catalog::Catalog;
use crate::models::{PurchaseOrderLineItem, VariationCombination};

#[derive(Parser, Debug)]
#[command(author, version, about = "Academia Veiga catalog and purchasing tools")]
pub struct Cli {
    /// Log filter, e.g. "info" or "veiga_store=debug"
    #[arg(long, global = true, default_value = "warn", value_parser = parse_log_filter)]
    pub log_level: String,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate every variation for the selected attributes of a product
    Variations {
        /// JSON variation request; a sample T-shirt catalog is used when omitted
        input: Option<PathBuf>,

        /// Ask for confirmation above this many combinations
        #[arg(long, default_value_t = DEFAULT_CONFIRM_THRESHOLD)]
        confirm_threshold: usize,

        /// Create even when the confirmation threshold is exceeded
        #[arg(long)]
        yes: bool,

        #[arg(long)]
        sku_prefix: Option<String>,
    },
    /// Allocate shipping across the lines of a supplier purchase order
    Allocate {
        /// JSON purchase order; a sample order is used when omitted
        input: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Input document for `variations`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VariationRequest {
    #[serde(default)]
    pub sku_prefix: String,
    pub catalog: Catalog,
    /// Attribute ids, in the order they should combine
    pub selected_attributes: Vec<i64>,
    /// Variations the product already has
    #[serde(default)]
    pub existing: Vec<VariationCombination>,
}

/// Input document for `allocate`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PurchaseOrderRequest {
    pub items: Vec<PurchaseOrderLineItem>,
    #[serde(default)]
    pub shipping_cost: Decimal,
}

fn parse_log_filter(raw: &str) -> Result<String, String> {
    EnvFilter::try_new(raw)
        .map(|_| raw.to_string())
        .map_err(|e| format!("invalid log filter '{raw}': {e}"))
}

/// `level` is expected to have passed `parse_log_filter`
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|e| {
        eprintln!("invalid log filter '{level}' ({e}), falling back to warn");
        EnvFilter::new("warn")
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
