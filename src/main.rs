use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

use veiga_store::bulk::{plan_variations, BulkOutcome, BulkPolicy};
use veiga_store::catalog::{duplicate_skus, sku_for, Catalog};
use veiga_store::config::{init_tracing, Cli, Command, OutputFormat, PurchaseOrderRequest, VariationRequest};
use veiga_store::models::{Attribute, AttributeValue, PurchaseOrderLineItem};
use veiga_store::reporting::{display_allocation, display_assessment, display_variations, to_json};
use veiga_store::{allocate_shipping, summarize};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Command::Variations {
            input,
            confirm_threshold,
            yes,
            sku_prefix,
        } => {
            let mut request = match input {
                Some(path) => load(&path)?,
                None => sample_variation_request(),
            };
            if let Some(prefix) = sku_prefix {
                request.sku_prefix = prefix;
            }
            let policy = BulkPolicy { confirm_threshold };
            run_variations(&request, &policy, yes, cli.format)
        }
        Command::Allocate { input } => {
            let request = match input {
                Some(path) => load(&path)?,
                None => sample_purchase_order(),
            };
            run_allocation(&request, cli.format)
        }
    }
}

fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

fn run_variations(
    request: &VariationRequest,
    policy: &BulkPolicy,
    confirmed: bool,
    format: OutputFormat,
) -> Result<()> {
    let lists = request.catalog.value_lists(&request.selected_attributes)?;

    if format == OutputFormat::Text {
        display_assessment(&policy.assess(&lists), policy, confirmed);
    }

    let (combinations, skipped) = match plan_variations(policy, &lists, &request.existing, confirmed)? {
        BulkOutcome::NothingToCreate => {
            if format == OutputFormat::Json {
                println!("[]");
            }
            return Ok(());
        }
        BulkOutcome::Refused { count } => {
            bail!("{count} combinations need confirmation (threshold {})", policy.confirm_threshold);
        }
        BulkOutcome::Created {
            combinations,
            skipped,
        } => (combinations, skipped),
    };

    match format {
        OutputFormat::Text => {
            display_variations(&request.catalog, &combinations, skipped, &request.sku_prefix);
        }
        OutputFormat::Json => {
            // Collisions are logged as warnings
            duplicate_skus(&request.sku_prefix, &combinations);
            let rows: Vec<serde_json::Value> = combinations
                .iter()
                .map(|c| {
                    serde_json::json!({
                        "title": request.catalog.describe(c),
                        "sku": sku_for(&request.sku_prefix, c),
                        "attributes": c,
                    })
                })
                .collect();
            println!("{}", to_json(&rows)?);
        }
    }

    Ok(())
}

fn run_allocation(request: &PurchaseOrderRequest, format: OutputFormat) -> Result<()> {
    let allocations = allocate_shipping(&request.items, request.shipping_cost)?;
    let summary = summarize(&request.items, request.shipping_cost, &allocations)?;

    match format {
        OutputFormat::Text => {
            if request.items.is_empty() {
                println!("The purchase order has no items.");
                return Ok(());
            }
            display_allocation(&request.items, &allocations, &summary);
        }
        OutputFormat::Json => {
            let document = serde_json::json!({
                "allocations": allocations,
                "summary": summary,
            });
            println!("{}", to_json(&document)?);
        }
    }

    Ok(())
}

fn sample_variation_request() -> VariationRequest {
    let attributes = vec![
        Attribute {
            id: 1,
            name: "size".to_string(),
            display_name: "Tamanho".to_string(),
            sort_order: 0,
        },
        Attribute {
            id: 2,
            name: "color".to_string(),
            display_name: "Cor".to_string(),
            sort_order: 1,
        },
    ];

    let value = |id, attribute_id, raw: &str, label: &str, color: Option<&str>, sort_order| AttributeValue {
        id,
        attribute_id,
        value: raw.to_string(),
        label: Some(label.to_string()),
        color: color.map(str::to_string),
        sort_order,
        active: true,
    };

    let values = vec![
        value(1, 1, "P", "Pequeno", None, 0),
        value(2, 1, "M", "Médio", None, 1),
        value(3, 1, "G", "Grande", None, 2),
        value(4, 2, "preto", "Preto", Some("#000000"), 0),
        value(5, 2, "vermelho", "Vermelho", Some("#dc2626"), 1),
    ];

    VariationRequest {
        sku_prefix: "CAM".to_string(),
        catalog: Catalog::new(attributes, values),
        selected_attributes: vec![1, 2],
        existing: Vec::new(),
    }
}

fn sample_purchase_order() -> PurchaseOrderRequest {
    let item = |description: &str, quantity, unit_price: Decimal| PurchaseOrderLineItem {
        description: Some(description.to_string()),
        quantity,
        unit_price,
    };

    PurchaseOrderRequest {
        items: vec![
            item("Camiseta dry fit", 2, Decimal::new(10, 0)),
            item("Garrafa 1L", 1, Decimal::new(30, 0)),
        ],
        shipping_cost: Decimal::new(15, 0),
    }
}
