//! Reporting and output formatting module
//! Handles console output; currency rounding happens only here

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::bulk::{BulkAssessment, BulkPolicy};
use crate::catalog::{duplicate_skus, sku_for, Catalog};
use crate::models::{CostAllocation, PurchaseOrderLineItem, PurchaseOrderSummary, VariationCombination};

/// Format an amount as Brazilian reais, e.g. `R$ 1.234,56`
pub fn format_brl(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{sign}R$ {grouped},{cents}")
}

pub fn to_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

fn display_banner(title: &str) {
    println!("╔══════════════════════════════════════════════════════════════════════════════╗");
    println!("║ {:<76} ║", title);
    println!("╚══════════════════════════════════════════════════════════════════════════════╝\n");
}

/// Message describing the bulk-creation decision for the current selection
pub fn assessment_message(assessment: &BulkAssessment, policy: &BulkPolicy, confirmed: bool) -> String {
    match assessment {
        BulkAssessment::NothingToCreate => {
            "No values available to combine. Nothing will be created.".to_string()
        }
        BulkAssessment::Ready { count } => format!("{} combinations ready to create.", count),
        BulkAssessment::NeedsConfirmation { count } => {
            let size = if *count == usize::MAX {
                "Too many combinations to count".to_string()
            } else {
                format!("{} combinations", count)
            };
            if confirmed {
                format!(
                    "{} exceed the limit of {}; creating them as confirmed.",
                    size, policy.confirm_threshold
                )
            } else {
                format!(
                    "{} exceed the limit of {}. Re-run with --yes to create them anyway.",
                    size, policy.confirm_threshold
                )
            }
        }
    }
}

pub fn display_assessment(assessment: &BulkAssessment, policy: &BulkPolicy, confirmed: bool) {
    println!("{}", assessment_message(assessment, policy, confirmed));
}

/// Display generated variations with their titles and SKUs
pub fn display_variations(
    catalog: &Catalog,
    combinations: &[VariationCombination],
    skipped: usize,
    sku_prefix: &str,
) {
    display_banner("PRODUCT VARIATIONS");

    for (i, combination) in combinations.iter().enumerate() {
        println!(
            "{:>4}. {:<40} {}",
            i + 1,
            catalog.describe(combination),
            sku_for(sku_prefix, combination)
        );
    }

    if combinations.is_empty() {
        println!("No new combinations to create.");
    } else {
        println!("\n{} variations.", combinations.len());
    }
    if skipped > 0 {
        println!("{} already exist on the product and were skipped.", skipped);
    }
    for sku in duplicate_skus(sku_prefix, combinations) {
        println!("Warning: SKU {} is shared by more than one variation.", sku);
    }
}

/// One row of the allocation table
pub fn format_allocation_row(
    index: usize,
    item: &PurchaseOrderLineItem,
    allocation: &CostAllocation,
) -> String {
    let description = item
        .description
        .clone()
        .unwrap_or_else(|| format!("Item {}", index + 1));

    format!(
        "{:<24} {:>5} x {:>12} | freight {:>12} ({:>10}/un) | real {:>12}/un {:>14}",
        description,
        item.quantity,
        format_brl(item.unit_price),
        format_brl(allocation.allocated_share),
        format_brl(allocation.freight_per_unit),
        format_brl(allocation.real_unit_cost),
        format_brl(allocation.real_line_total),
    )
}

/// Display the freight allocation table and order totals
pub fn display_allocation(
    items: &[PurchaseOrderLineItem],
    allocations: &[CostAllocation],
    summary: &PurchaseOrderSummary,
) {
    display_banner("PURCHASE ORDER - FREIGHT ALLOCATION");

    for (i, (item, allocation)) in items.iter().zip(allocations).enumerate() {
        println!("{}", format_allocation_row(i, item, allocation));
    }

    println!("\nSubtotal:  {}", format_brl(summary.subtotal));
    println!("Shipping:  {}", format_brl(summary.shipping));
    println!("Total:     {}", format_brl(summary.total));
    if summary.allocated.is_zero() && !summary.shipping.is_zero() {
        println!("\nSubtotal is zero: shipping was not allocated to any item.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(dec!(0)), "R$ 0,00");
        assert_eq!(format_brl(dec!(13)), "R$ 13,00");
        assert_eq!(format_brl(dec!(999.999)), "R$ 1.000,00");
        assert_eq!(format_brl(dec!(1234567.891)), "R$ 1.234.567,89");
        assert_eq!(format_brl(dec!(-45.5)), "-R$ 45,50");
    }

    #[test]
    fn test_rounding_is_midpoint_away_from_zero() {
        assert_eq!(format_brl(dec!(2.345)), "R$ 2,35");
        assert_eq!(format_brl(dec!(2.335)), "R$ 2,34");
        assert_eq!(format_brl(dec!(-0.001)), "R$ 0,00");
    }

    #[test]
    fn test_confirmation_hint_only_when_not_confirmed() {
        let policy = BulkPolicy { confirm_threshold: 50 };
        let assessment = BulkAssessment::NeedsConfirmation { count: 60 };

        let refused = assessment_message(&assessment, &policy, false);
        assert!(refused.starts_with("60 combinations exceed the limit of 50"));
        assert!(refused.contains("--yes"));

        let confirmed = assessment_message(&assessment, &policy, true);
        assert!(confirmed.contains("creating them as confirmed"));
        assert!(!confirmed.contains("--yes"));
    }

    #[test]
    fn test_allocation_row() {
        let item = PurchaseOrderLineItem {
            description: Some("Whey 900g".to_string()),
            quantity: 2,
            unit_price: dec!(10),
        };
        let allocation = CostAllocation {
            allocated_share: dec!(6),
            freight_per_unit: dec!(3),
            real_unit_cost: dec!(13),
            real_line_total: dec!(26),
        };

        let row = format_allocation_row(0, &item, &allocation);
        assert!(row.starts_with("Whey 900g"));
        assert!(row.contains("R$ 13,00/un"));
        assert!(row.ends_with("R$ 26,00"));
    }
}
