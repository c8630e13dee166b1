//! Purchase order cost allocation.
//! Spreads one shipping charge across line items in proportion to each item's
//! share of the pre-shipping subtotal, then derives real unit and line costs.
//! Amounts keep full decimal precision; currency rounding happens at display time.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{CostAllocation, PurchaseOrderLineItem, PurchaseOrderSummary};
use crate::validation::{validate_line_items, validate_shipping_cost};

/// Allocate `shipping` across `items`, returning one result per item in input order.
///
/// When the subtotal is zero (every item free, or no items) each share is zero.
pub fn allocate_shipping(
    items: &[PurchaseOrderLineItem],
    shipping: Decimal,
) -> Result<Vec<CostAllocation>> {
    validate_line_items(items)?;
    validate_shipping_cost(shipping)?;

    let line_totals = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.line_total()
                .ok_or_else(|| overflow(format!("line_items[{index}]")))
        })
        .collect::<Result<Vec<_>>>()?;

    let subtotal = checked_sum(&line_totals).ok_or_else(|| overflow("subtotal"))?;

    debug!(items = items.len(), subtotal = %subtotal, shipping = %shipping, "allocating shipping");

    items
        .iter()
        .zip(&line_totals)
        .enumerate()
        .map(|(index, (item, &line_total))| -> Result<CostAllocation> {
            let allocated_share = if subtotal.is_zero() {
                Decimal::ZERO
            } else {
                // Multiply before dividing so exact ratios stay exact
                line_total
                    .checked_mul(shipping)
                    .and_then(|scaled| scaled.checked_div(subtotal))
                    .ok_or_else(|| overflow(format!("line_items[{index}]")))?
            };

            // quantity >= 1 was validated above
            let quantity = Decimal::from(item.quantity);
            let freight_per_unit = allocated_share
                .checked_div(quantity)
                .ok_or_else(|| overflow(format!("line_items[{index}]")))?;

            let real_unit_cost = item
                .unit_price
                .checked_add(freight_per_unit)
                .ok_or_else(|| overflow(format!("line_items[{index}].unit_price")))?;

            let real_line_total = line_total
                .checked_add(allocated_share)
                .ok_or_else(|| overflow(format!("line_items[{index}]")))?;

            Ok(CostAllocation {
                allocated_share,
                freight_per_unit,
                real_unit_cost,
                real_line_total,
            })
        })
        .collect()
}

/// Order totals for a computed allocation
pub fn summarize(
    items: &[PurchaseOrderLineItem],
    shipping: Decimal,
    allocations: &[CostAllocation],
) -> Result<PurchaseOrderSummary> {
    let line_totals = items
        .iter()
        .map(PurchaseOrderLineItem::line_total)
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| overflow("subtotal"))?;

    let subtotal = checked_sum(&line_totals).ok_or_else(|| overflow("subtotal"))?;
    let total = subtotal
        .checked_add(shipping)
        .ok_or_else(|| overflow("total"))?;

    let shares: Vec<Decimal> = allocations.iter().map(|a| a.allocated_share).collect();
    let allocated = checked_sum(&shares).ok_or_else(|| overflow("allocated"))?;

    Ok(PurchaseOrderSummary {
        subtotal,
        shipping,
        total,
        allocated,
    })
}

fn checked_sum(amounts: &[Decimal]) -> Option<Decimal> {
    amounts
        .iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(*amount))
}

fn overflow(field: impl Into<String>) -> Error {
    Error::invalid(field, "amount is too large")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{thread_rng, Rng};
    use rand_distr::{Distribution, Normal};
    use rust_decimal_macros::dec;

    #[test]
    fn test_shipping_split_by_subtotal_share() {
        let items = vec![
            PurchaseOrderLineItem::new(2, dec!(10)),
            PurchaseOrderLineItem::new(1, dec!(30)),
        ];
        let allocations = allocate_shipping(&items, dec!(15)).unwrap();

        assert_eq!(allocations[0].allocated_share, dec!(6));
        assert_eq!(allocations[1].allocated_share, dec!(9));
        assert_eq!(
            allocations[0].allocated_share + allocations[1].allocated_share,
            dec!(15)
        );

        assert_eq!(allocations[0].freight_per_unit, dec!(3));
        assert_eq!(allocations[0].real_unit_cost, dec!(13));
        assert_eq!(allocations[0].real_line_total, dec!(26));

        assert_eq!(allocations[1].freight_per_unit, dec!(9));
        assert_eq!(allocations[1].real_unit_cost, dec!(39));
        assert_eq!(allocations[1].real_line_total, dec!(39));
    }

    #[test]
    fn test_zero_subtotal_allocates_nothing() {
        let items = vec![PurchaseOrderLineItem::new(1, dec!(0))];
        let allocations = allocate_shipping(&items, dec!(10)).unwrap();

        assert_eq!(allocations.len(), 1);
        assert_eq!(allocations[0].allocated_share, Decimal::ZERO);
        assert_eq!(allocations[0].freight_per_unit, Decimal::ZERO);
        assert_eq!(allocations[0].real_unit_cost, Decimal::ZERO);
        assert_eq!(allocations[0].real_line_total, Decimal::ZERO);
    }

    #[test]
    fn test_empty_order() {
        assert!(allocate_shipping(&[], dec!(25)).unwrap().is_empty());
    }

    #[test]
    fn test_free_item_gets_no_freight() {
        let items = vec![
            PurchaseOrderLineItem::new(5, dec!(0)),
            PurchaseOrderLineItem::new(2, dec!(40)),
        ];
        let allocations = allocate_shipping(&items, dec!(12)).unwrap();

        assert_eq!(allocations[0].allocated_share, Decimal::ZERO);
        assert_eq!(allocations[1].allocated_share, dec!(12));
        assert_eq!(allocations[1].real_unit_cost, dec!(46));
    }

    #[test]
    fn test_negative_inputs_rejected() {
        let bad_quantity = vec![PurchaseOrderLineItem::new(-1, dec!(5))];
        assert!(matches!(
            allocate_shipping(&bad_quantity, dec!(10)),
            Err(Error::InvalidInput { .. })
        ));

        let bad_price = vec![PurchaseOrderLineItem::new(1, dec!(-5))];
        assert!(allocate_shipping(&bad_price, dec!(10)).is_err());

        let ok = vec![PurchaseOrderLineItem::new(1, dec!(5))];
        assert!(allocate_shipping(&ok, dec!(-10)).is_err());
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let items = vec![PurchaseOrderLineItem::new(0, dec!(5))];
        assert!(allocate_shipping(&items, dec!(10)).is_err());
    }

    #[test]
    fn test_overflow_reported_as_invalid_input() {
        let items = vec![PurchaseOrderLineItem::new(i64::MAX, Decimal::MAX)];
        assert!(matches!(
            allocate_shipping(&items, dec!(1)),
            Err(Error::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_allocation_is_repeatable() {
        let items = vec![
            PurchaseOrderLineItem::new(3, dec!(19.90)),
            PurchaseOrderLineItem::new(7, dec!(4.35)),
        ];
        assert_eq!(
            allocate_shipping(&items, dec!(22.50)).unwrap(),
            allocate_shipping(&items, dec!(22.50)).unwrap()
        );
    }

    #[test]
    fn test_summary() {
        let items = vec![
            PurchaseOrderLineItem::new(2, dec!(10)),
            PurchaseOrderLineItem::new(1, dec!(30)),
        ];
        let allocations = allocate_shipping(&items, dec!(15)).unwrap();
        let summary = summarize(&items, dec!(15), &allocations).unwrap();

        assert_eq!(summary.subtotal, dec!(50));
        assert_eq!(summary.shipping, dec!(15));
        assert_eq!(summary.total, dec!(65));
        assert_eq!(summary.allocated, dec!(15));
    }

    #[test]
    fn test_random_orders_allocate_full_shipping() {
        let mut rng = thread_rng();
        let price = Normal::new(45.0, 20.0).unwrap();
        let tolerance = dec!(0.000000000000000001);

        for _ in 0..100 {
            let items: Vec<PurchaseOrderLineItem> = (0..rng.gen_range(1..=8))
                .map(|_| {
                    let sampled: f64 = price.sample(&mut rng);
                    let sampled = sampled.max(0.01);
                    let unit_price = Decimal::from_f64_retain(sampled).unwrap().round_dp(2);
                    PurchaseOrderLineItem::new(rng.gen_range(1..=20), unit_price)
                })
                .collect();
            let shipping = Decimal::from(rng.gen_range(0..=500i64)) / dec!(10);

            let allocations = allocate_shipping(&items, shipping).unwrap();
            let allocated: Decimal = allocations.iter().map(|a| a.allocated_share).sum();

            assert_eq!(allocations.len(), items.len());
            assert!((allocated - shipping).abs() <= tolerance);
            assert!(allocations.iter().all(|a| a.allocated_share >= Decimal::ZERO));
        }
    }
}
