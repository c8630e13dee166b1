//! Precondition checks shared by the generator and the cost allocator.
//! Both fail fast on bad numbers rather than producing negative or undefined costs.

use std::collections::HashSet;

use rust_decimal::Decimal;
use tracing::warn;

use crate::error::{Error, Result};
use crate::models::{AttributeValues, PurchaseOrderLineItem};

/// Rejects zero or negative quantities and negative unit prices
pub fn validate_line_items(items: &[PurchaseOrderLineItem]) -> Result<()> {
    for (index, item) in items.iter().enumerate() {
        if item.quantity <= 0 {
            warn!(index, quantity = item.quantity, "rejecting line item quantity");
            return Err(Error::invalid(
                format!("line_items[{index}].quantity"),
                format!("must be at least 1, got {}", item.quantity),
            ));
        }

        if item.unit_price < Decimal::ZERO {
            warn!(index, unit_price = %item.unit_price, "rejecting line item price");
            return Err(Error::invalid(
                format!("line_items[{index}].unit_price"),
                format!("must not be negative, got {}", item.unit_price),
            ));
        }
    }

    Ok(())
}

pub fn validate_shipping_cost(shipping: Decimal) -> Result<()> {
    if shipping < Decimal::ZERO {
        warn!(shipping = %shipping, "rejecting shipping cost");
        return Err(Error::invalid(
            "shipping_cost",
            format!("must not be negative, got {shipping}"),
        ));
    }
    Ok(())
}

/// An attribute listed twice makes the combination keys ambiguous
pub fn validate_unique_attributes(lists: &[AttributeValues]) -> Result<()> {
    let mut seen = HashSet::with_capacity(lists.len());
    for list in lists {
        if !seen.insert(list.name.as_str()) {
            warn!(attribute = %list.name, "duplicate attribute in selection");
            return Err(Error::invalid(
                "attributes",
                format!("attribute '{}' is selected more than once", list.name),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rejects_negative_quantity() {
        let items = vec![PurchaseOrderLineItem::new(-1, dec!(5))];
        let err = validate_line_items(&items).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { ref field, .. } if field == "line_items[0].quantity"));
    }

    #[test]
    fn test_rejects_zero_quantity() {
        let items = vec![
            PurchaseOrderLineItem::new(2, dec!(5)),
            PurchaseOrderLineItem::new(0, dec!(5)),
        ];
        let err = validate_line_items(&items).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { ref field, .. } if field == "line_items[1].quantity"));
    }

    #[test]
    fn test_rejects_negative_price_but_accepts_free_items() {
        assert!(validate_line_items(&[PurchaseOrderLineItem::new(1, dec!(0))]).is_ok());
        assert!(validate_line_items(&[PurchaseOrderLineItem::new(1, dec!(-0.01))]).is_err());
    }

    #[test]
    fn test_shipping_cost() {
        assert!(validate_shipping_cost(dec!(0)).is_ok());
        assert!(validate_shipping_cost(dec!(15.90)).is_ok());
        assert!(validate_shipping_cost(dec!(-1)).is_err());
    }

    #[test]
    fn test_duplicate_attributes() {
        let lists = vec![
            AttributeValues::new("size", ["P"]),
            AttributeValues::new("color", ["Red"]),
            AttributeValues::new("size", ["M"]),
        ];
        let err = validate_unique_attributes(&lists).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid attributes: attribute 'size' is selected more than once"
        );
    }
}
