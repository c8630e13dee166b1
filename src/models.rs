use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A named axis of variation for catalog products (e.g. "size")
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub sort_order: i32,
}

/// One permissible value of an attribute (e.g. "M" for "size")
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub id: i64,
    pub attribute_id: i64,
    /// Raw value, also used as the lookup key
    pub value: String,
    pub label: Option<String>,
    /// Swatch as a hex/RGB string
    pub color: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    /// Soft-deleted values are kept with `active = false`
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl AttributeValue {
    pub fn display(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.value)
    }
}

/// Generator input: one attribute name and its permitted values, in order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValues {
    pub name: String,
    pub values: Vec<String>,
}

impl AttributeValues {
    pub fn new<S: Into<String>>(name: impl Into<String>, values: impl IntoIterator<Item = S>) -> Self {
        AttributeValues {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// One complete assignment of a value to each selected attribute.
///
/// Keeps the attribute order it was built with, so titles and SKUs read in
/// the same order the attributes were selected. Equality ignores that order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariationCombination {
    values: IndexMap<String, String>,
}

impl VariationCombination {
    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.values.get(attribute).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.values.values().map(String::as_str)
    }

    /// Raw values joined in attribute order, e.g. "M / Blue"
    pub fn title(&self) -> String {
        self.values().collect::<Vec<_>>().join(" / ")
    }

    /// Sorted-key serialization, identical for equal combinations
    pub fn canonical_key(&self) -> String {
        let mut pairs: Vec<_> = self.iter().collect();
        pairs.sort_unstable();
        pairs
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VariationCombination {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        VariationCombination {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// One entry of a supplier purchase order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrderLineItem {
    #[serde(default)]
    pub description: Option<String>,
    pub quantity: i64,
    pub unit_price: Decimal,
}

impl PurchaseOrderLineItem {
    pub fn new(quantity: i64, unit_price: Decimal) -> Self {
        PurchaseOrderLineItem {
            description: None,
            quantity,
            unit_price,
        }
    }

    /// quantity × unit price; `None` on overflow
    pub fn line_total(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.unit_price)
    }
}

/// Freight share and real costs for one line item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostAllocation {
    pub allocated_share: Decimal,
    pub freight_per_unit: Decimal,
    pub real_unit_cost: Decimal,
    pub real_line_total: Decimal,
}

/// Order-level totals shown before a purchase order is submitted
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrderSummary {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
    /// Sum of allocated shares; equals `shipping` unless the subtotal is zero
    pub allocated: Decimal,
}
