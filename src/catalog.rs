//! Catalog records feeding the variation generator.
//!
//! Attributes and their values come from the product catalog store; this
//! module turns a selection of attributes into ordered generator input and
//! names the resulting variations.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{Attribute, AttributeValue, AttributeValues, VariationCombination};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub attributes: Vec<Attribute>,
    pub values: Vec<AttributeValue>,
}

impl Catalog {
    pub fn new(attributes: Vec<Attribute>, values: Vec<AttributeValue>) -> Self {
        Catalog { attributes, values }
    }

    pub fn attribute(&self, id: i64) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.id == id)
    }

    pub fn attribute_by_name(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Active values of an attribute, sorted by sort order then raw value
    pub fn active_values(&self, attribute_id: i64) -> Vec<&AttributeValue> {
        let mut values: Vec<&AttributeValue> = self
            .values
            .iter()
            .filter(|v| v.attribute_id == attribute_id && v.active)
            .collect();
        values.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.value.cmp(&b.value))
        });
        values
    }

    /// Build generator input for the selected attributes, in selection order.
    ///
    /// An attribute with no active values contributes an empty list, which
    /// makes the generated set empty.
    pub fn value_lists(&self, selected: &[i64]) -> Result<Vec<AttributeValues>> {
        let mut seen = HashSet::with_capacity(selected.len());
        let mut lists = Vec::with_capacity(selected.len());

        for &id in selected {
            if !seen.insert(id) {
                warn!(attribute_id = id, "attribute selected twice");
                return Err(Error::invalid(
                    "selected_attributes",
                    format!("attribute {id} is selected more than once"),
                ));
            }

            let attribute = self.attribute(id).ok_or_else(|| {
                Error::invalid("selected_attributes", format!("unknown attribute {id}"))
            })?;

            let values: Vec<String> = self
                .active_values(id)
                .into_iter()
                .map(|v| v.value.clone())
                .collect();

            if values.is_empty() {
                debug!(attribute = %attribute.name, "attribute has no active values");
            }

            lists.push(AttributeValues {
                name: attribute.name.clone(),
                values,
            });
        }

        Ok(lists)
    }

    /// Human title using value labels where the catalog has them
    pub fn describe(&self, combination: &VariationCombination) -> String {
        combination
            .iter()
            .map(|(name, raw)| self.label_for(name, raw).unwrap_or(raw).to_string())
            .collect::<Vec<_>>()
            .join(" / ")
    }

    fn label_for(&self, attribute_name: &str, raw: &str) -> Option<&str> {
        let attribute = self.attribute_by_name(attribute_name)?;
        self.values
            .iter()
            .find(|v| v.attribute_id == attribute.id && v.value == raw)
            .map(AttributeValue::display)
    }
}

/// SKU for a variation: prefix and values upper-cased, non-alphanumerics
/// dropped, joined with '-'. Empty segments are skipped.
///
/// Values differing only in punctuation or spacing ("verde limão",
/// "verde-limão") map to the same SKU; see [`duplicate_skus`].
pub fn sku_for(prefix: &str, combination: &VariationCombination) -> String {
    std::iter::once(prefix)
        .chain(combination.values())
        .map(sku_segment)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// SKUs produced by more than one of `combinations`, in first-seen order
pub fn duplicate_skus(prefix: &str, combinations: &[VariationCombination]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(combinations.len());
    let mut duplicates = Vec::new();
    for combination in combinations {
        let sku = sku_for(prefix, combination);
        if !seen.insert(sku.clone()) && !duplicates.contains(&sku) {
            warn!(sku = %sku, "SKU collision between variations");
            duplicates.push(sku);
        }
    }
    duplicates
}

fn sku_segment(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_uppercase)
        .collect()
}
