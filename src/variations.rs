//! Variation combination generator.
//! Enumerates every assignment of one value to each selected attribute.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{AttributeValues, VariationCombination};
use crate::validation::validate_unique_attributes;

/// Number of combinations `generate_combinations` would produce.
/// Returns `None` if the product overflows `usize`.
pub fn combination_count(lists: &[AttributeValues]) -> Option<usize> {
    if lists.is_empty() {
        return Some(0);
    }
    lists
        .iter()
        .try_fold(1usize, |acc, list| acc.checked_mul(distinct_values(list).len()))
}

/// Generate the cartesian product of the attribute value lists.
///
/// Order is odometer order: the last attribute varies fastest, matching a
/// nested loop over the attributes in input order. No attributes, or any
/// attribute without values, yields an empty list. A value repeated within
/// one attribute is only used once.
pub fn generate_combinations(lists: &[AttributeValues]) -> Result<Vec<VariationCombination>> {
    validate_unique_attributes(lists)?;

    let axes: Vec<(&str, Vec<&str>)> = lists
        .iter()
        .map(|list| (list.name.as_str(), distinct_values(list)))
        .collect();

    let total = combination_count(lists)
        .ok_or_else(|| Error::invalid("attributes", "number of combinations overflows"))?;

    if total == 0 {
        debug!(attributes = lists.len(), "nothing to combine");
        return Ok(Vec::new());
    }

    let mut combinations: Vec<VariationCombination> = Vec::new();
    combinations.try_reserve(total).map_err(|e| {
        Error::invalid("attributes", format!("cannot hold {total} combinations: {e}"))
    })?;
    let mut indices = vec![0usize; axes.len()];

    loop {
        combinations.push(
            axes.iter()
                .zip(&indices)
                .map(|((name, values), &i)| (*name, values[i]))
                .collect(),
        );

        // Advance the odometer from the last position, carrying leftwards
        let mut position = axes.len();
        loop {
            if position == 0 {
                debug!(attributes = axes.len(), combinations = combinations.len(), "generated combinations");
                return Ok(combinations);
            }
            position -= 1;
            indices[position] += 1;
            if indices[position] < axes[position].1.len() {
                break;
            }
            indices[position] = 0;
        }
    }
}

fn distinct_values(list: &AttributeValues) -> Vec<&str> {
    let mut seen = HashSet::with_capacity(list.values.len());
    list.values
        .iter()
        .map(String::as_str)
        .filter(|value| seen.insert(*value))
        .collect()
}
