//! Bulk variation creation policy.
//! Decides whether a selection is worth generating and filters out
//! variations a product already has.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::models::{AttributeValues, VariationCombination};
use crate::variations::{combination_count, generate_combinations};

/// Above this many combinations the operator is asked to confirm
pub const DEFAULT_CONFIRM_THRESHOLD: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkPolicy {
    pub confirm_threshold: usize,
}

impl Default for BulkPolicy {
    fn default() -> Self {
        BulkPolicy {
            confirm_threshold: DEFAULT_CONFIRM_THRESHOLD,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BulkAssessment {
    /// No attributes selected, or one of them has no values
    NothingToCreate,
    Ready { count: usize },
    /// `count` saturates at `usize::MAX` when the product overflows
    NeedsConfirmation { count: usize },
}

impl BulkPolicy {
    pub fn assess(&self, lists: &[AttributeValues]) -> BulkAssessment {
        match combination_count(lists) {
            Some(0) => BulkAssessment::NothingToCreate,
            Some(count) if count <= self.confirm_threshold => BulkAssessment::Ready { count },
            Some(count) => BulkAssessment::NeedsConfirmation { count },
            None => BulkAssessment::NeedsConfirmation { count: usize::MAX },
        }
    }
}

/// What a bulk-creation request resolves to
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BulkOutcome {
    NothingToCreate,
    /// Above the threshold and not confirmed; nothing was generated
    Refused { count: usize },
    /// `combinations` is empty when the product already has all of them
    Created {
        combinations: Vec<VariationCombination>,
        /// Generated combinations dropped because the product already has them
        skipped: usize,
    },
}

/// Assess the selection, refuse it above the threshold unless `confirmed`,
/// otherwise generate and drop the variations the product already has.
pub fn plan_variations(
    policy: &BulkPolicy,
    lists: &[AttributeValues],
    existing: &[VariationCombination],
    confirmed: bool,
) -> Result<BulkOutcome> {
    match policy.assess(lists) {
        BulkAssessment::NothingToCreate => return Ok(BulkOutcome::NothingToCreate),
        BulkAssessment::NeedsConfirmation { count } if !confirmed => {
            info!(count, threshold = policy.confirm_threshold, "bulk creation needs confirmation");
            return Ok(BulkOutcome::Refused { count });
        }
        _ => {}
    }

    let generated = generate_combinations(lists)?;
    let total = generated.len();
    let combinations = new_combinations(generated, existing);
    let skipped = total - combinations.len();
    info!(generated = total, skipped, "variations ready");

    Ok(BulkOutcome::Created {
        combinations,
        skipped,
    })
}

/// Drop generated combinations the product already has, keeping generator order
pub fn new_combinations(
    generated: Vec<VariationCombination>,
    existing: &[VariationCombination],
) -> Vec<VariationCombination> {
    let existing: HashSet<String> = existing.iter().map(|c| c.canonical_key()).collect();
    generated
        .into_iter()
        .filter(|c| !existing.contains(&c.canonical_key()))
        .collect()
}
