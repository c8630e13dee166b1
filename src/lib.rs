//! Catalog and purchasing core for the Academia Veiga store.
//!
//! Two pure computations sit at the center:
//! - [`variations::generate_combinations`] builds every size × color × ...
//!   assignment used to bulk-create product variations.
//! - [`allocation::allocate_shipping`] spreads a supplier order's shipping
//!   charge across its lines and derives the real cost of each unit.
//!
//! The remaining modules prepare their input from catalog records, apply the
//! bulk-creation policy, and present results.

pub mod allocation;
pub mod bulk;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod reporting;
pub mod validation;
pub mod variations;

pub use allocation::{allocate_shipping, summarize};
pub use error::{Error, Result};
pub use variations::{combination_count, generate_combinations};
