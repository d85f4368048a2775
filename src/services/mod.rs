//! Business logic services.
//!
//! Pure projections (aggregation, search, overview) live beside the async
//! workflows that load their inputs from the store.

pub mod aggregator;
pub mod approvals;
pub mod assessments;
pub mod assignments;
pub mod overview;
pub mod remarks;
pub mod search;

pub use aggregator::{VisibleSet, load_visible_set};
