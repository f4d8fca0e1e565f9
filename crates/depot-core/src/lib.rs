//! Core domain logic for the depot inventory tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Classification: categories, species, and chiller identifiers
//! - Ledger: the persisted aggregate totals snapshot and its arithmetic
//! - Loadout planning: proportional removal shares derived from entries

mod category;
mod chiller;
mod entry;
mod error;
mod ledger;

pub use category::{Category, Species, is_goats};
pub use chiller::ChillerId;
pub use entry::InventoryEntry;
pub use error::ValidationError;
pub use ledger::{
    Bucket, ChillerTotals, KangarooBreakdown, LoadoutPlan, TotalsLedger, average_item_weight,
    plan_partial_loadout, species_totals,
};
