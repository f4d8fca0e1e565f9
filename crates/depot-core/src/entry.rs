//! The inventory entry record consumed by the accounting engine.

use serde::{Deserialize, Serialize};

/// A single logged inventory entry.
///
/// Owned by the entry store. `category` and `chiller` are raw strings as
/// stored; the engine classifies them leniently so malformed historical rows
/// skip an axis instead of failing the whole operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub id: String,
    pub category: String,
    /// Chiller assignment, absent for goats.
    pub chiller: Option<String>,
    /// Animal count. Stored as f64: proportional loadouts produce fractional
    /// shares and the ledger carries them through.
    pub total: f64,
    pub kilograms: f64,
    /// RFC 3339 UTC timestamp with millisecond precision.
    pub created_at: String,
    #[serde(default)]
    pub loaded_out: bool,
    #[serde(default)]
    pub paid: bool,
    pub worker_name: Option<String>,
    pub shooter_name: Option<String>,
}
