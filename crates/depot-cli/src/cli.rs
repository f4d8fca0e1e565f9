//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use depot_core::{Category, ChillerId};

/// Inventory tracker for a wild-game processing depot.
///
/// Logs animal counts and weights by category and chiller, and maintains the
/// persisted stored-totals snapshot used for dashboards and shooter payments.
#[derive(Debug, Parser)]
#[command(name = "depot", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log a new inventory entry and add it to the stored totals.
    Add {
        /// Animal category (Red, Eastern Grey, Western Grey, Goats).
        #[arg(long)]
        category: Category,

        /// Chiller number (1-4); required for non-goat categories.
        #[arg(long)]
        chiller: Option<ChillerId>,

        /// Animal count.
        #[arg(long)]
        total: f64,

        /// Total weight in kilograms.
        #[arg(long)]
        kilograms: f64,

        /// Worker who logged the entry.
        #[arg(long)]
        worker: Option<String>,

        /// Shooter the entry is attributed to.
        #[arg(long)]
        shooter: Option<String>,
    },

    /// Delete an entry and subtract it from the stored totals.
    Delete {
        /// The entry ID.
        id: String,
    },

    /// List inventory entries.
    Entries {
        /// Only entries in this chiller.
        #[arg(long)]
        chiller: Option<ChillerId>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the stored totals.
    Status {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Reset stored totals; entry rows are preserved.
    Reset {
        #[command(subcommand)]
        target: ResetTarget,
    },

    /// Load out stock from a chiller.
    ///
    /// With --quantity, removes that many items proportionally. Without it,
    /// zeroes the chiller and marks its entries loaded out.
    Loadout {
        /// Source chiller (1-4).
        #[arg(long)]
        chiller: ChillerId,

        /// Number of items to remove; omit for a full loadout.
        #[arg(long)]
        quantity: Option<f64>,
    },

    /// Transfer stock between chillers.
    Transfer {
        /// Source chiller (1-4).
        #[arg(long)]
        from: ChillerId,

        /// Destination chiller (1-4).
        #[arg(long)]
        to: ChillerId,

        /// Number of items to move.
        #[arg(long)]
        quantity: f64,
    },

    /// Rebuild the stored totals from entries not yet loaded out.
    Sync,

    /// Settlement: clear the entry log without touching the stored totals.
    Pays {
        /// Only delete entries created before this RFC 3339 timestamp.
        #[arg(long)]
        before: Option<String>,
    },
}

/// What a reset applies to.
#[derive(Debug, Subcommand)]
pub enum ResetTarget {
    /// Zero every bucket.
    All,
    /// Zero one chiller and subtract its species amounts from the breakdown.
    Chiller {
        /// Chiller number (1-4).
        chiller: ChillerId,
    },
    /// Zero the goats bucket.
    Goats,
}
