//! The stored-totals ledger and its arithmetic.
//!
//! The ledger is the single persisted aggregate snapshot: four chiller
//! buckets, one goats bucket, and a three-way kangaroo species breakdown.
//! Chiller totals and the species breakdown are *independent* partitions of
//! the same entry stream: each entry is classified twice, and a malformed
//! category or chiller value skips that axis without touching the other.
//! Every count and weight is clamped at zero on subtraction.

use serde::{Deserialize, Serialize};

use crate::category::{Species, is_goats};
use crate::chiller::ChillerId;
use crate::entry::InventoryEntry;

/// One count/weight pair.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub total: f64,
    pub kilograms: f64,
}

impl Bucket {
    pub const ZERO: Self = Self {
        total: 0.0,
        kilograms: 0.0,
    };

    fn add(&mut self, total: f64, kilograms: f64) {
        self.total += total;
        self.kilograms += kilograms;
    }

    /// Subtracts, clamping both fields at zero.
    fn sub_clamped(&mut self, total: f64, kilograms: f64) {
        self.total = (self.total - total).max(0.0);
        self.kilograms = (self.kilograms - kilograms).max(0.0);
    }
}

/// Per-chiller totals. Exactly four buckets; never resized.
///
/// Field names match the persisted snapshot JSON.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChillerTotals {
    pub chiller1: Bucket,
    pub chiller2: Bucket,
    pub chiller3: Bucket,
    pub chiller4: Bucket,
}

impl ChillerTotals {
    #[must_use]
    pub const fn get(&self, chiller: ChillerId) -> &Bucket {
        match chiller.number() {
            1 => &self.chiller1,
            2 => &self.chiller2,
            3 => &self.chiller3,
            _ => &self.chiller4,
        }
    }

    pub const fn get_mut(&mut self, chiller: ChillerId) -> &mut Bucket {
        match chiller.number() {
            1 => &mut self.chiller1,
            2 => &mut self.chiller2,
            3 => &mut self.chiller3,
            _ => &mut self.chiller4,
        }
    }
}

/// Per-species kangaroo breakdown. Exactly three buckets; never resized.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KangarooBreakdown {
    pub red: Bucket,
    pub eastern: Bucket,
    pub western: Bucket,
}

impl KangarooBreakdown {
    #[must_use]
    pub const fn get(&self, species: Species) -> &Bucket {
        match species {
            Species::Red => &self.red,
            Species::Eastern => &self.eastern,
            Species::Western => &self.western,
        }
    }

    pub const fn get_mut(&mut self, species: Species) -> &mut Bucket {
        match species {
            Species::Red => &mut self.red,
            Species::Eastern => &mut self.eastern,
            Species::Western => &mut self.western,
        }
    }
}

/// The persisted aggregate snapshot.
///
/// Serialized field names match the original snapshot row columns.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TotalsLedger {
    #[serde(rename = "chiller_totals")]
    pub chillers: ChillerTotals,
    #[serde(rename = "goats_totals")]
    pub goats: Bucket,
    #[serde(rename = "kangaroo_breakdown")]
    pub breakdown: KangarooBreakdown,
}

impl TotalsLedger {
    /// An all-zero ledger, used when no snapshot has been saved yet.
    #[must_use]
    pub fn zeroed() -> Self {
        Self::default()
    }

    /// Incrementally adds one entry.
    ///
    /// Goat entries go to the goats bucket only. Other entries update the
    /// chiller axis and the breakdown axis through two independent
    /// classification passes; an unclassifiable value skips that axis.
    pub fn apply(&mut self, entry: &InventoryEntry) {
        if is_goats(&entry.category) {
            self.goats.add(entry.total, entry.kilograms);
            return;
        }

        let raw_chiller = entry.chiller.as_deref().unwrap_or("");
        if let Some(chiller) = ChillerId::classify(raw_chiller) {
            self.chillers
                .get_mut(chiller)
                .add(entry.total, entry.kilograms);
        } else {
            tracing::warn!(
                entry_id = %entry.id,
                chiller = raw_chiller,
                "no chiller match; skipping chiller axis"
            );
        }

        if let Some(species) = Species::classify(&entry.category) {
            self.breakdown
                .get_mut(species)
                .add(entry.total, entry.kilograms);
        } else {
            tracing::warn!(
                entry_id = %entry.id,
                category = %entry.category,
                "no species match; skipping breakdown axis"
            );
        }
    }

    /// Mirror of [`apply`](Self::apply) with every subtraction clamped at zero.
    pub fn retract(&mut self, entry: &InventoryEntry) {
        if is_goats(&entry.category) {
            self.goats.sub_clamped(entry.total, entry.kilograms);
            return;
        }

        let raw_chiller = entry.chiller.as_deref().unwrap_or("");
        if let Some(chiller) = ChillerId::classify(raw_chiller) {
            self.chillers
                .get_mut(chiller)
                .sub_clamped(entry.total, entry.kilograms);
        }

        if let Some(species) = Species::classify(&entry.category) {
            self.breakdown
                .get_mut(species)
                .sub_clamped(entry.total, entry.kilograms);
        }
    }

    /// Rebuilds a ledger from scratch using the same classification rules as
    /// [`apply`](Self::apply).
    #[must_use]
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a InventoryEntry>,
    {
        let mut ledger = Self::zeroed();
        for entry in entries {
            ledger.apply(entry);
        }
        ledger
    }

    /// Zeroes one chiller bucket, from the ledger's own value.
    ///
    /// Used by the chiller reset: zeroing (rather than subtracting a freshly
    /// computed amount) guarantees the bucket lands exactly at zero even when
    /// incremental adds silently dropped malformed rows.
    pub fn zero_chiller(&mut self, chiller: ChillerId) {
        *self.chillers.get_mut(chiller) = Bucket::ZERO;
    }

    /// Clamped-subtracts per-species amounts from the breakdown.
    pub fn subtract_breakdown(&mut self, amounts: &KangarooBreakdown) {
        for species in Species::ALL {
            let amount = *amounts.get(species);
            self.breakdown
                .get_mut(species)
                .sub_clamped(amount.total, amount.kilograms);
        }
    }

    /// Adds count and weight into one chiller bucket.
    pub fn add_to_chiller(&mut self, chiller: ChillerId, total: f64, kilograms: f64) {
        self.chillers.get_mut(chiller).add(total, kilograms);
    }

    /// Clamped-subtracts count and weight from one chiller bucket.
    pub fn remove_from_chiller(&mut self, chiller: ChillerId, total: f64, kilograms: f64) {
        self.chillers.get_mut(chiller).sub_clamped(total, kilograms);
    }

    /// Grand total across the four chillers plus goats. Derived, never stored.
    #[must_use]
    pub fn grand_total(&self) -> Bucket {
        let mut sum = Bucket::ZERO;
        for chiller in ChillerId::ALL {
            let bucket = self.chillers.get(chiller);
            sum.add(bucket.total, bucket.kilograms);
        }
        sum.add(self.goats.total, self.goats.kilograms);
        sum
    }
}

/// Average weight per item across the given entries, 0 when there are none.
#[must_use]
pub fn average_item_weight(entries: &[InventoryEntry]) -> f64 {
    let total_items: f64 = entries.iter().map(|e| e.total).sum();
    if total_items > 0.0 {
        entries.iter().map(|e| e.kilograms).sum::<f64>() / total_items
    } else {
        0.0
    }
}

/// Per-species sums of the given entries' raw counts and weights.
#[must_use]
pub fn species_totals(entries: &[InventoryEntry]) -> KangarooBreakdown {
    let mut totals = KangarooBreakdown::default();
    for entry in entries {
        if let Some(species) = Species::classify(&entry.category) {
            totals.get_mut(species).add(entry.total, entry.kilograms);
        }
    }
    totals
}

/// Removal shares for a partial loadout, derived from the source chiller's
/// entries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadoutPlan {
    /// `quantity * average weight per item`.
    pub weight_removed: f64,
    /// Per-species count and weight shares to subtract from the breakdown.
    pub removal: KangarooBreakdown,
}

/// Plans a partial loadout of `quantity` items.
///
/// Each entry contributes `quantity * entry_items / total_items` to its
/// species' count share and `weight_removed * entry_kg / total_weight` to its
/// weight share. Entries whose category matches no species contribute to the
/// overall averages but not to the breakdown shares.
#[must_use]
pub fn plan_partial_loadout(entries: &[InventoryEntry], quantity: f64) -> LoadoutPlan {
    let total_items: f64 = entries.iter().map(|e| e.total).sum();
    let total_weight: f64 = entries.iter().map(|e| e.kilograms).sum();
    let avg_weight = if total_items > 0.0 {
        total_weight / total_items
    } else {
        0.0
    };
    let weight_removed = quantity * avg_weight;

    let mut removal = KangarooBreakdown::default();
    for entry in entries {
        let Some(species) = Species::classify(&entry.category) else {
            continue;
        };
        let count_share = if total_items > 0.0 {
            quantity * entry.total / total_items
        } else {
            0.0
        };
        let weight_share = if total_weight > 0.0 {
            weight_removed * entry.kilograms / total_weight
        } else {
            0.0
        };
        removal.get_mut(species).add(count_share, weight_share);
    }

    LoadoutPlan {
        weight_removed,
        removal,
    }
}
