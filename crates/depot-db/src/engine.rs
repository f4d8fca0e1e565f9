//! The totals accounting engine.
//!
//! [`TotalsEngine`] owns the current in-memory [`TotalsLedger`] plus the
//! persistence adapter, and is the only component that mutates the stored
//! snapshot. Every operation follows the same write order: build the new full
//! ledger, persist it (delete-all + insert-one), then update the in-memory
//! copy. A persistence failure therefore leaves the in-memory ledger at its
//! pre-operation value.
//!
//! The capacity checks for partial loadouts and transfers read the *ledger*,
//! while the proportional splits read fresh entry-store aggregates. The two
//! sources can disagree after manual edits; the asymmetry is intentional and
//! is what lets chiller resets zero the ledger while preserving entry rows.
//! [`TotalsEngine::sync_with_source`] is the reconciliation path that
//! rebuilds the ledger from the entry store when drift accumulates.
//!
//! There is no version token on the snapshot row: concurrent engines race
//! with last-writer-wins semantics, and callers are expected to serialize
//! operations.

use thiserror::Error;

use depot_core::{
    Bucket, ChillerId, InventoryEntry, TotalsLedger, ValidationError, average_item_weight,
    plan_partial_loadout, species_totals,
};

use crate::{Database, StoreError};

/// Errors from engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The caller supplied an invalid domain event. Raised before any I/O.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A read or write against the backing store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The stored-totals accounting engine.
pub struct TotalsEngine {
    db: Database,
    ledger: TotalsLedger,
    saved_at: Option<String>,
}

impl TotalsEngine {
    /// Opens the engine over a database, loading the most recent snapshot.
    ///
    /// Starts from an all-zero ledger when no snapshot has been saved yet.
    pub fn open(db: Database) -> Result<Self, StoreError> {
        let snapshot = db.load_snapshot()?;
        let (ledger, saved_at) = match snapshot {
            Some(snapshot) => (snapshot.ledger, Some(snapshot.saved_at)),
            None => (TotalsLedger::zeroed(), None),
        };
        Ok(Self {
            db,
            ledger,
            saved_at,
        })
    }

    /// The current in-memory ledger.
    #[must_use]
    pub const fn ledger(&self) -> &TotalsLedger {
        &self.ledger
    }

    /// Save timestamp of the last persisted snapshot, if any.
    #[must_use]
    pub fn saved_at(&self) -> Option<&str> {
        self.saved_at.as_deref()
    }

    /// Read access to the backing store.
    #[must_use]
    pub const fn db(&self) -> &Database {
        &self.db
    }

    /// Mutable access to the backing store, for entry-row operations the
    /// engine itself never performs (inserts, deletes, settlement).
    pub const fn db_mut(&mut self) -> &mut Database {
        &mut self.db
    }

    /// Incrementally adds a newly created entry to the ledger and persists.
    pub fn record_entry(&mut self, entry: &InventoryEntry) -> Result<&TotalsLedger, EngineError> {
        let mut next = self.ledger;
        next.apply(entry);
        self.persist(next)?;
        tracing::debug!(entry_id = %entry.id, "entry added to stored totals");
        Ok(&self.ledger)
    }

    /// Subtracts a deleted entry from the ledger, clamped at zero, and persists.
    pub fn remove_entry(&mut self, entry: &InventoryEntry) -> Result<&TotalsLedger, EngineError> {
        let mut next = self.ledger;
        next.retract(entry);
        self.persist(next)?;
        tracing::debug!(entry_id = %entry.id, "entry subtracted from stored totals");
        Ok(&self.ledger)
    }

    /// Zeroes every bucket and persists. Entry rows are untouched.
    pub fn reset_all(&mut self) -> Result<&TotalsLedger, EngineError> {
        self.persist(TotalsLedger::zeroed())?;
        tracing::info!("all stored totals reset to zero");
        Ok(&self.ledger)
    }

    /// Zeroes the goats bucket only and persists. Entry rows are untouched.
    pub fn reset_goats(&mut self) -> Result<&TotalsLedger, EngineError> {
        let mut next = self.ledger;
        next.goats = Bucket::ZERO;
        self.persist(next)?;
        tracing::info!("goats totals reset while preserving entries");
        Ok(&self.ledger)
    }

    /// Resets one chiller: zeroes its bucket and subtracts the chiller's
    /// recomputed species amounts from the breakdown, clamped at zero.
    ///
    /// The bucket is zeroed from the ledger's own value rather than by
    /// subtraction, so the target lands exactly at zero even when incremental
    /// adds silently dropped malformed rows. Entry rows are preserved to keep
    /// shooter payment history intact.
    pub fn reset_chiller(&mut self, chiller: ChillerId) -> Result<&TotalsLedger, EngineError> {
        let entries = self.db.entries_for_chiller(chiller)?;
        let amounts = species_totals(&entries);

        let mut next = self.ledger;
        next.zero_chiller(chiller);
        next.subtract_breakdown(&amounts);
        self.persist(next)?;
        tracing::info!(chiller = %chiller, "chiller totals reset while preserving entries");
        Ok(&self.ledger)
    }

    /// Removes `quantity` items from a chiller, with weight and breakdown
    /// shares derived proportionally from the chiller's entries.
    ///
    /// The capacity check reads the ledger total; the proportional split
    /// reads entry-store aggregates.
    pub fn partial_loadout(
        &mut self,
        chiller: ChillerId,
        quantity: f64,
    ) -> Result<&TotalsLedger, EngineError> {
        if quantity <= 0.0 {
            return Err(ValidationError::QuantityNotPositive { quantity }.into());
        }
        let available = self.ledger.chillers.get(chiller).total;
        if quantity > available {
            return Err(ValidationError::InsufficientStock {
                chiller,
                requested: quantity,
                available,
            }
            .into());
        }

        let entries = self.db.entries_for_chiller(chiller)?;
        if entries.is_empty() {
            return Err(ValidationError::EmptyChiller { chiller }.into());
        }
        let plan = plan_partial_loadout(&entries, quantity);

        let mut next = self.ledger;
        next.remove_from_chiller(chiller, quantity, plan.weight_removed);
        next.subtract_breakdown(&plan.removal);
        self.persist(next)?;
        tracing::info!(
            chiller = %chiller,
            quantity,
            kilograms = plan.weight_removed,
            "partial loadout applied"
        );
        Ok(&self.ledger)
    }

    /// Moves `quantity` items (and a proportional weight, from the source
    /// chiller's average item weight) between two chillers.
    ///
    /// The species breakdown is chiller-agnostic and is left untouched.
    pub fn transfer(
        &mut self,
        from: ChillerId,
        to: ChillerId,
        quantity: f64,
    ) -> Result<&TotalsLedger, EngineError> {
        if from == to {
            return Err(ValidationError::SameChiller { chiller: from }.into());
        }
        if quantity <= 0.0 {
            return Err(ValidationError::QuantityNotPositive { quantity }.into());
        }
        let available = self.ledger.chillers.get(from).total;
        if quantity > available {
            return Err(ValidationError::InsufficientStock {
                chiller: from,
                requested: quantity,
                available,
            }
            .into());
        }

        let entries = self.db.entries_for_chiller(from)?;
        if entries.is_empty() {
            return Err(ValidationError::EmptyChiller { chiller: from }.into());
        }
        let kilograms = quantity * average_item_weight(&entries);

        let mut next = self.ledger;
        next.remove_from_chiller(from, quantity, kilograms);
        next.add_to_chiller(to, quantity, kilograms);
        self.persist(next)?;
        tracing::info!(%from, %to, quantity, kilograms, "transfer applied");
        Ok(&self.ledger)
    }

    /// Rebuilds the ledger from all entries not yet loaded out and persists.
    ///
    /// This is the drift-correction path: the result equals replaying
    /// `record_entry` over the same entry set from a zero ledger, and calling
    /// it twice without intervening entry changes yields identical ledgers.
    pub fn sync_with_source(&mut self) -> Result<&TotalsLedger, EngineError> {
        let entries = self.db.unloaded_entries()?;
        let next = TotalsLedger::from_entries(&entries);
        self.persist(next)?;
        tracing::info!(entry_count = entries.len(), "stored totals synced with entry store");
        Ok(&self.ledger)
    }

    /// Persists the new ledger, then updates the in-memory copy.
    fn persist(&mut self, next: TotalsLedger) -> Result<(), StoreError> {
        let saved_at = self.db.save_snapshot(&next)?;
        self.ledger = next;
        self.saved_at = Some(saved_at);
        Ok(())
    }
}
