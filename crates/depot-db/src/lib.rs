//! Storage layer for the depot tracker.
//!
//! Provides persistence for inventory entries and the stored-totals snapshot
//! using `rusqlite`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but
//! not `Sync`. For multi-threaded access wrap it in a `Mutex` or give each
//! thread its own instance.
//!
//! # Schema
//!
//! Timestamps are stored as TEXT in RFC 3339 format with millisecond
//! precision (e.g. `2025-01-01T10:30:00.000Z`), so lexicographic ordering
//! matches chronological ordering and settlement cutoffs are plain string
//! comparisons.
//!
//! The `saved_totals` table holds at most one row: every save deletes all
//! existing rows and inserts exactly one, inside a single transaction. The
//! ledger sections are stored as JSON columns (`chiller_totals`,
//! `goats_totals`, `kangaroo_breakdown`) matching the serialized shape of
//! [`TotalsLedger`]. There is no version column; concurrent writers race with
//! last-writer-wins semantics.

mod engine;

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, Row, params};
use thiserror::Error;
use uuid::Uuid;

use depot_core::{Bucket, ChillerId, ChillerTotals, InventoryEntry, KangarooBreakdown, TotalsLedger};

pub use engine::{EngineError, TotalsEngine};

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A snapshot JSON column failed to parse.
    #[error("invalid snapshot data in column {column}: {message}")]
    SnapshotData {
        column: &'static str,
        message: String,
    },
}

/// Fields supplied by the caller when logging a new entry.
///
/// The store assigns the ID and creation timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub category: String,
    pub chiller: Option<String>,
    pub total: f64,
    pub kilograms: f64,
    pub worker_name: Option<String>,
    pub shooter_name: Option<String>,
}

/// A loaded snapshot row: the ledger plus its save timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedSnapshot {
    pub ledger: TotalsLedger,
    pub saved_at: String,
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS inventory (
                id TEXT PRIMARY KEY,
                category TEXT NOT NULL,
                chiller TEXT,
                total REAL NOT NULL,
                kilograms REAL NOT NULL,
                worker_name TEXT,
                shooter_name TEXT,
                created_at TEXT NOT NULL,
                loaded_out INTEGER NOT NULL DEFAULT 0,
                paid INTEGER NOT NULL DEFAULT 0
            );

            CREATE INDEX IF NOT EXISTS idx_inventory_chiller ON inventory(chiller);
            CREATE INDEX IF NOT EXISTS idx_inventory_category ON inventory(category);
            CREATE INDEX IF NOT EXISTS idx_inventory_created ON inventory(created_at);
            CREATE INDEX IF NOT EXISTS idx_inventory_loaded_out ON inventory(loaded_out);

            -- Stored-totals snapshot: at most one row, replaced on every save.
            CREATE TABLE IF NOT EXISTS saved_totals (
                id TEXT PRIMARY KEY,
                chiller_totals TEXT NOT NULL,
                goats_totals TEXT NOT NULL,
                kangaroo_breakdown TEXT NOT NULL,
                saved_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Inserts a new entry, assigning its ID and creation timestamp.
    pub fn insert_entry(&mut self, new: NewEntry) -> Result<InventoryEntry, StoreError> {
        self.insert_entry_at(new, Utc::now())
    }

    fn insert_entry_at(
        &mut self,
        new: NewEntry,
        created_at: DateTime<Utc>,
    ) -> Result<InventoryEntry, StoreError> {
        let entry = InventoryEntry {
            id: Uuid::new_v4().to_string(),
            category: new.category,
            chiller: new.chiller,
            total: new.total,
            kilograms: new.kilograms,
            created_at: format_timestamp(created_at),
            loaded_out: false,
            paid: false,
            worker_name: new.worker_name,
            shooter_name: new.shooter_name,
        };
        self.conn.execute(
            "
            INSERT INTO inventory
            (id, category, chiller, total, kilograms, worker_name, shooter_name, created_at, loaded_out, paid)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0, 0)
            ",
            params![
                entry.id,
                entry.category,
                entry.chiller,
                entry.total,
                entry.kilograms,
                entry.worker_name,
                entry.shooter_name,
                entry.created_at,
            ],
        )?;
        Ok(entry)
    }

    /// Fetches one entry by ID.
    pub fn get_entry(&self, id: &str) -> Result<Option<InventoryEntry>, StoreError> {
        let mut stmt = self.conn.prepare(&select_entries("WHERE id = ?"))?;
        let mut rows = stmt.query_map([id], entry_from_row)?;
        rows.next().transpose().map_err(StoreError::from)
    }

    /// Deletes one entry by ID. Returns whether a row was removed.
    pub fn delete_entry(&mut self, id: &str) -> Result<bool, StoreError> {
        let removed = self
            .conn
            .execute("DELETE FROM inventory WHERE id = ?", [id])?;
        Ok(removed > 0)
    }

    /// Lists all entries ordered by creation time then ID.
    pub fn list_entries(&self) -> Result<Vec<InventoryEntry>, StoreError> {
        self.query_entries(&select_entries(""), params![])
    }

    /// Lists all entries assigned to a chiller, regardless of loaded-out status.
    pub fn entries_for_chiller(
        &self,
        chiller: ChillerId,
    ) -> Result<Vec<InventoryEntry>, StoreError> {
        self.query_entries(
            &select_entries("WHERE chiller = ?"),
            params![chiller.number().to_string()],
        )
    }

    /// Lists all entries with the given raw category value.
    pub fn entries_for_category(&self, category: &str) -> Result<Vec<InventoryEntry>, StoreError> {
        self.query_entries(&select_entries("WHERE category = ?"), params![category])
    }

    /// Lists all entries not yet loaded out.
    pub fn unloaded_entries(&self) -> Result<Vec<InventoryEntry>, StoreError> {
        self.query_entries(&select_entries("WHERE loaded_out = 0"), params![])
    }

    /// Flags every entry in a chiller as loaded out. Returns the row count.
    pub fn mark_chiller_loaded_out(&mut self, chiller: ChillerId) -> Result<usize, StoreError> {
        let updated = self.conn.execute(
            "UPDATE inventory SET loaded_out = 1 WHERE chiller = ?",
            params![chiller.number().to_string()],
        )?;
        Ok(updated)
    }

    /// Deletes entries created before the cutoff. Returns the row count.
    ///
    /// Used by settlement flows; the totals engine never deletes entry rows.
    pub fn delete_entries_before(&mut self, cutoff: &str) -> Result<usize, StoreError> {
        let removed = self
            .conn
            .execute("DELETE FROM inventory WHERE created_at < ?", [cutoff])?;
        Ok(removed)
    }

    /// Deletes every entry row. Returns the row count.
    pub fn delete_all_entries(&mut self) -> Result<usize, StoreError> {
        let removed = self.conn.execute("DELETE FROM inventory", [])?;
        Ok(removed)
    }

    /// Loads the most recently saved snapshot, if any.
    pub fn load_snapshot(&self) -> Result<Option<SavedSnapshot>, StoreError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT chiller_totals, goats_totals, kangaroo_breakdown, saved_at
            FROM saved_totals
            ORDER BY saved_at DESC
            LIMIT 1
            ",
        )?;
        let mut rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;
        let Some(row) = rows.next().transpose()? else {
            return Ok(None);
        };
        let (chillers_json, goats_json, breakdown_json, saved_at) = row;
        let chillers: ChillerTotals = parse_snapshot_column("chiller_totals", &chillers_json)?;
        let goats: Bucket = parse_snapshot_column("goats_totals", &goats_json)?;
        let breakdown: KangarooBreakdown =
            parse_snapshot_column("kangaroo_breakdown", &breakdown_json)?;
        Ok(Some(SavedSnapshot {
            ledger: TotalsLedger {
                chillers,
                goats,
                breakdown,
            },
            saved_at,
        }))
    }

    /// Replaces the stored snapshot with the given ledger.
    ///
    /// Delete-all + insert-one inside a single transaction. Returns the save
    /// timestamp written to the row.
    pub fn save_snapshot(&mut self, ledger: &TotalsLedger) -> Result<String, StoreError> {
        self.save_snapshot_at(ledger, Utc::now())
    }

    fn save_snapshot_at(
        &mut self,
        ledger: &TotalsLedger,
        saved_at: DateTime<Utc>,
    ) -> Result<String, StoreError> {
        let chillers_json = encode_snapshot_column("chiller_totals", &ledger.chillers)?;
        let goats_json = encode_snapshot_column("goats_totals", &ledger.goats)?;
        let breakdown_json = encode_snapshot_column("kangaroo_breakdown", &ledger.breakdown)?;
        let saved_at = format_timestamp(saved_at);

        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM saved_totals", [])?;
        tx.execute(
            "
            INSERT INTO saved_totals (id, chiller_totals, goats_totals, kangaroo_breakdown, saved_at)
            VALUES (?, ?, ?, ?, ?)
            ",
            params![
                Uuid::new_v4().to_string(),
                chillers_json,
                goats_json,
                breakdown_json,
                saved_at,
            ],
        )?;
        tx.commit()?;
        Ok(saved_at)
    }

    fn query_entries(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<InventoryEntry>, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, entry_from_row)?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }
}

fn select_entries(filter: &str) -> String {
    format!(
        "
        SELECT id, category, chiller, total, kilograms, worker_name, shooter_name,
               created_at, loaded_out, paid
        FROM inventory
        {filter}
        ORDER BY created_at ASC, id ASC
        "
    )
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<InventoryEntry> {
    Ok(InventoryEntry {
        id: row.get(0)?,
        category: row.get(1)?,
        chiller: row.get(2)?,
        total: row.get(3)?,
        kilograms: row.get(4)?,
        worker_name: row.get(5)?,
        shooter_name: row.get(6)?,
        created_at: row.get(7)?,
        loaded_out: row.get::<_, i64>(8)? != 0,
        paid: row.get::<_, i64>(9)? != 0,
    })
}

fn parse_snapshot_column<T: serde::de::DeserializeOwned>(
    column: &'static str,
    json: &str,
) -> Result<T, StoreError> {
    serde_json::from_str(json).map_err(|err| StoreError::SnapshotData {
        column,
        message: err.to_string(),
    })
}

fn encode_snapshot_column<T: serde::Serialize>(
    column: &'static str,
    value: &T,
) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|err| StoreError::SnapshotData {
        column,
        message: err.to_string(),
    })
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
