//! Rebuild the stored totals from the entry store.

use std::io::Write;

use anyhow::{Context, Result};
use depot_db::TotalsEngine;

pub fn run<W: Write>(writer: &mut W, engine: &mut TotalsEngine) -> Result<()> {
    engine
        .sync_with_source()
        .context("failed to sync stored totals with entries")?;
    let grand = engine.ledger().grand_total();
    writeln!(
        writer,
        "Stored totals synced: {} head, {} kg on hand.",
        grand.total, grand.kilograms
    )?;
    Ok(())
}
