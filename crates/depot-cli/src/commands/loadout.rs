//! Load out stock from a chiller.
//!
//! A partial loadout removes a given quantity proportionally. A full loadout
//! zeroes the chiller's totals and flags its entries as loaded out, so they
//! drop out of future syncs while staying available for payment history.

use std::io::Write;

use anyhow::{Context, Result};
use depot_core::ChillerId;
use depot_db::TotalsEngine;

pub fn run<W: Write>(
    writer: &mut W,
    engine: &mut TotalsEngine,
    chiller: ChillerId,
    quantity: Option<f64>,
) -> Result<()> {
    match quantity {
        Some(quantity) => {
            engine
                .partial_loadout(chiller, quantity)
                .with_context(|| format!("partial loadout from chiller {chiller} failed"))?;
            writeln!(
                writer,
                "Removed {quantity} head from chiller {chiller}."
            )?;
        }
        None => {
            engine
                .reset_chiller(chiller)
                .with_context(|| format!("loadout of chiller {chiller} failed"))?;
            let marked = engine
                .db_mut()
                .mark_chiller_loaded_out(chiller)
                .context("failed to flag entries as loaded out")?;
            writeln!(
                writer,
                "Chiller {chiller} loaded out; {marked} entries flagged."
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use depot_db::{Database, NewEntry};

    fn engine_with_stock() -> TotalsEngine {
        let mut engine = TotalsEngine::open(Database::open_in_memory().unwrap()).unwrap();
        let entry = engine
            .db_mut()
            .insert_entry(NewEntry {
                category: "Red".to_string(),
                chiller: Some("1".to_string()),
                total: 10.0,
                kilograms: 50.0,
                worker_name: None,
                shooter_name: None,
            })
            .unwrap();
        engine.record_entry(&entry).unwrap();
        engine
    }

    #[test]
    fn partial_loadout_removes_quantity() {
        let mut engine = engine_with_stock();
        let mut out = Vec::new();

        run(&mut out, &mut engine, ChillerId::new(1).unwrap(), Some(4.0)).unwrap();

        assert_eq!(engine.ledger().chillers.chiller1.total, 6.0);
        assert_eq!(engine.ledger().chillers.chiller1.kilograms, 30.0);
        assert!(String::from_utf8(out).unwrap().contains("Removed 4 head"));
    }

    #[test]
    fn full_loadout_zeroes_and_flags_entries() {
        let mut engine = engine_with_stock();
        let mut out = Vec::new();
        let chiller = ChillerId::new(1).unwrap();

        run(&mut out, &mut engine, chiller, None).unwrap();

        assert_eq!(engine.ledger().chillers.chiller1.total, 0.0);
        let entries = engine.db().entries_for_chiller(chiller).unwrap();
        assert!(entries.iter().all(|e| e.loaded_out));
        assert!(String::from_utf8(out).unwrap().contains("1 entries flagged"));
    }

    #[test]
    fn over_quantity_is_rejected() {
        let mut engine = engine_with_stock();
        let mut out = Vec::new();

        let err = run(&mut out, &mut engine, ChillerId::new(1).unwrap(), Some(100.0)).unwrap_err();
        assert!(format!("{err:#}").contains("only 10 available"));
        assert_eq!(engine.ledger().chillers.chiller1.total, 10.0);
    }
}
