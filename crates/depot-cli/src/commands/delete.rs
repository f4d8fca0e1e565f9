//! Delete an entry and subtract it from the stored totals.

use std::io::Write;

use anyhow::{Context, Result, bail};
use depot_db::TotalsEngine;

pub fn run<W: Write>(writer: &mut W, engine: &mut TotalsEngine, id: &str) -> Result<()> {
    let Some(entry) = engine.db().get_entry(id).context("failed to fetch entry")? else {
        bail!("no entry with id {id}");
    };

    engine
        .db_mut()
        .delete_entry(id)
        .context("failed to delete entry")?;
    engine
        .remove_entry(&entry)
        .context("failed to subtract entry from stored totals")?;

    writeln!(
        writer,
        "Deleted {} head / {} kg of {} ({})",
        entry.total, entry.kilograms, entry.category, entry.id
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use depot_db::{Database, NewEntry};

    #[test]
    fn delete_removes_row_and_subtracts_totals() {
        let mut engine = TotalsEngine::open(Database::open_in_memory().unwrap()).unwrap();
        let entry = engine
            .db_mut()
            .insert_entry(NewEntry {
                category: "Red".to_string(),
                chiller: Some("1".to_string()),
                total: 5.0,
                kilograms: 25.0,
                worker_name: None,
                shooter_name: None,
            })
            .unwrap();
        engine.record_entry(&entry).unwrap();

        let mut out = Vec::new();
        run(&mut out, &mut engine, &entry.id).unwrap();

        assert!(engine.db().get_entry(&entry.id).unwrap().is_none());
        assert_eq!(engine.ledger().chillers.chiller1.total, 0.0);
        assert_eq!(engine.ledger().breakdown.red.total, 0.0);
    }

    #[test]
    fn delete_unknown_id_fails_without_changes() {
        let mut engine = TotalsEngine::open(Database::open_in_memory().unwrap()).unwrap();
        let mut out = Vec::new();

        let err = run(&mut out, &mut engine, "missing").unwrap_err();
        assert!(err.to_string().contains("no entry with id"));
    }
}
