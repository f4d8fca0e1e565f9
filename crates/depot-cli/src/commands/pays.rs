//! Settlement: clear the entry log without touching the stored totals.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use depot_db::TotalsEngine;

pub fn run<W: Write>(
    writer: &mut W,
    engine: &mut TotalsEngine,
    before: Option<&str>,
) -> Result<()> {
    let removed = match before {
        Some(cutoff) => {
            // Normalize so string comparison against stored timestamps is sound.
            let parsed: DateTime<Utc> = cutoff
                .parse()
                .with_context(|| format!("invalid cutoff timestamp: {cutoff}"))?;
            let cutoff = parsed.to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
            engine
                .db_mut()
                .delete_entries_before(&cutoff)
                .context("failed to delete settled entries")?
        }
        None => engine
            .db_mut()
            .delete_all_entries()
            .context("failed to delete settled entries")?,
    };

    writeln!(writer, "Settled: {removed} entries cleared; stored totals unchanged.")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use depot_db::{Database, NewEntry};

    #[test]
    fn pays_clears_entries_but_not_ledger() {
        let mut engine = TotalsEngine::open(Database::open_in_memory().unwrap()).unwrap();
        let entry = engine
            .db_mut()
            .insert_entry(NewEntry {
                category: "Red".to_string(),
                chiller: Some("1".to_string()),
                total: 5.0,
                kilograms: 25.0,
                worker_name: None,
                shooter_name: Some("J. Smith".to_string()),
            })
            .unwrap();
        engine.record_entry(&entry).unwrap();

        let mut out = Vec::new();
        run(&mut out, &mut engine, None).unwrap();

        assert!(engine.db().list_entries().unwrap().is_empty());
        assert_eq!(engine.ledger().chillers.chiller1.total, 5.0);
        assert!(
            String::from_utf8(out)
                .unwrap()
                .contains("1 entries cleared")
        );
    }

    #[test]
    fn pays_rejects_bad_cutoff() {
        let mut engine = TotalsEngine::open(Database::open_in_memory().unwrap()).unwrap();
        let mut out = Vec::new();

        let err = run(&mut out, &mut engine, Some("last tuesday")).unwrap_err();
        assert!(err.to_string().contains("invalid cutoff timestamp"));
    }

    #[test]
    fn pays_with_cutoff_keeps_newer_entries() {
        let mut engine = TotalsEngine::open(Database::open_in_memory().unwrap()).unwrap();
        engine
            .db_mut()
            .insert_entry(NewEntry {
                category: "Goats".to_string(),
                chiller: None,
                total: 3.0,
                kilograms: 9.0,
                worker_name: None,
                shooter_name: None,
            })
            .unwrap();

        let mut out = Vec::new();
        run(&mut out, &mut engine, Some("2000-01-01T00:00:00Z")).unwrap();

        assert_eq!(engine.db().list_entries().unwrap().len(), 1);
        assert!(
            String::from_utf8(out)
                .unwrap()
                .contains("0 entries cleared")
        );
    }
}
