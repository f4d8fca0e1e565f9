//! Status command for showing the stored totals.

use std::io::Write;

use anyhow::Result;
use depot_core::{ChillerId, Species};
use depot_db::TotalsEngine;

pub fn run<W: Write>(writer: &mut W, engine: &TotalsEngine, json: bool) -> Result<()> {
    let ledger = engine.ledger();

    if json {
        let mut value = serde_json::to_value(ledger)?;
        value["saved_at"] = serde_json::to_value(engine.saved_at())?;
        value["grand_total"] = serde_json::to_value(ledger.grand_total())?;
        writeln!(writer, "{}", serde_json::to_string_pretty(&value)?)?;
        return Ok(());
    }

    writeln!(writer, "Depot stored totals")?;
    writeln!(writer, "Saved: {}", engine.saved_at().unwrap_or("never"))?;
    writeln!(writer, "Chillers:")?;
    for chiller in ChillerId::ALL {
        let bucket = ledger.chillers.get(chiller);
        writeln!(
            writer,
            "- chiller {}: {} head, {} kg",
            chiller, bucket.total, bucket.kilograms
        )?;
    }
    writeln!(
        writer,
        "Goats: {} head, {} kg",
        ledger.goats.total, ledger.goats.kilograms
    )?;
    writeln!(writer, "Kangaroo breakdown:")?;
    for species in Species::ALL {
        let bucket = ledger.breakdown.get(species);
        writeln!(
            writer,
            "- {}: {} head, {} kg",
            species, bucket.total, bucket.kilograms
        )?;
    }
    let grand = ledger.grand_total();
    writeln!(writer, "Grand total: {} head, {} kg", grand.total, grand.kilograms)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use depot_db::{Database, NewEntry};
    use insta::assert_snapshot;

    #[test]
    fn status_of_fresh_database_is_all_zero() {
        let engine = TotalsEngine::open(Database::open_in_memory().unwrap()).unwrap();
        let mut out = Vec::new();
        run(&mut out, &engine, false).unwrap();

        assert_snapshot!(String::from_utf8(out).unwrap(), @r"
        Depot stored totals
        Saved: never
        Chillers:
        - chiller 1: 0 head, 0 kg
        - chiller 2: 0 head, 0 kg
        - chiller 3: 0 head, 0 kg
        - chiller 4: 0 head, 0 kg
        Goats: 0 head, 0 kg
        Kangaroo breakdown:
        - red: 0 head, 0 kg
        - eastern: 0 head, 0 kg
        - western: 0 head, 0 kg
        Grand total: 0 head, 0 kg
        ");
    }

    #[test]
    fn status_shows_recorded_totals_and_grand_total() {
        let mut engine = TotalsEngine::open(Database::open_in_memory().unwrap()).unwrap();
        for (category, chiller, total, kilograms) in [
            ("Red", Some("1"), 5.0, 25.0),
            ("Goats", None, 3.0, 9.0),
        ] {
            let entry = engine
                .db_mut()
                .insert_entry(NewEntry {
                    category: category.to_string(),
                    chiller: chiller.map(str::to_string),
                    total,
                    kilograms,
                    worker_name: None,
                    shooter_name: None,
                })
                .unwrap();
            engine.record_entry(&entry).unwrap();
        }

        let mut out = Vec::new();
        run(&mut out, &engine, false).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(output.contains("- chiller 1: 5 head, 25 kg"));
        assert!(output.contains("Goats: 3 head, 9 kg"));
        assert!(output.contains("- red: 5 head, 25 kg"));
        assert!(output.contains("Grand total: 8 head, 34 kg"));
        assert!(!output.contains("Saved: never"));
    }

    #[test]
    fn json_status_includes_ledger_and_grand_total() {
        let engine = TotalsEngine::open(Database::open_in_memory().unwrap()).unwrap();
        let mut out = Vec::new();
        run(&mut out, &engine, true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["chiller_totals"]["chiller1"]["total"], 0.0);
        assert_eq!(value["grand_total"]["kilograms"], 0.0);
        assert!(value["saved_at"].is_null());
    }
}
