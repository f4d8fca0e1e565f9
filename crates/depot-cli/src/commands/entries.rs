//! List inventory entries.

use std::io::Write;

use anyhow::{Context, Result};
use depot_core::ChillerId;
use depot_db::Database;

pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    chiller: Option<ChillerId>,
    json: bool,
) -> Result<()> {
    let entries = match chiller {
        Some(chiller) => db
            .entries_for_chiller(chiller)
            .context("failed to list chiller entries")?,
        None => db.list_entries().context("failed to list entries")?,
    };

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&entries)?)?;
        return Ok(());
    }

    if entries.is_empty() {
        writeln!(writer, "No entries.")?;
        return Ok(());
    }

    for entry in entries {
        let chiller = entry.chiller.as_deref().unwrap_or("-");
        let shooter = entry.shooter_name.as_deref().unwrap_or("-");
        let flags = match (entry.loaded_out, entry.paid) {
            (true, true) => " [loaded out, paid]",
            (true, false) => " [loaded out]",
            (false, true) => " [paid]",
            (false, false) => "",
        };
        writeln!(
            writer,
            "{} {} chiller {} {} head {} kg shooter {}{} ({})",
            entry.created_at,
            entry.category,
            chiller,
            entry.total,
            entry.kilograms,
            shooter,
            flags,
            entry.id
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use depot_db::NewEntry;

    fn seeded_db() -> Database {
        let mut db = Database::open_in_memory().unwrap();
        db.insert_entry(NewEntry {
            category: "Red".to_string(),
            chiller: Some("1".to_string()),
            total: 5.0,
            kilograms: 25.0,
            worker_name: None,
            shooter_name: Some("J. Smith".to_string()),
        })
        .unwrap();
        db.insert_entry(NewEntry {
            category: "Goats".to_string(),
            chiller: None,
            total: 3.0,
            kilograms: 9.0,
            worker_name: None,
            shooter_name: None,
        })
        .unwrap();
        db
    }

    #[test]
    fn lists_all_entries() {
        let db = seeded_db();
        let mut out = Vec::new();
        run(&mut out, &db, None, false).unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Red chiller 1 5 head 25 kg shooter J. Smith"));
        assert!(output.contains("Goats chiller - 3 head 9 kg shooter -"));
    }

    #[test]
    fn chiller_filter_narrows_output() {
        let db = seeded_db();
        let mut out = Vec::new();
        run(&mut out, &db, ChillerId::new(2).ok(), false).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "No entries.\n");
    }

    #[test]
    fn json_output_roundtrips() {
        let db = seeded_db();
        let mut out = Vec::new();
        run(&mut out, &db, None, true).unwrap();

        let parsed: Vec<depot_core::InventoryEntry> =
            serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].category, "Red");
    }
}
