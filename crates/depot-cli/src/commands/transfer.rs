//! Transfer stock between chillers.

use std::io::Write;

use anyhow::{Context, Result};
use depot_core::ChillerId;
use depot_db::TotalsEngine;

pub fn run<W: Write>(
    writer: &mut W,
    engine: &mut TotalsEngine,
    from: ChillerId,
    to: ChillerId,
    quantity: f64,
) -> Result<()> {
    engine
        .transfer(from, to, quantity)
        .with_context(|| format!("transfer from chiller {from} to chiller {to} failed"))?;
    writeln!(
        writer,
        "Transferred {quantity} head from chiller {from} to chiller {to}."
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use depot_db::{Database, NewEntry};

    #[test]
    fn transfer_moves_stock_between_buckets() {
        let mut engine = TotalsEngine::open(Database::open_in_memory().unwrap()).unwrap();
        let entry = engine
            .db_mut()
            .insert_entry(NewEntry {
                category: "Red".to_string(),
                chiller: Some("2".to_string()),
                total: 10.0,
                kilograms: 50.0,
                worker_name: None,
                shooter_name: None,
            })
            .unwrap();
        engine.record_entry(&entry).unwrap();

        let mut out = Vec::new();
        run(
            &mut out,
            &mut engine,
            ChillerId::new(2).unwrap(),
            ChillerId::new(3).unwrap(),
            4.0,
        )
        .unwrap();

        assert_eq!(engine.ledger().chillers.chiller2.total, 6.0);
        assert_eq!(engine.ledger().chillers.chiller3.total, 4.0);
        assert!(
            String::from_utf8(out)
                .unwrap()
                .contains("Transferred 4 head from chiller 2 to chiller 3.")
        );
    }
}
