//! Log a new inventory entry and add it to the stored totals.

use std::io::Write;

use anyhow::{Context, Result, bail};
use depot_core::{Category, ChillerId};
use depot_db::{NewEntry, TotalsEngine};

/// Arguments for logging one entry.
#[derive(Debug, Clone)]
pub struct AddArgs {
    pub category: Category,
    pub chiller: Option<ChillerId>,
    pub total: f64,
    pub kilograms: f64,
    pub worker: Option<String>,
    pub shooter: Option<String>,
}

pub fn run<W: Write>(writer: &mut W, engine: &mut TotalsEngine, args: AddArgs) -> Result<()> {
    if args.total < 0.0 || args.kilograms < 0.0 {
        bail!("count and kilograms must not be negative");
    }

    // Goats carry no chiller assignment; everything else requires one.
    let chiller = if args.category == Category::Goats {
        None
    } else {
        match args.chiller {
            Some(chiller) => Some(chiller),
            None => bail!("--chiller is required for category {}", args.category),
        }
    };

    let entry = engine
        .db_mut()
        .insert_entry(NewEntry {
            category: args.category.to_string(),
            chiller: chiller.map(|c| c.to_string()),
            total: args.total,
            kilograms: args.kilograms,
            worker_name: args.worker,
            shooter_name: args.shooter,
        })
        .context("failed to insert entry")?;
    engine
        .record_entry(&entry)
        .context("failed to add entry to stored totals")?;

    writeln!(
        writer,
        "Logged {} head / {} kg of {} ({})",
        entry.total, entry.kilograms, entry.category, entry.id
    )?;
    Ok(())
}
