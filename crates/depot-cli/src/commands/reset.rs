//! Reset stored totals while preserving entry rows.

use std::io::Write;

use anyhow::{Context, Result};
use depot_db::TotalsEngine;

use crate::ResetTarget;

pub fn run<W: Write>(writer: &mut W, engine: &mut TotalsEngine, target: &ResetTarget) -> Result<()> {
    match target {
        ResetTarget::All => {
            engine.reset_all().context("failed to reset totals")?;
            writeln!(writer, "All stored totals reset to zero.")?;
        }
        ResetTarget::Chiller { chiller } => {
            engine
                .reset_chiller(*chiller)
                .with_context(|| format!("failed to reset chiller {chiller}"))?;
            writeln!(
                writer,
                "Chiller {chiller} totals reset; entries preserved."
            )?;
        }
        ResetTarget::Goats => {
            engine.reset_goats().context("failed to reset goats totals")?;
            writeln!(writer, "Goats totals reset; entries preserved.")?;
        }
    }
    Ok(())
}
