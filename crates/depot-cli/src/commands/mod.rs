//! CLI subcommand implementations.

pub mod add;
pub mod delete;
pub mod entries;
pub mod loadout;
pub mod pays;
pub mod reset;
pub mod status;
pub mod sync;
pub mod transfer;
