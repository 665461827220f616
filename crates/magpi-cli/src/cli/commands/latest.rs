//! `magpi latest` – print the newest issue number.

use anyhow::{Context, Result};
use magpi_core::config::MagpiConfig;

use super::{discover_latest, resolver_from_config};

pub fn run_latest(cfg: &MagpiConfig) -> Result<()> {
    let resolver = resolver_from_config(cfg)?;
    let latest = discover_latest(cfg, &resolver).context("could not determine the latest issue")?;
    println!("{latest}");
    Ok(())
}
