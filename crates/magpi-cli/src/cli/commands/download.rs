//! `magpi download` – download the selected issues into a directory.

use anyhow::{Context, Result};
use magpi_core::batch::{self, DownloadOutcome, IssueSelection};
use magpi_core::config::MagpiConfig;
use magpi_core::storage::Destination;
use std::path::Path;

use super::{discover_latest, resolver_from_config};

pub fn run_download(cfg: &MagpiConfig, selection: &IssueSelection, dest_dir: &Path) -> Result<()> {
    let resolver = resolver_from_config(cfg)?;
    let issues = selection
        .issues(|| discover_latest(cfg, &resolver))
        .context("could not determine the latest issue")?;
    if issues.is_empty() {
        println!("No issues selected.");
        return Ok(());
    }

    let dest = Destination::new(dest_dir, cfg.file_prefix.as_str());
    println!("Downloading {} issue(s) to {}", issues.len(), dest_dir.display());

    let report = batch::run_batch(&resolver, &issues, &dest, |issue, outcome| match outcome {
        DownloadOutcome::Saved(path) => {
            println!("  issue {:>4}: saved {}", issue.number(), path.display())
        }
        DownloadOutcome::Failed(e) => println!("  issue {:>4}: failed ({})", issue.number(), e.kind()),
    })?;

    println!(
        "Saved {} of {} issue(s).",
        report.saved_count(),
        report.total()
    );
    if report.failed_count() > 0 {
        println!("Failures:");
        for (_, e) in report.failures() {
            println!("  {e}");
        }
        anyhow::bail!("{} of {} issue(s) failed", report.failed_count(), report.total());
    }
    Ok(())
}
