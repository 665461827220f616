//! CLI for the MagPi back-issue downloader.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use magpi_core::batch::IssueSelection;
use magpi_core::config::{self, MagpiConfig};
use magpi_core::issue::{Issue, IssueRange};
use std::path::PathBuf;

use commands::{run_download, run_latest, run_resolve};

/// Top-level CLI for the MagPi downloader.
#[derive(Debug, Parser)]
#[command(name = "magpi")]
#[command(about = "Download The MagPi back-issues as PDF files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download issues (default: only the latest one).
    Download {
        /// Issue numbers or inclusive ranges, e.g. `3 7 10-12`.
        #[arg(value_name = "ISSUES", conflicts_with = "all")]
        issues: Vec<IssueRange>,

        /// Download every issue from 1 to the latest.
        #[arg(long)]
        all: bool,

        /// Destination directory (created if missing). Defaults to config `download_dir`, then the current directory.
        #[arg(short, long, value_name = "DIR")]
        dest: Option<PathBuf>,
    },

    /// Print the latest published issue number.
    Latest,

    /// Print the PDF URL of each issue without downloading it.
    Resolve {
        /// Issue numbers or inclusive ranges.
        #[arg(value_name = "ISSUES", required = true)]
        issues: Vec<IssueRange>,
    },
}

/// Explicit issues win; `--all` covers 1..=latest; neither means latest only.
pub(crate) fn selection_from_args(issues: &[IssueRange], all: bool) -> IssueSelection {
    if all {
        IssueSelection::All
    } else if issues.is_empty() {
        IssueSelection::Latest
    } else {
        IssueSelection::Explicit(expand(issues))
    }
}

pub(crate) fn expand(ranges: &[IssueRange]) -> Vec<Issue> {
    ranges.iter().flat_map(|r| r.issues()).collect()
}

/// `--dest`, then config `download_dir`, then the current directory.
pub(crate) fn destination_dir(dest: Option<PathBuf>, cfg: &MagpiConfig) -> Result<PathBuf> {
    match dest.or_else(|| cfg.download_dir.clone()) {
        Some(dir) => Ok(dir),
        None => Ok(std::env::current_dir()?),
    }
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Download { issues, all, dest } => {
                let selection = selection_from_args(&issues, all);
                let dir = destination_dir(dest, &cfg)?;
                run_download(&cfg, &selection, &dir)?;
            }
            CliCommand::Latest => run_latest(&cfg)?,
            CliCommand::Resolve { issues } => run_resolve(&cfg, &expand(&issues))?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
