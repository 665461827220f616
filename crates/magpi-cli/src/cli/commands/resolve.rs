//! `magpi resolve <issues>` – show PDF URLs without downloading.

use anyhow::Result;
use magpi_core::config::MagpiConfig;
use magpi_core::issue::Issue;
use std::collections::BTreeSet;

use super::resolver_from_config;

pub fn run_resolve(cfg: &MagpiConfig, issues: &[Issue]) -> Result<()> {
    let resolver = resolver_from_config(cfg)?;
    let issues: BTreeSet<Issue> = issues.iter().copied().collect();

    let mut failed = 0usize;
    for &issue in &issues {
        match resolver.resolve(issue) {
            Ok(resolved) => println!("{:<6} {}", issue.number(), resolved.url),
            Err(e) => {
                failed += 1;
                tracing::warn!(issue = issue.number(), kind = e.kind(), "{}", e);
                println!("{:<6} -  ({})", issue.number(), e);
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} issue(s) could not be resolved", failed, issues.len());
    }
    Ok(())
}
