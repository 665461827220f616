//! Batch orchestration: choose issues, download each in order, collect outcomes.
//!
//! A failed issue is recorded and the batch moves on; only preparing the
//! destination or discovering the latest issue can stop a run.

use crate::error::{DiscoveryError, IssueError};
use crate::issue::Issue;
use crate::resolver::IssueResolver;
use crate::storage::Destination;
use anyhow::Result;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Which issues a run should cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueSelection {
    /// Only the newest issue.
    Latest,
    /// Every issue from 1 to the newest.
    All,
    /// Exactly these issues.
    Explicit(Vec<Issue>),
}

impl IssueSelection {
    /// Ascending, de-duplicated issue list. `latest` is only called for
    /// [`IssueSelection::Latest`] and [`IssueSelection::All`].
    pub fn issues<F>(&self, latest: F) -> Result<Vec<Issue>, DiscoveryError>
    where
        F: FnOnce() -> Result<Issue, DiscoveryError>,
    {
        match self {
            IssueSelection::Latest => Ok(vec![latest()?]),
            IssueSelection::All => {
                let last = latest()?.number();
                Ok((1..=last).filter_map(Issue::new).collect())
            }
            IssueSelection::Explicit(list) => {
                let set: BTreeSet<Issue> = list.iter().copied().collect();
                Ok(set.into_iter().collect())
            }
        }
    }
}

/// Result of one issue in a batch.
#[derive(Debug)]
pub enum DownloadOutcome {
    Saved(PathBuf),
    Failed(IssueError),
}

impl DownloadOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, DownloadOutcome::Saved(_))
    }
}

/// Per-issue outcomes in the order they ran.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<(Issue, DownloadOutcome)>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn saved_count(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_saved()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.total() - self.saved_count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (Issue, &IssueError)> {
        self.outcomes.iter().filter_map(|(issue, o)| match o {
            DownloadOutcome::Failed(e) => Some((*issue, e)),
            DownloadOutcome::Saved(_) => None,
        })
    }

    pub fn saved(&self) -> impl Iterator<Item = (Issue, &PathBuf)> {
        self.outcomes.iter().filter_map(|(issue, o)| match o {
            DownloadOutcome::Saved(p) => Some((*issue, p)),
            DownloadOutcome::Failed(_) => None,
        })
    }
}

/// Downloads `issues` sequentially into `dest`, creating it first if absent.
///
/// `on_outcome` is called after each issue, before the next one starts.
pub fn run_batch<F>(
    resolver: &IssueResolver,
    issues: &[Issue],
    dest: &Destination,
    mut on_outcome: F,
) -> Result<BatchReport>
where
    F: FnMut(Issue, &DownloadOutcome),
{
    dest.prepare()?;
    tracing::info!(count = issues.len(), dest = %dest.dir().display(), "starting batch");

    let mut report = BatchReport::default();
    for &issue in issues {
        let outcome = match resolver.download(issue, dest) {
            Ok(path) => DownloadOutcome::Saved(path),
            Err(e) => {
                tracing::warn!(issue = issue.number(), kind = e.kind(), "{}", e);
                DownloadOutcome::Failed(e)
            }
        };
        on_outcome(issue, &outcome);
        report.outcomes.push((issue, outcome));
    }

    tracing::info!(
        saved = report.saved_count(),
        failed = report.failed_count(),
        "batch finished"
    );
    Ok(report)
}
