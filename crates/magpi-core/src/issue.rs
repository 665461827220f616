//! Issue numbers and the local file names derived from them.

use std::fmt;
use std::str::FromStr;

/// One numbered issue of the magazine. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Issue(u32);

impl Issue {
    /// Returns `None` for zero.
    pub fn new(number: u32) -> Option<Self> {
        (number > 0).then_some(Issue(number))
    }

    pub fn number(self) -> u32 {
        self.0
    }

    /// Local file name for this issue, e.g. `MagPi151.pdf` for prefix `MagPi`.
    pub fn file_name(self, prefix: &str) -> String {
        format!("{}{}.pdf", prefix, self.0)
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Issue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u32 = s
            .trim()
            .parse()
            .map_err(|_| format!("not an issue number: {s:?}"))?;
        Issue::new(n).ok_or_else(|| "issue numbers start at 1".to_string())
    }
}

/// Inclusive run of issues written as `N` or `A-B` on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueRange {
    start: Issue,
    end: Issue,
}

impl IssueRange {
    pub fn single(issue: Issue) -> Self {
        Self {
            start: issue,
            end: issue,
        }
    }

    pub fn issues(self) -> impl Iterator<Item = Issue> {
        (self.start.0..=self.end.0).map(Issue)
    }
}

impl FromStr for IssueRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('-') {
            None => Ok(IssueRange::single(s.parse()?)),
            Some((a, b)) => {
                let start: Issue = a.parse()?;
                let end: Issue = b.parse()?;
                if start > end {
                    return Err(format!("range {s:?} runs backwards"));
                }
                Ok(IssueRange { start, end })
            }
        }
    }
}
