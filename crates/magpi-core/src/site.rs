//! URL layout of the publisher's site.

use crate::issue::Issue;
use url::Url;

/// Publisher root plus the marker that identifies PDF links on landing pages.
#[derive(Debug, Clone)]
pub struct Site {
    root: String,
    base: Url,
    download_prefix: String,
}

impl Site {
    /// `root` is the site origin, e.g. `https://magpi.raspberrypi.com`.
    /// A trailing slash is ignored.
    pub fn new(root: &str, download_prefix: &str) -> Result<Self, url::ParseError> {
        let root = root.trim_end_matches('/').to_string();
        let base = Url::parse(&format!("{}/", root))?;
        Ok(Site {
            root,
            base,
            download_prefix: download_prefix.to_string(),
        })
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn download_prefix(&self) -> &str {
        &self.download_prefix
    }

    /// Page listing all issues; the newest one is announced in a heading.
    pub fn listing_url(&self) -> String {
        format!("{}/issues", self.root)
    }

    /// Landing page that gates the PDF of `issue`.
    pub fn landing_url(&self, issue: Issue) -> String {
        format!("{}/issues/{}/pdf/download", self.root, issue.number())
    }

    /// Absolute URL for an href scraped from one of the site's pages.
    pub fn absolute(&self, href: &str) -> Result<String, url::ParseError> {
        Ok(self.base.join(href)?.to_string())
    }
}

/// Issue number from a link such as `/issues/151` or
/// `https://magpi.raspberrypi.com/issues/151/pdf`.
///
/// Returns `None` if there is no positive number right after an `issues` segment.
pub fn issue_number_from_href(href: &str) -> Option<Issue> {
    let base = Url::parse("http://localhost/").ok()?;
    let parsed = base.join(href.trim()).ok()?;
    let mut segments = parsed.path_segments()?;
    segments.find(|s| *s == "issues")?;
    segments.next()?.parse().ok()
}
