//! Latest-issue discovery from the issues listing page.

use crate::error::{DiscoveryError, FetchError};
use crate::http::{HttpClient, Redirects};
use crate::issue::Issue;
use crate::scrape::LatestIssueStrategy;
use crate::site::Site;

/// Fetches `{root}/issues` and lets `strategy` pick the newest issue.
///
/// Any failure is returned; there is no fallback number.
pub fn discover_latest(
    client: &HttpClient,
    site: &Site,
    strategy: &dyn LatestIssueStrategy,
) -> Result<Issue, DiscoveryError> {
    let url = site.listing_url();
    tracing::debug!(%url, "fetching listing page");
    let resp = client.get(&url, Redirects::Follow)?;
    if !resp.is_success() {
        return Err(FetchError::Status {
            url,
            status: resp.status,
        }
        .into());
    }
    let latest = strategy.latest_issue(&resp.text())?;
    tracing::info!(latest = latest.number(), "discovered latest issue");
    Ok(latest)
}
