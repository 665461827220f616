//! HTML scraping of the publisher's pages.
//!
//! All knowledge of the site's markup lives here: the landing-page link
//! filter in [`landing`] and the listing-page heading match in [`listing`].
//! Discovery only depends on the [`LatestIssueStrategy`] trait, so a layout
//! change means swapping one implementation.

mod landing;
mod listing;

pub use landing::find_download_link;
pub use listing::HeadingAnnouncement;

use crate::error::DiscoveryError;
use crate::issue::Issue;

/// Extracts the newest issue number from the listing page's HTML.
pub trait LatestIssueStrategy {
    fn latest_issue(&self, html: &str) -> Result<Issue, DiscoveryError>;
}
