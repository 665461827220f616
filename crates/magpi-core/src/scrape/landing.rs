//! Download link extraction from an issue's landing page.

use crate::error::IssueError;
use scraper::{Html, Selector};

/// First `a[href]` in document order whose href starts with `prefix`.
///
/// `Ok(None)` means the page has no download link, which the site uses for
/// issues that are not available.
pub fn find_download_link(html: &str, prefix: &str) -> Result<Option<String>, IssueError> {
    let document = Html::parse_document(html);
    let a_selector = Selector::parse("a[href]").map_err(|e| IssueError::Selector(e.to_string()))?;

    let link = document
        .select(&a_selector)
        .filter_map(|a| a.value().attr("href"))
        .map(str::trim)
        .find(|href| href.starts_with(prefix))
        .map(str::to_string);

    Ok(link)
}
