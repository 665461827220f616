//! Latest issue from the listing page's "issue N out now" heading.

use super::LatestIssueStrategy;
use crate::error::DiscoveryError;
use crate::issue::Issue;
use crate::site::issue_number_from_href;
use scraper::{ElementRef, Html, Selector};

/// Finds the first heading whose text contains `marker` (case-insensitive)
/// and reads the issue number from its link.
#[derive(Debug, Clone)]
pub struct HeadingAnnouncement {
    marker: String,
}

impl HeadingAnnouncement {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }
}

fn normalized_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Link inside the heading, or the anchor wrapping it.
fn heading_link<'a>(heading: ElementRef<'a>, a_selector: &Selector) -> Option<&'a str> {
    if let Some(href) = heading
        .select(a_selector)
        .find_map(|a| a.value().attr("href"))
    {
        return Some(href);
    }
    heading
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "a")
        .and_then(|a| a.value().attr("href"))
}

impl LatestIssueStrategy for HeadingAnnouncement {
    fn latest_issue(&self, html: &str) -> Result<Issue, DiscoveryError> {
        let document = Html::parse_document(html);
        let heading_selector = Selector::parse("h1, h2, h3, h4, h5, h6")
            .map_err(|e| DiscoveryError::Selector(e.to_string()))?;
        let a_selector =
            Selector::parse("a[href]").map_err(|e| DiscoveryError::Selector(e.to_string()))?;

        let marker = self.marker.to_lowercase();
        let heading = document
            .select(&heading_selector)
            .find(|h| normalized_text(*h).to_lowercase().contains(&marker))
            .ok_or_else(|| DiscoveryError::HeadingNotFound {
                marker: self.marker.clone(),
            })?;

        let text = normalized_text(heading);
        tracing::debug!(heading = %text, "found latest-issue heading");

        let href = heading_link(heading, &a_selector)
            .ok_or_else(|| DiscoveryError::LinkNotFound { text: text.clone() })?;

        issue_number_from_href(href).ok_or_else(|| DiscoveryError::BadIssueLink {
            href: href.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy() -> HeadingAnnouncement {
        HeadingAnnouncement::new("out now")
    }

    #[test]
    fn reads_issue_from_heading_link() {
        let html = r#"
            <html><body>
              <h1>Issues</h1>
              <h2 class="c-latest"><a href="/issues/151">Raspberry Pi Official Magazine issue 151 out now!</a></h2>
              <h3><a href="/issues/150">Issue 150</a></h3>
            </body></html>
        "#;
        assert_eq!(strategy().latest_issue(html).unwrap().number(), 151);
    }

    #[test]
    fn marker_is_case_insensitive_and_whitespace_tolerant() {
        let html = "<h2>\n  <a href=\"https://magpi.raspberrypi.com/issues/149\">The MagPi issue 149\n   OUT   NOW</a></h2>";
        assert_eq!(strategy().latest_issue(html).unwrap().number(), 149);
    }

    #[test]
    fn falls_back_to_wrapping_anchor() {
        let html = r#"<a href="/issues/88"><div><h3>Issue 88 out now!</h3></div></a>"#;
        assert_eq!(strategy().latest_issue(html).unwrap().number(), 88);
    }

    #[test]
    fn missing_heading_is_an_error() {
        let html = r#"<h2><a href="/issues/151">Issue 151</a></h2><p>out now</p>"#;
        let err = strategy().latest_issue(html).unwrap_err();
        assert!(matches!(err, DiscoveryError::HeadingNotFound { .. }));
    }

    #[test]
    fn heading_without_link_is_an_error() {
        let html = "<h2>Issue 151 out now!</h2>";
        let err = strategy().latest_issue(html).unwrap_err();
        match err {
            DiscoveryError::LinkNotFound { text } => assert_eq!(text, "Issue 151 out now!"),
            other => panic!("expected LinkNotFound, got {other:?}"),
        }
    }

    #[test]
    fn link_without_issue_number_is_an_error() {
        let html = r#"<h2><a href="/subscribe">Issue 151 out now!</a></h2>"#;
        let err = strategy().latest_issue(html).unwrap_err();
        assert!(matches!(err, DiscoveryError::BadIssueLink { .. }));
    }
}
