//! CLI command handlers. Each command is in its own file.

mod download;
mod latest;
mod resolve;

pub use download::run_download;
pub use latest::run_latest;
pub use resolve::run_resolve;

use anyhow::{Context, Result};
use magpi_core::config::MagpiConfig;
use magpi_core::discovery;
use magpi_core::error::DiscoveryError;
use magpi_core::http::HttpClient;
use magpi_core::issue::Issue;
use magpi_core::resolver::IssueResolver;
use magpi_core::scrape::HeadingAnnouncement;
use magpi_core::site::Site;

/// Client and site layout from config, shared by every command.
fn resolver_from_config(cfg: &MagpiConfig) -> Result<IssueResolver> {
    let site = Site::new(&cfg.base_url, &cfg.download_prefix)
        .with_context(|| format!("invalid base_url {:?}", cfg.base_url))?;
    Ok(IssueResolver::new(HttpClient::from_config(cfg), site))
}

fn discover_latest(cfg: &MagpiConfig, resolver: &IssueResolver) -> Result<Issue, DiscoveryError> {
    let strategy = HeadingAnnouncement::new(cfg.latest_heading_marker.as_str());
    discovery::discover_latest(resolver.client(), resolver.site(), &strategy)
}
