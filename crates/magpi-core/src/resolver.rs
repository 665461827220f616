//! Issue resolver: landing page → PDF URL → file on disk.
//!
//! The PDF is not at a predictable URL. Each issue has a landing page at
//! `{root}/issues/{n}/pdf/download` whose markup carries the real link; the
//! resolver scrapes it and then streams the file into the destination.

use crate::error::{FetchError, IssueError};
use crate::http::{HttpClient, Redirects, StreamError};
use crate::issue::Issue;
use crate::scrape;
use crate::site::Site;
use crate::storage::{Destination, StorageWriter};
use std::path::PathBuf;

/// Absolute PDF location for one issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDownload {
    pub issue: Issue,
    pub url: String,
}

/// Resolves and downloads issues with an explicitly passed client and site.
#[derive(Debug, Clone)]
pub struct IssueResolver {
    client: HttpClient,
    site: Site,
}

impl IssueResolver {
    pub fn new(client: HttpClient, site: Site) -> Self {
        Self { client, site }
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Fetches the landing page (redirects not followed) and scrapes the PDF link.
    pub fn resolve(&self, issue: Issue) -> Result<ResolvedDownload, IssueError> {
        let n = issue.number();
        let landing = self.site.landing_url(issue);
        tracing::debug!(issue = n, url = %landing, "fetching landing page");

        let resp = self
            .client
            .get(&landing, Redirects::Report)
            .map_err(|source| IssueError::Fetch { issue: n, source })?;

        if resp.is_redirect() {
            let location = resp.meta.location.clone().unwrap_or_default();
            tracing::info!(issue = n, %location, "landing page redirected; treating as not yet published");
            return Err(IssueError::NotYetPublished { issue: n, location });
        }
        if !resp.is_success() {
            return Err(IssueError::Fetch {
                issue: n,
                source: FetchError::Status {
                    url: landing,
                    status: resp.status,
                },
            });
        }

        let prefix = self.site.download_prefix();
        let href = scrape::find_download_link(&resp.text(), prefix)?.ok_or_else(|| {
            IssueError::MissingDownloadLink {
                issue: n,
                prefix: prefix.to_string(),
            }
        })?;

        let url = self
            .site
            .absolute(&href)
            .map_err(|source| IssueError::InvalidLink {
                issue: n,
                href: href.clone(),
                source,
            })?;
        tracing::debug!(issue = n, %url, "resolved download link");
        Ok(ResolvedDownload { issue, url })
    }

    /// Resolves `issue` and writes its PDF to `dest`, replacing any previous copy.
    /// The destination directory must already exist.
    pub fn download(&self, issue: Issue, dest: &Destination) -> Result<PathBuf, IssueError> {
        let resolved = self.resolve(issue)?;
        self.fetch_to(&resolved, dest)
    }

    /// Streams an already resolved PDF into `dest`.
    pub fn fetch_to(&self, resolved: &ResolvedDownload, dest: &Destination) -> Result<PathBuf, IssueError> {
        let n = resolved.issue.number();
        let final_path = dest.path_for(resolved.issue);
        let storage_err = |path: PathBuf, source: std::io::Error| IssueError::Storage {
            issue: n,
            path,
            source,
        };

        let mut writer = StorageWriter::create(&final_path).map_err(|e| storage_err(final_path.clone(), e))?;

        match self.client.download_to(&resolved.url, &mut writer) {
            Ok(meta) => {
                if let Some(ct) = meta.content_type.as_deref() {
                    if !ct.to_ascii_lowercase().contains("pdf") {
                        tracing::warn!(issue = n, content_type = ct, "download is not labelled as PDF");
                    }
                }
                let temp = writer.temp_path().to_path_buf();
                let saved = writer.finalize().map_err(|e| storage_err(temp, e))?;
                tracing::info!(issue = n, path = %saved.display(), "saved issue");
                Ok(saved)
            }
            Err(StreamError::Fetch(source)) => {
                writer.discard();
                Err(IssueError::Fetch { issue: n, source })
            }
            Err(StreamError::Sink(source)) => {
                let temp = writer.temp_path().to_path_buf();
                writer.discard();
                Err(storage_err(temp, source))
            }
        }
    }
}
