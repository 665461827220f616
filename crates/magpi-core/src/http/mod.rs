//! Blocking HTTP GET over libcurl.
//!
//! Landing pages are fetched without following redirects so the caller can
//! see the 3xx the publisher uses for unreleased issues; listing pages and PDF
//! bodies follow redirects. Response headers are collected and parsed into
//! [`ResponseMeta`].

mod parse;

use crate::config::MagpiConfig;
use crate::error::FetchError;
use std::io::{self, Write};
use std::str;
use std::time::Duration;
use thiserror::Error;

/// Redirect handling for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirects {
    /// Follow up to 10 hops and report the final response.
    Follow,
    /// Return the 3xx response itself.
    Report,
}

/// Headers of interest from the (final) response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseMeta {
    pub location: Option<String>,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
}

/// A fully buffered response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u32,
    pub meta: ResponseMeta,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }

    /// Body as text; invalid UTF-8 is replaced rather than rejected.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Failure while streaming a body into a local writer.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("write failed: {0}")]
    Sink(#[source] io::Error),
}

/// Request settings shared by every GET. Cheap to clone; each request uses
/// its own curl handle.
#[derive(Debug, Clone)]
pub struct HttpClient {
    user_agent: String,
    connect_timeout: Duration,
}

impl HttpClient {
    pub fn new(user_agent: impl Into<String>, connect_timeout: Duration) -> Self {
        Self {
            user_agent: user_agent.into(),
            connect_timeout,
        }
    }

    pub fn from_config(cfg: &MagpiConfig) -> Self {
        Self::new(
            cfg.user_agent.clone(),
            Duration::from_secs(cfg.connect_timeout_secs),
        )
    }

    /// GET `url` and buffer the whole body. Any status is returned as-is.
    pub fn get(&self, url: &str, redirects: Redirects) -> Result<HttpResponse, FetchError> {
        let mut body = Vec::new();
        let (status, meta) = self.perform(url, redirects, |data| {
            body.extend_from_slice(data);
            true
        })?;
        tracing::debug!(%url, status, bytes = body.len(), "GET done");
        Ok(HttpResponse { status, meta, body })
    }

    /// GET `url` following redirects and stream the body into `sink`.
    ///
    /// Non-2xx final status is an error; whatever was written to `sink`
    /// before that is the caller's to discard.
    pub fn download_to<W: Write>(&self, url: &str, sink: &mut W) -> Result<ResponseMeta, StreamError> {
        let mut sink_err: Option<io::Error> = None;
        let mut written: u64 = 0;
        let result = self.perform(url, Redirects::Follow, |data| match sink.write_all(data) {
            Ok(()) => {
                written += data.len() as u64;
                true
            }
            Err(e) => {
                sink_err = Some(e);
                false // abort transfer
            }
        });
        if let Some(e) = sink_err {
            return Err(StreamError::Sink(e));
        }
        let (status, meta) = result?;
        if !(200..300).contains(&status) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            }
            .into());
        }
        tracing::debug!(%url, status, bytes = written, "download done");
        Ok(meta)
    }

    fn perform<F>(&self, url: &str, redirects: Redirects, mut on_data: F) -> Result<(u32, ResponseMeta), FetchError>
    where
        F: FnMut(&[u8]) -> bool,
    {
        let transport = |source: curl::Error| FetchError::Transport {
            url: url.to_string(),
            source,
        };
        let mut headers: Vec<String> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url).map_err(transport)?;
        easy.get(true).map_err(transport)?;
        match redirects {
            Redirects::Follow => {
                easy.follow_location(true).map_err(transport)?;
                easy.max_redirections(10).map_err(transport)?;
            }
            Redirects::Report => easy.follow_location(false).map_err(transport)?,
        }
        easy.useragent(&self.user_agent).map_err(transport)?;
        easy.connect_timeout(self.connect_timeout).map_err(transport)?;

        {
            let mut transfer = easy.transfer();
            transfer
                .header_function(|data| {
                    if let Ok(s) = str::from_utf8(data) {
                        headers.push(s.trim_end().to_string());
                    }
                    true
                })
                .map_err(transport)?;
            transfer
                .write_function(|data| Ok(if on_data(data) { data.len() } else { 0 }))
                .map_err(transport)?;
            transfer.perform().map_err(transport)?;
        }

        let status = easy.response_code().map_err(transport)?;
        Ok((status, parse::parse_headers(&headers)))
    }
}
