//! Authenticated HTTP GET for asset blobs.
//!
//! The asset store only sees the [`Transport`] trait; [`CurlTransport`] is the
//! libcurl-backed implementation used by the CLI.

mod parse;

use anyhow::{Context, Result};
use std::str;
use std::time::Duration;

use crate::credential::Credential;

/// What the asset store needs from one GET.
#[derive(Debug, Clone, Default)]
pub struct FetchResponse {
    /// Final HTTP status code (after redirects).
    pub status: u32,
    /// `Content-Disposition` of the final response, if sent.
    pub content_disposition: Option<String>,
    /// Response body, verbatim.
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Fetches bytes and headers for a URL on behalf of a session.
///
/// Implementations block until the whole body is received.
pub trait Transport {
    fn fetch(&self, url: &str, credential: &Credential) -> Result<FetchResponse>;
}

/// Blocking libcurl transport.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    connect_timeout: Duration,
    timeout: Duration,
}

impl CurlTransport {
    pub fn new(connect_timeout: Duration, timeout: Duration) -> Self {
        Self {
            connect_timeout,
            timeout,
        }
    }
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(30), Duration::from_secs(300))
    }
}

impl Transport for CurlTransport {
    fn fetch(&self, url: &str, credential: &Credential) -> Result<FetchResponse> {
        let mut header_lines: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url).context("invalid URL")?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        let mut list = curl::easy::List::new();
        list.append(&format!("Cookie: {}", credential.cookie_header()))?;
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer
                .perform()
                .with_context(|| format!("GET {} failed", url))?;
        }

        let status = easy.response_code().context("no response code")?;
        let headers = parse::parse_headers(&header_lines);
        tracing::debug!(url, status, bytes = body.len(), "asset GET finished");

        Ok(FetchResponse {
            status,
            content_disposition: headers.content_disposition,
            body,
        })
    }
}
