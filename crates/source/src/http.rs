//! Remote sources over HTTP(S).
//!
//! Transport, TLS and redirect handling all belong to [`reqwest`]; this module
//! only decides what counts as failure. One attempt per call, no retries.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::time::Duration;
use tracing::instrument;

/// Fetches whole response bodies with a single GET request.
#[derive(Clone, Debug, Default)]
pub struct HttpFetcher {
    http: reqwest::Client,
}
impl HttpFetcher {
    /// Wrap an already configured client.
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Build a client with an optional whole-request timeout and user agent.
    ///
    /// Without a timeout, requests only end when the transport gives up.
    pub fn with_options(timeout: Option<Duration>, user_agent: Option<&str>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = user_agent {
            builder = builder.user_agent(user_agent);
        }
        Ok(Self::new(builder.build().or_raise(|| ErrorKind::Client)?))
    }

    /// GET `url` and return the full body.
    ///
    /// Transport failures are [`Fetch`](ErrorKind::Fetch); a response with a
    /// non-success status is [`Status`](ErrorKind::Status) and its body is
    /// discarded so that error pages never end up in the cache.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.http.get(url).send().await.or_raise(|| ErrorKind::Fetch(url.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            exn::bail!(ErrorKind::Status { url: url.to_string(), status: status.as_u16() });
        }
        let body = response.bytes().await.or_raise(|| ErrorKind::Fetch(url.to_string()))?;
        tracing::debug!(url, bytes = body.len(), "Fetched remote source");
        Ok(body.to_vec())
    }
}
