//! Pluggable HTTP transport.
//!
//! The client only needs one HTTP capability: POST a JSON body and get back
//! a status line and a body. That seam is the [`HttpTransport`] trait, with
//! [`ReqwestTransport`] as the default implementation. Connection pooling,
//! TLS and timeouts live behind it.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;

/// The parts of an HTTP response the client interprets.
#[derive(Debug, Clone)]
pub struct HttpReply {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: String,
}

/// A one-shot JSON POST. Implementations make exactly one attempt; the
/// configured timeout is the only cancellation mechanism.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// POSTs `body` to `url` with content-type `application/json` and
    /// returns the response status and body. An `Err` means no HTTP status
    /// was obtained at all.
    async fn post_json(&self, url: &str, body: String) -> anyhow::Result<HttpReply>;
}

/// Default transport backed by a shared `reqwest` client.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a transport whose requests time out after `timeout`, both for
    /// connecting and for the full exchange.
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .context("failed to build the http client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: String) -> anyhow::Result<HttpReply> {
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .context("failed to reach the send api")?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .context("failed to read the send api response body")?;

        Ok(HttpReply { status, body })
    }
}
