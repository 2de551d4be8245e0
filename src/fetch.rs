//! Remote page fetching for single-URL saves.
//!
//! The extractor itself never performs I/O; this module is the collaborator
//! that brings it HTML. [`HttpFetcher`] owns the timeout, the user-agent,
//! and the private-address guard; callers treat any fetch failure as a soft
//! failure and continue with empty metadata.

use std::net::IpAddr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use url::Url;

use crate::config::FetchConfig;

/// A fetched page: body text plus the URL the response actually came from
/// (after redirects).
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub html: String,
    pub final_url: String,
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;
}

/// reqwest-backed fetcher.
pub struct HttpFetcher {
    client: reqwest::Client,
    allow_private: bool,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            allow_private: config.allow_private_addresses,
        })
    }
}

/// Returns `true` if `ip` is a private, loopback, or link-local address.
pub fn is_private_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            let o = v4.octets();
            matches!(
                o,
                [127, ..] | [10, ..] | [169, 254, ..] | [192, 168, ..] | [0, ..] | [255, 255, 255, 255]
            ) || (o[0] == 172 && (16..=31).contains(&o[1]))
        }
        IpAddr::V6(v6) => {
            v6.is_loopback()
                || (v6.segments()[0] & 0xfe00 == 0xfc00)
                || (v6.segments()[0] & 0xffc0 == 0xfe80)
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let parsed = Url::parse(url).with_context(|| format!("Invalid URL: {}", url))?;
        match parsed.scheme() {
            "http" | "https" => {}
            other => bail!("Unsupported URL scheme: {}", other),
        }
        let host = parsed
            .host_str()
            .with_context(|| format!("URL has no host: {}", url))?
            .to_string();

        if !self.allow_private {
            let port = parsed.port_or_known_default().unwrap_or(80);
            let addrs = tokio::net::lookup_host((host.as_str(), port))
                .await
                .with_context(|| format!("Could not resolve host: {}", host))?;
            for addr in addrs {
                if is_private_ip(addr.ip()) {
                    bail!("URL resolves to a private or reserved address");
                }
            }
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;
        let final_url = response.url().to_string();
        let html = response
            .text()
            .await
            .context("Failed to read response body")?;

        Ok(FetchedPage { html, final_url })
    }
}
