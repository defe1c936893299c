// src/core/net.rs
// Blocking HTTP GET behind a small trait so parsers and the engine never see the client.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::consts::{TIMEOUT_SECS, USER_AGENT};
use crate::error::FetchError;

/// Anything that can turn a URL into document text.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url)
    }
}

/// One HTTP session for a whole run.
///
/// Created by the runner, lent to every fetch, dropped when the run ends.
/// Connections are pooled inside the client, so reuse is cheap.
pub struct Session {
    client: Client,
    base_url: String,
}

impl Session {
    pub fn with_base(base_url: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
    }
}

impl Fetch for Session {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let full = absolute_url(&self.base_url, url);
        log::debug!("GET {full}");

        let resp = self
            .client
            .get(&full)
            .send()
            .map_err(|source| FetchError::Transport { url: full.clone(), source })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: full, status: status.as_u16() });
        }
        resp.text().map_err(|source| FetchError::Transport { url: full, source })
    }
}

/// Resolve site-relative links ("/fight-details/…") against `base`.
/// Absolute URLs pass through untouched.
pub fn absolute_url(base: &str, url: &str) -> String {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }
    let base = base.trim_end_matches('/');
    if let Some(path) = url.strip_prefix('/') {
        format!("{base}/{path}")
    } else {
        format!("{base}/{url}")
    }
}
