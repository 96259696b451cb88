//! HTTP reachability probing
//!
//! One attempt is a HEAD request against the endpoint's address; when HEAD
//! is rejected or fails with a non-timeout error, a single GET is tried
//! before the attempt is declared failed. Every failure is mapped to a
//! [`ProbeOutcome`]; nothing propagates past the prober boundary.

use crate::error::{AppError, Result};
use crate::models::{FailureKind, ProbeOutcome};
use crate::probe::Prober;
use crate::types::ProbeMethod;
use async_trait::async_trait;
use regex::Regex;
use reqwest::{Client, Method, StatusCode, Url};
use std::sync::OnceLock;
use std::time::{Duration, Instant};
use tokio::time::timeout;

/// Fallback pattern for extracting a hostname out of an address that does
/// not parse as a URL
static HOST_PATTERN: OnceLock<Regex> = OnceLock::new();

fn host_pattern() -> &'static Regex {
    HOST_PATTERN.get_or_init(|| {
        Regex::new(r"([A-Za-z0-9][A-Za-z0-9-]*\.)+[A-Za-z]{2,}").expect("valid host pattern")
    })
}

/// Turn a catalog address into a probeable URL, best-effort.
///
/// Parses the address directly, then with an `http://` prefix, then falls
/// back to pattern-matching a hostname and synthesizing an `http://` URL.
/// Returns a human-readable cause when even the fallback fails.
pub fn probe_url(address: &str) -> std::result::Result<Url, String> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err("address is empty".to_string());
    }

    if let Ok(parsed) = Url::parse(trimmed) {
        if parsed.host_str().is_some()
            && (parsed.scheme() == "http" || parsed.scheme() == "https")
        {
            return Ok(parsed);
        }
    }

    if let Ok(parsed) = Url::parse(&format!("http://{}", trimmed)) {
        if parsed.host_str().is_some() {
            return Ok(parsed);
        }
    }

    if let Some(found) = host_pattern().find(trimmed) {
        if let Ok(parsed) = Url::parse(&format!("http://{}", found.as_str())) {
            return Ok(parsed);
        }
    }

    Err(format!("no probeable host in '{}'", trimmed))
}

/// Whether a HEAD response status means the method itself was rejected
fn head_rejected(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::METHOD_NOT_ALLOWED | StatusCode::NOT_IMPLEMENTED
    )
}

/// Map a transport error to its failure category
fn classify_error(error: &reqwest::Error) -> FailureKind {
    if error.is_timeout() {
        return FailureKind::Timeout;
    }

    // reqwest wraps resolver failures inside connect errors; walk the
    // source chain to tell them apart from plain transport failures
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(error);
    while let Some(err) = source {
        let text = err.to_string().to_ascii_lowercase();
        if text.contains("dns") || text.contains("resolve") {
            return FailureKind::Dns;
        }
        source = err.source();
    }

    FailureKind::Transport
}

enum AttemptError {
    TimedOut,
    Request(reqwest::Error),
}

/// HTTP prober backed by a shared reqwest client
pub struct HttpProber {
    client: Client,
}

impl HttpProber {
    /// Create a prober with the default client configuration
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("{}/{}", crate::PKG_NAME, crate::VERSION))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| AppError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Create a prober over a preconfigured client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        limit: Duration,
    ) -> std::result::Result<reqwest::Response, AttemptError> {
        match timeout(limit, self.client.request(method, url).send()).await {
            Err(_) => Err(AttemptError::TimedOut),
            Ok(Err(e)) if e.is_timeout() => Err(AttemptError::TimedOut),
            Ok(Err(e)) => Err(AttemptError::Request(e)),
            Ok(Ok(response)) => Ok(response),
        }
    }

    async fn get_fallback(&self, url: Url, limit: Duration, start: Instant) -> ProbeOutcome {
        match self.send(Method::GET, url, limit).await {
            Ok(response) => ProbeOutcome::success(
                start.elapsed(),
                response.status().as_u16(),
                ProbeMethod::GetFallback,
            ),
            Err(AttemptError::TimedOut) => {
                ProbeOutcome::timed_out(limit, start.elapsed().max(limit))
            }
            Err(AttemptError::Request(e)) => {
                ProbeOutcome::failure(classify_error(&e), e.to_string(), start.elapsed())
            }
        }
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe_once(&self, address: &str, limit: Duration) -> ProbeOutcome {
        let start = Instant::now();

        let url = match probe_url(address) {
            Ok(url) => url,
            Err(detail) => {
                return ProbeOutcome::failure(
                    FailureKind::MalformedAddress,
                    detail,
                    start.elapsed(),
                )
            }
        };

        match self.send(Method::HEAD, url.clone(), limit).await {
            Ok(response) => {
                let status = response.status();
                if head_rejected(status) {
                    self.get_fallback(url, limit, start).await
                } else {
                    // Any answered exchange proves the host reachable
                    ProbeOutcome::success(start.elapsed(), status.as_u16(), ProbeMethod::Head)
                }
            }
            Err(AttemptError::TimedOut) => {
                ProbeOutcome::timed_out(limit, start.elapsed().max(limit))
            }
            Err(AttemptError::Request(_)) => self.get_fallback(url, limit, start).await,
        }
    }
}
