//! HTTP probing.
//!
//! # Responsibilities
//! - Issue one GET per check with a hard timeout
//! - Report the first response received (redirects are not followed)
//! - Classify the result against the target's accepted status codes

use std::future::Future;
use std::time::Duration;

use reqwest::redirect::Policy;
use reqwest::Client;

use crate::health::state::RawOutcome;

const USER_AGENT: &str = concat!("itsalive/", env!("CARGO_PKG_VERSION"));

/// Result of a single probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    /// A response arrived with this status code.
    Status(u16),
    /// Transport error or timeout.
    Failed(String),
}

/// Source of probe results for a URL.
pub trait Prober: Send + Sync {
    fn probe(&self, url: &str, timeout: Duration) -> impl Future<Output = ProbeResult> + Send;
}

/// Map a probe result to an outcome.
pub fn classify(result: &ProbeResult, ok_statuses: &[u16]) -> RawOutcome {
    match result {
        ProbeResult::Status(code) if ok_statuses.contains(code) => RawOutcome::Ok,
        _ => RawOutcome::Alarm,
    }
}

/// Prober backed by a reqwest client.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
}

impl HttpProber {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .redirect(Policy::none())
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

impl Prober for HttpProber {
    async fn probe(&self, url: &str, timeout: Duration) -> ProbeResult {
        match self.client.get(url).timeout(timeout).send().await {
            Ok(response) => ProbeResult::Status(response.status().as_u16()),
            Err(e) if e.is_timeout() => {
                ProbeResult::Failed(format!("timeout after {}ms", timeout.as_millis()))
            }
            Err(e) => ProbeResult::Failed(e.to_string()),
        }
    }
}
