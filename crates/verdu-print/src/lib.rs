//! # Verdu Print
//!
//! Fire-and-forget dispatch of rendered receipt text to the thermal
//! printer bridge.
//!
//! ## Dispatch Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Sale committed                                                     │
//! │       │  dispatch(text)                                             │
//! │       ▼                                                             │
//! │  tokio::spawn ──► POST {url} {"text": "..."}                        │
//! │       │                                                             │
//! │       ├── 2xx      receipt on its way, debug log                    │
//! │       └── failure  warn log, dropped                                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The bridge sits on the local network next to the register, so the
//! client carries a short timeout: a wedged printer should never hold a
//! request thread hostage. Nothing here is retried or persisted; if the
//! paper trail matters the sale itself is already durable and can be
//! reprinted.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

// =============================================================================
// Errors
// =============================================================================

/// Errors from a single print attempt.
///
/// Callers using [`PrintClient::dispatch`] never see these; they exist
/// for the rare path that wants to await the sink (health checks, tests).
#[derive(Debug, thiserror::Error)]
pub enum PrintError {
    /// The request could not be sent or timed out.
    #[error("printer bridge unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The bridge answered with a non-success status.
    #[error("printer bridge rejected the job: status {status}")]
    Rejected { status: u16 },
}

// =============================================================================
// Client
// =============================================================================

/// Body the printer bridge accepts.
#[derive(Debug, Serialize)]
struct PrintRequest<'a> {
    text: &'a str,
}

/// HTTP client for the thermal printer bridge.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct PrintClient {
    http: reqwest::Client,
    url: String,
}

impl PrintClient {
    /// Creates a client for the bridge at `url` with the given per-request
    /// timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        // Building with a timeout and no TLS/proxy config cannot fail.
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        PrintClient {
            http,
            url: url.into(),
        }
    }

    /// The bridge endpoint this client posts to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends one print job and reports the outcome.
    pub async fn send(&self, text: &str) -> Result<(), PrintError> {
        let response = self
            .http
            .post(&self.url)
            .json(&PrintRequest { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PrintError::Rejected {
                status: status.as_u16(),
            });
        }

        debug!(url = %self.url, bytes = text.len(), "print job accepted");
        Ok(())
    }

    /// Queues one print job without waiting for the printer.
    ///
    /// The job runs on a spawned task; failure is logged and swallowed.
    /// The sale that produced `text` is already committed, so a lost
    /// ticket costs a reprint, never data.
    pub fn dispatch(&self, text: String) {
        let client = self.clone();
        tokio::spawn(async move {
            if let Err(err) = client.send(&text).await {
                warn!(url = %client.url, error = %err, "print dispatch failed");
            }
        });
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
