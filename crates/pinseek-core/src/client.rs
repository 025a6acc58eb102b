//! HTTP client for the postal pincode lookup service
//!
//! The public service at `api.postalpincode.in` answers
//! `GET /pincode/{code}` with a JSON array whose first element carries the
//! matching post offices. This module wraps that call behind the
//! [`PincodeLookup`] trait so the interactive loop can also be driven by an
//! in-process fake, and maps transport and decode failures onto
//! [`PinseekError`] variants the session can surface verbatim.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::core_types::{LookupEnvelope, LookupOutcome};
use crate::errors::PinseekError;
use crate::pincode::Pincode;

/// Base URL of the public lookup service.
pub const POSTAL_API_BASE: &str = "https://api.postalpincode.in";

/// Default per-request timeout. The upstream imposes none; without one a
/// dead connection would leave the screen loading forever.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Backend abstraction for pincode lookups.
#[async_trait]
pub trait PincodeLookup: Send + Sync {
    async fn lookup(&self, pincode: &Pincode) -> Result<LookupOutcome, PinseekError>;
}

pub type LookupClientBox = Box<dyn PincodeLookup>;

/// Client for the public postal pincode REST API.
pub struct PostalApiClient {
    client: Client,
    base_url: String,
}

impl PostalApiClient {
    /// Client against the public service with the default timeout.
    pub fn new() -> Self {
        Self::with_base_url(POSTAL_API_BASE, Duration::from_millis(DEFAULT_TIMEOUT_MS))
    }

    /// Client against an alternate endpoint, e.g. a local mock service.
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for PostalApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PincodeLookup for PostalApiClient {
    async fn lookup(&self, pincode: &Pincode) -> Result<LookupOutcome, PinseekError> {
        let url = format!("{}/pincode/{}", self.base_url, pincode);
        log::info!("Pincode lookup: GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PinseekError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PinseekError::NetworkError(format!(
                "lookup service returned {}",
                response.status()
            )));
        }

        let envelopes: Vec<LookupEnvelope> = response
            .json()
            .await
            .map_err(|e| PinseekError::ParseError(e.to_string()))?;

        let outcome = LookupOutcome::from_envelopes(envelopes);
        match &outcome {
            LookupOutcome::Matches(records) => {
                log::info!("Pincode {} matched {} record(s)", pincode, records.len());
            }
            LookupOutcome::NoMatches => {
                log::info!("Pincode {} matched no records", pincode);
            }
        }
        Ok(outcome)
    }
}
