//! BrasilAPI Address Provider
//!
//! Fallback lookup service. Slower, but the v2 payload may carry
//! coordinates under `location.coordinates`. A missing CEP is reported
//! with an `errors` array.

use super::http_lookup::{get_json, trim_base};
use crate::domain::entities::ResolvedAddress;
use crate::domain::errors::LookupError;
use crate::domain::ports::AddressProvider;
use crate::domain::services::ResponseNormalizer;
use crate::domain::value_objects::{Cep, ProviderSource};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const BRASILAPI_BASE_URL: &str = "https://brasilapi.com.br/api/cep/v2";

/// BrasilAPI-backed provider.
pub struct BrasilApiProvider {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl BrasilApiProvider {
    /// Create a provider against `base_url` (e.g. `https://brasilapi.com.br/api/cep/v2`).
    pub fn new(client: Client, base_url: &str, timeout: Duration) -> Self {
        Self {
            client,
            base_url: trim_base(base_url),
            timeout,
        }
    }

    fn url(&self, cep: &Cep) -> String {
        format!("{}/{}", self.base_url, cep)
    }
}

#[async_trait]
impl AddressProvider for BrasilApiProvider {
    fn source(&self) -> ProviderSource {
        ProviderSource::BrasilApi
    }

    async fn fetch(&self, cep: &Cep) -> Result<ResolvedAddress, LookupError> {
        let payload = get_json(&self.client, &self.url(cep), self.source(), self.timeout).await?;

        if payload.get("errors").is_some() {
            return Err(LookupError::NotFound {
                provider: self.source(),
            });
        }

        Ok(ResponseNormalizer::to_canonical(&payload, self.source(), cep))
    }
}
