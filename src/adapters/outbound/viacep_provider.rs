//! ViaCEP Address Provider
//!
//! Primary lookup service. Fast, flat payload with Portuguese keys.
//! A missing CEP is reported as `200 {"erro": true}`.

use super::http_lookup::{get_json, trim_base};
use crate::domain::entities::ResolvedAddress;
use crate::domain::errors::LookupError;
use crate::domain::ports::AddressProvider;
use crate::domain::services::ResponseNormalizer;
use crate::domain::value_objects::{Cep, ProviderSource};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

pub const VIACEP_BASE_URL: &str = "https://viacep.com.br/ws";

/// ViaCEP-backed provider.
pub struct ViaCepProvider {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl ViaCepProvider {
    /// Create a provider against `base_url` (e.g. `https://viacep.com.br/ws`).
    pub fn new(client: Client, base_url: &str, timeout: Duration) -> Self {
        Self {
            client,
            base_url: trim_base(base_url),
            timeout,
        }
    }

    fn url(&self, cep: &Cep) -> String {
        format!("{}/{}/json/", self.base_url, cep)
    }
}

/// ViaCEP signals "not found" with `erro: true` (older API) or `erro: "true"`.
fn is_not_found(payload: &Value) -> bool {
    match payload.get("erro") {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

#[async_trait]
impl AddressProvider for ViaCepProvider {
    fn source(&self) -> ProviderSource {
        ProviderSource::ViaCep
    }

    async fn fetch(&self, cep: &Cep) -> Result<ResolvedAddress, LookupError> {
        let payload = get_json(&self.client, &self.url(cep), self.source(), self.timeout).await?;

        if is_not_found(&payload) {
            return Err(LookupError::NotFound {
                provider: self.source(),
            });
        }

        Ok(ResponseNormalizer::to_canonical(&payload, self.source(), cep))
    }
}
