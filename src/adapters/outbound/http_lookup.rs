//! Shared HTTP plumbing for the lookup providers.

use crate::domain::errors::LookupError;
use crate::domain::value_objects::ProviderSource;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// GET `url` and decode the JSON body, bounded by `timeout`.
///
/// The timeout covers the whole exchange (connect, headers and body).
/// When it fires the in-flight request future is dropped, which aborts
/// the underlying connection.
pub(crate) async fn get_json(
    client: &Client,
    url: &str,
    provider: ProviderSource,
    timeout: Duration,
) -> Result<Value, LookupError> {
    let exchange = async {
        let response = client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| transport_error(provider, timeout, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Http {
                provider,
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| LookupError::Decode {
                provider,
                message: e.to_string(),
            })
    };

    match tokio::time::timeout(timeout, exchange).await {
        Ok(result) => result,
        Err(_) => Err(LookupError::Timeout {
            provider,
            timeout_ms: timeout.as_millis() as u64,
        }),
    }
}

fn transport_error(provider: ProviderSource, timeout: Duration, e: reqwest::Error) -> LookupError {
    if e.is_timeout() {
        LookupError::Timeout {
            provider,
            timeout_ms: timeout.as_millis() as u64,
        }
    } else {
        LookupError::Transport {
            provider,
            message: e.to_string(),
        }
    }
}

/// Strip trailing slashes so URL templates can append `/{cep}`.
pub(crate) fn trim_base(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}
