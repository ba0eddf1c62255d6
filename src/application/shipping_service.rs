//! Shipping Service
//!
//! Quotes delivery cost by distance zone from the shop. City and state come
//! from the request when present and from the address resolver otherwise.

use crate::application::address_resolver::AddressResolver;
use crate::domain::errors::LookupError;
use crate::domain::value_objects::Cep;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Shipping tariff configuration.
#[derive(Debug, Clone)]
pub struct ShippingConfig {
    pub origin_city: String,
    pub origin_state: String,
    pub local_fee_cents: u32,
    pub state_fee_cents: u32,
    pub national_fee_cents: u32,
    /// How long a quote stays cached
    pub cache_ttl: Duration,
}

impl Default for ShippingConfig {
    fn default() -> Self {
        Self {
            origin_city: "São Paulo".to_string(),
            origin_state: "SP".to_string(),
            local_fee_cents: 800,
            state_fee_cents: 1500,
            national_fee_cents: 3000,
            cache_ttl: Duration::from_secs(300),
        }
    }
}

/// Shipping quote request.
#[derive(Debug, Clone, Deserialize)]
pub struct ShippingRequest {
    pub cep: String,
    #[serde(default, alias = "estado", alias = "uf")]
    pub state: Option<String>,
    #[serde(default, alias = "cidade", alias = "localidade")]
    pub city: Option<String>,
}

/// Distance zone relative to the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingZone {
    Local,
    State,
    National,
}

/// Shipping quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingQuote {
    pub cep: String,
    pub city: String,
    pub state: String,
    pub zone: ShippingZone,
    pub cost_cents: u32,
    pub estimated_days: u32,
}

/// Shipping service.
pub struct ShippingService {
    resolver: Arc<AddressResolver>,
    config: ShippingConfig,
    quotes: DashMap<String, (ShippingQuote, Instant)>,
}

impl ShippingService {
    pub fn new(resolver: Arc<AddressResolver>, config: ShippingConfig) -> Self {
        Self {
            resolver,
            config,
            quotes: DashMap::new(),
        }
    }

    /// Quote delivery to the requested address.
    ///
    /// Fails with `InvalidFormat` for a malformed CEP and `ResolutionFailed`
    /// when the destination city/state cannot be determined.
    pub async fn quote(&self, request: &ShippingRequest) -> Result<ShippingQuote, LookupError> {
        let cep = Cep::parse(&request.cep)?;
        let state = non_blank(request.state.as_deref());
        let city = non_blank(request.city.as_deref());
        let key = format!(
            "{}|{}|{}",
            cep,
            state.map(str::to_uppercase).unwrap_or_default(),
            city.map(str::to_lowercase).unwrap_or_default()
        );

        if let Some(quote) = self.cached(&key) {
            return Ok(quote);
        }

        let (city, state) = match (city, state) {
            (Some(city), Some(state)) => (city.to_string(), state.to_string()),
            _ => {
                let address = self.resolver.resolve(cep.as_str(), true).await?;
                (
                    city.map(str::to_string).unwrap_or(address.city),
                    state.map(str::to_string).unwrap_or(address.state),
                )
            }
        };

        let zone = self.zone(&city, &state);
        let quote = ShippingQuote {
            cep: cep.to_string(),
            city,
            state,
            zone,
            cost_cents: match zone {
                ShippingZone::Local => self.config.local_fee_cents,
                ShippingZone::State => self.config.state_fee_cents,
                ShippingZone::National => self.config.national_fee_cents,
            },
            estimated_days: match zone {
                ShippingZone::Local => 0,
                ShippingZone::State => 1,
                ShippingZone::National => 3,
            },
        };

        let ttl = self.config.cache_ttl;
        self.quotes.retain(|_, (_, at)| at.elapsed() < ttl);
        self.quotes.insert(key, (quote.clone(), Instant::now()));
        Ok(quote)
    }

    pub fn cached_quotes(&self) -> usize {
        self.quotes.len()
    }

    fn cached(&self, key: &str) -> Option<ShippingQuote> {
        let expired = match self.quotes.get(key) {
            Some(entry) if entry.1.elapsed() < self.config.cache_ttl => {
                return Some(entry.0.clone())
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            self.quotes
                .remove_if(key, |_, (_, at)| at.elapsed() >= self.config.cache_ttl);
        }
        None
    }

    fn zone(&self, city: &str, state: &str) -> ShippingZone {
        if !state.trim().eq_ignore_ascii_case(self.config.origin_state.trim()) {
            ShippingZone::National
        } else if city.trim().to_lowercase() == self.config.origin_city.trim().to_lowercase() {
            ShippingZone::Local
        } else {
            ShippingZone::State
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::adapters::outbound::DashMapAddressCache;
    use crate::application::address_resolver::ResolverConfig;
    use crate::application::testing::MockProvider;
    use crate::domain::value_objects::ProviderSource;

    fn service(primary: MockProvider) -> (ShippingService, Arc<MockProvider>) {
        let primary = Arc::new(primary);
        let resolver = AddressResolver::new(
            primary.clone(),
            Arc::new(MockProvider::failing(ProviderSource::BrasilApi)),
            Arc::new(DashMapAddressCache::new()),
            ResolverConfig::default(),
        );
        (
            ShippingService::new(Arc::new(resolver), ShippingConfig::default()),
            primary,
        )
    }

    fn request(cep: &str, city: Option<&str>, state: Option<&str>) -> ShippingRequest {
        ShippingRequest {
            cep: cep.to_string(),
            city: city.map(str::to_string),
            state: state.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_local_zone_via_resolver() {
        let (svc, primary) = service(MockProvider::ok(ProviderSource::ViaCep));

        let quote = svc.quote(&request("01001-000", None, None)).await.unwrap();

        assert_eq!(quote.zone, ShippingZone::Local);
        assert_eq!(quote.cost_cents, 800);
        assert_eq!(quote.estimated_days, 0);
        assert_eq!(quote.city, "São Paulo");
        assert_eq!(primary.calls(), 1);
    }

    #[tokio::test]
    async fn test_explicit_city_and_state_skip_resolver() {
        let (svc, primary) = service(MockProvider::ok(ProviderSource::ViaCep));

        let quote = svc
            .quote(&request("13010000", Some("Campinas"), Some("sp")))
            .await
            .unwrap();
        assert_eq!(quote.zone, ShippingZone::State);
        assert_eq!(quote.cost_cents, 1500);

        let quote = svc
            .quote(&request("22030060", Some("Rio de Janeiro"), Some("RJ")))
            .await
            .unwrap();
        assert_eq!(quote.zone, ShippingZone::National);
        assert_eq!(quote.cost_cents, 3000);

        assert_eq!(primary.calls(), 0);
    }

    #[tokio::test]
    async fn test_invalid_cep() {
        let (svc, _) = service(MockProvider::ok(ProviderSource::ViaCep));
        let result = svc.quote(&request("123", Some("X"), Some("SP"))).await;
        assert!(matches!(result, Err(LookupError::InvalidFormat(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unresolvable_cep_is_not_cached() {
        let (svc, _) = service(MockProvider::failing(ProviderSource::ViaCep));
        let result = svc.quote(&request("01001000", None, None)).await;
        assert!(matches!(result, Err(LookupError::ResolutionFailed { .. })));
        assert_eq!(svc.cached_quotes(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quote_cache_expires_after_ttl() {
        let (svc, primary) = service(MockProvider::ok(ProviderSource::ViaCep));

        svc.quote(&request("01001000", None, None)).await.unwrap();
        svc.resolver.clear_cache();
        svc.quote(&request("01001000", None, None)).await.unwrap();
        assert_eq!(primary.calls(), 1);

        tokio::time::advance(Duration::from_secs(301)).await;
        svc.quote(&request("01001000", None, None)).await.unwrap();
        assert_eq!(primary.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_quotes_are_swept_on_insert() {
        let (svc, _) = service(MockProvider::ok(ProviderSource::ViaCep));

        for i in 0..50 {
            let city = format!("Cidade {}", i);
            svc.quote(&request("13010000", Some(&city), Some("SP")))
                .await
                .unwrap();
        }
        assert_eq!(svc.cached_quotes(), 50);

        tokio::time::advance(Duration::from_secs(301)).await;
        svc.quote(&request("22030060", Some("Rio de Janeiro"), Some("RJ")))
            .await
            .unwrap();

        assert_eq!(svc.cached_quotes(), 1);
    }

    #[test]
    fn test_request_accepts_portuguese_keys() {
        let req: ShippingRequest = serde_json::from_value(serde_json::json!({
            "cep": "01001-000",
            "cidade": "São Paulo",
            "uf": "SP"
        }))
        .unwrap();
        assert_eq!(req.city.as_deref(), Some("São Paulo"));
        assert_eq!(req.state.as_deref(), Some("SP"));
    }

    #[test]
    fn test_quote_serializes_camel_case() {
        let quote = ShippingQuote {
            cep: "01001000".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
            zone: ShippingZone::Local,
            cost_cents: 800,
            estimated_days: 0,
        };
        let json = serde_json::to_value(quote).unwrap();
        assert_eq!(json["costCents"], 800);
        assert_eq!(json["zone"], "local");
    }
}
