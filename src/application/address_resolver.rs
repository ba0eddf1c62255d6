//! Address Resolver - CEP lookup use case
//!
//! Orchestrates postal-code resolution: validation, cache, a primary
//! provider with bounded retries, and a secondary provider with the same
//! policy once the primary is exhausted.

use crate::adapters::outbound::{BrasilApiProvider, DashMapAddressCache, ViaCepProvider};
use crate::domain::entities::ResolvedAddress;
use crate::domain::errors::LookupError;
use crate::domain::ports::{AddressCache, AddressProvider};
use crate::domain::value_objects::Cep;
use dashmap::DashMap;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::time::Instant;

/// Tunables for the resolution flow.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverConfig {
    /// Per-request time budget of each provider
    pub provider_timeout: Duration,
    /// Attempts per provider (not retries after the first)
    pub retry_attempts: u32,
    /// Backoff unit; the wait after attempt `n` is `n * backoff_step`
    pub backoff_step: Duration,
    /// Validity window of cached addresses
    pub cache_ttl: Duration,
    /// Default pause between batch lookups
    pub batch_spacing: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            provider_timeout: Duration::from_secs(5),
            retry_attempts: 2,
            backoff_step: Duration::from_millis(500),
            cache_ttl: Duration::from_secs(3600),
            batch_spacing: Duration::from_millis(100),
        }
    }
}

/// Per-item outcome of a batch resolution.
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    /// Input exactly as the caller supplied it
    pub identifier: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<ResolvedAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Cache statistics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverStats {
    pub cache_size: usize,
    pub cached_identifiers: Vec<String>,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}

/// Address resolver - CEP lookup use case.
///
/// Constructed once at startup and shared behind an `Arc`. Concurrent
/// lookups for the same CEP are serialized through a per-CEP gate, so
/// the second caller is answered from the cache the first one filled.
pub struct AddressResolver {
    primary: Arc<dyn AddressProvider>,
    secondary: Arc<dyn AddressProvider>,
    cache: Arc<dyn AddressCache>,
    config: ResolverConfig,
    in_flight: DashMap<Cep, Arc<Mutex<()>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl AddressResolver {
    /// Create a resolver from explicit ports.
    pub fn new(
        primary: Arc<dyn AddressProvider>,
        secondary: Arc<dyn AddressProvider>,
        cache: Arc<dyn AddressCache>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            primary,
            secondary,
            cache,
            config,
            in_flight: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Create a resolver wired to ViaCEP (primary) and BrasilAPI (fallback).
    pub fn http(
        client: reqwest::Client,
        viacep_base_url: &str,
        brasilapi_base_url: &str,
        config: ResolverConfig,
    ) -> Self {
        let primary = Arc::new(ViaCepProvider::new(
            client.clone(),
            viacep_base_url,
            config.provider_timeout,
        ));
        let secondary = Arc::new(BrasilApiProvider::new(
            client,
            brasilapi_base_url,
            config.provider_timeout,
        ));
        let cache = Arc::new(DashMapAddressCache::with_ttl(config.cache_ttl));
        Self::new(primary, secondary, cache, config)
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve a raw, possibly formatted, CEP.
    ///
    /// 1. Normalizes the input (`InvalidFormat` surfaces immediately)
    /// 2. Serves a fresh cache entry when `use_cache` is set
    /// 3. Tries the primary provider, then the secondary, each with
    ///    bounded retries and linear backoff
    /// 4. Caches and returns the first success
    ///
    /// Fails with `ResolutionFailed` once both providers are exhausted.
    /// Failures are never cached.
    pub async fn resolve(
        &self,
        raw: &str,
        use_cache: bool,
    ) -> Result<ResolvedAddress, LookupError> {
        let cep = Cep::parse(raw)?;

        if use_cache {
            if let Some(address) = self.cache_hit(&cep) {
                return Ok(address);
            }
        }

        let ticket = InFlight::enter(&self.in_flight, &cep);
        let _permit = ticket.acquire().await;
        match use_cache.then(|| self.cache_hit(&cep)).flatten() {
            Some(address) => Ok(address),
            None => {
                if use_cache {
                    self.misses.fetch_add(1, Ordering::Relaxed);
                }
                self.run_chain(&cep, raw).await
            }
        }
    }

    /// Resolve several CEPs one after another.
    ///
    /// Requests are issued strictly in input order with `spacing` between
    /// them. A failing item is recorded and does not stop the batch.
    pub async fn resolve_many<I, S>(
        &self,
        identifiers: I,
        spacing: Option<Duration>,
    ) -> Vec<BatchResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let spacing = spacing.unwrap_or(self.config.batch_spacing);
        let mut results = Vec::new();

        for (index, identifier) in identifiers.into_iter().enumerate() {
            if index > 0 && !spacing.is_zero() {
                tokio::time::sleep(spacing).await;
            }

            let identifier = identifier.as_ref();
            let result = match self.resolve(identifier, true).await {
                Ok(address) => BatchResult {
                    identifier: identifier.to_string(),
                    success: true,
                    value: Some(address),
                    error: None,
                },
                Err(e) => BatchResult {
                    identifier: identifier.to_string(),
                    success: false,
                    value: None,
                    error: Some(e.to_string()),
                },
            };
            results.push(result);
        }

        results
    }

    /// Cache size, cached identifiers and hit rate.
    pub fn stats(&self) -> ResolverStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;

        ResolverStats {
            cache_size: self.cache.len(),
            cached_identifiers: self.cache.keys(),
            hits,
            misses,
            hit_rate: if total == 0 {
                0.0
            } else {
                hits as f64 / total as f64
            },
        }
    }

    /// Drop every cached address.
    pub fn clear_cache(&self) {
        self.cache.clear();
        tracing::debug!("cep cache cleared");
    }

    /// Release resources at teardown.
    pub fn shutdown(&self) {
        self.clear_cache();
    }

    fn cache_hit(&self, cep: &Cep) -> Option<ResolvedAddress> {
        let address = self.cache.get(cep)?;
        self.hits.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("cep {} served from cache", cep);
        Some(address.as_cached())
    }

    async fn run_chain(&self, cep: &Cep, raw: &str) -> Result<ResolvedAddress, LookupError> {
        let mut last_error = None;

        for provider in [&self.primary, &self.secondary] {
            match self.attempt(provider.as_ref(), cep).await {
                Ok(address) => {
                    self.cache.put(cep.clone(), address.clone());
                    tracing::info!("cep {} resolved by {}", cep, provider.source());
                    return Ok(address);
                }
                Err(e) => {
                    tracing::warn!("{} exhausted for cep {}: {}", provider.source(), cep, e);
                    last_error = Some(e);
                }
            }
        }

        let last_error = last_error.map(|e| e.to_string()).unwrap_or_default();
        tracing::error!("cep {} could not be resolved: {}", cep, last_error);
        Err(LookupError::ResolutionFailed {
            cep: raw.to_string(),
            last_error,
        })
    }

    /// Call one provider up to `retry_attempts` times.
    async fn attempt(
        &self,
        provider: &dyn AddressProvider,
        cep: &Cep,
    ) -> Result<ResolvedAddress, LookupError> {
        let attempts = self.config.retry_attempts.max(1);
        let mut attempt = 1;

        loop {
            let started = Instant::now();
            match provider.fetch(cep).await {
                Ok(address) => return Ok(address),
                Err(e) if attempt >= attempts => return Err(e),
                Err(e) => {
                    tracing::debug!(
                        provider = %provider.source(),
                        attempt,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "lookup attempt failed: {}",
                        e
                    );
                    tokio::time::sleep(self.config.backoff_step * attempt).await;
                    attempt += 1;
                }
            }
        }
    }
}

/// One caller's hold on the per-CEP gate.
///
/// The map entry is removed when the last holder drops its ticket, including
/// when the owning future is cancelled while waiting or resolving.
struct InFlight<'a> {
    map: &'a DashMap<Cep, Arc<Mutex<()>>>,
    cep: Cep,
    gate: Option<Arc<Mutex<()>>>,
}

impl<'a> InFlight<'a> {
    fn enter(map: &'a DashMap<Cep, Arc<Mutex<()>>>, cep: &Cep) -> Self {
        let gate = map.entry(cep.clone()).or_default().clone();
        Self {
            map,
            cep: cep.clone(),
            gate: Some(gate),
        }
    }

    /// Wait until no other caller is running the provider chain for this CEP.
    async fn acquire(&self) -> Option<OwnedMutexGuard<()>> {
        Some(self.gate.clone()?.lock_owned().await)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        // release our reference first so the count reflects the other holders
        self.gate.take();
        self.map
            .remove_if(&self.cep, |_, gate| Arc::strong_count(gate) == 1);
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::application::testing::{address, MockProvider};
    use crate::domain::value_objects::ProviderSource;

    struct Fixture {
        primary: Arc<MockProvider>,
        secondary: Arc<MockProvider>,
        cache: Arc<DashMapAddressCache>,
        resolver: AddressResolver,
    }

    fn fixture(primary: MockProvider, secondary: MockProvider) -> Fixture {
        let primary = Arc::new(primary);
        let secondary = Arc::new(secondary);
        let cache = Arc::new(DashMapAddressCache::new());
        let resolver = AddressResolver::new(
            primary.clone(),
            secondary.clone(),
            cache.clone(),
            ResolverConfig::default(),
        );
        Fixture {
            primary,
            secondary,
            cache,
            resolver,
        }
    }

    fn cep(s: &str) -> Cep {
        Cep::parse(s).unwrap()
    }

    // ===== Validation Tests =====

    #[tokio::test]
    async fn test_invalid_format_makes_no_network_call() {
        let f = fixture(
            MockProvider::ok(ProviderSource::ViaCep),
            MockProvider::ok(ProviderSource::BrasilApi),
        );

        for raw in ["1234567", "123456789", "", "abcdefgh", "01001-00"] {
            let result = f.resolver.resolve(raw, true).await;
            assert_eq!(result, Err(LookupError::InvalidFormat(raw.to_string())));
        }

        assert_eq!(f.primary.calls(), 0);
        assert_eq!(f.secondary.calls(), 0);
    }

    // ===== Cache Tests =====

    #[tokio::test]
    async fn test_cache_hit_bypasses_providers() {
        let f = fixture(
            MockProvider::ok(ProviderSource::ViaCep),
            MockProvider::ok(ProviderSource::BrasilApi),
        );
        f.cache
            .put(cep("01001000"), address(ProviderSource::ViaCep, "01001000"));

        let result = f.resolver.resolve("01001-000", true).await.unwrap();

        assert!(result.cached);
        assert_eq!(result.street, "Praça da Sé");
        assert_eq!(f.primary.calls(), 0);
        assert_eq!(f.secondary.calls(), 0);
    }

    #[tokio::test]
    async fn test_use_cache_false_goes_to_network() {
        let f = fixture(
            MockProvider::ok(ProviderSource::ViaCep),
            MockProvider::ok(ProviderSource::BrasilApi),
        );
        f.cache
            .put(cep("01001000"), address(ProviderSource::BrasilApi, "01001000"));

        let result = f.resolver.resolve("01001000", false).await.unwrap();

        assert!(!result.cached);
        assert_eq!(result.source, ProviderSource::ViaCep);
        assert_eq!(f.primary.calls(), 1);
        // fresh result overwrote the entry
        assert_eq!(
            f.cache.get(&cep("01001000")).unwrap().source,
            ProviderSource::ViaCep
        );
    }

    #[tokio::test]
    async fn test_success_populates_cache() {
        let f = fixture(
            MockProvider::ok(ProviderSource::ViaCep),
            MockProvider::ok(ProviderSource::BrasilApi),
        );

        let first = f.resolver.resolve("01001000", true).await.unwrap();
        assert!(!first.cached);

        let second = f.resolver.resolve("01001000", true).await.unwrap();
        assert!(second.cached);
        assert_eq!(f.primary.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_triggers_new_lookup() {
        let f = fixture(
            MockProvider::ok(ProviderSource::ViaCep),
            MockProvider::ok(ProviderSource::BrasilApi),
        );

        f.resolver.resolve("01001000", true).await.unwrap();
        let first_stamp = f.cache.entry(&cep("01001000")).unwrap().stored_at;

        tokio::time::advance(Duration::from_secs(3601)).await;

        let result = f.resolver.resolve("01001000", true).await.unwrap();
        assert!(!result.cached);
        assert_eq!(f.primary.calls(), 2);

        let second_stamp = f.cache.entry(&cep("01001000")).unwrap().stored_at;
        assert!(second_stamp > first_stamp);
    }

    // ===== Fallback / Retry Tests =====

    #[tokio::test(start_paused = true)]
    async fn test_primary_retried_then_secondary_succeeds() {
        let f = fixture(
            MockProvider::failing(ProviderSource::ViaCep),
            MockProvider::ok(ProviderSource::BrasilApi),
        );

        let started = Instant::now();
        let result = f.resolver.resolve("01001000", true).await.unwrap();

        assert_eq!(result.source, ProviderSource::BrasilApi);
        assert_eq!(f.primary.calls(), 2);
        assert_eq!(f.secondary.calls(), 1);
        // one backoff of 1 * 500ms between the two primary attempts
        assert_eq!(started.elapsed(), Duration::from_millis(500));
        assert_eq!(
            f.cache.get(&cep("01001000")).unwrap().source,
            ProviderSource::BrasilApi
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_primary_second_attempt_short_circuits() {
        let primary = MockProvider::new(ProviderSource::ViaCep, |cep, call| {
            if call == 1 {
                Err(LookupError::Timeout {
                    provider: ProviderSource::ViaCep,
                    timeout_ms: 5000,
                })
            } else {
                Ok(address(ProviderSource::ViaCep, cep.as_str()))
            }
        });
        let f = fixture(primary, MockProvider::ok(ProviderSource::BrasilApi));

        let result = f.resolver.resolve("01001000", true).await.unwrap();

        assert_eq!(result.source, ProviderSource::ViaCep);
        assert_eq!(f.primary.calls(), 2);
        assert_eq!(f.secondary.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_providers_fail() {
        let f = fixture(
            MockProvider::failing(ProviderSource::ViaCep),
            MockProvider::new(ProviderSource::BrasilApi, |_, _| {
                Err(LookupError::NotFound {
                    provider: ProviderSource::BrasilApi,
                })
            }),
        );

        let started = Instant::now();
        let result = f.resolver.resolve("01001-000", true).await;

        match result {
            Err(LookupError::ResolutionFailed { cep, last_error }) => {
                assert_eq!(cep, "01001-000");
                assert_eq!(last_error, "BrasilAPI: CEP não encontrado");
            }
            other => panic!("expected ResolutionFailed, got {:?}", other),
        }
        assert_eq!(f.primary.calls(), 2);
        assert_eq!(f.secondary.calls(), 2);
        assert_eq!(started.elapsed(), Duration::from_millis(1000));
        assert!(f.cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_linear_backoff_with_more_attempts() {
        let primary = Arc::new(MockProvider::failing(ProviderSource::ViaCep));
        let secondary = Arc::new(MockProvider::failing(ProviderSource::BrasilApi));
        let resolver = AddressResolver::new(
            primary.clone(),
            secondary.clone(),
            Arc::new(DashMapAddressCache::new()),
            ResolverConfig {
                retry_attempts: 3,
                ..ResolverConfig::default()
            },
        );

        let started = Instant::now();
        assert!(resolver.resolve("01001000", true).await.is_err());

        // 500 + 1000 per provider
        assert_eq!(started.elapsed(), Duration::from_millis(3000));
        assert_eq!(primary.calls(), 3);
        assert_eq!(secondary.calls(), 3);
    }

    // ===== Coalescing Tests =====

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_lookups_are_coalesced() {
        let f = fixture(
            MockProvider::ok(ProviderSource::ViaCep).with_delay(Duration::from_millis(200)),
            MockProvider::ok(ProviderSource::BrasilApi),
        );

        let (a, b) = tokio::join!(
            f.resolver.resolve("01001000", true),
            f.resolver.resolve("01001-000", true)
        );

        let (a, b) = (a.unwrap(), b.unwrap());
        assert_eq!(f.primary.calls(), 1);
        assert!(!a.cached);
        assert!(b.cached);
        assert!(f.resolver.in_flight.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_many_concurrent_lookups_share_one_request_per_cep() {
        let f = fixture(
            MockProvider::ok(ProviderSource::ViaCep).with_delay(Duration::from_millis(100)),
            MockProvider::ok(ProviderSource::BrasilApi),
        );

        let lookups = ["01001000", "01001-000", "20040020", "20040-020", "01001.000"]
            .into_iter()
            .map(|raw| f.resolver.resolve(raw, true));
        let results = futures::future::join_all(lookups).await;

        assert!(results.iter().all(|r| r.is_ok()));
        assert_eq!(f.primary.calls(), 2);
        assert_eq!(f.cache.len(), 2);
        assert!(f.resolver.in_flight.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_lookups_release_their_gate() {
        let resolver = Arc::new(AddressResolver::new(
            Arc::new(MockProvider::ok(ProviderSource::ViaCep).with_delay(Duration::from_secs(1))),
            Arc::new(MockProvider::ok(ProviderSource::BrasilApi)),
            Arc::new(DashMapAddressCache::new()),
            ResolverConfig::default(),
        ));

        // two callers per CEP: one resolving, one waiting on the gate
        let handles: Vec<_> = (0..20)
            .map(|i| {
                let resolver = resolver.clone();
                let raw = format!("{:08}", 1000 + i % 10);
                tokio::spawn(async move { resolver.resolve(&raw, true).await })
            })
            .collect();

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(resolver.in_flight.len(), 10);

        for handle in &handles {
            handle.abort();
        }
        for handle in handles {
            assert!(handle.await.unwrap_err().is_cancelled());
        }

        assert!(resolver.in_flight.is_empty());
        assert_eq!(resolver.stats().cache_size, 0);
    }

    // ===== Batch Tests =====

    #[tokio::test(start_paused = true)]
    async fn test_resolve_many_keeps_order_and_captures_failures() {
        let primary = MockProvider::new(ProviderSource::ViaCep, |cep, _| {
            if cep.as_str() == "00000000" {
                Err(LookupError::NotFound {
                    provider: ProviderSource::ViaCep,
                })
            } else {
                Ok(address(ProviderSource::ViaCep, cep.as_str()))
            }
        });
        let secondary = MockProvider::new(ProviderSource::BrasilApi, |_, _| {
            Err(LookupError::Http {
                provider: ProviderSource::BrasilApi,
                status: 404,
            })
        });
        let f = fixture(primary, secondary);

        let results = f.resolver.resolve_many(["01001000", "00000000"], None).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].identifier, "01001000");
        assert!(results[0].success);
        assert_eq!(results[0].value.as_ref().unwrap().city, "São Paulo");
        assert!(results[0].error.is_none());

        assert_eq!(results[1].identifier, "00000000");
        assert!(!results[1].success);
        assert!(results[1].value.is_none());
        assert!(results[1].error.as_ref().unwrap().contains("00000000"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_many_invalid_item_does_not_abort() {
        let f = fixture(
            MockProvider::ok(ProviderSource::ViaCep),
            MockProvider::ok(ProviderSource::BrasilApi),
        );

        let results = f
            .resolver
            .resolve_many(vec!["123".to_string(), "22030-060".to_string()], None)
            .await;

        assert!(!results[0].success);
        assert!(results[0].error.as_ref().unwrap().contains("8 dígitos"));
        assert!(results[1].success);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_many_spacing() {
        let f = fixture(
            MockProvider::ok(ProviderSource::ViaCep),
            MockProvider::ok(ProviderSource::BrasilApi),
        );

        let started = Instant::now();
        f.resolver
            .resolve_many(["01001000", "22030060", "70040010"], Some(Duration::from_millis(250)))
            .await;
        assert_eq!(started.elapsed(), Duration::from_millis(500));

        let started = Instant::now();
        f.resolver
            .resolve_many(["01001000", "22030060"], Some(Duration::ZERO))
            .await;
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_batch_result_serialization() {
        let ok = BatchResult {
            identifier: "01001000".to_string(),
            success: true,
            value: Some(address(ProviderSource::ViaCep, "01001000")),
            error: None,
        };
        let json = serde_json::to_value(&ok).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["value"]["city"], "São Paulo");
    }

    // ===== Stats Tests =====

    #[tokio::test]
    async fn test_stats_and_clear() {
        let f = fixture(
            MockProvider::ok(ProviderSource::ViaCep),
            MockProvider::ok(ProviderSource::BrasilApi),
        );

        let stats = f.resolver.stats();
        assert_eq!(stats.cache_size, 0);
        assert_eq!(stats.hit_rate, 0.0);

        f.resolver.resolve("22030060", true).await.unwrap();
        f.resolver.resolve("01001000", true).await.unwrap();
        f.resolver.resolve("01001000", true).await.unwrap();
        f.resolver.resolve("01001000", true).await.unwrap();

        let stats = f.resolver.stats();
        assert_eq!(stats.cache_size, 2);
        assert_eq!(stats.cached_identifiers, vec!["01001000", "22030060"]);
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 2);
        assert!((stats.hit_rate - 0.5).abs() < f64::EPSILON);

        f.resolver.clear_cache();
        assert_eq!(f.resolver.stats().cache_size, 0);
    }

    #[tokio::test]
    async fn test_shutdown_clears_cache() {
        let f = fixture(
            MockProvider::ok(ProviderSource::ViaCep),
            MockProvider::ok(ProviderSource::BrasilApi),
        );
        f.resolver.resolve("01001000", true).await.unwrap();
        f.resolver.shutdown();
        assert!(f.cache.is_empty());
    }

    #[test]
    fn test_stats_serialize_camel_case() {
        let stats = ResolverStats {
            cache_size: 1,
            cached_identifiers: vec!["01001000".to_string()],
            hits: 0,
            misses: 1,
            hit_rate: 0.0,
        };
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["cacheSize"], 1);
        assert_eq!(json["cachedIdentifiers"][0], "01001000");
        assert!(json.get("hitRate").is_some());
    }

    #[test]
    fn test_default_config() {
        let cfg = ResolverConfig::default();
        assert_eq!(cfg.provider_timeout, Duration::from_secs(5));
        assert_eq!(cfg.retry_attempts, 2);
        assert_eq!(cfg.backoff_step, Duration::from_millis(500));
        assert_eq!(cfg.cache_ttl, Duration::from_secs(3600));
        assert_eq!(cfg.batch_spacing, Duration::from_millis(100));
    }
}
