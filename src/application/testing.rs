//! Test doubles shared by the application-layer tests.

use crate::domain::entities::ResolvedAddress;
use crate::domain::errors::LookupError;
use crate::domain::ports::AddressProvider;
use crate::domain::value_objects::{Cep, ProviderSource};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

type Handler = Box<dyn Fn(&Cep, u32) -> Result<ResolvedAddress, LookupError> + Send + Sync>;

/// Provider answering through a closure `(cep, call_number) -> result`.
pub(crate) struct MockProvider {
    source: ProviderSource,
    handler: Handler,
    delay: Duration,
    calls: AtomicU32,
}

impl MockProvider {
    pub fn new<F>(source: ProviderSource, handler: F) -> Self
    where
        F: Fn(&Cep, u32) -> Result<ResolvedAddress, LookupError> + Send + Sync + 'static,
    {
        Self {
            source,
            handler: Box::new(handler),
            delay: Duration::ZERO,
            calls: AtomicU32::new(0),
        }
    }

    /// Always succeeds with a canonical address for the requested CEP.
    pub fn ok(source: ProviderSource) -> Self {
        Self::new(source, move |cep, _| Ok(address(source, cep.as_str())))
    }

    /// Always fails with HTTP 500.
    pub fn failing(source: ProviderSource) -> Self {
        Self::new(source, move |_, _| {
            Err(LookupError::Http {
                provider: source,
                status: 500,
            })
        })
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AddressProvider for MockProvider {
    fn source(&self) -> ProviderSource {
        self.source
    }

    async fn fetch(&self, cep: &Cep) -> Result<ResolvedAddress, LookupError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        (self.handler)(cep, call)
    }
}

pub(crate) fn address(source: ProviderSource, cep: &str) -> ResolvedAddress {
    ResolvedAddress {
        source,
        cep: cep.to_string(),
        street: "Praça da Sé".to_string(),
        neighborhood: "Sé".to_string(),
        city: "São Paulo".to_string(),
        state: "SP".to_string(),
        complement: "lado ímpar".to_string(),
        area_code: "11".to_string(),
        ibge: "3550308".to_string(),
        gia: "1004".to_string(),
        siafi: "7107".to_string(),
        latitude: None,
        longitude: None,
        cached: false,
    }
}
