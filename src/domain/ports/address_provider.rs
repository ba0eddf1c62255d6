//! Address Provider Port
//!
//! Defines the interface for external postal-code lookup services.

use crate::domain::entities::ResolvedAddress;
use crate::domain::errors::LookupError;
use crate::domain::value_objects::{Cep, ProviderSource};
use async_trait::async_trait;

/// External address lookup service.
///
/// This is an outbound port bound to one remote endpoint. Implementations
/// must enforce their own time budget and return a fully canonical address
/// or an error naming the provider; never a partial result.
#[async_trait]
pub trait AddressProvider: Send + Sync {
    /// Which service this adapter talks to.
    fn source(&self) -> ProviderSource;

    /// Look up a normalized postal code.
    async fn fetch(&self, cep: &Cep) -> Result<ResolvedAddress, LookupError>;
}
