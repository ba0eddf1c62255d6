//! Application Layer
//!
//! Use cases that orchestrate the domain ports.

pub mod address_resolver;
pub mod autofill;
pub mod shipping_service;

#[cfg(test)]
pub(crate) mod testing;

pub use address_resolver::{AddressResolver, BatchResult, ResolverConfig, ResolverStats};
pub use autofill::{AutoFill, AutoFillError, FieldMappings, DEFAULT_DEBOUNCE, NOT_FOUND_NOTICE};
pub use shipping_service::{
    ShippingConfig, ShippingQuote, ShippingRequest, ShippingService, ShippingZone,
};
