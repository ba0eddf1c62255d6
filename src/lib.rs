//! Pizzeria API Library
//!
//! Exposes the storefront backend components for integration tests and as
//! a library. The CEP address resolver lives in `application`.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use application::{AddressResolver, AutoFill, FieldMappings, ResolverConfig, ShippingService};
pub use config::load_config;
pub use domain::entities::{MenuItem, Order, ResolvedAddress};
pub use domain::errors::LookupError;
pub use domain::ports::{AddressCache, AddressForm, AddressProvider};
pub use domain::services::ResponseNormalizer;
pub use domain::value_objects::{AddressField, Cep, ProviderSource};
