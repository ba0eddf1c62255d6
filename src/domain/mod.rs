//! Domain Layer
//!
//! Pure business types and the ports the outer layers implement.

pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{CacheEntry, Customer, MenuItem, Order, OrderLine, OrderStatus, ResolvedAddress};
pub use errors::{LookupError, MailError, RepositoryError};
pub use value_objects::{AddressField, Cep, ProviderSource};
