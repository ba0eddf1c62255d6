//! Domain Entities - Core business objects
//!
//! These entities represent the core concepts of the pizzeria domain.
//! They have no external dependencies and contain only business logic.

use crate::domain::value_objects::{AddressField, ProviderSource};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

/// Canonical address produced by any lookup provider.
///
/// Every provider-specific field name is mapped into this single shape.
/// Optional text fields default to the empty string; coordinates are only
/// present when the provider supplied them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAddress {
    /// Provider that answered
    pub source: ProviderSource,
    pub cep: String,
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub complement: String,
    /// Telephone area code (DDD)
    pub area_code: String,
    /// IBGE municipality code
    pub ibge: String,
    /// GIA code (São Paulo only)
    pub gia: String,
    /// SIAFI municipality code
    pub siafi: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Set when the value was served from the cache
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cached: bool,
}

impl ResolvedAddress {
    /// Value of a bindable field.
    pub fn field(&self, field: AddressField) -> &str {
        match field {
            AddressField::Cep => &self.cep,
            AddressField::Street => &self.street,
            AddressField::Neighborhood => &self.neighborhood,
            AddressField::City => &self.city,
            AddressField::State => &self.state,
            AddressField::Complement => &self.complement,
            AddressField::AreaCode => &self.area_code,
            AddressField::Ibge => &self.ibge,
            AddressField::Gia => &self.gia,
            AddressField::Siafi => &self.siafi,
        }
    }

    /// Copy of this address flagged as cache-sourced.
    pub fn as_cached(&self) -> Self {
        Self {
            cached: true,
            ..self.clone()
        }
    }

    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

/// Cached resolution with its insertion time.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub address: ResolvedAddress,
    pub stored_at: Instant,
}

impl CacheEntry {
    pub fn new(address: ResolvedAddress) -> Self {
        Self {
            address,
            stored_at: Instant::now(),
        }
    }

    /// Whether the entry is older than `ttl`.
    pub fn is_expired(&self, ttl: std::time::Duration) -> bool {
        self.stored_at.elapsed() >= ttl
    }
}

/// Item on the pizzeria menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(default, alias = "descricao")]
    pub description: String,
    /// Price in cents (BRL)
    #[serde(alias = "precoCentavos")]
    pub price_cents: u32,
    #[serde(default, alias = "categoria")]
    pub category: String,
    #[serde(default = "default_available", alias = "disponivel")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

/// Customer attached to an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(default, alias = "telefone")]
    pub phone: String,
    #[serde(default, alias = "endereco")]
    pub address: String,
    #[serde(default)]
    pub cep: Option<String>,
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(alias = "pizzaId", alias = "id")]
    pub item_id: String,
    #[serde(default = "default_quantity", alias = "quantidade")]
    pub quantity: u32,
    #[serde(default, alias = "observacao")]
    pub notes: String,
}

fn default_quantity() -> u32 {
    1
}

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pendente,
    Preparando,
    Saiu,
    Entregue,
    Cancelado,
}

/// Stored order document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub cliente: Customer,
    pub itens: Vec<OrderLine>,
    /// Total in BRL as sent by the storefront
    pub total: f64,
    pub status: OrderStatus,
    /// Unix timestamp in milliseconds
    pub created_at: u64,
}
