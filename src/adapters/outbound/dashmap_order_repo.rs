//! DashMap Order Repository
//!
//! In-memory stand-in for the orders collection.

use crate::domain::entities::{Customer, Order, OrderLine, OrderStatus};
use crate::domain::errors::RepositoryError;
use crate::domain::ports::OrderRepository;
use async_trait::async_trait;
use dashmap::DashMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// DashMap-backed order repository.
pub struct DashMapOrderRepository {
    orders: DashMap<String, Order>,
}

impl DashMapOrderRepository {
    pub fn new() -> Self {
        Self {
            orders: DashMap::new(),
        }
    }

    pub fn count(&self) -> usize {
        self.orders.len()
    }
}

impl Default for DashMapOrderRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[async_trait]
impl OrderRepository for DashMapOrderRepository {
    async fn create(
        &self,
        cliente: Customer,
        itens: Vec<OrderLine>,
        total: f64,
    ) -> Result<Order, RepositoryError> {
        let order = Order {
            id: uuid::Uuid::new_v4().to_string(),
            cliente,
            itens,
            total,
            status: OrderStatus::Pendente,
            created_at: now_millis(),
        };
        self.orders.insert(order.id.clone(), order.clone());
        tracing::info!("order {} created ({} items)", order.id, order.itens.len());
        Ok(order)
    }

    async fn get(&self, id: &str) -> Result<Option<Order>, RepositoryError> {
        Ok(self.orders.get(id).map(|e| e.value().clone()))
    }
}
