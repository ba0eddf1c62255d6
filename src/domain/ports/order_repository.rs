//! Order Repository Port

use crate::domain::entities::{Customer, Order, OrderLine};
use crate::domain::errors::RepositoryError;
use async_trait::async_trait;

/// Write access to the orders collection.
///
/// The store assigns the document ID, the initial `pendente` status
/// and the server-side creation timestamp.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a new order and return it with its assigned ID.
    async fn create(
        &self,
        cliente: Customer,
        itens: Vec<OrderLine>,
        total: f64,
    ) -> Result<Order, RepositoryError>;

    /// Fetch an order by ID.
    async fn get(&self, id: &str) -> Result<Option<Order>, RepositoryError>;
}
