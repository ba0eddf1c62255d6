//! Menu Repository Port

use crate::domain::entities::MenuItem;
use crate::domain::errors::RepositoryError;
use async_trait::async_trait;

/// Read access to the menu collection.
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// All menu items, in a stable order.
    async fn list(&self) -> Result<Vec<MenuItem>, RepositoryError>;

    /// A single item by ID.
    async fn get(&self, id: &str) -> Result<Option<MenuItem>, RepositoryError>;
}
