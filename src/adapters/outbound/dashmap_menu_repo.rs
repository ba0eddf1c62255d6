//! DashMap Menu Repository
//!
//! In-memory stand-in for the menu collection, optionally seeded from a
//! JSON file at startup.

use crate::domain::entities::MenuItem;
use crate::domain::errors::RepositoryError;
use crate::domain::ports::MenuRepository;
use async_trait::async_trait;
use dashmap::DashMap;

/// DashMap-backed menu repository.
pub struct DashMapMenuRepository {
    items: DashMap<String, MenuItem>,
}

impl DashMapMenuRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
        }
    }

    /// Create a repository holding `items`.
    pub fn with_items(items: Vec<MenuItem>) -> Self {
        let repo = Self::new();
        for item in items {
            repo.items.insert(item.id.clone(), item);
        }
        repo
    }

    /// Load items from a JSON array file.
    pub fn from_file(path: &str) -> Result<Self, RepositoryError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| RepositoryError::Seed(format!("{}: {}", path, e)))?;
        Self::from_json(&raw)
    }

    /// Parse items from a JSON array.
    pub fn from_json(raw: &str) -> Result<Self, RepositoryError> {
        let items: Vec<MenuItem> =
            serde_json::from_str(raw).map_err(|e| RepositoryError::Seed(e.to_string()))?;
        Ok(Self::with_items(items))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for DashMapMenuRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MenuRepository for DashMapMenuRepository {
    async fn list(&self) -> Result<Vec<MenuItem>, RepositoryError> {
        let mut items: Vec<MenuItem> = self.items.iter().map(|e| e.value().clone()).collect();
        items.sort_by(|a, b| a.category.cmp(&b.category).then_with(|| a.name.cmp(&b.name)));
        Ok(items)
    }

    async fn get(&self, id: &str) -> Result<Option<MenuItem>, RepositoryError> {
        Ok(self.items.get(id).map(|e| e.value().clone()))
    }
}
