//! Storage abstraction for Recipe Manager.
//!
//! The [`IngredientStore`] trait is the seam every front-end depends on.
//! Adapters hold an `Arc<dyn IngredientStore>` built once at startup and
//! never keep state of their own.
//!
//! Implementations must be `Send + Sync`. Operations are synchronous: they
//! only touch memory, so there is nothing to await.

pub mod memory;

use crate::error::Result;
use crate::models::{Ingredient, Nutrition};

/// Concurrency-safe ingredient catalog.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`create`](IngredientStore::create) | Validate, check uniqueness, insert |
/// | [`get`](IngredientStore::get) | Fetch by identifier |
/// | [`list`](IngredientStore::list) | All records, identifier order |
/// | [`search`](IngredientStore::search) | Substring match, name order |
/// | [`update_by_id`](IngredientStore::update_by_id) | Rename a record addressed by id |
/// | [`update_by_name`](IngredientStore::update_by_name) | Rename a record addressed by name |
/// | [`delete_by_id`](IngredientStore::delete_by_id) | Remove by id |
/// | [`delete_by_name`](IngredientStore::delete_by_name) | Remove by name |
/// | [`set_nutrition`](IngredientStore::set_nutrition) | Attach nutrition payload |
///
/// Every mutating method is atomic with respect to all other callers.
pub trait IngredientStore: Send + Sync {
    /// Create a new ingredient and return a copy of it.
    fn create(&self, name: &str) -> Result<Ingredient>;

    fn get(&self, id: u64) -> Result<Ingredient>;

    /// All live ingredients sorted by identifier ascending.
    fn list(&self) -> Result<Vec<Ingredient>>;

    /// Ingredients whose name contains `query` (case-insensitive), sorted
    /// by name then identifier. An empty query behaves like [`list`](Self::list).
    fn search(&self, query: &str) -> Result<Vec<Ingredient>>;

    fn update_by_id(&self, id: u64, new_name: &str) -> Result<Ingredient>;

    /// Like [`update_by_id`](Self::update_by_id), but the target is located by
    /// case-insensitive match on its normalized name.
    fn update_by_name(&self, name: &str, new_name: &str) -> Result<Ingredient>;

    /// Remove a record permanently, returning what was removed.
    fn delete_by_id(&self, id: u64) -> Result<Ingredient>;

    fn delete_by_name(&self, name: &str) -> Result<Ingredient>;

    /// Replace the nutrition payload of a record. The payload is stored as-is.
    fn set_nutrition(&self, id: u64, nutrition: Option<Nutrition>) -> Result<Ingredient>;

    /// Number of live records.
    fn len(&self) -> Result<usize>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
