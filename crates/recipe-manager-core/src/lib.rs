//! # Recipe Manager Core
//!
//! The ingredient store shared by every Recipe Manager front-end: the
//! data model, name normalization and validation rules, the error
//! taxonomy, and the concurrency-safe in-memory table.
//!
//! This crate contains no tokio, axum, or other runtime dependencies.
//! Adapters (JSON API, HTML pages, tool calling) live in the
//! `recipe-manager` crate and only ever talk to [`store::IngredientStore`].

pub mod error;
pub mod models;
pub mod name;
pub mod store;

pub use error::{ErrorKind, Result, StoreError};
pub use models::{Ingredient, Nutrition};
pub use store::memory::InMemoryStore;
pub use store::IngredientStore;
