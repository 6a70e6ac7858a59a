//! # Recipe Manager
//!
//! **An in-memory ingredient catalog for people and language-model agents.**
//!
//! One shared [`IngredientStore`] sits behind three front-ends: a JSON API,
//! server-rendered HTML pages, and a tool-calling interface offered both as
//! plain HTTP and as an MCP server.
//!
//! ## Architecture
//!
//! ```text
//!  ┌──────────┐  ┌──────────┐  ┌───────────────────┐
//!  │ JSON API │  │   HTML   │  │ Tools (HTTP, MCP) │
//!  └────┬─────┘  └────┬─────┘  └─────────┬─────────┘
//!       └─────────────┼──────────────────┘
//!                     ▼
//!          ┌─────────────────────┐
//!          │ Arc<dyn Ingredient- │
//!          │       Store>        │
//!          └─────────────────────┘
//! ```
//!
//! The store (in the `recipe-manager-core` crate) owns validation,
//! normalization and uniqueness; the modules here only translate requests
//! into store calls and store errors into their own wire format.
//!
//! ## Quick Start
//!
//! ```bash
//! recipe-manager serve http --seed     # JSON + HTML + tools + /mcp
//! recipe-manager serve mcp             # MCP over stdio
//! recipe-manager tools                 # list the agent tools
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`server`] | Axum router assembly, error contract, `/tools/*`, `/health` |
//! | [`api`] | JSON CRUD + search endpoints |
//! | [`web`] | HTML pages and htmx fragments |
//! | [`render`] | HTML templates |
//! | [`traits`] | `Tool` trait, `ToolReply`, `ToolRegistry` |
//! | [`tools`] | Built-in ingredient tools |
//! | [`mcp`] | MCP bridge (stdio and Streamable HTTP) |
//! | [`seed`] | Demo pantry data |

pub mod api;
pub mod config;
pub mod mcp;
pub mod render;
pub mod seed;
pub mod server;
pub mod tools;
pub mod traits;
pub mod web;

pub use recipe_manager_core::{Ingredient, IngredientStore, InMemoryStore, StoreError};
pub use traits::{Tool, ToolContext, ToolRegistry, ToolReply};
