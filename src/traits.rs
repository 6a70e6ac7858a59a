//! Tool-calling extension system.
//!
//! Every store operation is offered to language-model agents as an
//! independently invocable [`Tool`]. Tools are collected in a
//! [`ToolRegistry`] and dispatched through the same code path by the HTTP
//! server (`POST /tools/{name}`) and the MCP bridge.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │              ToolRegistry                │
//! │  create / update / delete / list /       │
//! │  search  (+ custom Rust tools)           │
//! └──────────────┬───────────────────────────┘
//!                ▼
//!     HTTP /tools/*  ·  MCP stdio  ·  MCP /mcp
//! ```
//!
//! Tools answer with a [`ToolReply`]: a single human-readable status line
//! starting with a success or failure marker.
//!
//! # Usage
//!
//! ```rust
//! use recipe_manager::traits::ToolRegistry;
//!
//! let mut tools = ToolRegistry::with_builtins();
//! // tools.register(Box::new(MyTool::new()));
//! assert!(tools.find("create_ingredient").is_some());
//! ```

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use recipe_manager_core::IngredientStore;

use crate::tools::{
    CreateIngredientTool, DeleteIngredientTool, ListIngredientsTool, SearchIngredientsTool,
    UpdateIngredientTool,
};

pub const SUCCESS_MARKER: &str = "✅";
pub const FAILURE_MARKER: &str = "❌";

// ═══════════════════════════════════════════════════════════════════════
// Tool Trait
// ═══════════════════════════════════════════════════════════════════════

/// An action that agents can discover and call.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use anyhow::Result;
/// use serde_json::{json, Value};
/// use recipe_manager::traits::{Tool, ToolContext, ToolReply};
///
/// pub struct CountTool;
///
/// #[async_trait]
/// impl Tool for CountTool {
///     fn name(&self) -> &str { "count_ingredients" }
///     fn description(&self) -> &str { "Count the ingredients in the catalog" }
///
///     fn parameters_schema(&self) -> Value {
///         json!({ "type": "object", "properties": {} })
///     }
///
///     async fn execute(&self, _params: Value, ctx: &ToolContext) -> Result<ToolReply> {
///         let n = ctx.store().len()?;
///         Ok(ToolReply::success(format!("{} ingredients", n)))
///     }
/// }
/// ```
#[async_trait]
pub trait Tool: Send + Sync {
    /// Lowercase identifier with underscores, e.g. `"create_ingredient"`.
    fn name(&self) -> &str;

    /// One-line description for agent discovery.
    fn description(&self) -> &str;

    /// Whether this tool ships with the crate. Defaults to `false`.
    fn is_builtin(&self) -> bool {
        false
    }

    /// Whether the tool only reads the catalog. Defaults to `false`.
    fn is_read_only(&self) -> bool {
        false
    }

    /// JSON Schema for the parameters: `type: "object"`, `properties`,
    /// and optionally `required`.
    fn parameters_schema(&self) -> Value;

    /// Execute with parameters already checked by [`validate_params`].
    ///
    /// Store errors are expected to be folded into a failure
    /// [`ToolReply`]; an `Err` here means the call itself was malformed.
    async fn execute(&self, params: Value, ctx: &ToolContext) -> Result<ToolReply>;
}

// ═══════════════════════════════════════════════════════════════════════
// ToolReply / ToolContext
// ═══════════════════════════════════════════════════════════════════════

/// Status line returned by every tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolReply {
    pub success: bool,
    pub message: String,
}

impl ToolReply {
    /// `✅ <text>`
    pub fn success(text: impl fmt::Display) -> Self {
        Self {
            success: true,
            message: format!("{} {}", SUCCESS_MARKER, text),
        }
    }

    /// `❌ Error: <text>`
    pub fn failure(text: impl fmt::Display) -> Self {
        Self {
            success: false,
            message: format!("{} Error: {}", FAILURE_MARKER, text),
        }
    }

    /// A successful reply whose text already carries its own prefix.
    pub fn report(text: impl Into<String>) -> Self {
        Self {
            success: true,
            message: text.into(),
        }
    }
}

impl fmt::Display for ToolReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Gives tools access to the shared ingredient store.
#[derive(Clone)]
pub struct ToolContext {
    store: Arc<dyn IngredientStore>,
}

impl ToolContext {
    pub fn new(store: Arc<dyn IngredientStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn IngredientStore {
        self.store.as_ref()
    }
}

/// Tool descriptor returned by `GET /tools/list`.
#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    pub builtin: bool,
    pub parameters: Value,
}

impl ToolInfo {
    pub fn of(tool: &dyn Tool) -> Self {
        Self {
            name: tool.name().to_string(),
            description: tool.description().to_string(),
            builtin: tool.is_builtin(),
            parameters: tool.parameters_schema(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Parameter validation / dispatch
// ═══════════════════════════════════════════════════════════════════════

/// Check `params` against a tool's parameter schema.
///
/// Verifies required keys and primitive types. Unknown keys are dropped.
/// Returns the accepted parameters as a JSON object.
pub fn validate_params(schema: &Value, params: &Value) -> Result<Value> {
    let empty = serde_json::Map::new();
    let params_obj = match params {
        Value::Object(map) => map,
        Value::Null => &empty,
        other => bail!("parameters must be an object, got {}", json_type_name(other)),
    };

    let properties = schema
        .get("properties")
        .and_then(|p| p.as_object())
        .cloned()
        .unwrap_or_default();

    let required: Vec<&str> = schema
        .get("required")
        .and_then(|r| r.as_array())
        .map(|arr| arr.iter().filter_map(|v| v.as_str()).collect())
        .unwrap_or_default();

    for field in required {
        if !params_obj.contains_key(field) {
            bail!("missing required parameter: {}", field);
        }
    }

    let mut result = serde_json::Map::new();
    for (prop_name, prop_schema) in &properties {
        let Some(value) = params_obj.get(prop_name) else {
            continue;
        };
        if let Some(expected) = prop_schema.get("type").and_then(|t| t.as_str()) {
            let type_ok = match expected {
                "string" => value.is_string(),
                "integer" => value.is_i64() || value.is_u64(),
                "number" => value.is_number(),
                "boolean" => value.is_boolean(),
                "array" => value.is_array(),
                "object" => value.is_object(),
                _ => true,
            };
            if !type_ok {
                bail!(
                    "parameter '{}' must be of type '{}', got {}",
                    prop_name,
                    expected,
                    json_type_name(value)
                );
            }
        }
        result.insert(prop_name.clone(), value.clone());
    }

    Ok(Value::Object(result))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Validate and execute in one step, folding every error into the reply.
pub async fn invoke(tool: &dyn Tool, params: Value, ctx: &ToolContext) -> ToolReply {
    let params = match validate_params(&tool.parameters_schema(), &params) {
        Ok(p) => p,
        Err(e) => return ToolReply::failure(e),
    };
    match tool.execute(params, ctx).await {
        Ok(reply) => reply,
        Err(e) => ToolReply::failure(e),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Registry
// ═══════════════════════════════════════════════════════════════════════

/// Registry for tools (built-in and custom Rust).
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Registry pre-loaded with the ingredient tools.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(CreateIngredientTool));
        registry.register(Box::new(UpdateIngredientTool));
        registry.register(Box::new(DeleteIngredientTool));
        registry.register(Box::new(ListIngredientsTool));
        registry.register(Box::new(SearchIngredientsTool));
        registry
    }

    /// Register a tool. [`find`](Self::find) returns the first tool
    /// registered under a given name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.push(tool);
    }

    pub fn tools(&self) -> &[Box<dyn Tool>] {
        &self.tools
    }

    pub fn find(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }

    pub fn infos(&self) -> Vec<ToolInfo> {
        self.tools.iter().map(|t| ToolInfo::of(t.as_ref())).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
