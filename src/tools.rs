//! Built-in ingredient tools.
//!
//! Each tool wraps exactly one store operation and renders the outcome as a
//! [`ToolReply`]. Validation, conflict and not-found errors are shown with
//! the store's own message; anything else collapses to a generic
//! "Failed to <verb> ingredient" line and is logged.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::fmt::Write as _;

use recipe_manager_core::StoreError;

use crate::traits::{Tool, ToolContext, ToolReply};

/// Fold a store error into a failure reply.
fn store_failure(tool: &str, verb: &str, err: StoreError) -> ToolReply {
    if err.is_user_facing() {
        tracing::debug!(tool, error = %err, "tool call rejected");
        ToolReply::failure(err)
    } else {
        tracing::error!(tool, error = %err, "tool call failed");
        ToolReply::failure(format!("Failed to {} ingredient", verb))
    }
}

fn str_param<'a>(params: &'a Value, key: &str) -> &'a str {
    params[key].as_str().unwrap_or("")
}

fn single_name_schema(description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string", "description": description }
        },
        "required": ["name"]
    })
}

/// `create_ingredient(name)`
pub struct CreateIngredientTool;

#[async_trait]
impl Tool for CreateIngredientTool {
    fn name(&self) -> &str {
        "create_ingredient"
    }

    fn description(&self) -> &str {
        "Add exactly one ingredient to your collection. Call this tool separately for each \
         ingredient you want to add. Do not try to add multiple ingredients in a single call."
    }

    fn is_builtin(&self) -> bool {
        true
    }

    fn parameters_schema(&self) -> Value {
        single_name_schema(
            "Name of the single ingredient to add (e.g., 'tomato', 'salt', 'chicken breast')",
        )
    }

    async fn execute(&self, params: Value, ctx: &ToolContext) -> Result<ToolReply> {
        let name = str_param(&params, "name");
        Ok(match ctx.store().create(name) {
            Ok(ingredient) => {
                tracing::info!(id = ingredient.id, name = %ingredient.name, "ingredient created");
                ToolReply::success(format!("Added {} to your ingredients", ingredient.name))
            }
            Err(e) => store_failure(self.name(), "create", e),
        })
    }
}

/// `delete_ingredient(name)`
pub struct DeleteIngredientTool;

#[async_trait]
impl Tool for DeleteIngredientTool {
    fn name(&self) -> &str {
        "delete_ingredient"
    }

    fn description(&self) -> &str {
        "Delete exactly one ingredient from your collection. Call this tool separately for each \
         ingredient you want to delete. Do not try to delete multiple ingredients in a single call."
    }

    fn is_builtin(&self) -> bool {
        true
    }

    fn parameters_schema(&self) -> Value {
        single_name_schema(
            "Name of the single ingredient to delete (e.g., 'tomato', 'salt', 'chicken breast')",
        )
    }

    async fn execute(&self, params: Value, ctx: &ToolContext) -> Result<ToolReply> {
        let name = str_param(&params, "name");
        Ok(match ctx.store().delete_by_name(name) {
            Ok(removed) => {
                tracing::info!(id = removed.id, name = %removed.name, "ingredient deleted");
                ToolReply::success(format!("Deleted {} from your ingredients", removed.name))
            }
            Err(e) => store_failure(self.name(), "delete", e),
        })
    }
}

/// `update_ingredient(original_name, new_name)`
pub struct UpdateIngredientTool;

#[async_trait]
impl Tool for UpdateIngredientTool {
    fn name(&self) -> &str {
        "update_ingredient"
    }

    fn description(&self) -> &str {
        "Update exactly one ingredient from your collection. Call this tool separately for each \
         ingredient you want to update. Do not try to update multiple ingredients in a single call."
    }

    fn is_builtin(&self) -> bool {
        true
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "original_name": {
                    "type": "string",
                    "description": "Name of the already-existing single ingredient"
                },
                "new_name": {
                    "type": "string",
                    "description": "New name for the single ingredient"
                }
            },
            "required": ["original_name", "new_name"]
        })
    }

    async fn execute(&self, params: Value, ctx: &ToolContext) -> Result<ToolReply> {
        let original = str_param(&params, "original_name");
        let new_name = str_param(&params, "new_name");
        Ok(match ctx.store().update_by_name(original, new_name) {
            Ok(updated) => {
                tracing::info!(id = updated.id, name = %updated.name, "ingredient renamed");
                ToolReply::success(format!(
                    "Updated ingredient {} to {}",
                    original.trim(),
                    updated.name
                ))
            }
            Err(e) => store_failure(self.name(), "update", e),
        })
    }
}

/// `list_ingredients()`
pub struct ListIngredientsTool;

#[async_trait]
impl Tool for ListIngredientsTool {
    fn name(&self) -> &str {
        "list_ingredients"
    }

    fn description(&self) -> &str {
        "List all existing ingredients from my collection."
    }

    fn is_builtin(&self) -> bool {
        true
    }

    fn is_read_only(&self) -> bool {
        true
    }

    fn parameters_schema(&self) -> Value {
        json!({ "type": "object", "properties": {} })
    }

    async fn execute(&self, _params: Value, ctx: &ToolContext) -> Result<ToolReply> {
        Ok(match ctx.store().list() {
            Ok(items) => numbered_list("📋 Your ingredients", &items),
            Err(e) => store_failure(self.name(), "fetch", e),
        })
    }
}

/// `search_ingredients(query)`
pub struct SearchIngredientsTool;

#[async_trait]
impl Tool for SearchIngredientsTool {
    fn name(&self) -> &str {
        "search_ingredients"
    }

    fn description(&self) -> &str {
        "Find ingredients in my collection whose name contains the given text."
    }

    fn is_builtin(&self) -> bool {
        true
    }

    fn is_read_only(&self) -> bool {
        true
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Text to look for in ingredient names (case-insensitive)"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, params: Value, ctx: &ToolContext) -> Result<ToolReply> {
        let query = str_param(&params, "query");
        Ok(match ctx.store().search(query) {
            Ok(items) => numbered_list("🔎 Matching ingredients", &items),
            Err(e) => store_failure(self.name(), "search", e),
        })
    }
}

fn numbered_list(header: &str, items: &[recipe_manager_core::Ingredient]) -> ToolReply {
    if items.is_empty() {
        return ToolReply::report("No ingredients found");
    }
    let mut out = format!("{} ({} total):\n", header, items.len());
    for (i, ingredient) in items.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, ingredient.name);
    }
    ToolReply::report(out)
}
