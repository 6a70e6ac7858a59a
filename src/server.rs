//! HTTP server.
//!
//! Assembles every HTTP-facing adapter onto one Axum router sharing a
//! single ingredient store.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `*`    | `/api/ingredients...` | JSON API, see [`crate::api`] |
//! | `*`    | `/`, `/ingredients...` | HTML pages and fragments, see [`crate::web`] |
//! | `GET`  | `/tools/list` | List all registered tools with schemas |
//! | `POST` | `/tools/{name}` | Call a registered tool by name |
//! | `*`    | `/mcp` | MCP Streamable HTTP endpoint (when `server.mcp_http`) |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! JSON error responses share one shape:
//!
//! ```json
//! { "error": { "code": "name_conflict", "message": "ingredient name already exists" } }
//! ```
//!
//! Validation errors map to 400, name conflicts to 409, missing records to
//! 404, and anything unexpected to 500 with a generic message.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use recipe_manager_core::{ErrorKind, IngredientStore, StoreError};

use crate::config::Config;
use crate::mcp::{self, McpBridge};
use crate::traits::{validate_params, ToolContext, ToolInfo, ToolRegistry};
use crate::{api, web};

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// The one store every adapter reads and writes.
    pub store: Arc<dyn IngredientStore>,
    /// Tools exposed at `/tools/*` and `/mcp`.
    pub tools: Arc<ToolRegistry>,
}

impl AppState {
    /// State with the built-in ingredient tools.
    pub fn new(store: Arc<dyn IngredientStore>) -> Self {
        Self::with_tools(store, ToolRegistry::with_builtins())
    }

    pub fn with_tools(store: Arc<dyn IngredientStore>, tools: ToolRegistry) -> Self {
        Self {
            store,
            tools: Arc::new(tools),
        }
    }

    pub fn tool_context(&self) -> ToolContext {
        ToolContext::new(self.store.clone())
    }
}

/// Build the full router. `mount_mcp` adds the MCP endpoint at `/mcp`.
pub fn build_router(state: AppState, mount_mcp: bool) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .route("/health", get(handle_health))
        .route("/tools/list", get(handle_list_tools))
        .route("/tools/{name}", post(handle_tool_call))
        .merge(api::routes())
        .merge(web::routes());

    if mount_mcp {
        let bridge = McpBridge::new(state.tools.clone(), state.tool_context());
        app = app.nest_service("/mcp", mcp::http_service(bridge));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server and run until Ctrl-C.
///
/// Binds to `[server].bind` from the configuration.
pub async fn run_server(config: &Config, store: Arc<dyn IngredientStore>) -> anyhow::Result<()> {
    let state = AppState::new(store);
    let app = build_router(state, config.server.mcp_http);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        mcp = config.server.mcp_http,
        "HTTP server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

/// Parse a path identifier. Non-numeric input yields `None`.
pub(crate) fn parse_id(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok()
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    /// Machine-readable error code (e.g., `"bad_request"`, `"name_conflict"`).
    code: String,
    message: String,
}

/// Error type that converts into a JSON Axum response.
#[derive(Debug)]
pub(crate) struct AppError {
    pub(crate) status: StatusCode,
    pub(crate) code: String,
    pub(crate) message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

pub(crate) fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

pub(crate) fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

fn tool_error(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "tool_error".to_string(),
        message: message.into(),
    }
}

/// HTTP status for a store error category.
pub(crate) fn status_for(err: &StoreError) -> StatusCode {
    match err.kind() {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        let status = status_for(&err);
        if err.is_user_facing() {
            tracing::debug!(error = %err, %status, "request rejected");
            AppError {
                status,
                code: err.code().to_string(),
                message: err.to_string(),
            }
        } else {
            tracing::error!(error = %err, "store failure");
            AppError {
                status,
                code: err.code().to_string(),
                message: "internal server error".to_string(),
            }
        }
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    /// Always `"ok"` when the server is running.
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /tools/list ============

#[derive(Serialize)]
struct ToolListResponse {
    tools: Vec<ToolInfo>,
}

async fn handle_list_tools(State(state): State<AppState>) -> Json<ToolListResponse> {
    Json(ToolListResponse {
        tools: state.tools.infos(),
    })
}

// ============ POST /tools/{name} ============

/// Parse a tool-call body. Blank bodies map to `Null`, which
/// [`validate_params`] treats as an empty object.
fn tool_params(body: &[u8]) -> Result<serde_json::Value, AppError> {
    if body.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_slice(body).map_err(|e| bad_request(format!("invalid JSON: {}", e)))
}

/// Unified tool dispatch.
///
/// Returns `404` for an unknown tool and `400` for malformed JSON or
/// parameter validation errors. An empty body counts as no parameters.
/// Store outcomes (including failures) come back as a 200 with the tool's
/// status line in `result`.
async fn handle_tool_call(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let tool = state
        .tools
        .find(&name)
        .ok_or_else(|| not_found(format!("no tool registered with name: {}", name)))?;

    let params = tool_params(&body)?;

    let validated_params = validate_params(&tool.parameters_schema(), &params)
        .map_err(|e| bad_request(e.to_string()))?;

    let ctx = state.tool_context();
    let reply = tool
        .execute(validated_params, &ctx)
        .await
        .map_err(|e| tool_error(format!("{}: {}", name, e)))?;

    Ok(Json(serde_json::json!({ "result": reply })))
}
