//! JSON API over the ingredient store.
//!
//! | Method | Path | Success | Errors |
//! |--------|------|---------|--------|
//! | `POST`   | `/api/ingredients` | 201 + record | 400, 409 |
//! | `GET`    | `/api/ingredients[?search=q]` | 200 + array | |
//! | `GET`    | `/api/ingredients/{id}` | 200 + record | 400, 404 |
//! | `PUT`    | `/api/ingredients/{id}` | 200 + record | 400, 404, 409 |
//! | `DELETE` | `/api/ingredients/{id}` | 204 | 400, 404 |
//!
//! Listing is in identifier order; with a non-empty `search` parameter the
//! matches come back in name order.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use recipe_manager_core::Ingredient;

use crate::server::{bad_request, parse_id, AppError, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/ingredients",
            get(list_ingredients).post(create_ingredient),
        )
        .route(
            "/api/ingredients/{id}",
            get(get_ingredient)
                .put(update_ingredient)
                .delete(delete_ingredient),
        )
}

/// Body for create and update.
#[derive(Debug, Deserialize)]
pub struct NameRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub search: Option<String>,
}

fn json_body(payload: Result<Json<NameRequest>, JsonRejection>) -> Result<NameRequest, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| bad_request(format!("invalid JSON: {}", rejection.body_text())))
}

fn path_id(raw: &str) -> Result<u64, AppError> {
    parse_id(raw).ok_or_else(|| bad_request("invalid ingredient id"))
}

async fn create_ingredient(
    State(state): State<AppState>,
    payload: Result<Json<NameRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = json_body(payload)?;
    let ingredient = state.store.create(&body.name)?;
    tracing::info!(id = ingredient.id, name = %ingredient.name, "ingredient created");
    Ok((StatusCode::CREATED, Json(ingredient)))
}

async fn list_ingredients(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Ingredient>>, AppError> {
    let items = match params.search.as_deref() {
        Some(q) if !q.trim().is_empty() => state.store.search(q)?,
        _ => state.store.list()?,
    };
    Ok(Json(items))
}

async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Ingredient>, AppError> {
    let id = path_id(&id)?;
    Ok(Json(state.store.get(id)?))
}

async fn update_ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<NameRequest>, JsonRejection>,
) -> Result<Json<Ingredient>, AppError> {
    let id = path_id(&id)?;
    let body = json_body(payload)?;
    let ingredient = state.store.update_by_id(id, &body.name)?;
    tracing::info!(id = ingredient.id, name = %ingredient.name, "ingredient renamed");
    Ok(Json(ingredient))
}

async fn delete_ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = path_id(&id)?;
    let removed = state.store.delete_by_id(id)?;
    tracing::info!(id = removed.id, name = %removed.name, "ingredient deleted");
    Ok(StatusCode::NO_CONTENT)
}
