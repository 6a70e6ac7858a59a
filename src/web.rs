//! Server-rendered HTML front-end.
//!
//! Same semantics as the JSON API, but requests are form posts and
//! responses are HTML fragments meant for htmx swaps. Errors are returned
//! as plain-text bodies with the JSON API's status codes.

use axum::{
    extract::{rejection::FormRejection, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, put},
    Form, Router,
};
use serde::Deserialize;

use recipe_manager_core::{Ingredient, StoreError};

use crate::render;
use crate::server::{parse_id, status_for, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(ingredients_page))
        .route("/ingredients", get(ingredients_page).post(create_ingredient))
        .route("/ingredients/search", get(search_ingredients))
        .route("/ingredients/new", get(new_ingredient_form))
        .route("/ingredients/{id}/edit", get(edit_ingredient_form))
        .route(
            "/ingredients/{id}",
            put(update_ingredient).delete(delete_ingredient),
        )
}

#[derive(Debug, Deserialize)]
pub struct NameForm {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub search: String,
}

/// Plain-text error response.
#[derive(Debug)]
pub(crate) struct WebError {
    status: StatusCode,
    message: String,
}

impl WebError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<StoreError> for WebError {
    fn from(err: StoreError) -> Self {
        let status = status_for(&err);
        let message = if err.is_user_facing() {
            tracing::debug!(error = %err, %status, "form rejected");
            err.to_string()
        } else {
            tracing::error!(error = %err, "store failure");
            "internal server error".to_string()
        };
        Self { status, message }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

fn path_id(raw: &str) -> Result<u64, WebError> {
    parse_id(raw).ok_or_else(|| WebError::bad_request("invalid ingredient id"))
}

fn form_name(form: Result<Form<NameForm>, FormRejection>) -> Result<String, WebError> {
    form.map(|Form(f)| f.name)
        .map_err(|rejection| WebError::bad_request(rejection.body_text()))
}

fn lookup(state: &AppState, query: &str) -> Result<Vec<Ingredient>, StoreError> {
    if query.trim().is_empty() {
        state.store.list()
    } else {
        state.store.search(query)
    }
}

async fn ingredients_page(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>, WebError> {
    let items = lookup(&state, &params.search)?;
    Ok(Html(render::ingredients_page(&items, params.search.trim())))
}

async fn search_ingredients(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>, WebError> {
    let items = lookup(&state, &params.search)?;
    Ok(Html(render::ingredients_table(&items)))
}

async fn new_ingredient_form() -> Html<String> {
    Html(render::ingredient_form(None))
}

async fn edit_ingredient_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, WebError> {
    let id = path_id(&id)?;
    let ingredient = state.store.get(id)?;
    Ok(Html(render::ingredient_form(Some(&ingredient))))
}

async fn create_ingredient(
    State(state): State<AppState>,
    form: Result<Form<NameForm>, FormRejection>,
) -> Result<Html<String>, WebError> {
    let name = form_name(form)?;
    let ingredient = state.store.create(&name)?;
    tracing::info!(id = ingredient.id, name = %ingredient.name, "ingredient created");

    let items = state.store.list()?;
    Ok(Html(render::ingredients_table(&items)))
}

async fn update_ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: Result<Form<NameForm>, FormRejection>,
) -> Result<Html<String>, WebError> {
    let id = path_id(&id)?;
    let name = form_name(form)?;
    let ingredient = state.store.update_by_id(id, &name)?;
    tracing::info!(id = ingredient.id, name = %ingredient.name, "ingredient renamed");

    let items = state.store.list()?;
    Ok(Html(render::ingredients_table(&items)))
}

/// Empty 200 so htmx removes the row.
async fn delete_ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, WebError> {
    let id = path_id(&id)?;
    let removed = state.store.delete_by_id(id)?;
    tracing::info!(id = removed.id, name = %removed.name, "ingredient deleted");
    Ok(StatusCode::OK)
}
