//! Generic controller for the name-owned attribute resources. Handlers are
//! instantiated per concrete type at route definition, so tags and
//! ingredients share one implementation of list/update/delete.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension,
};
use serde::Deserialize;

use crate::db;
use crate::error::ApiError;
use crate::extract::{Json, Query};
use crate::middleware::AuthUser;
use crate::models::{Attribute, AttributeInput, AttributeKind};
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub assigned_only: Option<u8>,
}

/// GET /api/{tags,ingredients} - caller's records, name descending.
/// Any nonzero `assigned_only` restricts to records linked to at least one
/// recipe.
pub async fn list<K: AttributeKind>(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Attribute>>, ApiError> {
    let assigned_only = params.assigned_only.unwrap_or(0) != 0;
    let records = db::attributes::list::<K>(&state.pool, user.id, assigned_only).await?;

    Ok(Json(records))
}

/// PATCH /api/{tags,ingredients}/:id - rename; name is the only mutable field.
pub async fn update<K: AttributeKind>(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(body): Json<AttributeInput>,
) -> Result<Json<Attribute>, ApiError> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("name must not be empty".to_string()));
    }

    match db::attributes::update_name::<K>(&state.pool, user.id, id, name).await? {
        Some(record) => Ok(Json(record)),
        None => Err(ApiError::NotFound(format!("no record with id {}", id))),
    }
}

/// DELETE /api/{tags,ingredients}/:id - 204 on success.
pub async fn destroy<K: AttributeKind>(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if db::attributes::delete::<K>(&state.pool, user.id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("no record with id {}", id)))
    }
}
