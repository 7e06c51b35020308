use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::db::{self, recipes::RecipeFilter};
use crate::error::ApiError;
use crate::extract::{Json, Query};
use crate::middleware::AuthUser;
use crate::models::{
    CreateRecipe, IngredientKind, RecipeDetail, RecipeRow, RecipeSummary, ReplaceRecipe, TagKind,
    UpdateRecipe,
};
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct RecipeListParams {
    /// Comma-separated tag ids.
    pub tags: Option<String>,
    /// Comma-separated ingredient ids.
    pub ingredients: Option<String>,
}

/// GET /api/recipes - caller's recipes, newest first, summary representation.
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<RecipeListParams>,
) -> Result<Json<Vec<RecipeSummary>>, ApiError> {
    let filter = RecipeFilter {
        tag_ids: parse_id_list(params.tags.as_deref(), "tags")?,
        ingredient_ids: parse_id_list(params.ingredients.as_deref(), "ingredients")?,
    };

    let rows = db::recipes::list(&state.pool, user.id, &filter).await?;
    let mut recipes = Vec::with_capacity(rows.len());
    for row in rows {
        recipes.push(to_summary(&state.pool, row).await?);
    }

    Ok(Json(recipes))
}

/// GET /api/recipes/:id - full detail representation.
pub async fn detail(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<RecipeDetail>, ApiError> {
    let row = db::recipes::get(&state.pool, user.id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no recipe with id {}", id)))?;

    Ok(Json(to_detail(&state.pool, row).await?))
}

/// POST /api/recipes - ownership is server-assigned from the authenticated
/// caller; nested tag/ingredient names are get-or-created and linked.
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<CreateRecipe>,
) -> Result<(StatusCode, Json<RecipeDetail>), ApiError> {
    validate_title(&input.title)?;

    let id = db::recipes::create(&state.pool, user.id, &input).await?;
    db::attributes::set_for_recipe::<TagKind>(&state.pool, user.id, id, &input.tags).await?;
    db::attributes::set_for_recipe::<IngredientKind>(&state.pool, user.id, id, &input.ingredients)
        .await?;

    let row = db::recipes::get(&state.pool, user.id, id)
        .await?
        .ok_or_else(|| ApiError::Internal("created recipe not readable".to_string()))?;

    Ok((StatusCode::CREATED, Json(to_detail(&state.pool, row).await?)))
}

/// PUT /api/recipes/:id - full scalar replace; attribute arrays, when
/// present, replace the association sets.
pub async fn replace(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(input): Json<ReplaceRecipe>,
) -> Result<Json<RecipeDetail>, ApiError> {
    validate_title(&input.title)?;

    let row = db::recipes::replace(&state.pool, user.id, id, &input)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no recipe with id {}", id)))?;

    if let Some(tags) = &input.tags {
        db::attributes::set_for_recipe::<TagKind>(&state.pool, user.id, id, tags).await?;
    }
    if let Some(ingredients) = &input.ingredients {
        db::attributes::set_for_recipe::<IngredientKind>(&state.pool, user.id, id, ingredients)
            .await?;
    }

    Ok(Json(to_detail(&state.pool, row).await?))
}

/// PATCH /api/recipes/:id - partial update; an empty attribute array clears
/// that association set.
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(patch): Json<UpdateRecipe>,
) -> Result<Json<RecipeDetail>, ApiError> {
    if let Some(title) = &patch.title {
        validate_title(title)?;
    }

    let row = db::recipes::update(&state.pool, user.id, id, &patch)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no recipe with id {}", id)))?;

    if let Some(tags) = &patch.tags {
        db::attributes::set_for_recipe::<TagKind>(&state.pool, user.id, id, tags).await?;
    }
    if let Some(ingredients) = &patch.ingredients {
        db::attributes::set_for_recipe::<IngredientKind>(&state.pool, user.id, id, ingredients)
            .await?;
    }

    Ok(Json(to_detail(&state.pool, row).await?))
}

/// DELETE /api/recipes/:id - 204 on success.
pub async fn destroy(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if db::recipes::delete(&state.pool, user.id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("no recipe with id {}", id)))
    }
}

fn validate_title(title: &str) -> Result<(), ApiError> {
    if title.trim().is_empty() {
        return Err(ApiError::Validation("title must not be empty".to_string()));
    }
    Ok(())
}

fn parse_id_list(raw: Option<&str>, param: &str) -> Result<Vec<i64>, ApiError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>().map_err(|_| {
                ApiError::BadRequest(format!(
                    "{} must be a comma-separated list of ids, got {:?}",
                    param, part
                ))
            })
        })
        .collect()
}

async fn to_summary(pool: &SqlitePool, row: RecipeRow) -> Result<RecipeSummary, ApiError> {
    let price = row.price_decimal()?;
    let tags = db::attributes::for_recipe::<TagKind>(pool, row.id).await?;
    let ingredients = db::attributes::for_recipe::<IngredientKind>(pool, row.id).await?;

    Ok(RecipeSummary {
        id: row.id,
        title: row.title,
        time_minutes: row.time_minutes,
        price,
        link: row.link,
        tags,
        ingredients,
    })
}

async fn to_detail(pool: &SqlitePool, row: RecipeRow) -> Result<RecipeDetail, ApiError> {
    let price = row.price_decimal()?;
    let tags = db::attributes::for_recipe::<TagKind>(pool, row.id).await?;
    let ingredients = db::attributes::for_recipe::<IngredientKind>(pool, row.id).await?;

    Ok(RecipeDetail {
        id: row.id,
        title: row.title,
        time_minutes: row.time_minutes,
        price,
        link: row.link,
        description: row.description,
        tags,
        ingredients,
    })
}
