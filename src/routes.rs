use axum::{
    middleware,
    routing::{get, patch},
    Json, Router,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{attributes, recipes};
use crate::middleware::auth::require_auth;
use crate::models::{IngredientKind, TagKind};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

pub fn build_router(state: AppState) -> Router {
    // Each attribute route pair is the same generic controller instantiated
    // for a concrete type.
    let api = Router::new()
        .route("/api/recipes", get(recipes::list).post(recipes::create))
        .route(
            "/api/recipes/:id",
            get(recipes::detail)
                .put(recipes::replace)
                .patch(recipes::update)
                .delete(recipes::destroy),
        )
        .route("/api/tags", get(attributes::list::<TagKind>))
        .route(
            "/api/tags/:id",
            patch(attributes::update::<TagKind>).delete(attributes::destroy::<TagKind>),
        )
        .route("/api/ingredients", get(attributes::list::<IngredientKind>))
        .route(
            "/api/ingredients/:id",
            patch(attributes::update::<IngredientKind>)
                .delete(attributes::destroy::<IngredientKind>),
        )
        .route_layer(middleware::from_fn(require_auth));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
