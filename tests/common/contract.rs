//! Behavioral contract for the name-owned attribute resources. Each check is
//! written once against a static endpoint descriptor and instantiated per
//! resource type by its own test file, so tags and ingredients are guaranteed
//! to behave identically.
#![allow(dead_code)]

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;
use sqlx::SqlitePool;

use super::{
    bodyless_request, create_user, get, insert_attribute, insert_recipe, json_request,
    link_attribute, send, spawn_app, token_for, TestApp,
};

pub struct AttributeEndpoint {
    pub collection: &'static str,
    pub table: &'static str,
    pub join_table: &'static str,
    pub join_column: &'static str,
}

pub const TAGS: AttributeEndpoint = AttributeEndpoint {
    collection: "/api/tags",
    table: "tags",
    join_table: "recipe_tags",
    join_column: "tag_id",
};

pub const INGREDIENTS: AttributeEndpoint = AttributeEndpoint {
    collection: "/api/ingredients",
    table: "ingredients",
    join_table: "recipe_ingredients",
    join_column: "ingredient_id",
};

impl AttributeEndpoint {
    fn detail(&self, id: i64) -> String {
        format!("{}/{}", self.collection, id)
    }

    async fn insert(&self, pool: &SqlitePool, user_id: i64, name: &str) -> Result<i64> {
        insert_attribute(pool, self.table, user_id, name).await
    }

    async fn link(&self, pool: &SqlitePool, recipe_id: i64, attribute_id: i64) -> Result<()> {
        link_attribute(pool, self.join_table, self.join_column, recipe_id, attribute_id).await
    }

    async fn count_for(&self, pool: &SqlitePool, user_id: i64) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE user_id = ?", self.table);
        Ok(sqlx::query_scalar(&sql).bind(user_id).fetch_one(pool).await?)
    }

    async fn name_of(&self, pool: &SqlitePool, id: i64) -> Result<Option<String>> {
        let sql = format!("SELECT name FROM {} WHERE id = ?", self.table);
        Ok(sqlx::query_scalar(&sql).bind(id).fetch_optional(pool).await?)
    }
}

async fn authed_app(email: &str) -> Result<(TestApp, i64, String)> {
    let app = spawn_app().await?;
    let user = create_user(&app.pool, email).await?;
    let token = token_for(user, email);
    Ok((app, user, token))
}

pub async fn auth_required(ep: &AttributeEndpoint) -> Result<()> {
    let app = spawn_app().await?;

    let (status, body) = send(&app.router, get(ep.collection, None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
    Ok(())
}

pub async fn list_returns_owned_ordered(ep: &AttributeEndpoint) -> Result<()> {
    let (app, user, token) = authed_app("user@example.com").await?;
    let vegan = ep.insert(&app.pool, user, "Vegan").await?;
    let dessert = ep.insert(&app.pool, user, "Dessert").await?;

    let (status, body) = send(&app.router, get(ep.collection, Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    // Name descending: Vegan before Dessert regardless of insertion order
    assert_eq!(
        body,
        json!([
            { "id": vegan, "name": "Vegan" },
            { "id": dessert, "name": "Dessert" },
        ])
    );
    Ok(())
}

pub async fn list_limited_to_user(ep: &AttributeEndpoint) -> Result<()> {
    let (app, user, token) = authed_app("user@example.com").await?;
    let other = create_user(&app.pool, "user2@example.com").await?;
    ep.insert(&app.pool, other, "Meat").await?;
    // Same name for both users; only the caller's copy may come back
    ep.insert(&app.pool, other, "Fruity").await?;
    let owned = ep.insert(&app.pool, user, "Fruity").await?;

    let (status, body) = send(&app.router, get(ep.collection, Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{ "id": owned, "name": "Fruity" }]));
    Ok(())
}

pub async fn update_persists(ep: &AttributeEndpoint) -> Result<()> {
    let (app, user, token) = authed_app("user@example.com").await?;
    let id = ep.insert(&app.pool, user, "Name").await?;

    let (status, body) = send(
        &app.router,
        json_request("PATCH", &ep.detail(id), &token, json!({ "name": "New Name" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": id, "name": "New Name" }));
    // Re-read from storage, not just the response
    assert_eq!(ep.name_of(&app.pool, id).await?.as_deref(), Some("New Name"));
    Ok(())
}

pub async fn update_rejects_blank_name(ep: &AttributeEndpoint) -> Result<()> {
    let (app, user, token) = authed_app("user@example.com").await?;
    let id = ep.insert(&app.pool, user, "Name").await?;

    let (status, body) = send(
        &app.router,
        json_request("PATCH", &ep.detail(id), &token, json!({ "name": "   " })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(ep.name_of(&app.pool, id).await?.as_deref(), Some("Name"));
    Ok(())
}

pub async fn update_rejects_missing_name(ep: &AttributeEndpoint) -> Result<()> {
    let (app, user, token) = authed_app("user@example.com").await?;
    let id = ep.insert(&app.pool, user, "Name").await?;

    let (status, body) = send(
        &app.router,
        json_request("PATCH", &ep.detail(id), &token, json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"], true);
    assert_eq!(ep.name_of(&app.pool, id).await?.as_deref(), Some("Name"));
    Ok(())
}

pub async fn update_other_users_record_not_found(ep: &AttributeEndpoint) -> Result<()> {
    let (app, _user, token) = authed_app("user@example.com").await?;
    let other = create_user(&app.pool, "user2@example.com").await?;
    let id = ep.insert(&app.pool, other, "Theirs").await?;

    let (status, _) = send(
        &app.router,
        json_request("PATCH", &ep.detail(id), &token, json!({ "name": "Mine" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(ep.name_of(&app.pool, id).await?.as_deref(), Some("Theirs"));
    Ok(())
}

pub async fn delete_removes(ep: &AttributeEndpoint) -> Result<()> {
    let (app, user, token) = authed_app("user@example.com").await?;
    let id = ep.insert(&app.pool, user, "Name").await?;

    let (status, body) = send(&app.router, bodyless_request("DELETE", &ep.detail(id), &token)).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());
    assert_eq!(ep.count_for(&app.pool, user).await?, 0);
    Ok(())
}

pub async fn delete_other_users_record_not_found(ep: &AttributeEndpoint) -> Result<()> {
    let (app, _user, token) = authed_app("user@example.com").await?;
    let other = create_user(&app.pool, "user2@example.com").await?;
    let id = ep.insert(&app.pool, other, "Theirs").await?;

    let (status, _) = send(&app.router, bodyless_request("DELETE", &ep.detail(id), &token)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(ep.count_for(&app.pool, other).await?, 1);
    Ok(())
}

pub async fn assigned_only_excludes_unlinked(ep: &AttributeEndpoint) -> Result<()> {
    let (app, user, token) = authed_app("user@example.com").await?;
    let linked = ep.insert(&app.pool, user, "Object 1").await?;
    ep.insert(&app.pool, user, "Object 2").await?;
    let recipe = insert_recipe(&app.pool, user, "Apple Crumble").await?;
    ep.link(&app.pool, recipe, linked).await?;

    let url = format!("{}?assigned_only=1", ep.collection);
    let (status, body) = send(&app.router, get(&url, Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{ "id": linked, "name": "Object 1" }]));

    // assigned_only=0 behaves like the plain list
    let url = format!("{}?assigned_only=0", ep.collection);
    let (_, body) = send(&app.router, get(&url, Some(&token))).await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));
    Ok(())
}

pub async fn assigned_only_nonzero_is_truthy(ep: &AttributeEndpoint) -> Result<()> {
    let (app, user, token) = authed_app("user@example.com").await?;
    let linked = ep.insert(&app.pool, user, "Object 1").await?;
    ep.insert(&app.pool, user, "Object 2").await?;
    let recipe = insert_recipe(&app.pool, user, "Apple Crumble").await?;
    ep.link(&app.pool, recipe, linked).await?;

    // Any nonzero value enables the filter, not just 1
    let url = format!("{}?assigned_only=2", ep.collection);
    let (status, body) = send(&app.router, get(&url, Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{ "id": linked, "name": "Object 1" }]));
    Ok(())
}

pub async fn list_rejects_malformed_query(ep: &AttributeEndpoint) -> Result<()> {
    let (app, _user, token) = authed_app("user@example.com").await?;

    let url = format!("{}?assigned_only=abc", ep.collection);
    let (status, body) = send(&app.router, get(&url, Some(&token))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert_eq!(body["error"], true);
    Ok(())
}

pub async fn assigned_only_deduplicates(ep: &AttributeEndpoint) -> Result<()> {
    let (app, user, token) = authed_app("user@example.com").await?;
    let shared = ep.insert(&app.pool, user, "Object").await?;
    ep.insert(&app.pool, user, "Different Object").await?;
    let recipe1 = insert_recipe(&app.pool, user, "Eggs Benedict").await?;
    let recipe2 = insert_recipe(&app.pool, user, "Herb Eggs").await?;
    ep.link(&app.pool, recipe1, shared).await?;
    ep.link(&app.pool, recipe2, shared).await?;

    let url = format!("{}?assigned_only=1", ep.collection);
    let (status, body) = send(&app.router, get(&url, Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    // Linked to two recipes but must appear exactly once
    assert_eq!(body, json!([{ "id": shared, "name": "Object" }]));
    Ok(())
}
