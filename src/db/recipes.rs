use sqlx::SqlitePool;

use crate::models::recipe::{CreateRecipe, RecipeRow, ReplaceRecipe, UpdateRecipe};

const COLUMNS: &str = "id, user_id, title, time_minutes, price, description, link";

/// Optional attribute-id filters for the recipe list.
#[derive(Debug, Default)]
pub struct RecipeFilter {
    pub tag_ids: Vec<i64>,
    pub ingredient_ids: Vec<i64>,
}

impl RecipeFilter {
    pub fn is_empty(&self) -> bool {
        self.tag_ids.is_empty() && self.ingredient_ids.is_empty()
    }
}

/// A user's recipes, newest first. Attribute filters restrict to recipes
/// linked to any of the given ids; the subselects keep each recipe appearing
/// once even when it matches several ids.
pub async fn list(
    pool: &SqlitePool,
    user_id: i64,
    filter: &RecipeFilter,
) -> Result<Vec<RecipeRow>, sqlx::Error> {
    let mut sql = format!("SELECT {} FROM recipes WHERE user_id = ?", COLUMNS);

    // ids are parsed i64s, safe to splice
    if !filter.tag_ids.is_empty() {
        sql.push_str(&format!(
            " AND id IN (SELECT recipe_id FROM recipe_tags WHERE tag_id IN ({}))",
            id_list(&filter.tag_ids)
        ));
    }
    if !filter.ingredient_ids.is_empty() {
        sql.push_str(&format!(
            " AND id IN (SELECT recipe_id FROM recipe_ingredients WHERE ingredient_id IN ({}))",
            id_list(&filter.ingredient_ids)
        ));
    }
    sql.push_str(" ORDER BY id DESC");

    sqlx::query_as(&sql).bind(user_id).fetch_all(pool).await
}

fn id_list(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

pub async fn get(
    pool: &SqlitePool,
    user_id: i64,
    id: i64,
) -> Result<Option<RecipeRow>, sqlx::Error> {
    let sql = format!("SELECT {} FROM recipes WHERE id = ? AND user_id = ?", COLUMNS);
    sqlx::query_as(&sql)
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Insert a recipe owned by `user_id` and return its id. Ownership comes from
/// the authenticated caller, never from the payload.
pub async fn create(
    pool: &SqlitePool,
    user_id: i64,
    input: &CreateRecipe,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO recipes (user_id, title, time_minutes, price, description, link) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(&input.title)
    .bind(input.time_minutes)
    .bind(input.price.to_string())
    .bind(&input.description)
    .bind(&input.link)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Full scalar replace. Returns the updated row, or `None` when the recipe is
/// absent or owned by someone else.
pub async fn replace(
    pool: &SqlitePool,
    user_id: i64,
    id: i64,
    input: &ReplaceRecipe,
) -> Result<Option<RecipeRow>, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE recipes SET title = ?, time_minutes = ?, price = ?, description = ?, link = ? \
         WHERE id = ? AND user_id = ?",
    )
    .bind(&input.title)
    .bind(input.time_minutes)
    .bind(input.price.to_string())
    .bind(&input.description)
    .bind(&input.link)
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get(pool, user_id, id).await
}

/// Partial update: absent fields keep their stored values.
pub async fn update(
    pool: &SqlitePool,
    user_id: i64,
    id: i64,
    patch: &UpdateRecipe,
) -> Result<Option<RecipeRow>, sqlx::Error> {
    let Some(current) = get(pool, user_id, id).await? else {
        return Ok(None);
    };

    let title = patch.title.clone().unwrap_or(current.title);
    let time_minutes = patch.time_minutes.unwrap_or(current.time_minutes);
    let price = patch
        .price
        .map(|p| p.to_string())
        .unwrap_or(current.price);
    let description = patch.description.clone().unwrap_or(current.description);
    let link = patch.link.clone().unwrap_or(current.link);

    sqlx::query(
        "UPDATE recipes SET title = ?, time_minutes = ?, price = ?, description = ?, link = ? \
         WHERE id = ? AND user_id = ?",
    )
    .bind(&title)
    .bind(time_minutes)
    .bind(&price)
    .bind(&description)
    .bind(&link)
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;

    get(pool, user_id, id).await
}

pub async fn delete(pool: &SqlitePool, user_id: i64, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM recipes WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
