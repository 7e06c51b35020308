//! Queries shared by both attribute types. Every statement is written once
//! against the `AttributeKind` table mapping and always scoped to the owning
//! user, so an id belonging to someone else behaves exactly like a missing
//! row.

use sqlx::SqlitePool;

use crate::models::attribute::{Attribute, AttributeInput, AttributeKind};

/// List a user's attributes, ordered by name descending. With `assigned_only`
/// the join against the recipe association table would yield one row per
/// association, so the select is DISTINCT: a record linked to several recipes
/// comes back exactly once.
pub async fn list<K: AttributeKind>(
    pool: &SqlitePool,
    user_id: i64,
    assigned_only: bool,
) -> Result<Vec<Attribute>, sqlx::Error> {
    let sql = if assigned_only {
        format!(
            "SELECT DISTINCT a.id, a.name FROM {table} a \
             JOIN {join} j ON j.{col} = a.id \
             WHERE a.user_id = ? ORDER BY a.name DESC",
            table = K::TABLE,
            join = K::JOIN_TABLE,
            col = K::JOIN_COLUMN,
        )
    } else {
        format!(
            "SELECT id, name FROM {} WHERE user_id = ? ORDER BY name DESC",
            K::TABLE
        )
    };

    sqlx::query_as(&sql).bind(user_id).fetch_all(pool).await
}

/// Rename an attribute. Returns `None` when no row matched, which covers both
/// a missing id and an id owned by another user.
pub async fn update_name<K: AttributeKind>(
    pool: &SqlitePool,
    user_id: i64,
    id: i64,
    name: &str,
) -> Result<Option<Attribute>, sqlx::Error> {
    let sql = format!(
        "UPDATE {} SET name = ? WHERE id = ? AND user_id = ?",
        K::TABLE
    );
    let result = sqlx::query(&sql)
        .bind(name)
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    let sql = format!("SELECT id, name FROM {} WHERE id = ?", K::TABLE);
    sqlx::query_as(&sql).bind(id).fetch_optional(pool).await
}

/// Delete an attribute; association rows go with it via ON DELETE CASCADE.
/// Returns whether a row was removed.
pub async fn delete<K: AttributeKind>(
    pool: &SqlitePool,
    user_id: i64,
    id: i64,
) -> Result<bool, sqlx::Error> {
    let sql = format!("DELETE FROM {} WHERE id = ? AND user_id = ?", K::TABLE);
    let result = sqlx::query(&sql).bind(id).bind(user_id).execute(pool).await?;

    Ok(result.rows_affected() > 0)
}

/// Find an attribute by (owner, name) or create it.
pub async fn get_or_create<K: AttributeKind>(
    pool: &SqlitePool,
    user_id: i64,
    name: &str,
) -> Result<i64, sqlx::Error> {
    let sql = format!("SELECT id FROM {} WHERE user_id = ? AND name = ?", K::TABLE);
    if let Some(id) = sqlx::query_scalar::<_, i64>(&sql)
        .bind(user_id)
        .bind(name)
        .fetch_optional(pool)
        .await?
    {
        return Ok(id);
    }

    let sql = format!("INSERT INTO {} (user_id, name) VALUES (?, ?)", K::TABLE);
    let result = sqlx::query(&sql)
        .bind(user_id)
        .bind(name)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

/// Attributes linked to one recipe.
pub async fn for_recipe<K: AttributeKind>(
    pool: &SqlitePool,
    recipe_id: i64,
) -> Result<Vec<Attribute>, sqlx::Error> {
    let sql = format!(
        "SELECT a.id, a.name FROM {table} a \
         JOIN {join} j ON j.{col} = a.id \
         WHERE j.recipe_id = ? ORDER BY a.id",
        table = K::TABLE,
        join = K::JOIN_TABLE,
        col = K::JOIN_COLUMN,
    );

    sqlx::query_as(&sql).bind(recipe_id).fetch_all(pool).await
}

/// Replace a recipe's association set with the given names. Names are
/// get-or-created under the same owner, so assigning an existing name links
/// the existing record instead of duplicating it.
pub async fn set_for_recipe<K: AttributeKind>(
    pool: &SqlitePool,
    user_id: i64,
    recipe_id: i64,
    inputs: &[AttributeInput],
) -> Result<(), sqlx::Error> {
    let sql = format!("DELETE FROM {} WHERE recipe_id = ?", K::JOIN_TABLE);
    sqlx::query(&sql).bind(recipe_id).execute(pool).await?;

    for input in inputs {
        let attribute_id = get_or_create::<K>(pool, user_id, input.name.trim()).await?;
        let sql = format!(
            "INSERT OR IGNORE INTO {} (recipe_id, {}) VALUES (?, ?)",
            K::JOIN_TABLE,
            K::JOIN_COLUMN,
        );
        sqlx::query(&sql)
            .bind(recipe_id)
            .bind(attribute_id)
            .execute(pool)
            .await?;
    }

    Ok(())
}
