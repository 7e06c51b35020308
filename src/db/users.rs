use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::User;

pub async fn create(pool: &SqlitePool, email: &str, name: &str) -> Result<User, sqlx::Error> {
    let result = sqlx::query("INSERT INTO users (email, name, created_at) VALUES (?, ?, ?)")
        .bind(email)
        .bind(name)
        .bind(Utc::now())
        .execute(pool)
        .await?;

    find(pool, result.last_insert_rowid())
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT id, email, name, created_at FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT id, email, name, created_at FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}
