use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::ApiError;
use crate::models::attribute::{Attribute, AttributeInput};

/// A recipe as stored. Price is kept as its canonical decimal string so the
/// value survives the TEXT round trip exactly.
#[derive(Debug, Clone, FromRow)]
pub struct RecipeRow {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub time_minutes: i64,
    pub price: String,
    pub description: String,
    pub link: String,
}

impl RecipeRow {
    pub fn price_decimal(&self) -> Result<Decimal, ApiError> {
        self.price
            .parse()
            .map_err(|_| ApiError::Internal(format!("stored price is not a decimal: {}", self.price)))
    }
}

/// List representation: everything but the description.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeSummary {
    pub id: i64,
    pub title: String,
    pub time_minutes: i64,
    pub price: Decimal,
    pub link: String,
    pub tags: Vec<Attribute>,
    pub ingredients: Vec<Attribute>,
}

/// Detail representation: summary plus description.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetail {
    pub id: i64,
    pub title: String,
    pub time_minutes: i64,
    pub price: Decimal,
    pub link: String,
    pub description: String,
    pub tags: Vec<Attribute>,
    pub ingredients: Vec<Attribute>,
}

/// POST body. Ownership is never taken from the payload; unknown fields
/// (including any owner field a client might send) are ignored.
#[derive(Debug, Deserialize)]
pub struct CreateRecipe {
    pub title: String,
    pub time_minutes: i64,
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub tags: Vec<AttributeInput>,
    #[serde(default)]
    pub ingredients: Vec<AttributeInput>,
}

/// PUT body: full scalar replace. Attribute arrays, when present, replace the
/// association sets; when absent the associations are untouched.
#[derive(Debug, Deserialize)]
pub struct ReplaceRecipe {
    pub title: String,
    pub time_minutes: i64,
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
    pub tags: Option<Vec<AttributeInput>>,
    pub ingredients: Option<Vec<AttributeInput>>,
}

/// PATCH body: every field optional, absent fields untouched. An empty
/// `tags`/`ingredients` array clears that association set.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRecipe {
    pub title: Option<String>,
    pub time_minutes: Option<i64>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub tags: Option<Vec<AttributeInput>>,
    pub ingredients: Option<Vec<AttributeInput>>,
}
