use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A name-owned attribute record (tag or ingredient) as exposed over the API.
/// The owning user id is implicit in every query and never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Attribute {
    pub id: i64,
    pub name: String,
}

/// Patch/create body for an attribute; `name` is the only mutable field.
#[derive(Debug, Clone, Deserialize)]
pub struct AttributeInput {
    pub name: String,
}

/// Static mapping from an attribute type to its tables. Resolved at compile
/// time, one implementation per concrete resource; the generic handlers and
/// queries are written once against this trait.
pub trait AttributeKind: Send + Sync + 'static {
    /// Table holding the attribute records.
    const TABLE: &'static str;
    /// Recipe association table.
    const JOIN_TABLE: &'static str;
    /// Column of `JOIN_TABLE` referencing the attribute.
    const JOIN_COLUMN: &'static str;
}

pub enum TagKind {}

impl AttributeKind for TagKind {
    const TABLE: &'static str = "tags";
    const JOIN_TABLE: &'static str = "recipe_tags";
    const JOIN_COLUMN: &'static str = "tag_id";
}

pub enum IngredientKind {}

impl AttributeKind for IngredientKind {
    const TABLE: &'static str = "ingredients";
    const JOIN_TABLE: &'static str = "recipe_ingredients";
    const JOIN_COLUMN: &'static str = "ingredient_id";
}
