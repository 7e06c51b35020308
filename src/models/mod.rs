pub mod attribute;
pub mod recipe;
pub mod user;

pub use attribute::{Attribute, AttributeInput, AttributeKind, IngredientKind, TagKind};
pub use recipe::{CreateRecipe, RecipeDetail, RecipeRow, RecipeSummary, ReplaceRecipe, UpdateRecipe};
pub use user::User;
