pub mod attributes;
pub mod recipes;
