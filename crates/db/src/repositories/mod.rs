//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod ingredient_repo;
pub mod product_repo;
mod write;

pub use ingredient_repo::IngredientRepo;
pub use product_repo::ProductRepo;
