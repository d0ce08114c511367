//! Core data models for the recipe catalog.

mod ids;
mod recipe;

pub use ids::*;
pub use recipe::*;
