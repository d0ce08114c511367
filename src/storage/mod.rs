//! Recipe collection files.
//!
//! Recipes can be loaded from:
//! - JSON Lines files (`.jsonl`), one recipe per line
//! - JSON documents holding a bare array of recipes
//! - Saved API responses (`{ "success": true, "data": [...] }`)

mod jsonl;

pub use jsonl::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::models::{ApiResponse, Recipe};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("API reported failure: {0}")]
    Api(String),
}

/// JSON document shapes accepted for recipe files.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeDocument {
    List(Vec<Recipe>),
    Envelope(ApiResponse<Vec<Recipe>>),
}

fn is_jsonl(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jsonl"))
}

/// Load every recipe from a file, choosing the format by extension.
pub fn load_recipes(path: &Path) -> Result<Vec<Recipe>, StorageError> {
    if !path.exists() {
        return Err(StorageError::PathNotFound(path.to_path_buf()));
    }

    let recipes = if is_jsonl(path) {
        JsonlReader::new(path.to_path_buf()).read_all()?
    } else {
        let contents = fs::read_to_string(path)?;
        parse_recipe_document(&contents)?
    };

    info!("Loaded {} recipes from {:?}", recipes.len(), path);
    Ok(recipes)
}

/// Parse a JSON recipe document (array or API envelope).
pub fn parse_recipe_document(contents: &str) -> Result<Vec<Recipe>, StorageError> {
    match serde_json::from_str(contents)? {
        RecipeDocument::List(recipes) => Ok(recipes),
        RecipeDocument::Envelope(response) if response.success => {
            Ok(response.data.unwrap_or_default())
        }
        RecipeDocument::Envelope(response) => Err(StorageError::Api(
            response
                .message
                .unwrap_or_else(|| "request was not successful".to_string()),
        )),
    }
}
