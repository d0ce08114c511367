//! Recipe records as served by the recipe API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::RecipeId;
use crate::duration::{parse_duration_to_minutes, DurationBucket};

/// A published recipe.
///
/// Field names follow the API's wire format (`titulo`, `modo`, `imagemUrl`...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,

    #[serde(rename = "titulo")]
    pub title: String,

    #[serde(rename = "ingredientes")]
    pub ingredients: String,

    /// Preparation steps
    #[serde(rename = "modo")]
    pub method: String,

    /// Free-text preparation time, stored exactly as the author wrote it
    #[serde(rename = "tempo", default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<String>,

    #[serde(rename = "rendimento", default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<String>,

    #[serde(rename = "categoria", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(rename = "observacoes", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(rename = "imagemUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(rename = "authorId", default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<RecipeId>,

    #[serde(rename = "authorName", default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,

    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Recipe {
    pub fn new(
        id: impl Into<RecipeId>,
        title: impl Into<String>,
        ingredients: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ingredients: ingredients.into(),
            method: method.into(),
            prep_time: None,
            servings: None,
            category: None,
            notes: None,
            image_url: None,
            author_id: None,
            author_name: None,
            created_at: None,
        }
    }

    pub fn with_prep_time(mut self, prep_time: impl Into<String>) -> Self {
        self.prep_time = Some(prep_time.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Text of a searchable field; absent values read as empty.
    pub fn field(&self, field: RecipeField) -> &str {
        let value = match field {
            RecipeField::Title => Some(&self.title),
            RecipeField::Ingredients => Some(&self.ingredients),
            RecipeField::Method => Some(&self.method),
            RecipeField::PrepTime => self.prep_time.as_ref(),
            RecipeField::Servings => self.servings.as_ref(),
            RecipeField::Category => self.category.as_ref(),
            RecipeField::Notes => self.notes.as_ref(),
        };
        value.map(String::as_str).unwrap_or("")
    }

    /// Preparation time in whole minutes, when it can be read.
    pub fn prep_minutes(&self) -> Option<u64> {
        parse_duration_to_minutes(self.prep_time.as_deref())
    }

    pub fn duration_bucket(&self) -> DurationBucket {
        DurationBucket::from_minutes(self.prep_minutes())
    }
}

/// Error returned when a field name is not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown recipe field: {0}")]
pub struct UnknownField(pub String);

/// Text fields of a recipe, named as on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecipeField {
    #[serde(rename = "titulo")]
    Title,
    #[serde(rename = "ingredientes")]
    Ingredients,
    #[serde(rename = "modo")]
    Method,
    #[serde(rename = "tempo")]
    PrepTime,
    #[serde(rename = "rendimento")]
    Servings,
    #[serde(rename = "categoria")]
    Category,
    #[serde(rename = "observacoes")]
    Notes,
}

impl RecipeField {
    pub const ALL: [RecipeField; 7] = [
        RecipeField::Title,
        RecipeField::Ingredients,
        RecipeField::Method,
        RecipeField::PrepTime,
        RecipeField::Servings,
        RecipeField::Category,
        RecipeField::Notes,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RecipeField::Title => "titulo",
            RecipeField::Ingredients => "ingredientes",
            RecipeField::Method => "modo",
            RecipeField::PrepTime => "tempo",
            RecipeField::Servings => "rendimento",
            RecipeField::Category => "categoria",
            RecipeField::Notes => "observacoes",
        }
    }
}

impl fmt::Display for RecipeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RecipeField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.name() == name)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Response envelope used by the recipe API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
