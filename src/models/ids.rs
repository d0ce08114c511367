//! Recipe identifiers.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of a stored recipe.
///
/// The recipe API serves ids either as strings or as bare numbers
/// depending on the row source; both deserialize to the same text form.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RecipeId(String);

impl RecipeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecipeId({})", self.0)
    }
}

impl From<String> for RecipeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RecipeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl<'de> Deserialize<'de> for RecipeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(u64),
        }

        match RawId::deserialize(deserializer) {
            Ok(RawId::Text(text)) => Ok(Self(text)),
            Ok(RawId::Number(number)) => Ok(Self(number.to_string())),
            Err(_) => Err(de::Error::custom("recipe id must be a string or an integer")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_string_and_number() {
        let text: RecipeId = serde_json::from_str("\"abc-1\"").unwrap();
        assert_eq!(text.as_str(), "abc-1");

        let number: RecipeId = serde_json::from_str("42").unwrap();
        assert_eq!(number, RecipeId::from("42"));
    }

    #[test]
    fn test_id_rejects_other_shapes() {
        assert!(serde_json::from_str::<RecipeId>("[1]").is_err());
        assert!(serde_json::from_str::<RecipeId>("-3").is_err());
    }

    #[test]
    fn test_id_serializes_as_string() {
        let id = RecipeId::new("7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"7\"");
        assert_eq!(format!("{:?}", id), "RecipeId(7)");
    }
}
