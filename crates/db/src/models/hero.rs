//! Hero entity model and DTOs.

use heroes_core::document::{deserialize_document, Document};
use heroes_core::error::CoreError;
use heroes_core::types::DbId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use validator::Validate;

/// A hero row from the `heroes` table.
///
/// Structured columns are JSONB and come back as nested JSON objects.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Hero {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub powerstats: Value,
    pub appearance: Value,
    pub biography: Value,
    pub work: Value,
    pub connections: Value,
    pub images: Value,
}

/// Write DTO used by create, bulk create and full-replace update.
///
/// Every structured field defaults to an empty object when absent or `null`.
/// Unknown keys (e.g. an `id` in exported data) are ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct HeroInput {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "slug must be 1-255 characters"))]
    pub slug: String,
    #[serde(default, deserialize_with = "deserialize_document")]
    pub powerstats: Document,
    #[serde(default, deserialize_with = "deserialize_document")]
    pub appearance: Document,
    #[serde(default, deserialize_with = "deserialize_document")]
    pub biography: Document,
    #[serde(default, deserialize_with = "deserialize_document")]
    pub work: Document,
    #[serde(default, deserialize_with = "deserialize_document")]
    pub connections: Document,
    #[serde(default, deserialize_with = "deserialize_document")]
    pub images: Document,
}

impl HeroInput {
    /// Deserialize and validate a JSON body.
    pub fn from_json(body: Value) -> Result<Self, CoreError> {
        let input: Self = serde_json::from_value(body)
            .map_err(|e| CoreError::Validation(format!("Invalid hero payload: {e}")))?;
        input.validate()?;
        Ok(input)
    }

    /// Convenience constructor with empty documents.
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            ..Self::default()
        }
    }
}
