//! PreferenceRecord value object and its stored JSON form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::{Language, Theme};
use crate::domain::foundation::ValidationError;

/// Favourite number used by the default record.
pub const DEFAULT_FAVORITE_NUMBER: u32 = 7;

/// Errors decoding or encoding a stored preference payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreferenceCodecError {
    #[error("Preference payload is not valid JSON: {0}")]
    Malformed(String),

    #[error("Preference payload is not a JSON object")]
    NotAnObject,

    #[error("Preference payload has an invalid field: {0}")]
    InvalidField(String),

    #[error("Failed to encode preferences: {0}")]
    Encode(String),
}

/// The user-customisable display settings.
///
/// Stored as `{"language":"en","theme":"light","favoriteNumber":7}`.
/// Fields missing from a stored payload are taken from [`PreferenceRecord::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferenceRecord {
    pub language: Language,
    pub theme: Theme,
    pub favorite_number: u32,
}

impl PreferenceRecord {
    pub fn new(language: Language, theme: Theme, favorite_number: u32) -> Self {
        Self {
            language,
            theme,
            favorite_number,
        }
    }

    /// Decodes a stored payload.
    pub fn decode(payload: &str) -> Result<Self, PreferenceCodecError> {
        let value: serde_json::Value = serde_json::from_str(payload)
            .map_err(|e| PreferenceCodecError::Malformed(e.to_string()))?;

        if !value.is_object() {
            return Err(PreferenceCodecError::NotAnObject);
        }

        serde_json::from_value(value).map_err(|e| PreferenceCodecError::InvalidField(e.to_string()))
    }

    /// Encodes the record for storage.
    pub fn encode(&self) -> Result<String, PreferenceCodecError> {
        serde_json::to_string(self).map_err(|e| PreferenceCodecError::Encode(e.to_string()))
    }
}

impl Default for PreferenceRecord {
    /// `{language: "en", theme: "light", favoriteNumber: 7}`
    fn default() -> Self {
        Self {
            language: Language::En,
            theme: Theme::Light,
            favorite_number: DEFAULT_FAVORITE_NUMBER,
        }
    }
}

/// Editable fields of a [`PreferenceRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceField {
    Language,
    Theme,
    FavoriteNumber,
}

impl PreferenceField {
    pub fn name(&self) -> &'static str {
        match self {
            PreferenceField::Language => "language",
            PreferenceField::Theme => "theme",
            PreferenceField::FavoriteNumber => "favoriteNumber",
        }
    }
}

impl fmt::Display for PreferenceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PreferenceField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "language" | "lang" => Ok(PreferenceField::Language),
            "theme" => Ok(PreferenceField::Theme),
            "favoritenumber" | "favorite_number" | "number" => Ok(PreferenceField::FavoriteNumber),
            other => Err(ValidationError::unknown_code("field", other)),
        }
    }
}

/// Parses a favourite number typed into the editor.
pub fn parse_favorite_number(raw: &str) -> Result<u32, ValidationError> {
    let field = PreferenceField::FavoriteNumber.name();
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::empty_field(field));
    }

    let value: i64 = raw
        .parse()
        .map_err(|_| ValidationError::invalid_format(field, format!("'{}' is not a whole number", raw)))?;

    u32::try_from(value).map_err(|_| ValidationError::out_of_range(field, 0, i64::from(u32::MAX), value))
}
