//! Language enum for the dashboard's display language.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Display languages offered by the preference editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
    Es,
    Fr,
}

impl Language {
    /// Returns all languages in selector order.
    pub fn all() -> &'static [Language] {
        &[Language::En, Language::Hi, Language::Es, Language::Fr]
    }

    /// Returns the stored code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Es => "es",
            Language::Fr => "fr",
        }
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "Hindi",
            Language::Es => "Spanish",
            Language::Fr => "French",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|language| language.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| ValidationError::unknown_code("language", code))
    }
}
