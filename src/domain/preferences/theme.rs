//! Theme enum and the colour palette each theme applies to the dashboard.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Background and text colour applied by a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub text: &'static str,
}

/// Colour themes offered by the preference editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Brown,
    Blue,
    Green,
}

impl Theme {
    pub fn all() -> &'static [Theme] {
        &[
            Theme::Light,
            Theme::Dark,
            Theme::Brown,
            Theme::Blue,
            Theme::Green,
        ]
    }

    pub fn code(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Brown => "brown",
            Theme::Blue => "blue",
            Theme::Green => "green",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::Brown => "Brown",
            Theme::Blue => "Blue",
            Theme::Green => "Green",
        }
    }

    pub fn palette(&self) -> Palette {
        let (background, text) = match self {
            Theme::Light => ("#ffffff", "#000000"),
            Theme::Dark => ("#121212", "#ffffff"),
            Theme::Brown => ("#deb887", "#000000"),
            Theme::Blue => ("#e3f2fd", "#000000"),
            Theme::Green => ("#e8f5e9", "#000000"),
        };
        Palette { background, text }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Theme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|theme| theme.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| ValidationError::unknown_code("theme", code))
    }
}
