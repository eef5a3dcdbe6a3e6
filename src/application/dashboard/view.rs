//! Read-only snapshot of the dashboard for the presentation layer.

use std::fmt;

use crate::domain::foundation::SessionUser;
use crate::domain::preferences::{Language, Palette, PreferenceRecord, Theme};

pub const SAVE_SUCCESS_MESSAGE: &str = "Preferences saved successfully!";
pub const STORAGE_DISABLED_NOTICE: &str =
    "Cookie storage is currently disabled. Your preferences won't be saved.";

/// Everything the dashboard screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub title: &'static str,
    pub role_badge: String,
    pub greeting: String,
    pub email: String,
    pub language: Language,
    pub theme: Theme,
    pub favorite_number: u32,
    pub palette: Palette,
    pub show_consent_prompt: bool,
    pub show_disabled_notice: bool,
    pub save_succeeded: bool,
}

impl DashboardView {
    pub fn new(
        user: &SessionUser,
        draft: &PreferenceRecord,
        show_consent_prompt: bool,
        show_disabled_notice: bool,
        save_succeeded: bool,
    ) -> Self {
        let (title, salutation) = if user.is_admin() {
            ("Admin Dashboard", "Welcome Admin:")
        } else {
            ("User Dashboard", "Welcome:")
        };

        Self {
            title,
            role_badge: user.role.code().to_uppercase(),
            greeting: format!("{} {}", salutation, user.name),
            email: user.email.clone(),
            language: draft.language,
            theme: draft.theme,
            favorite_number: draft.favorite_number,
            palette: draft.theme.palette(),
            show_consent_prompt,
            show_disabled_notice,
            save_succeeded,
        }
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} [{}]", self.title, self.role_badge)?;
        writeln!(f, "{}", self.greeting)?;
        writeln!(f, "Email: {}", self.email)?;
        writeln!(f, "Language: {}", self.language.display_name())?;
        writeln!(
            f,
            "Theme: {} (background {}, text {})",
            self.theme.display_name(),
            self.palette.background,
            self.palette.text
        )?;
        write!(f, "Favorite number: {}", self.favorite_number)?;

        if self.show_disabled_notice {
            write!(f, "\n{}", STORAGE_DISABLED_NOTICE)?;
        }
        if self.save_succeeded {
            write!(f, "\n{}", SAVE_SUCCESS_MESSAGE)?;
        }
        if self.show_consent_prompt {
            write!(
                f,
                "\nThis dashboard stores your preferences in cookies. Accept or decline?"
            )?;
        }
        Ok(())
    }
}
