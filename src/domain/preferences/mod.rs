//! Display preferences a user can edit on the dashboard.

mod language;
mod record;
mod theme;

pub use language::Language;
pub use record::{
    parse_favorite_number, PreferenceCodecError, PreferenceField, PreferenceRecord,
    DEFAULT_FAVORITE_NUMBER,
};
pub use theme::{Palette, Theme};
