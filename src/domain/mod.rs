//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, auth types)
//! - `preferences` - Language, theme and the stored preference record
//! - `consent` - The tri-state consent flag
//! - `gate` - Consent gate status machine and action outcomes

pub mod consent;
pub mod foundation;
pub mod gate;
pub mod preferences;
