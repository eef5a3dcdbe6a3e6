//! Dashboard Prefs - consent-gated user preferences for a signed-in dashboard
//!
//! This crate decides, per signed-in user, whether display preferences are
//! loaded from and saved to client-side storage, based on an explicit
//! consent decision.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
