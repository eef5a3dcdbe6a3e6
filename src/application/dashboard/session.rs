//! DashboardSession - the state of one signed-in user's dashboard.
//!
//! Created after the session boundary confirms who is signed in, and
//! dropped on logout. It owns the consent gate and the in-memory draft the
//! preference editor reads and writes. Editor setters only change the draft.
//! Storage is touched only through the gate.

use std::sync::Arc;

use crate::domain::foundation::{AuthError, SessionUser, UserId, ValidationError};
use crate::domain::gate::{GateError, GateOutcome, GateStatus};
use crate::domain::preferences::{
    parse_favorite_number, Language, PreferenceField, PreferenceRecord, Theme,
};
use crate::ports::SessionBoundary;

use super::view::DashboardView;
use crate::application::consent_gate::ConsentGate;
use crate::application::stores::{ConsentStore, PreferenceStore};

/// One authenticated user's dashboard.
pub struct DashboardSession {
    boundary: Arc<dyn SessionBoundary>,
    user: SessionUser,
    gate: ConsentGate,
    draft: PreferenceRecord,
    save_succeeded: bool,
}

impl DashboardSession {
    /// Asks the session boundary who is signed in and enters the gate.
    ///
    /// # Errors
    ///
    /// Any `AuthError` from the boundary, or `AuthError::MissingIdentity`
    /// when the user carries no usable identifier. No store is read or
    /// written in either case.
    pub async fn open(
        boundary: Arc<dyn SessionBoundary>,
        consent_store: ConsentStore,
        preference_store: PreferenceStore,
    ) -> Result<Self, AuthError> {
        let user = boundary.current_user().await.map_err(|e| {
            tracing::debug!(error = %e, "Dashboard entry refused");
            e
        })?;

        let user_id = user.user_id().ok_or_else(|| {
            tracing::warn!(email = %user.email, "Signed-in user has no identifier");
            AuthError::MissingIdentity
        })?;

        let (gate, draft) = ConsentGate::enter(user_id, consent_store, preference_store).await;
        tracing::info!(user_id = %gate.user_id(), role = %user.role, "Dashboard opened");

        Ok(Self {
            boundary,
            user,
            gate,
            draft,
            save_succeeded: false,
        })
    }

    pub fn user(&self) -> &SessionUser {
        &self.user
    }

    pub fn user_id(&self) -> &UserId {
        self.gate.user_id()
    }

    pub fn status(&self) -> GateStatus {
        self.gate.status()
    }

    pub fn language(&self) -> Language {
        self.draft.language
    }

    pub fn theme(&self) -> Theme {
        self.draft.theme
    }

    pub fn favorite_number(&self) -> u32 {
        self.draft.favorite_number
    }

    pub fn draft(&self) -> &PreferenceRecord {
        &self.draft
    }

    pub fn set_language(&mut self, language: Language) {
        self.draft.language = language;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.draft.theme = theme;
    }

    pub fn set_favorite_number(&mut self, favorite_number: u32) {
        self.draft.favorite_number = favorite_number;
    }

    /// Applies a textual edit from the editor. On error the draft is unchanged.
    pub fn edit_field(&mut self, field: PreferenceField, raw: &str) -> Result<(), ValidationError> {
        match field {
            PreferenceField::Language => self.set_language(raw.parse()?),
            PreferenceField::Theme => self.set_theme(raw.parse()?),
            PreferenceField::FavoriteNumber => self.set_favorite_number(parse_favorite_number(raw)?),
        }
        Ok(())
    }

    pub async fn accept_consent(&mut self) -> Result<GateOutcome, GateError> {
        let outcome = self.gate.accept(&self.draft).await?;
        Ok(self.record(outcome))
    }

    pub async fn decline_consent(&mut self) -> Result<GateOutcome, GateError> {
        let outcome = self.gate.decline().await?;
        Ok(self.record(outcome))
    }

    pub async fn save_preferences(&mut self) -> Result<GateOutcome, GateError> {
        let outcome = self.gate.save(&self.draft).await?;
        Ok(self.record(outcome))
    }

    pub fn reopen_consent_prompt(&mut self) -> Result<GateOutcome, GateError> {
        let outcome = self.gate.reopen_prompt()?;
        Ok(self.record(outcome))
    }

    /// Clears stored consent and preferences and resets the draft.
    pub async fn reset_preferences(&mut self) -> GateOutcome {
        self.draft = self.gate.reset().await;
        self.record(GateOutcome::Reset)
    }

    pub fn save_succeeded(&self) -> bool {
        self.save_succeeded
    }

    pub fn dismiss_save_notice(&mut self) {
        self.save_succeeded = false;
    }

    pub fn view(&self) -> DashboardView {
        DashboardView::new(
            &self.user,
            &self.draft,
            self.gate.shows_prompt(),
            self.gate.shows_disabled_notice(),
            self.save_succeeded,
        )
    }

    /// Ends the session. Logout is best-effort.
    pub async fn logout(self) {
        match self.boundary.logout().await {
            Ok(()) => tracing::info!(user_id = %self.gate.user_id(), "Logged out"),
            Err(e) => tracing::warn!(user_id = %self.gate.user_id(), error = %e, "Logout failed"),
        }
    }

    fn record(&mut self, outcome: GateOutcome) -> GateOutcome {
        self.save_succeeded = outcome.signals_success();
        outcome
    }
}
