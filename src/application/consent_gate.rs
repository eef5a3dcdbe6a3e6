//! ConsentGate - decides whether the signed-in user's preferences are
//! loaded from storage, saved to it, or held back until a consent decision.
//!
//! The gate is the only writer of preference entries. It writes only while
//! the user's consent is `Granted`, or as the direct consequence of the
//! user granting it.

use crate::domain::foundation::{StateMachine, UserId};
use crate::domain::gate::{Decision, GateAction, GateError, GateOutcome, GateStatus};
use crate::domain::preferences::PreferenceRecord;

use super::stores::{ConsentStore, PreferenceStore};

/// The consent gate for one user.
pub struct ConsentGate {
    user_id: UserId,
    status: GateStatus,
    consent_store: ConsentStore,
    preference_store: PreferenceStore,
}

impl ConsentGate {
    /// Enters the dashboard for `user_id`.
    ///
    /// Returns the gate together with the record that populates the
    /// editable fields: the stored one when consent is granted, the default
    /// one otherwise.
    pub async fn enter(
        user_id: UserId,
        consent_store: ConsentStore,
        preference_store: PreferenceStore,
    ) -> (Self, PreferenceRecord) {
        let consent = consent_store.get_consent(&user_id).await;
        let status = GateStatus::for_consent(consent);

        let record = if consent.is_granted() {
            preference_store.get_preferences(&user_id).await
        } else {
            PreferenceRecord::default()
        };

        tracing::debug!(user_id = %user_id, consent = %consent, status = %status, "Entered consent gate");

        let gate = Self {
            user_id,
            status,
            consent_store,
            preference_store,
        };
        (gate, record)
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn status(&self) -> GateStatus {
        self.status
    }

    pub fn shows_prompt(&self) -> bool {
        self.status.shows_prompt()
    }

    pub fn shows_disabled_notice(&self) -> bool {
        self.status.shows_disabled_notice()
    }

    /// Grants consent and persists the current draft.
    ///
    /// Valid from the prompt or the denied notice. When the consent entry
    /// cannot be written the draft is not saved either, and the prompt stays.
    pub async fn accept(&mut self, draft: &PreferenceRecord) -> Result<GateOutcome, GateError> {
        let target = GateStatus::Active(Decision::Granted);
        self.ensure_decision_allowed(GateAction::Accept, target)?;

        if !self.consent_store.set_consent(&self.user_id, true).await {
            tracing::warn!(user_id = %self.user_id, "Consent not stored, preferences left unsaved");
            self.move_to(GateAction::Accept, GateStatus::AwaitingDecision)?;
            return Ok(GateOutcome::ConsentRequired);
        }
        self.move_to(GateAction::Accept, target)?;
        self.preference_store
            .save_preferences(&self.user_id, draft)
            .await;

        tracing::info!(user_id = %self.user_id, "Consent granted, preferences saved");
        Ok(GateOutcome::Saved)
    }

    /// Denies consent. The draft is not persisted.
    ///
    /// Declining again from the denied notice refreshes the stored denial.
    pub async fn decline(&mut self) -> Result<GateOutcome, GateError> {
        let target = GateStatus::Active(Decision::Denied);
        self.ensure_decision_allowed(GateAction::Decline, target)?;

        self.consent_store.set_consent(&self.user_id, false).await;
        self.move_to(GateAction::Decline, target)?;

        tracing::info!(user_id = %self.user_id, "Consent declined");
        Ok(GateOutcome::Declined)
    }

    /// Persists the draft if consent is granted, otherwise shows the prompt.
    ///
    /// Consent is read back from storage before writing, so an entry that
    /// expired or was removed since entry blocks the save.
    pub async fn save(&mut self, draft: &PreferenceRecord) -> Result<GateOutcome, GateError> {
        if self.status.allows_save() {
            let consent = self.consent_store.get_consent(&self.user_id).await;
            if consent.is_granted() {
                self.preference_store
                    .save_preferences(&self.user_id, draft)
                    .await;
                tracing::info!(user_id = %self.user_id, "Preferences saved");
                return Ok(GateOutcome::Saved);
            }
            tracing::debug!(user_id = %self.user_id, consent = %consent, "Stored consent no longer granted");
        }

        if !self.status.shows_prompt() {
            self.move_to(GateAction::Save, GateStatus::AwaitingDecision)?;
        }
        tracing::debug!(user_id = %self.user_id, "Save blocked until consent is granted");
        Ok(GateOutcome::ConsentRequired)
    }

    /// Reopens the prompt from the denied notice.
    pub fn reopen_prompt(&mut self) -> Result<GateOutcome, GateError> {
        if !self.status.shows_disabled_notice() {
            return Err(GateError::invalid(GateAction::ReopenPrompt, self.status));
        }
        self.move_to(GateAction::ReopenPrompt, GateStatus::AwaitingDecision)?;
        Ok(GateOutcome::PromptReopened)
    }

    /// Removes stored consent and preferences and shows the prompt again.
    ///
    /// Returns the record the editable fields fall back to.
    pub async fn reset(&mut self) -> PreferenceRecord {
        self.preference_store.clear_preferences(&self.user_id).await;
        // Every status can return to the prompt.
        if let Err(e) = self.move_to(GateAction::Reset, GateStatus::AwaitingDecision) {
            tracing::warn!(user_id = %self.user_id, error = %e, "Forcing prompt after reset");
            self.status = GateStatus::AwaitingDecision;
        }

        tracing::info!(user_id = %self.user_id, "Stored consent and preferences cleared");
        PreferenceRecord::default()
    }

    /// Checked before any store call, so a rejected decision writes nothing.
    fn ensure_decision_allowed(
        &self,
        action: GateAction,
        target: GateStatus,
    ) -> Result<(), GateError> {
        let reachable = self.status == target || self.status.can_transition_to(&target);
        if self.status.accepts_decision() && reachable {
            Ok(())
        } else {
            Err(GateError::invalid(action, self.status))
        }
    }

    fn move_to(&mut self, action: GateAction, target: GateStatus) -> Result<(), GateError> {
        if self.status == target {
            return Ok(());
        }
        let next = self
            .status
            .transition_to(target)
            .map_err(|_| GateError::invalid(action, self.status))?;
        tracing::debug!(user_id = %self.user_id, from = %self.status, to = %next, "Gate transition");
        self.status = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::Duration;

    use async_trait::async_trait;

    use crate::adapters::{InMemoryEntryStorage, ManualClock};
    use crate::domain::consent::ConsentState;
    use crate::domain::foundation::Timestamp;
    use crate::domain::preferences::{Language, Theme};
    use crate::ports::{EntryKind, EntryStorage, StorageError, StorageKey};

    struct Fixture {
        storage: InMemoryEntryStorage,
        consent: ConsentStore,
        preferences: PreferenceStore,
    }

    /// Refuses consent writes and passes everything else to the inner jar.
    struct ConsentWritesRefused(InMemoryEntryStorage);

    #[async_trait]
    impl EntryStorage for ConsentWritesRefused {
        async fn get(
            &self,
            key: &StorageKey,
            now: Timestamp,
        ) -> Result<Option<String>, StorageError> {
            self.0.get(key, now).await
        }

        async fn set(
            &self,
            key: &StorageKey,
            value: &str,
            expires_at: Timestamp,
        ) -> Result<(), StorageError> {
            if key.kind == EntryKind::Consent {
                return Err(StorageError::Unavailable("consent jar full".to_string()));
            }
            self.0.set(key, value, expires_at).await
        }

        async fn remove(&self, key: &StorageKey) -> Result<(), StorageError> {
            self.0.remove(key).await
        }
    }

    fn fixture() -> Fixture {
        let storage = InMemoryEntryStorage::new();
        let shared: Arc<dyn EntryStorage> = Arc::new(storage.clone());
        fixture_on(storage, shared)
    }

    fn fixture_on(storage: InMemoryEntryStorage, shared: Arc<dyn EntryStorage>) -> Fixture {
        let clock = Arc::new(ManualClock::default());
        Fixture {
            consent: ConsentStore::new(shared.clone(), clock.clone(), Duration::days(365)),
            preferences: PreferenceStore::new(shared, clock, Duration::days(30)),
            storage,
        }
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    async fn enter(f: &Fixture, id: &str) -> (ConsentGate, PreferenceRecord) {
        ConsentGate::enter(user(id), f.consent.clone(), f.preferences.clone()).await
    }

    fn blue() -> PreferenceRecord {
        PreferenceRecord::new(Language::En, Theme::Blue, 7)
    }

    #[tokio::test]
    async fn unset_consent_enters_awaiting_decision_with_defaults() {
        let f = fixture();
        let (gate, record) = enter(&f, "u1").await;

        assert_eq!(gate.status(), GateStatus::AwaitingDecision);
        assert!(gate.shows_prompt());
        assert_eq!(record, PreferenceRecord::default());
    }

    #[tokio::test]
    async fn granted_consent_loads_stored_preferences() {
        let f = fixture();
        f.consent.set_consent(&user("u1"), true).await;
        f.preferences.save_preferences(&user("u1"), &blue()).await;

        let (gate, record) = enter(&f, "u1").await;

        assert_eq!(gate.status(), GateStatus::Active(Decision::Granted));
        assert!(!gate.shows_prompt());
        assert_eq!(record, blue());
    }

    #[tokio::test]
    async fn denied_consent_ignores_stored_preferences() {
        let f = fixture();
        f.preferences.save_preferences(&user("u1"), &blue()).await;
        f.consent.set_consent(&user("u1"), false).await;

        let (gate, record) = enter(&f, "u1").await;

        assert_eq!(gate.status(), GateStatus::Active(Decision::Denied));
        assert!(gate.shows_disabled_notice());
        assert_eq!(record, PreferenceRecord::default());
    }

    #[tokio::test]
    async fn accept_grants_consent_and_persists_draft() {
        let f = fixture();
        let (mut gate, _) = enter(&f, "u1").await;

        let outcome = gate.accept(&blue()).await.unwrap();

        assert_eq!(outcome, GateOutcome::Saved);
        assert_eq!(gate.status(), GateStatus::Active(Decision::Granted));
        assert_eq!(f.consent.get_consent(&user("u1")).await, ConsentState::Granted);
        assert_eq!(f.preferences.get_preferences(&user("u1")).await, blue());
    }

    #[tokio::test]
    async fn decline_stores_denial_without_persisting_draft() {
        let f = fixture();
        let (mut gate, _) = enter(&f, "u1").await;

        assert_eq!(gate.decline().await.unwrap(), GateOutcome::Declined);

        assert_eq!(f.consent.get_consent(&user("u1")).await, ConsentState::Denied);
        assert!(f
            .storage
            .peek(&StorageKey::preferences(&user("u1")))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn decline_from_denied_notice_is_ok() {
        let f = fixture();
        f.consent.set_consent(&user("u2"), false).await;
        let (mut gate, _) = enter(&f, "u2").await;
        assert!(gate.shows_disabled_notice());

        assert_eq!(gate.decline().await, Ok(GateOutcome::Declined));

        assert_eq!(gate.status(), GateStatus::Active(Decision::Denied));
        assert_eq!(f.consent.get_consent(&user("u2")).await, ConsentState::Denied);
        assert!(f
            .storage
            .peek(&StorageKey::preferences(&user("u2")))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn decline_twice_from_prompt_is_ok() {
        let f = fixture();
        let (mut gate, _) = enter(&f, "u1").await;

        assert_eq!(gate.decline().await, Ok(GateOutcome::Declined));
        assert_eq!(gate.decline().await, Ok(GateOutcome::Declined));
        assert!(gate.shows_disabled_notice());
    }

    #[tokio::test]
    async fn rejected_decision_writes_nothing() {
        let f = fixture();
        f.consent.set_consent(&user("u1"), true).await;
        let (mut gate, _) = enter(&f, "u1").await;
        let before = f.storage.peek(&StorageKey::consent(&user("u1"))).await;

        assert!(gate.decline().await.is_err());

        assert_eq!(f.storage.peek(&StorageKey::consent(&user("u1"))).await, before);
    }

    #[tokio::test]
    async fn accept_skips_preferences_when_consent_cannot_be_stored() {
        let storage = InMemoryEntryStorage::new();
        let shared: Arc<dyn EntryStorage> = Arc::new(ConsentWritesRefused(storage.clone()));
        let f = fixture_on(storage, shared);
        let (mut gate, _) = enter(&f, "u1").await;

        assert_eq!(gate.accept(&blue()).await, Ok(GateOutcome::ConsentRequired));

        assert!(gate.shows_prompt());
        assert_eq!(f.storage.entry_count().await, 0);
    }

    #[tokio::test]
    async fn failed_accept_from_denied_notice_shows_prompt() {
        let storage = InMemoryEntryStorage::new();
        storage
            .set(
                &StorageKey::consent(&user("u2")),
                ConsentState::stored_value(false),
                Timestamp::now().plus_days(365),
            )
            .await
            .unwrap();
        let shared: Arc<dyn EntryStorage> = Arc::new(ConsentWritesRefused(storage.clone()));
        let f = fixture_on(storage, shared);
        let (mut gate, _) = enter(&f, "u2").await;
        assert!(gate.shows_disabled_notice());

        assert_eq!(gate.accept(&blue()).await, Ok(GateOutcome::ConsentRequired));

        assert!(gate.shows_prompt());
        assert!(f
            .storage
            .peek(&StorageKey::preferences(&user("u2")))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn accept_and_decline_are_rejected_once_granted() {
        let f = fixture();
        f.consent.set_consent(&user("u1"), true).await;
        let (mut gate, _) = enter(&f, "u1").await;

        assert_eq!(
            gate.decline().await,
            Err(GateError::invalid(
                GateAction::Decline,
                GateStatus::Active(Decision::Granted)
            ))
        );
        assert!(gate.accept(&blue()).await.is_err());
        assert_eq!(f.consent.get_consent(&user("u1")).await, ConsentState::Granted);
        assert!(f
            .storage
            .peek(&StorageKey::preferences(&user("u1")))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn save_while_denied_reopens_prompt_and_writes_nothing() {
        let f = fixture();
        f.consent.set_consent(&user("u2"), false).await;
        let (mut gate, _) = enter(&f, "u2").await;

        let outcome = gate
            .save(&PreferenceRecord::new(Language::En, Theme::Light, 42))
            .await
            .unwrap();

        assert_eq!(outcome, GateOutcome::ConsentRequired);
        assert!(gate.shows_prompt());
        assert!(f
            .storage
            .peek(&StorageKey::preferences(&user("u2")))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn save_while_awaiting_decision_stays_on_prompt() {
        let f = fixture();
        let (mut gate, _) = enter(&f, "u1").await;

        assert_eq!(gate.save(&blue()).await.unwrap(), GateOutcome::ConsentRequired);
        assert_eq!(gate.status(), GateStatus::AwaitingDecision);
        assert_eq!(f.storage.entry_count().await, 0);
    }

    #[tokio::test]
    async fn save_when_granted_persists_draft() {
        let f = fixture();
        f.consent.set_consent(&user("u1"), true).await;
        let (mut gate, _) = enter(&f, "u1").await;
        let record = PreferenceRecord::new(Language::Hi, Theme::Green, 11);

        assert_eq!(gate.save(&record).await.unwrap(), GateOutcome::Saved);
        assert_eq!(f.preferences.get_preferences(&user("u1")).await, record);
    }

    #[tokio::test]
    async fn save_rechecks_stored_consent() {
        let f = fixture();
        f.consent.set_consent(&user("u1"), true).await;
        let (mut gate, _) = enter(&f, "u1").await;
        f.consent.clear_consent(&user("u1")).await;

        assert_eq!(gate.save(&blue()).await.unwrap(), GateOutcome::ConsentRequired);
        assert_eq!(gate.status(), GateStatus::AwaitingDecision);
        assert!(f
            .storage
            .peek(&StorageKey::preferences(&user("u1")))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn reopen_prompt_only_from_denied_notice() {
        let f = fixture();
        let (mut gate, _) = enter(&f, "u1").await;
        assert!(gate.reopen_prompt().is_err());

        gate.decline().await.unwrap();
        assert_eq!(gate.reopen_prompt().unwrap(), GateOutcome::PromptReopened);
        assert!(gate.shows_prompt());

        gate.accept(&blue()).await.unwrap();
        assert_eq!(f.consent.get_consent(&user("u1")).await, ConsentState::Granted);
    }

    #[tokio::test]
    async fn accept_from_denied_notice_grants_consent() {
        let f = fixture();
        f.consent.set_consent(&user("u1"), false).await;
        let (mut gate, _) = enter(&f, "u1").await;

        assert_eq!(gate.accept(&blue()).await.unwrap(), GateOutcome::Saved);
        assert_eq!(f.preferences.get_preferences(&user("u1")).await, blue());
    }

    #[tokio::test]
    async fn reset_clears_storage_and_shows_prompt() {
        let f = fixture();
        let (mut gate, _) = enter(&f, "u3").await;
        gate.accept(&blue()).await.unwrap();

        let record = gate.reset().await;

        assert_eq!(record, PreferenceRecord::default());
        assert_eq!(gate.status(), GateStatus::AwaitingDecision);
        assert_eq!(f.consent.get_consent(&user("u3")).await, ConsentState::Unset);
        assert_eq!(f.storage.entry_count().await, 0);
    }

    #[tokio::test]
    async fn reset_from_prompt_keeps_prompt() {
        let f = fixture();
        let (mut gate, _) = enter(&f, "u1").await;

        assert_eq!(gate.reset().await, PreferenceRecord::default());
        assert_eq!(gate.status(), GateStatus::AwaitingDecision);
    }
}
