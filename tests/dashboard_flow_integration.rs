//! End-to-end dashboard flows over real stores and adapters.
//!
//! These tests drive `DashboardSession` the way the console front end does:
//! 1. A fresh user accepts consent and the draft is persisted
//! 2. A user who declined cannot save and is prompted again
//! 3. A full reset forgets consent and preferences
//! 4. Decisions survive a restart with file storage

use std::sync::Arc;

use chrono::Duration;

use dashboard_prefs::adapters::{
    FileEntryStorage, InMemoryEntryStorage, ManualClock, MockSessionBoundary,
};
use dashboard_prefs::application::{ConsentStore, DashboardSession, PreferenceStore};
use dashboard_prefs::domain::consent::ConsentState;
use dashboard_prefs::domain::foundation::{AuthError, SessionUser, Timestamp, UserId, UserRole};
use dashboard_prefs::domain::gate::{Decision, GateOutcome, GateStatus};
use dashboard_prefs::domain::preferences::{Language, PreferenceField, PreferenceRecord, Theme};
use dashboard_prefs::ports::{EntryStorage, StorageKey};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Stores {
    consent: ConsentStore,
    preferences: PreferenceStore,
}

fn stores(storage: Arc<dyn EntryStorage>, clock: Arc<ManualClock>) -> Stores {
    Stores {
        consent: ConsentStore::new(storage.clone(), clock.clone(), Duration::days(365)),
        preferences: PreferenceStore::new(storage, clock, Duration::days(30)),
    }
}

fn user(id: &str) -> SessionUser {
    SessionUser::new(id, format!("User {}", id), format!("{}@example.com", id), UserRole::User)
}

fn uid(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

async fn open(stores: &Stores, signed_in: SessionUser) -> DashboardSession {
    DashboardSession::open(
        Arc::new(MockSessionBoundary::new().with_user(signed_in)),
        stores.consent.clone(),
        stores.preferences.clone(),
    )
    .await
    .unwrap()
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn fresh_user_edits_theme_then_accepts() {
    let storage = InMemoryEntryStorage::new();
    let s = stores(Arc::new(storage.clone()), Arc::new(ManualClock::default()));
    let mut session = open(&s, user("u1")).await;

    assert_eq!(session.status(), GateStatus::AwaitingDecision);
    assert!(session.view().show_consent_prompt);

    session.set_theme(Theme::Blue);
    let outcome = session.accept_consent().await.unwrap();

    assert_eq!(outcome, GateOutcome::Saved);
    assert!(session.save_succeeded());
    assert_eq!(s.consent.get_consent(&uid("u1")).await, ConsentState::Granted);
    assert_eq!(
        s.preferences.get_preferences(&uid("u1")).await,
        PreferenceRecord::new(Language::En, Theme::Blue, 7)
    );
}

#[tokio::test]
async fn declined_user_cannot_save_and_is_prompted() {
    let storage = InMemoryEntryStorage::new();
    let s = stores(Arc::new(storage.clone()), Arc::new(ManualClock::default()));
    s.consent.set_consent(&uid("u2"), false).await;

    let mut session = open(&s, user("u2")).await;
    let view = session.view();
    assert_eq!(session.status(), GateStatus::Active(Decision::Denied));
    assert!(!view.show_consent_prompt);
    assert!(view.show_disabled_notice);
    assert_eq!(session.draft(), &PreferenceRecord::default());

    session
        .edit_field(PreferenceField::FavoriteNumber, "42")
        .unwrap();
    let outcome = session.save_preferences().await.unwrap();

    assert_eq!(outcome, GateOutcome::ConsentRequired);
    assert!(session.view().show_consent_prompt);
    assert!(storage
        .peek(&StorageKey::preferences(&uid("u2")))
        .await
        .is_none());
    assert_eq!(
        s.preferences.get_preferences(&uid("u2")).await,
        PreferenceRecord::default()
    );
}

#[tokio::test]
async fn reset_forgets_consent_and_preferences() {
    let s = stores(
        Arc::new(InMemoryEntryStorage::new()),
        Arc::new(ManualClock::default()),
    );
    s.consent.set_consent(&uid("u3"), true).await;
    s.preferences
        .save_preferences(&uid("u3"), &PreferenceRecord::new(Language::Fr, Theme::Dark, 99))
        .await;

    s.preferences.clear_preferences(&uid("u3")).await;

    assert_eq!(s.consent.get_consent(&uid("u3")).await, ConsentState::Unset);
    assert_eq!(
        s.preferences.get_preferences(&uid("u3")).await,
        PreferenceRecord::default()
    );
}

#[tokio::test]
async fn returning_user_sees_saved_preferences_until_they_expire() {
    let clock = Arc::new(ManualClock::new(Timestamp::now()));
    let s = stores(Arc::new(InMemoryEntryStorage::new()), clock.clone());

    let mut session = open(&s, user("u4")).await;
    session.set_language(Language::Hi);
    session.accept_consent().await.unwrap();

    clock.advance_days(29);
    let session = open(&s, user("u4")).await;
    assert_eq!(session.language(), Language::Hi);
    assert_eq!(session.status(), GateStatus::Active(Decision::Granted));

    // Preferences lapse after a month, consent is still on record
    clock.advance_days(1);
    let session = open(&s, user("u4")).await;
    assert_eq!(session.draft(), &PreferenceRecord::default());
    assert_eq!(session.status(), GateStatus::Active(Decision::Granted));
}

#[tokio::test]
async fn decline_keeps_previously_saved_preferences() {
    let storage = InMemoryEntryStorage::new();
    let s = stores(Arc::new(storage.clone()), Arc::new(ManualClock::default()));
    let saved = PreferenceRecord::new(Language::Es, Theme::Brown, 5);
    s.consent.set_consent(&uid("u5"), false).await;
    s.preferences.save_preferences(&uid("u5"), &saved).await;

    let mut session = open(&s, user("u5")).await;
    session.reopen_consent_prompt().unwrap();
    session.decline_consent().await.unwrap();

    assert_eq!(
        storage
            .peek(&StorageKey::preferences(&uid("u5")))
            .await
            .map(|entry| entry.value),
        Some(saved.encode().unwrap())
    );
}

#[tokio::test]
async fn unauthenticated_entry_never_touches_storage() {
    let storage = InMemoryEntryStorage::new();
    let s = stores(Arc::new(storage.clone()), Arc::new(ManualClock::default()));

    let result = DashboardSession::open(
        Arc::new(MockSessionBoundary::new().with_error(AuthError::service_unavailable("down"))),
        s.consent.clone(),
        s.preferences.clone(),
    )
    .await;

    assert!(matches!(result, Err(AuthError::ServiceUnavailable(_))));
    assert_eq!(storage.entry_count().await, 0);
}

#[tokio::test]
async fn file_storage_keeps_decisions_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jar.yaml");
    let clock = Arc::new(ManualClock::new(Timestamp::now()));

    {
        let s = stores(Arc::new(FileEntryStorage::new(&path)), clock.clone());
        let mut session = open(&s, user("u6")).await;
        session.set_theme(Theme::Green);
        session.set_favorite_number(0);
        session.accept_consent().await.unwrap();
    }

    let s = stores(Arc::new(FileEntryStorage::new(&path)), clock);
    let session = open(&s, user("u6")).await;

    assert_eq!(session.status(), GateStatus::Active(Decision::Granted));
    assert_eq!(session.theme(), Theme::Green);
    assert_eq!(session.favorite_number(), 0);
}

#[tokio::test]
async fn users_sharing_storage_are_isolated() {
    let s = stores(
        Arc::new(InMemoryEntryStorage::new()),
        Arc::new(ManualClock::default()),
    );

    let mut first = open(&s, user("a_b")).await;
    first.set_theme(Theme::Dark);
    first.accept_consent().await.unwrap();

    let second = open(&s, user("a")).await;
    assert_eq!(second.status(), GateStatus::AwaitingDecision);
    assert_eq!(second.draft(), &PreferenceRecord::default());
}
