//! End-to-end integration tests over the wired application core.
//!
//! These drive full flows the way a render layer would: startup, submitting
//! the master password form, creating entries and reloading on the refresh
//! signal, and shutdown. Mocks stand in for the daemon so every flow is
//! deterministic.

mod common;

use common::{mock_core, sample_secrets};
use strongroom::app::AppCore;
use strongroom::models::NewSecret;
use strongroom::password::{MasterPasswordForm, VALID_MESSAGE, WEAK_PASSWORD_MESSAGE};
use strongroom::toast::Severity;
use strongroom::traits::GatewayError;

/// Drive the unlock flow the way the unlock page does: validate locally,
/// submit to the daemon only when the form passes, and surface the outcome
/// as a toast either way.
async fn submit_unlock(core: &AppCore, form: &mut MasterPasswordForm) {
    let outcome = form.submit().clone();
    if !outcome.is_valid() {
        for error in &outcome.field_errors {
            core.toasts.error(error.message.clone());
        }
        return;
    }
    let candidate = form.take_candidate();
    match core.session.unlock(&candidate.password).await {
        Ok(()) => {
            let message = outcome.message.unwrap_or_default();
            core.toasts.success(message);
        }
        Err(e) => {
            core.toasts.error(e.to_string());
        }
    }
}

// ============================================================================
// Startup
// ============================================================================

#[tokio::test]
async fn test_startup_publishes_session_and_serves_secrets() {
    let (core, session, secrets) = mock_core();
    session.set_check_session(Ok(true));
    secrets.seed(sample_secrets());

    core.initialize().await;
    assert!(core.session.is_authenticated());

    let listed = core.secrets.load().await;
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0].name, "email");
}

#[tokio::test]
async fn test_startup_with_dead_daemon_degrades_everywhere() {
    let (core, session, secrets) = mock_core();
    session.set_check_session(Err(GatewayError::ConnectionFailed(
        "refused".to_string(),
    )));
    secrets.set_list_error(GatewayError::ConnectionFailed("refused".to_string()));

    core.initialize().await;
    assert!(!core.session.is_authenticated());

    let listed = core.secrets.load().await;
    assert!(listed.is_empty());
    assert!(core.secrets.last_failure().is_some());
}

// ============================================================================
// Unlock flow
// ============================================================================

#[tokio::test]
async fn test_unlock_flow_happy_path() {
    let (core, session, _) = mock_core();
    session.set_check_session(Ok(true));

    let mut form = MasterPasswordForm::new();
    form.set_password("correct-horse");
    submit_unlock(&core, &mut form).await;

    assert!(core.session.is_authenticated());
    let toasts = core.toasts.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].severity, Severity::Success);
    assert_eq!(toasts[0].message, VALID_MESSAGE);
    // The form handed its candidate over and is empty again.
    assert_eq!(form.password(), "");
}

#[tokio::test]
async fn test_short_password_never_reaches_daemon() {
    let (core, session, _) = mock_core();

    let mut form = MasterPasswordForm::new();
    form.set_password("ab12");
    submit_unlock(&core, &mut form).await;

    assert!(session.get_calls().is_empty());
    let toasts = core.toasts.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].severity, Severity::Error);
    assert_eq!(toasts[0].message, "Must be at least 5 characters.");
}

#[tokio::test]
async fn test_weak_password_surfaces_its_message() {
    let (core, session, _) = mock_core();

    let mut form = MasterPasswordForm::new();
    form.set_password("abcd1234");
    submit_unlock(&core, &mut form).await;

    assert!(session.get_calls().is_empty());
    assert_eq!(core.toasts.toasts()[0].message, WEAK_PASSWORD_MESSAGE);
}

#[tokio::test]
async fn test_daemon_rejection_surfaces_as_error_toast() {
    let (core, session, _) = mock_core();
    session.set_verify_master_password(Err(GatewayError::Rejected(
        "wrong master password".to_string(),
    )));

    let mut form = MasterPasswordForm::new();
    form.set_password("correct-horse");
    submit_unlock(&core, &mut form).await;

    assert!(!core.session.is_authenticated());
    let toasts = core.toasts.toasts();
    assert_eq!(toasts[0].severity, Severity::Error);
    assert_eq!(
        toasts[0].message,
        "Request rejected: wrong master password"
    );
}

// ============================================================================
// Create and reload
// ============================================================================

#[tokio::test]
async fn test_create_wakes_listener_and_reload_sees_entry() {
    let (core, _, _) = mock_core();
    let mut listener = core.refresh.subscribe();
    assert!(core.secrets.load().await.is_empty());

    let id = core
        .secrets_writer
        .create(&NewSecret::new("note", "wifi", "hunter2"))
        .await
        .unwrap();

    assert!(listener.changed().await);
    let reloaded = core.secrets.load().await;
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded[0].id, id);
    assert_eq!(reloaded[0].name, "wifi");
}

#[tokio::test]
async fn test_failed_create_fires_nothing_and_reports() {
    let (core, _, secrets) = mock_core();
    secrets.set_create_error(GatewayError::Rejected("vault locked".to_string()));

    let result = core
        .secrets_writer
        .create(&NewSecret::new("login", "email", "hunter2"))
        .await;

    assert!(result.is_err());
    assert_eq!(core.refresh.counter(), 0);
}

// ============================================================================
// Logout and shutdown
// ============================================================================

#[tokio::test]
async fn test_logout_flow_locks_the_ui_state() {
    let (core, session, _) = mock_core();
    session.set_check_session(Ok(true));
    core.initialize().await;
    assert!(core.session.is_authenticated());

    session.set_check_session(Ok(false));
    core.session.log_out().await;
    assert!(!core.session.is_authenticated());
}

#[tokio::test]
async fn test_teardown_aborts_pending_toast_timers() {
    let (core, _, _) = mock_core();
    core.toasts.info("one");
    core.toasts.warning("two");
    assert_eq!(core.toasts.len(), 2);

    core.teardown();
    assert!(core.toasts.is_empty());
}
