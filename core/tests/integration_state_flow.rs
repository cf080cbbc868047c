//! Integration tests: the session state machine through the public
//! `CardfileCore` API.
//!
//! These tests exercise sign-in, sign-up, sign-out, and direct session
//! injection end-to-end — no view layer, just the facade surface an
//! embedding application sees.
//!
//! Run with:
//!   cargo test --test integration_state_flow

use cardfile_core::{CardfileCore, Identity, Session, ValidationError};

// ============================================================================
// Helpers
// ============================================================================

/// Stand up a core with one identity already signed in.
fn signed_in_core(email: &str) -> CardfileCore {
    let core = CardfileCore::new();
    core.sign_in(email, "correct horse battery staple")
        .expect("sign-in with non-empty credentials must succeed");
    core
}

// ============================================================================
// Test 1 — Initial state
// ============================================================================

/// A fresh core is Anonymous: no identity, nothing to read.
#[test]
fn test_fresh_core_is_anonymous() {
    let core = CardfileCore::new();

    assert_eq!(core.session(), Session::Anonymous);
    assert!(core.current_identity().is_none());
    assert!(!core.is_authenticated());
}

// ============================================================================
// Test 2 — Valid sign-in
// ============================================================================

/// Signing in with non-empty credentials lands in Authenticated, and the
/// identity carries exactly the email that was supplied.
#[test]
fn test_sign_in_reaches_authenticated_with_the_input_email() {
    let core = signed_in_core("ana@example.com");

    let identity = core
        .current_identity()
        .expect("an identity must be present after sign-in");
    assert_eq!(identity.email, "ana@example.com");
    assert!(!identity.id.is_empty(), "identity id must be assigned");
}

// ============================================================================
// Test 3 — Invalid sign-in leaves state untouched
// ============================================================================

/// Every combination with an empty field errors, and the prior state —
/// Anonymous or Authenticated — survives unchanged.
#[test]
fn test_invalid_sign_in_preserves_prior_state() {
    let core = CardfileCore::new();

    for (email, password) in [("", "pw"), ("ana@example.com", ""), ("", "")] {
        assert_eq!(
            core.sign_in(email, password),
            Err(ValidationError::MissingCredentials),
            "empty credential must be rejected"
        );
        assert_eq!(core.session(), Session::Anonymous);
    }

    // Same check starting from an authenticated session.
    let core = signed_in_core("ana@example.com");
    let before = core.session();

    assert!(core.sign_in("", "pw").is_err());
    assert_eq!(
        core.session(),
        before,
        "a failed sign-in must not disturb the signed-in identity"
    );
}

// ============================================================================
// Test 4 — Sign-in re-entry overwrites
// ============================================================================

/// Signing in while already authenticated replaces the identity outright.
#[test]
fn test_sign_in_reentry_overwrites_identity() {
    let core = signed_in_core("first@example.com");

    core.sign_in("second@example.com", "pw")
        .expect("re-entry sign-in must succeed");

    assert_eq!(
        core.current_identity()
            .expect("identity must be present")
            .email,
        "second@example.com"
    );
}

// ============================================================================
// Test 5 — Sign-out from every state
// ============================================================================

/// Sign-out is total: from Authenticated it clears the identity, from
/// Anonymous it is a harmless repeat.
#[test]
fn test_sign_out_always_lands_in_anonymous() {
    let core = signed_in_core("ana@example.com");

    core.sign_out();
    assert_eq!(core.session(), Session::Anonymous);

    core.sign_out();
    assert_eq!(core.session(), Session::Anonymous);
}

// ============================================================================
// Test 6 — Sign-up is validation only
// ============================================================================

/// Sign-up shares the validation rule but never mutates the session.
#[test]
fn test_sign_up_validates_but_never_mutates() {
    let core = CardfileCore::new();

    core.sign_up("new@example.com", "pw")
        .expect("sign-up with non-empty credentials must succeed");
    assert_eq!(
        core.session(),
        Session::Anonymous,
        "successful sign-up must not sign the user in"
    );

    assert_eq!(
        core.sign_up("", "pw"),
        Err(ValidationError::MissingCredentials)
    );
}

// ============================================================================
// Test 7 — Session restoration via set_user
// ============================================================================

/// `set_user` is a direct overwrite in both directions: it installs a
/// restored identity without validation and clears on `None`.
#[test]
fn test_set_user_restores_and_clears_without_validation() {
    let core = CardfileCore::new();

    let restored = Identity {
        id: "session-cache-7".to_string(),
        email: "restored@example.com".to_string(),
    };
    core.set_user(Some(restored.clone()));
    assert_eq!(core.current_identity(), Some(restored));

    core.set_user(None);
    assert_eq!(core.session(), Session::Anonymous);
}
