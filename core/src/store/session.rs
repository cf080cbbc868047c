// Session store — the current authenticated identity
//
// Sign-in is a stub boundary: credentials are checked for presence only,
// never verified against a backend.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("email and password are required")]
    MissingCredentials,
}

/// The authenticated-user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque identifier assigned at sign-in
    pub id: String,
    /// Email the user signed in with
    pub email: String,
}

impl Identity {
    /// Build an identity for this email with a fresh identifier.
    pub fn new(email: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.to_string(),
        }
    }
}

/// Session state: either nobody is signed in, or exactly one identity is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(Identity),
}

impl Session {
    /// True when an identity is present
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    /// The signed-in identity, if any
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated(identity) => Some(identity),
        }
    }
}

/// Tracks the single current identity for the process lifetime.
pub struct SessionStore {
    session: Session,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            session: Session::Anonymous,
        }
    }

    /// Sign in with an email and password.
    ///
    /// Both fields must be non-empty; the password is then discarded (there
    /// is no backend to verify it against). A successful sign-in overwrites
    /// any identity that was already present.
    pub fn sign_in(&mut self, email: &str, password: &str) -> Result<(), ValidationError> {
        if email.is_empty() || password.is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        self.session = Session::Authenticated(Identity::new(email));
        debug!("signed in as {}", email);
        Ok(())
    }

    /// Validate registration input.
    ///
    /// Registration itself is a placeholder: valid input changes nothing.
    /// Takes `&self` so the no-mutation contract is part of the signature.
    pub fn sign_up(&self, email: &str, password: &str) -> Result<(), ValidationError> {
        if email.is_empty() || password.is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        debug!("sign-up accepted for {}", email);
        Ok(())
    }

    /// Clear the current identity. Always succeeds, signed in or not.
    pub fn sign_out(&mut self) {
        if self.session.is_authenticated() {
            debug!("signed out");
        }
        self.session = Session::Anonymous;
    }

    /// Overwrite the session directly, bypassing validation.
    ///
    /// Used for external injection such as session restoration; `None`
    /// clears the identity.
    pub fn set_user(&mut self, identity: Option<Identity>) {
        self.session = match identity {
            Some(identity) => Session::Authenticated(identity),
            None => Session::Anonymous,
        };
    }

    /// Current session state
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The signed-in identity, if any
    pub fn current_identity(&self) -> Option<&Identity> {
        self.session.identity()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_in_store(email: &str) -> SessionStore {
        let mut store = SessionStore::new();
        store.sign_in(email, "hunter2").unwrap();
        store
    }

    #[test]
    fn test_initial_state_is_anonymous() {
        let store = SessionStore::new();
        assert_eq!(*store.session(), Session::Anonymous);
        assert!(store.current_identity().is_none());
    }

    #[test]
    fn test_sign_in_sets_identity_from_email() {
        let store = signed_in_store("ana@example.com");

        let identity = store.current_identity().unwrap();
        assert_eq!(identity.email, "ana@example.com");
        assert!(!identity.id.is_empty());
        assert!(store.session().is_authenticated());
    }

    #[test]
    fn test_sign_in_overwrites_prior_identity() {
        let mut store = signed_in_store("first@example.com");
        store.sign_in("second@example.com", "pw").unwrap();

        assert_eq!(store.current_identity().unwrap().email, "second@example.com");
    }

    #[test]
    fn test_sign_in_rejects_missing_credentials() {
        let mut store = SessionStore::new();

        assert_eq!(
            store.sign_in("", "pw"),
            Err(ValidationError::MissingCredentials)
        );
        assert_eq!(
            store.sign_in("ana@example.com", ""),
            Err(ValidationError::MissingCredentials)
        );
        assert_eq!(store.sign_in("", ""), Err(ValidationError::MissingCredentials));
        assert_eq!(*store.session(), Session::Anonymous);
    }

    #[test]
    fn test_failed_sign_in_leaves_prior_identity_in_place() {
        let mut store = signed_in_store("ana@example.com");
        let before = store.session().clone();

        assert!(store.sign_in("", "pw").is_err());
        assert_eq!(*store.session(), before);
    }

    #[test]
    fn test_sign_up_validates_without_mutating() {
        let store = SessionStore::new();

        store.sign_up("new@example.com", "pw").unwrap();
        assert_eq!(*store.session(), Session::Anonymous);

        assert_eq!(
            store.sign_up("new@example.com", ""),
            Err(ValidationError::MissingCredentials)
        );
    }

    #[test]
    fn test_sign_out_always_yields_anonymous() {
        let mut store = signed_in_store("ana@example.com");
        store.sign_out();
        assert_eq!(*store.session(), Session::Anonymous);

        // Signing out while anonymous is fine too
        store.sign_out();
        assert_eq!(*store.session(), Session::Anonymous);
    }

    #[test]
    fn test_set_user_overwrites_without_validation() {
        let mut store = SessionStore::new();

        let restored = Identity {
            id: "restored-1".to_string(),
            email: "restored@example.com".to_string(),
        };
        store.set_user(Some(restored.clone()));
        assert_eq!(store.current_identity(), Some(&restored));

        store.set_user(None);
        assert_eq!(*store.session(), Session::Anonymous);
    }
}
