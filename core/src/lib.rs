// Cardfile Core — Contact Book State Layer
//
// Two stores, one page: the session identity and the contact directory.
// Everything else is presentation.

pub mod dashboard;
pub mod store;

use parking_lot::RwLock;
use std::sync::Arc;

pub use dashboard::{Dashboard, GroupFilter, Intent, Navigator};
pub use store::{
    Contact, ContactDraft, ContactPatch, DirectoryStore, Group, Identity, Session, SessionStore,
    ValidationError,
};

// ============================================================================
// SUBSCRIBER TRAIT
// ============================================================================

/// Callback interface for state-change notifications (the re-render hook).
///
/// Callbacks fire after the mutation has been applied and the store lock has
/// been released, so a subscriber may read back through the core.
pub trait Subscriber: Send + Sync {
    /// The session changed (sign-in, sign-out, or direct overwrite)
    fn on_session_changed(&self, session: Session);
    /// The contact collection changed
    fn on_contacts_changed(&self);
    /// The group collection changed
    fn on_groups_changed(&self);
}

// ============================================================================
// CARDFILE CORE IMPLEMENTATION
// ============================================================================

/// Composition root: owns both stores and exposes the full call surface.
///
/// Handles are cheap to clone and share the same underlying state.
#[derive(Clone)]
pub struct CardfileCore {
    /// Current authenticated identity
    session: Arc<RwLock<SessionStore>>,
    /// Contact and group collections
    directory: Arc<RwLock<DirectoryStore>>,
    /// Render hook for consumers
    subscriber: Arc<RwLock<Option<Arc<dyn Subscriber>>>>,
}

impl CardfileCore {
    /// Create a core with empty stores.
    pub fn new() -> Self {
        // Initialize tracing (idempotent)
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .try_init();

        Self {
            session: Arc::new(RwLock::new(SessionStore::new())),
            directory: Arc::new(RwLock::new(DirectoryStore::new())),
            subscriber: Arc::new(RwLock::new(None)),
        }
    }

    // ------------------------------------------------------------------------
    // SESSION
    // ------------------------------------------------------------------------

    /// Sign in. Fails when either credential is empty; on success the
    /// identity is derived from the email and the password is discarded.
    pub fn sign_in(&self, email: &str, password: &str) -> Result<(), ValidationError> {
        self.session.write().sign_in(email, password)?;
        self.notify_session_changed();
        Ok(())
    }

    /// Validate registration input; never mutates state.
    pub fn sign_up(&self, email: &str, password: &str) -> Result<(), ValidationError> {
        self.session.read().sign_up(email, password)
    }

    /// Clear the current identity. Always succeeds.
    pub fn sign_out(&self) {
        self.session.write().sign_out();
        self.notify_session_changed();
    }

    /// Overwrite the session directly (external injection, no validation).
    pub fn set_user(&self, identity: Option<Identity>) {
        self.session.write().set_user(identity);
        self.notify_session_changed();
    }

    /// Current session state
    pub fn session(&self) -> Session {
        self.session.read().session().clone()
    }

    /// The signed-in identity, if any
    pub fn current_identity(&self) -> Option<Identity> {
        self.session.read().current_identity().cloned()
    }

    /// True when an identity is present
    pub fn is_authenticated(&self) -> bool {
        self.session.read().session().is_authenticated()
    }

    // ------------------------------------------------------------------------
    // DIRECTORY
    // ------------------------------------------------------------------------

    /// Append a new contact built from the draft. Never fails.
    pub fn add_contact(&self, draft: ContactDraft) {
        self.directory.write().add_contact(draft);
        self.notify_contacts_changed();
    }

    /// Merge the supplied fields into the matching contact; silent no-op on
    /// an unknown identifier.
    pub fn update_contact(&self, id: &str, patch: ContactPatch) {
        self.directory.write().update_contact(id, patch);
        self.notify_contacts_changed();
    }

    /// Remove the matching contact; silent no-op on an unknown identifier.
    pub fn delete_contact(&self, id: &str) {
        self.directory.write().delete_contact(id);
        self.notify_contacts_changed();
    }

    /// Append a new group. Never fails; duplicate names permitted.
    pub fn add_group(&self, name: &str) {
        self.directory.write().add_group(name);
        self.notify_groups_changed();
    }

    /// All contacts in insertion order
    pub fn contacts(&self) -> Vec<Contact> {
        self.directory.read().contacts().to_vec()
    }

    /// All groups in insertion order
    pub fn groups(&self) -> Vec<Group> {
        self.directory.read().groups().to_vec()
    }

    /// Look up a contact by identifier
    pub fn contact(&self, id: &str) -> Option<Contact> {
        self.directory.read().contact(id).cloned()
    }

    /// Look up a group by identifier
    pub fn group(&self, id: &str) -> Option<Group> {
        self.directory.read().group(id).cloned()
    }

    /// Number of contacts
    pub fn contact_count(&self) -> usize {
        self.directory.read().contact_count()
    }

    /// Number of groups
    pub fn group_count(&self) -> usize {
        self.directory.read().group_count()
    }

    // ------------------------------------------------------------------------
    // VIEW & SUBSCRIBER
    // ------------------------------------------------------------------------

    /// Build a dashboard view-model over a cloned handle.
    pub fn dashboard(&self) -> Dashboard {
        Dashboard::new(self.clone())
    }

    pub fn set_subscriber(&self, subscriber: Option<Box<dyn Subscriber>>) {
        *self.subscriber.write() = subscriber.map(|s| Arc::from(s) as Arc<dyn Subscriber>);
    }

    fn notify_session_changed(&self) {
        if let Some(subscriber) = self.subscriber.read().as_ref() {
            let session = self.session.read().session().clone();
            subscriber.on_session_changed(session);
        }
    }

    fn notify_contacts_changed(&self) {
        if let Some(subscriber) = self.subscriber.read().as_ref() {
            subscriber.on_contacts_changed();
        }
    }

    fn notify_groups_changed(&self) {
        if let Some(subscriber) = self.subscriber.read().as_ref() {
            subscriber.on_groups_changed();
        }
    }
}

impl Default for CardfileCore {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
