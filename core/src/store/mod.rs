// Store module — session identity and directory collections

pub mod directory;
pub mod session;

pub use directory::{Contact, ContactDraft, ContactPatch, DirectoryStore, Group};
pub use session::{Identity, Session, SessionStore, ValidationError};
