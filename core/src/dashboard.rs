// Dashboard interface — user intents, group filtering, and the exit hook
//
// The visual layer lives in the embedding application; this module is the
// behavioral contract it drives. Every intent maps to exactly one store
// operation.

use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

use crate::store::{Contact, ContactDraft, ContactPatch, Group, Identity, ValidationError};
use crate::CardfileCore;

/// Group selection applied to the contact list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GroupFilter {
    /// Show every contact
    #[default]
    All,
    /// Show only contacts referencing this group identifier
    Group(String),
}

impl GroupFilter {
    /// Map a selection token to a filter; `"all"` is the show-everything
    /// sentinel, anything else is taken as a group identifier.
    pub fn from_selection(selection: &str) -> Self {
        if selection == "all" {
            GroupFilter::All
        } else {
            GroupFilter::Group(selection.to_string())
        }
    }

    /// Whether this contact passes the filter
    pub fn matches(&self, contact: &Contact) -> bool {
        match self {
            GroupFilter::All => true,
            GroupFilter::Group(id) => contact.group_id.as_deref() == Some(id.as_str()),
        }
    }
}

/// Routing collaborator supplied by the embedding application.
///
/// The dashboard's only external effect: after sign-out completes it asks to
/// be taken back to the login surface.
#[cfg_attr(test, automock)]
pub trait Navigator: Send + Sync {
    /// Called once sign-out has been applied to the session store
    fn to_login(&self);
}

/// A user intent raised on the dashboard.
#[derive(Debug, Clone)]
pub enum Intent {
    SignIn { email: String, password: String },
    SignUp { email: String, password: String },
    SignOut,
    CreateContact(ContactDraft),
    EditContact { id: String, patch: ContactPatch },
    RemoveContact { id: String },
    CreateGroup { name: String },
    SelectGroup(GroupFilter),
}

/// The dashboard's view-model: a core handle, the current group selection,
/// and an optional navigator for the post-logout hop.
pub struct Dashboard {
    core: CardfileCore,
    selected: GroupFilter,
    navigator: Option<Arc<dyn Navigator>>,
}

impl Dashboard {
    pub fn new(core: CardfileCore) -> Self {
        Self {
            core,
            selected: GroupFilter::All,
            navigator: None,
        }
    }

    /// Attach the routing collaborator.
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Dispatch one intent to its store operation.
    ///
    /// Only `SignIn` and `SignUp` can fail; every directory intent is total.
    pub fn apply(&mut self, intent: Intent) -> Result<(), ValidationError> {
        match intent {
            Intent::SignIn { email, password } => self.core.sign_in(&email, &password)?,
            Intent::SignUp { email, password } => self.core.sign_up(&email, &password)?,
            Intent::SignOut => {
                self.core.sign_out();
                if let Some(navigator) = &self.navigator {
                    navigator.to_login();
                }
            }
            Intent::CreateContact(draft) => self.core.add_contact(draft),
            Intent::EditContact { id, patch } => self.core.update_contact(&id, patch),
            Intent::RemoveContact { id } => self.core.delete_contact(&id),
            Intent::CreateGroup { name } => self.core.add_group(&name),
            Intent::SelectGroup(filter) => self.selected = filter,
        }
        Ok(())
    }

    /// Contacts passing the current group selection, in insertion order
    pub fn visible_contacts(&self) -> Vec<Contact> {
        self.core
            .contacts()
            .into_iter()
            .filter(|contact| self.selected.matches(contact))
            .collect()
    }

    /// The current group selection
    pub fn selected_group(&self) -> &GroupFilter {
        &self.selected
    }

    /// All groups, for the filter bar and the contact-form select
    pub fn groups(&self) -> Vec<Group> {
        self.core.groups()
    }

    /// The signed-in identity, if any
    pub fn current_identity(&self) -> Option<Identity> {
        self.core.current_identity()
    }

    /// Contact lookup for edit-form pre-fill
    pub fn contact(&self, id: &str) -> Option<Contact> {
        self.core.contact(id)
    }

    /// Group lookup for card labels
    pub fn group(&self, id: &str) -> Option<Group> {
        self.core.group(id)
    }
}
