// Directory store — the contact and group collections
//
// Collections are insertion-ordered; identifiers are assigned at creation
// and never change. Group references are not checked against the group
// collection, so a stale reference may dangle.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Opaque identifier, unique within the contact collection
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// Group this contact belongs to, if any
    pub group_id: Option<String>,
}

impl Contact {
    /// Build a contact from draft fields, assigning a fresh identifier.
    pub fn new(draft: ContactDraft) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            phone: draft.phone,
            group_id: draft.group_id,
        }
    }

    /// Display name for card headers
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// A group record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Opaque identifier, unique within the group collection
    pub id: String,
    /// Display name; duplicates are permitted
    pub name: String,
}

impl Group {
    /// Build a group with a fresh identifier.
    pub fn new(name: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
        }
    }
}

/// Contact fields supplied at creation; the store assigns the identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub group_id: Option<String>,
}

/// Subset of contact fields for an update.
///
/// `None` leaves a field untouched. The nested option on `group_id`
/// distinguishes set (`Some(Some(id))`), clear (`Some(None)`), and leave
/// (`None`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub group_id: Option<Option<String>>,
}

/// Owns and mutates the contact and group collections.
pub struct DirectoryStore {
    contacts: Vec<Contact>,
    groups: Vec<Group>,
}

impl DirectoryStore {
    pub fn new() -> Self {
        Self {
            contacts: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Append a new contact built from the draft.
    ///
    /// Never fails; required-field enforcement is a view concern. The new
    /// record is observable at the end of `contacts()`.
    pub fn add_contact(&mut self, draft: ContactDraft) {
        let contact = Contact::new(draft);
        debug!("contact {} added", contact.id);
        self.contacts.push(contact);
    }

    /// Merge the supplied fields into the contact with this identifier,
    /// keeping its position in the collection.
    ///
    /// An unknown identifier changes nothing and signals nothing — callers
    /// cannot tell "absent" from "updated".
    pub fn update_contact(&mut self, id: &str, patch: ContactPatch) {
        match self.contacts.iter_mut().find(|c| c.id == id) {
            Some(contact) => {
                if let Some(first_name) = patch.first_name {
                    contact.first_name = first_name;
                }
                if let Some(last_name) = patch.last_name {
                    contact.last_name = last_name;
                }
                if let Some(email) = patch.email {
                    contact.email = email;
                }
                if let Some(phone) = patch.phone {
                    contact.phone = phone;
                }
                if let Some(group_id) = patch.group_id {
                    contact.group_id = group_id;
                }
            }
            None => debug!("update for unknown contact {} ignored", id),
        }
    }

    /// Remove the contact with this identifier.
    ///
    /// An unknown identifier changes nothing and signals nothing.
    pub fn delete_contact(&mut self, id: &str) {
        let before = self.contacts.len();
        self.contacts.retain(|c| c.id != id);
        if self.contacts.len() == before {
            debug!("delete for unknown contact {} ignored", id);
        } else {
            debug!("contact {} deleted", id);
        }
    }

    /// Append a new group. Duplicate names are permitted; groups are never
    /// deleted.
    pub fn add_group(&mut self, name: &str) {
        let group = Group::new(name);
        debug!("group {} ({}) added", group.id, group.name);
        self.groups.push(group);
    }

    /// All contacts in insertion order
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// All groups in insertion order
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Look up a contact by identifier
    pub fn contact(&self, id: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    /// Look up a group by identifier
    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Number of contacts
    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    /// Number of groups
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

impl Default for DirectoryStore {
    fn default() -> Self {
        Self::new()
    }
}
