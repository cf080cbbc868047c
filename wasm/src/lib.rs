// cardfile-wasm — WebAssembly bindings for browser environments

use cardfile_core::{CardfileCore, Contact, ContactDraft, ContactPatch, Group, GroupFilter, Identity};
use parking_lot::Mutex;
use std::sync::Arc;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
}

#[wasm_bindgen]
pub struct Cardfile {
    inner: Arc<CardfileCore>,
    /// Group selection driving `visibleContacts`: "all" or one group id.
    selected: Mutex<GroupFilter>,
}

#[wasm_bindgen]
impl Cardfile {
    #[wasm_bindgen(constructor)]
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        init_logging();
        Self {
            inner: Arc::new(CardfileCore::new()),
            selected: Mutex::new(GroupFilter::All),
        }
    }

    #[wasm_bindgen(js_name = signIn)]
    pub fn sign_in(&self, email: String, password: String) -> Result<(), JsValue> {
        self.inner
            .sign_in(&email, &password)
            .map_err(|e| JsValue::from_str(&format!("{}", e)))
    }

    #[wasm_bindgen(js_name = signUp)]
    pub fn sign_up(&self, email: String, password: String) -> Result<(), JsValue> {
        self.inner
            .sign_up(&email, &password)
            .map_err(|e| JsValue::from_str(&format!("{}", e)))
    }

    #[wasm_bindgen(js_name = signOut)]
    pub fn sign_out(&self) {
        self.inner.sign_out();
    }

    /// Overwrite the session directly; pass `null` to clear it.
    #[wasm_bindgen(js_name = setUser)]
    pub fn set_user(&self, identity: JsValue) -> Result<(), JsValue> {
        let identity: Option<WasmIdentity> = serde_wasm_bindgen::from_value(identity)
            .map_err(|e| JsValue::from_str(&format!("{}", e)))?;
        self.inner.set_user(identity.map(Identity::from));
        Ok(())
    }

    #[wasm_bindgen(js_name = currentIdentity)]
    pub fn current_identity(&self) -> JsValue {
        let identity = self.inner.current_identity().map(WasmIdentity::from);
        serde_wasm_bindgen::to_value(&identity).unwrap()
    }

    #[wasm_bindgen(js_name = isAuthenticated)]
    pub fn is_authenticated(&self) -> bool {
        self.inner.is_authenticated()
    }

    #[wasm_bindgen(js_name = addContact)]
    pub fn add_contact(&self, fields: JsValue) -> Result<(), JsValue> {
        let fields: WasmDraft = serde_wasm_bindgen::from_value(fields)
            .map_err(|e| JsValue::from_str(&format!("{}", e)))?;
        self.inner.add_contact(fields.into_draft());
        Ok(())
    }

    /// Merge the supplied fields into one contact; unknown ids are ignored.
    #[wasm_bindgen(js_name = updateContact)]
    pub fn update_contact(&self, id: String, fields: JsValue) -> Result<(), JsValue> {
        let fields: WasmPatch = serde_wasm_bindgen::from_value(fields).map_err(|e| {
            tracing::warn!("malformed edit payload for contact {}: {}", id, e);
            JsValue::from_str(&format!("{}", e))
        })?;
        self.inner.update_contact(&id, fields.into_patch());
        Ok(())
    }

    #[wasm_bindgen(js_name = deleteContact)]
    pub fn delete_contact(&self, id: String) {
        self.inner.delete_contact(&id);
    }

    #[wasm_bindgen(js_name = addGroup)]
    pub fn add_group(&self, name: String) {
        self.inner.add_group(&name);
    }

    pub fn contacts(&self) -> JsValue {
        let contacts: Vec<WasmContact> = self
            .inner
            .contacts()
            .into_iter()
            .map(WasmContact::from)
            .collect();
        serde_wasm_bindgen::to_value(&contacts).unwrap()
    }

    pub fn groups(&self) -> JsValue {
        let groups: Vec<WasmGroup> = self
            .inner
            .groups()
            .into_iter()
            .map(WasmGroup::from)
            .collect();
        serde_wasm_bindgen::to_value(&groups).unwrap()
    }

    #[wasm_bindgen(js_name = contactCount)]
    pub fn contact_count(&self) -> u32 {
        self.inner.contact_count() as u32
    }

    #[wasm_bindgen(js_name = groupCount)]
    pub fn group_count(&self) -> u32 {
        self.inner.group_count() as u32
    }

    /// Choose which group `visibleContacts` shows ("all" for everyone).
    #[wasm_bindgen(js_name = selectGroup)]
    pub fn select_group(&self, selection: String) {
        *self.selected.lock() = GroupFilter::from_selection(&selection);
    }

    #[wasm_bindgen(js_name = selectedGroup)]
    pub fn selected_group(&self) -> String {
        match &*self.selected.lock() {
            GroupFilter::All => "all".to_string(),
            GroupFilter::Group(id) => id.clone(),
        }
    }

    #[wasm_bindgen(js_name = visibleContacts)]
    pub fn visible_contacts(&self) -> JsValue {
        let selected = self.selected.lock().clone();
        let contacts: Vec<WasmContact> = self
            .inner
            .contacts()
            .into_iter()
            .filter(|contact| selected.matches(contact))
            .map(WasmContact::from)
            .collect();
        serde_wasm_bindgen::to_value(&contacts).unwrap()
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct WasmIdentity {
    id: String,
    email: String,
}

impl From<Identity> for WasmIdentity {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            email: identity.email,
        }
    }
}

impl From<WasmIdentity> for Identity {
    fn from(identity: WasmIdentity) -> Self {
        Self {
            id: identity.id,
            email: identity.email,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct WasmContact {
    id: String,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    group_id: Option<String>,
}

impl From<Contact> for WasmContact {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            first_name: contact.first_name,
            last_name: contact.last_name,
            email: contact.email,
            phone: contact.phone,
            group_id: contact.group_id,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct WasmGroup {
    id: String,
    name: String,
}

impl From<Group> for WasmGroup {
    fn from(group: Group) -> Self {
        Self {
            id: group.id,
            name: group.name,
        }
    }
}

/// New-contact form fields as the browser sends them.
#[derive(serde::Serialize, serde::Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct WasmDraft {
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    group_id: Option<String>,
}

impl WasmDraft {
    /// The form's group select submits "" for "no group".
    fn into_draft(self) -> ContactDraft {
        ContactDraft {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            group_id: self.group_id.filter(|id| !id.is_empty()),
        }
    }
}

/// Edit-form fields as the browser sends them.
#[derive(serde::Serialize, serde::Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct WasmPatch {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    group_id: Option<String>,
}

impl WasmPatch {
    /// An absent field leaves the record alone; an empty groupId detaches
    /// the contact from its group, matching the form's empty select option.
    fn into_patch(self) -> ContactPatch {
        ContactPatch {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            group_id: self
                .group_id
                .map(|id| if id.is_empty() { None } else { Some(id) }),
        }
    }
}
