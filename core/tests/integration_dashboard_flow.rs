//! Integration tests: directory CRUD driven through dashboard intents.
//!
//! The dashboard is the behavioral contract of the page: every user intent
//! maps to exactly one store operation, the only view-side logic is the
//! group filter, and the one external effect is the post-logout navigation
//! request.
//!
//! Run with:
//!   cargo test --test integration_dashboard_flow

use std::collections::HashSet;
use std::sync::Arc;

use cardfile_core::{
    CardfileCore, ContactDraft, ContactPatch, GroupFilter, Intent, Navigator,
};

mockall::mock! {
    Nav {}

    impl Navigator for Nav {
        fn to_login(&self);
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn make_draft(first: &str, last: &str, email: &str, phone: &str) -> ContactDraft {
    ContactDraft {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        group_id: None,
    }
}

/// Core + dashboard with a signed-in user, ready to take directory intents.
fn dashboard_fixture() -> (CardfileCore, cardfile_core::Dashboard) {
    let core = CardfileCore::new();
    core.sign_in("owner@example.com", "pw")
        .expect("fixture sign-in must succeed");
    let dashboard = core.dashboard();
    (core, dashboard)
}

// ============================================================================
// Test 1 — Creation intents append with distinct identifiers
// ============================================================================

/// N create intents yield N records in dispatch order, all with
/// pairwise-distinct identifiers.
#[test]
fn test_create_intents_append_n_records_with_distinct_ids() {
    let (core, mut dashboard) = dashboard_fixture();

    for i in 0..25 {
        dashboard
            .apply(Intent::CreateContact(make_draft(
                &format!("First{}", i),
                "Last",
                &format!("c{}@example.com", i),
                "555-0100",
            )))
            .expect("create intent is total");
    }

    let contacts = core.contacts();
    assert_eq!(contacts.len(), 25, "one record per create intent");

    let ids: HashSet<&str> = contacts.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids.len(), 25, "identifiers must be pairwise distinct");

    assert_eq!(contacts[0].first_name, "First0");
    assert_eq!(contacts[24].first_name, "First24");
}

// ============================================================================
// Test 2 — Edit intent merges only the named fields
// ============================================================================

/// An edit intent replaces the supplied fields and nothing else; the record
/// keeps its identifier and its position.
#[test]
fn test_edit_intent_merges_only_named_fields_in_place() {
    let (core, mut dashboard) = dashboard_fixture();

    dashboard
        .apply(Intent::CreateContact(make_draft(
            "Ana",
            "Lee",
            "a@x.com",
            "555",
        )))
        .unwrap();
    dashboard
        .apply(Intent::CreateContact(make_draft(
            "Ben",
            "Ray",
            "b@x.com",
            "556",
        )))
        .unwrap();

    let ana_before = core.contacts()[0].clone();

    dashboard
        .apply(Intent::EditContact {
            id: ana_before.id.clone(),
            patch: ContactPatch {
                email: Some("ana.lee@x.com".to_string()),
                ..Default::default()
            },
        })
        .unwrap();

    let ana_after = core.contacts()[0].clone();
    assert_eq!(ana_after.email, "ana.lee@x.com");
    assert_eq!(ana_after.id, ana_before.id, "identifier is immutable");
    assert_eq!(ana_after.first_name, ana_before.first_name);
    assert_eq!(ana_after.last_name, ana_before.last_name);
    assert_eq!(ana_after.phone, ana_before.phone);
    assert_eq!(
        core.contacts()[1].first_name,
        "Ben",
        "editing one record must not disturb its neighbors"
    );
}

// ============================================================================
// Test 3 — Remove intent takes exactly one record
// ============================================================================

#[test]
fn test_remove_intent_removes_exactly_one() {
    let (core, mut dashboard) = dashboard_fixture();

    dashboard
        .apply(Intent::CreateContact(make_draft(
            "Ana",
            "Lee",
            "a@x.com",
            "555",
        )))
        .unwrap();
    dashboard
        .apply(Intent::CreateContact(make_draft(
            "Ben",
            "Ray",
            "b@x.com",
            "556",
        )))
        .unwrap();

    let ana_id = core.contacts()[0].id.clone();
    dashboard
        .apply(Intent::RemoveContact { id: ana_id.clone() })
        .unwrap();

    assert_eq!(core.contact_count(), 1, "length must drop by exactly one");
    assert!(core.contact(&ana_id).is_none());
    assert_eq!(core.contacts()[0].first_name, "Ben");
}

// ============================================================================
// Test 4 — Unknown identifiers are silent no-ops
// ============================================================================

/// Edit and remove with an identifier nothing carries: the collection must
/// come out deep-equal to how it went in, with no error surfaced.
#[test]
fn test_unknown_id_intents_leave_the_collection_identical() {
    let (core, mut dashboard) = dashboard_fixture();

    dashboard
        .apply(Intent::CreateContact(make_draft(
            "Ana",
            "Lee",
            "a@x.com",
            "555",
        )))
        .unwrap();
    let before = core.contacts();

    dashboard
        .apply(Intent::EditContact {
            id: "nobody-here".to_string(),
            patch: ContactPatch {
                first_name: Some("Ghost".to_string()),
                ..Default::default()
            },
        })
        .expect("unknown-id edit must not surface an error");

    dashboard
        .apply(Intent::RemoveContact {
            id: "nobody-here".to_string(),
        })
        .expect("unknown-id remove must not surface an error");

    assert_eq!(core.contacts(), before);
}

// ============================================================================
// Test 5 — The Ana / Friends filtering scenario
// ============================================================================

/// Add Ana, create the "Friends" group, file Ana under it, then flip the
/// filter: the Friends view shows exactly Ana, the all view shows everyone.
#[test]
fn test_group_filter_scenario_ana_and_friends() {
    let (core, mut dashboard) = dashboard_fixture();

    dashboard
        .apply(Intent::CreateContact(make_draft(
            "Ana",
            "Lee",
            "a@x.com",
            "555",
        )))
        .unwrap();
    dashboard
        .apply(Intent::CreateContact(make_draft(
            "Ben",
            "Ray",
            "b@x.com",
            "556",
        )))
        .unwrap();
    dashboard
        .apply(Intent::CreateGroup {
            name: "Friends".to_string(),
        })
        .unwrap();

    let ana_id = core.contacts()[0].id.clone();
    let friends_id = core.groups()[0].id.clone();

    dashboard
        .apply(Intent::EditContact {
            id: ana_id.clone(),
            patch: ContactPatch {
                group_id: Some(Some(friends_id.clone())),
                ..Default::default()
            },
        })
        .unwrap();

    // Friends view: exactly the Ana record.
    dashboard
        .apply(Intent::SelectGroup(GroupFilter::Group(friends_id)))
        .unwrap();
    let visible = dashboard.visible_contacts();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, ana_id);
    assert_eq!(visible[0].first_name, "Ana");

    // All view: every record, Ana included.
    dashboard
        .apply(Intent::SelectGroup(GroupFilter::from_selection("all")))
        .unwrap();
    let visible = dashboard.visible_contacts();
    assert_eq!(visible.len(), 2);
    assert!(visible.iter().any(|c| c.id == ana_id));
}

// ============================================================================
// Test 6 — Sign-out requests the login navigation
// ============================================================================

/// After the sign-out intent clears the session, the dashboard must call the
/// routing collaborator exactly once.
#[test]
fn test_sign_out_intent_fires_the_navigation_request() {
    let mut nav = MockNav::new();
    nav.expect_to_login().times(1).returning(|| ());

    let core = CardfileCore::new();
    core.sign_in("ana@example.com", "pw").unwrap();

    let mut dashboard = core.dashboard().with_navigator(Arc::new(nav));
    dashboard.apply(Intent::SignOut).unwrap();

    assert!(
        core.current_identity().is_none(),
        "session must already be cleared when the navigation fires"
    );
}

// ============================================================================
// Test 7 — Sign-in intents surface validation errors to the view
// ============================================================================

/// The dashboard passes the validation error through untouched so the view
/// can show it; nothing else on the page is disturbed.
#[test]
fn test_sign_in_intent_propagates_validation_error() {
    let core = CardfileCore::new();
    let mut dashboard = core.dashboard();

    dashboard
        .apply(Intent::CreateContact(make_draft(
            "Ana",
            "Lee",
            "a@x.com",
            "555",
        )))
        .unwrap();

    let result = dashboard.apply(Intent::SignIn {
        email: String::new(),
        password: "pw".to_string(),
    });
    assert!(result.is_err(), "empty email must be rejected");
    assert_eq!(
        core.contact_count(),
        1,
        "a failed session intent must not touch the directory"
    );
}
