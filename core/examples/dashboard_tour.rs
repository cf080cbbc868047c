// Demo: Dashboard Tour
//
// Walks the contact book state layer end to end: sign-in, directory
// edits, group filtering on the dashboard, and the post-logout
// navigation hop.

use cardfile_core::{
    CardfileCore, ContactDraft, ContactPatch, GroupFilter, Intent, Navigator, ValidationError,
};
use std::sync::Arc;

/// Stands in for the application router.
struct RouteLog;

impl Navigator for RouteLog {
    fn to_login(&self) {
        println!("   → router: navigate to /login");
    }
}

fn main() -> Result<(), ValidationError> {
    // Setup logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("📇 Cardfile Dashboard Tour");
    println!("==========================\n");

    let core = CardfileCore::new();
    let mut dashboard = core.dashboard().with_navigator(Arc::new(RouteLog));

    println!("🔐 Step 1: Session");
    println!("──────────────────");

    match dashboard.apply(Intent::SignIn {
        email: String::new(),
        password: "secret".to_string(),
    }) {
        Ok(()) => println!("   unexpected: empty email accepted"),
        Err(err) => println!("   ✗ empty email rejected: {}", err),
    }

    dashboard.apply(Intent::SignIn {
        email: "ana@example.com".to_string(),
        password: "secret".to_string(),
    })?;
    let identity = dashboard.current_identity().expect("signed in");
    println!("   ✓ signed in as {} (id {})\n", identity.email, identity.id);

    println!("📒 Step 2: Directory");
    println!("────────────────────");

    for (first, last, email, phone) in [
        ("Ana", "Gonzalez", "ana@contacts.example", "555-0101"),
        ("Ben", "Okafor", "ben@contacts.example", "555-0102"),
        ("Carla", "Mendes", "carla@contacts.example", "555-0103"),
    ] {
        dashboard.apply(Intent::CreateContact(ContactDraft {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            group_id: None,
        }))?;
    }
    dashboard.apply(Intent::CreateGroup {
        name: "Friends".to_string(),
    })?;
    dashboard.apply(Intent::CreateGroup {
        name: "Work".to_string(),
    })?;

    let contacts = core.contacts();
    let friends = core.groups()[0].clone();
    println!(
        "   ✓ {} contacts, {} groups",
        core.contact_count(),
        core.group_count()
    );

    dashboard.apply(Intent::EditContact {
        id: contacts[0].id.clone(),
        patch: ContactPatch {
            group_id: Some(Some(friends.id.clone())),
            ..Default::default()
        },
    })?;
    println!("   ✓ {} filed under {}\n", contacts[0].full_name(), friends.name);

    println!("🔍 Step 3: Group Filtering");
    println!("──────────────────────────");

    dashboard.apply(Intent::SelectGroup(GroupFilter::Group(friends.id.clone())))?;
    for contact in dashboard.visible_contacts() {
        println!("   [{}] {}", friends.name, contact.full_name());
    }

    dashboard.apply(Intent::SelectGroup(GroupFilter::from_selection("all")))?;
    println!("   [all] {} contacts visible\n", dashboard.visible_contacts().len());

    println!("✏️  Step 4: Edits Are Total");
    println!("───────────────────────────");

    dashboard.apply(Intent::EditContact {
        id: contacts[1].id.clone(),
        patch: ContactPatch {
            phone: Some("555-0199".to_string()),
            ..Default::default()
        },
    })?;
    println!("   ✓ phone updated for {}", contacts[1].full_name());

    dashboard.apply(Intent::RemoveContact {
        id: contacts[2].id.clone(),
    })?;
    println!("   ✓ {} removed", contacts[2].full_name());

    dashboard.apply(Intent::RemoveContact {
        id: "no-such-record".to_string(),
    })?;
    println!(
        "   ✓ unknown id ignored, {} contacts remain\n",
        core.contact_count()
    );

    println!("🚪 Step 5: Sign-Out");
    println!("───────────────────");

    dashboard.apply(Intent::SignOut)?;
    println!("   ✓ session is anonymous: {}", !core.is_authenticated());

    println!("\n✨ Tour Complete!");
    println!("═════════════════");
    println!("Try running the integration tests for more:");
    println!("  cargo test --test integration_dashboard_flow -- --nocapture\n");

    Ok(())
}
