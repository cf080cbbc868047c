// cardfile — Contact Book Shell
//
// Cross-platform (macOS, Linux, Windows) command-line interface for the
// Cardfile contact book.

mod config;

use anyhow::{Context, Result};
use cardfile_core::{
    CardfileCore, Contact, ContactDraft, ContactPatch, Dashboard, Group, GroupFilter, Intent,
    Navigator,
};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "cardfile")]
#[command(about = "Cardfile — Contact Book Shell", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive contact book shell
    Shell {
        /// Email offered as the login default for this run
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Configure settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Run self-tests
    Test,
}

#[derive(Subcommand)]
enum ConfigAction {
    Set { key: String, value: String },
    Get { key: String },
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Shell { email } => cmd_shell(email).await,
        Commands::Config { action } => cmd_config(action).await,
        Commands::Test => cmd_test().await,
    }
}

/// Stands in for the browser router: prints the route change the app
/// would make once the session is gone.
struct PromptNavigator;

impl Navigator for PromptNavigator {
    fn to_login(&self) {
        println!("{}", "Signed out. Returning to the login prompt.".dimmed());
    }
}

async fn cmd_shell(email_flag: Option<String>) -> Result<()> {
    let config = config::Config::load()?;
    let default_email = email_flag.or_else(|| config.email.clone());
    tracing::debug!("starting shell with filter {:?}", config.filter);

    let core = CardfileCore::new();
    let mut dashboard = core.dashboard().with_navigator(Arc::new(PromptNavigator));
    dashboard.apply(Intent::SelectGroup(GroupFilter::from_selection(
        &config.filter,
    )))?;

    println!("{}", "Cardfile — Contact Book Shell".bold());
    println!();
    if let Some(email) = &default_email {
        println!("Login default: {}", email.bright_cyan());
        println!();
    }
    print_help();
    println!();

    use tokio::io::AsyncBufReadExt;

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    print!("> ");
    let _ = std::io::Write::flush(&mut std::io::stdout());

    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();

        if line == "quit" || line == "exit" {
            println!("Bye.");
            break;
        }

        if !line.is_empty() {
            if let Err(err) = handle_line(
                &core,
                &mut dashboard,
                &config,
                default_email.as_deref(),
                line,
            ) {
                println!("{} {}", "✗".red(), err);
            }
        }

        print!("> ");
        let _ = std::io::Write::flush(&mut std::io::stdout());
    }

    Ok(())
}

/// Dispatch one shell line to a dashboard intent or a read-out.
fn handle_line(
    core: &CardfileCore,
    dashboard: &mut Dashboard,
    config: &config::Config,
    default_email: Option<&str>,
    line: &str,
) -> Result<()> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    match parts[0] {
        "help" => print_help(),

        "login" => {
            let (email, password) = match (parts.len(), default_email) {
                (3, _) => (parts[1].to_string(), parts[2].to_string()),
                (2, Some(default)) => (default.to_string(), parts[1].to_string()),
                _ => anyhow::bail!("Usage: login [email] <password>"),
            };
            dashboard.apply(Intent::SignIn { email, password })?;
            if let Some(identity) = dashboard.current_identity() {
                println!("{} Signed in as {}", "✓".green(), identity.email.bright_cyan());
            }
        }

        "signup" => {
            if parts.len() != 3 {
                anyhow::bail!("Usage: signup <email> <password>");
            }
            dashboard.apply(Intent::SignUp {
                email: parts[1].to_string(),
                password: parts[2].to_string(),
            })?;
            println!("{} Sign-up accepted for {}", "✓".green(), parts[1].bright_cyan());
            println!("  {}", "No session was started. Use login to sign in.".dimmed());
        }

        "logout" => {
            dashboard.apply(Intent::SignOut)?;
        }

        "whoami" => match dashboard.current_identity() {
            Some(identity) => {
                println!("{}", "Signed-in Identity".bold());
                println!("  Email: {}", identity.email.bright_cyan());
                println!("  ID:    {}", identity.id.dimmed());
            }
            None => println!("{}", "(anonymous)".dimmed()),
        },

        "status" => {
            println!("{}", "Cardfile Status".bold());
            println!();
            match core.current_identity() {
                Some(identity) => println!("Signed in: {}", identity.email.bright_cyan()),
                None => println!("Signed in: {}", "no".dimmed()),
            }
            println!("Contacts:  {}", core.contact_count());
            println!("Groups:    {}", core.group_count());
            println!("Filter:    {}", filter_label(core, dashboard.selected_group()));
        }

        cmd @ ("add" | "edit" | "rm" | "show" | "list" | "group" | "groups" | "filter")
            if !core.is_authenticated() =>
        {
            anyhow::bail!("{} needs a session. Try: login <email> <password>", cmd);
        }

        "add" => {
            if parts.len() < 5 || parts.len() > 6 {
                anyhow::bail!("Usage: add <first> <last> <email> <phone> [group]");
            }
            let group_id = match parts.get(5) {
                Some(query) => Some(find_group(core, query)?.id),
                None => None,
            };
            let draft = ContactDraft {
                first_name: parts[1].to_string(),
                last_name: parts[2].to_string(),
                email: parts[3].to_string(),
                phone: parts[4].to_string(),
                group_id,
            };
            let name = format!("{} {}", parts[1], parts[2]);
            dashboard.apply(Intent::CreateContact(draft))?;
            println!("{} Added {}", "✓".green(), name.bright_cyan());
        }

        "edit" => {
            if parts.len() < 3 {
                anyhow::bail!("Usage: edit <contact> <field>=<value> ...");
            }
            let contact = find_contact(core, parts[1])?;

            let mut patch = ContactPatch::default();
            for pair in &parts[2..] {
                let (key, value) = pair
                    .split_once('=')
                    .with_context(|| format!("Expected <field>=<value>, got: {}", pair))?;
                match key {
                    "first" => patch.first_name = Some(value.to_string()),
                    "last" => patch.last_name = Some(value.to_string()),
                    "email" => patch.email = Some(value.to_string()),
                    "phone" => patch.phone = Some(value.to_string()),
                    "group" => {
                        // "group=none" detaches the contact from its group
                        patch.group_id = if value == "none" {
                            Some(None)
                        } else {
                            Some(Some(find_group(core, value)?.id))
                        };
                    }
                    _ => anyhow::bail!(
                        "Unknown field: {} (try first, last, email, phone, group)",
                        key
                    ),
                }
            }

            dashboard.apply(Intent::EditContact {
                id: contact.id.clone(),
                patch,
            })?;
            println!("{} Updated {}", "✓".green(), contact.full_name().bright_cyan());
        }

        "rm" => {
            if parts.len() != 2 {
                anyhow::bail!("Usage: rm <contact>");
            }
            let contact = find_contact(core, parts[1])?;
            let name = contact.full_name();
            dashboard.apply(Intent::RemoveContact { id: contact.id })?;
            println!("{} Removed {}", "✓".green(), name.bright_cyan());
        }

        "show" => {
            if parts.len() != 2 {
                anyhow::bail!("Usage: show <contact>");
            }
            let contact = find_contact(core, parts[1])?;

            println!("{}", "Contact Details".bold());
            println!("  Name:  {}", contact.full_name().bright_cyan());
            println!("  Email: {}", contact.email);
            println!("  Phone: {}", contact.phone);
            println!("  Group: {}", group_label(core, contact.group_id.as_deref()));
            println!("  ID:    {}", contact.id.dimmed());
        }

        "list" => {
            let visible = dashboard.visible_contacts();

            if visible.is_empty() {
                println!("{}", "No contacts under the current filter.".dimmed());
            } else {
                println!(
                    "{} ({} shown, {} total)",
                    "Contacts".bold(),
                    visible.len(),
                    core.contact_count()
                );
                println!();

                for contact in visible {
                    println!(
                        "  {} {}  {}",
                        "•".bright_green(),
                        contact.full_name().bright_cyan(),
                        contact.email.dimmed()
                    );

                    let mut details = Vec::new();
                    if config.display.show_ids {
                        details.push(format!("id: {}", contact.id));
                    }
                    if config.display.show_phone {
                        details.push(format!("phone: {}", contact.phone));
                    }
                    if let Some(group_id) = contact.group_id.as_deref() {
                        details.push(format!("group: {}", group_label(core, Some(group_id))));
                    }
                    if !details.is_empty() {
                        println!("    {}", details.join("  ").dimmed());
                    }
                }
            }
        }

        "group" => {
            if parts.len() < 2 {
                anyhow::bail!("Usage: group <name>");
            }
            let name = parts[1..].join(" ");
            dashboard.apply(Intent::CreateGroup { name: name.clone() })?;
            println!("{} Created group {}", "✓".green(), name.bright_cyan());
        }

        "groups" => {
            let groups = dashboard.groups();

            if groups.is_empty() {
                println!("{}", "No groups yet.".dimmed());
            } else {
                println!("{} ({} total)", "Groups".bold(), groups.len());
                println!();

                let contacts = core.contacts();
                for group in groups {
                    let members = contacts
                        .iter()
                        .filter(|c| c.group_id.as_deref() == Some(group.id.as_str()))
                        .count();
                    println!(
                        "  {} {}  {}",
                        "•".bright_green(),
                        group.name.bright_cyan(),
                        format!("{} members", members).dimmed()
                    );
                    if config.display.show_ids {
                        println!("    {}", format!("id: {}", group.id).dimmed());
                    }
                }
            }
        }

        "filter" => {
            if parts.len() == 1 {
                println!("Filter: {}", filter_label(core, dashboard.selected_group()));
            } else {
                let query = parts[1..].join(" ");
                let filter = if query == "all" {
                    GroupFilter::All
                } else {
                    GroupFilter::Group(find_group(core, &query)?.id)
                };
                dashboard.apply(Intent::SelectGroup(filter))?;
                println!(
                    "{} Filter: {}",
                    "✓".green(),
                    filter_label(core, dashboard.selected_group())
                );
            }
        }

        _ => {
            println!(
                "Try: login, signup, logout, whoami, add, edit, rm, show, list, group, groups, filter, status, help, quit"
            );
        }
    }

    Ok(())
}

fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  {} [email] <password>", "login".bright_green());
    println!("  {} <email> <password>", "signup".bright_green());
    println!("  {}", "logout".bright_green());
    println!("  {}", "whoami".bright_green());
    println!("  {} <first> <last> <email> <phone> [group]", "add".bright_green());
    println!("  {} <contact> <field>=<value> ...", "edit".bright_green());
    println!("  {} <contact>", "rm".bright_green());
    println!("  {} <contact>", "show".bright_green());
    println!("  {}", "list".bright_green());
    println!("  {} <name>", "group".bright_green());
    println!("  {}", "groups".bright_green());
    println!("  {} <all|group>", "filter".bright_green());
    println!("  {}", "status".bright_green());
    println!("  {}", "quit".bright_green());
}

async fn cmd_config(action: ConfigAction) -> Result<()> {
    let mut config = config::Config::load()?;

    match action {
        ConfigAction::Set { key, value } => {
            config.set(&key, &value)?;
            println!("{} Set {} = {}", "✓".green(), key.bright_cyan(), value);
        }

        ConfigAction::Get { key } => {
            if let Some(value) = config.get(&key) {
                println!("{} = {}", key.bright_cyan(), value);
            } else {
                anyhow::bail!("Unknown config key: {}", key);
            }
        }

        ConfigAction::List => {
            println!("{}", "Configuration".bold());
            println!();

            for (key, value) in config.list() {
                println!("  {:<12} {}", key.bright_cyan(), value);
            }
        }
    }

    Ok(())
}

async fn cmd_test() -> Result<()> {
    println!("{}", "Running self-tests...".bold());
    println!();

    let core = CardfileCore::new();

    core.sign_in("ana@example.com", "secret")?;
    assert!(core.is_authenticated());
    assert_eq!(
        core.current_identity().map(|i| i.email).as_deref(),
        Some("ana@example.com")
    );
    println!("{} Sign-in", "✓".green());

    assert!(core.sign_in("", "secret").is_err());
    assert!(core.sign_in("ana@example.com", "").is_err());
    assert_eq!(
        core.current_identity().map(|i| i.email).as_deref(),
        Some("ana@example.com")
    );
    println!("{} Credential validation", "✓".green());

    core.add_contact(ContactDraft {
        first_name: "Ana".to_string(),
        last_name: "Gonzalez".to_string(),
        email: "ana@contacts.example".to_string(),
        phone: "555-0101".to_string(),
        group_id: None,
    });
    core.add_contact(ContactDraft {
        first_name: "Ben".to_string(),
        last_name: "Okafor".to_string(),
        email: "ben@contacts.example".to_string(),
        phone: "555-0102".to_string(),
        group_id: None,
    });
    assert_eq!(core.contact_count(), 2);
    println!("{} Directory records", "✓".green());

    core.add_group("Friends");
    let friends = core.groups()[0].clone();
    let ana = core.contacts()[0].clone();
    core.update_contact(
        &ana.id,
        ContactPatch {
            group_id: Some(Some(friends.id.clone())),
            ..Default::default()
        },
    );
    println!("{} Group assignment", "✓".green());

    let mut dashboard = core.dashboard();
    dashboard.apply(Intent::SelectGroup(GroupFilter::Group(friends.id)))?;
    let visible = dashboard.visible_contacts();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, ana.id);
    println!("{} Group filtering", "✓".green());

    core.update_contact("not-a-real-id", ContactPatch::default());
    core.delete_contact("not-a-real-id");
    assert_eq!(core.contact_count(), 2);
    println!("{} Unknown ids ignored", "✓".green());

    core.sign_out();
    assert!(!core.is_authenticated());
    println!("{} Sign-out", "✓".green());

    println!();
    println!("{}", "All tests passed!".green().bold());

    Ok(())
}

/// Resolve a shell token to a contact: exact id, then unique id prefix,
/// then unique full-name match (case-insensitive).
fn find_contact(core: &CardfileCore, query: &str) -> Result<Contact> {
    if let Some(contact) = core.contact(query) {
        return Ok(contact);
    }

    let contacts = core.contacts();

    let by_prefix: Vec<&Contact> = contacts
        .iter()
        .filter(|c| c.id.starts_with(query))
        .collect();
    if by_prefix.len() == 1 {
        return Ok(by_prefix[0].clone());
    }

    let needle = query.to_lowercase();
    let by_name: Vec<&Contact> = contacts
        .iter()
        .filter(|c| c.full_name().to_lowercase() == needle)
        .collect();
    if by_name.len() == 1 {
        return Ok(by_name[0].clone());
    }

    if by_prefix.len() > 1 || by_name.len() > 1 {
        anyhow::bail!("Ambiguous contact: {}", query);
    }
    anyhow::bail!("Contact not found: {}", query)
}

/// Resolve a shell token to a group: exact id, then unique id prefix,
/// then unique name match (case-insensitive).
fn find_group(core: &CardfileCore, query: &str) -> Result<Group> {
    if let Some(group) = core.group(query) {
        return Ok(group);
    }

    let groups = core.groups();

    let by_prefix: Vec<&Group> = groups.iter().filter(|g| g.id.starts_with(query)).collect();
    if by_prefix.len() == 1 {
        return Ok(by_prefix[0].clone());
    }

    let needle = query.to_lowercase();
    let by_name: Vec<&Group> = groups
        .iter()
        .filter(|g| g.name.to_lowercase() == needle)
        .collect();
    if by_name.len() == 1 {
        return Ok(by_name[0].clone());
    }

    if by_prefix.len() > 1 || by_name.len() > 1 {
        anyhow::bail!("Ambiguous group: {}", query);
    }
    anyhow::bail!("Group not found: {}", query)
}

fn group_label(core: &CardfileCore, group_id: Option<&str>) -> String {
    match group_id {
        Some(id) => match core.group(id) {
            Some(group) => group.name,
            None => format!("{} (missing group)", id),
        },
        None => "(none)".to_string(),
    }
}

fn filter_label(core: &CardfileCore, filter: &GroupFilter) -> String {
    match filter {
        GroupFilter::All => "all".to_string(),
        GroupFilter::Group(id) => group_label(core, Some(id)),
    }
}
