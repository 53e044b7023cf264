use std::time::Instant;

use anyhow::Result;
use chrono::Utc;
use dialoguer::Confirm;
use evely_core::config::EvelyConfig;
use evely_core::credentials::AdminCredentials;
use evely_core::pages::admin::QUICK_ACTIONS;
use evely_core::pages::{AdminDashboard, Tab};
use evely_core::session::{AdminSession, Gate, sign_in};
use evely_core::store::Store;
use owo_colors::OwoColorize;

use crate::render::{Render, event_table_header};

pub fn login<S: Store + ?Sized>(store: &S, email: &str) -> Result<()> {
    let password = rpassword::prompt_password("Password: ")?;

    AdminCredentials::check(store, email, &password)?;
    sign_in(store, &AdminSession::new(email, Utc::now()))?;

    println!("Signed in to EventHub as {}", email.bold());
    Ok(())
}

/// Mount the dashboard or fail with directions to the admin login.
pub fn require_dashboard<S: Store>(store: S, config: &EvelyConfig) -> Result<AdminDashboard<S>> {
    match AdminDashboard::mount(store, config.notice_delay())? {
        Gate::Authenticated(dashboard) => Ok(dashboard),
        Gate::Unauthenticated { redirect } => anyhow::bail!(
            "Not signed in as admin (redirecting to {}).\n\n\
            Sign in with:\n  \
            evely admin login --email <email>",
            redirect
        ),
    }
}

pub fn logout<S: Store + ?Sized>(store: &S, config: &EvelyConfig) -> Result<()> {
    match AdminDashboard::mount(store, config.notice_delay())? {
        Gate::Authenticated(dashboard) => {
            let email = dashboard.admin().email.clone();
            let next = dashboard.logout()?;
            println!("Signed out {} {}", email.bold(), format!("→ {}", next).dimmed());
        }
        Gate::Unauthenticated { .. } => println!("{}", "Not signed in as admin".dimmed()),
    }
    Ok(())
}

pub fn dashboard<S: Store + ?Sized>(store: &S, config: &EvelyConfig, tab: Tab) -> Result<()> {
    let mut dashboard = require_dashboard(store, config)?;
    dashboard.select_tab(tab);
    print!("{}", render_dashboard(&mut dashboard)?);
    Ok(())
}

pub fn delete_event<S: Store + ?Sized>(
    store: &S,
    config: &EvelyConfig,
    id: &str,
    force: bool,
) -> Result<()> {
    let mut dashboard = require_dashboard(store, config)?;

    let Some(event) = dashboard.events().iter().find(|e| e.id == id).cloned() else {
        println!("{}", format!("No event with id '{}'", id).dimmed());
        return Ok(());
    };

    println!("{}", event_table_header());
    println!("{}", event.render());

    if !force {
        println!();
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete \"{}\"?", event.title))
            .default(false)
            .interact()?;

        if !confirmed {
            return Ok(());
        }
    }

    if dashboard.delete_event(id)? {
        println!("{}", "Event deleted successfully".green());
        println!(
            "{}",
            format!("{} events remain", dashboard.events().len()).dimmed()
        );
    } else {
        println!("{}", "Nothing deleted".dimmed());
    }

    Ok(())
}

pub fn credentials<S: Store + ?Sized>(store: &S, config: &EvelyConfig, email: &str) -> Result<()> {
    let mut dashboard = require_dashboard(store, config)?;

    dashboard.open_credential_editor();
    dashboard.editor_mut().email = email.to_string();
    println!("{}", dashboard.editor().render());
    dashboard.editor_mut().password = rpassword::prompt_password("New password: ")?;

    dashboard.update_credentials(Instant::now())?;

    if let Some(notice) = dashboard.notice(Instant::now()) {
        println!("{}", notice.message.green());
    }
    Ok(())
}

/// Header, overview cards and the active tab.
pub fn render_dashboard<S: Store>(dashboard: &mut AdminDashboard<S>) -> Result<String> {
    let mut out = Vec::new();

    out.push(format!(
        "{}  {}",
        "EventHub Admin".bold(),
        dashboard.admin().email.dimmed()
    ));
    if let Some(notice) = dashboard.notice(Instant::now()) {
        out.push(notice.message.green().to_string());
    }
    out.push(String::new());
    out.push(dashboard.overview()?.render());
    out.push(String::new());

    let tabs: Vec<String> = Tab::ALL
        .iter()
        .map(|tab| {
            if *tab == dashboard.active_tab() {
                tab.render()
            } else {
                tab.label().dimmed().to_string()
            }
        })
        .collect();
    out.push(tabs.join("   "));
    out.push(String::new());

    match dashboard.active_tab() {
        Tab::Overview => {
            out.push("Recent Events".bold().to_string());
            for event in dashboard.events().iter().rev().take(5) {
                out.push(format!("   {}", event.render()));
            }
            out.push(String::new());
            out.push("Quick Actions".bold().to_string());
            for link in &QUICK_ACTIONS {
                out.push(format!("   {}", link.render()));
            }
        }
        Tab::Events => {
            out.push(format!("   {}", event_table_header()));
            for event in dashboard.events() {
                out.push(format!("   {}", event.render()));
            }
        }
        Tab::Users => {
            if dashboard.users().is_empty() {
                out.push(format!("   {}", "No registered users yet".dimmed()));
            }
            for user in dashboard.users() {
                out.push(format!("   {}", user.render()));
            }
        }
        Tab::Settings => {
            out.push(dashboard.system_info().render());
            out.push(String::new());
            out.push(dashboard.editor().render());
        }
    }

    out.push(String::new());
    Ok(out.join("\n"))
}
