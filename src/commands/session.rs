use anyhow::Result;
use chrono::Utc;
use evely_core::pages::HomePage;
use evely_core::repository::EventRepository;
use evely_core::session::{UserSession, sign_in};
use evely_core::store::Store;
use evely_core::user::{Role, User};
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn login<S: Store + ?Sized>(store: &S, email: &str, role: Role) -> Result<()> {
    sign_in(store, &UserSession::new(email, role, Utc::now()))?;
    println!("Signed in as {} {}", email.bold(), format!("({})", role.render()).dimmed());
    Ok(())
}

pub fn signup<S: Store + ?Sized>(store: &S, email: &str, role: Role) -> Result<()> {
    let now = Utc::now();

    EventRepository::new(store).register_user(User::new(email, role, &now.to_rfc3339()))?;
    sign_in(store, &UserSession::new(email, role, now))?;

    println!("{} {}", "Account created:".green(), email.bold());
    Ok(())
}

pub fn logout<S: Store + ?Sized>(store: &S) -> Result<()> {
    match HomePage::mount(store)? {
        HomePage::Dashboard(dashboard) => {
            let email = dashboard.user.email.clone();
            dashboard.logout(store)?;
            println!("Signed out {}", email.bold());
        }
        HomePage::Landing => println!("{}", "Not signed in".dimmed()),
    }
    Ok(())
}
