use anyhow::Result;
use evely_core::catalog::FEEDBACK_EMAIL;
use evely_core::pages::{HomeDashboard, HomePage};
use evely_core::pages::home::{BRAND_LINK, ENTRY_POINTS};
use evely_core::store::Store;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run<S: Store + ?Sized>(store: &S, support: bool) -> Result<()> {
    match HomePage::mount(store)? {
        HomePage::Landing => render_landing(),
        HomePage::Dashboard(mut dashboard) => {
            if support {
                dashboard.toggle_support();
            }
            render_dashboard(&dashboard);
        }
    }

    Ok(())
}

fn render_landing() {
    println!("{}  {}", "EVELY".bold(), BRAND_LINK.dimmed());
    println!("{}", "Discover events and places worth the trip".dimmed());
    println!();

    for link in &ENTRY_POINTS {
        println!("   {}", link.render());
    }
}

fn render_dashboard(dashboard: &HomeDashboard) {
    let user = &dashboard.user;
    println!(
        "{}  {} {}",
        "EVELY".bold(),
        user.email,
        format!("({})", user.role.render()).dimmed()
    );
    println!();
    println!("Welcome back, {}", user.email.bold());
    println!();

    for link in dashboard.shortcuts() {
        println!("   {}", link.render());
    }

    println!();
    println!("{}", "Popular Tourist Destinations".bold());
    for place in dashboard.places() {
        println!("   {}", place.render());
    }

    println!();
    match dashboard.support_channels() {
        Some(channels) => {
            println!("{}", "Support".bold());
            for channel in channels {
                println!("   {}", channel.render());
            }
            println!("   {}", format!("Feedback: {}", FEEDBACK_EMAIL).dimmed());
        }
        None => println!("{}", "Need help? Run `evely home --support`".dimmed()),
    }
}
