//! Terminal rendering for evely-core types.
//!
//! Extension traits that add colored output to the page models using owo_colors.

use evely_core::catalog::{SupportChannel, TouristPlace};
use evely_core::credentials::CredentialEditor;
use evely_core::event::Event;
use evely_core::pages::{Overview, SystemInfo, Tab};
use evely_core::route::Link;
use evely_core::user::{Role, User};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Whole amounts without decimals, anything else with cents.
pub fn money(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("${:.0}", amount)
    } else {
        format!("${:.2}", amount)
    }
}

impl Render for Event {
    fn render(&self) -> String {
        let price = if self.is_free() {
            format!("{:<8}", "Free").green().to_string()
        } else {
            format!("{:<8}", money(self.ticket_price)).yellow().to_string()
        };

        let status = if self.is_full() {
            "Full".dimmed().to_string()
        } else {
            "Active".cyan().to_string()
        };

        let capacity = format!("{}/{}", self.sold(), self.venue.capacity);

        format!(
            "{:<30} {:<16} {:<11} {} {:<12} {:<8} {}",
            self.title.bold(),
            self.venue.city,
            self.display_date(),
            price,
            capacity,
            status,
            self.id.dimmed()
        )
    }
}

pub fn event_table_header() -> String {
    format!(
        "{:<30} {:<16} {:<11} {:<8} {:<12} {:<8} {}",
        "Event Name", "City", "Date", "Price", "Capacity", "Status", "Id"
    )
    .dimmed()
    .to_string()
}

impl Render for Role {
    fn render(&self) -> String {
        match self {
            Role::Organizer => self.label().magenta().to_string(),
            Role::Attendee => self.label().blue().to_string(),
        }
    }
}

impl Render for User {
    fn render(&self) -> String {
        format!(
            "{:<34} {:<10} {}",
            self.email,
            self.role.render(),
            self.joined().dimmed()
        )
    }
}

impl Render for Link {
    fn render(&self) -> String {
        format!(
            "{:<20} {:<28} {}",
            self.title.bold(),
            self.description.dimmed(),
            format!("→ {}", self.route).cyan()
        )
    }
}

impl Render for TouristPlace {
    fn render(&self) -> String {
        format!(
            "{} {}\n      {}",
            self.name.bold(),
            format!("({})", self.city).dimmed(),
            self.description
        )
    }
}

impl Render for SupportChannel {
    fn render(&self) -> String {
        format!(
            "{:<20} {:<28} {}",
            self.name.bold(),
            self.availability.dimmed(),
            self.contact
        )
    }
}

impl Render for Tab {
    fn render(&self) -> String {
        self.label().bold().underline().to_string()
    }
}

impl Render for Overview {
    fn render(&self) -> String {
        let stats = &self.stats;
        let mut lines = vec![
            format!(
                "   {:<18} {}  {}",
                "Total Events",
                stats.total.bold(),
                format!("({} free, {} paid)", stats.free, stats.paid).dimmed()
            ),
            format!("   {:<18} {}", "User Created", self.user_created.bold()),
            format!("   {:<18} {}", "Registered Users", self.registered_users.bold()),
            format!("   {:<18} {}", "Total Revenue", money(stats.revenue).green()),
            format!("   {:<18} {}", "Total Bookings", stats.bookings),
            format!("   {:<18} {}", "Avg. Event Price", money(stats.average_price as f64)),
        ];

        if stats.inconsistent > 0 {
            lines.push(
                format!(
                    "   {} events list more tickets than seats; their sales count as zero",
                    stats.inconsistent
                )
                .yellow()
                .to_string(),
            );
        }

        lines.join("\n")
    }
}

impl Render for SystemInfo {
    fn render(&self) -> String {
        [
            format!("   {:<14} {}", "Platform:", self.platform),
            format!("   {:<14} {}", "Last Login:", self.last_login),
            format!("   {:<14} {}", "Admin Role:", self.admin_role),
            format!("   {:<14} {}", "Database:", self.database),
            format!("   {:<14} {} (including user-created)", "Total Events:", self.total_events),
        ]
        .join("\n")
    }
}

impl Render for CredentialEditor {
    fn render(&self) -> String {
        if self.open {
            format!("   Editing credentials for {}", self.email.bold())
        } else {
            format!("   {}", "Admin email and password (run `evely admin credentials`)".dimmed())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evely_core::event::Venue;

    #[test]
    fn money_drops_zero_cents() {
        assert_eq!(money(3000.0), "$3000");
        assert_eq!(money(12.5), "$12.50");
        assert_eq!(money(0.0), "$0");
    }

    #[test]
    fn event_row_shows_sold_over_capacity() {
        let event = Event::new("u1", "Jazz Night", "2025-03-20", 50.0, Venue::new("Chicago", 100), 40);
        let row = event.render();
        assert!(row.contains("60/100"));
        assert!(row.contains("$50"));
        assert!(row.contains("Active"));
    }

    #[test]
    fn sold_out_event_is_full() {
        let event = Event::new("u2", "Gala", "2025-03-20", 0.0, Venue::new("Reno", 10), 0);
        let row = event.render();
        assert!(row.contains("Free"));
        assert!(row.contains("Full"));
    }
}
