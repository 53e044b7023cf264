mod commands;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use evely_core::config::EvelyConfig;
use evely_core::pages::Tab;
use evely_core::store::FileStore;
use evely_core::user::Role;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "evely")]
#[command(about = "Browse EVELY events and run the EventHub admin dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the home page (landing page when signed out)
    Home {
        /// Expand the support panel
        #[arg(long)]
        support: bool,
    },
    /// Sign in as a consumer
    Login {
        #[arg(short, long)]
        email: String,

        /// attendee or organizer
        #[arg(short, long, default_value = "attendee")]
        role: Role,
    },
    /// Create an account and sign in
    Signup {
        #[arg(short, long)]
        email: String,

        /// attendee or organizer
        #[arg(short, long, default_value = "attendee")]
        role: Role,
    },
    /// End the consumer session
    Logout,
    Events {
        #[command(subcommand)]
        command: EventsCommand,
    },
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
    /// Show config and storage paths
    Config,
}

#[derive(Subcommand)]
enum EventsCommand {
    /// Submit a new event to the shared listing
    Submit {
        title: String,

        /// Event date (e.g. "2025-03-20" or "2025-03-20T19:00:00Z")
        #[arg(short, long)]
        date: String,

        /// Ticket price, 0 for a free event
        #[arg(short, long, default_value_t = 0.0)]
        price: f64,

        #[arg(long)]
        city: String,

        #[arg(long)]
        capacity: u32,

        /// Tickets still available (defaults to the full capacity)
        #[arg(long)]
        available: Option<u32>,
    },
}

#[derive(Subcommand)]
enum AdminCommand {
    /// Sign in to the admin dashboard (password is prompted)
    Login {
        #[arg(short, long)]
        email: String,
    },
    /// End the admin session
    Logout,
    /// Show the admin dashboard
    Dashboard {
        /// overview, events, users or settings
        #[arg(short, long, default_value = "overview")]
        tab: Tab,
    },
    /// Delete a user-submitted event
    DeleteEvent {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Replace the admin email and password (password is prompted)
    Credentials {
        #[arg(short, long)]
        email: String,
    },
    /// Keep the dashboard open and refresh it when events change
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = EvelyConfig::load()?;

    let store = open_store(&config)?;

    match cli.command {
        Commands::Home { support } => commands::home::run(&store, support),
        Commands::Login { email, role } => commands::session::login(&store, &email, role),
        Commands::Signup { email, role } => commands::session::signup(&store, &email, role),
        Commands::Logout => commands::session::logout(&store),
        Commands::Events { command } => match command {
            EventsCommand::Submit {
                title,
                date,
                price,
                city,
                capacity,
                available,
            } => commands::events::submit(
                &store,
                commands::events::Submission {
                    title,
                    date,
                    price,
                    city,
                    capacity,
                    available,
                },
            ),
        },
        Commands::Admin { command } => match command {
            AdminCommand::Login { email } => commands::admin::login(&store, &email),
            AdminCommand::Logout => commands::admin::logout(&store, &config),
            AdminCommand::Dashboard { tab } => commands::admin::dashboard(&store, &config, tab),
            AdminCommand::DeleteEvent { id, force } => {
                commands::admin::delete_event(&store, &config, &id, force)
            }
            AdminCommand::Credentials { email } => {
                commands::admin::credentials(&store, &config, &email)
            }
            AdminCommand::Watch => commands::watch::run(store, &config).await,
        },
        Commands::Config => commands::config::run(&config),
    }
}

fn open_store(config: &EvelyConfig) -> Result<FileStore> {
    let dir = config.storage_path();
    FileStore::open(dir.clone()).with_context(|| format!("Failed to open storage at {}", dir.display()))
}
