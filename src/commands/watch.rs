use std::sync::Arc;

use anyhow::Result;
use evely_core::config::EvelyConfig;
use evely_core::store::FileStore;
use owo_colors::OwoColorize;

use super::admin::{render_dashboard, require_dashboard};

/// Keep the admin dashboard open, re-rendering whenever another process
/// changes the stored events. Stops on Ctrl-C.
pub async fn run(store: FileStore, config: &EvelyConfig) -> Result<()> {
    let store = Arc::new(store);
    let mut dashboard = require_dashboard(Arc::clone(&store), config)?;
    let _watcher = store.spawn_watcher(config.watch_interval());

    print!("{}", render_dashboard(&mut dashboard)?);
    println!("{}", "Watching for changes, Ctrl-C to stop".dimmed());

    loop {
        tokio::select! {
            changed = dashboard.changed() => {
                if !changed? {
                    break;
                }
                println!();
                println!("{}", format!("Updated {}", chrono::Local::now().format("%H:%M:%S")).dimmed());
                print!("{}", render_dashboard(&mut dashboard)?);
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    tracing::debug!("stopped watching {}", store.dir().display());
    Ok(())
}
