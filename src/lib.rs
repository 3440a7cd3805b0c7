/// Worldbuilder - record worldbuilding notes grouped into named worlds
///
/// Worlds are stored as one JSON document each in a local directory. The
/// session tracks the active world and keeps its entries in step with disk.

// Module declarations
pub mod config;
pub mod core;
pub mod error;
pub mod persistence;
pub mod ui;

// Re-export commonly used types
pub use config::Config;
pub use core::{Category, Entry, Session};
pub use error::{Result, WorldError};
pub use persistence::{JsonWorldStore, WorldStore};
pub use ui::state::AppState;

/// Initialize logging infrastructure
fn init_logging(config: &Config) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    tracing::info!("Worldbuilder starting...");
}

/// Main application entry point
pub async fn run() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_logging(&config);

    // Initialize application state
    let app_state = AppState::new(&config)?;

    ui::terminal::run_terminal(app_state).await?;

    Ok(())
}
