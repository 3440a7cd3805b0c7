/// Application state management
///
/// Owns the single worldbuilding session and the event bus it publishes on,
/// behind async-aware locks so command functions can share it.

use crate::config::Config;
use crate::core::{EventBus, Session};
use crate::error::Result;
use crate::persistence::JsonWorldStore;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Application state shared across command functions
#[derive(Clone)]
pub struct AppState {
    /// The worldbuilding session
    /// Uses tokio::sync::Mutex to allow holding across await points
    pub session: Arc<Mutex<Session<JsonWorldStore>>>,

    /// Event bus for session events
    pub event_bus: Arc<EventBus>,
}

impl AppState {
    /// Create application state over the configured storage directory
    pub fn new(config: &Config) -> Result<Self> {
        let event_bus = Arc::new(EventBus::new());
        let store = JsonWorldStore::open(&config.worlds_dir)?;

        info!("Worlds directory: {:?}", store.root());

        Ok(Self {
            session: Arc::new(Mutex::new(Session::new(store, event_bus.clone()))),
            event_bus,
        })
    }

    /// Check if a world is currently active
    pub async fn has_active_world(&self) -> bool {
        self.session.lock().await.active_world().is_some()
    }
}
