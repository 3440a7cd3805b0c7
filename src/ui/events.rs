/// Event notices for the presentation layer
///
/// Converts session events into display notices and drains whatever is
/// pending on a subscriber after each command.

use crate::core::WorldEvent;
use crate::persistence::WORLD_FILE_SUFFIX;
use serde::Serialize;
use tokio::sync::broadcast::{error::TryRecvError, Receiver};
use tracing::{debug, warn};

/// Notice sent to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FrontendEvent {
    /// Active world changed, re-render everything
    WorldChanged { world_name: String, entry_count: usize },

    /// Entry list of the active world changed
    EntriesChanged { world_name: String, message: String },

    /// Informational message
    Success { message: String },
}

impl FrontendEvent {
    /// Whether the presentation should redraw the active world
    pub fn needs_refresh(&self) -> bool {
        !matches!(self, FrontendEvent::Success { .. })
    }
}

impl From<WorldEvent> for FrontendEvent {
    fn from(event: WorldEvent) -> Self {
        match event {
            WorldEvent::WorldCreated { world } => FrontendEvent::WorldChanged {
                world_name: world,
                entry_count: 0,
            },
            WorldEvent::WorldSelected { world, entry_count } => FrontendEvent::WorldChanged {
                world_name: world,
                entry_count,
            },
            WorldEvent::EntryAdded { world, entry } => FrontendEvent::EntriesChanged {
                world_name: world,
                message: format!("Saved '{}' under {}!", entry.name, entry.category),
            },
            WorldEvent::WorldSaved {
                world,
                entry_count,
                ..
            } => FrontendEvent::Success {
                message: format!(
                    "Saved {} entries to '{}{}'.",
                    entry_count, world, WORLD_FILE_SUFFIX
                ),
            },
        }
    }
}

/// Take every event already queued on the receiver without waiting
pub fn drain_pending(rx: &mut Receiver<WorldEvent>) -> Vec<FrontendEvent> {
    let mut events = Vec::new();

    loop {
        match rx.try_recv() {
            Ok(event) => events.push(event.into()),
            Err(TryRecvError::Lagged(skipped)) => {
                warn!("Event receiver lagged, skipped {} events", skipped);
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }

    debug!("Drained {} pending events", events.len());
    events
}
