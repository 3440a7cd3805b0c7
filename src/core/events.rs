/// Event system for session state changes
///
/// Every state change of the session is published here so the presentation
/// layer knows when to re-render:
/// - Session publishes WorldCreated / WorldSelected when the active world changes
/// - Session publishes EntryAdded and WorldSaved after each write
/// - UI subscribes and drains events after each command

use crate::core::Entry;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Maximum number of events buffered per subscriber
const EVENT_BUFFER_SIZE: usize = 100;

/// Events that occur during a session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum WorldEvent {
    /// New empty world created and made active
    WorldCreated {
        world: String,
    },

    /// Existing world loaded and made active
    WorldSelected {
        world: String,
        entry_count: usize,
    },

    /// Entry appended to the active world and persisted
    EntryAdded {
        world: String,
        entry: Entry,
    },

    /// Active world written to disk on request
    WorldSaved {
        world: String,
        entry_count: usize,
        saved_at: DateTime<Utc>,
    },
}

impl WorldEvent {
    /// Get the world name associated with this event
    pub fn world(&self) -> &str {
        match self {
            WorldEvent::WorldCreated { world }
            | WorldEvent::WorldSelected { world, .. }
            | WorldEvent::EntryAdded { world, .. }
            | WorldEvent::WorldSaved { world, .. } => world,
        }
    }

    /// Check if this event changes which world is active
    pub fn changes_active_world(&self) -> bool {
        matches!(
            self,
            WorldEvent::WorldCreated { .. } | WorldEvent::WorldSelected { .. }
        )
    }
}

/// Event bus for pub/sub communication
pub struct EventBus {
    sender: broadcast::Sender<WorldEvent>,
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self { sender }
    }

    /// Publish an event to all subscribers
    pub fn publish(&self, event: WorldEvent) -> Result<()> {
        // broadcast::send returns error only if no receivers exist, which is ok
        let _ = self.sender.send(event);
        Ok(())
    }

    /// Subscribe to events
    ///
    /// Returns a receiver that will receive all future events.
    /// The receiver will buffer up to EVENT_BUFFER_SIZE events.
    pub fn subscribe(&self) -> broadcast::Receiver<WorldEvent> {
        self.sender.subscribe()
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
