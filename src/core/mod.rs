/// Core domain logic for Worldbuilder
///
/// This module contains the entry model, the session that tracks the active
/// world, and the events the session publishes.

pub mod entry;
pub mod events;
pub mod session;

// Re-export commonly used types
pub use entry::{Category, Entry};
pub use events::{EventBus, WorldEvent};
pub use session::{Session, SessionState, Snapshot};
