/// UI bridge layer: commands, events and the terminal front end
///
/// This module provides the bridge between the session and whatever
/// presents it to the user.

pub mod commands;
pub mod events;
pub mod state;
pub mod terminal;

// Re-export commonly used types
pub use commands::*;
pub use events::*;
pub use state::AppState;
