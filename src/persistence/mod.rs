/// Data persistence: world documents on local disk
///
/// This module handles all data storage and retrieval:
/// - World documents (JSON arrays of entries)
/// - World name validation before any path is derived

pub mod naming;
pub mod store;

// Re-export commonly used types
pub use naming::{validate_stored_name, validate_world_name};
pub use store::{entries_to_json, JsonWorldStore, WorldStore, WORLD_FILE_SUFFIX};
