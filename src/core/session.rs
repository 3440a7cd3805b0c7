/// Session management
///
/// Tracks which world is active and holds its entries in memory, keeping
/// them in step with the world store after every write. The session starts
/// with no world selected and stays on a world once one is created or
/// selected.

use crate::core::{Category, Entry, EventBus, WorldEvent};
use crate::error::{Result, WorldError};
use crate::persistence::{entries_to_json, validate_world_name, WorldStore, WORLD_FILE_SUFFIX};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Which phase the session is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NoWorldSelected,
    WorldActive,
}

/// One-shot export of the active world
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Suggested download name, `<world>.json`
    pub filename: String,

    /// Pretty-printed JSON of the entries
    pub bytes: Vec<u8>,
}

/// Worldbuilding session over a world store
pub struct Session<S> {
    store: S,
    active_world: Option<String>,
    entries: Vec<Entry>,
    event_bus: Arc<EventBus>,
}

impl<S: WorldStore> Session<S> {
    /// Create a session with no world selected
    pub fn new(store: S, event_bus: Arc<EventBus>) -> Self {
        debug!("Creating session");

        Self {
            store,
            active_world: None,
            entries: Vec::new(),
            event_bus,
        }
    }

    /// Name of the active world
    pub fn active_world(&self) -> Option<&str> {
        self.active_world.as_deref()
    }

    /// Entries of the active world, in insertion order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn state(&self) -> SessionState {
        if self.active_world.is_some() {
            SessionState::WorldActive
        } else {
            SessionState::NoWorldSelected
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Names of all persisted worlds
    pub fn list_worlds(&self) -> Result<Vec<String>> {
        self.store.list_worlds()
    }

    pub fn world_exists(&self, name: &str) -> Result<bool> {
        self.store.world_exists(name)
    }

    /// Create an empty world, make it active and write its document
    ///
    /// # Errors
    /// - `WorldError::InvalidWorldName`: the name cannot be stored
    /// - `WorldError::DuplicateWorld`: a world with that name already exists;
    ///   the session is left unchanged
    /// - Storage failures from writing the empty document; the session is
    ///   left unchanged
    pub fn create_world(&mut self, name: &str) -> Result<()> {
        validate_world_name(name)?;

        if self.store.world_exists(name)? {
            warn!("World '{}' already exists", name);
            return Err(WorldError::DuplicateWorld {
                name: name.to_string(),
            });
        }

        self.store.save_world(name, &[])?;

        self.active_world = Some(name.to_string());
        self.entries.clear();

        info!("Created world '{}'", name);
        self.event_bus.publish(WorldEvent::WorldCreated {
            world: name.to_string(),
        })?;

        Ok(())
    }

    /// Make an existing world active, loading its entries
    ///
    /// Returns `false` without reloading when the world is already active.
    /// A world without a document loads as empty.
    pub fn select_world(&mut self, name: &str) -> Result<bool> {
        if self.active_world.as_deref() == Some(name) {
            debug!("World '{}' already active", name);
            return Ok(false);
        }

        let entries = match self.store.try_load_world(name)? {
            Some(entries) => entries,
            None => {
                warn!("World '{}' has no document, starting empty", name);
                Vec::new()
            }
        };

        self.active_world = Some(name.to_string());
        self.entries = entries;

        info!("Selected world '{}' ({} entries)", name, self.entries.len());
        self.event_bus.publish(WorldEvent::WorldSelected {
            world: name.to_string(),
            entry_count: self.entries.len(),
        })?;

        Ok(true)
    }

    /// Append an entry to the active world and save it immediately
    ///
    /// # Errors
    /// - `WorldError::MissingField`: name or description is blank; nothing
    ///   is changed or saved
    /// - `WorldError::NoActiveWorld`: no world has been created or selected
    /// - Storage failures from the save; the entry stays in memory
    pub fn add_entry(
        &mut self,
        name: impl Into<String>,
        category: Category,
        description: impl Into<String>,
    ) -> Result<Entry> {
        let entry = Entry::new(name, category, description)?;

        let world = self.active_world.clone().ok_or(WorldError::NoActiveWorld)?;

        self.entries.push(entry.clone());
        self.store.save_world(&world, &self.entries)?;

        info!("Saved '{}' under {} in '{}'", entry.name, entry.category, world);
        self.event_bus.publish(WorldEvent::EntryAdded {
            world,
            entry: entry.clone(),
        })?;

        Ok(entry)
    }

    /// Write the active world to disk, returning how many entries were saved
    pub fn save_now(&mut self) -> Result<usize> {
        let world = self.active_world.clone().ok_or(WorldError::NoActiveWorld)?;

        self.store.save_world(&world, &self.entries)?;

        let entry_count = self.entries.len();
        info!("Saved {} entries to '{}{}'", entry_count, world, WORLD_FILE_SUFFIX);
        self.event_bus.publish(WorldEvent::WorldSaved {
            world,
            entry_count,
            saved_at: Utc::now(),
        })?;

        Ok(entry_count)
    }

    /// Serialize the active world for download without touching the disk
    pub fn export_snapshot(&self) -> Result<Snapshot> {
        let world = self.active_world.as_deref().ok_or(WorldError::NoActiveWorld)?;

        let snapshot = Snapshot {
            filename: format!("{}{}", world, WORLD_FILE_SUFFIX),
            bytes: entries_to_json(&self.entries)?,
        };

        debug!("Exported {} ({} bytes)", snapshot.filename, snapshot.bytes.len());
        Ok(snapshot)
    }
}
