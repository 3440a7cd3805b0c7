/// JSON world store
///
/// Each world lives in one `<name>.json` document holding a pretty-printed
/// array of entries. Saves rewrite the whole document; there is no append
/// mode and no atomic replace.

use crate::core::Entry;
use crate::error::Result;
use crate::persistence::naming::validate_stored_name;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[cfg(test)]
use mockall::automock;

/// File suffix of a world document
pub const WORLD_FILE_SUFFIX: &str = ".json";

/// Storage backend for worlds and their entries
#[cfg_attr(test, automock)]
pub trait WorldStore {
    /// Names of all persisted worlds, in filesystem enumeration order
    fn list_worlds(&self) -> Result<Vec<String>>;

    /// Entries of a world; a world with no document is empty
    fn load_world(&self, name: &str) -> Result<Vec<Entry>>;

    /// Entries of a world, or `None` if it has no document
    fn try_load_world(&self, name: &str) -> Result<Option<Vec<Entry>>>;

    /// Overwrite the document of a world with the given entries
    fn save_world(&self, name: &str, entries: &[Entry]) -> Result<()>;

    /// Whether a document exists for the world
    fn world_exists(&self, name: &str) -> Result<bool> {
        Ok(self.list_worlds()?.iter().any(|world| world == name))
    }
}

/// Serialize entries the way world documents are written (4-space indent)
pub fn entries_to_json(entries: &[Entry]) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, formatter);
    entries.serialize(&mut serializer)?;
    Ok(bytes)
}

/// World store backed by a directory of JSON documents
#[derive(Debug, Clone)]
pub struct JsonWorldStore {
    root: PathBuf,
}

impl JsonWorldStore {
    /// Open a store rooted at `root`, creating the directory if needed
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        fs::create_dir_all(&root)?;

        info!("Opened world store at {:?}", root);
        Ok(Self { root })
    }

    /// Storage directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the document for a world
    ///
    /// # Errors
    /// - `WorldError::InvalidWorldName`: the name would leave the storage directory
    pub fn world_path(&self, name: &str) -> Result<PathBuf> {
        let name = validate_stored_name(name)?;
        Ok(self.root.join(format!("{}{}", name, WORLD_FILE_SUFFIX)))
    }
}

impl WorldStore for JsonWorldStore {
    fn list_worlds(&self) -> Result<Vec<String>> {
        let mut worlds = Vec::new();

        for dir_entry in fs::read_dir(&self.root)? {
            let dir_entry = dir_entry?;

            if !dir_entry.file_type()?.is_file() {
                continue;
            }

            let file_name = dir_entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                warn!("Skipping non UTF-8 file name {:?}", dir_entry.path());
                continue;
            };

            let Some(world) = file_name.strip_suffix(WORLD_FILE_SUFFIX) else {
                continue;
            };

            if validate_stored_name(world).is_err() {
                warn!("Skipping unopenable world file {:?}", dir_entry.path());
                continue;
            }

            worlds.push(world.to_string());
        }

        debug!("Found {} worlds in {:?}", worlds.len(), self.root);
        Ok(worlds)
    }

    fn load_world(&self, name: &str) -> Result<Vec<Entry>> {
        Ok(self.try_load_world(name)?.unwrap_or_default())
    }

    fn try_load_world(&self, name: &str) -> Result<Option<Vec<Entry>>> {
        let path = self.world_path(name)?;

        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No document for world '{}'", name);
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let entries: Vec<Entry> = serde_json::from_str(&json)?;

        debug!("Loaded {} entries for world '{}'", entries.len(), name);
        Ok(Some(entries))
    }

    fn save_world(&self, name: &str, entries: &[Entry]) -> Result<()> {
        let path = self.world_path(name)?;
        let json = entries_to_json(entries)?;

        fs::write(&path, json)?;

        info!("Saved {} entries to {:?}", entries.len(), path);
        Ok(())
    }
}
