/// Worldbuilding entries and their categories
///
/// An entry is a single note inside a world: a name, a category label and a
/// free-text description. Entries have no identity beyond their position in
/// the world and are never edited once added.

use crate::error::{Result, WorldError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Category label attached to an entry
///
/// Serialized as its display label. Labels outside the fixed set are kept
/// verbatim in [`Category::Unrecognized`] so hand-edited documents still load
/// and save back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Location,
    Character,
    Faction,
    Event,
    Object,
    Scene,
    BeliefSystem,
    Concept,
    NoteWildcard,
    Unrecognized(String),
}

impl Category {
    /// The nine categories offered when adding an entry, in display order
    pub const ALL: [Category; 9] = [
        Category::Location,
        Category::Character,
        Category::Faction,
        Category::Event,
        Category::Object,
        Category::Scene,
        Category::BeliefSystem,
        Category::Concept,
        Category::NoteWildcard,
    ];

    /// Label as stored in world documents
    pub fn label(&self) -> &str {
        match self {
            Category::Location => "Location",
            Category::Character => "Character",
            Category::Faction => "Faction",
            Category::Event => "Event",
            Category::Object => "Object",
            Category::Scene => "Scene",
            Category::BeliefSystem => "Belief System",
            Category::Concept => "Concept",
            Category::NoteWildcard => "Note / Wildcard",
            Category::Unrecognized(label) => label,
        }
    }

    /// Map an exact stored label back to its category
    fn from_label(label: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.label() == label)
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Category::Unrecognized(_))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        match Category::from_label(&label) {
            Some(category) => category,
            None => {
                warn!("Unrecognized category label '{}' kept verbatim", label);
                Category::Unrecognized(label)
            }
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Unrecognized(label) => label,
            other => other.label().to_string(),
        }
    }
}

/// Parses user input: case-insensitive, with shorthands for the wildcard label
impl FromStr for Category {
    type Err = WorldError;

    fn from_str(input: &str) -> Result<Self> {
        let wanted: String = input
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        match wanted.as_str() {
            "note/wildcard" | "note / wildcard" | "note" | "wildcard" => {
                return Ok(Category::NoteWildcard)
            }
            "beliefsystem" | "belief" => return Ok(Category::BeliefSystem),
            _ => {}
        }

        Category::ALL
            .into_iter()
            .find(|c| c.label().to_lowercase() == wanted)
            .ok_or_else(|| WorldError::UnknownCategory {
                label: input.trim().to_string(),
            })
    }
}

/// A single worldbuilding note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Entry name, duplicates allowed
    pub name: String,

    /// Category, stored under the `type` key
    #[serde(rename = "type")]
    pub category: Category,

    /// Free-text description
    pub description: String,
}

impl Entry {
    /// Create an entry after checking the required fields
    ///
    /// # Errors
    /// - `WorldError::MissingField`: name or description is empty or blank
    ///   (name is checked first)
    pub fn new(
        name: impl Into<String>,
        category: Category,
        description: impl Into<String>,
    ) -> Result<Self> {
        let entry = Entry {
            name: name.into(),
            category,
            description: description.into(),
        };

        entry.validate()?;

        debug!("Created entry '{}' ({})", entry.name, entry.category);
        Ok(entry)
    }

    /// Check that name and description are both non-blank
    pub fn validate(&self) -> Result<()> {
        Self::check_fields(&self.name, &self.description)
    }

    /// Check raw form fields before anything else is parsed from the form
    ///
    /// # Errors
    /// - `WorldError::MissingField`: name or description is empty or blank
    ///   (name is checked first)
    pub fn check_fields(name: &str, description: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(WorldError::MissingField {
                field: "name".to_string(),
            });
        }

        if description.trim().is_empty() {
            return Err(WorldError::MissingField {
                field: "description".to_string(),
            });
        }

        Ok(())
    }
}
