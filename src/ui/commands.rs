/// Command functions
///
/// Provides the bridge between the presentation layer and the session.
/// Every command locks the session for its whole duration, so commands run
/// one at a time.

use crate::core::{Category, Entry, Session};
use crate::error::WorldError;
use crate::persistence::{JsonWorldStore, WORLD_FILE_SUFFIX};
use crate::ui::state::AppState;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{error, info, warn};

/// Result type for commands (serializable errors)
pub type CommandResult<T> = Result<T, CommandError>;

/// Error reported to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandError {
    /// The user can correct this and nothing was changed
    pub warning: bool,
    pub message: String,
}

impl CommandError {
    /// A failure outside the session, such as writing an export
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            warning: false,
            message: message.into(),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<WorldError> for CommandError {
    fn from(err: WorldError) -> Self {
        let message = match &err {
            WorldError::DuplicateWorld { .. } => "World already exists!".to_string(),
            WorldError::MissingField { .. } => {
                "Please enter both name and description.".to_string()
            }
            WorldError::NoActiveWorld => {
                "Please select or create a world to get started.".to_string()
            }
            other => other.to_string(),
        };

        let warning = err.is_warning();
        if warning {
            warn!("{}", err);
        } else {
            error!("{}", err);
        }

        Self { warning, message }
    }
}

// ============================================================================
// Request / Response Types
// ============================================================================

/// Create world request from the presentation layer
#[derive(Debug, Deserialize)]
pub struct CreateWorldRequest {
    pub name: String,
}

/// Add entry request from the presentation layer
#[derive(Debug, Deserialize)]
pub struct AddEntryRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub category: String,
    pub description: String,
}

/// Active world with its entries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldView {
    pub name: String,
    pub entries: Vec<Entry>,
}

/// Select world response
#[derive(Debug, Serialize)]
pub struct SelectResult {
    /// False when the world was already active and nothing was reloaded
    pub changed: bool,
    pub world: WorldView,
}

/// Add entry response
#[derive(Debug, Serialize)]
pub struct AddEntryResult {
    pub entry: Entry,
    pub message: String,
}

/// Save now response
#[derive(Debug, Serialize)]
pub struct SaveResult {
    pub saved: usize,
    pub filename: String,
    pub message: String,
}

/// Export response, offered to the user as a download
#[derive(Debug, Serialize)]
pub struct ExportResult {
    pub filename: String,
    pub mime: String,
    pub data: String,
}

fn active_view(session: &Session<JsonWorldStore>) -> Option<WorldView> {
    session.active_world().map(|name| WorldView {
        name: name.to_string(),
        entries: session.entries().to_vec(),
    })
}

fn require_view(session: &Session<JsonWorldStore>) -> CommandResult<WorldView> {
    active_view(session).ok_or_else(|| WorldError::NoActiveWorld.into())
}

// ============================================================================
// World Commands
// ============================================================================

/// Create a new empty world and make it active
pub async fn create_world(request: CreateWorldRequest, state: &AppState) -> CommandResult<WorldView> {
    info!("Creating world: {}", request.name);

    let mut session = state.session.lock().await;
    session.create_world(&request.name)?;

    require_view(&session)
}

/// Make an existing world active
pub async fn select_world(name: String, state: &AppState) -> CommandResult<SelectResult> {
    info!("Selecting world: {}", name);

    let mut session = state.session.lock().await;
    let changed = session.select_world(&name)?;

    Ok(SelectResult {
        changed,
        world: require_view(&session)?,
    })
}

/// List all saved worlds
pub async fn list_worlds(state: &AppState) -> CommandResult<Vec<String>> {
    let session = state.session.lock().await;
    let worlds = session.list_worlds()?;

    info!("Found {} worlds", worlds.len());
    Ok(worlds)
}

/// The active world, if any
pub async fn get_active_world(state: &AppState) -> CommandResult<Option<WorldView>> {
    let session = state.session.lock().await;
    Ok(active_view(&session))
}

// ============================================================================
// Entry Commands
// ============================================================================

/// Category labels offered when adding an entry
pub async fn list_categories() -> CommandResult<Vec<String>> {
    Ok(Category::ALL.iter().map(|c| c.label().to_string()).collect())
}

/// Add an entry to the active world and save it
pub async fn add_entry(request: AddEntryRequest, state: &AppState) -> CommandResult<AddEntryResult> {
    Entry::check_fields(&request.name, &request.description)?;
    let category: Category = request.category.parse()?;

    let mut session = state.session.lock().await;
    let entry = session.add_entry(request.name, category, request.description)?;

    let message = format!("Saved '{}' under {}!", entry.name, entry.category);
    Ok(AddEntryResult { entry, message })
}

// ============================================================================
// Save & Export Commands
// ============================================================================

/// Write the active world to disk
pub async fn save_now(state: &AppState) -> CommandResult<SaveResult> {
    let mut session = state.session.lock().await;
    let saved = session.save_now()?;

    let filename = format!(
        "{}{}",
        session.active_world().unwrap_or_default(),
        WORLD_FILE_SUFFIX
    );
    let message = format!("Saved {} entries to '{}'.", saved, filename);

    Ok(SaveResult {
        saved,
        filename,
        message,
    })
}

/// Serialize the active world for download
pub async fn export_snapshot(state: &AppState) -> CommandResult<ExportResult> {
    let session = state.session.lock().await;
    let snapshot = session.export_snapshot()?;

    let data = String::from_utf8(snapshot.bytes)
        .map_err(|e| CommandError::failure(format!("Failed to encode export: {}", e)))?;

    info!("Exported {}", snapshot.filename);
    Ok(ExportResult {
        filename: snapshot.filename,
        mime: "application/json".to_string(),
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::TempDir;

    fn test_state(tmp: &TempDir) -> AppState {
        AppState::new(&Config::with_worlds_dir(tmp.path())).unwrap()
    }

    fn orin_request() -> AddEntryRequest {
        AddEntryRequest {
            name: "Orin".to_string(),
            category: "Character".to_string(),
            description: "A smith.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_list_worlds() {
        let tmp = TempDir::new().unwrap();
        let state = test_state(&tmp);

        let view = create_world(CreateWorldRequest { name: "Test".to_string() }, &state)
            .await
            .unwrap();

        assert_eq!(view.name, "Test");
        assert!(view.entries.is_empty());
        assert_eq!(list_worlds(&state).await.unwrap(), vec!["Test".to_string()]);
    }

    #[tokio::test]
    async fn test_create_duplicate_world_message() {
        let tmp = TempDir::new().unwrap();
        let state = test_state(&tmp);

        create_world(CreateWorldRequest { name: "Test".to_string() }, &state)
            .await
            .unwrap();
        let err = create_world(CreateWorldRequest { name: "Test".to_string() }, &state)
            .await
            .unwrap_err();

        assert_eq!(err.message, "World already exists!");
        assert!(err.warning);
    }

    #[tokio::test]
    async fn test_add_entry_message() {
        let tmp = TempDir::new().unwrap();
        let state = test_state(&tmp);

        create_world(CreateWorldRequest { name: "Test".to_string() }, &state)
            .await
            .unwrap();
        let result = add_entry(orin_request(), &state).await.unwrap();

        assert_eq!(result.message, "Saved 'Orin' under Character!");
        assert_eq!(
            get_active_world(&state).await.unwrap().unwrap().entries,
            vec![result.entry]
        );
    }

    #[tokio::test]
    async fn test_add_entry_missing_fields_message() {
        let tmp = TempDir::new().unwrap();
        let state = test_state(&tmp);

        create_world(CreateWorldRequest { name: "Test".to_string() }, &state)
            .await
            .unwrap();
        let err = add_entry(
            AddEntryRequest {
                description: String::new(),
                ..orin_request()
            },
            &state,
        )
        .await
        .unwrap_err();

        assert_eq!(err.message, "Please enter both name and description.");
        assert!(err.warning);
    }

    #[tokio::test]
    async fn test_add_entry_checks_fields_before_category() {
        let tmp = TempDir::new().unwrap();
        let state = test_state(&tmp);

        create_world(CreateWorldRequest { name: "Test".to_string() }, &state)
            .await
            .unwrap();
        let err = add_entry(
            AddEntryRequest {
                name: "  ".to_string(),
                category: "Dragon".to_string(),
                description: "Large.".to_string(),
            },
            &state,
        )
        .await
        .unwrap_err();

        assert_eq!(err.message, "Please enter both name and description.");
    }

    #[tokio::test]
    async fn test_add_entry_unknown_category() {
        let tmp = TempDir::new().unwrap();
        let state = test_state(&tmp);

        create_world(CreateWorldRequest { name: "Test".to_string() }, &state)
            .await
            .unwrap();
        let err = add_entry(
            AddEntryRequest {
                category: "Dragon".to_string(),
                ..orin_request()
            },
            &state,
        )
        .await
        .unwrap_err();

        assert!(err.message.contains("Dragon"));
        assert!(err.warning);
    }

    #[tokio::test]
    async fn test_select_world_reports_change() {
        let tmp = TempDir::new().unwrap();
        let state = test_state(&tmp);

        create_world(CreateWorldRequest { name: "A".to_string() }, &state)
            .await
            .unwrap();
        add_entry(orin_request(), &state).await.unwrap();
        create_world(CreateWorldRequest { name: "B".to_string() }, &state)
            .await
            .unwrap();

        let first = select_world("A".to_string(), &state).await.unwrap();
        let second = select_world("A".to_string(), &state).await.unwrap();

        assert!(first.changed);
        assert_eq!(first.world.entries.len(), 1);
        assert!(!second.changed);
        assert_eq!(second.world, first.world);
    }

    #[tokio::test]
    async fn test_storage_failure_is_not_a_warning() {
        let tmp = TempDir::new().unwrap();
        let state = test_state(&tmp);
        std::fs::write(tmp.path().join("Broken.json"), "{ not json").unwrap();

        let err = select_world("Broken".to_string(), &state).await.unwrap_err();

        assert!(!err.warning);
        assert!(err.message.starts_with("JSON error"));
        assert!(get_active_world(&state).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_now_message() {
        let tmp = TempDir::new().unwrap();
        let state = test_state(&tmp);

        create_world(CreateWorldRequest { name: "Test".to_string() }, &state)
            .await
            .unwrap();
        add_entry(orin_request(), &state).await.unwrap();

        let result = save_now(&state).await.unwrap();

        assert_eq!(result.saved, 1);
        assert_eq!(result.filename, "Test.json");
        assert_eq!(result.message, "Saved 1 entries to 'Test.json'.");
    }

    #[tokio::test]
    async fn test_commands_without_world() {
        let tmp = TempDir::new().unwrap();
        let state = test_state(&tmp);

        assert!(get_active_world(&state).await.unwrap().is_none());
        assert!(save_now(&state).await.is_err());
        assert!(export_snapshot(&state).await.is_err());
        assert!(add_entry(orin_request(), &state).await.is_err());
    }

    #[tokio::test]
    async fn test_export_snapshot() {
        let tmp = TempDir::new().unwrap();
        let state = test_state(&tmp);

        create_world(CreateWorldRequest { name: "Test".to_string() }, &state)
            .await
            .unwrap();
        add_entry(orin_request(), &state).await.unwrap();

        let export = export_snapshot(&state).await.unwrap();

        assert_eq!(export.filename, "Test.json");
        assert_eq!(export.mime, "application/json");
        assert_eq!(
            export.data,
            std::fs::read_to_string(tmp.path().join("Test.json")).unwrap()
        );
    }

    #[tokio::test]
    async fn test_list_categories() {
        let categories = list_categories().await.unwrap();

        assert_eq!(categories.len(), 9);
        assert_eq!(categories[6], "Belief System");
        assert_eq!(categories[8], "Note / Wildcard");
    }

    #[test]
    fn test_add_entry_request_uses_type_key() {
        let request: AddEntryRequest = serde_json::from_str(
            r#"{"name": "Orin", "type": "Character", "description": "A smith."}"#,
        )
        .unwrap();

        assert_eq!(request.category, "Character");
    }
}
