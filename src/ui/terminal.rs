/// Line-oriented terminal front end
///
/// Reads one command per line, runs it through the command functions and
/// prints the result. Mutations report back through session events, which
/// are drained after every command and decide what gets redrawn.

use crate::core::WorldEvent;
use crate::ui::commands::{self, AddEntryRequest, CommandError, CreateWorldRequest, WorldView};
use crate::ui::events::{drain_pending, FrontendEvent};
use crate::ui::state::AppState;
use std::fmt::Display;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::broadcast::Receiver;
use tracing::{debug, info};

pub const HELP_TEXT: &str = "\
Commands:
  worlds                                  list saved worlds
  new <name>                              create a new world
  open <name>                             select an existing world
  view                                    show all entries of the active world
  categories                              list entry categories
  add <category> | <name> | <description> add an entry
  save                                    save the active world now
  export [path]                           write the world file to path, or print it
  help                                    show this help
  quit                                    exit";

/// A parsed terminal command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCommand {
    Worlds,
    New(String),
    Open(String),
    View,
    Categories,
    Add {
        category: String,
        name: String,
        description: String,
    },
    Save,
    Export(Option<PathBuf>),
    Help,
    Quit,
}

/// Parse one input line
pub fn parse_command(line: &str) -> Result<TerminalCommand, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_lowercase().as_str() {
        "worlds" | "ls" => Ok(TerminalCommand::Worlds),
        "new" | "create" => {
            if rest.is_empty() {
                Err("Usage: new <name>".to_string())
            } else {
                Ok(TerminalCommand::New(rest.to_string()))
            }
        }
        "open" | "select" => {
            if rest.is_empty() {
                Err("Usage: open <name>".to_string())
            } else {
                Ok(TerminalCommand::Open(rest.to_string()))
            }
        }
        "view" => Ok(TerminalCommand::View),
        "categories" => Ok(TerminalCommand::Categories),
        "add" => {
            let parts: Vec<&str> = rest.splitn(3, '|').map(str::trim).collect();
            match parts.as_slice() {
                [category, name, description] => Ok(TerminalCommand::Add {
                    category: category.to_string(),
                    name: name.to_string(),
                    description: description.to_string(),
                }),
                _ => Err("Usage: add <category> | <name> | <description>".to_string()),
            }
        }
        "save" => Ok(TerminalCommand::Save),
        "export" => Ok(TerminalCommand::Export(
            (!rest.is_empty()).then(|| PathBuf::from(rest)),
        )),
        "help" | "?" => Ok(TerminalCommand::Help),
        "quit" | "exit" => Ok(TerminalCommand::Quit),
        "" => Err(String::new()),
        other => Err(format!("Unknown command '{}'. Type 'help' for commands.", other)),
    }
}

fn push_line(out: &mut String, line: impl Display) {
    out.push_str(&line.to_string());
    out.push('\n');
}

/// Render every entry of a world
pub fn render_world(view: &WorldView) -> String {
    let mut out = String::new();
    push_line(&mut out, &view.name);
    push_line(&mut out, "All Entries");

    if view.entries.is_empty() {
        push_line(&mut out, "This world has no entries yet.");
        return out;
    }

    for entry in &view.entries {
        push_line(&mut out, format_args!("### {}", entry.name));
        push_line(&mut out, format_args!("Type: {}", entry.category));
        push_line(&mut out, &entry.description);
        push_line(&mut out, "---");
    }

    out
}

/// Result of handling one line
#[derive(Debug, Default)]
pub struct Outcome {
    pub output: String,
    pub quit: bool,
}

/// Run one command and collect everything it prints
pub async fn handle_line(
    line: &str,
    state: &AppState,
    events: &mut Receiver<WorldEvent>,
) -> Outcome {
    let mut outcome = Outcome::default();

    let command = match parse_command(line) {
        Ok(command) => command,
        Err(message) => {
            if !message.is_empty() {
                push_line(&mut outcome.output, message);
            }
            return outcome;
        }
    };

    debug!("Running {:?}", command);

    if let Err(err) = run_command(command, state, &mut outcome).await {
        let prefix = if err.warning { "Warning" } else { "Error" };
        push_line(&mut outcome.output, format_args!("{}: {}", prefix, err));
    }

    for notice in drain_pending(events) {
        match notice {
            FrontendEvent::WorldChanged {
                world_name,
                entry_count,
            } => push_line(
                &mut outcome.output,
                format_args!("Active world: {} ({} entries)", world_name, entry_count),
            ),
            FrontendEvent::EntriesChanged { message, .. } | FrontendEvent::Success { message } => {
                push_line(&mut outcome.output, message)
            }
        }
    }

    outcome
}

async fn run_command(
    command: TerminalCommand,
    state: &AppState,
    outcome: &mut Outcome,
) -> Result<(), CommandError> {
    let out = &mut outcome.output;

    match command {
        TerminalCommand::Worlds => {
            let worlds = commands::list_worlds(state).await?;
            if worlds.is_empty() {
                push_line(out, "No worlds yet. Create one with 'new <name>'.");
            }
            for world in worlds {
                push_line(out, format_args!("- {}", world));
            }
        }
        TerminalCommand::New(name) => {
            commands::create_world(CreateWorldRequest { name }, state).await?;
        }
        TerminalCommand::Open(name) => {
            let result = commands::select_world(name, state).await?;
            if !result.changed {
                push_line(out, format_args!("Already viewing '{}'.", result.world.name));
            }
        }
        TerminalCommand::View => match commands::get_active_world(state).await? {
            Some(view) => out.push_str(&render_world(&view)),
            None => {
                push_line(out, "Please select or create a world to get started.");
            }
        },
        TerminalCommand::Categories => {
            for category in commands::list_categories().await? {
                push_line(out, format_args!("- {}", category));
            }
        }
        TerminalCommand::Add {
            category,
            name,
            description,
        } => {
            commands::add_entry(
                AddEntryRequest {
                    name,
                    category,
                    description,
                },
                state,
            )
            .await?;
        }
        TerminalCommand::Save => {
            commands::save_now(state).await?;
        }
        TerminalCommand::Export(path) => {
            let export = commands::export_snapshot(state).await?;
            match path {
                Some(path) => {
                    tokio::fs::write(&path, export.data.as_bytes())
                        .await
                        .map_err(|e| CommandError::failure(format!("Failed to write {:?}: {}", path, e)))?;
                    push_line(out, format_args!("Exported '{}' to {:?}.", export.filename, path));
                }
                None => {
                    push_line(out, export.data);
                }
            }
        }
        TerminalCommand::Help => {
            push_line(out, HELP_TEXT);
        }
        TerminalCommand::Quit => outcome.quit = true,
    }

    Ok(())
}

/// Read commands from stdin until `quit` or end of input
pub async fn run_terminal(state: AppState) -> std::io::Result<()> {
    let mut events = state.event_bus.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    stdout
        .write_all(b"Worldbuilder\nPlease select or create a world to get started. Type 'help' for commands.\n")
        .await?;

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let outcome = handle_line(&line, &state, &mut events).await;
        stdout.write_all(outcome.output.as_bytes()).await?;

        if outcome.quit {
            break;
        }
    }

    info!("Terminal session ended");
    Ok(())
}
