/// World name validation
///
/// A world name becomes the file stem of its document, so it must never be
/// able to point outside the storage directory or collide with reserved
/// file names.

use crate::error::{Result, WorldError};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

/// Maximum world name length in characters
pub const MAX_WORLD_NAME_LEN: usize = 128;

/// Path separators, characters reserved on common filesystems, and controls
static FORBIDDEN_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[/\\:*?"<>|\p{Cc}]"#).expect("forbidden character pattern is valid")
});

/// Check that an existing world name stays inside the storage directory
///
/// Looser than [`validate_world_name`]: documents written by older versions
/// may carry reserved characters or padding and must still open.
///
/// # Errors
/// - `WorldError::InvalidWorldName`: the name is empty, is `.` or `..`, or
///   contains a path separator or NUL
pub fn validate_stored_name(name: &str) -> Result<&str> {
    let reason = if name.is_empty() {
        Some("name cannot be empty")
    } else if name == "." || name == ".." {
        Some("name cannot be a directory reference")
    } else if name.contains(['/', '\\', '\0']) {
        Some("name contains a path separator")
    } else {
        None
    };

    match reason {
        Some(reason) => {
            warn!("Rejected stored world name {:?}: {}", name, reason);
            Err(WorldError::InvalidWorldName {
                name: name.to_string(),
                reason: reason.to_string(),
            })
        }
        None => Ok(name),
    }
}

/// Validate a name for a new world
///
/// # Errors
/// - `WorldError::InvalidWorldName`: the name is blank, padded with
///   whitespace, too long, starts with '.', or contains a forbidden character
pub fn validate_world_name(name: &str) -> Result<&str> {
    let reason = if name.trim().is_empty() {
        Some("name cannot be empty".to_string())
    } else if name.trim() != name {
        Some("name cannot start or end with whitespace".to_string())
    } else if name.chars().count() > MAX_WORLD_NAME_LEN {
        Some(format!("name is longer than {} characters", MAX_WORLD_NAME_LEN))
    } else if name.starts_with('.') {
        Some("name cannot start with '.'".to_string())
    } else if let Some(found) = FORBIDDEN_CHARS.find(name) {
        Some(format!("name contains forbidden character {:?}", found.as_str()))
    } else {
        None
    };

    match reason {
        Some(reason) => {
            warn!("Rejected world name {:?}: {}", name, reason);
            Err(WorldError::InvalidWorldName {
                name: name.to_string(),
                reason,
            })
        }
        None => Ok(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_names() {
        for name in ["Aeridor", "Test", "The Shattered Isles", "Welt-2 (draft)", "Ærwyn"] {
            assert_eq!(validate_world_name(name).unwrap(), name);
        }
    }

    #[test]
    fn test_rejects_empty_and_blank() {
        assert!(validate_world_name("").is_err());
        assert!(validate_world_name("   ").is_err());
    }

    #[test]
    fn test_rejects_padded_names() {
        assert!(validate_world_name(" Aeridor").is_err());
        assert!(validate_world_name("Aeridor\t").is_err());
    }

    #[test]
    fn test_rejects_path_traversal() {
        for name in ["..", ".", "../escape", "a/b", "a\\b", ".hidden"] {
            let result = validate_world_name(name);
            assert!(
                matches!(result, Err(WorldError::InvalidWorldName { .. })),
                "{:?} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_rejects_reserved_characters() {
        for name in ["a:b", "what?", "star*", "quote\"d", "<tag>", "pipe|d", "nul\0"] {
            assert!(validate_world_name(name).is_err(), "{:?} should be rejected", name);
        }
    }

    #[test]
    fn test_stored_names_allow_legacy_characters() {
        for name in ["a:b", " Padded", "what?", "star*", ".hidden"] {
            assert_eq!(validate_stored_name(name).unwrap(), name);
        }
    }

    #[test]
    fn test_stored_names_reject_traversal() {
        for name in ["", ".", "..", "../escape", "a/b", "a\\b", "nul\0"] {
            assert!(validate_stored_name(name).is_err(), "{:?} should be rejected", name);
        }
    }

    #[test]
    fn test_length_limit() {
        let longest = "a".repeat(MAX_WORLD_NAME_LEN);
        assert!(validate_world_name(&longest).is_ok());

        let too_long = "a".repeat(MAX_WORLD_NAME_LEN + 1);
        assert!(validate_world_name(&too_long).is_err());
    }
}
