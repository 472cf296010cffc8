//! Character entity model and DTOs.

use serde::{Deserialize, Serialize};

use holocron_core::error::CoreError;

/// A character record as held in the character table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Character {
    /// Opaque identifier, assigned by the service on creation.
    pub id: String,
    pub name: String,
    /// Episodes the character appears in. Non-empty on any record that
    /// went through creation validation.
    pub episodes: Vec<String>,
    /// Home planet; omitted from JSON when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planet: Option<String>,
}

/// Input for creating a character. The id is never caller-supplied.
///
/// `name` and `episodes` default to empty when absent from the payload,
/// so a missing field and an empty one fail [`validate`] the same way.
///
/// [`validate`]: CreateCharacter::validate
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCharacter {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub episodes: Vec<String>,
    pub planet: Option<String>,
}

impl CreateCharacter {
    /// Check the required-field invariants: non-empty `name`, at least
    /// one episode. Nothing reaches the store until this passes.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.is_empty() || self.episodes.is_empty() {
            return Err(CoreError::Validation(
                "name and episodes are required".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the full record under a freshly assigned id.
    pub fn into_character(self, id: String) -> Character {
        Character {
            id,
            name: self.name,
            episodes: self.episodes,
            planet: self.planet,
        }
    }
}

/// Input for updating a character. All fields are optional in the
/// payload, but every update writes the full attribute set: a field
/// left `None` here is cleared on the stored record, not preserved.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCharacter {
    pub name: Option<String>,
    pub episodes: Option<Vec<String>>,
    pub planet: Option<String>,
}

/// One page of characters from a table scan.
#[derive(Debug, Serialize)]
pub struct CharacterPage {
    pub characters: Vec<Character>,
    /// Opaque cursor for the next page; absent once the scan is
    /// exhausted. Clients pass it back verbatim as the `lastKey` query
    /// parameter.
    #[serde(rename = "lastKey", skip_serializing_if = "Option::is_none")]
    pub last_key: Option<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
