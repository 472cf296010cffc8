//! Business rules for character records.

use std::sync::Arc;

use uuid::Uuid;

use holocron_core::error::CoreError;

use crate::client::CharacterStore;
use crate::models::character::{Character, CharacterPage, CreateCharacter, UpdateCharacter};

/// Business layer for character records.
///
/// Owns validation, id assignment, and classification of faults into
/// [`CoreError`]. Storage goes through the injected [`CharacterStore`];
/// the service holds no record state of its own. Store faults surface
/// as [`CoreError::Storage`] with a stable, operation-scoped message,
/// with the underlying fault kept to the log.
#[derive(Clone)]
pub struct CharacterService {
    store: Arc<dyn CharacterStore>,
}

impl CharacterService {
    pub fn new(store: Arc<dyn CharacterStore>) -> Self {
        Self { store }
    }

    /// Create a character: validate, assign a fresh id, persist.
    ///
    /// Invalid input fails before anything reaches the store.
    pub async fn create(&self, input: CreateCharacter) -> Result<Character, CoreError> {
        input.validate()?;

        let character = input.into_character(Uuid::new_v4().to_string());
        if let Err(err) = self.store.put(&character).await {
            tracing::error!(error = %err, id = %character.id, "failed to persist new character");
            return Err(CoreError::Storage("error creating character".to_string()));
        }
        Ok(character)
    }

    /// Fetch a character by id.
    pub async fn get(&self, id: &str) -> Result<Character, CoreError> {
        if id.is_empty() {
            return Err(CoreError::Validation("id is required".to_string()));
        }

        match self.store.get(id).await {
            Ok(Some(character)) => Ok(character),
            Ok(None) => Err(CoreError::NotFound {
                entity: "Character",
                id: id.to_string(),
            }),
            Err(err) => {
                tracing::error!(error = %err, id, "failed to fetch character");
                Err(CoreError::Storage("error fetching character".to_string()))
            }
        }
    }

    /// List one page of characters in store scan order.
    ///
    /// `limit` and `last_key` pass through to the store unchanged; the
    /// HTTP layer owns clamping, the store owns its hard caps.
    pub async fn list(
        &self,
        limit: i32,
        last_key: Option<&str>,
    ) -> Result<CharacterPage, CoreError> {
        match self.store.scan(limit, last_key).await {
            Ok(page) => Ok(CharacterPage {
                characters: page.items,
                last_key: page.last_key,
            }),
            Err(err) => {
                tracing::error!(error = %err, "failed to scan characters");
                Err(CoreError::Storage("error listing characters".to_string()))
            }
        }
    }

    /// Overwrite the mutable attributes of a character.
    ///
    /// Every call writes all of `name`, `episodes` and `planet`; patch
    /// fields left `None` are cleared, not preserved. Callers wanting a
    /// merge read the current record and fill the patch themselves.
    /// Updating an unknown id creates the record, so this never fails
    /// with a not-found.
    pub async fn update(
        &self,
        id: &str,
        patch: UpdateCharacter,
    ) -> Result<Character, CoreError> {
        match self.store.update(id, &patch).await {
            Ok(character) => Ok(character),
            Err(err) => {
                tracing::error!(error = %err, id, "failed to update character");
                Err(CoreError::Storage("error updating character".to_string()))
            }
        }
    }

    /// Delete a character, returning its pre-deletion state.
    pub async fn delete(&self, id: &str) -> Result<Character, CoreError> {
        match self.store.delete(id).await {
            Ok(Some(character)) => Ok(character),
            Ok(None) => Err(CoreError::NotFound {
                entity: "Character",
                id: id.to_string(),
            }),
            Err(err) => {
                tracing::error!(error = %err, id, "failed to delete character");
                Err(CoreError::Storage("error deleting character".to_string()))
            }
        }
    }

    /// Probe the backing store. Used by the health endpoint.
    pub async fn health_check(&self) -> Result<(), CoreError> {
        self.store.health_check().await.map_err(|err| {
            tracing::error!(error = %err, "store health check failed");
            CoreError::Storage("store unreachable".to_string())
        })
    }
}
