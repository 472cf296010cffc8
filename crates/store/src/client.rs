//! Store client contract.
//!
//! One trait method per remote request. Implementations do no business
//! interpretation: absence comes back as `None`, faults as
//! [`StoreError`], and results are passed through unchanged. There are
//! no retries and no batching at this layer.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::character::{Character, UpdateCharacter};

/// One page of raw scan results.
#[derive(Debug)]
pub struct ScanPage {
    /// Items in the store's native scan order.
    pub items: Vec<Character>,
    /// Key of the last item the scan evaluated; `None` once the table
    /// is exhausted. Feed it to the next [`CharacterStore::scan`] call
    /// to resume after it.
    pub last_key: Option<String>,
}

/// Client for the character table.
#[async_trait]
pub trait CharacterStore: Send + Sync {
    /// Unconditional insert-or-overwrite of the full record.
    async fn put(&self, character: &Character) -> Result<(), StoreError>;

    /// Point lookup. A missing key is `Ok(None)`, never an error.
    async fn get(&self, id: &str) -> Result<Option<Character>, StoreError>;

    /// Read up to `limit` items, resuming after `start_after` when given.
    async fn scan(&self, limit: i32, start_after: Option<&str>)
        -> Result<ScanPage, StoreError>;

    /// Write all three mutable attributes and return the resulting
    /// record. Patch fields left `None` clear the stored attribute.
    /// Updating an unknown id creates the record.
    async fn update(&self, id: &str, patch: &UpdateCharacter)
        -> Result<Character, StoreError>;

    /// Remove the record, returning its prior state, or `None` when
    /// nothing was stored under the id.
    async fn delete(&self, id: &str) -> Result<Option<Character>, StoreError>;

    /// Cheap reachability probe for the health endpoint.
    async fn health_check(&self) -> Result<(), StoreError>;
}
