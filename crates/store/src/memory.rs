//! In-memory store client.
//!
//! Behavioural stand-in for the DynamoDB table, used by tests and local
//! runs without a table. Semantics mirror the real store: upserting
//! updates that clear absent patch fields, prior-state deletes, and
//! cursored scans that report the last evaluated key whenever the page
//! filled. Scan order is lexicographic by id, which is stable but not
//! part of the service contract.

use std::collections::BTreeMap;
use std::ops::Bound;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::client::{CharacterStore, ScanPage};
use crate::error::StoreError;
use crate::models::character::{Character, UpdateCharacter};

/// Store client holding records in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<String, Character>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CharacterStore for MemoryStore {
    async fn put(&self, character: &Character) -> Result<(), StoreError> {
        self.records
            .write()
            .await
            .insert(character.id.clone(), character.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Character>, StoreError> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn scan(
        &self,
        limit: i32,
        start_after: Option<&str>,
    ) -> Result<ScanPage, StoreError> {
        // DynamoDB rejects a non-positive Limit with a validation error.
        if limit < 1 {
            return Err(StoreError::Request(format!(
                "scan limit must be at least 1, got {limit}"
            )));
        }

        let records = self.records.read().await;
        let items: Vec<Character> = match start_after {
            Some(cursor) => records
                .range::<str, _>((Bound::Excluded(cursor), Bound::Unbounded))
                .map(|(_, record)| record.clone())
                .take(limit as usize)
                .collect(),
            None => records.values().take(limit as usize).cloned().collect(),
        };

        // A scan that stopped at its limit reports where it stopped,
        // even when nothing happens to remain beyond it. The next page
        // then comes back empty with no key, exactly like the real
        // table.
        let last_key = if items.len() == limit as usize {
            items.last().map(|record| record.id.clone())
        } else {
            None
        };

        Ok(ScanPage { items, last_key })
    }

    async fn update(
        &self,
        id: &str,
        patch: &UpdateCharacter,
    ) -> Result<Character, StoreError> {
        let mut records = self.records.write().await;
        let record = records.entry(id.to_string()).or_insert_with(|| Character {
            id: id.to_string(),
            name: String::new(),
            episodes: Vec::new(),
            planet: None,
        });

        // Full overwrite of the mutable attributes. Absent patch fields
        // clear the stored value, matching SET/REMOVE on the real table.
        record.name = patch.name.clone().unwrap_or_default();
        record.episodes = patch.episodes.clone().unwrap_or_default();
        record.planet = patch.planet.clone();

        Ok(record.clone())
    }

    async fn delete(&self, id: &str) -> Result<Option<Character>, StoreError> {
        Ok(self.records.write().await.remove(id))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
