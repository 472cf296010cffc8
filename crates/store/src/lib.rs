//! Record access layer for the character service.
//!
//! [`CharacterService`] owns the business rules: input validation, id
//! assignment, and classification of faults. Storage goes through the
//! [`CharacterStore`] trait, one method per remote request, with two
//! implementations: [`DynamoStore`] for the real table and
//! [`MemoryStore`] for tests and local runs.

pub mod client;
pub mod config;
pub mod dynamo;
pub mod error;
pub mod memory;
pub mod models;
pub mod service;

pub use client::{CharacterStore, ScanPage};
pub use config::StoreConfig;
pub use dynamo::DynamoStore;
pub use error::StoreError;
pub use memory::MemoryStore;
pub use service::CharacterService;
