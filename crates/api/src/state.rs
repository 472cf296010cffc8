use std::sync::Arc;

use holocron_store::CharacterService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Record service over the configured character store.
    pub service: CharacterService,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
}
