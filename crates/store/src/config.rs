//! Store configuration loaded from environment variables.

/// Connection settings for the character table.
///
/// | Env Var             | Default      | Description                            |
/// |---------------------|--------------|----------------------------------------|
/// | `TABLE_NAME`        | `Characters` | DynamoDB table holding the records     |
/// | `DYNAMODB_ENDPOINT` | unset        | Endpoint override for a local DynamoDB |
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Table holding character records.
    pub table_name: String,
    /// Endpoint override; the SDK's default resolution applies when unset.
    pub endpoint_url: Option<String>,
}

impl StoreConfig {
    /// Load configuration from environment variables with defaults.
    pub fn from_env() -> Self {
        let table_name =
            std::env::var("TABLE_NAME").unwrap_or_else(|_| "Characters".to_string());
        let endpoint_url = std::env::var("DYNAMODB_ENDPOINT").ok();

        Self {
            table_name,
            endpoint_url,
        }
    }
}
