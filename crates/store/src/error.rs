/// Fault raised by a store implementation.
///
/// Absence of a record is never an error at this layer. Lookups return
/// `Ok(None)` and the service decides what that means; a `StoreError`
/// always means the request itself went wrong.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store rejected the request or the request never completed.
    #[error("store request failed: {0}")]
    Request(String),

    /// An item read back from the store mistypes an attribute or is
    /// missing its key.
    #[error("malformed item: {0}")]
    Malformed(String),
}
