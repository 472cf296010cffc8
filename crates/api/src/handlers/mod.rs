//! Request handlers.
//!
//! Each submodule provides async handler functions for a single
//! resource. Handlers stay thin: extract, delegate to the record
//! service, map errors via `AppError`.

pub mod character;
