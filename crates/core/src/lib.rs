//! Shared building blocks for the character service.
//!
//! This crate holds the error taxonomy and pagination helpers. It has no
//! internal dependencies so both the store layer and the API layer can
//! use it.

pub mod error;
pub mod pagination;
