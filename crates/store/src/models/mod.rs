//! Domain model structs and data transfer objects.
//!
//! Each entity module contains:
//! - A `Serialize` entity struct matching the stored item shape
//! - A `Deserialize` DTO for creation, with its own validation
//! - A `Deserialize` DTO for updates, all fields optional

pub mod character;
