//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO for changes

pub mod article;
pub mod attachment;
pub mod recently_viewed;
pub mod tag;
pub mod taxonomy;
pub mod user;
