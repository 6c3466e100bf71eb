//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` request DTOs where the entity is created through the API
//! - Joined read models for list endpoints

pub mod analytics;
pub mod beacon;
pub mod category;
pub mod detector;
pub mod furniture;
pub mod location;
pub mod photo;
pub mod user;
