//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts where applicable
//! - Conversions to/from the core draft types for the entry tables

pub mod catalog;
pub mod education_record;
pub mod member_project;
pub mod membership;
pub mod person;
pub mod role_assignment;
pub mod user;
