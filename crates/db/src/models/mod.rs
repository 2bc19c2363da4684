//! Row structs and write DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO for in-place replacement where the table supports it

pub mod contact_message;
pub mod project;
