//! Domain records shared by repositories and the FFI surface.
//!
//! # Responsibility
//! - Define the task and note records as they cross the UI boundary.
//! - Pin the serialized wire shape used by the hosting app.
//!
//! # Invariants
//! - Ids are 64-bit integers, unique within their own collection.
//! - Wire fields use camelCase; optional fields default on deserialize.

pub mod note;
pub mod task;
