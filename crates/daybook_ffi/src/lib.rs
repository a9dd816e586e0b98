//! FFI crate exposing the daybook core to a UI host.

pub mod api;
