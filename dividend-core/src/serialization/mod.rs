//! Deterministic binary serialization.
//!
//! Snapshots and operation logs are encoded with bincode using a fixed
//! configuration, so equal values always produce equal bytes on every
//! platform.

mod bincode_config;

pub use bincode_config::{deserialize, serialize};
