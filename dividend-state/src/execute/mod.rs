//! Operation execution module.
//!
//! This module contains the operation executor and the handlers for each
//! operation.

mod dividend;
mod executor;
mod token;

pub use executor::apply_operation;
