//! Core types and utilities for KNX device management
//!
//! This crate provides the error type, interface object type and property
//! identifier constants, and the property description shared by the other
//! crates of the workspace.

pub mod description;
pub mod error;
pub mod object_type;
pub mod pid;

pub use description::PropertyDescription;
pub use error::{KnxError, KnxResult};
