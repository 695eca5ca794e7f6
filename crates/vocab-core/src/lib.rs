//! # vocab-core
//!
//! Core types, traits, and abstractions for the vocab backend.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the storage, lookup and API crates depend on.

pub mod calendar;
pub mod defaults;
pub mod error;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use traits::*;
