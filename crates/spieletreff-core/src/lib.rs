//! Core types for the Spieletreff registration service.
//!
//! Holds the submission model, popularity aggregation, the storage-backend
//! trait, and the [`registry::Registry`] that enforces upsert-by-email. This
//! crate is free of HTTP and file-format dependencies.

pub mod error;
pub mod registry;
pub mod stats;
pub mod store;
pub mod submission;

pub use error::{Error, Result};
