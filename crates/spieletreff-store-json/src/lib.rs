//! Flat-file JSON backend for the Spieletreff registration store.
//!
//! Keeps two documents on disk: the submission array and the game
//! statistics object. Both are rewritten in full on every save.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{JsonFileStore, STATS_FILE, SUBMISSIONS_FILE};

#[cfg(test)]
mod tests;
