//! featherweight-core - Core library for Featherweight
//!
//! This crate contains the workout models, the on-device libSQL store, the
//! remote document-store adapters, and the sync layer that mirrors local
//! state to the cloud.

pub mod config;
pub mod convert;
pub mod db;
pub mod error;
pub mod models;
pub mod remote;
pub mod sync;
pub mod training;
pub mod util;

pub use error::{Error, Result};
pub use sync::{SyncManager, SyncOutcome};
