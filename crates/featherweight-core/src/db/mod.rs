//! Local libSQL store for Featherweight

mod connection;
mod migrations;
mod preferences_repository;
mod repository;

pub use connection::Database;
pub use preferences_repository::{LibSqlPreferencesRepository, PreferencesRepository};
pub use repository::{LibSqlStore, LocalStore, SetLogDeletion};
