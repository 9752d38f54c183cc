pub mod common;
pub mod config;
pub mod restore;
pub mod status;
pub mod suggest;
pub mod sync;
