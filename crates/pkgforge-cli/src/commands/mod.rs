//! Command handlers. Each translates parsed arguments into calls on the
//! core services and reports the outcome; no business logic lives here.

pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
pub mod setup;
