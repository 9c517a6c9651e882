/// Database configuration and connection management
pub mod database;

/// Status vocabulary loading from a TOML file
pub mod statuses;
