//! Status vocabulary loading from a TOML file
//!
//! Deployments that rename or re-rank statuses describe them in a file like:
//!
//! ```toml
//! dropped = "Dropped"
//!
//! [[statuses]]
//! name = "Building Application"
//! weight = 1
//!
//! [[statuses]]
//! name = "Dropped"
//! weight = 0
//! ```
//!
//! Without a file the built-in vocabulary is used.

use crate::{
    core::status::{StatusDefinition, StatusVocabulary},
    errors::{Error, Result},
};
use serde::Deserialize;
use std::{collections::HashSet, path::Path};
use tracing::{debug, info};

/// Environment variable naming the vocabulary file
pub const STATUS_CONFIG_ENV: &str = "STATUS_CONFIG";

/// Configuration structure representing the whole vocabulary file
#[derive(Debug, Deserialize)]
pub struct StatusConfig {
    /// Label of the status that excludes an application from summaries
    pub dropped: String,
    /// Every status with its weight
    pub statuses: Vec<StatusEntry>,
}

/// Configuration for a single status
#[derive(Debug, Deserialize, Clone)]
pub struct StatusEntry {
    /// Status label
    pub name: String,
    /// Progression weight, higher is further along
    pub weight: u32,
}

impl TryFrom<StatusConfig> for StatusVocabulary {
    type Error = Error;

    fn try_from(config: StatusConfig) -> Result<Self> {
        if config.statuses.is_empty() {
            return Err(Error::Config {
                message: "Status vocabulary must define at least one status".to_string(),
            });
        }

        {
            let mut seen = HashSet::new();
            for entry in &config.statuses {
                if entry.name.trim().is_empty() {
                    return Err(Error::Config {
                        message: "Status names cannot be empty".to_string(),
                    });
                }
                if !seen.insert(entry.name.as_str()) {
                    return Err(Error::Config {
                        message: format!("Duplicate status '{}'", entry.name),
                    });
                }
            }
        }

        match config.statuses.iter().find(|entry| entry.name == config.dropped) {
            None => {
                return Err(Error::Config {
                    message: format!(
                        "Dropped status '{}' is not listed in statuses",
                        config.dropped
                    ),
                });
            }
            Some(entry) if entry.weight != 0 => {
                return Err(Error::Config {
                    message: format!("Dropped status '{}' must have weight 0", entry.name),
                });
            }
            Some(_) => {}
        }

        if config.statuses.iter().all(|entry| entry.name == config.dropped) {
            return Err(Error::Config {
                message: "Status vocabulary needs a status besides the dropped one".to_string(),
            });
        }

        let definitions = config
            .statuses
            .into_iter()
            .map(|entry| StatusDefinition {
                name: entry.name,
                weight: entry.weight,
            })
            .collect();

        Ok(Self::from_parts(definitions, config.dropped))
    }
}

/// Parses and validates a vocabulary from TOML text.
pub fn parse_vocabulary(contents: &str) -> Result<StatusVocabulary> {
    let config: StatusConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse status vocabulary: {e}"),
    })?;
    config.try_into()
}

/// Loads a vocabulary from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid or fields are missing
/// - The statuses are empty, duplicated, or the dropped status is not listed with weight 0
/// - The dropped status is the only status
pub fn load_vocabulary<P: AsRef<Path>>(path: P) -> Result<StatusVocabulary> {
    let path_ref = path.as_ref();
    debug!("Loading status vocabulary from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read status config {}: {e}", path_ref.display()),
    })?;
    parse_vocabulary(&contents)
}

/// Loads the vocabulary from `path` when given, otherwise from the file named
/// by `STATUS_CONFIG`, otherwise falls back to the built-in vocabulary.
pub fn load_vocabulary_or_default(path: Option<&Path>) -> Result<StatusVocabulary> {
    if let Some(path) = path {
        return load_vocabulary(path);
    }

    match std::env::var(STATUS_CONFIG_ENV) {
        Ok(env_path) => load_vocabulary(env_path),
        Err(_) => {
            info!("No status config provided, using built-in vocabulary");
            Ok(StatusVocabulary::default())
        }
    }
}
