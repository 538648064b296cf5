//! Editor session configuration.
//!
//! Loaded from TOML:
//!
//! ```toml
//! record-operations = true
//! log-capacity = 512
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::log::DEFAULT_LOG_CAPACITY;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing TOML syntax or an unknown field.
	#[error("TOML parse error: {0}")]
	Parse(#[from] toml::de::Error),

	/// A field parsed but holds an unusable value.
	#[error("invalid value for '{field}': {reason}")]
	InvalidValue {
		/// The offending field.
		field: &'static str,
		/// Why the value was rejected.
		reason: &'static str,
	},
}

/// Settings for an [`Editor`](crate::Editor) session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct EditorConfig {
	/// Whether applied operations are kept in the session's operation log.
	pub record_operations: bool,
	/// Maximum number of operations the log retains.
	pub log_capacity: usize,
}

impl Default for EditorConfig {
	fn default() -> Self {
		Self {
			record_operations: true,
			log_capacity: DEFAULT_LOG_CAPACITY,
		}
	}
}

impl EditorConfig {
	/// Parses and validates a TOML document.
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads, parses, and validates a TOML file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&input)
	}

	/// Checks values that parse but cannot be used.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.record_operations && self.log_capacity == 0 {
			return Err(ConfigError::InvalidValue {
				field: "log-capacity",
				reason: "must be non-zero while record-operations is enabled",
			});
		}
		Ok(())
	}
}
