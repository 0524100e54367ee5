//! Environment variable handling
//!
//! Reads optional, prefixed environment variables with typed parsing. Missing
//! variables are not errors here: settings only override what is present.

use std::env;

/// Default prefix for Contour environment variables
pub const DEFAULT_PREFIX: &str = "CONTOUR_";

/// Environment variable reader with prefix support
#[derive(Debug, Clone)]
pub struct Env {
	/// Optional prefix for environment variables (e.g., "CONTOUR_")
	pub prefix: Option<String>,
}

impl Env {
	/// Create a new Env instance without a prefix
	pub fn new() -> Self {
		Self { prefix: None }
	}

	/// Set a prefix for all environment variable lookups
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = Some(prefix.into());
		self
	}

	/// Get the full key name with prefix
	fn get_key_name(&self, key: &str) -> String {
		match &self.prefix {
			Some(prefix) => format!("{}{}", prefix, key),
			None => key.to_string(),
		}
	}

	/// Read a string value, `None` when the variable is unset
	pub fn str(&self, key: &str) -> Result<Option<String>, EnvError> {
		let full_key = self.get_key_name(key);
		validate_env_var_name(&full_key)?;

		match env::var(&full_key) {
			Ok(val) => Ok(Some(val)),
			Err(env::VarError::NotPresent) => Ok(None),
			Err(env::VarError::NotUnicode(_)) => Err(EnvError::NotUnicode(full_key)),
		}
	}

	/// Read a boolean value, `None` when the variable is unset
	pub fn bool(&self, key: &str) -> Result<Option<bool>, EnvError> {
		let Some(val) = self.str(key)? else {
			return Ok(None);
		};
		parse_bool(&val)
			.map(Some)
			.map_err(|error| EnvError::ParseError {
				key: self.get_key_name(key),
				value_len: val.len(),
				error,
			})
	}

	/// Read an unsigned integer value, `None` when the variable is unset
	pub fn usize(&self, key: &str) -> Result<Option<usize>, EnvError> {
		let Some(val) = self.str(key)? else {
			return Ok(None);
		};
		val.trim()
			.parse::<usize>()
			.map(Some)
			.map_err(|e| EnvError::ParseError {
				key: self.get_key_name(key),
				value_len: val.len(),
				error: e.to_string(),
			})
	}
}

impl Default for Env {
	fn default() -> Self {
		Self::new().with_prefix(DEFAULT_PREFIX)
	}
}

/// Parse a boolean from common textual spellings
///
/// # Examples
///
/// ```
/// use contour_conf::env::parse_bool;
///
/// assert_eq!(parse_bool("Yes"), Ok(true));
/// assert_eq!(parse_bool("0"), Ok(false));
/// assert!(parse_bool("maybe").is_err());
/// ```
pub fn parse_bool(value: &str) -> Result<bool, String> {
	match value.trim().to_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Ok(true),
		"false" | "0" | "no" | "off" => Ok(false),
		other => Err(format!("cannot parse '{}' as bool", other)),
	}
}

/// Validate an environment variable name before lookup
pub fn validate_env_var_name(name: &str) -> Result<(), EnvError> {
	if name.is_empty() {
		return Err(EnvError::InvalidVariableName {
			name: name.to_string(),
			reason: "name is empty".to_string(),
		});
	}
	if name.contains('=') || name.contains('\0') {
		return Err(EnvError::InvalidVariableName {
			name: name.to_string(),
			reason: "name contains '=' or NUL".to_string(),
		});
	}
	Ok(())
}

/// Environment variable errors
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvError {
	/// The value could not be parsed into the requested type
	#[error("Failed to parse environment variable {key} (length {value_len}): {error}")]
	ParseError {
		key: String,
		value_len: usize,
		error: String,
	},

	/// The value is not valid unicode
	#[error("Environment variable {0} is not valid unicode")]
	NotUnicode(String),

	/// The variable name itself is invalid
	#[error("Invalid environment variable name {name:?}: {reason}")]
	InvalidVariableName { name: String, reason: String },
}
