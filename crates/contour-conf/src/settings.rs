//! Layered settings
//!
//! Settings are resolved once at startup in priority order
//! (environment variables > settings file > defaults) and then passed by
//! reference into the serialization orchestrator.

use super::env::{Env, EnvError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Default maximum association depth
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Which encoder turns a serialized payload into text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EncoderKind {
	/// Compact JSON
	#[default]
	Json,
	/// Indented JSON
	JsonPretty,
	/// YAML document
	Yaml,
}

impl fmt::Display for EncoderKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			EncoderKind::Json => "json",
			EncoderKind::JsonPretty => "json-pretty",
			EncoderKind::Yaml => "yaml",
		};
		f.write_str(name)
	}
}

impl FromStr for EncoderKind {
	type Err = SettingsError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"json" => Ok(EncoderKind::Json),
			"json-pretty" | "json_pretty" | "pretty" => Ok(EncoderKind::JsonPretty),
			"yaml" | "yml" => Ok(EncoderKind::Yaml),
			other => Err(SettingsError::UnknownEncoder(other.to_string())),
		}
	}
}

/// Process-wide serialization defaults
///
/// # Examples
///
/// ```
/// use contour_conf::{EncoderKind, Settings};
///
/// let settings = Settings::from_toml_str("camelize = false\nencoder = \"yaml\"").unwrap();
/// assert!(!settings.camelize);
/// assert_eq!(settings.encoder, EncoderKind::Yaml);
/// assert_eq!(settings.max_depth, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
	/// Whether keys are camelized when a call does not say otherwise
	pub camelize: bool,
	/// Encoder used by `to_json`
	pub encoder: EncoderKind,
	/// Maximum association depth when a call does not say otherwise
	pub max_depth: usize,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			camelize: true,
			encoder: EncoderKind::Json,
			max_depth: DEFAULT_MAX_DEPTH,
		}
	}
}

impl Settings {
	/// Parse settings from TOML text; absent keys keep their defaults
	pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
		Ok(toml::from_str(text)?)
	}

	/// Read settings from a TOML file
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
			path: path.display().to_string(),
			source,
		})?;
		Self::from_toml_str(&text)
	}

	/// Overlay values present in the environment on top of `self`
	pub fn with_env(mut self, env: &Env) -> Result<Self, SettingsError> {
		if let Some(camelize) = env.bool("CAMELIZE")? {
			self.camelize = camelize;
		}
		if let Some(encoder) = env.str("ENCODER")? {
			self.encoder = encoder.parse()?;
		}
		if let Some(max_depth) = env.usize("MAX_DEPTH")? {
			self.max_depth = max_depth;
		}
		Ok(self)
	}

	/// Resolve settings from an optional file plus `CONTOUR_*` environment overrides
	pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
		let base = match path {
			Some(path) => Self::from_file(path)?,
			None => Self::default(),
		};
		let settings = base.with_env(&Env::default())?;
		tracing::debug!(
			camelize = settings.camelize,
			encoder = %settings.encoder,
			max_depth = settings.max_depth,
			"contour settings resolved"
		);
		Ok(settings)
	}

	/// Set the camelize default
	pub fn camelize(mut self, enabled: bool) -> Self {
		self.camelize = enabled;
		self
	}

	/// Set the encoder
	pub fn encoder(mut self, encoder: EncoderKind) -> Self {
		self.encoder = encoder;
		self
	}

	/// Set the default maximum depth
	pub fn max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}
}

/// Settings loading errors
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("IO error reading {path}: {source}")]
	Io {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Environment error: {0}")]
	Env(#[from] EnvError),

	#[error("Unknown encoder '{0}' (expected json, json-pretty or yaml)")]
	UnknownEncoder(String),
}
