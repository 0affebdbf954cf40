//! Engine configuration.
//!
//! [`HeadConfig`] carries the defaults the reducer falls back to and the
//! marker attribute stamped on managed nodes. It can be built in code or
//! loaded from TOML:
//!
//! ```toml
//! marker_attribute = "data-myapp-head"
//! encode_special_characters = true
//! defer = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HeadError, HeadResult};

/// Default marker attribute stamped on every node the engine manages.
pub const DEFAULT_MARKER_ATTRIBUTE: &str = "data-reinhardt-head-managed";

/// Configuration for the head engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadConfig {
	/// Attribute name marking engine-owned nodes.
	pub marker_attribute: String,
	/// Escape special characters when no declaration says otherwise.
	pub encode_special_characters: bool,
	/// Batch reconciliation per tick when no declaration says otherwise.
	pub defer: bool,
}

impl Default for HeadConfig {
	fn default() -> Self {
		Self {
			marker_attribute: DEFAULT_MARKER_ATTRIBUTE.to_string(),
			encode_special_characters: true,
			defer: true,
		}
	}
}

impl HeadConfig {
	/// Creates the default configuration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the marker attribute.
	pub fn marker_attribute(mut self, name: impl Into<String>) -> Self {
		self.marker_attribute = name.into();
		self
	}

	/// Sets the default escaping behaviour.
	pub fn encode_special_characters(mut self, encode: bool) -> Self {
		self.encode_special_characters = encode;
		self
	}

	/// Sets the default batching behaviour.
	pub fn defer(mut self, defer: bool) -> Self {
		self.defer = defer;
		self
	}

	/// Parses and validates a TOML document.
	pub fn from_toml_str(source: &str) -> HeadResult<Self> {
		let config: Self = toml::from_str(source)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads, parses and validates a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> HeadResult<Self> {
		let source = std::fs::read_to_string(path.as_ref())?;
		Self::from_toml_str(&source)
	}

	/// Checks that the marker attribute is a usable `data-*` attribute name.
	pub fn validate(&self) -> HeadResult<()> {
		let marker = &self.marker_attribute;
		let Some(suffix) = marker.strip_prefix("data-") else {
			return Err(HeadError::InvalidConfig(format!(
				"marker_attribute must start with 'data-', got '{}'",
				marker
			)));
		};
		if suffix.is_empty() {
			return Err(HeadError::InvalidConfig(
				"marker_attribute needs a name after 'data-'".to_string(),
			));
		}
		let valid = suffix
			.chars()
			.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
		if !valid {
			return Err(HeadError::InvalidConfig(format!(
				"marker_attribute may only contain lower-case ASCII letters, digits, '-' and '_', got '{}'",
				marker
			)));
		}
		Ok(())
	}
}
