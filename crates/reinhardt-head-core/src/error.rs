//! Error types for reinhardt-head.

use thiserror::Error;

/// Errors raised by the head engine.
///
/// Malformed declarations and tags without an identity attribute are not
/// errors: they degrade to absent fields and are reported through `tracing`.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum HeadError {
	/// `rewind()` was called while a live surface is attached.
	#[error(
		"rewind() consumes the accumulated head state and is only available without a DOM; \
		 use peek() to read the current head state in live mode"
	)]
	RewindInLiveMode,

	/// An update or unregistration referred to an instance that is not registered.
	#[error("Unknown head instance: {0}")]
	UnknownInstance(u64),

	/// The rendering surface rejected an operation.
	#[error("Surface operation '{operation}' failed: {message}")]
	Surface {
		/// Operation that failed.
		operation: &'static str,
		/// Surface-provided message.
		message: String,
	},

	/// A configuration value failed validation.
	#[error("Invalid configuration: {0}")]
	InvalidConfig(String),

	/// A configuration file could not be parsed.
	#[error("Configuration parse error: {0}")]
	ConfigParse(#[from] toml::de::Error),

	/// I/O operation failed.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// A JSON declaration document could not be parsed.
	#[error("Declaration parse error: {0}")]
	DeclarationParse(#[from] serde_json::Error),
}

impl HeadError {
	/// Creates a [`HeadError::Surface`] error.
	pub fn surface(operation: &'static str, message: impl Into<String>) -> Self {
		Self::Surface {
			operation,
			message: message.into(),
		}
	}
}

/// Result type alias for head operations.
pub type HeadResult<T> = Result<T, HeadError>;
