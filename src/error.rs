//! Provider-level error types shared across the codec, issuer, redirect builder, and controller.

// self
use crate::{_prelude::*, auth::IdentifierError};

/// Provider-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical provider error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Identifier failed validation.
	#[error(transparent)]
	Identifier(#[from] IdentifierError),

	/// A required call-time argument was missing or empty.
	#[error("Required argument `{name}` is missing or empty.")]
	InvalidArgument {
		/// Name of the offending argument.
		name: &'static str,
	},
	/// The call was well formed but the return target is not acceptable.
	#[error("Return URL is not an acceptable target: {url}.")]
	InvalidReturnTarget {
		/// Rejected return URL.
		url: String,
	},
	/// No resolvable provider, session, or acceptable submission for the current request.
	#[error("Request is not authorized: {reason}.")]
	Unauthorized {
		/// Human-readable reason; never shown to end users.
		reason: String,
	},
	/// The host asked for an operation this provider does not implement.
	#[error("Operation `{operation}` is not supported by this account provider.")]
	Unsupported {
		/// Name of the rejected operation.
		operation: &'static str,
	},
}
impl Error {
	/// Shorthand for [`Error::Unauthorized`].
	pub fn unauthorized(reason: impl Into<String>) -> Self {
		Self::Unauthorized { reason: reason.into() }
	}

	/// Stable label used by observability helpers.
	pub const fn kind(&self) -> &'static str {
		match self {
			Error::Config(_) => "config",
			Error::Identifier(_) => "identifier",
			Error::InvalidArgument { .. } => "invalid_argument",
			Error::InvalidReturnTarget { .. } => "invalid_return_target",
			Error::Unauthorized { .. } => "unauthorized",
			Error::Unsupported { .. } => "unsupported",
		}
	}
}

/// Configuration loading and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Settings document could not be deserialized.
	#[error("Settings could not be parsed at `{path}`.")]
	Parse {
		/// Dotted path of the field that failed to deserialize.
		path: String,
		/// Underlying JSON failure.
		#[source]
		source: serde_json::Error,
	},
	/// The hub base URL must use HTTPS.
	#[error("Hub URL must use HTTPS: {url}.")]
	InsecureHubUrl {
		/// Offending URL.
		url: String,
	},
	/// A required textual setting was empty.
	#[error("Setting `{field}` cannot be empty.")]
	EmptySetting {
		/// Name of the empty setting.
		field: &'static str,
	},
	/// The session and anti-forgery cookies must not share a name.
	#[error("Session and anti-forgery cookies share the name `{name}`.")]
	CookieNameClash {
		/// Clashing cookie name.
		name: String,
	},
	/// A URL template lacks the `{tenant}` placeholder.
	#[error("Template `{field}` must contain the `{{tenant}}` placeholder.")]
	MissingTenantPlaceholder {
		/// Name of the template setting.
		field: &'static str,
	},
	/// A templated URL could not be parsed once expanded.
	#[error("Templated URL is invalid: {url}.")]
	InvalidTemplateUrl {
		/// Expanded URL text.
		url: String,
		/// Underlying parser failure.
		#[source]
		source: url::ParseError,
	},
}
impl From<serde_path_to_error::Error<serde_json::Error>> for ConfigError {
	fn from(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
		let path = e.path().to_string();

		Self::Parse { path, source: e.into_inner() }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn config_error_converts_into_provider_error_with_source() {
		let config_error = ConfigError::EmptySetting { field: "cookie.name" };
		let error: Error = config_error.into();

		assert!(matches!(error, Error::Config(_)));
		assert_eq!(error.to_string(), "Setting `cookie.name` cannot be empty.");
		assert_eq!(error.kind(), "config");
	}

	#[test]
	fn argument_and_target_errors_stay_distinct() {
		let missing = Error::InvalidArgument { name: "state" };
		let target = Error::InvalidReturnTarget { url: "ftp://example.com".into() };

		assert_eq!(missing.kind(), "invalid_argument");
		assert_eq!(target.kind(), "invalid_return_target");
		assert!(missing.to_string().contains("`state`"));
		assert!(target.to_string().contains("ftp://example.com"));
	}

	#[test]
	fn template_error_renders_literal_braces() {
		let err = ConfigError::MissingTenantPlaceholder { field: "redirect.sign_in_path" };

		assert_eq!(
			err.to_string(),
			"Template `redirect.sign_in_path` must contain the `{tenant}` placeholder."
		);
	}
}
