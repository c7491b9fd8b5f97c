//! Redacted session value carried between sign-in and claims issuance.

// self
use crate::_prelude::*;

/// Opaque session token identifying the signed-in user for one provider instance.
///
/// The value is never interpreted; it only flows from the sign-in form, through the cookie
/// codec, into the issued claims.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionValue(String);
impl SessionValue {
	/// Wraps a new session string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the raw session value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns `true` when the value carries no characters.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Consumes the wrapper, returning the raw string.
	pub fn into_inner(self) -> String {
		self.0
	}
}
impl AsRef<str> for SessionValue {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl From<&str> for SessionValue {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}
impl From<String> for SessionValue {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl Debug for SessionValue {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("SessionValue").field(&"<redacted>").finish()
	}
}
impl Display for SessionValue {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn session_formatters_redact() {
		let value = SessionValue::new("124578895613");

		assert_eq!(format!("{value:?}"), "SessionValue(\"<redacted>\")");
		assert_eq!(format!("{value}"), "<redacted>");
		assert_eq!(value.expose(), "124578895613");
	}

	#[test]
	fn serde_is_transparent() {
		let value = SessionValue::new("abc");
		let payload = serde_json::to_string(&value).expect("Session value should serialize.");

		assert_eq!(payload, "\"abc\"");
		assert!(SessionValue::default().is_empty());
	}
}
