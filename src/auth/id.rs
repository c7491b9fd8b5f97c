//! Strongly typed identifiers used across the provider domain.

// std
use std::{borrow::Borrow, ops::Deref};
// crates.io
use uuid::Uuid;
// self
use crate::_prelude::*;

const SEGMENT_MAX_LEN: usize = 128;
// Non-cryptographic mixing constants; `OBFUSCATION_INVERSE` is the multiplicative inverse of
// `OBFUSCATION_MULTIPLIER` modulo 2^32.
const OBFUSCATION_SALT: u32 = 0x5A3C_96E1;
const OBFUSCATION_MULTIPLIER: u32 = 0x9E37_79B1;
const OBFUSCATION_INVERSE: u32 = 0x0E8B_2F51;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier.
		kind: &'static str,
	},
	/// The identifier contains whitespace characters.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Kind of identifier.
		kind: &'static str,
	},
	/// The identifier contains a path separator.
	#[error("{kind} identifier contains a path separator.")]
	ContainsSeparator {
		/// Kind of identifier.
		kind: &'static str,
	},
	/// The identifier contains a character outside the unreserved URL set.
	#[error("{kind} identifier contains `{character}`, which is not an unreserved URL character.")]
	InvalidCharacter {
		/// Kind of identifier.
		kind: &'static str,
		/// First offending character.
		character: char,
	},
	/// The identifier is a `.` or `..` dot segment.
	#[error("{kind} identifier cannot be a dot segment.")]
	DotSegment {
		/// Kind of identifier.
		kind: &'static str,
	},
	/// The identifier exceeded the allowed character count.
	#[error("{kind} identifier exceeds {max} characters.")]
	TooLong {
		/// Kind of identifier.
		kind: &'static str,
		/// Maximum permitted character count.
		max: usize,
	},
}

/// Numeric key of a configured account provider instance.
///
/// The raw key is a database identifier; anything written to cookies or issuer names uses
/// [`AccountProviderId::obfuscated`] instead.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountProviderId(i32);
impl AccountProviderId {
	/// Wraps a raw provider key.
	pub const fn new(value: i32) -> Self {
		Self(value)
	}

	/// Returns the raw provider key.
	pub const fn get(self) -> i32 {
		self.0
	}

	/// Reversible projection used for namespacing. Not a security boundary.
	pub const fn obfuscated(self) -> u32 {
		(self.0 as u32 ^ OBFUSCATION_SALT).wrapping_mul(OBFUSCATION_MULTIPLIER)
	}

	/// Recovers the identifier from its [`obfuscated`](Self::obfuscated) projection.
	pub const fn from_obfuscated(value: u32) -> Self {
		Self((value.wrapping_mul(OBFUSCATION_INVERSE) ^ OBFUSCATION_SALT) as i32)
	}
}
impl From<i32> for AccountProviderId {
	fn from(value: i32) -> Self {
		Self(value)
	}
}
impl Debug for AccountProviderId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "AccountProvider({})", self.0)
	}
}
impl Display for AccountProviderId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		Display::fmt(&self.0, f)
	}
}

/// GUID identifying the account provider *type* registered with the hub.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountProviderTypeId(Uuid);
impl AccountProviderTypeId {
	/// Type identifier of the custom account provider shipped by this crate.
	pub const CUSTOM: Self = Self(Uuid::from_u128(0x254B3FC0_913D_41E4_80E7_FD1A4F664448));

	/// Wraps an arbitrary type GUID.
	pub const fn new(value: Uuid) -> Self {
		Self(value)
	}

	/// Returns the underlying GUID.
	pub const fn as_uuid(&self) -> &Uuid {
		&self.0
	}
}
impl Display for AccountProviderTypeId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		Display::fmt(&self.0, f)
	}
}

/// Numeric key of a hub tenant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(i32);
impl TenantId {
	/// Wraps a raw tenant key.
	pub const fn new(value: i32) -> Self {
		Self(value)
	}

	/// Returns the raw tenant key.
	pub const fn get(self) -> i32 {
		self.0
	}
}
impl Display for TenantId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		Display::fmt(&self.0, f)
	}
}

/// URL path segment routing requests to a tenant (`https://hub/{segment}/...`).
///
/// Only RFC 3986 unreserved characters are accepted, and `.`/`..` are rejected, so a segment
/// can never add a query, a fragment, or extra path levels to the URLs built from it.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TenantSegment(String);
impl TenantSegment {
	/// Creates a new segment after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
		let view = value.as_ref();

		validate_segment(view)?;

		Ok(Self(view.to_owned()))
	}
}
impl Deref for TenantSegment {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for TenantSegment {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Borrow<str> for TenantSegment {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl From<TenantSegment> for String {
	fn from(value: TenantSegment) -> Self {
		value.0
	}
}
impl TryFrom<String> for TenantSegment {
	type Error = IdentifierError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_segment(&value)?;

		Ok(Self(value))
	}
}
impl FromStr for TenantSegment {
	type Err = IdentifierError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}
impl Debug for TenantSegment {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "TenantSegment({})", self.0)
	}
}
impl Display for TenantSegment {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

fn validate_segment(view: &str) -> Result<(), IdentifierError> {
	const KIND: &str = "Tenant segment";

	if view.is_empty() {
		return Err(IdentifierError::Empty { kind: KIND });
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace { kind: KIND });
	}
	if view.contains('/') {
		return Err(IdentifierError::ContainsSeparator { kind: KIND });
	}
	if let Some(character) = view.chars().find(|c| !is_unreserved(*c)) {
		return Err(IdentifierError::InvalidCharacter { kind: KIND, character });
	}
	if matches!(view, "." | "..") {
		return Err(IdentifierError::DotSegment { kind: KIND });
	}
	if view.len() > SEGMENT_MAX_LEN {
		return Err(IdentifierError::TooLong { kind: KIND, max: SEGMENT_MAX_LEN });
	}

	Ok(())
}

// RFC 3986 `unreserved`.
fn is_unreserved(c: char) -> bool {
	c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}
