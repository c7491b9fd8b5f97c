//! Claim vocabulary and the ordered claim set issued for a session.

// std
use std::slice::Iter;
// self
use crate::_prelude::*;

/// Claim types asserted by the custom account provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimType {
	/// E-mail address of the subject.
	EmailAddress,
	/// Provider-scoped stable identifier of the subject.
	PrivatePersonalIdentifier,
	/// Display or login name.
	Name,
	/// Given (first) name.
	GivenName,
	/// Surname (family name).
	Surname,
}
impl ClaimType {
	/// Every claim type the provider issues, in issuance order.
	pub const ALL: [ClaimType; 5] = [
		ClaimType::EmailAddress,
		ClaimType::PrivatePersonalIdentifier,
		ClaimType::Name,
		ClaimType::GivenName,
		ClaimType::Surname,
	];

	/// Returns the well-known claim type URI.
	pub const fn uri(self) -> &'static str {
		match self {
			ClaimType::EmailAddress =>
				"http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress",
			ClaimType::PrivatePersonalIdentifier =>
				"http://schemas.xmlsoap.org/ws/2005/05/identity/claims/privatepersonalidentifier",
			ClaimType::Name => "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name",
			ClaimType::GivenName =>
				"http://schemas.xmlsoap.org/ws/2005/05/identity/claims/givenname",
			ClaimType::Surname => "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/surname",
		}
	}
}
impl Display for ClaimType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.uri())
	}
}

/// Typed `(type, value, issuer)` assertion about an authenticated identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
	/// Claim type.
	pub claim_type: ClaimType,
	/// Asserted value; may be empty.
	pub value: String,
	/// Issuer name shared by every claim in a set.
	pub issuer: String,
}
impl Claim {
	/// Creates a new claim.
	pub fn new(claim_type: ClaimType, value: impl Into<String>, issuer: impl Into<String>) -> Self {
		Self { claim_type, value: value.into(), issuer: issuer.into() }
	}
}

/// Ordered claims produced for exactly one session value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet(Vec<Claim>);
impl ClaimSet {
	/// Wraps an ordered claim list.
	pub fn new(claims: Vec<Claim>) -> Self {
		Self(claims)
	}

	/// Number of claims in the set.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns `true` when no claims are present.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates over the claims in issuance order.
	pub fn iter(&self) -> Iter<'_, Claim> {
		self.0.iter()
	}

	/// Returns the first claim of the requested type.
	pub fn find(&self, claim_type: ClaimType) -> Option<&Claim> {
		self.0.iter().find(|claim| claim.claim_type == claim_type)
	}

	/// Returns the value of the first claim of the requested type.
	pub fn value_of(&self, claim_type: ClaimType) -> Option<&str> {
		self.find(claim_type).map(|claim| claim.value.as_str())
	}

	/// Returns the issuer when every claim shares one.
	pub fn issuer(&self) -> Option<&str> {
		let first = self.0.first()?.issuer.as_str();

		self.0.iter().all(|claim| claim.issuer == first).then_some(first)
	}

	/// Returns the claims as a slice.
	pub fn as_slice(&self) -> &[Claim] {
		&self.0
	}

	/// Consumes the set, returning the ordered claims.
	pub fn into_vec(self) -> Vec<Claim> {
		self.0
	}
}
impl<'a> IntoIterator for &'a ClaimSet {
	type IntoIter = Iter<'a, Claim>;
	type Item = &'a Claim;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}
impl IntoIterator for ClaimSet {
	type IntoIter = std::vec::IntoIter<Claim>;
	type Item = Claim;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}
