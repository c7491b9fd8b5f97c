//! Claim issuance for the session value stored by [`SessionCookieCodec`].
//!
//! Every issued set has the same five claims in the same order, all tagged with one issuer
//! name derived from the provider id. An absent session is issued as an empty identity unless
//! [`ClaimsSettings::require_session`] is set.

// self
use crate::{
	_prelude::*,
	auth::{AccountProviderId, Claim, ClaimSet, ClaimType},
	config::ClaimsSettings,
	provider::AccountProviderConfiguration,
	session::SessionCookieCodec,
};

/// Builds the fixed claim set asserted for a provider configuration.
#[derive(Clone, Debug)]
pub struct ClaimsIssuer {
	settings: ClaimsSettings,
	codec: SessionCookieCodec,
}
impl ClaimsIssuer {
	/// Creates an issuer that reads sessions through `codec`.
	pub fn new(settings: ClaimsSettings, codec: SessionCookieCodec) -> Self {
		Self { settings, codec }
	}

	/// Issuer name shared by every claim of provider `id`.
	pub fn issuer_name(&self, id: AccountProviderId) -> String {
		format!("{}{}", self.settings.issuer_prefix, id.obfuscated())
	}

	/// Reads the session for `configuration.id` from `jar` and issues the claim set.
	pub fn issue_claims(
		&self,
		configuration: &AccountProviderConfiguration,
		jar: Option<&CookieJar>,
	) -> Result<ClaimSet> {
		let id = configuration.id;
		let session = self.codec.get(jar, id);

		if session.is_none() && self.settings.require_session {
			return Err(Error::unauthorized(format!("no session stored for provider {id}")));
		}

		let user = session.map(|session| session.into_inner()).unwrap_or_default();
		let issuer = self.issuer_name(id);
		let claims = ClaimType::ALL
			.into_iter()
			.map(|claim_type| {
				let value = match claim_type {
					ClaimType::EmailAddress => self.settings.email.clone(),
					ClaimType::PrivatePersonalIdentifier | ClaimType::Name => user.clone(),
					ClaimType::GivenName => self.settings.given_name.clone(),
					ClaimType::Surname => self.settings.surname.clone(),
				};

				Claim::new(claim_type, value, issuer.as_str())
			})
			.collect();

		Ok(ClaimSet::new(claims))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::auth::SessionValue;

	fn configuration(raw: i32) -> AccountProviderConfiguration {
		AccountProviderConfiguration::new(AccountProviderId::new(raw), "Demo")
	}

	#[test]
	fn issues_five_claims_in_fixed_order() {
		let codec = SessionCookieCodec::default();
		let issuer = ClaimsIssuer::new(ClaimsSettings::default(), codec.clone());
		let mut jar = CookieJar::new();
		let session = SessionValue::new("124578895613");

		codec.set(Some(&mut jar), AccountProviderId::new(7), Some(&session));

		let claims =
			issuer.issue_claims(&configuration(7), Some(&jar)).expect("Claims should be issued.");
		let types: Vec<_> = claims.iter().map(|claim| claim.claim_type).collect();

		assert_eq!(types, ClaimType::ALL.to_vec());
		assert_eq!(claims.value_of(ClaimType::EmailAddress), Some("user@mail.com"));
		assert_eq!(claims.value_of(ClaimType::PrivatePersonalIdentifier), Some("124578895613"));
		assert_eq!(claims.value_of(ClaimType::Name), Some("124578895613"));
		assert_eq!(claims.value_of(ClaimType::GivenName), Some("UserGivenName"));
		assert_eq!(claims.value_of(ClaimType::Surname), Some("UserSurname"));
		assert_eq!(claims.issuer(), Some("uri:customaccountprovider:1721830150"));
	}

	#[test]
	fn absent_session_issues_empty_identity() {
		let issuer = ClaimsIssuer::new(ClaimsSettings::default(), SessionCookieCodec::default());

		for jar in [None, Some(&CookieJar::new())] {
			let claims =
				issuer.issue_claims(&configuration(7), jar).expect("Claims should be issued.");

			assert_eq!(claims.len(), 5);
			assert_eq!(claims.value_of(ClaimType::Name), Some(""));
			assert_eq!(claims.value_of(ClaimType::PrivatePersonalIdentifier), Some(""));
		}
	}

	#[test]
	fn required_session_rejects_absence() {
		let settings = ClaimsSettings { require_session: true, ..ClaimsSettings::default() };
		let issuer = ClaimsIssuer::new(settings, SessionCookieCodec::default());
		let err = issuer
			.issue_claims(&configuration(7), Some(&CookieJar::new()))
			.expect_err("Missing session must be rejected when required.");

		assert!(matches!(err, Error::Unauthorized { .. }));
	}

	#[test]
	fn sessions_of_other_providers_are_ignored() {
		let codec = SessionCookieCodec::default();
		let issuer = ClaimsIssuer::new(ClaimsSettings::default(), codec.clone());
		let mut jar = CookieJar::new();

		codec.set(Some(&mut jar), AccountProviderId::new(8), Some(&SessionValue::new("other")));

		let claims =
			issuer.issue_claims(&configuration(7), Some(&jar)).expect("Claims should be issued.");

		assert_eq!(claims.value_of(ClaimType::Name), Some(""));
		assert_ne!(claims.issuer(), Some(issuer.issuer_name(AccountProviderId::new(8)).as_str()));
	}
}
