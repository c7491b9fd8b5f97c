//! Provider settings: cookie naming, issuer naming, hub URL templates, and anti-forgery knobs.
//!
//! Every value that used to be a process-wide constant lives here so separate provider
//! instances (and tests) can run side by side with different settings. All fields default to
//! the values the hub ships with; [`ProviderSettings::from_json_str`] overlays a JSON document
//! and validates the result.

// self
use crate::{_prelude::*, auth::TenantSegment, error::ConfigError, redirect::ReturnUrlPolicy};

const TENANT_PLACEHOLDER: &str = "{tenant}";

/// Top-level settings shared by the codec, issuer, redirect builder, and controller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
	/// HTTPS base URL of the hub; tenant paths are appended to it.
	pub hub_url: Url,
	/// Image shown for the provider when no per-configuration image is set.
	pub default_image_url: Url,
	/// Session value written by the demo credential verifier.
	pub demo_session_value: String,
	/// Session cookie naming.
	pub cookie: CookieSettings,
	/// Claim issuance settings.
	pub claims: ClaimsSettings,
	/// Sign-in/sign-out URL templates and return-URL policy.
	pub redirect: RedirectSettings,
	/// Cross-site submission guard settings.
	pub antiforgery: AntiForgerySettings,
}
impl ProviderSettings {
	/// Parses settings from JSON, reporting the failing field path, then validates them.
	pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
		let de = &mut serde_json::Deserializer::from_str(raw);
		let settings: Self = serde_path_to_error::deserialize(de)?;

		settings.validate()?;

		Ok(settings)
	}

	/// Checks cross-field invariants.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.hub_url.scheme() != "https" {
			return Err(ConfigError::InsecureHubUrl { url: self.hub_url.to_string() });
		}

		non_empty("demo_session_value", &self.demo_session_value)?;
		non_empty("cookie.name", &self.cookie.name)?;
		non_empty("cookie.key_prefix", &self.cookie.key_prefix)?;
		non_empty("claims.issuer_prefix", &self.claims.issuer_prefix)?;
		non_empty("antiforgery.cookie_name", &self.antiforgery.cookie_name)?;
		non_empty("antiforgery.field_name", &self.antiforgery.field_name)?;

		if self.antiforgery.cookie_name == self.cookie.name {
			return Err(ConfigError::CookieNameClash { name: self.cookie.name.clone() });
		}

		has_placeholder("redirect.sign_in_path", &self.redirect.sign_in_path)?;
		has_placeholder("redirect.sign_out_path", &self.redirect.sign_out_path)?;

		Ok(())
	}

	/// Expands a `{tenant}` path template against the hub URL.
	///
	/// Each template segment is pushed as one path segment, so the tenant is percent-encoded
	/// in place and cannot reach the query or fragment.
	pub fn tenant_url(&self, template: &str, tenant: &TenantSegment) -> Result<Url, ConfigError> {
		let mut url = self.hub_url.clone();

		url.set_query(None);
		url.set_fragment(None);

		{
			let mut segments = url.path_segments_mut().map_err(|()| {
				ConfigError::InvalidTemplateUrl {
					url: self.hub_url.to_string(),
					source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
				}
			})?;

			segments.pop_if_empty();

			for part in template.split('/').filter(|part| !part.is_empty()) {
				segments.push(&part.replace(TENANT_PLACEHOLDER, tenant));
			}
		}

		Ok(url)
	}

	/// Landing page of a tenant (`{hub_url}/{tenant}`).
	pub fn tenant_home(&self, tenant: &TenantSegment) -> Result<Url, ConfigError> {
		self.tenant_url("/{tenant}", tenant)
	}
}
impl Default for ProviderSettings {
	fn default() -> Self {
		Self {
			hub_url: static_url("https://localhost/"),
			default_image_url: static_url(
				"https://www.theidentityhub.com/content/images/u2uconsult.jpg",
			),
			demo_session_value: "124578895613".into(),
			cookie: CookieSettings::default(),
			claims: ClaimsSettings::default(),
			redirect: RedirectSettings::default(),
			antiforgery: AntiForgerySettings::default(),
		}
	}
}

/// Naming of the shared session cookie.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CookieSettings {
	/// Cookie name shared by every provider instance.
	pub name: String,
	/// Sub-key prefix; the obfuscated provider id is appended.
	pub key_prefix: String,
}
impl Default for CookieSettings {
	fn default() -> Self {
		Self {
			name: "CustomAccountProviderCookie".into(),
			key_prefix: "CustomAccountProviderCookieKey".into(),
		}
	}
}

/// Claim issuance settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimsSettings {
	/// Issuer prefix; the obfuscated provider id is appended.
	pub issuer_prefix: String,
	/// Placeholder e-mail claim value.
	pub email: String,
	/// Placeholder given-name claim value.
	pub given_name: String,
	/// Placeholder surname claim value.
	pub surname: String,
	/// Reject claim requests that carry no session value.
	pub require_session: bool,
}
impl Default for ClaimsSettings {
	fn default() -> Self {
		Self {
			issuer_prefix: "uri:customaccountprovider:".into(),
			email: "user@mail.com".into(),
			given_name: "UserGivenName".into(),
			surname: "UserSurname".into(),
			require_session: false,
		}
	}
}

/// Sign-in/sign-out URL templates relative to the hub URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedirectSettings {
	/// Sign-in form path; must contain `{tenant}`.
	pub sign_in_path: String,
	/// Sign-out path; must contain `{tenant}`.
	pub sign_out_path: String,
	/// Acceptance policy for caller-supplied return URLs.
	pub return_url_policy: ReturnUrlPolicy,
}
impl Default for RedirectSettings {
	fn default() -> Self {
		Self {
			sign_in_path: "/{tenant}/CustomAccountProvider/SignIn".into(),
			sign_out_path: "/{tenant}/CustomAccountProvider/SignOut".into(),
			return_url_policy: ReturnUrlPolicy::default(),
		}
	}
}

/// Cross-site submission guard settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AntiForgerySettings {
	/// Cookie holding the anti-forgery secret.
	pub cookie_name: String,
	/// Form field carrying the derived request token.
	pub field_name: String,
	/// Maximum token age in seconds.
	pub max_age_seconds: u32,
}
impl AntiForgerySettings {
	/// Maximum token age as a [`Duration`].
	pub fn max_age(&self) -> Duration {
		Duration::seconds(i64::from(self.max_age_seconds))
	}
}
impl Default for AntiForgerySettings {
	fn default() -> Self {
		Self {
			cookie_name: "CustomAccountProviderAntiForgery".into(),
			field_name: "__RequestVerificationToken".into(),
			max_age_seconds: 20 * 60,
		}
	}
}

fn non_empty(field: &'static str, value: &str) -> Result<(), ConfigError> {
	if value.trim().is_empty() { Err(ConfigError::EmptySetting { field }) } else { Ok(()) }
}

fn has_placeholder(field: &'static str, template: &str) -> Result<(), ConfigError> {
	if template.contains(TENANT_PLACEHOLDER) {
		Ok(())
	} else {
		Err(ConfigError::MissingTenantPlaceholder { field })
	}
}

fn static_url(raw: &'static str) -> Url {
	Url::parse(raw).expect("Built-in URL constants are valid.")
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn defaults_validate() {
		let settings = ProviderSettings::default();

		settings.validate().expect("Default settings should validate.");
		assert_eq!(settings.hub_url.as_str(), "https://localhost/");
		assert_eq!(settings.default_image_url.scheme(), "https");
		assert_eq!(settings.cookie.name, "CustomAccountProviderCookie");
		assert_eq!(settings.claims.issuer_prefix, "uri:customaccountprovider:");
	}

	#[test]
	fn json_overlays_defaults() {
		let settings = ProviderSettings::from_json_str(
			r#"{ "hub_url": "https://hub.example.com", "claims": { "require_session": true } }"#,
		)
		.expect("Partial settings document should parse.");

		assert_eq!(settings.hub_url.as_str(), "https://hub.example.com/");
		assert!(settings.claims.require_session);
		assert_eq!(settings.claims.email, "user@mail.com");
	}

	#[test]
	fn parse_errors_carry_the_field_path() {
		let err = ProviderSettings::from_json_str(r#"{ "cookie": { "name": 5 } }"#)
			.expect_err("Non-string cookie name must be rejected.");

		assert!(matches!(&err, ConfigError::Parse { path, .. } if path == "cookie.name"));
	}

	#[test]
	fn insecure_hub_and_bad_templates_are_rejected() {
		let err = ProviderSettings::from_json_str(r#"{ "hub_url": "http://hub.example.com" }"#)
			.expect_err("Plain HTTP hub URLs must be rejected.");

		assert!(matches!(err, ConfigError::InsecureHubUrl { .. }));

		let err = ProviderSettings::from_json_str(
			r#"{ "redirect": { "sign_in_path": "/CustomAccountProvider/SignIn" } }"#,
		)
		.expect_err("Templates without a tenant placeholder must be rejected.");

		assert!(matches!(
			err,
			ConfigError::MissingTenantPlaceholder { field: "redirect.sign_in_path" }
		));

		let err = ProviderSettings::from_json_str(r#"{ "cookie": { "key_prefix": " " } }"#)
			.expect_err("Blank key prefixes must be rejected.");

		assert!(matches!(err, ConfigError::EmptySetting { field: "cookie.key_prefix" }));
	}

	#[test]
	fn tenant_urls_join_without_double_slashes() {
		let mut settings = ProviderSettings::default();
		let acme = TenantSegment::new("acme").expect("Tenant fixture should be valid.");

		settings.hub_url = Url::parse("https://hub.example.com/root/").expect("URL should parse.");

		let url = settings
			.tenant_url(&settings.redirect.sign_in_path, &acme)
			.expect("Expanded template should parse.");

		assert_eq!(url.as_str(), "https://hub.example.com/root/acme/CustomAccountProvider/SignIn");
		assert_eq!(
			settings.tenant_home(&acme).expect("Tenant home should parse.").as_str(),
			"https://hub.example.com/root/acme"
		);
	}

	#[test]
	fn tenant_urls_keep_the_tenant_inside_its_path_segment() {
		let mut settings = ProviderSettings::default();
		let acme = TenantSegment::new("acme").expect("Tenant fixture should be valid.");

		settings.hub_url =
			Url::parse("https://hub.example.com/?stale=1#top").expect("URL should parse.");
		settings.redirect.sign_in_path = "/{tenant}/Sign In/{tenant}#x".into();

		let url = settings
			.tenant_url(&settings.redirect.sign_in_path, &acme)
			.expect("Expanded template should parse.");

		assert_eq!(url.as_str(), "https://hub.example.com/acme/Sign%20In/acme%23x");
		assert_eq!(url.query(), None);
		assert_eq!(url.fragment(), None);
		assert_eq!(
			settings.tenant_home(&acme).expect("Tenant home should parse.").as_str(),
			"https://hub.example.com/acme"
		);
	}
}
