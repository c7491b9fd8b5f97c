//! Double-submit guard for the sign-in form submission.
//!
//! [`AntiForgery::issue`] stores `"{issued_unix}.{secret}"` in an `HttpOnly` + `Secure` +
//! `SameSite=Strict` cookie and returns a form token derived from that value with SHA-256. A
//! submission is accepted only when its form token matches the cookie and the cookie is not
//! older than [`AntiForgerySettings::max_age`].

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use cookie::SameSite;
use rand::Rng;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
// self
use crate::{_prelude::*, config::AntiForgerySettings};

const SECRET_LEN: usize = 32;
const TOKEN_DOMAIN: &[u8] = b"custom-account-provider.antiforgery:";

/// Issues and checks anti-forgery tokens for one cookie/field pair.
#[derive(Clone, Debug)]
pub struct AntiForgery {
	settings: AntiForgerySettings,
}
impl AntiForgery {
	/// Creates a guard bound to `settings`.
	pub fn new(settings: AntiForgerySettings) -> Self {
		Self { settings }
	}

	/// Cookie and form field naming used by this guard.
	pub fn settings(&self) -> &AntiForgerySettings {
		&self.settings
	}

	/// Writes a fresh token cookie into `jar` and returns the matching form token.
	pub fn issue(&self, jar: &mut CookieJar) -> String {
		self.issue_at(jar, OffsetDateTime::now_utc())
	}

	/// Same as [`AntiForgery::issue`] with an explicit issue instant.
	pub fn issue_at(&self, jar: &mut CookieJar, now: OffsetDateTime) -> String {
		let value = format!("{}.{}", now.unix_timestamp(), random_secret());
		let token = derive_form_token(&value);
		let cookie = Cookie::build((self.settings.cookie_name.clone(), value))
			.http_only(true)
			.secure(true)
			.same_site(SameSite::Strict)
			.path("/");

		jar.add(cookie);

		token
	}

	/// Checks `form_token` against the token cookie in `jar`.
	pub fn validate(&self, jar: &CookieJar, form_token: Option<&str>) -> Result<()> {
		self.validate_at(jar, form_token, OffsetDateTime::now_utc())
	}

	/// Same as [`AntiForgery::validate`] with an explicit reference instant.
	pub fn validate_at(
		&self,
		jar: &CookieJar,
		form_token: Option<&str>,
		now: OffsetDateTime,
	) -> Result<()> {
		let cookie = jar
			.get(&self.settings.cookie_name)
			.ok_or_else(|| Error::unauthorized("anti-forgery cookie is missing"))?;
		let form_token = form_token
			.filter(|token| !token.is_empty())
			.ok_or_else(|| Error::unauthorized("anti-forgery form token is missing"))?;
		let issued = cookie
			.value()
			.split_once('.')
			.and_then(|(issued, _)| issued.parse::<i64>().ok())
			.and_then(|issued| OffsetDateTime::from_unix_timestamp(issued).ok())
			.ok_or_else(|| Error::unauthorized("anti-forgery cookie is malformed"))?;
		let age = now - issued;

		if age.is_negative() || age > self.settings.max_age() {
			return Err(Error::unauthorized("anti-forgery token expired"));
		}
		let expected = derive_form_token(cookie.value());

		if !bool::from(expected.as_bytes().ct_eq(form_token.as_bytes())) {
			return Err(Error::unauthorized("anti-forgery token mismatch"));
		}

		Ok(())
	}
}
impl Default for AntiForgery {
	fn default() -> Self {
		Self::new(AntiForgerySettings::default())
	}
}

fn random_secret() -> String {
	let mut secret = [0_u8; SECRET_LEN];

	rand::rng().fill(&mut secret);

	URL_SAFE_NO_PAD.encode(secret)
}

fn derive_form_token(cookie_value: &str) -> String {
	let mut hasher = Sha256::new();

	hasher.update(TOKEN_DOMAIN);
	hasher.update(cookie_value.as_bytes());

	URL_SAFE_NO_PAD.encode(hasher.finalize())
}
