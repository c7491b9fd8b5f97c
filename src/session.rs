//! Session handoff cookie: one shared cookie holding a session value per provider instance.
//!
//! The cookie value is a [`CookieDictionary`] whose sub-keys are
//! `key_prefix + obfuscated(provider id)`. Each sub-value is empty or a session value mapped
//! into the Base64Url alphabet. Every operation takes the request's [`CookieJar`] explicitly.
//! Passing `None` models a call made outside of any request, which is a silent no-op that reads
//! as absence.

pub mod dictionary;

pub use dictionary::*;

// self
use crate::{
	_prelude::*,
	auth::{AccountProviderId, SessionValue},
	config::CookieSettings,
	encoding, obs,
};

/// Reads and writes per-provider session values inside the shared session cookie.
#[derive(Clone, Debug)]
pub struct SessionCookieCodec {
	settings: CookieSettings,
}
impl SessionCookieCodec {
	/// Creates a codec bound to the provided cookie naming.
	pub fn new(settings: CookieSettings) -> Self {
		Self { settings }
	}

	/// Cookie naming used by this codec.
	pub fn settings(&self) -> &CookieSettings {
		&self.settings
	}

	/// Dictionary sub-key owned by `id`.
	pub fn key_for(&self, id: AccountProviderId) -> String {
		format!("{}{}", self.settings.key_prefix, id.obfuscated())
	}

	/// Returns the session value stored for `id`, if any.
	///
	/// A missing cookie, a missing sub-key, and an empty sub-value all read as absent.
	pub fn get(&self, jar: Option<&CookieJar>, id: AccountProviderId) -> Option<SessionValue> {
		let Some(jar) = jar else {
			obs::report_missing_context("get");

			return None;
		};
		let cookie = jar.get(&self.settings.name)?;
		let values = CookieDictionary::parse(cookie.value());
		let stored = values.get(&self.key_for(id)).filter(|value| !value.is_empty())?;

		Some(SessionValue::new(encoding::base64_url_to_base64(stored)))
	}

	/// Stores `value` for `id`; `None` or an empty value writes the empty marker.
	///
	/// The cookie is (re)issued as `HttpOnly` + `Secure` with no expiry, and always lands in the
	/// jar's delta so it is sent back with the response.
	pub fn set(
		&self,
		jar: Option<&mut CookieJar>,
		id: AccountProviderId,
		value: Option<&SessionValue>,
	) {
		let Some(jar) = jar else {
			obs::report_missing_context("set");

			return;
		};
		let mut values = jar
			.get(&self.settings.name)
			.map(|cookie| CookieDictionary::parse(cookie.value()))
			.unwrap_or_default();
		let stored = match value {
			Some(value) if !value.is_empty() => encoding::base64_to_base64_url(value.expose()),
			_ => String::new(),
		};

		values.insert(self.key_for(id), stored);

		let cookie = Cookie::build((self.settings.name.clone(), values.to_string()))
			.http_only(true)
			.secure(true)
			.path("/");

		jar.add(cookie);
	}

	/// Clears the session value for `id`.
	pub fn clear(&self, jar: Option<&mut CookieJar>, id: AccountProviderId) {
		self.set(jar, id, None);
	}
}
impl Default for SessionCookieCodec {
	fn default() -> Self {
		Self::new(CookieSettings::default())
	}
}
