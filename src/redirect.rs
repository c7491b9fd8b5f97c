//! Sign-in/sign-out redirect construction and return-URL acceptance policy.

// self
use crate::{_prelude::*, auth::TenantSegment, config::ProviderSettings, encoding};

/// Acceptance policy applied to caller-supplied return URLs before they are trusted.
///
/// [`ReturnUrlPolicy::Permissive`] accepts any absolute `http`/`https` URL with a host and is
/// only suitable for demos; production tenants should list the hosts they own.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "hosts", rename_all = "snake_case")]
pub enum ReturnUrlPolicy {
	/// Any absolute `http`/`https` URL with a host.
	#[default]
	Permissive,
	/// Absolute `http`/`https` URLs whose host matches an entry. Entries starting with `.`
	/// match subdomains; all other entries match the host exactly (case-insensitive).
	AllowList(Vec<String>),
}
impl ReturnUrlPolicy {
	/// Returns `true` when `url` may be used as a redirect target.
	pub fn permits(&self, url: &Url) -> bool {
		if !matches!(url.scheme(), "http" | "https") {
			return false;
		}

		let Some(host) = url.host_str().filter(|host| !host.is_empty()) else {
			return false;
		};

		match self {
			ReturnUrlPolicy::Permissive => true,
			ReturnUrlPolicy::AllowList(entries) => {
				let host = host.to_ascii_lowercase();

				entries.iter().any(|entry| {
					let entry = entry.to_ascii_lowercase();

					if entry.starts_with('.') { host.ends_with(&entry) } else { host == entry }
				})
			},
		}
	}
}

/// Builds hub redirect URLs for the interactive sign-in and sign-out pages.
#[derive(Clone, Debug)]
pub struct RedirectBuilder {
	settings: Arc<ProviderSettings>,
}
impl RedirectBuilder {
	/// Creates a builder that reads hub URL templates from `settings`.
	pub fn new(settings: Arc<ProviderSettings>) -> Self {
		Self { settings }
	}

	/// Applies the configured [`ReturnUrlPolicy`].
	pub fn validate_return_url(&self, url: &Url) -> bool {
		self.settings.redirect.return_url_policy.permits(url)
	}

	/// Builds `{hub}/{tenant}/…/SignIn?returnUrl=…&state=…`.
	///
	/// The return URL is form-encoded and the state is re-encoded with the Base64Url transform.
	/// Missing arguments are rejected before the return URL is validated.
	pub fn sign_in_url(
		&self,
		tenant: &TenantSegment,
		return_url: Option<&Url>,
		state: Option<&str>,
	) -> Result<Url> {
		let return_url = return_url.ok_or(Error::InvalidArgument { name: "return_url" })?;
		let state = state
			.filter(|state| !state.is_empty())
			.ok_or(Error::InvalidArgument { name: "state" })?;

		self.ensure_acceptable(return_url)?;

		let mut url = self.settings.tenant_url(&self.settings.redirect.sign_in_path, tenant)?;

		url.query_pairs_mut()
			.append_pair("returnUrl", return_url.as_str())
			.append_pair("state", &encoding::base64_to_base64_url(state));

		Ok(url)
	}

	/// Builds `{hub}/{tenant}/…/SignOut`, appending `returnUrl` when provided.
	///
	/// Return URLs go through the same policy as sign-in.
	pub fn sign_out_url(&self, tenant: &TenantSegment, return_url: Option<&Url>) -> Result<Url> {
		let mut url = self.settings.tenant_url(&self.settings.redirect.sign_out_path, tenant)?;

		if let Some(return_url) = return_url {
			self.ensure_acceptable(return_url)?;

			url.query_pairs_mut().append_pair("returnUrl", return_url.as_str());
		}

		Ok(url)
	}

	fn ensure_acceptable(&self, url: &Url) -> Result<()> {
		if self.validate_return_url(url) {
			Ok(())
		} else {
			Err(Error::InvalidReturnTarget { url: url.to_string() })
		}
	}
}
