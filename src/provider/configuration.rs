//! Stored configuration of one account provider instance.

// self
use crate::{_prelude::*, auth::AccountProviderId};

/// Protocol family reported to the hub.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum AccountProviderProtocol {
	/// Provider-defined redirect flow.
	#[default]
	Custom,
}

/// Hub-stored settings of a configured provider instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProviderConfiguration {
	/// Instance key.
	pub id: AccountProviderId,
	/// Name shown on the sign-in page.
	pub display_name: String,
	/// Whether the instance may be used to sign in.
	#[serde(default = "enabled")]
	pub log_on_enabled: bool,
	/// Whether the instance may be linked to an existing identity.
	#[serde(default = "enabled")]
	pub link_with_enabled: bool,
	/// Optional absolute image URL overriding the manager default.
	#[serde(default)]
	pub account_provider_image_url: Option<String>,
	/// Protocol family.
	#[serde(default)]
	pub protocol: AccountProviderProtocol,
}
impl AccountProviderConfiguration {
	/// Creates an enabled configuration without a custom image.
	pub fn new(id: AccountProviderId, display_name: impl Into<String>) -> Self {
		Self {
			id,
			display_name: display_name.into(),
			log_on_enabled: true,
			link_with_enabled: true,
			account_provider_image_url: None,
			protocol: AccountProviderProtocol::Custom,
		}
	}

	/// Sets the custom image URL.
	pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
		self.account_provider_image_url = Some(url.into());

		self
	}

	/// Overrides the log-on flag.
	pub fn with_log_on_enabled(mut self, enabled: bool) -> Self {
		self.log_on_enabled = enabled;

		self
	}

	/// Overrides the link-with flag.
	pub fn with_link_with_enabled(mut self, enabled: bool) -> Self {
		self.link_with_enabled = enabled;

		self
	}
}

fn enabled() -> bool {
	true
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn deserializes_with_defaults() {
		let configuration: AccountProviderConfiguration =
			serde_json::from_str(r#"{ "id": 7, "display_name": "Demo" }"#)
				.expect("Minimal configuration should deserialize.");

		let expected = AccountProviderConfiguration::new(AccountProviderId::new(7), "Demo");

		assert_eq!(configuration, expected);
	}
}
