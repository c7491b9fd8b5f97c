//! Demonstration account provider for identity federation hubs: cookie-backed session handoff,
//! fixed claim issuance, and validated sign-in redirects behind host-agnostic traits.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod antiforgery;
pub mod auth;
pub mod claims;
pub mod config;
pub mod controller;
pub mod encoding;
pub mod error;
pub mod host;
pub mod obs;
pub mod provider;
pub mod redirect;
pub mod session;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for unit tests; enabled via `cfg(test)` or the `test`
	//! crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::{AccountProviderId, TenantId, TenantSegment},
		config::ProviderSettings,
		host::{HubRequest, MemoryHost},
		provider::{AccountProviderConfiguration, CustomAccountProvider},
	};

	/// Tenant segment shared by fixtures.
	pub const TEST_TENANT: &str = "acme";

	/// Builds a request bound to [`TEST_TENANT`] with an empty cookie jar.
	pub fn test_request() -> HubRequest {
		HubRequest::new(
			TenantSegment::new(TEST_TENANT).expect("Test tenant segment should be valid."),
		)
	}

	/// Builds settings pointing at a fixed HTTPS hub URL.
	pub fn test_settings() -> ProviderSettings {
		let mut settings = ProviderSettings::default();

		settings.hub_url =
			Url::parse("https://hub.example.com").expect("Test hub URL should parse.");

		settings
	}

	/// Constructs a provider for `id` registered under [`TEST_TENANT`] in a fresh [`MemoryHost`].
	pub fn build_test_provider(id: i32) -> (CustomAccountProvider, Arc<MemoryHost>) {
		let host = Arc::new(MemoryHost::default());
		let provider_id = AccountProviderId::new(id);

		host.register_provider(
			provider_id,
			TenantId::new(1),
			TenantSegment::new(TEST_TENANT).expect("Test tenant segment should be valid."),
		);

		let provider = CustomAccountProvider::new(
			AccountProviderConfiguration::new(provider_id, "Demo"),
			Arc::new(test_settings()),
			host.clone(),
		);

		(provider, host)
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use cookie::{Cookie, CookieJar};
	pub use parking_lot::RwLock;
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use cookie;
pub use url;
#[cfg(test)] use color_eyre as _;
