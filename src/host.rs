//! Host-side request context and tenant directory contracts.
//!
//! The hub owns tenants, routing, and the HTTP pipeline. The provider only sees the pieces it
//! needs: the tenant segment the request was routed under, the request's cookies (whose delta
//! becomes the response's `Set-Cookie` headers), and a [`TenantDirectory`] to map provider
//! instances back to tenants.

pub mod memory;

pub use memory::*;

// self
use crate::{
	_prelude::*,
	auth::{AccountProviderId, TenantId, TenantSegment},
};

/// One inbound request/outgoing response pair as seen by the provider.
#[derive(Clone, Debug)]
pub struct HubRequest {
	/// Tenant segment the request was routed under.
	pub tenant: TenantSegment,
	/// Request cookies; additions and removals form the response delta.
	pub cookies: CookieJar,
}
impl HubRequest {
	/// Creates a request without cookies.
	pub fn new(tenant: TenantSegment) -> Self {
		Self { tenant, cookies: CookieJar::new() }
	}

	/// Creates a request from a raw `Cookie` header. Malformed pairs are skipped.
	pub fn from_cookie_header(tenant: TenantSegment, header: &str) -> Self {
		let mut request = Self::new(tenant);

		for cookie in Cookie::split_parse(header).filter_map(|cookie| cookie.ok()) {
			request.cookies.add_original(cookie.into_owned());
		}

		request
	}

	/// Renders the `Set-Cookie` header values produced while handling the request.
	pub fn set_cookie_headers(&self) -> Vec<String> {
		self.cookies.delta().map(|cookie| cookie.to_string()).collect()
	}
}

/// Tenant that owns a provider instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
	/// Numeric tenant key.
	pub id: TenantId,
	/// URL segment the tenant is routed under.
	pub url_segment: TenantSegment,
}

/// Tenant lookups the provider delegates to the hub.
pub trait TenantDirectory
where
	Self: Send + Sync,
{
	/// Resolves the tenant that owns provider `id`.
	fn account_provider_tenant(&self, id: AccountProviderId) -> Option<Tenant>;

	/// Returns the custom parameters the tenant passes to this provider type, if any.
	fn custom_passed_parameters(&self, tenant: TenantId) -> Option<Vec<String>>;
}
