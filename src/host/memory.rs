//! Thread-safe in-memory host collaborators for local development and tests.

// self
use crate::{
	_prelude::*,
	auth::{AccountProviderId, TenantId, TenantSegment},
	controller::ProviderResolver,
	host::{HubRequest, Tenant, TenantDirectory},
	provider::CustomAccountProvider,
};

type ProviderMap = Arc<RwLock<HashMap<AccountProviderId, Tenant>>>;
type ParameterMap = Arc<RwLock<HashMap<TenantId, Vec<String>>>>;
type SlotMap = Arc<RwLock<HashMap<TenantSegment, Arc<CustomAccountProvider>>>>;

/// In-process [`TenantDirectory`] keeping provider registrations and tenant parameters.
#[derive(Clone, Debug, Default)]
pub struct MemoryHost {
	providers: ProviderMap,
	parameters: ParameterMap,
}
impl MemoryHost {
	/// Registers provider `id` as owned by the tenant `tenant_id` routed under `url_segment`.
	///
	/// Re-registering an id replaces its tenant.
	pub fn register_provider(
		&self,
		id: AccountProviderId,
		tenant_id: TenantId,
		url_segment: TenantSegment,
	) {
		self.providers.write().insert(id, Tenant { id: tenant_id, url_segment });
	}

	/// Removes provider `id`; returns the tenant it belonged to.
	pub fn unregister_provider(&self, id: AccountProviderId) -> Option<Tenant> {
		self.providers.write().remove(&id)
	}

	/// Sets the custom parameters `tenant` passes to the provider.
	pub fn set_custom_parameters(&self, tenant: TenantId, parameters: Vec<String>) {
		self.parameters.write().insert(tenant, parameters);
	}
}
impl TenantDirectory for MemoryHost {
	fn account_provider_tenant(&self, id: AccountProviderId) -> Option<Tenant> {
		self.providers.read().get(&id).cloned()
	}

	fn custom_passed_parameters(&self, tenant: TenantId) -> Option<Vec<String>> {
		self.parameters.read().get(&tenant).cloned()
	}
}

/// In-process [`ProviderResolver`] keyed by the tenant segment of the request.
#[derive(Clone, Debug, Default)]
pub struct MemoryProviderResolver {
	sign_in: SlotMap,
	link_account: SlotMap,
}
impl MemoryProviderResolver {
	/// Sets the provider the subject is currently signing in with under `tenant`.
	pub fn set_sign_in_provider(
		&self,
		tenant: TenantSegment,
		provider: Arc<CustomAccountProvider>,
	) {
		self.sign_in.write().insert(tenant, provider);
	}

	/// Sets the provider the subject is currently linking under `tenant`.
	pub fn set_link_account_provider(
		&self,
		tenant: TenantSegment,
		provider: Arc<CustomAccountProvider>,
	) {
		self.link_account.write().insert(tenant, provider);
	}

	/// Forgets both pending providers of `tenant`.
	pub fn clear(&self, tenant: &str) {
		self.sign_in.write().remove(tenant);
		self.link_account.write().remove(tenant);
	}
}
impl ProviderResolver for MemoryProviderResolver {
	fn account_provider(&self, request: &HubRequest) -> Option<Arc<CustomAccountProvider>> {
		self.sign_in.read().get(&request.tenant).cloned()
	}

	fn link_account_account_provider(
		&self,
		request: &HubRequest,
	) -> Option<Arc<CustomAccountProvider>> {
		self.link_account.read().get(&request.tenant).cloned()
	}
}
