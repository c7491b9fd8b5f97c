//! Discovery entry point handing the hub a [`CustomAccountProviderManager`].

// self
use crate::{
	_prelude::*,
	auth::AccountProviderTypeId,
	config::ProviderSettings,
	host::TenantDirectory,
	provider::{AccountProviderManager, AccountProviderManagerFactory, CustomAccountProviderManager},
};

/// Factory the hub registers for [`AccountProviderTypeId::CUSTOM`].
#[derive(Clone)]
pub struct CustomAccountProviderManagerFactory {
	settings: Arc<ProviderSettings>,
	directory: Arc<dyn TenantDirectory>,
}
impl CustomAccountProviderManagerFactory {
	/// Creates a factory whose managers share `settings` and `directory`.
	pub fn new(settings: Arc<ProviderSettings>, directory: Arc<dyn TenantDirectory>) -> Self {
		Self { settings, directory }
	}
}
impl AccountProviderManagerFactory for CustomAccountProviderManagerFactory {
	fn account_provider_type_id(&self) -> AccountProviderTypeId {
		AccountProviderTypeId::CUSTOM
	}

	fn account_provider_manager(&self) -> Arc<dyn AccountProviderManager> {
		Arc::new(CustomAccountProviderManager::new(self.settings.clone(), self.directory.clone()))
	}
}
impl Debug for CustomAccountProviderManagerFactory {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CustomAccountProviderManagerFactory")
			.field("type_id", &AccountProviderTypeId::CUSTOM)
			.finish()
	}
}
