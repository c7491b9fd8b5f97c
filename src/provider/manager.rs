//! Type-level manager for [`CustomAccountProvider`] instances.

// self
use crate::{
	_prelude::*,
	auth::{AccountProviderTypeId, TenantSegment},
	config::ProviderSettings,
	host::TenantDirectory,
	provider::{
		AccountProvider, AccountProviderConfiguration, AccountProviderManager,
		AccountProviderProtocol, CustomAccountProvider,
	},
};

/// Describes the custom provider type to the hub and materializes its instances.
#[derive(Clone)]
pub struct CustomAccountProviderManager {
	settings: Arc<ProviderSettings>,
	directory: Arc<dyn TenantDirectory>,
}
impl CustomAccountProviderManager {
	/// Type-level display name.
	pub const DISPLAY_NAME: &'static str = "CustomAccountProvider";

	/// Creates a manager sharing `settings` and `directory` with every instance it creates.
	pub fn new(settings: Arc<ProviderSettings>, directory: Arc<dyn TenantDirectory>) -> Self {
		Self { settings, directory }
	}

	fn validate_configuration(&self, configuration: &AccountProviderConfiguration) -> Vec<String> {
		let mut problems = Vec::new();

		if configuration.display_name.trim().is_empty() {
			problems.push("Display name cannot be empty.".to_owned());
		}
		if let Some(raw) = configuration.account_provider_image_url.as_deref() {
			match Url::parse(raw) {
				Ok(url) if url.scheme() == "https" => {},
				Ok(_) => problems.push(format!("Image URL must use HTTPS: {raw}.")),
				Err(_) => problems.push(format!("Image URL is not an absolute URL: {raw}.")),
			}
		}

		problems
	}
}
impl AccountProviderManager for CustomAccountProviderManager {
	fn account_provider_type_id(&self) -> AccountProviderTypeId {
		AccountProviderTypeId::CUSTOM
	}

	fn account_provider_display_name(&self) -> &str {
		Self::DISPLAY_NAME
	}

	fn account_provider_default_image_url(&self) -> &Url {
		&self.settings.default_image_url
	}

	fn account_provider_image_configurable(&self) -> bool {
		CustomAccountProvider::IMAGE_CONFIGURABLE
	}

	fn display_name_configurable(&self) -> bool {
		true
	}

	fn account_provider_is_unique(&self) -> bool {
		true
	}

	fn account_provider_protocol(&self) -> AccountProviderProtocol {
		AccountProviderProtocol::Custom
	}

	fn validate_create_configuration(
		&self,
		configuration: &AccountProviderConfiguration,
		_tenant: &TenantSegment,
	) -> Vec<String> {
		self.validate_configuration(configuration)
	}

	fn validate_update_configuration(
		&self,
		current: &AccountProviderConfiguration,
		updated: &AccountProviderConfiguration,
	) -> Vec<String> {
		let mut problems = self.validate_configuration(updated);

		if current.id != updated.id {
			problems.push(format!(
				"Provider id cannot change from {} to {}.",
				current.id, updated.id
			));
		}

		problems
	}

	fn validate_delete_configuration(
		&self,
		_configuration: &AccountProviderConfiguration,
	) -> Vec<String> {
		Vec::new()
	}

	fn account_provider(
		&self,
		configuration: AccountProviderConfiguration,
	) -> Result<Arc<dyn AccountProvider>> {
		Ok(Arc::new(CustomAccountProvider::new(
			configuration,
			self.settings.clone(),
			self.directory.clone(),
		)))
	}
}
impl Debug for CustomAccountProviderManager {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CustomAccountProviderManager")
			.field("hub_url", &self.settings.hub_url.as_str())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		_preludet::*,
		auth::{AccountProviderId, ClaimType, TenantId},
		host::MemoryHost,
	};

	fn manager() -> CustomAccountProviderManager {
		CustomAccountProviderManager::new(
			Arc::new(test_settings()),
			Arc::new(MemoryHost::default()),
		)
	}

	fn configuration(raw: i32) -> AccountProviderConfiguration {
		AccountProviderConfiguration::new(AccountProviderId::new(raw), "Demo")
	}

	fn tenant() -> TenantSegment {
		TenantSegment::new(TEST_TENANT).expect("Tenant fixture should be valid.")
	}

	#[test]
	fn describes_the_provider_type() {
		let manager = manager();

		assert_eq!(manager.account_provider_type_id(), AccountProviderTypeId::CUSTOM);
		assert_eq!(manager.account_provider_display_name(), "CustomAccountProvider");
		assert_eq!(
			manager.account_provider_default_image_url().as_str(),
			"https://www.theidentityhub.com/content/images/u2uconsult.jpg"
		);
		assert!(manager.account_provider_image_configurable());
		assert!(manager.display_name_configurable());
		assert!(manager.account_provider_is_unique());
		assert_eq!(manager.account_provider_protocol(), AccountProviderProtocol::Custom);
		assert_eq!(manager.provided_claim_types(), ClaimType::ALL.to_vec());
	}

	#[test]
	fn create_validation_reports_every_problem() {
		let manager = manager();

		assert!(manager.validate_create_configuration(&configuration(7), &tenant()).is_empty());

		let mut broken = configuration(7).with_image_url("http://cdn.example.com/logo.png");

		broken.display_name = "  ".into();

		let problems = manager.validate_create_configuration(&broken, &tenant());

		assert_eq!(problems.len(), 2);
		assert!(problems[0].contains("Display name"));
		assert!(problems[1].contains("HTTPS"));

		let relative = configuration(7).with_image_url("logo.png");

		assert_eq!(manager.validate_create_configuration(&relative, &tenant()).len(), 1);
	}

	#[test]
	fn update_validation_pins_the_id() {
		let manager = manager();
		let current = configuration(7);
		let renamed =
			AccountProviderConfiguration { display_name: "Renamed".into(), ..current.clone() };

		assert!(manager.validate_update_configuration(&current, &renamed).is_empty());

		let problems = manager.validate_update_configuration(&current, &configuration(8));

		assert_eq!(problems, vec!["Provider id cannot change from 7 to 8.".to_owned()]);
		assert!(manager.validate_delete_configuration(&current).is_empty());
	}

	#[test]
	fn tenant_rename_keeps_configuration() {
		let manager = manager();
		let renamed = TenantSegment::new("globex").expect("Tenant fixture should be valid.");
		let kept =
			manager.update_configuration_tenant_url_segment(configuration(7), &tenant(), &renamed);

		assert_eq!(kept, configuration(7));
	}

	#[tokio::test]
	async fn materializes_custom_providers() {
		let host = Arc::new(MemoryHost::default());

		host.register_provider(AccountProviderId::new(7), TenantId::new(1), tenant());

		let manager = CustomAccountProviderManager::new(Arc::new(test_settings()), host);
		let provider =
			manager.account_provider(configuration(7)).expect("Provider should be materialized.");
		let claims = provider
			.list_claims(Some(&test_request()), Some("state"))
			.await
			.expect("Materialized provider should list claims.");

		assert_eq!(provider.account_provider_id(), AccountProviderId::new(7));
		assert_eq!(claims.issuer(), Some("uri:customaccountprovider:1721830150"));
	}
}
