//! Host-facing account provider contracts (traits) and the custom provider implementing them.
//!
//! The hub discovers providers through an [`AccountProviderManagerFactory`], asks the factory
//! for an [`AccountProviderManager`], and uses the manager to validate configurations and
//! materialize one [`AccountProvider`] per configured instance. Claims listing and sign-in
//! redirects are exposed as boxed futures because the hub awaits them; both complete without
//! suspending.

pub mod configuration;
pub mod custom;
pub mod factory;
pub mod manager;

pub use configuration::*;
pub use custom::*;
pub use factory::*;
pub use manager::*;

// self
use crate::{
	_prelude::*,
	auth::{AccountProviderId, AccountProviderTypeId, Claim, ClaimSet, ClaimType, TenantSegment},
	host::HubRequest,
};

/// Boxed future returned by the awaitable [`AccountProvider`] operations.
pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// One configured account provider instance as seen by the hub.
pub trait AccountProvider
where
	Self: Send + Sync,
{
	/// Configured instance key.
	fn account_provider_id(&self) -> AccountProviderId;

	/// Provider type GUID.
	fn account_provider_type_id(&self) -> AccountProviderTypeId;

	/// Stored configuration backing this instance.
	fn configuration(&self) -> &AccountProviderConfiguration;

	/// Name shown on the hub's sign-in page.
	fn display_name(&self) -> &str {
		&self.configuration().display_name
	}

	/// Issuer name attached to every claim this instance issues.
	fn issuer_name(&self) -> String;

	/// Image shown next to the display name.
	fn provider_image_url(&self) -> Url;

	/// Whether the instance may be used to sign in.
	fn log_on_enabled(&self) -> bool {
		self.configuration().log_on_enabled
	}

	/// Whether the instance may be linked to an existing identity.
	fn link_with_enabled(&self) -> bool {
		self.configuration().link_with_enabled
	}

	/// Whether the hub shows the display name even when an image is available.
	fn always_show_display_name(&self) -> bool {
		false
	}

	/// Whether identities from this provider may edit their profile in the hub.
	fn identity_can_edit_information(&self) -> bool {
		false
	}

	/// Whether the provider can list the subject's friends.
	fn supports_friends(&self) -> bool {
		false
	}

	/// Whether the hub should redirect through [`AccountProvider::sign_out_url`].
	fn supports_sign_out(&self) -> bool {
		false
	}

	/// Profile page of a subject, if the provider has one.
	fn profile_url(&self, _name: &Claim, _private_personal_identifier: &Claim) -> Option<Url> {
		None
	}

	/// Lists the claims for the session carried by `request`.
	///
	/// `state` is the opaque hub state that accompanied the sign-in; both arguments are required.
	fn list_claims<'a>(
		&'a self,
		request: Option<&'a HubRequest>,
		state: Option<&'a str>,
	) -> ProviderFuture<'a, ClaimSet>;

	/// Builds the URL the hub redirects to for interactive sign-in.
	fn sign_in_url<'a>(
		&'a self,
		request: &'a HubRequest,
		return_url: Option<&'a Url>,
		state: Option<&'a str>,
	) -> ProviderFuture<'a, Url>;

	/// Builds the URL the hub redirects to for sign-out.
	fn sign_out_url(&self, request: &HubRequest, return_url: Option<&Url>) -> Result<Url>;

	/// Host-driven log-on processing; providers using their own redirect flow reject it.
	fn process_log_on<'a>(&'a self, request: &'a mut HubRequest) -> ProviderFuture<'a, ClaimSet>;

	/// Hook invoked once the hub finished the sign-in round trip.
	fn process_sign_in_complete(&self, request: &HubRequest, state: &str);

	/// Hook invoked when the subject signs out of the hub.
	fn process_sign_out(&self, request: Option<&mut HubRequest>);
}

/// Per-type manager the hub uses to describe, validate, and instantiate providers.
pub trait AccountProviderManager
where
	Self: Send + Sync,
{
	/// Provider type GUID.
	fn account_provider_type_id(&self) -> AccountProviderTypeId;

	/// Type-level display name used in the hub's administration pages.
	fn account_provider_display_name(&self) -> &str;

	/// Image used when a configuration does not set its own.
	fn account_provider_default_image_url(&self) -> &Url;

	/// Whether configurations may override the image.
	fn account_provider_image_configurable(&self) -> bool;

	/// Whether configurations may override the display name.
	fn display_name_configurable(&self) -> bool;

	/// Whether a tenant may configure at most one instance of this type.
	fn account_provider_is_unique(&self) -> bool;

	/// Protocol family of the provider type.
	fn account_provider_protocol(&self) -> AccountProviderProtocol;

	/// Claim types instances of this type issue.
	fn provided_claim_types(&self) -> Vec<ClaimType> {
		ClaimType::ALL.to_vec()
	}

	/// Validates a configuration about to be created; returns the list of problems.
	fn validate_create_configuration(
		&self,
		configuration: &AccountProviderConfiguration,
		tenant: &TenantSegment,
	) -> Vec<String>;

	/// Validates a configuration update; returns the list of problems.
	fn validate_update_configuration(
		&self,
		current: &AccountProviderConfiguration,
		updated: &AccountProviderConfiguration,
	) -> Vec<String>;

	/// Validates a configuration about to be deleted; returns the list of problems.
	fn validate_delete_configuration(
		&self,
		configuration: &AccountProviderConfiguration,
	) -> Vec<String>;

	/// Rewrites stored configuration after a tenant segment rename.
	fn update_configuration_tenant_url_segment(
		&self,
		configuration: AccountProviderConfiguration,
		_current: &TenantSegment,
		_renamed: &TenantSegment,
	) -> AccountProviderConfiguration {
		configuration
	}

	/// Materializes the provider instance for a stored configuration.
	fn account_provider(
		&self,
		configuration: AccountProviderConfiguration,
	) -> Result<Arc<dyn AccountProvider>>;
}

/// Entry point the hub discovers to obtain a provider type's manager.
pub trait AccountProviderManagerFactory
where
	Self: Send + Sync,
{
	/// Provider type GUID served by this factory.
	fn account_provider_type_id(&self) -> AccountProviderTypeId;

	/// Creates the manager for the provider type.
	fn account_provider_manager(&self) -> Arc<dyn AccountProviderManager>;
}
