//! The custom account provider: cookie-backed session handoff plus a fixed claim set.

// self
use crate::{
	_prelude::*,
	auth::{AccountProviderId, AccountProviderTypeId, ClaimSet, SessionValue},
	claims::ClaimsIssuer,
	config::ProviderSettings,
	host::{HubRequest, Tenant, TenantDirectory},
	obs::{self, OpKind, OpOutcome, OpSpan},
	provider::{AccountProvider, AccountProviderConfiguration, ProviderFuture},
	redirect::RedirectBuilder,
	session::SessionCookieCodec,
};

/// Account provider that issues claims for the session value stored by its sign-in form.
#[derive(Clone)]
pub struct CustomAccountProvider {
	configuration: AccountProviderConfiguration,
	settings: Arc<ProviderSettings>,
	directory: Arc<dyn TenantDirectory>,
	codec: SessionCookieCodec,
	issuer: ClaimsIssuer,
	redirects: RedirectBuilder,
}
impl CustomAccountProvider {
	/// Whether configurations may override the manager's default image.
	pub const IMAGE_CONFIGURABLE: bool = true;

	/// Creates a provider for `configuration`, resolving tenants through `directory`.
	pub fn new(
		configuration: AccountProviderConfiguration,
		settings: Arc<ProviderSettings>,
		directory: Arc<dyn TenantDirectory>,
	) -> Self {
		let codec = SessionCookieCodec::new(settings.cookie.clone());
		let issuer = ClaimsIssuer::new(settings.claims.clone(), codec.clone());
		let redirects = RedirectBuilder::new(settings.clone());

		Self { configuration, settings, directory, codec, issuer, redirects }
	}

	/// Settings shared with the sign-in controller.
	pub fn settings(&self) -> &ProviderSettings {
		&self.settings
	}

	/// Redirect builder bound to this provider's settings.
	pub fn redirects(&self) -> &RedirectBuilder {
		&self.redirects
	}

	/// Tenant owning this instance, if the hub knows it.
	pub fn tenant(&self) -> Option<Tenant> {
		self.directory.account_provider_tenant(self.configuration.id)
	}

	/// Custom parameters the owning tenant passes to this provider.
	pub fn custom_passed_parameters(&self) -> Option<Vec<String>> {
		self.tenant().and_then(|tenant| self.directory.custom_passed_parameters(tenant.id))
	}

	/// Session value currently stored for this instance.
	pub fn session(&self, request: Option<&HubRequest>) -> Option<SessionValue> {
		self.codec.get(request.map(|request| &request.cookies), self.configuration.id)
	}

	/// Stores the session value established by the sign-in form.
	pub fn store_session(&self, request: Option<&mut HubRequest>, value: &SessionValue) {
		let jar = request.map(|request| &mut request.cookies);

		self.codec.set(jar, self.configuration.id, Some(value));
	}
}
impl AccountProvider for CustomAccountProvider {
	fn account_provider_id(&self) -> AccountProviderId {
		self.configuration.id
	}

	fn account_provider_type_id(&self) -> AccountProviderTypeId {
		AccountProviderTypeId::CUSTOM
	}

	fn configuration(&self) -> &AccountProviderConfiguration {
		&self.configuration
	}

	fn issuer_name(&self) -> String {
		self.issuer.issuer_name(self.configuration.id)
	}

	fn provider_image_url(&self) -> Url {
		self.configuration
			.account_provider_image_url
			.as_deref()
			.filter(|raw| Self::IMAGE_CONFIGURABLE && !raw.is_empty())
			.and_then(|raw| Url::parse(raw).ok())
			.unwrap_or_else(|| self.settings.default_image_url.clone())
	}

	fn list_claims<'a>(
		&'a self,
		request: Option<&'a HubRequest>,
		state: Option<&'a str>,
	) -> ProviderFuture<'a, ClaimSet> {
		const KIND: OpKind = OpKind::ListClaims;

		let span = OpSpan::new(KIND, "list_claims");

		obs::record_op_outcome(KIND, OpOutcome::Attempt);

		Box::pin(async move {
			let result = span
				.instrument(async move {
					if state.is_none_or(str::is_empty) {
						return Err(Error::InvalidArgument { name: "state" });
					}

					let request = request.ok_or(Error::InvalidArgument { name: "request" })?;

					if self.tenant().is_none() {
						return Err(Error::unauthorized(format!(
							"provider {} is not registered with any tenant",
							self.configuration.id
						)));
					}

					self.issuer.issue_claims(&self.configuration, Some(&request.cookies))
				})
				.await;

			obs::record_result(KIND, &result);

			result
		})
	}

	fn sign_in_url<'a>(
		&'a self,
		request: &'a HubRequest,
		return_url: Option<&'a Url>,
		state: Option<&'a str>,
	) -> ProviderFuture<'a, Url> {
		const KIND: OpKind = OpKind::SignInUrl;

		let span = OpSpan::new(KIND, "sign_in_url");

		obs::record_op_outcome(KIND, OpOutcome::Attempt);

		Box::pin(async move {
			let result = span
				.instrument(async move {
					self.redirects.sign_in_url(&request.tenant, return_url, state)
				})
				.await;

			obs::record_result(KIND, &result);

			result
		})
	}

	fn sign_out_url(&self, request: &HubRequest, return_url: Option<&Url>) -> Result<Url> {
		const KIND: OpKind = OpKind::SignOutUrl;

		let _span = OpSpan::new(KIND, "sign_out_url").entered();

		obs::record_op_outcome(KIND, OpOutcome::Attempt);

		let result = self.redirects.sign_out_url(&request.tenant, return_url);

		obs::record_result(KIND, &result);

		result
	}

	fn process_log_on<'a>(&'a self, _request: &'a mut HubRequest) -> ProviderFuture<'a, ClaimSet> {
		Box::pin(async { Err::<ClaimSet, _>(Error::Unsupported { operation: "process_log_on" }) })
	}

	fn process_sign_in_complete(&self, _request: &HubRequest, _state: &str) {}

	fn process_sign_out(&self, request: Option<&mut HubRequest>) {
		const KIND: OpKind = OpKind::SignOut;

		let _span = OpSpan::new(KIND, "process_sign_out").entered();

		obs::record_op_outcome(KIND, OpOutcome::Attempt);
		self.codec.clear(request.map(|request| &mut request.cookies), self.configuration.id);
		obs::record_op_outcome(KIND, OpOutcome::Success);
	}
}
impl Debug for CustomAccountProvider {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CustomAccountProvider")
			.field("configuration", &self.configuration)
			.field("hub_url", &self.settings.hub_url.as_str())
			.finish()
	}
}
