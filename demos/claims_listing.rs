//! Lists the claims the hub receives for a stored session, then signs the subject out.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
// self
use custom_account_provider::{
	auth::{AccountProviderId, ClaimType, SessionValue, TenantId, TenantSegment},
	config::ProviderSettings,
	host::{HubRequest, MemoryHost},
	provider::{
		AccountProvider, AccountProviderConfiguration, AccountProviderManagerFactory,
		CustomAccountProviderManagerFactory,
	},
	session::SessionCookieCodec,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let settings = Arc::new(ProviderSettings::from_json_str(
		r#"{ "hub_url": "https://hub.example.com" }"#,
	)?);
	let tenant = TenantSegment::new("acme")?;
	let host = Arc::new(MemoryHost::default());
	let id = AccountProviderId::new(7);

	host.register_provider(id, TenantId::new(1), tenant.clone());

	let codec = SessionCookieCodec::new(settings.cookie.clone());
	let factory = CustomAccountProviderManagerFactory::new(settings, host);
	let manager = factory.account_provider_manager();
	let provider = manager.account_provider(AccountProviderConfiguration::new(id, "Demo"))?;
	let mut request = HubRequest::new(tenant);

	// Stands in for the cookie the sign-in form leaves behind.
	codec.set(Some(&mut request.cookies), id, Some(&SessionValue::new("124578895613")));

	let claims = provider.list_claims(Some(&request), Some("hub-state")).await?;

	println!("Issuer: {}", provider.issuer_name());

	for claim in claims.iter() {
		println!("{} = {:?}", claim.claim_type.uri(), claim.value);
	}

	provider.process_sign_out(Some(&mut request));

	let claims = provider.list_claims(Some(&request), Some("hub-state")).await?;

	println!("After sign-out the name claim is {:?}.", claims.value_of(ClaimType::Name));

	Ok(())
}
