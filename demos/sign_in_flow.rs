//! Walks one subject through the interactive sign-in form: GET renders the form, POST stores
//! the session value in the shared cookie and redirects back to the hub.

// std
use std::sync::Arc;
// crates.io
use color_eyre::{Result, eyre::eyre};
// self
use custom_account_provider::{
	auth::{AccountProviderId, TenantId, TenantSegment},
	config::ProviderSettings,
	controller::{ActionResult, SignInController, SignInForm, SignInQuery},
	host::{HubRequest, MemoryHost, MemoryProviderResolver},
	provider::{AccountProvider, AccountProviderConfiguration, CustomAccountProvider},
	url::Url,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let settings = Arc::new(ProviderSettings::from_json_str(
		r#"{ "hub_url": "https://hub.example.com" }"#,
	)?);
	let tenant = TenantSegment::new("acme")?;
	let host = Arc::new(MemoryHost::default());
	let resolver = Arc::new(MemoryProviderResolver::default());
	let id = AccountProviderId::new(7);

	host.register_provider(id, TenantId::new(1), tenant.clone());
	host.set_custom_parameters(TenantId::new(1), vec!["welcome-banner".into()]);

	let provider = Arc::new(CustomAccountProvider::new(
		AccountProviderConfiguration::new(id, "Demo"),
		settings.clone(),
		host,
	));

	resolver.set_sign_in_provider(tenant.clone(), provider.clone());

	let controller = SignInController::new(settings, resolver);
	let mut hub_request = HubRequest::new(tenant.clone());
	let return_url = Url::parse("https://app.example.com/signed-in")?;
	let sign_in_url =
		provider.sign_in_url(&hub_request, Some(&return_url), Some("b3BhcXVlLXN0YXRl")).await?;

	println!("Hub redirects the browser to {sign_in_url}.");

	let query = SignInQuery::from_query_str(sign_in_url.query().unwrap_or_default());
	let ActionResult::View(model) = controller.sign_in(&mut hub_request, query)? else {
		return Err(eyre!("Sign-in form did not render."));
	};

	println!("Rendered form: {model:?}");

	let cookie_header = hub_request
		.set_cookie_headers()
		.iter()
		.filter_map(|line| line.split(';').next())
		.collect::<Vec<_>>()
		.join("; ");
	let mut post = HubRequest::from_cookie_header(tenant, &cookie_header);
	let form = SignInForm {
		user_name: Some("alice".into()),
		password: Some("correct horse battery staple".into()),
		return_url: Some(model.return_url.clone()),
		state: Some(model.state.clone()),
		custom_parameter: Some(model.custom_parameter.clone()),
		request_verification_token: Some(model.anti_forgery_token.clone()),
	};

	match controller.sign_in_post(&mut post, form).await? {
		ActionResult::Redirect(url) => println!("Signed in; redirecting to {url}."),
		other => return Err(eyre!("Unexpected sign-in outcome: {other:?}.")),
	}

	for header in post.set_cookie_headers() {
		println!("Set-Cookie: {header}");
	}

	Ok(())
}
