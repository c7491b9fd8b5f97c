// std
use std::sync::Arc;
// self
use custom_account_provider::{
	auth::{AccountProviderId, ClaimType, TenantId, TenantSegment},
	config::ProviderSettings,
	controller::{ActionResult, SignInController, SignInForm, SignInQuery, SignInViewModel},
	host::{HubRequest, MemoryHost, MemoryProviderResolver},
	provider::{AccountProvider, AccountProviderConfiguration, CustomAccountProvider},
};

const TENANT: &str = "acme";
const RETURN_URL: &str = "https://app.example.com/signed-in";

struct Hub {
	controller: SignInController,
	provider: Arc<CustomAccountProvider>,
}

fn segment() -> TenantSegment {
	TenantSegment::new(TENANT).expect("Tenant fixture should be valid.")
}

fn hub(settings_json: &str) -> Hub {
	let settings = Arc::new(
		ProviderSettings::from_json_str(settings_json).expect("Settings fixture should parse."),
	);
	let host = Arc::new(MemoryHost::default());
	let resolver = Arc::new(MemoryProviderResolver::default());

	host.register_provider(AccountProviderId::new(7), TenantId::new(1), segment());

	let provider = Arc::new(CustomAccountProvider::new(
		AccountProviderConfiguration::new(AccountProviderId::new(7), "Demo"),
		settings.clone(),
		host,
	));

	resolver.set_link_account_provider(segment(), provider.clone());

	Hub { controller: SignInController::new(settings, resolver), provider }
}

/// Replays the response's `Set-Cookie` pairs as the next request's `Cookie` header.
fn follow_up(response: &HubRequest) -> HubRequest {
	let header = response
		.set_cookie_headers()
		.iter()
		.filter_map(|line| line.split(';').next().map(str::to_owned))
		.collect::<Vec<_>>()
		.join("; ");

	HubRequest::from_cookie_header(segment(), &header)
}

fn render(hub: &Hub, request: &mut HubRequest) -> SignInViewModel {
	let query = SignInQuery::from_query_str(&format!(
		"returnUrl={}&state=hub-state",
		url::form_urlencoded::byte_serialize(RETURN_URL.as_bytes()).collect::<String>()
	));

	match hub.controller.sign_in(request, query).expect("Sign-in page should render.") {
		ActionResult::View(model) => model,
		other => panic!("Expected the sign-in view, got {other:?}."),
	}
}

fn submit(model: &SignInViewModel) -> SignInForm {
	SignInForm {
		user_name: Some("alice".into()),
		password: Some("secret".into()),
		return_url: Some(model.return_url.clone()),
		state: Some(model.state.clone()),
		custom_parameter: Some(model.custom_parameter.clone()),
		request_verification_token: Some(model.anti_forgery_token.clone()),
	}
}

#[tokio::test]
async fn full_round_trip_through_cookies() {
	let hub = hub(r#"{ "hub_url": "https://hub.example.com" }"#);
	let mut get = HubRequest::new(segment());
	let model = render(&hub, &mut get);

	assert_eq!(model.return_url, RETURN_URL);
	assert_eq!(model.state, "hub-state");
	assert_eq!(model.custom_parameter, "");

	let mut post = follow_up(&get);
	let result = hub
		.controller
		.sign_in_post(&mut post, submit(&model))
		.await
		.expect("Submission should be handled.");

	assert!(matches!(&result, ActionResult::Redirect(url) if url.as_str() == RETURN_URL));

	let claims_request = follow_up(&post);
	let claims = hub
		.provider
		.list_claims(Some(&claims_request), Some("hub-state"))
		.await
		.expect("Claims should be listed after sign-in.");

	assert_eq!(claims.value_of(ClaimType::Name), Some("124578895613"));
	assert_eq!(claims.issuer(), Some("uri:customaccountprovider:1721830150"));
}

#[tokio::test]
async fn submission_without_anti_forgery_cookie_is_unauthorized() {
	let hub = hub(r#"{ "hub_url": "https://hub.example.com" }"#);
	let mut get = HubRequest::new(segment());
	let model = render(&hub, &mut get);
	let mut post = HubRequest::new(segment());

	assert_eq!(
		hub.controller.sign_in_post(&mut post, submit(&model)).await.expect("Handled."),
		ActionResult::Unauthorized
	);
	assert!(post.set_cookie_headers().is_empty());
}

#[tokio::test]
async fn allow_list_policy_guards_the_submission() {
	let hub = hub(
		r#"{
			"hub_url": "https://hub.example.com",
			"redirect": { "return_url_policy": { "kind": "allow_list", "hosts": [".example.com"] } }
		}"#,
	);
	let mut get = HubRequest::new(segment());
	let model = render(&hub, &mut get);
	let mut post = follow_up(&get);
	let form =
		SignInForm { return_url: Some("https://evil.example.net/".into()), ..submit(&model) };

	assert_eq!(
		hub.controller.sign_in_post(&mut post, form).await.expect("Handled."),
		ActionResult::Unauthorized
	);

	let mut post = follow_up(&get);

	assert!(matches!(
		hub.controller.sign_in_post(&mut post, submit(&model)).await.expect("Handled."),
		ActionResult::Redirect(_)
	));
}

#[test]
fn bare_get_redirects_to_the_tenant_landing_page() {
	let hub = hub(r#"{ "hub_url": "https://hub.example.com/" }"#);
	let mut get = HubRequest::new(segment());

	assert!(matches!(
		hub.controller.sign_in(&mut get, SignInQuery::from_query_str("state=only")),
		Ok(ActionResult::Redirect(url)) if url.as_str() == "https://hub.example.com/acme"
	));
}
