//! Interactive sign-in endpoints (`GET`/`POST …/CustomAccountProvider/SignIn`).
//!
//! The controller renders the credential form for the provider the hub is currently signing
//! the subject in with (or linking), and on submission stores the resulting session value in
//! the session cookie before redirecting back to the hub. Outcomes are expressed as
//! [`ActionResult`]s; the hub's HTTP layer turns them into responses.

pub mod view_model;

pub use view_model::*;

// self
use crate::{
	_prelude::*,
	antiforgery::AntiForgery,
	auth::SessionValue,
	config::ProviderSettings,
	host::HubRequest,
	obs::{self, OpKind, OpOutcome, OpSpan},
	provider::CustomAccountProvider,
	redirect::RedirectBuilder,
};

/// Boxed future returned by [`CredentialVerifier::verify`].
pub type VerifierFuture<'a> =
	Pin<Box<dyn Future<Output = Result<Option<SessionValue>>> + 'a + Send>>;

/// Finds the provider instance a sign-in request belongs to.
pub trait ProviderResolver
where
	Self: Send + Sync,
{
	/// Provider the subject is currently signing in with.
	fn account_provider(&self, request: &HubRequest) -> Option<Arc<CustomAccountProvider>>;

	/// Provider the subject is currently linking to an existing identity.
	fn link_account_account_provider(
		&self,
		request: &HubRequest,
	) -> Option<Arc<CustomAccountProvider>>;

	/// Sign-in provider, falling back to the link-account provider.
	fn resolve(&self, request: &HubRequest) -> Option<Arc<CustomAccountProvider>> {
		self.account_provider(request).or_else(|| self.link_account_account_provider(request))
	}
}

/// Checks submitted credentials and yields the session value to hand off.
pub trait CredentialVerifier
where
	Self: Send + Sync,
{
	/// Returns `Ok(None)` when the credentials are rejected.
	fn verify<'a>(
		&'a self,
		provider: &'a CustomAccountProvider,
		user_name: &'a str,
		password: &'a str,
	) -> VerifierFuture<'a>;
}

/// Accepts any non-empty credentials and yields one fixed session value.
#[derive(Clone, Debug)]
pub struct DemoCredentialVerifier {
	session: SessionValue,
}
impl DemoCredentialVerifier {
	/// Creates a verifier yielding `session` for every accepted submission.
	pub fn new(session: impl Into<SessionValue>) -> Self {
		Self { session: session.into() }
	}
}
impl CredentialVerifier for DemoCredentialVerifier {
	fn verify<'a>(
		&'a self,
		_provider: &'a CustomAccountProvider,
		user_name: &'a str,
		password: &'a str,
	) -> VerifierFuture<'a> {
		let accepted = !user_name.trim().is_empty() && !password.is_empty();

		Box::pin(async move { Ok(accepted.then(|| self.session.clone())) })
	}
}

/// Outcome of a sign-in endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionResult {
	/// Redirect to an absolute URL.
	Redirect(Url),
	/// Render the sign-in view.
	View(SignInViewModel),
	/// Respond with `401 Unauthorized`.
	Unauthorized,
}

/// GET/POST handlers of the sign-in form.
#[derive(Clone)]
pub struct SignInController {
	settings: Arc<ProviderSettings>,
	resolver: Arc<dyn ProviderResolver>,
	verifier: Arc<dyn CredentialVerifier>,
	redirects: RedirectBuilder,
	antiforgery: AntiForgery,
}
impl SignInController {
	/// Creates a controller authenticating with [`DemoCredentialVerifier`].
	pub fn new(settings: Arc<ProviderSettings>, resolver: Arc<dyn ProviderResolver>) -> Self {
		let session = SessionValue::new(settings.demo_session_value.as_str());
		let verifier: Arc<dyn CredentialVerifier> = Arc::new(DemoCredentialVerifier::new(session));
		let redirects = RedirectBuilder::new(settings.clone());
		let antiforgery = AntiForgery::new(settings.antiforgery.clone());

		Self { settings, resolver, verifier, redirects, antiforgery }
	}

	/// Replaces the credential verifier.
	pub fn with_verifier(mut self, verifier: Arc<dyn CredentialVerifier>) -> Self {
		self.verifier = verifier;

		self
	}

	/// Anti-forgery guard protecting the submission.
	pub fn antiforgery(&self) -> &AntiForgery {
		&self.antiforgery
	}

	/// `GET …/SignIn?returnUrl=…&state=…`.
	///
	/// Missing arguments send the subject to the tenant's landing page instead of failing.
	pub fn sign_in(&self, request: &mut HubRequest, query: SignInQuery) -> Result<ActionResult> {
		const KIND: OpKind = OpKind::SignInForm;

		let _span = OpSpan::new(KIND, "sign_in").entered();

		obs::record_op_outcome(KIND, OpOutcome::Attempt);

		let result = self.render_sign_in(request, query);

		record_action(KIND, &result);

		result
	}

	/// `POST …/SignIn`.
	pub async fn sign_in_post(
		&self,
		request: &mut HubRequest,
		form: SignInForm,
	) -> Result<ActionResult> {
		const KIND: OpKind = OpKind::SignInSubmit;

		let span = OpSpan::new(KIND, "sign_in_post");

		obs::record_op_outcome(KIND, OpOutcome::Attempt);

		let result = span.instrument(self.submit_sign_in(request, form)).await;

		record_action(KIND, &result);

		result
	}

	fn render_sign_in(
		&self,
		request: &mut HubRequest,
		query: SignInQuery,
	) -> Result<ActionResult> {
		let return_url = query.return_url.filter(|value| !value.is_empty());
		let state = query.state.filter(|value| !value.is_empty());
		let (Some(return_url), Some(state)) = (return_url, state) else {
			return Ok(ActionResult::Redirect(self.settings.tenant_home(&request.tenant)?));
		};
		let Some(provider) = self.resolver.resolve(request) else {
			return Ok(ActionResult::Unauthorized);
		};
		let custom_parameter = provider
			.custom_passed_parameters()
			.and_then(|parameters| parameters.into_iter().next())
			.unwrap_or_default();
		let model = SignInViewModel { return_url, state, custom_parameter, ..Default::default() };

		Ok(ActionResult::View(self.with_fresh_token(request, model)))
	}

	async fn submit_sign_in(
		&self,
		request: &mut HubRequest,
		form: SignInForm,
	) -> Result<ActionResult> {
		if let Err(e) =
			self.antiforgery.validate(&request.cookies, form.request_verification_token.as_deref())
		{
			obs::report_rejection(OpKind::SignInSubmit, &e);

			return Ok(ActionResult::Unauthorized);
		}

		let errors = form.validate();

		if !errors.is_empty() {
			return Ok(self.rerender(request, &form, errors));
		}

		let Some(return_url) = form
			.return_url
			.as_deref()
			.and_then(|raw| Url::parse(raw).ok())
			.filter(|url| self.redirects.validate_return_url(url))
		else {
			return Ok(ActionResult::Unauthorized);
		};
		let Some(provider) = self.resolver.resolve(request) else {
			return Ok(ActionResult::Unauthorized);
		};
		let user_name = form.user_name.as_deref().unwrap_or_default();
		let password = form.password.as_deref().unwrap_or_default();
		let Some(session) = self.verifier.verify(&provider, user_name, password).await? else {
			let errors = vec!["The user name or password is incorrect.".to_owned()];

			return Ok(self.rerender(request, &form, errors));
		};

		provider.store_session(Some(request), &session);

		Ok(ActionResult::Redirect(return_url))
	}

	fn rerender(
		&self,
		request: &mut HubRequest,
		form: &SignInForm,
		errors: Vec<String>,
	) -> ActionResult {
		let model = SignInViewModel::from_form(form, errors);

		ActionResult::View(self.with_fresh_token(request, model))
	}

	fn with_fresh_token(
		&self,
		request: &mut HubRequest,
		model: SignInViewModel,
	) -> SignInViewModel {
		let token = self.antiforgery.issue(&mut request.cookies);

		model.with_anti_forgery(self.antiforgery.settings().field_name.as_str(), token)
	}
}
impl Debug for SignInController {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SignInController")
			.field("hub_url", &self.settings.hub_url.as_str())
			.field("antiforgery", &self.antiforgery)
			.finish()
	}
}

fn record_action(kind: OpKind, result: &Result<ActionResult>) {
	match result {
		Ok(ActionResult::Unauthorized) => obs::record_op_outcome(kind, OpOutcome::Failure),
		_ => obs::record_result(kind, result),
	}
}
