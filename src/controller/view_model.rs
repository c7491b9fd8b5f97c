//! Query, form, and view models of the sign-in endpoints.

// self
use crate::_prelude::*;

/// Query string of `GET …/SignIn`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignInQuery {
	/// Absolute URL the hub expects to be sent back to.
	pub return_url: Option<String>,
	/// Opaque hub state.
	pub state: Option<String>,
}
impl SignInQuery {
	/// Creates a query carrying both arguments.
	pub fn new(return_url: impl Into<String>, state: impl Into<String>) -> Self {
		Self { return_url: Some(return_url.into()), state: Some(state.into()) }
	}

	/// Parses an `application/x-www-form-urlencoded` query string; unknown keys are ignored.
	pub fn from_query_str(raw: &str) -> Self {
		let mut query = Self::default();

		for (key, value) in url::form_urlencoded::parse(raw.trim_start_matches('?').as_bytes()) {
			match key.as_ref() {
				"returnUrl" => query.return_url = Some(value.into_owned()),
				"state" => query.state = Some(value.into_owned()),
				_ => {},
			}
		}

		query
	}
}

/// Body of `POST …/SignIn`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SignInForm {
	/// Submitted user name.
	pub user_name: Option<String>,
	/// Submitted password.
	pub password: Option<String>,
	/// Return URL echoed from the GET request.
	pub return_url: Option<String>,
	/// Hub state echoed from the GET request.
	pub state: Option<String>,
	/// Custom parameter echoed from the GET request.
	pub custom_parameter: Option<String>,
	/// Anti-forgery form token.
	#[serde(rename = "__RequestVerificationToken")]
	pub request_verification_token: Option<String>,
}
impl SignInForm {
	/// Returns the model errors; empty when both credentials are present.
	pub fn validate(&self) -> Vec<String> {
		let mut errors = Vec::new();

		if self.user_name.as_deref().is_none_or(|value| value.trim().is_empty()) {
			errors.push("The UserName field is required.".to_owned());
		}
		if self.password.as_deref().is_none_or(str::is_empty) {
			errors.push("The Password field is required.".to_owned());
		}

		errors
	}
}
impl Debug for SignInForm {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SignInForm")
			.field("user_name", &self.user_name)
			.field("password", &self.password.as_ref().map(|_| "<redacted>"))
			.field("return_url", &self.return_url)
			.field("state", &self.state)
			.field("custom_parameter", &self.custom_parameter)
			.finish()
	}
}

/// Model rendered by the sign-in view.
///
/// Never carries the submitted password.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SignInViewModel {
	/// Return URL posted back with the form.
	pub return_url: String,
	/// Hub state posted back with the form.
	pub state: String,
	/// User name to pre-fill.
	pub user_name: String,
	/// First custom parameter passed by the tenant, or empty.
	pub custom_parameter: String,
	/// Name of the hidden anti-forgery field.
	pub anti_forgery_field: String,
	/// Value of the hidden anti-forgery field.
	pub anti_forgery_token: String,
	/// Model and credential errors to display.
	pub errors: Vec<String>,
}
impl SignInViewModel {
	/// Re-renders a rejected submission with `errors`.
	pub fn from_form(form: &SignInForm, errors: Vec<String>) -> Self {
		Self {
			return_url: form.return_url.clone().unwrap_or_default(),
			state: form.state.clone().unwrap_or_default(),
			user_name: form.user_name.clone().unwrap_or_default(),
			custom_parameter: form.custom_parameter.clone().unwrap_or_default(),
			errors,
			..Default::default()
		}
	}

	/// Attaches the anti-forgery field name and token.
	pub fn with_anti_forgery(mut self, field: impl Into<String>, token: impl Into<String>) -> Self {
		self.anti_forgery_field = field.into();
		self.anti_forgery_token = token.into();

		self
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn query_parses_hub_parameters() {
		let query = SignInQuery::from_query_str(
			"?returnUrl=https%3A%2F%2Fapp.example.com%2Fcb&state=abc&extra=1",
		);

		assert_eq!(query, SignInQuery::new("https://app.example.com/cb", "abc"));
		assert_eq!(SignInQuery::from_query_str(""), SignInQuery::default());
	}

	#[test]
	fn form_deserializes_posted_field_names() {
		let form: SignInForm = serde_json::from_str(
			r#"{
				"UserName": "alice",
				"Password": "secret",
				"ReturnUrl": "https://app.example.com/cb",
				"State": "abc",
				"__RequestVerificationToken": "token"
			}"#,
		)
		.expect("Posted form should deserialize.");

		assert_eq!(form.user_name.as_deref(), Some("alice"));
		assert_eq!(form.request_verification_token.as_deref(), Some("token"));
		assert_eq!(form.custom_parameter, None);
		assert!(form.validate().is_empty());
		assert!(!format!("{form:?}").contains("secret"));
	}

	#[test]
	fn form_requires_both_credentials() {
		let form = SignInForm { user_name: Some(" ".into()), ..Default::default() };

		assert_eq!(
			form.validate(),
			vec![
				"The UserName field is required.".to_owned(),
				"The Password field is required.".to_owned()
			]
		);
	}

	#[test]
	fn view_model_never_echoes_the_password() {
		let form = SignInForm {
			user_name: Some("alice".into()),
			password: Some("secret".into()),
			state: Some("abc".into()),
			..Default::default()
		};
		let model = SignInViewModel::from_form(&form, vec!["error".into()])
			.with_anti_forgery("__RequestVerificationToken", "token");
		let rendered = serde_json::to_string(&model).expect("View model should serialize.");

		assert_eq!(model.user_name, "alice");
		assert_eq!(model.anti_forgery_token, "token");
		assert!(!rendered.contains("secret"));
	}
}
