//! Optional observability helpers for provider operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` (on by default) to emit spans named `custom_account_provider.op` with the
//!   `op` (host-facing operation) and `stage` (call site) fields, plus a warn-level event for
//!   every rejected call.
//! - Enable `metrics` to increment the `custom_account_provider_op_total` counter for every
//!   attempt/success/failure, labeled by `op` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Host-facing operations observed by the provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpKind {
	/// Claims listing for a stored session.
	ListClaims,
	/// Sign-in redirect construction.
	SignInUrl,
	/// Sign-out redirect construction.
	SignOutUrl,
	/// Host-driven sign-out processing.
	SignOut,
	/// Sign-in form rendering (GET).
	SignInForm,
	/// Sign-in form submission (POST).
	SignInSubmit,
}
impl OpKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OpKind::ListClaims => "list_claims",
			OpKind::SignInUrl => "sign_in_url",
			OpKind::SignOutUrl => "sign_out_url",
			OpKind::SignOut => "sign_out",
			OpKind::SignInForm => "sign_in_form",
			OpKind::SignInSubmit => "sign_in_submit",
		}
	}
}
impl Display for OpKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpOutcome {
	/// Entry to a provider operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl OpOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OpOutcome::Attempt => "attempt",
			OpOutcome::Success => "success",
			OpOutcome::Failure => "failure",
		}
	}
}
impl Display for OpOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Records the outcome of a finished operation and reports failures.
pub fn record_result<T>(kind: OpKind, result: &Result<T>) {
	match result {
		Ok(_) => record_op_outcome(kind, OpOutcome::Success),
		Err(e) => {
			record_op_outcome(kind, OpOutcome::Failure);
			report_rejection(kind, e);
		},
	}
}
