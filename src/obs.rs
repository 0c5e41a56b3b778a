//! Optional observability helpers for provider operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `oauth2_orcid.provider` with the `provider`
//!   and `operation` fields, plus `outcome` and (for endpoint failures) `http.status` once the
//!   operation settles. Token material is never recorded.
//! - Enable `metrics` to increment the `oauth2_orcid_operation_total` counter for every
//!   attempt/success/failure, labeled by `operation` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Operations performed on behalf of the host engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderOperation {
	/// Bearer-authenticated user-info request.
	FetchUserInfo,
	/// Parsing and normalizing a fetched profile.
	NormalizeProfile,
}
impl ProviderOperation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ProviderOperation::FetchUserInfo => "fetch_user_info",
			ProviderOperation::NormalizeProfile => "normalize_profile",
		}
	}
}
impl Display for ProviderOperation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationOutcome {
	/// Entry to an operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl OperationOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationOutcome::Attempt => "attempt",
			OperationOutcome::Success => "success",
			OperationOutcome::Failure => "failure",
		}
	}
}
impl Display for OperationOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
