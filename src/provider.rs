//! The ORCID provider: descriptor data (endpoints, scopes, styling) plus the two behaviors a
//! host engine delegates to it (the bearer-header user-info fetch and profile normalization).
//!
//! ```
//! use oauth2_orcid::provider::{OrcidOptions, orcid};
//!
//! let provider = orcid(OrcidOptions::new("APP-XXXXXXXXXXXXXXXX", "client-secret"));
//!
//! assert_eq!(&*provider.descriptor.id, "orcid");
//! assert_eq!(provider.descriptor.authorization_params.scope.normalized(), "openid email profile");
//! ```

pub mod descriptor;
pub mod options;
pub mod profile;

mod userinfo;

pub use descriptor::*;
pub use options::*;
pub use profile::*;

// crates.io
use oauth2::TokenResponse;
// self
use crate::{
	_prelude::*,
	auth::ClientCredentials,
	http::UserInfoHttpClient,
	obs::{self, OperationOutcome, OperationSpan, ProviderOperation},
};

/// Builds the ORCID provider from caller options layered over the built-in defaults.
///
/// Performs no I/O and no validation; an unusable client surfaces when the host engine
/// first talks to ORCID.
pub fn orcid(options: OrcidOptions) -> OrcidProvider {
	options.merge(ProviderDescriptor::orcid())
}

/// Fully configured provider handed to the host engine.
///
/// Created once at startup and shared read-only; concurrent logins call
/// [`fetch_user_info`](Self::fetch_user_info) with their own tokens.
#[derive(Clone)]
pub struct OrcidProvider {
	/// Descriptor data.
	pub descriptor: ProviderDescriptor,
	/// Client registration.
	pub credentials: ClientCredentials,
	/// Profile normalization.
	pub profile_mapper: Arc<dyn ProfileMapper>,
}
impl OrcidProvider {
	/// Authorization endpoint with the fixed `scope` and `response_type` parameters.
	pub fn authorization_url(&self) -> Url {
		self.descriptor.authorization_url()
	}

	/// Fetches the user-info document for `tokens` and returns the JSON body unmodified.
	///
	/// Issues exactly one GET. Transport failures, non-success statuses, and non-JSON bodies
	/// are returned as errors without retrying.
	pub async fn fetch_user_info<C, T>(&self, http: &C, tokens: &T) -> Result<Value>
	where
		C: ?Sized + UserInfoHttpClient,
		T: TokenResponse,
	{
		let span = OperationSpan::new(&self.descriptor.id, ProviderOperation::FetchUserInfo);

		obs::record_operation_outcome(ProviderOperation::FetchUserInfo, OperationOutcome::Attempt);

		let result = span
			.instrument(userinfo::fetch(http, &self.descriptor, tokens.access_token()))
			.await;

		record_result(&span, ProviderOperation::FetchUserInfo, &result);

		result
	}

	/// Maps a profile to the host engine's identity shape.
	pub fn normalize(&self, profile: &OrcidProfile) -> Identity {
		self.profile_mapper.normalize(profile)
	}

	/// Fetches, parses, and normalizes the profile behind `tokens`.
	pub async fn user_identity<C, T>(&self, http: &C, tokens: &T) -> Result<Identity>
	where
		C: ?Sized + UserInfoHttpClient,
		T: TokenResponse,
	{
		let body = self.fetch_user_info(http, tokens).await?;
		let span = OperationSpan::new(&self.descriptor.id, ProviderOperation::NormalizeProfile);
		let _guard = span.clone().entered();

		obs::record_operation_outcome(
			ProviderOperation::NormalizeProfile,
			OperationOutcome::Attempt,
		);

		let result = OrcidProfile::from_json(body)
			.map(|profile| self.normalize(&profile))
			.map_err(Error::from);

		record_result(&span, ProviderOperation::NormalizeProfile, &result);

		result
	}
}
impl Debug for OrcidProvider {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OrcidProvider")
			.field("descriptor", &self.descriptor)
			.field("credentials", &self.credentials)
			.finish()
	}
}

fn record_result<T>(span: &OperationSpan, operation: ProviderOperation, result: &Result<T>) {
	let outcome =
		if result.is_ok() { OperationOutcome::Success } else { OperationOutcome::Failure };

	if let Some(status) = result.as_ref().err().and_then(Error::http_status) {
		span.record_status(status);
	}

	span.record_outcome(outcome);
	obs::record_operation_outcome(operation, outcome);
}
