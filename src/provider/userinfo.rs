//! Bearer-authenticated user-info request.
//!
//! ORCID only accepts the access token in the `Authorization` header, so this replaces the
//! query-string default many engines use. One request, no retries, no timeout of its own.

// crates.io
use oauth2::{
	AccessToken, AsyncHttpClient, HttpClientError, HttpRequest,
	http::{
		Method, Request,
		header::{ACCEPT, AUTHORIZATION, HeaderValue},
	},
};
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError, UserInfoError},
	http::UserInfoHttpClient,
	provider::{ProviderDescriptor, UserInfoAuth},
};

const JSON_MIME: &str = "application/json";

/// Performs the request described by `descriptor` and returns the JSON body unmodified.
pub(crate) async fn fetch<C>(
	http: &C,
	descriptor: &ProviderDescriptor,
	access_token: &AccessToken,
) -> Result<Value>
where
	C: ?Sized + UserInfoHttpClient,
{
	let request = build_request(descriptor, access_token)?;
	let handle = http.handle();
	let response = handle.call(request).await.map_err(map_transport_error)?;
	let status = response.status();

	if !status.is_success() {
		return Err(UserInfoError::status(status.as_u16(), response.body()).into());
	}

	serde_json::from_slice(response.body()).map_err(|source| {
		UserInfoError::MalformedBody { source, status: status.as_u16() }.into()
	})
}

pub(crate) fn build_request(
	descriptor: &ProviderDescriptor,
	access_token: &AccessToken,
) -> Result<HttpRequest, ConfigError> {
	let mut url = descriptor.endpoints.userinfo.clone();
	let mut builder =
		Request::builder().method(Method::GET).header(ACCEPT, HeaderValue::from_static(JSON_MIME));

	match descriptor.userinfo_auth {
		UserInfoAuth::BearerHeader => {
			let value = HeaderValue::try_from(format!("Bearer {}", access_token.secret()))
				.map_err(|_| ConfigError::InvalidAccessToken)?;

			builder = builder.header(AUTHORIZATION, value);
		},
		UserInfoAuth::QueryParameter => {
			url.query_pairs_mut().append_pair("access_token", access_token.secret());
		},
	}

	Ok(builder.uri(url.as_str()).body(Vec::new())?)
}

fn map_transport_error<E>(err: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Reqwest(inner) => TransportError::Network { source: inner }.into(),
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(inner) => TransportError::Io(inner).into(),
		HttpClientError::Other(message) => TransportError::Other { message }.into(),
		_ => TransportError::Other { message: "Unrecognized HTTP client failure".into() }.into(),
	}
}
