//! ORCID provider preset for OAuth 2.0 / OpenID Connect engines: endpoints, scopes, a
//! bearer-header user-info fetch, and profile normalization in one immutable value.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod error;
pub mod http;
pub mod obs;
pub mod provider;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// crates.io
	use oauth2::{
		AccessToken, EmptyExtraTokenFields, StandardTokenResponse,
		basic::{BasicTokenResponse, BasicTokenType},
	};
	// self
	#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;
	use crate::provider::{OrcidOptions, OrcidProvider, orcid};

	/// Client identifier used across tests.
	pub const TEST_CLIENT_ID: &str = "APP-TEST0000CLIENT";
	/// Client secret used across tests.
	pub const TEST_CLIENT_SECRET: &str = "secret-for-tests";

	/// Builds a bearer token response carrying the provided access token.
	pub fn test_tokens(access_token: &str) -> BasicTokenResponse {
		StandardTokenResponse::new(
			AccessToken::new(access_token.to_owned()),
			BasicTokenType::Bearer,
			EmptyExtraTokenFields {},
		)
	}

	/// Builds an ORCID provider whose user-info endpoint points at `userinfo`.
	pub fn build_test_provider(userinfo: &str) -> OrcidProvider {
		let userinfo =
			Url::parse(userinfo).expect("Test user-info endpoint should parse successfully.");
		let options = OrcidOptions::builder(TEST_CLIENT_ID, TEST_CLIENT_SECRET)
			.userinfo_url(userinfo)
			.build();

		orcid(options)
	}

	/// Builds the default redirect-refusing reqwest client used by integration tests.
	#[cfg(feature = "reqwest")]
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		ReqwestHttpClient::new().expect("Failed to build Reqwest client for tests.")
	}
}

pub use oauth2;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {httpmock as _, tokio as _};
