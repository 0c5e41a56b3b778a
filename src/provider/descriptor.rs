//! Provider descriptor data handed to the host authentication engine.
//!
//! A [`ProviderDescriptor`] is plain data: identifiers, endpoints, fixed authorization
//! parameters, and presentation hints. Behavior (the user-info fetch and profile mapping)
//! lives on [`OrcidProvider`](crate::provider::OrcidProvider).

// self
use crate::{
	_prelude::*,
	auth::{ProviderId, ScopeSet},
};

/// Default provider identifier.
pub const ORCID_ID: &str = "orcid";
/// Default display name.
pub const ORCID_NAME: &str = "ORCID";
/// ORCID OpenID Connect issuer; also the base of canonical record URLs.
pub const ORCID_ISSUER: &str = "https://orcid.org";
/// Authorization endpoint.
pub const ORCID_AUTHORIZATION_URL: &str = "https://orcid.org/oauth/authorize";
/// Token endpoint.
pub const ORCID_TOKEN_URL: &str = "https://orcid.org/oauth/token";
/// User-info endpoint.
pub const ORCID_USERINFO_URL: &str = "https://orcid.org/oauth/userinfo";
/// Scopes requested when the caller does not override them.
pub const ORCID_DEFAULT_SCOPES: [&str; 3] = ["openid", "email", "profile"];
/// Authorization-code response type.
pub const RESPONSE_TYPE_CODE: &str = "code";

/// Protocol family spoken by the provider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
	/// Plain OAuth 2.0 authorization-code flow.
	OAuth,
	/// OpenID Connect on top of the authorization-code flow.
	#[default]
	Oidc,
}

/// Preferred client authentication modes for token endpoint calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientAuthMethod {
	/// HTTP Basic with `client_id`/`client_secret`.
	ClientSecretBasic,
	/// Form POST body parameters for `client_id`/`client_secret`.
	#[default]
	ClientSecretPost,
}

/// How the access token accompanies the user-info request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserInfoAuth {
	/// `Authorization: Bearer <token>` header. ORCID rejects anything else.
	#[default]
	BearerHeader,
	/// `access_token` query parameter.
	QueryParameter,
}

/// Endpoint set declared by a provider descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Authorization endpoint the user agent is redirected to.
	pub authorization: Url,
	/// Token endpoint used by the host engine for the code exchange.
	pub token: Url,
	/// User-info endpoint queried after the exchange.
	pub userinfo: Url,
}

/// Fixed parameters appended to every authorization request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationParams {
	/// Requested scopes.
	pub scope: ScopeSet,
	/// OAuth `response_type`.
	pub response_type: String,
}

/// Presentation hints for sign-in buttons. Purely cosmetic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderStyle {
	/// Logo path or URL.
	pub logo: String,
	/// Background color.
	pub bg: String,
	/// Text color.
	pub text: String,
}
impl Default for ProviderStyle {
	fn default() -> Self {
		Self { logo: "/orcid.svg".into(), bg: "#a6ce39".into(), text: "#fff".into() }
	}
}

/// Immutable provider descriptor consumed by the host engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
	/// Descriptor identifier.
	pub id: ProviderId,
	/// Human-readable provider name.
	pub name: String,
	/// Protocol family.
	pub kind: ProviderKind,
	/// OpenID Connect issuer.
	pub issuer: Url,
	/// Endpoint definitions exposed by the provider.
	pub endpoints: ProviderEndpoints,
	/// Parameters fixed on the authorization request.
	pub authorization_params: AuthorizationParams,
	/// Access-token placement for user-info requests.
	pub userinfo_auth: UserInfoAuth,
	/// Client authentication the token endpoint expects.
	pub token_endpoint_auth_method: ClientAuthMethod,
	/// Presentation hints.
	pub style: ProviderStyle,
}
impl ProviderDescriptor {
	/// Returns the built-in ORCID defaults.
	pub fn orcid() -> Self {
		Self {
			id: ProviderId::from_static(ORCID_ID),
			name: ORCID_NAME.into(),
			kind: ProviderKind::Oidc,
			issuer: builtin_url(ORCID_ISSUER),
			endpoints: ProviderEndpoints {
				authorization: builtin_url(ORCID_AUTHORIZATION_URL),
				token: builtin_url(ORCID_TOKEN_URL),
				userinfo: builtin_url(ORCID_USERINFO_URL),
			},
			authorization_params: AuthorizationParams {
				scope: ScopeSet::from_static(&ORCID_DEFAULT_SCOPES),
				response_type: RESPONSE_TYPE_CODE.into(),
			},
			userinfo_auth: UserInfoAuth::BearerHeader,
			token_endpoint_auth_method: ClientAuthMethod::ClientSecretPost,
			style: ProviderStyle::default(),
		}
	}

	/// Authorization endpoint with the fixed `scope` and `response_type` parameters applied.
	///
	/// Any `scope` or `response_type` already present on the configured endpoint is replaced;
	/// other query pairs are kept in order. The host engine appends `client_id`,
	/// `redirect_uri`, `state`, and anything else its flow needs.
	pub fn authorization_url(&self) -> Url {
		let mut url = self.endpoints.authorization.clone();
		let retained = url
			.query_pairs()
			.filter(|(key, _)| key != "scope" && key != "response_type")
			.map(|(key, value)| (key.into_owned(), value.into_owned()))
			.collect::<Vec<_>>();
		let mut pairs = url.query_pairs_mut();

		pairs.clear().extend_pairs(retained);

		if !self.authorization_params.scope.is_empty() {
			pairs.append_pair("scope", &self.authorization_params.scope.normalized());
		}

		pairs.append_pair("response_type", &self.authorization_params.response_type);

		drop(pairs);

		url
	}
}

fn builtin_url(raw: &'static str) -> Url {
	Url::parse(raw).expect("Built-in ORCID URLs must parse.")
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn builtin_defaults_match_orcid() {
		let descriptor = ProviderDescriptor::orcid();

		assert_eq!(&*descriptor.id, "orcid");
		assert_eq!(descriptor.name, "ORCID");
		assert_eq!(descriptor.kind, ProviderKind::Oidc);
		assert_eq!(descriptor.issuer.as_str(), "https://orcid.org/");
		assert_eq!(descriptor.endpoints.authorization.as_str(), ORCID_AUTHORIZATION_URL);
		assert_eq!(descriptor.endpoints.token.as_str(), ORCID_TOKEN_URL);
		assert_eq!(descriptor.endpoints.userinfo.as_str(), ORCID_USERINFO_URL);
		assert_eq!(descriptor.authorization_params.scope.normalized(), "openid email profile");
		assert_eq!(descriptor.authorization_params.response_type, "code");
		assert_eq!(descriptor.userinfo_auth, UserInfoAuth::BearerHeader);
		assert_eq!(descriptor.token_endpoint_auth_method, ClientAuthMethod::ClientSecretPost);
		assert_eq!(descriptor.style.bg, "#a6ce39");
		assert_eq!(descriptor.style.text, "#fff");
	}

	#[test]
	fn builtin_identifiers_pass_validation() {
		ProviderId::new(ORCID_ID).expect("Built-in identifier should validate.");
		ScopeSet::new(ORCID_DEFAULT_SCOPES).expect("Built-in scopes should validate.");
	}

	#[test]
	fn authorization_url_carries_fixed_params() {
		let url = ProviderDescriptor::orcid().authorization_url();

		assert_eq!(
			url.as_str(),
			"https://orcid.org/oauth/authorize?scope=openid+email+profile&response_type=code"
		);
	}

	#[test]
	fn authorization_url_omits_empty_scope() {
		let mut descriptor = ProviderDescriptor::orcid();

		descriptor.authorization_params.scope = ScopeSet::default();

		assert_eq!(
			descriptor.authorization_url().as_str(),
			"https://orcid.org/oauth/authorize?response_type=code"
		);
	}

	#[test]
	fn descriptor_serializes_with_snake_case_enums() {
		let json = serde_json::to_value(ProviderDescriptor::orcid())
			.expect("Descriptor should serialize.");

		assert_eq!(json["id"], "orcid");
		assert_eq!(json["kind"], "oidc");
		assert_eq!(json["userinfo_auth"], "bearer_header");
		assert_eq!(json["authorization_params"]["scope"], "openid email profile");
	}
}
