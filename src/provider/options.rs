//! Caller-supplied options layered over the built-in ORCID defaults.

// crates.io
use oauth2::{ClientId, ClientSecret};
// self
use crate::{
	_prelude::*,
	auth::{ClientCredentials, ProviderId, ScopeSet},
	provider::{
		ClientAuthMethod, OrcidProfileMapper, OrcidProvider, ProfileMapper, ProviderDescriptor,
		ProviderKind, UserInfoAuth,
	},
};

/// Style overrides; unset fields keep the ORCID branding.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOptions {
	/// Logo path or URL.
	pub logo: Option<String>,
	/// Background color.
	pub bg: Option<String>,
	/// Text color.
	pub text: Option<String>,
}

/// Options accepted by [`orcid`](crate::provider::orcid).
///
/// Only the credentials are required. Every `Some` field replaces the corresponding
/// default; nothing is validated here. Deserializes from any serde format, so the same
/// struct backs configuration files:
///
/// ```
/// let options: oauth2_orcid::provider::OrcidOptions = serde_json::from_str(
/// 	r#"{ "client_id": "APP-1", "client_secret": "s", "scope": "openid /read-limited" }"#,
/// )
/// .unwrap();
///
/// assert_eq!(options.scope.unwrap().normalized(), "openid /read-limited");
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct OrcidOptions {
	/// Registered client identifier.
	pub client_id: ClientId,
	/// Registered client secret.
	pub client_secret: ClientSecret,
	/// Provider identifier override.
	#[serde(default)]
	pub id: Option<ProviderId>,
	/// Display name override.
	#[serde(default)]
	pub name: Option<String>,
	/// Protocol family override.
	#[serde(default)]
	pub kind: Option<ProviderKind>,
	/// Issuer override (e.g. `https://sandbox.orcid.org`).
	#[serde(default)]
	pub issuer: Option<Url>,
	/// Authorization endpoint override.
	#[serde(default)]
	pub authorization_url: Option<Url>,
	/// Token endpoint override.
	#[serde(default)]
	pub token_url: Option<Url>,
	/// User-info endpoint override.
	#[serde(default)]
	pub userinfo_url: Option<Url>,
	/// Scope override.
	#[serde(default)]
	pub scope: Option<ScopeSet>,
	/// Response type override.
	#[serde(default)]
	pub response_type: Option<String>,
	/// User-info token placement override.
	#[serde(default)]
	pub userinfo_auth: Option<UserInfoAuth>,
	/// Token endpoint client authentication override.
	#[serde(default)]
	pub token_endpoint_auth_method: Option<ClientAuthMethod>,
	/// Style overrides.
	#[serde(default)]
	pub style: StyleOptions,
	/// Profile mapping override.
	#[serde(skip)]
	pub profile_mapper: Option<Arc<dyn ProfileMapper>>,
}
impl OrcidOptions {
	/// Creates options carrying only the credentials.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		let ClientCredentials { client_id, client_secret } =
			ClientCredentials::new(client_id, client_secret);

		Self {
			client_id,
			client_secret,
			id: None,
			name: None,
			kind: None,
			issuer: None,
			authorization_url: None,
			token_url: None,
			userinfo_url: None,
			scope: None,
			response_type: None,
			userinfo_auth: None,
			token_endpoint_auth_method: None,
			style: StyleOptions::default(),
			profile_mapper: None,
		}
	}

	/// Starts a fluent builder seeded with the credentials.
	pub fn builder(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> OrcidOptionsBuilder {
		OrcidOptionsBuilder(Self::new(client_id, client_secret))
	}

	/// Layers the options over `descriptor`; the default mapper builds record URLs from the
	/// merged issuer.
	pub(crate) fn merge(self, mut descriptor: ProviderDescriptor) -> OrcidProvider {
		let Self {
			client_id,
			client_secret,
			id,
			name,
			kind,
			issuer,
			authorization_url,
			token_url,
			userinfo_url,
			scope,
			response_type,
			userinfo_auth,
			token_endpoint_auth_method,
			style,
			profile_mapper,
		} = self;

		override_with(&mut descriptor.id, id);
		override_with(&mut descriptor.name, name);
		override_with(&mut descriptor.kind, kind);
		override_with(&mut descriptor.issuer, issuer);
		override_with(&mut descriptor.endpoints.authorization, authorization_url);
		override_with(&mut descriptor.endpoints.token, token_url);
		override_with(&mut descriptor.endpoints.userinfo, userinfo_url);
		override_with(&mut descriptor.authorization_params.scope, scope);
		override_with(&mut descriptor.authorization_params.response_type, response_type);
		override_with(&mut descriptor.userinfo_auth, userinfo_auth);
		override_with(&mut descriptor.token_endpoint_auth_method, token_endpoint_auth_method);
		override_with(&mut descriptor.style.logo, style.logo);
		override_with(&mut descriptor.style.bg, style.bg);
		override_with(&mut descriptor.style.text, style.text);

		let profile_mapper = profile_mapper.unwrap_or_else(|| {
			Arc::new(OrcidProfileMapper::new(descriptor.issuer.clone())) as Arc<dyn ProfileMapper>
		});

		OrcidProvider {
			descriptor,
			credentials: ClientCredentials { client_id, client_secret },
			profile_mapper,
		}
	}
}
impl Debug for OrcidOptions {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OrcidOptions")
			.field("client_id", &self.client_id)
			.field("client_secret", &self.client_secret)
			.field("id", &self.id)
			.field("name", &self.name)
			.field("kind", &self.kind)
			.field("issuer", &self.issuer)
			.field("authorization_url", &self.authorization_url)
			.field("token_url", &self.token_url)
			.field("userinfo_url", &self.userinfo_url)
			.field("scope", &self.scope)
			.field("response_type", &self.response_type)
			.field("userinfo_auth", &self.userinfo_auth)
			.field("token_endpoint_auth_method", &self.token_endpoint_auth_method)
			.field("style", &self.style)
			.field("profile_mapper_set", &self.profile_mapper.is_some())
			.finish()
	}
}

/// Fluent builder for [`OrcidOptions`].
#[derive(Debug)]
pub struct OrcidOptionsBuilder(OrcidOptions);
impl OrcidOptionsBuilder {
	/// Overrides the provider identifier.
	pub fn id(mut self, id: ProviderId) -> Self {
		self.0.id = Some(id);

		self
	}

	/// Overrides the display name.
	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.0.name = Some(name.into());

		self
	}

	/// Overrides the protocol family.
	pub fn kind(mut self, kind: ProviderKind) -> Self {
		self.0.kind = Some(kind);

		self
	}

	/// Overrides the issuer; the default profile mapper builds record URLs from it.
	pub fn issuer(mut self, url: Url) -> Self {
		self.0.issuer = Some(url);

		self
	}

	/// Overrides the authorization endpoint.
	pub fn authorization_url(mut self, url: Url) -> Self {
		self.0.authorization_url = Some(url);

		self
	}

	/// Overrides the token endpoint.
	pub fn token_url(mut self, url: Url) -> Self {
		self.0.token_url = Some(url);

		self
	}

	/// Overrides the user-info endpoint.
	pub fn userinfo_url(mut self, url: Url) -> Self {
		self.0.userinfo_url = Some(url);

		self
	}

	/// Overrides the requested scopes.
	pub fn scope(mut self, scope: ScopeSet) -> Self {
		self.0.scope = Some(scope);

		self
	}

	/// Overrides the `response_type` parameter.
	pub fn response_type(mut self, response_type: impl Into<String>) -> Self {
		self.0.response_type = Some(response_type.into());

		self
	}

	/// Overrides how the access token reaches the user-info endpoint.
	pub fn userinfo_auth(mut self, auth: UserInfoAuth) -> Self {
		self.0.userinfo_auth = Some(auth);

		self
	}

	/// Overrides the token endpoint client authentication method.
	pub fn token_endpoint_auth_method(mut self, method: ClientAuthMethod) -> Self {
		self.0.token_endpoint_auth_method = Some(method);

		self
	}

	/// Overrides the style hints.
	pub fn style(mut self, style: StyleOptions) -> Self {
		self.0.style = style;

		self
	}

	/// Replaces the profile mapper.
	pub fn profile_mapper(mut self, mapper: Arc<dyn ProfileMapper>) -> Self {
		self.0.profile_mapper = Some(mapper);

		self
	}

	/// Returns the assembled options.
	pub fn build(self) -> OrcidOptions {
		self.0
	}
}

fn override_with<T>(slot: &mut T, value: Option<T>) {
	if let Some(value) = value {
		*slot = value;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn unset_options_keep_defaults() {
		let provider = OrcidOptions::new("APP-1", "secret").merge(ProviderDescriptor::orcid());

		assert_eq!(provider.descriptor, ProviderDescriptor::orcid());
		assert_eq!(provider.credentials.client_id.as_str(), "APP-1");
	}

	#[test]
	fn set_options_replace_defaults() {
		let scope = ScopeSet::from_str("/authenticate").expect("Scope should parse.");
		let options = OrcidOptions::builder("APP-1", "secret")
			.name("ORCID Sandbox")
			.token_url(Url::parse("https://sandbox.orcid.org/oauth/token").expect("URL parses."))
			.scope(scope.clone())
			.userinfo_auth(UserInfoAuth::QueryParameter)
			.style(StyleOptions { bg: Some("#000".into()), ..Default::default() })
			.build();
		let descriptor = options.merge(ProviderDescriptor::orcid()).descriptor;

		assert_eq!(descriptor.name, "ORCID Sandbox");
		assert_eq!(descriptor.endpoints.token.as_str(), "https://sandbox.orcid.org/oauth/token");
		assert_eq!(descriptor.endpoints.authorization.as_str(), "https://orcid.org/oauth/authorize");
		assert_eq!(descriptor.authorization_params.scope, scope);
		assert_eq!(descriptor.userinfo_auth, UserInfoAuth::QueryParameter);
		assert_eq!(descriptor.style.bg, "#000");
		assert_eq!(descriptor.style.text, "#fff");
	}

	#[test]
	fn options_deserialize_with_partial_overrides() {
		let options: OrcidOptions = serde_json::from_str(
			r##"{
				"client_id": "APP-2",
				"client_secret": "from-config",
				"authorization_url": "https://sandbox.orcid.org/oauth/authorize",
				"style": { "text": "#111" }
			}"##,
		)
		.expect("Options should deserialize from JSON.");

		assert_eq!(options.client_secret.secret(), "from-config");
		assert!(options.token_url.is_none());
		assert_eq!(options.style.text.as_deref(), Some("#111"));
		assert!(options.style.bg.is_none());
	}

	#[test]
	fn options_debug_redacts_secret() {
		let rendered = format!("{:?}", OrcidOptions::new("APP-3", "hidden-value"));

		assert!(rendered.contains("APP-3"));
		assert!(!rendered.contains("hidden-value"));
	}
}
