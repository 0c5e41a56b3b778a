//! Client credentials supplied by the caller.

// crates.io
use oauth2::{ClientId, ClientSecret};
// self
use crate::_prelude::*;

/// OAuth client registration issued by ORCID (`APP-…` identifier plus secret).
///
/// The values are carried verbatim; an empty or unknown client surfaces only when the
/// host engine talks to the token endpoint. [`ClientSecret`] redacts itself in `Debug`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientCredentials {
	/// Registered client identifier.
	pub client_id: ClientId,
	/// Registered client secret.
	pub client_secret: ClientSecret,
}
impl ClientCredentials {
	/// Wraps a client identifier and secret.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self {
			client_id: ClientId::new(client_id.into()),
			client_secret: ClientSecret::new(client_secret.into()),
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn debug_output_redacts_secret() {
		let credentials = ClientCredentials::new("APP-123", "super-secret");
		let rendered = format!("{credentials:?}");

		assert!(rendered.contains("APP-123"));
		assert!(!rendered.contains("super-secret"));
		assert_eq!(credentials.client_secret.secret(), "super-secret");
	}
}
