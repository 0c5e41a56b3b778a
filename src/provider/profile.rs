//! ORCID user-info profile and its normalized identity.

// self
use crate::{_prelude::*, provider::descriptor::ORCID_ISSUER};

/// Name used when the profile carries no usable name fields.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Errors raised while reading a user-info body as an ORCID profile.
#[derive(Debug, ThisError)]
pub enum ProfileError {
	/// The `sub` claim is absent or not a string.
	#[error("User-info response is missing the `sub` claim.")]
	MissingSubject,
	/// The body does not match the profile shape.
	#[error("User-info response does not match the ORCID profile shape.")]
	Malformed {
		/// Structured parsing failure, including the offending JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Profile returned by the ORCID user-info endpoint.
///
/// Field names follow the OpenID Connect claims ORCID emits; `id` carries the canonical
/// record URL. Unknown claims are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrcidProfile {
	/// ORCID iD of the user (`sub`).
	#[serde(rename = "sub")]
	pub subject_id: String,
	/// Display name (`name`).
	#[serde(rename = "name", default, skip_serializing_if = "Option::is_none")]
	pub full_name: Option<String>,
	/// Given name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub given_name: Option<String>,
	/// Family name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub family_name: Option<String>,
	/// Primary email, when the user made it visible.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// Avatar URL (`picture`).
	#[serde(rename = "picture", default, skip_serializing_if = "Option::is_none")]
	pub picture_url: Option<String>,
	/// Public record URL (`id`).
	#[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
	pub profile_url: Option<String>,
}
impl OrcidProfile {
	/// Creates a profile carrying only the subject.
	pub fn new(subject_id: impl Into<String>) -> Self {
		Self {
			subject_id: subject_id.into(),
			full_name: None,
			given_name: None,
			family_name: None,
			email: None,
			picture_url: None,
			profile_url: None,
		}
	}

	/// Reads a fetched user-info body.
	pub fn from_json(value: Value) -> Result<Self, ProfileError> {
		if !matches!(value.get("sub"), Some(Value::String(_))) {
			return Err(ProfileError::MissingSubject);
		}

		serde_path_to_error::deserialize(value).map_err(|source| ProfileError::Malformed { source })
	}
}

/// Identity handed back to the host engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
	/// Provider-scoped user identifier.
	pub id: String,
	/// Display name; never empty.
	pub name: String,
	/// Email, passed through untouched.
	pub email: Option<String>,
	/// Avatar URL.
	pub image: Option<String>,
	/// Public profile URL.
	pub url: String,
}

/// Maps a fetched profile into the host engine's identity shape.
///
/// Callers replace [`OrcidProfileMapper`] through
/// [`OrcidOptionsBuilder::profile_mapper`](crate::provider::OrcidOptionsBuilder::profile_mapper)
/// when their engine needs extra fields or a different naming rule.
pub trait ProfileMapper: Send + Sync {
	/// Produces the normalized identity for `profile`.
	fn normalize(&self, profile: &OrcidProfile) -> Identity;
}

/// Default mapping.
///
/// Empty strings count as absent everywhere, so `name: ""` falls through to the
/// given/family fallback and `id: ""` falls back to the canonical record URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrcidProfileMapper {
	/// Base that canonical record URLs are built from (`<base>/<subject_id>`).
	pub record_base: Url,
}
impl OrcidProfileMapper {
	/// Builds a mapper whose canonical URLs live under `record_base`.
	pub fn new(record_base: Url) -> Self {
		Self { record_base }
	}

	fn record_url(&self, subject_id: &str) -> String {
		format!("{}/{subject_id}", self.record_base.as_str().trim_end_matches('/'))
	}
}
impl Default for OrcidProfileMapper {
	fn default() -> Self {
		Self::new(Url::parse(ORCID_ISSUER).expect("Built-in ORCID issuer must parse."))
	}
}
impl ProfileMapper for OrcidProfileMapper {
	fn normalize(&self, profile: &OrcidProfile) -> Identity {
		let name = match present(&profile.full_name) {
			Some(full_name) => full_name.to_owned(),
			None => {
				let given = present(&profile.given_name).unwrap_or(UNKNOWN_NAME);
				let family = present(&profile.family_name).unwrap_or_default();

				format!("{given} {family}").trim().to_owned()
			},
		};
		let url = match present(&profile.profile_url) {
			Some(url) => url.to_owned(),
			None => self.record_url(&profile.subject_id),
		};

		Identity {
			id: profile.subject_id.clone(),
			name,
			email: profile.email.clone(),
			image: profile.picture_url.clone(),
			url,
		}
	}
}

fn present(field: &Option<String>) -> Option<&str> {
	field.as_deref().filter(|value| !value.is_empty())
}
