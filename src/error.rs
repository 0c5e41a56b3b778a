//! Provider-level error types shared by the user-info fetch and profile mapping.

// self
use crate::{_prelude::*, provider::ProfileError};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
///
/// Nothing is retried or translated into a fallback value; every failure reaches the
/// host engine so it can decide how to report the failed login.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// User-info endpoint answered with something other than a JSON success body.
	#[error(transparent)]
	UserInfo(#[from] UserInfoError),
	/// User-info body does not describe an ORCID profile.
	#[error(transparent)]
	Profile(#[from] ProfileError),
}

impl Error {
	/// HTTP status returned by the user-info endpoint, when the failure carries one.
	pub fn http_status(&self) -> Option<u16> {
		match self {
			Self::UserInfo(
				UserInfoError::Status { status, .. } | UserInfoError::MalformedBody { status, .. },
			) => Some(*status),
			_ => None,
		}
	}
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Access token cannot be carried in an HTTP header.
	#[error("Access token contains characters that are not valid in an HTTP header.")]
	InvalidAccessToken,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failures reported by the user-info endpoint itself.
#[derive(Debug, ThisError)]
pub enum UserInfoError {
	/// Endpoint responded with a non-success status code.
	#[error("User-info endpoint returned HTTP {status}.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Truncated preview of the response body.
		body_preview: Option<String>,
	},
	/// Endpoint responded with a body that is not valid JSON.
	#[error("User-info endpoint returned malformed JSON.")]
	MalformedBody {
		/// JSON parsing failure.
		#[source]
		source: serde_json::Error,
		/// HTTP status code of the response.
		status: u16,
	},
}
impl UserInfoError {
	const BODY_PREVIEW_LIMIT: usize = 256;

	/// Builds a status failure, keeping at most a short preview of the body.
	pub fn status(status: u16, body: &[u8]) -> Self {
		let body_preview = if body.is_empty() {
			None
		} else {
			Some(truncate_preview(&String::from_utf8_lossy(body)))
		};

		Self::Status { status, body_preview }
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the user-info endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the user-info endpoint.")]
	Io(#[from] std::io::Error),
	/// Transport reported a failure without a structured error.
	#[error("Transport failed while calling the user-info endpoint: {message}.")]
	Other {
		/// Transport-supplied message.
		message: String,
	},
}

fn truncate_preview(body: &str) -> String {
	if body.chars().count() <= UserInfoError::BODY_PREVIEW_LIMIT {
		return body.to_owned();
	}

	let mut buf = String::new();

	for (idx, ch) in body.chars().enumerate() {
		if idx >= UserInfoError::BODY_PREVIEW_LIMIT {
			buf.push('…');

			break;
		}
		buf.push(ch);
	}

	buf
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn status_error_truncates_long_bodies() {
		let body = "x".repeat(UserInfoError::BODY_PREVIEW_LIMIT + 10);
		let UserInfoError::Status { status, body_preview } =
			UserInfoError::status(502, body.as_bytes())
		else {
			panic!("Status constructor should build the status variant.");
		};
		let preview = body_preview.expect("Non-empty bodies should produce a preview.");

		assert_eq!(status, 502);
		assert_eq!(preview.chars().count(), UserInfoError::BODY_PREVIEW_LIMIT + 1);
		assert!(preview.ends_with('…'));
	}

	#[test]
	fn http_status_is_exposed_for_endpoint_failures() {
		let status: Error = UserInfoError::status(503, b"down").into();
		let transport: Error = TransportError::Other { message: "reset".into() }.into();

		assert_eq!(status.http_status(), Some(503));
		assert_eq!(transport.http_status(), None);
	}

	#[test]
	fn status_error_omits_empty_bodies() {
		let err = UserInfoError::status(401, b"");

		assert!(matches!(err, UserInfoError::Status { status: 401, body_preview: None }));
		assert_eq!(err.to_string(), "User-info endpoint returned HTTP 401.");
	}
}
