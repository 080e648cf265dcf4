//! Client-level error types shared across the token issuer, dispatcher, and transports.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Developer token could not be generated or is no longer usable.
	#[error("Credential generation failed: {0}")]
	Credential(#[from] CredentialError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, IO).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// API answered with a non-success status code.
	#[error("Apple Music API returned HTTP {status}.")]
	Http {
		/// HTTP status code returned by the API.
		status: u16,
		/// Raw response body, kept for caller inspection.
		body: String,
	},
	/// Request exceeded the configured timeout.
	#[error("Request timed out after {timeout}.")]
	Timeout {
		/// Timeout that was in effect for the request.
		timeout: Duration,
	},
	/// API answered with a success status but the body is not a JSON object.
	#[error("Apple Music API returned malformed JSON (HTTP {status}) at `{path}`.")]
	MalformedResponse {
		/// HTTP status code of the response.
		status: u16,
		/// JSON path where decoding stopped; `<end>` for content after the document.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: serde_json::Error,
	},
	/// Response document does not match the model requested by the caller.
	#[error("Response document does not match the requested model.")]
	Decode {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl Error {
	/// Returns the HTTP status code carried by the error, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Http { status, .. } | Self::MalformedResponse { status, .. } => Some(*status),
			_ => None,
		}
	}

	/// Returns `true` when the error was caused by the request timeout.
	pub fn is_timeout(&self) -> bool {
		matches!(self, Self::Timeout { .. })
	}
}

/// Failures raised while issuing or using the developer token.
#[derive(Debug, ThisError)]
pub enum CredentialError {
	/// Private key is not a valid EC private key in PKCS#8 PEM form.
	#[error("the private key is not a valid EC (P-256) PEM key")]
	InvalidKey {
		/// Underlying key parsing failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
	/// ES256 signing failed.
	#[error("the developer token could not be signed")]
	Signing {
		/// Underlying signing failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
	/// Token lifetime does not fit into a Unix timestamp.
	#[error("the developer token lifetime is out of range")]
	LifetimeOutOfRange,
	/// Stored developer token expired before the request was sent.
	#[error("the developer token expired at {expired_at}; refresh it before sending requests")]
	Expired {
		/// Expiry instant of the stale token.
		expired_at: OffsetDateTime,
	},
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Client configuration failed validation.
	#[error(transparent)]
	Client(#[from] crate::config::ClientConfigError),
	/// Identifier failed validation.
	#[error(transparent)]
	Identifier(#[from] crate::auth::IdentifierError),
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Composed request URL cannot be parsed.
	#[error("Request URL `{url}` is invalid.")]
	InvalidUrl {
		/// URL text that failed to parse.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Path parameter would escape its path segment.
	#[error("Path parameter `{name}` has an invalid value `{value}`.")]
	InvalidPathParameter {
		/// Placeholder name in the endpoint template.
		name: &'static str,
		/// Rejected value.
		value: String,
	},
	/// Endpoint template references a placeholder that was not supplied.
	#[error("Endpoint `{endpoint}` requires the `{name}` path parameter.")]
	MissingPathParameter {
		/// Endpoint label.
		endpoint: &'static str,
		/// Missing placeholder name.
		name: String,
	},
	/// Optional parameter is not accepted by the endpoint.
	#[error("Endpoint `{endpoint}` does not accept the `{param}` parameter.")]
	UnsupportedParameter {
		/// Endpoint label.
		endpoint: &'static str,
		/// Rejected parameter name.
		param: &'static str,
	},
	/// Request payload could not be serialized.
	#[error("Request payload could not be serialized.")]
	PayloadEncode(#[from] serde_json::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the Apple Music API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
