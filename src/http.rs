//! Blocking transport primitives for Apple Music API calls.
//!
//! The module exposes [`HttpTransport`] alongside the wire-level [`HttpRequest`] and
//! [`HttpResponse`] so downstream crates can plug in their own HTTP stack. The client hands every
//! transport a fully composed request (absolute URL, headers, JSON body, timeout) and only
//! expects the status code and raw body back; status classification and JSON decoding stay in the
//! dispatcher so every transport behaves identically.

// self
use crate::{_prelude::*, request::Method};
#[cfg(feature = "reqwest")]
use crate::error::{ConfigError, TransportError};

/// Wire-level request handed to an [`HttpTransport`].
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
	/// HTTP verb.
	pub method: Method,
	/// Absolute URL including the query string.
	pub url: Url,
	/// Header pairs in attachment order.
	pub headers: Vec<(&'static str, String)>,
	/// Serialized JSON body.
	pub body: Vec<u8>,
	/// Per-request timeout.
	pub timeout: Duration,
}
impl HttpRequest {
	/// Returns the first header value matching `name` (case-insensitive).
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}
}

/// Wire-level response returned by an [`HttpTransport`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl HttpResponse {
	/// Creates a response from a status code and body.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}

	/// Returns `true` for 2xx status codes.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Body as text, replacing invalid UTF-8 sequences.
	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}
}

/// Abstraction over blocking HTTP stacks able to execute Apple Music requests.
///
/// Implementations must honor [`HttpRequest::timeout`] and report an elapsed timeout as
/// [`Error::Timeout`] so callers can tell it apart from other transport failures. Any HTTP
/// status, including 4xx/5xx, is a successful transport outcome and must be returned as an
/// [`HttpResponse`].
pub trait HttpTransport
where
	Self: Send + Sync,
{
	/// Performs the round trip, blocking the calling thread.
	fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}
impl<T> HttpTransport for Arc<T>
where
	T: ?Sized + HttpTransport,
{
	fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
		(**self).execute(request)
	}
}

/// Thin wrapper around the blocking [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing blocking reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client with the crate's default settings.
	pub fn try_default() -> Result<Self> {
		let client = ReqwestClient::builder()
			.user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
			.build()
			.map_err(ConfigError::http_client_build)?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestHttpClient {
	fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
		let timeout = request.timeout;
		let mut builder = self
			.0
			.request(reqwest_method(request.method), request.url)
			.body(request.body);

		for (name, value) in request.headers {
			builder = builder.header(name, value);
		}
		if let Ok(limit) = StdDuration::try_from(timeout) {
			builder = builder.timeout(limit);
		}

		let response = builder.send().map_err(|err| map_reqwest_error(err, timeout))?;
		let status = response.status().as_u16();
		let body = response.bytes().map_err(|err| map_reqwest_error(err, timeout))?;

		Ok(HttpResponse::new(status, body.to_vec()))
	}
}

#[cfg(feature = "reqwest")]
fn reqwest_method(method: Method) -> reqwest::Method {
	match method {
		Method::Get => reqwest::Method::GET,
		Method::Post => reqwest::Method::POST,
		Method::Put => reqwest::Method::PUT,
		Method::Patch => reqwest::Method::PATCH,
		Method::Delete => reqwest::Method::DELETE,
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(err: ReqwestError, timeout: Duration) -> Error {
	if err.is_timeout() {
		return Error::Timeout { timeout };
	}
	if err.is_builder() {
		return ConfigError::http_client_build(err).into();
	}

	TransportError::network(err).into()
}
