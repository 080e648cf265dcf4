//! The Apple Music client: session ownership, request dispatch, and pagination.
//!
//! [`AppleMusicClient`] owns the validated [`ClientConfig`], the [`Session`] headers, and an
//! [`HttpTransport`]. Construction issues the first developer token, so a client that exists
//! always holds a credential. Every endpoint method funnels into [`AppleMusicClient::call`],
//! which renders an [`Endpoint`] from the table and hands the descriptor to the dispatcher.

pub mod catalog;
pub mod library;

pub use catalog::*;
pub use library::*;

// self
use crate::{
	_prelude::*,
	auth::{DeveloperCredential, TokenSecret},
	config::ClientConfig,
	endpoint::{Endpoint, RequestOptions},
	error::ConfigError,
	http::{HttpRequest, HttpTransport},
	obs::{self, RequestOutcome, RequestSpan},
	request::{ApiRequest, QueryParams},
	response::{self, JsonMap, ResponseDocument},
	session::Session,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Header declaring the JSON request body.
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestAppleMusicClient = AppleMusicClient<ReqwestHttpClient>;

/// Blocking Apple Music API client.
///
/// Session state is mutated only through `&mut self` (token refresh and music user token
/// assignment); every request method takes `&self` and reads the current headers.
pub struct AppleMusicClient<C>
where
	C: HttpTransport,
{
	config: ClientConfig,
	session: Session,
	transport: C,
}
impl<C> AppleMusicClient<C>
where
	C: HttpTransport,
{
	/// Creates a client that reuses the caller-provided transport.
	///
	/// Issues the initial developer token; a malformed key fails here, before any request.
	pub fn with_transport(config: ClientConfig, transport: C) -> Result<Self> {
		let credential =
			DeveloperCredential::issue(&config.team_id, &config.key_id, &config.private_key)?;
		let session = Session::new(credential, config.access_token.clone());

		Ok(Self { config, session, transport })
	}

	/// Validated configuration the client was built with.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Transport used for every request.
	pub fn transport(&self) -> &C {
		&self.transport
	}

	/// Current session headers.
	pub fn session(&self) -> &Session {
		&self.session
	}

	/// Current developer credential; use it to track expiry.
	pub fn developer_credential(&self) -> &DeveloperCredential {
		self.session.credential()
	}

	/// Current signed developer token.
	pub fn developer_token(&self) -> &TokenSecret {
		self.session.credential().token()
	}

	/// Issues a fresh developer token and replaces the stored one.
	///
	/// The old credential stays in place when issuing fails.
	pub fn refresh_developer_token(&mut self) -> Result<()> {
		let credential = DeveloperCredential::issue(
			&self.config.team_id,
			&self.config.key_id,
			&self.config.private_key,
		)?;

		obs::debug_event("Developer token refreshed.");
		self.session.replace_credential(credential);

		Ok(())
	}

	/// Current music user token, if set.
	pub fn access_token(&self) -> Option<&TokenSecret> {
		self.session.access_token()
	}

	/// Sets the music user token sent as `Music-User-Token`.
	pub fn set_access_token(&mut self, token: impl Into<String>) {
		self.session.set_access_token(Some(TokenSecret::new(token)));
	}

	/// Removes the music user token.
	pub fn clear_access_token(&mut self) {
		self.session.set_access_token(None);
	}

	/// Calls a table endpoint.
	pub fn call(
		&self,
		endpoint: &Endpoint,
		path_args: &[(&'static str, &str)],
		required: QueryParams,
		options: &RequestOptions,
		payload: Option<Value>,
	) -> Result<ResponseDocument> {
		let request = endpoint.build_request(path_args, required, options, payload)?;

		self.dispatch(endpoint.name, request)
	}

	/// Sends an arbitrary request descriptor.
	pub fn request(&self, request: ApiRequest) -> Result<ResponseDocument> {
		let label = request.endpoint.clone();

		self.dispatch(&label, request)
	}

	/// Follows the `next` cursor of a previous response.
	///
	/// Returns `Ok(None)` without sending anything when `resource` carries no cursor. The cursor
	/// is an absolute API path, so it is sent with an empty base path.
	pub fn next(&self, resource: &JsonMap, limit: Option<u32>) -> Result<Option<ResponseDocument>> {
		let Some(next) = response::next_cursor(resource) else {
			return Ok(None);
		};
		let mut query = QueryParams::new();

		if let Some(limit) = limit.filter(|limit| *limit > 0) {
			query.insert("limit", limit);
		}

		let request = ApiRequest::get(next).with_base_path("").with_query(query);

		self.dispatch("next", request).map(Some)
	}

	/// Composes the absolute URL: base URL, base path (or `/<version>`), endpoint, and query.
	pub fn compose_url(&self, request: &ApiRequest) -> Result<Url> {
		let base_path = match &request.base_path {
			Some(base_path) => base_path.clone(),
			None => self.config.version_path(),
		};
		let raw = format!("{}{}{}", self.config.base_url_str(), base_path, request.endpoint);
		let mut url = Url::parse(&raw)
			.map_err(|source| ConfigError::InvalidUrl { url: raw.clone(), source })?;

		if !request.query.is_empty() {
			let mut pairs = url.query_pairs_mut();

			for (key, value) in request.query.pairs() {
				pairs.append_pair(key, value);
			}
		}

		Ok(url)
	}

	fn dispatch(&self, label: &str, request: ApiRequest) -> Result<ResponseDocument> {
		self.dispatch_at(label, request, OffsetDateTime::now_utc())
	}

	/// Dispatches as if the current instant were `now`; the credential must still be fresh then.
	pub(crate) fn dispatch_at(
		&self,
		label: &str,
		request: ApiRequest,
		now: OffsetDateTime,
	) -> Result<ResponseDocument> {
		let method = request.method;
		let _span = RequestSpan::new(method, label).entered();

		obs::record_request_outcome(method, RequestOutcome::Attempt);

		let result = self.send(request, now);

		match &result {
			Ok(_) => obs::record_request_outcome(method, RequestOutcome::Success),
			Err(_) => {
				obs::debug_event("Request failed.");
				obs::record_request_outcome(method, RequestOutcome::Failure);
			},
		}

		result
	}

	fn send(&self, request: ApiRequest, now: OffsetDateTime) -> Result<ResponseDocument> {
		self.session.credential().ensure_fresh_at(now)?;

		let url = self.compose_url(&request)?;
		let body = request.body().map_err(ConfigError::from)?;
		let mut headers = self.session.headers();

		headers.push((CONTENT_TYPE_HEADER, "application/json".into()));

		let response = self.transport.execute(HttpRequest {
			method: request.method,
			url,
			headers,
			body,
			timeout: self.config.timeout,
		})?;

		if !response.is_success() {
			return Err(Error::Http { status: response.status, body: response.text() });
		}

		ResponseDocument::from_body(response.status, &response.body)
	}
}
#[cfg(feature = "reqwest")]
impl AppleMusicClient<ReqwestHttpClient> {
	/// Creates a new client backed by a default blocking reqwest transport.
	pub fn new(config: ClientConfig) -> Result<Self> {
		Self::with_transport(config, ReqwestHttpClient::try_default()?)
	}
}
impl<C> Debug for AppleMusicClient<C>
where
	C: HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AppleMusicClient")
			.field("base_url", &self.config.base_url_str())
			.field("api_version", &self.config.api_version)
			.field("credential", self.session.credential())
			.field("access_token_set", &self.session.access_token().is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		_preludet::{RecordingTransport, test_config},
		error::CredentialError,
		request::{Method, QueryValue},
	};

	fn client() -> AppleMusicClient<RecordingTransport> {
		AppleMusicClient::with_transport(test_config(), RecordingTransport::ok("{}"))
			.expect("Fixture client should build.")
	}

	#[test]
	fn compose_url_inserts_the_version_path() {
		let client = client();
		let request = ApiRequest::get("/catalog/us/songs")
			.with_query(QueryParams::new().with("ids", QueryValue::comma_joined([1, 2, 3])));
		let url = client.compose_url(&request).expect("URL should compose.");

		assert_eq!(url.as_str(), "https://api.music.apple.com/v1/catalog/us/songs?ids=1%2C2%2C3");
	}

	#[test]
	fn compose_url_honors_an_empty_base_path() {
		let client = client();
		let request = ApiRequest::get("/v1/me/library/songs?offset=25")
			.with_base_path("")
			.with_query(QueryParams::new().with("limit", 10_u32));
		let url = client.compose_url(&request).expect("URL should compose.");

		assert_eq!(url.as_str(), "https://api.music.apple.com/v1/me/library/songs?offset=25&limit=10");
	}

	#[test]
	fn compose_url_encodes_bracketed_keys_and_repeats_lists() {
		let client = client();
		let request = ApiRequest::new(Method::Delete, "/me/library/playlists/p.1").with_query(
			QueryParams::new()
				.with("ids[library-songs]", QueryValue::repeated(["i.1", "i.2"]))
				.with("mode", "all"),
		);
		let url = client.compose_url(&request).expect("URL should compose.");
		let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

		assert_eq!(
			pairs,
			vec![
				("ids[library-songs]".into(), "i.1".into()),
				("ids[library-songs]".into(), "i.2".into()),
				("mode".into(), "all".into()),
			]
		);
	}

	#[test]
	fn access_token_setter_updates_token_and_header_together() {
		let mut client = client();

		assert!(client.access_token().is_none());

		client.set_access_token("music-user-1");

		assert_eq!(client.access_token().map(TokenSecret::expose), Some("music-user-1"));
		assert_eq!(client.session().header("Music-User-Token").as_deref(), Some("music-user-1"));

		client.clear_access_token();

		assert!(client.session().header("Music-User-Token").is_none());
	}

	#[test]
	fn refresh_replaces_the_credential() {
		let mut client = client();
		let before = client.developer_credential().clone();

		client.refresh_developer_token().expect("Refresh should succeed with the fixture key.");

		let after = client.developer_credential();

		assert!(after.issued_at >= before.issued_at);
		assert_eq!(
			client.session().header("Authorization"),
			Some(format!("Bearer {}", after.token().expose()))
		);
	}

	#[test]
	fn expired_credential_is_refused_before_the_transport() {
		let transport = Arc::new(RecordingTransport::ok("{}"));
		let client = AppleMusicClient::with_transport(test_config(), transport.clone())
			.expect("Fixture client should build.");
		let expires_at = client.developer_credential().expires_at;
		let err = client
			.dispatch_at("catalog_song", ApiRequest::get("/catalog/us/songs/1"), expires_at)
			.expect_err("An expired developer token must not be sent.");

		assert!(
			matches!(
				err,
				Error::Credential(CredentialError::Expired { expired_at }) if expired_at == expires_at
			),
			"Unexpected error: {err:?}."
		);
		assert!(transport.requests().is_empty());

		client
			.dispatch_at(
				"catalog_song",
				ApiRequest::get("/catalog/us/songs/1"),
				expires_at - Duration::seconds(1),
			)
			.expect("A token one second before expiry should still be sent.");

		assert_eq!(transport.requests().len(), 1);
	}

	#[test]
	fn debug_output_hides_tokens() {
		let mut client = client();

		client.set_access_token("music-user-secret");

		let rendered = format!("{client:?}");

		assert!(rendered.contains("access_token_set: true"));
		assert!(!rendered.contains("music-user-secret"));
		assert!(!rendered.contains(client.developer_token().expose()));
	}
}
