//! Client construction parameters and their validating builder.

// self
use crate::{
	_prelude::*,
	auth::{KeyId, PrivateKey, TeamId, TokenSecret},
};

/// Production Apple Music API origin.
pub const DEFAULT_BASE_URL: &str = "https://api.music.apple.com";
/// API version segment inserted between the origin and endpoint paths.
pub const DEFAULT_API_VERSION: &str = "v1";
/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::seconds(30);

/// Errors raised while validating a [`ClientConfig`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ClientConfigError {
	/// Team identifier is required to sign developer tokens.
	#[error("Missing team identifier.")]
	MissingTeamId,
	/// Key identifier is required to sign developer tokens.
	#[error("Missing key identifier.")]
	MissingKeyId,
	/// Private key is required to sign developer tokens.
	#[error("Missing private key.")]
	MissingPrivateKey,
	/// Base URL must use HTTP(S).
	#[error("The base URL must use http or https: {url}.")]
	UnsupportedScheme {
		/// Base URL that failed validation.
		url: String,
	},
	/// Base URL must be a bare origin or path prefix.
	#[error("The base URL must not carry a query or fragment: {url}.")]
	UnexpectedUrlComponents {
		/// Base URL that failed validation.
		url: String,
	},
	/// API version must be a single non-empty path segment.
	#[error("The API version `{version}` must be a single path segment.")]
	InvalidApiVersion {
		/// Rejected version string.
		version: String,
	},
	/// Timeout must be positive.
	#[error("The request timeout must be positive.")]
	NonPositiveTimeout,
}

/// Validated construction parameters for [`AppleMusicClient`](crate::client::AppleMusicClient).
#[derive(Clone, Debug)]
pub struct ClientConfig {
	/// Developer team identifier (`iss`).
	pub team_id: TeamId,
	/// MusicKit key identifier (`kid`).
	pub key_id: KeyId,
	/// PEM-encoded EC private key.
	pub private_key: PrivateKey,
	/// Optional music user token for library endpoints.
	pub access_token: Option<TokenSecret>,
	/// API origin without trailing slash.
	pub base_url: Url,
	/// API version segment.
	pub api_version: String,
	/// Per-request timeout.
	pub timeout: Duration,
}
impl ClientConfig {
	/// Returns a builder seeded with the production defaults.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::default()
	}

	/// Shorthand for a configuration using every default.
	pub fn new(
		team_id: TeamId,
		key_id: KeyId,
		private_key: impl Into<PrivateKey>,
	) -> Result<Self, ClientConfigError> {
		Self::builder().team_id(team_id).key_id(key_id).private_key(private_key).build()
	}

	/// Returns the base URL text without a trailing slash, ready for path concatenation.
	pub fn base_url_str(&self) -> &str {
		self.base_url.as_str().trim_end_matches('/')
	}

	/// Path prefix applied when a request carries no explicit base-path override.
	pub fn version_path(&self) -> String {
		format!("/{}", self.api_version)
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	/// Developer team identifier.
	pub team_id: Option<TeamId>,
	/// MusicKit key identifier.
	pub key_id: Option<KeyId>,
	/// PEM-encoded EC private key.
	pub private_key: Option<PrivateKey>,
	/// Optional music user token.
	pub access_token: Option<TokenSecret>,
	/// API origin.
	pub base_url: Option<Url>,
	/// API version segment.
	pub api_version: String,
	/// Per-request timeout.
	pub timeout: Duration,
}
impl ClientConfigBuilder {
	/// Sets the team identifier.
	pub fn team_id(mut self, team_id: TeamId) -> Self {
		self.team_id = Some(team_id);

		self
	}

	/// Sets the key identifier.
	pub fn key_id(mut self, key_id: KeyId) -> Self {
		self.key_id = Some(key_id);

		self
	}

	/// Sets the PEM-encoded private key.
	pub fn private_key(mut self, private_key: impl Into<PrivateKey>) -> Self {
		self.private_key = Some(private_key.into());

		self
	}

	/// Sets the music user token attached as `Music-User-Token`.
	pub fn access_token(mut self, token: impl Into<String>) -> Self {
		self.access_token = Some(TokenSecret::new(token));

		self
	}

	/// Overrides the API origin (defaults to [`DEFAULT_BASE_URL`]).
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Overrides the API version segment (defaults to [`DEFAULT_API_VERSION`]).
	pub fn api_version(mut self, version: impl Into<String>) -> Self {
		self.api_version = version.into();

		self
	}

	/// Overrides the per-request timeout (defaults to [`DEFAULT_TIMEOUT`]).
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ClientConfigError> {
		let team_id = self.team_id.ok_or(ClientConfigError::MissingTeamId)?;
		let key_id = self.key_id.ok_or(ClientConfigError::MissingKeyId)?;
		let private_key = self.private_key.ok_or(ClientConfigError::MissingPrivateKey)?;
		let base_url = match self.base_url {
			Some(url) => url,
			None => Url::parse(DEFAULT_BASE_URL).map_err(|_| {
				ClientConfigError::UnsupportedScheme { url: DEFAULT_BASE_URL.into() }
			})?,
		};

		if !matches!(base_url.scheme(), "http" | "https") {
			return Err(ClientConfigError::UnsupportedScheme { url: base_url.to_string() });
		}
		if base_url.query().is_some() || base_url.fragment().is_some() {
			return Err(ClientConfigError::UnexpectedUrlComponents { url: base_url.to_string() });
		}
		if self.api_version.is_empty()
			|| self.api_version.contains('/')
			|| self.api_version.chars().any(char::is_whitespace)
		{
			return Err(ClientConfigError::InvalidApiVersion { version: self.api_version });
		}
		if !self.timeout.is_positive() {
			return Err(ClientConfigError::NonPositiveTimeout);
		}

		Ok(ClientConfig {
			team_id,
			key_id,
			private_key,
			access_token: self.access_token,
			base_url,
			api_version: self.api_version,
			timeout: self.timeout,
		})
	}
}
impl Default for ClientConfigBuilder {
	fn default() -> Self {
		Self {
			team_id: None,
			key_id: None,
			private_key: None,
			access_token: None,
			base_url: None,
			api_version: DEFAULT_API_VERSION.into(),
			timeout: DEFAULT_TIMEOUT,
		}
	}
}
