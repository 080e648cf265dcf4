//! Client-owned header state: the current developer credential and the optional music user token.

// self
use crate::{
	_prelude::*,
	auth::{DeveloperCredential, TokenSecret},
};

/// Header carrying the developer token.
pub const AUTHORIZATION_HEADER: &str = "Authorization";
/// Header carrying the end-user (music user) token.
pub const MUSIC_USER_TOKEN_HEADER: &str = "Music-User-Token";

/// Session headers attached to every outbound request.
///
/// The credential is only ever replaced as a whole; header values are derived from the stored
/// fields on demand so the token and its header can never disagree.
#[derive(Clone, Debug)]
pub struct Session {
	credential: DeveloperCredential,
	access_token: Option<TokenSecret>,
}
impl Session {
	/// Creates a session from an issued credential and optional music user token.
	pub fn new(credential: DeveloperCredential, access_token: Option<TokenSecret>) -> Self {
		Self { credential, access_token }
	}

	/// Current developer credential.
	pub fn credential(&self) -> &DeveloperCredential {
		&self.credential
	}

	/// Replaces the developer credential wholesale.
	pub fn replace_credential(&mut self, credential: DeveloperCredential) {
		self.credential = credential;
	}

	/// Current music user token, if set.
	pub fn access_token(&self) -> Option<&TokenSecret> {
		self.access_token.as_ref()
	}

	/// Sets or clears the music user token.
	pub fn set_access_token(&mut self, token: Option<TokenSecret>) {
		self.access_token = token;
	}

	/// Header pairs in the order they are attached to a request.
	pub fn headers(&self) -> Vec<(&'static str, String)> {
		let mut headers = vec![(
			AUTHORIZATION_HEADER,
			format!("Bearer {}", self.credential.token().expose()),
		)];

		if let Some(token) = &self.access_token {
			headers.push((MUSIC_USER_TOKEN_HEADER, token.expose().to_owned()));
		}

		headers
	}

	/// Looks up a single header value by case-insensitive name.
	pub fn header(&self, name: &str) -> Option<String> {
		self.headers()
			.into_iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value)
	}
}
