//! ES256 developer-token issuer.
//!
//! Apple Music authenticates applications with a short-lived JWT signed by a MusicKit private
//! key. [`DeveloperCredential::issue`] produces one such token: the header carries `alg = ES256`
//! and the key identifier (`kid`), while the claims assert the team (`iss`), the issue instant
//! (`iat`), and an expiry exactly [`DEVELOPER_TOKEN_LIFETIME`] later (`exp`). Credentials are
//! immutable; refreshing means issuing a new one and replacing the old value wholesale.

// crates.io
use jsonwebtoken::{Algorithm, EncodingKey, Header};
// self
use crate::{
	_prelude::*,
	auth::{KeyId, PrivateKey, TeamId, TokenSecret},
	error::CredentialError,
};

/// Lifetime of every issued developer token.
pub const DEVELOPER_TOKEN_LIFETIME: Duration = Duration::hours(12);

/// Signing algorithm required by the Apple Music API.
pub const DEVELOPER_TOKEN_ALGORITHM: Algorithm = Algorithm::ES256;

/// Claims carried by the developer token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeveloperClaims {
	/// Issuer: the developer team identifier.
	pub iss: String,
	/// Issued-at instant as a Unix timestamp.
	pub iat: i64,
	/// Expiry instant as a Unix timestamp.
	pub exp: i64,
}

/// Signed, time-bounded developer token plus the metadata it was issued with.
#[derive(Clone)]
pub struct DeveloperCredential {
	/// Team identifier asserted as the issuer.
	pub team_id: TeamId,
	/// Key identifier embedded in the token header.
	pub key_id: KeyId,
	/// Issued-at instant, truncated to whole seconds.
	pub issued_at: OffsetDateTime,
	/// Expiry instant (`issued_at` + 12 hours).
	pub expires_at: OffsetDateTime,
	token: TokenSecret,
}
impl DeveloperCredential {
	/// Issues a new developer token using the current UTC instant.
	pub fn issue(
		team_id: &TeamId,
		key_id: &KeyId,
		private_key: &PrivateKey,
	) -> Result<Self, CredentialError> {
		Self::issue_at(team_id, key_id, private_key, OffsetDateTime::now_utc())
	}

	/// Issues a developer token as if the current instant were `now`.
	pub fn issue_at(
		team_id: &TeamId,
		key_id: &KeyId,
		private_key: &PrivateKey,
		now: OffsetDateTime,
	) -> Result<Self, CredentialError> {
		let encoding_key = EncodingKey::from_ec_pem(private_key.expose_pem())
			.map_err(|source| CredentialError::InvalidKey { source })?;
		let iat = now.unix_timestamp();
		let exp = iat
			.checked_add(DEVELOPER_TOKEN_LIFETIME.whole_seconds())
			.ok_or(CredentialError::LifetimeOutOfRange)?;
		let issued_at = OffsetDateTime::from_unix_timestamp(iat)
			.map_err(|_| CredentialError::LifetimeOutOfRange)?;
		let expires_at = OffsetDateTime::from_unix_timestamp(exp)
			.map_err(|_| CredentialError::LifetimeOutOfRange)?;
		let claims = DeveloperClaims { iss: team_id.to_string(), iat, exp };
		let mut header = Header::new(DEVELOPER_TOKEN_ALGORITHM);

		header.kid = Some(key_id.to_string());

		let token = jsonwebtoken::encode(&header, &claims, &encoding_key)
			.map_err(|source| CredentialError::Signing { source })?;

		Ok(Self {
			team_id: team_id.clone(),
			key_id: key_id.clone(),
			issued_at,
			expires_at,
			token: TokenSecret::new(token),
		})
	}

	/// Returns the compact signed token. Callers must avoid logging this string.
	pub fn token(&self) -> &TokenSecret {
		&self.token
	}

	/// Returns `true` if the token is expired at the provided instant.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		instant >= self.expires_at
	}

	/// Returns `true` if the token is expired relative to the current clock.
	pub fn is_expired(&self) -> bool {
		self.is_expired_at(OffsetDateTime::now_utc())
	}

	/// Time left before expiry at the provided instant; zero once expired.
	pub fn remaining_at(&self, instant: OffsetDateTime) -> Duration {
		let remaining = self.expires_at - instant;

		if remaining.is_negative() { Duration::ZERO } else { remaining }
	}

	/// Rejects the credential when it is already expired at `instant`.
	pub(crate) fn ensure_fresh_at(&self, instant: OffsetDateTime) -> Result<(), CredentialError> {
		if self.is_expired_at(instant) {
			return Err(CredentialError::Expired { expired_at: self.expires_at });
		}

		Ok(())
	}
}
impl Debug for DeveloperCredential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("DeveloperCredential")
			.field("team_id", &self.team_id)
			.field("key_id", &self.key_id)
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.field("token", &"<redacted>")
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use jsonwebtoken::{DecodingKey, Validation};
	use time::macros::datetime;
	// self
	use super::*;
	use crate::_preludet::{TEST_PRIVATE_KEY, TEST_PUBLIC_KEY};

	fn ids() -> (TeamId, KeyId) {
		(
			TeamId::new("TEAM123456").expect("Team fixture should be valid."),
			KeyId::new("KEY7890ABC").expect("Key fixture should be valid."),
		)
	}

	#[test]
	fn issued_token_carries_kid_alg_and_twelve_hour_window() {
		let (team, key) = ids();
		let credential =
			DeveloperCredential::issue(&team, &key, &PrivateKey::from_pem(TEST_PRIVATE_KEY))
				.expect("Issuing with the fixture key should succeed.");
		let token = credential.token().expose();
		let header = jsonwebtoken::decode_header(token).expect("Token header should decode.");

		assert_eq!(header.alg, Algorithm::ES256);
		assert_eq!(header.kid.as_deref(), Some("KEY7890ABC"));

		let decoding_key = DecodingKey::from_ec_pem(TEST_PUBLIC_KEY.as_bytes())
			.expect("Fixture public key should parse.");
		let data = jsonwebtoken::decode::<DeveloperClaims>(
			token,
			&decoding_key,
			&Validation::new(Algorithm::ES256),
		)
		.expect("Token should verify against the fixture public key.");

		assert_eq!(data.claims.iss, "TEAM123456");
		assert_eq!(data.claims.exp - data.claims.iat, 12 * 60 * 60);
		assert_eq!(credential.issued_at.unix_timestamp(), data.claims.iat);
		assert_eq!(credential.expires_at - credential.issued_at, DEVELOPER_TOKEN_LIFETIME);
	}

	#[test]
	fn issue_at_truncates_to_whole_seconds() {
		let (team, key) = ids();
		let now = datetime!(2024-03-01 10:00:00.750 UTC);
		let credential = DeveloperCredential::issue_at(
			&team,
			&key,
			&PrivateKey::from_pem(TEST_PRIVATE_KEY),
			now,
		)
		.expect("Issuing with the fixture key should succeed.");

		assert_eq!(credential.issued_at, datetime!(2024-03-01 10:00:00 UTC));
		assert_eq!(credential.expires_at, datetime!(2024-03-01 22:00:00 UTC));
		assert!(!credential.is_expired_at(datetime!(2024-03-01 21:59:59 UTC)));
		assert!(credential.is_expired_at(datetime!(2024-03-01 22:00:00 UTC)));
		assert_eq!(credential.remaining_at(datetime!(2024-03-01 21:00:00 UTC)), Duration::hours(1));
		assert_eq!(credential.remaining_at(datetime!(2024-03-02 00:00:00 UTC)), Duration::ZERO);
	}

	#[test]
	fn malformed_key_is_a_credential_error() {
		let (team, key) = ids();
		let err = DeveloperCredential::issue(&team, &key, &PrivateKey::from_pem("not a key"))
			.expect_err("Malformed keys must not sign.");

		assert!(matches!(err, CredentialError::InvalidKey { .. }));
	}

	#[test]
	fn expired_credentials_are_rejected() {
		let (team, key) = ids();
		let credential = DeveloperCredential::issue_at(
			&team,
			&key,
			&PrivateKey::from_pem(TEST_PRIVATE_KEY),
			datetime!(2024-03-01 00:00:00 UTC),
		)
		.expect("Issuing with the fixture key should succeed.");

		credential
			.ensure_fresh_at(datetime!(2024-03-01 11:59:59 UTC))
			.expect("Credential should still be fresh.");

		let err = credential
			.ensure_fresh_at(datetime!(2024-03-01 12:00:00 UTC))
			.expect_err("Credential should be expired.");

		assert!(matches!(
			err,
			CredentialError::Expired { expired_at } if expired_at == credential.expires_at
		));
	}

	#[test]
	fn debug_output_redacts_the_token() {
		let (team, key) = ids();
		let credential =
			DeveloperCredential::issue(&team, &key, &PrivateKey::from_pem(TEST_PRIVATE_KEY))
				.expect("Issuing with the fixture key should succeed.");
		let rendered = format!("{credential:?}");

		assert!(rendered.contains("<redacted>"));
		assert!(!rendered.contains(credential.token().expose()));
	}
}
