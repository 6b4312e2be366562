//! Session token issuance and verification.
//!
//! Tokens are stateless JWTs binding a user ID to a one-hour expiry.
//! The signing secret is injected at construction; the service is pure
//! given (claims, secret, clock). There is no server-side revocation:
//! a token stays valid until its natural expiry.

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use maracuja_core::UserId;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token lifetime in seconds.
const TOKEN_TTL_SECS: i64 = 3600;

/// Errors that can occur during token operations.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The signature does not match or the token is malformed.
    #[error("invalid token")]
    Invalid,

    /// The token's expiry has passed.
    #[error("token expired")]
    Expired,

    /// The token could not be signed.
    #[error("token signing failed: {0}")]
    Signing(jsonwebtoken::errors::Error),
}

/// JWT claims carried by a session token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject: the user ID.
    sub: String,
    /// Issued-at, seconds since epoch.
    iat: i64,
    /// Expiry, seconds since epoch.
    exp: i64,
}

/// Issues and verifies session tokens.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Create a token service from the configured signing secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact; no clock-skew allowance.
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.expose_secret().as_bytes()),
            decoding: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation,
        }
    }

    /// Issue a token for the given subject, expiring in one hour.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Signing` if encoding fails.
    pub fn issue(&self, subject: UserId) -> Result<String, TokenError> {
        self.issue_with_ttl(subject, TOKEN_TTL_SECS)
    }

    /// Verify a token and return its subject.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Expired` if the current time exceeds the
    /// embedded expiry, `TokenError::Invalid` for any other failure
    /// (bad signature, malformed token, non-numeric subject).
    pub fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            }
        })?;

        data.claims
            .sub
            .parse::<UserId>()
            .map_err(|_| TokenError::Invalid)
    }

    pub(crate) fn issue_with_ttl(
        &self,
        subject: UserId,
        ttl_secs: i64,
    ) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            exp: now + ttl_secs,
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(TokenError::Signing)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(&SecretString::from("k9#mQ2$vX7!pL4@wN8^tR5&yB1*zD3%f"))
    }

    #[test]
    fn test_issue_then_verify_returns_subject() {
        let tokens = service();
        for id in [1, 42, i32::MAX] {
            let token = tokens.issue(UserId::new(id)).unwrap();
            assert_eq!(tokens.verify(&token).unwrap(), UserId::new(id));
        }
    }

    #[test]
    fn test_expired_token_rejected() {
        let tokens = service();
        let token = tokens.issue_with_ttl(UserId::new(7), -10).unwrap();
        assert!(matches!(tokens.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let tokens = service();
        let token = tokens.issue(UserId::new(7)).unwrap();

        // Flip the first character of the signature segment.
        let (head, signature) = token.rsplit_once('.').unwrap();
        let first = signature.chars().next().unwrap();
        let flipped = if first == 'A' { 'B' } else { 'A' };
        let tampered = format!("{head}.{flipped}{}", &signature[1..]);

        assert!(matches!(tokens.verify(&tampered), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let tokens = service();
        assert!(matches!(
            tokens.verify("not.a.token"),
            Err(TokenError::Invalid)
        ));
        assert!(matches!(tokens.verify(""), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_token_from_different_secret_rejected() {
        let a = service();
        let b = TokenService::new(&SecretString::from("w3&nT8#qZ5!xC2@vM9^jF6$hK4*rP7%d"));
        let token = a.issue(UserId::new(1)).unwrap();
        assert!(matches!(b.verify(&token), Err(TokenError::Invalid)));
    }
}
