//! JWT session token creation and verification.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{config::Config, errors::Error as AppError, types::UserId};

/// Token verification failure.
///
/// The sub-cases are distinct so callers can decide between prompting a
/// re-login (expired) and rejecting outright (tampered or garbled), but the
/// HTTP layer collapses all of them to a uniform 401.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// Signature does not match the payload: the token was tampered with or
    /// signed with a different secret
    #[error("invalid token signature")]
    InvalidSignature,

    /// Signature is valid but the token is past its expiry
    #[error("token expired")]
    Expired,

    /// Not a parseable token at all (wrong segment count, bad base64, ...)
    #[error("malformed token")]
    Malformed,
}

/// JWT session claims
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: UserId, // Subject (user ID)
    pub exp: i64,    // Expiration time
    pub iat: i64,    // Issued at
}

impl SessionClaims {
    /// Create new session claims for a user
    pub fn new(user_id: UserId, config: &Config) -> Self {
        let now = Utc::now();
        let exp = now + config.auth.session.jwt_expiry;

        Self {
            sub: user_id,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        }
    }
}

/// Create a JWT token for a user session
pub fn create_session_token(user_id: UserId, config: &Config) -> Result<String, AppError> {
    let claims = SessionClaims::new(user_id, config);
    let secret_key = config.secret_key.as_ref().ok_or_else(|| AppError::Internal {
        operation: "JWT sessions: secret_key is required".to_string(),
    })?;

    let key = EncodingKey::from_secret(secret_key.as_bytes());
    encode(&Header::default(), &claims, &key).map_err(|e| AppError::Internal {
        operation: format!("create JWT: {e}"),
    })
}

/// Verify and decode a JWT session token, returning the subject user id.
///
/// The signature is checked before any claim is interpreted: an attacker must
/// not be able to influence behaviour through fields of a token that was never
/// authentically signed. Only after integrity is established is expiry
/// evaluated, with zero leeway.
pub fn verify_session_token(token: &str, config: &Config) -> Result<UserId, AuthError> {
    let secret_key = config.secret_key.as_ref().ok_or(AuthError::InvalidSignature)?;

    let key = DecodingKey::from_secret(secret_key.as_bytes());
    let mut validation = Validation::default();
    // `now > exp` must fail exactly, not within a grace window
    validation.leeway = 0;

    let token_data = decode::<SessionClaims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        // Everything else is a token we could not even parse or that carries
        // claims of the wrong shape
        _ => AuthError::Malformed,
    })?;

    Ok(token_data.claims.sub)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_config;
    use uuid::Uuid;

    #[test]
    fn test_create_and_verify_session_token() {
        let config = create_test_config();
        let user_id = Uuid::new_v4();

        let token = create_session_token(user_id, &config).unwrap();
        assert!(!token.is_empty());

        let verified = verify_session_token(&token, &config).unwrap();
        assert_eq!(verified, user_id);
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let mut config = create_test_config();
        let user_id = Uuid::new_v4();

        let token = create_session_token(user_id, &config).unwrap();

        config.secret_key = Some("different-secret".to_string());
        let result = verify_session_token(&token, &config);
        assert_eq!(result, Err(AuthError::InvalidSignature));
    }

    #[test]
    fn test_verify_tampered_signature() {
        let config = create_test_config();
        let token = create_session_token(Uuid::new_v4(), &config).unwrap();

        // Flip a character in the signature segment
        let (head, sig) = token.rsplit_once('.').unwrap();
        let mut sig_bytes = sig.as_bytes().to_vec();
        sig_bytes[0] = if sig_bytes[0] == b'A' { b'B' } else { b'A' };
        let tampered = format!("{head}.{}", String::from_utf8(sig_bytes).unwrap());

        let result = verify_session_token(&tampered, &config);
        assert_eq!(result, Err(AuthError::InvalidSignature));
    }

    #[test]
    fn test_verify_tampered_payload() {
        let config = create_test_config();
        let token = create_session_token(Uuid::new_v4(), &config).unwrap();

        // Swap in claims for a different subject while keeping the old signature
        let parts: Vec<&str> = token.split('.').collect();
        let forged_claims = SessionClaims::new(Uuid::new_v4(), &config);
        let forged_payload = {
            use jsonwebtoken::EncodingKey;
            // Encode with the real secret just to harvest a valid payload segment
            let full = encode(&Header::default(), &forged_claims, &EncodingKey::from_secret(b"other")).unwrap();
            full.split('.').nth(1).unwrap().to_string()
        };
        let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        let result = verify_session_token(&forged, &config);
        assert_eq!(result, Err(AuthError::InvalidSignature));
    }

    #[test]
    fn test_verify_expired_token() {
        let config = create_test_config();
        let user_id = Uuid::new_v4();

        // Manually create a token whose expiry is in the past
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user_id,
            exp: (now - chrono::Duration::seconds(2)).timestamp(),
            iat: (now - chrono::Duration::seconds(3600)).timestamp(),
        };

        let secret_key = config.secret_key.as_ref().unwrap();
        let key = EncodingKey::from_secret(secret_key.as_bytes());
        let token = encode(&Header::default(), &claims, &key).unwrap();

        let result = verify_session_token(&token, &config);
        assert_eq!(result, Err(AuthError::Expired));
    }

    #[test]
    fn test_verify_token_just_inside_lifetime() {
        let config = create_test_config();
        let user_id = Uuid::new_v4();

        // exp one second from now: still valid
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user_id,
            exp: (now + chrono::Duration::seconds(1)).timestamp(),
            iat: now.timestamp(),
        };

        let secret_key = config.secret_key.as_ref().unwrap();
        let key = EncodingKey::from_secret(secret_key.as_bytes());
        let token = encode(&Header::default(), &claims, &key).unwrap();

        assert_eq!(verify_session_token(&token, &config), Ok(user_id));
    }

    #[test]
    fn test_verify_malformed_token() {
        let config = create_test_config();

        let malformed_tokens = ["not.a.token", "invalid", "", "too.many.parts.in.this.token"];

        for token in malformed_tokens {
            let result = verify_session_token(token, &config);
            assert_eq!(result, Err(AuthError::Malformed), "Expected Malformed error for token: {token}");
        }
    }
}
