//! Signed bearer tokens.
//!
//! A token is `base64url(claims JSON) + "." + base64url(HMAC-SHA256)`, both
//! parts unpadded. Verification checks the signature before it touches the
//! payload, then decodes and checks expiry.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use unveil_types::UserId;

use crate::crypto::{constant_time_eq, HmacKey};
use crate::error::AuthError;

/// Claims carried inside a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the user id.
    pub sub: String,
    /// Issue timestamp (milliseconds since epoch).
    pub issued: i64,
    /// Expiry timestamp (milliseconds since epoch).
    pub expires: i64,
}

impl TokenClaims {
    pub fn new(user_id: UserId, ttl: Duration) -> Self {
        let now = Utc::now().timestamp_millis();
        Self {
            sub: user_id.to_string(),
            issued: now,
            expires: now + ttl.as_millis() as i64,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires
    }

    /// The subject as a [`UserId`], if it parses.
    pub fn user_id(&self) -> Option<UserId> {
        UserId::parse(&self.sub).ok()
    }
}

/// Issues and verifies bearer tokens with a shared HMAC secret.
#[derive(Clone)]
pub struct TokenSigner {
    hmac_key: HmacKey,
    ttl: Duration,
}

impl TokenSigner {
    /// Create a signer.
    ///
    /// Fails with [`AuthError::Configuration`] when the secret is shorter
    /// than [`HmacKey::MIN_KEY_LENGTH`] bytes.
    pub fn new(secret: impl AsRef<[u8]>, ttl: Duration) -> Result<Self, AuthError> {
        let hmac_key =
            HmacKey::new(secret).map_err(|e| AuthError::Configuration(e.to_string()))?;
        Ok(Self { hmac_key, ttl })
    }

    /// Issue a fresh token for `user_id`.
    pub fn issue(&self, user_id: UserId) -> Result<String, AuthError> {
        self.encode(&TokenClaims::new(user_id, self.ttl))
    }

    /// Verify a token and return its claims.
    ///
    /// Signature failures and undecodable payloads are
    /// [`AuthError::InvalidToken`]; a valid signature over lapsed claims is
    /// [`AuthError::TokenExpired`].
    pub fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let parts: Vec<&str> = token.rsplitn(2, '.').collect();
        if parts.len() != 2 {
            return Err(AuthError::InvalidToken);
        }
        let (signature, claims_b64) = (parts[0], parts[1]);

        let expected = self.compute_signature(claims_b64);
        if !constant_time_eq(signature.as_bytes(), expected.as_bytes()) {
            tracing::debug!("token signature mismatch");
            return Err(AuthError::InvalidToken);
        }

        let claims_json = URL_SAFE_NO_PAD
            .decode(claims_b64)
            .map_err(|_| AuthError::InvalidToken)?;
        let claims: TokenClaims =
            serde_json::from_slice(&claims_json).map_err(|_| AuthError::InvalidToken)?;

        if claims.is_expired() {
            return Err(AuthError::TokenExpired);
        }
        Ok(claims)
    }

    fn encode(&self, claims: &TokenClaims) -> Result<String, AuthError> {
        let claims_json = serde_json::to_vec(claims).map_err(|e| {
            tracing::error!("failed to serialize token claims: {}", e);
            AuthError::Internal("failed to issue token".to_string())
        })?;
        let claims_b64 = URL_SAFE_NO_PAD.encode(&claims_json);
        let signature = self.compute_signature(&claims_b64);
        Ok(format!("{claims_b64}.{signature}"))
    }

    fn compute_signature(&self, data: &str) -> String {
        URL_SAFE_NO_PAD.encode(self.hmac_key.sign(data.as_bytes()))
    }
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-with-enough-length-0123456789";
    const HOUR: Duration = Duration::from_secs(60 * 60);

    fn signer() -> TokenSigner {
        TokenSigner::new(SECRET, HOUR).unwrap()
    }

    #[test]
    fn test_short_secret_rejected() {
        let result = TokenSigner::new("short", HOUR);
        assert!(matches!(result, Err(AuthError::Configuration(_))));
    }

    #[test]
    fn test_issue_verify_round_trip() {
        let signer = signer();
        let user_id = UserId::new();

        let token = signer.issue(user_id).unwrap();
        let claims = signer.verify(&token).unwrap();

        assert_eq!(claims.user_id(), Some(user_id));
        assert!(claims.expires > claims.issued);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let signer = signer();
        let token = signer.issue(UserId::new()).unwrap();

        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert!(matches!(
            signer.verify(&tampered),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_swapped_claims_rejected() {
        let signer = signer();
        let token = signer.issue(UserId::new()).unwrap();
        let signature = token.rsplitn(2, '.').next().unwrap();

        // Forge claims for another user and reuse the original signature.
        let forged = TokenClaims::new(UserId::new(), HOUR);
        let forged_b64 = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged).unwrap());
        let forged_token = format!("{forged_b64}.{signature}");

        assert!(matches!(
            signer.verify(&forged_token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = signer();
        let verifier =
            TokenSigner::new("another-secret-with-enough-length-987654", HOUR).unwrap();

        let token = issuer.issue(UserId::new()).unwrap();
        assert!(matches!(
            verifier.verify(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let signer = signer();
        let mut claims = TokenClaims::new(UserId::new(), HOUR);
        claims.expires = Utc::now().timestamp_millis() - 1_000;

        let token = signer.encode(&claims).unwrap();
        assert!(matches!(
            signer.verify(&token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        let signer = signer();

        // No separator.
        assert!(matches!(
            signer.verify("nodots"),
            Err(AuthError::InvalidToken)
        ));

        // Signature does not match, regardless of payload shape.
        assert!(matches!(
            signer.verify("!!!notbase64!!!.sig"),
            Err(AuthError::InvalidToken)
        ));

        // Correctly signed but not JSON claims.
        let not_json = URL_SAFE_NO_PAD.encode(b"not json");
        let sig = URL_SAFE_NO_PAD.encode(
            HmacKey::new(SECRET).unwrap().sign(not_json.as_bytes()),
        );
        assert!(matches!(
            signer.verify(&format!("{not_json}.{sig}")),
            Err(AuthError::InvalidToken)
        ));

        // Empty string.
        assert!(matches!(signer.verify(""), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_claims_expiry_window() {
        let claims = TokenClaims::new(UserId::new(), HOUR);
        assert!(!claims.is_expired());

        let mut lapsed = claims.clone();
        lapsed.expires = Utc::now().timestamp_millis() - 1;
        assert!(lapsed.is_expired());
    }
}
