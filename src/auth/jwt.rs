//! JWT token handling

use crate::auth::models::{StoreId, UserProfile, UserRole};
use crate::error::{Error, Result};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Default token lifetime
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Longest token lifetime accepted from configuration (one year)
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub email: String,
    /// Display name
    pub name: String,
    pub role: UserRole,
    pub store_id: Option<StoreId>,
    pub avatar: String,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
    /// Token ID
    pub jti: String,
    /// Issued locally by the client's offline mode
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub offline: bool,
}

impl Claims {
    /// Create claims from a user profile
    pub fn from_profile(profile: &UserProfile, ttl: Duration) -> Self {
        let now = Utc::now().timestamp();
        Self {
            email: profile.email.clone(),
            name: profile.name.clone(),
            role: profile.role,
            store_id: profile.store_id,
            avatar: profile.avatar.clone(),
            iat: now,
            exp: now.saturating_add(ttl.num_seconds()),
            jti: uuid::Uuid::new_v4().to_string(),
            offline: false,
        }
    }

    /// Profile fields carried by the token
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
            store_id: self.store_id,
            avatar: self.avatar.clone(),
        }
    }

    /// Check if token is expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Signing and verification keys for session tokens
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    offline: bool,
}

impl JwtKeys {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
            offline: false,
        }
    }

    /// Mark every token issued with these keys as locally issued
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    /// Create a signed token for a profile
    pub fn issue(&self, profile: &UserProfile) -> Result<(String, Claims)> {
        let mut claims = Claims::from_profile(profile, self.ttl);
        claims.offline = self.offline;
        let token = self.sign(&claims)?;
        Ok((token, claims))
    }

    /// Sign arbitrary claims
    pub fn sign(&self, claims: &Claims) -> Result<String> {
        encode(&Header::default(), claims, &self.encoding)
            .map_err(|e| Error::Server(format!("Failed to create token: {}", e)))
    }

    /// Validate signature and expiry and decode the claims. A token whose
    /// `offline` flag differs from these keys is rejected even when the
    /// signature checks out.
    pub fn validate(&self, token: &str) -> Result<Claims> {
        let claims = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| Error::Unauthorized(format!("Invalid token: {}", e)))?;

        if claims.offline != self.offline {
            return Err(Error::Unauthorized(
                "Offline token not accepted here".to_string(),
            ));
        }
        Ok(claims)
    }
}

/// Decode the claims of a token without checking its signature.
///
/// Only for the client, which cannot hold the server secret but still
/// needs the expiry of a persisted token.
pub fn peek_claims(token: &str) -> Result<Claims> {
    let mut parts = token.split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => {
            return Err(Error::MalformedPersistedState(
                "token is not a JWT".to_string(),
            ))
        }
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| Error::MalformedPersistedState(format!("token payload: {}", e)))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| Error::MalformedPersistedState(format!("token claims: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> JwtKeys {
        JwtKeys::new(b"test-secret", Duration::hours(DEFAULT_TOKEN_TTL_HOURS))
    }

    fn admin() -> UserProfile {
        UserProfile {
            email: "admin@company.uz".to_string(),
            name: "Admin".to_string(),
            role: UserRole::Admin,
            store_id: None,
            avatar: "👑".to_string(),
        }
    }

    #[test]
    fn test_issue_and_validate_token() {
        let keys = keys();
        let (token, issued) = keys.issue(&admin()).expect("Failed to create token");
        let claims = keys.validate(&token).expect("Failed to validate token");

        assert_eq!(claims, issued);
        assert_eq!(claims.role, UserRole::Admin);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
        assert!(!claims.is_expired());
        assert!(!claims.offline);
    }

    #[test]
    fn test_invalid_token() {
        assert!(keys().validate("invalid.token.here").is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let (token, _) = keys().issue(&admin()).unwrap();
        let other = JwtKeys::new(b"other-secret", Duration::hours(1));
        assert!(matches!(other.validate(&token), Err(Error::Unauthorized(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        let keys = keys();
        let mut claims = Claims::from_profile(&admin(), Duration::hours(1));
        claims.iat -= 7200;
        claims.exp = claims.iat + 3600;
        let token = keys.sign(&claims).unwrap();

        assert!(keys.validate(&token).is_err());
        assert!(peek_claims(&token).unwrap().is_expired());
    }

    #[test]
    fn test_offline_flag_round_trips() {
        let keys = keys().offline();
        let (token, _) = keys.issue(&admin()).unwrap();
        assert!(peek_claims(&token).unwrap().offline);
    }

    #[test]
    fn test_offline_token_rejected_with_same_secret() {
        let offline = JwtKeys::new(b"test-secret", Duration::hours(1)).offline();
        let (token, _) = offline.issue(&admin()).unwrap();

        assert!(offline.validate(&token).is_ok());
        assert!(matches!(keys().validate(&token), Err(Error::Unauthorized(_))));
    }

    #[test]
    fn test_huge_ttl_does_not_overflow() {
        let claims = Claims::from_profile(&admin(), Duration::MAX);
        assert_eq!(claims.exp, claims.iat.saturating_add(Duration::MAX.num_seconds()));
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_peek_rejects_garbage() {
        assert!(peek_claims("demo-token-123").is_err());
        assert!(peek_claims("a.!!!.c").is_err());
    }
}
