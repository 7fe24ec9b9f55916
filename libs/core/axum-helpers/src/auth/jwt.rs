use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default lifetime of issued tokens, in seconds
pub const ACCESS_TOKEN_TTL: i64 = 900;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (caller id)
    pub sub: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

/// Stateless HS256 bearer-token verification.
///
/// Tokens are accepted on signature and expiry alone; there is no
/// server-side revocation list.
#[derive(Clone)]
pub struct JwtAuth {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        let secret = config.secret.as_bytes();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Sign a token for `subject` valid for `ttl_seconds`.
    pub fn issue_token(
        &self,
        subject: &str,
        roles: &[String],
        ttl_seconds: i64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: subject.to_string(),
            roles: roles.to_vec(),
            exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    pub fn verify_token(&self, token: &str) -> Result<JwtClaims, jsonwebtoken::errors::Error> {
        decode::<JwtClaims>(token, &self.decoding, &self.validation).map(|data| data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth(secret: &str) -> JwtAuth {
        JwtAuth::new(&JwtConfig::new(secret).unwrap())
    }

    #[test]
    fn test_issued_token_verifies() {
        let auth = auth("inventory-test-secret-0123456789abcdef");
        let token = auth
            .issue_token("warehouse-7", &["stock-writer".to_string()], ACCESS_TOKEN_TTL)
            .unwrap();

        let claims = auth.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "warehouse-7");
        assert_eq!(claims.roles, vec!["stock-writer".to_string()]);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let issuer = auth("inventory-test-secret-0123456789abcdef");
        let verifier = auth("a-completely-different-secret-9876543210");

        let token = issuer.issue_token("warehouse-7", &[], ACCESS_TOKEN_TTL).unwrap();
        assert!(verifier.verify_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let auth = auth("inventory-test-secret-0123456789abcdef");
        // Past the default 60s leeway
        let token = auth.issue_token("warehouse-7", &[], -300).unwrap();
        assert!(auth.verify_token(&token).is_err());
    }
}
