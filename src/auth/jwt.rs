use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration, OffsetDateTime};
use tracing::debug;

use super::claims::Claims;
use crate::{config::JwtConfig, state::AppState};

const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("token has no subject")]
    MissingSubject,
    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Signing and verification keys built once from [`JwtConfig`].
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::new(&state.config.jwt)
    }
}

impl JwtKeys {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl: Duration::minutes(config.ttl_minutes),
        }
    }

    /// Sign a token for `subject` that expires `ttl` from now.
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        let now = OffsetDateTime::now_utc();
        self.issue_at(subject, now, now + self.ttl)
    }

    fn issue_at(
        &self,
        subject: &str,
        issued_at: OffsetDateTime,
        expires_at: OffsetDateTime,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            sub: Some(subject.to_owned()),
            iat: issued_at.unix_timestamp() as usize,
            exp: expires_at.unix_timestamp() as usize,
        };
        let token =
            encode(&Header::new(ALGORITHM), &claims, &self.encoding).map_err(TokenError::Signing)?;
        debug!(subject, exp = claims.exp, "jwt signed");
        Ok(token)
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            debug!(error = %e, "jwt rejected");
            TokenError::InvalidToken
        })?;
        Ok(data.claims)
    }

    /// Verify signature and expiry, returning the subject claim.
    pub fn decode(&self, token: &str) -> Result<String, TokenError> {
        let claims = self.decode_claims(token)?;
        let subject = claims.sub.ok_or(TokenError::MissingSubject)?;
        debug!(subject = %subject, "jwt verified");
        Ok(subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys(secret: &str) -> JwtKeys {
        JwtKeys::new(&JwtConfig {
            secret: secret.into(),
            ttl_minutes: 30,
        })
    }

    #[test]
    fn issue_and_decode_roundtrip() {
        let keys = make_keys("dev-secret");
        let token = keys.issue("alice").expect("sign");
        assert_eq!(keys.decode(&token).expect("decode"), "alice");
    }

    #[test]
    fn token_expires_thirty_minutes_after_issue() {
        let keys = make_keys("dev-secret");
        let token = keys.issue("alice").expect("sign");
        let claims = keys.decode_claims(&token).expect("decode");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn expired_token_is_invalid() {
        let keys = make_keys("dev-secret");
        let issued = OffsetDateTime::now_utc() - Duration::minutes(31);
        let token = keys
            .issue_at("alice", issued, issued + Duration::minutes(30))
            .expect("sign");
        assert!(matches!(keys.decode(&token), Err(TokenError::InvalidToken)));
    }

    #[test]
    fn token_from_other_secret_is_invalid() {
        let token = make_keys("secret-a").issue("alice").expect("sign");
        let err = make_keys("secret-b").decode(&token).unwrap_err();
        assert!(matches!(err, TokenError::InvalidToken));
    }

    #[test]
    fn garbage_is_invalid() {
        let keys = make_keys("dev-secret");
        assert!(matches!(keys.decode("not.a.jwt"), Err(TokenError::InvalidToken)));
        assert!(matches!(keys.decode(""), Err(TokenError::InvalidToken)));
    }

    #[test]
    fn token_without_subject_is_rejected() {
        let keys = make_keys("dev-secret");
        let exp = (OffsetDateTime::now_utc() + Duration::minutes(5)).unix_timestamp();
        let token = encode(
            &Header::new(ALGORITHM),
            &serde_json::json!({ "exp": exp }),
            &keys.encoding,
        )
        .expect("sign");
        assert!(matches!(keys.decode(&token), Err(TokenError::MissingSubject)));
    }
}
