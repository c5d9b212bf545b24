use super::config::JwtConfig;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub email: String, // Account email
    pub iat: i64,      // Issued at
    pub exp: i64,      // Expiration time
}

/// HS256 only, and a token is dead the second its `exp` passes
fn strict_validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation
}

/// Stateless HS256 token issuer and verifier
#[derive(Clone)]
pub struct JwtAuth {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in: Duration,
}

impl JwtAuth {
    /// Create a new token issuer.
    ///
    /// # Example
    /// ```ignore
    /// use axum_helpers::{JwtAuth, JwtConfig};
    /// use core_config::FromEnv;
    ///
    /// let jwt_auth = JwtAuth::new(&JwtConfig::from_env()?);
    /// let token = jwt_auth.issue_token("ada@example.com")?;
    /// ```
    pub fn new(config: &JwtConfig) -> Self {
        tracing::info!(
            expires_in_secs = config.expires_in.num_seconds(),
            "JWT auth initialized"
        );

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation: strict_validation(),
            expires_in: config.expires_in,
        }
    }

    /// Lifetime applied to every issued token
    pub fn expires_in(&self) -> Duration {
        self.expires_in
    }

    /// Issue a token for `email` valid from now
    pub fn issue_token(&self, email: &str) -> eyre::Result<String> {
        self.issue_token_at(email, Utc::now())
    }

    /// Issue a token for `email` as if the current time were `now`
    pub fn issue_token_at(&self, email: &str, now: DateTime<Utc>) -> eyre::Result<String> {
        let claims = JwtClaims {
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.expires_in).timestamp(),
        };

        let header = Header::new(Algorithm::HS256);

        let token = encode(&header, &claims, &self.encoding_key)?;

        Ok(token)
    }

    /// Verify JWT token signature and expiry and decode claims
    pub fn verify_token(&self, token: &str) -> eyre::Result<JwtClaims> {
        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &self.validation)?;

        Ok(token_data.claims)
    }
}
