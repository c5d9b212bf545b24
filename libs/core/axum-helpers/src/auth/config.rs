//! Token signing configuration.

use chrono::Duration;
use core_config::{ConfigError, FromEnv, env_or_default, env_required};

/// Token lifetime used when `EXPIRES_IN` is unset
pub const DEFAULT_EXPIRES_IN: &str = "1h";

const MIN_SECRET_LEN: usize = 32;

/// JWT authentication configuration.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required) - at least 32 characters
/// - `EXPIRES_IN` (default: `1h`) - token lifetime, see [`parse_expires_in`]
///
/// # Example
///
/// ```ignore
/// use axum_helpers::JwtConfig;
/// use core_config::FromEnv;
///
/// let config = JwtConfig::from_env()?;
/// let config = JwtConfig::new("my-super-secret-key-that-is-at-least-32-chars", "2h")?;
/// ```
#[derive(Clone)]
pub struct JwtConfig {
    /// JWT signing secret (minimum 32 characters)
    pub secret: String,
    /// Lifetime of issued tokens
    pub expires_in: Duration,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expires_in: &str) -> Result<Self, ConfigError> {
        let secret = secret.into();
        validate_secret(&secret)?;

        Ok(Self {
            secret,
            expires_in: parse_expires_in(expires_in)?,
        })
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;
        let expires_in = env_or_default("EXPIRES_IN", DEFAULT_EXPIRES_IN);
        Self::new(secret, &expires_in)
    }
}

fn validate_secret(secret: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_SECRET_LEN {
        return Err(ConfigError::ParseError {
            key: "JWT_SECRET".to_string(),
            details: format!(
                "must be at least {} characters (got {}). Generate one with: openssl rand -base64 32",
                MIN_SECRET_LEN,
                secret.len()
            ),
        });
    }
    Ok(())
}

/// Parse a token lifetime in the `ms` notation: `3600000`, `90s`, `1.5h`,
/// `15m`, `7d`, `2w`, `1y`, `500ms` or `2 hours`.
///
/// A bare number is a count of milliseconds. A year is 365.25 days.
/// Lifetimes under one second are rejected.
pub fn parse_expires_in(raw: &str) -> Result<Duration, ConfigError> {
    let invalid = |details: String| ConfigError::ParseError {
        key: "EXPIRES_IN".to_string(),
        details,
    };

    let value = raw.trim();
    let split = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(value.len());
    let (number, unit) = value.split_at(split);

    let amount: f64 = number
        .parse()
        .map_err(|_| invalid(format!("'{}' does not start with a number", raw)))?;

    let millis_per_unit = match unit.trim().to_ascii_lowercase().as_str() {
        "" | "ms" | "msec" | "msecs" | "millisecond" | "milliseconds" => 1.0,
        "s" | "sec" | "secs" | "second" | "seconds" => 1_000.0,
        "m" | "min" | "mins" | "minute" | "minutes" => 60_000.0,
        "h" | "hr" | "hrs" | "hour" | "hours" => 3_600_000.0,
        "d" | "day" | "days" => 86_400_000.0,
        "w" | "week" | "weeks" => 604_800_000.0,
        "y" | "yr" | "yrs" | "year" | "years" => 31_557_600_000.0,
        other => return Err(invalid(format!("unknown unit '{}'", other))),
    };

    let millis = (amount * millis_per_unit).round();
    if millis < 1_000.0 {
        return Err(invalid("lifetime must be at least one second".to_string()));
    }

    Duration::try_milliseconds(millis as i64)
        .ok_or_else(|| invalid(format!("'{}' is out of range", raw)))
}
