//! JWT token service
//!
//! Issues and verifies the bearer credentials that carry a caller's
//! identity. Verification failure is not an error condition for request
//! handling - see [`JwtService::resolve`].

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use shared::models::Role;
use thiserror::Error;

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Signing secret (at least 32 bytes)
    pub secret: String,
    /// Token lifetime in minutes
    pub expiration_minutes: i64,
    /// Token issuer
    pub issuer: String,
    /// Token audience
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        let secret = match load_jwt_secret() {
            Ok(secret) => secret,
            Err(e) => {
                #[cfg(debug_assertions)]
                {
                    tracing::warn!("JWT configuration error: {}, using generated key", e);
                    generate_printable_jwt_secret()
                }
                #[cfg(not(debug_assertions))]
                {
                    panic!("FATAL: JWT_SECRET configuration failed: {}", e);
                }
            }
        };

        Self {
            secret,
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(120), // matches the 2h credential window
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "roster-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "roster-clients".to_string()),
        }
    }
}

/// Claims stored in the token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Employee ID (subject)
    pub sub: String,
    /// Display name
    pub name: String,
    /// Role
    pub role: Role,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued-at timestamp
    pub iat: i64,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
}

/// JWT errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Generate a printable secure JWT secret (development fallback)
pub fn generate_printable_jwt_secret() -> String {
    let allowed_chars =
        "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+[]{}|;:,.<>?";

    let rng = SystemRandom::new();
    let mut key = String::new();

    for _ in 0..64 {
        let mut byte = [0u8; 1];
        if rng.fill(&mut byte).is_err() {
            return "RosterServerDevelopmentSecureKey2026!ReplaceInProduction".to_string();
        }
        let idx = (byte[0] as usize) % allowed_chars.len();
        key.push(allowed_chars.chars().nth(idx).unwrap());
    }

    key
}

/// Load the JWT secret from the environment
fn load_jwt_secret() -> Result<String, JwtError> {
    match std::env::var("JWT_SECRET") {
        Ok(secret) => {
            if secret.len() < 32 {
                return Err(JwtError::ConfigError(
                    "JWT_SECRET must be at least 32 characters long".to_string(),
                ));
            }
            Ok(secret)
        }
        Err(_) => Err(JwtError::ConfigError(
            "JWT_SECRET environment variable is not set".to_string(),
        )),
    }
}

/// JWT token service
#[derive(Debug, Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// Create a new JWT service with the given configuration
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a token for the given principal
    pub fn generate_token(&self, user: &CurrentUser) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: user.id.clone(),
            name: user.name.clone(),
            role: user.role,
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Verify and decode a token
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidToken => JwtError::InvalidToken(e.to_string()),
                _ => JwtError::InvalidToken(format!("Token validation failed: {}", e)),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Extract the token from an Authorization header
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }

    /// Resolve an Authorization header into a principal
    ///
    /// A missing header, a non-Bearer header and a malformed, expired or
    /// unverifiable token all resolve to `None`: downstream code treats
    /// "anonymous" uniformly regardless of cause, and the operation gate
    /// decides whether anonymous is acceptable.
    pub fn resolve(&self, header: Option<&str>) -> Option<CurrentUser> {
        let token = Self::extract_from_header(header?)?;
        match self.validate_token(token) {
            Ok(claims) => Some(CurrentUser::from(claims)),
            Err(e) => {
                tracing::debug!(target: "security", error = %e, "Credential rejected, treating caller as anonymous");
                None
            }
        }
    }
}

/// The authenticated principal decoded from a verified token
///
/// Claims are trusted verbatim; no store lookup happens during resolution.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub role: Role,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            name: claims.name,
            role: claims.role,
        }
    }
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-that-is-long-enough!".to_string(),
            expiration_minutes: 120,
            issuer: "roster-server".to_string(),
            audience: "roster-clients".to_string(),
        }
    }

    fn test_user() -> CurrentUser {
        CurrentUser {
            id: "e1".to_string(),
            name: "Ada Lovelace".to_string(),
            role: Role::Employee,
        }
    }

    #[test]
    fn token_roundtrip() {
        let service = JwtService::with_config(test_config());
        let token = service.generate_token(&test_user()).expect("generate");
        let claims = service.validate_token(&token).expect("validate");

        assert_eq!(claims.sub, "e1");
        assert_eq!(claims.name, "Ada Lovelace");
        assert_eq!(claims.role, Role::Employee);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_resolves_to_anonymous() {
        let config = JwtConfig {
            expiration_minutes: -10,
            ..test_config()
        };
        let service = JwtService::with_config(config);
        let token = service.generate_token(&test_user()).expect("generate");

        assert!(matches!(
            service.validate_token(&token),
            Err(JwtError::ExpiredToken)
        ));
        let header = format!("Bearer {}", token);
        assert!(service.resolve(Some(&header)).is_none());
    }

    #[test]
    fn tampered_token_resolves_to_anonymous() {
        let service = JwtService::with_config(test_config());
        let other = JwtService::with_config(JwtConfig {
            secret: "another-secret-key-that-is-long-enough".to_string(),
            ..test_config()
        });
        let token = other.generate_token(&test_user()).expect("generate");
        let header = format!("Bearer {}", token);

        assert!(service.resolve(Some(&header)).is_none());
    }

    #[test]
    fn malformed_headers_resolve_to_anonymous() {
        let service = JwtService::with_config(test_config());

        assert!(service.resolve(None).is_none());
        assert!(service.resolve(Some("not-a-bearer-header")).is_none());
        assert!(service.resolve(Some("Bearer garbage")).is_none());
    }

    #[test]
    fn valid_header_resolves_to_principal() {
        let service = JwtService::with_config(test_config());
        let token = service.generate_token(&test_user()).expect("generate");
        let header = format!("Bearer {}", token);

        let user = service.resolve(Some(&header)).expect("principal");
        assert_eq!(user.id, "e1");
        assert!(!user.is_admin());
    }
}
