use crate::error::IdentityError;
use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Who a connection claims to be, resolved before it reaches the hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub display_name: String,
    /// Persistent account, if the connection presented a valid token.
    pub account_id: Option<u64>,
}

impl Identity {
    pub fn anonymous(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            account_id: None,
        }
    }
}

/// Turns an optional bearer credential into a display identity.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(
        &self,
        credential: Option<&str>,
        requested_name: Option<&str>,
    ) -> Result<Identity, IdentityError>;
}

/// Claims carried by the access tokens the account service issues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: u64,
    pub email: String,
    pub exp: u64,
}

/// HS256 token validation with an anonymous fallback for connections
/// that present no token.
pub struct JwtIdentityResolver {
    secret: Option<SecretString>,
    anonymous_name: String,
    reject_invalid_tokens: bool,
}

impl JwtIdentityResolver {
    pub fn new(
        secret: Option<SecretString>,
        anonymous_name: impl Into<String>,
        reject_invalid_tokens: bool,
    ) -> Self {
        Self {
            secret,
            anonymous_name: anonymous_name.into(),
            reject_invalid_tokens,
        }
    }

    fn anonymous(&self, requested_name: Option<&str>) -> Identity {
        let name = requested_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(self.anonymous_name.as_str());
        Identity::anonymous(name)
    }

    fn verify(&self, token: &str) -> Result<Claims, IdentityError> {
        let Some(secret) = &self.secret else {
            return Err(IdentityError::InvalidToken(
                "no token secret configured".to_owned(),
            ));
        };

        let key = DecodingKey::from_secret(secret.expose_secret().as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        decode::<Claims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| IdentityError::InvalidToken(e.to_string()))
    }
}

#[async_trait]
impl IdentityResolver for JwtIdentityResolver {
    async fn resolve(
        &self,
        credential: Option<&str>,
        requested_name: Option<&str>,
    ) -> Result<Identity, IdentityError> {
        let Some(token) = credential.filter(|token| !token.is_empty()) else {
            return Ok(self.anonymous(requested_name));
        };

        match self.verify(token) {
            Ok(claims) => {
                debug!("Token accepted for account {}", claims.user_id);
                Ok(Identity {
                    display_name: claims.email,
                    account_id: Some(claims.user_id),
                })
            }
            Err(e) if self.reject_invalid_tokens => Err(e),
            Err(e) => {
                warn!("{}, admitting as anonymous", e);
                Ok(self.anonymous(requested_name))
            }
        }
    }
}
