//! Per-request session resolved from a bearer token.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use marketplace_core::Role;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// Claims issued by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID.
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Expiry, seconds since the epoch.
    pub exp: usize,
}

/// Verifies HS256 tokens signed with the shared secret.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &SecretString) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Ok(decode::<Claims>(token, &self.key, &self.validation)?.claims)
    }
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

/// Who is calling. Anonymous when no token was sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Session {
    pub user: Option<AuthUser>,
    pub role: Option<Role>,
}

impl Session {
    /// The caller, or 401.
    pub fn require_user(&self) -> Result<&AuthUser, ApiError> {
        self.user.as_ref().ok_or(ApiError::Unauthorized)
    }

    /// The caller if they hold `role`; 401 when anonymous, 403 otherwise.
    pub fn require_role(&self, role: Role) -> Result<&AuthUser, ApiError> {
        let user = self.require_user()?;
        if self.role == Some(role) {
            Ok(user)
        } else {
            Err(ApiError::forbidden(format!("Only {}s can do this", role)))
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(AUTHORIZATION) else {
            return Ok(Session::default());
        };

        let Ok(value) = value.to_str() else {
            return Err(ApiError::Unauthorized);
        };

        let Some(token) = value.strip_prefix("Bearer ") else {
            return Err(ApiError::Unauthorized);
        };

        let claims = state.auth.verify(token.trim()).map_err(|e| {
            warn!(error = %e, "Rejected bearer token");
            ApiError::Unauthorized
        })?;

        let role = database::role::get_role(state.db.pool(), &claims.sub).await?;

        Ok(Session {
            user: Some(AuthUser {
                id: claims.sub,
                email: claims.email,
            }),
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token(secret: &str, exp: usize) -> String {
        let claims = Claims {
            sub: "user-1".to_string(),
            email: Some("user@example.in".to_string()),
            exp,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    fn far_future() -> usize {
        (chrono::Utc::now().timestamp() + 3600) as usize
    }

    #[test]
    fn test_verify_accepts_valid_token() {
        let verifier = TokenVerifier::new(&SecretString::from("secret".to_string()));
        let claims = verifier.verify(&token("secret", far_future())).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email.as_deref(), Some("user@example.in"));
    }

    #[test]
    fn test_verify_rejects_wrong_secret_and_expired() {
        let verifier = TokenVerifier::new(&SecretString::from("secret".to_string()));
        assert!(verifier.verify(&token("other", far_future())).is_err());
        assert!(verifier.verify(&token("secret", 1_000)).is_err());
        assert!(verifier.verify("not-a-jwt").is_err());
    }

    #[test]
    fn test_require_role() {
        let anonymous = Session::default();
        assert!(matches!(anonymous.require_user(), Err(ApiError::Unauthorized)));

        let customer = Session {
            user: Some(AuthUser {
                id: "user-1".to_string(),
                email: None,
            }),
            role: Some(Role::Customer),
        };
        assert!(customer.require_role(Role::Customer).is_ok());
        assert!(matches!(
            customer.require_role(Role::Admin),
            Err(ApiError::Forbidden(_))
        ));
        assert!(!customer.is_admin());
    }
}
