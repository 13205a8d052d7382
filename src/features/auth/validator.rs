use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use uuid::Uuid;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedUser, Claims};

/// Validates HS256 bearer tokens issued by the hosted auth provider
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.jwt_leeway.as_secs();
        match &config.audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!("Token validation failed: {:?}", e);
                AppError::Unauthorized("Invalid or expired token".to_string())
            })?;

        let id = Uuid::parse_str(&data.claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid subject claim".to_string()))?;

        Ok(AuthenticatedUser {
            id,
            role: data.claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::profiles::models::Role;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::Duration;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            audience: None,
            jwt_leeway: Duration::from_secs(60),
        }
    }

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token_round_trip() {
        let validator = JwtValidator::new(&test_config());
        let id = Uuid::new_v4();
        let token = sign(
            &Claims {
                sub: id.to_string(),
                role: Role::Leader,
                exp: chrono::Utc::now().timestamp() + 3600,
                aud: None,
            },
            "test-secret",
        );

        let user = validator.validate_token(&token).unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.role, Role::Leader);
        assert!(user.is_moderator());
    }

    #[test]
    fn test_rejects_wrong_secret() {
        let validator = JwtValidator::new(&test_config());
        let token = sign(
            &Claims {
                sub: Uuid::new_v4().to_string(),
                role: Role::Member,
                exp: chrono::Utc::now().timestamp() + 3600,
                aud: None,
            },
            "other-secret",
        );

        assert!(validator.validate_token(&token).is_err());
    }

    #[test]
    fn test_rejects_expired_token() {
        let validator = JwtValidator::new(&test_config());
        let token = sign(
            &Claims {
                sub: Uuid::new_v4().to_string(),
                role: Role::Member,
                exp: chrono::Utc::now().timestamp() - 3600,
                aud: None,
            },
            "test-secret",
        );

        assert!(validator.validate_token(&token).is_err());
    }

    #[test]
    fn test_rejects_non_uuid_subject() {
        let validator = JwtValidator::new(&test_config());
        let token = sign(
            &Claims {
                sub: "not-a-uuid".to_string(),
                role: Role::Member,
                exp: chrono::Utc::now().timestamp() + 3600,
                aud: None,
            },
            "test-secret",
        );

        assert!(validator.validate_token(&token).is_err());
    }
}
