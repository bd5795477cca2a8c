// src/services/auth.rs

use jsonwebtoken::{decode, DecodingKey, Validation};

use crate::{
    common::error::AppError,
    models::auth::{AuthUser, Claims},
};

// Apenas valida tokens; a emissão fica no serviço de login do ERP
#[derive(Clone)]
pub struct AuthService {
    jwt_secret: String,
}

impl AuthService {
    pub fn new(jwt_secret: String) -> Self {
        Self { jwt_secret }
    }

    pub fn validate_token(&self, token: &str) -> Result<AuthUser, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|e| {
            tracing::debug!("Token rejeitado: {}", e);
            AppError::InvalidToken
        })?;

        Ok(token_data.claims.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use uuid::Uuid;

    const SECRET: &str = "segredo-de-teste";

    fn token(secret: &str, tenant_id: Option<Uuid>, expires_in: i64) -> String {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            tenant_id,
            exp: (now + expires_in) as usize,
            iat: now as usize,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_ref())).unwrap()
    }

    #[test]
    fn accepts_valid_token_and_reads_tenant() {
        let tenant = Uuid::new_v4();
        let user = AuthService::new(SECRET.into())
            .validate_token(&token(SECRET, Some(tenant), 3600))
            .unwrap();
        assert_eq!(user.tenant_id, Some(tenant));
    }

    #[test]
    fn rejects_token_signed_with_another_secret() {
        let result = AuthService::new(SECRET.into()).validate_token(&token("outro", None, 3600));
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn rejects_expired_token() {
        let result = AuthService::new(SECRET.into()).validate_token(&token(SECRET, None, -3600));
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn rejects_garbage() {
        let result = AuthService::new(SECRET.into()).validate_token("nao-e-um-jwt");
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }
}
