// src/middleware/tenancy.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use uuid::Uuid;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
};

// O tenant da requisição, resolvido a partir do token (claim tenantId).
#[derive(Debug, Clone)]
pub struct TenantContext(pub Uuid);

impl TenantContext {
    /// Sem usuário autenticado ou sem empresa no token: 401.
    pub fn from_parts(parts: &Parts) -> Result<Self, AppError> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or(AppError::InvalidToken)?;

        user.0
            .tenant_id
            .map(TenantContext)
            .ok_or(AppError::TenantNotResolved)
    }
}

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        TenantContext::from_parts(parts).map_err(|e| {
            let app_state = AppState::from_ref(state);
            e.to_api_error(&Locale::from_headers(&parts.headers), &app_state.i18n_store)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::AuthUser;
    use axum::http::{Request, StatusCode};

    fn parts_with(user: Option<AuthUser>) -> Parts {
        let (mut parts, _) = Request::builder().uri("/api/fiscal/config/status").body(()).unwrap().into_parts();
        if let Some(user) = user {
            parts.extensions.insert(AuthenticatedUser(user));
        }
        parts
    }

    #[test]
    fn resolves_tenant_from_token() {
        let tenant = Uuid::new_v4();
        let parts = parts_with(Some(AuthUser { id: Uuid::new_v4(), tenant_id: Some(tenant) }));
        assert_eq!(TenantContext::from_parts(&parts).unwrap().0, tenant);
    }

    #[test]
    fn token_without_tenant_is_unauthorized() {
        let parts = parts_with(Some(AuthUser { id: Uuid::new_v4(), tenant_id: None }));
        let err = TenantContext::from_parts(&parts).unwrap_err();
        assert!(matches!(err, AppError::TenantNotResolved));
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn missing_user_is_unauthorized() {
        let err = TenantContext::from_parts(&parts_with(None)).unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }
}
