// src/handlers/certificates.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::{
        db_utils::get_rls_connection,
        error::{ApiError, AppError},
    },
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale, json::JsonBody, tenancy::TenantContext},
    models::fiscal::{CreateCertificateRequest, FiscalCertificate},
};

// GET /api/fiscal/certificados
#[utoipa::path(
    get,
    path = "/api/fiscal/certificados",
    tag = "Fiscal",
    responses(
        (status = 200, description = "Certificados digitais cadastrados", body = Vec<FiscalCertificate>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_certificates(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
) -> Result<impl IntoResponse, ApiError> {

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let certificates = app_state
        .fiscal_service
        .list_certificates(&mut *rls_conn, tenant.0)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(certificates)))
}

// POST /api/fiscal/certificados
#[utoipa::path(
    post,
    path = "/api/fiscal/certificados",
    tag = "Fiscal",
    request_body = CreateCertificateRequest,
    responses(
        (status = 201, description = "Certificado registrado", body = FiscalCertificate),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn register_certificate(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
    JsonBody(payload): JsonBody<CreateCertificateRequest>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let certificate = app_state
        .fiscal_service
        .register_certificate(&mut *rls_conn, tenant.0, user.0.id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(certificate)))
}
