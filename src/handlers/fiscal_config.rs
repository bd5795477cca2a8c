// src/handlers/fiscal_config.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::{
        db_utils::get_rls_connection,
        error::{ApiError, AppError},
    },
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale, json::JsonBody, tenancy::TenantContext},
    models::fiscal::{FiscalConfig, OnboardingStatus, UpdateFiscalConfigRequest},
};

// GET /api/fiscal/config/empresa
#[utoipa::path(
    get,
    path = "/api/fiscal/config/empresa",
    tag = "Fiscal",
    responses(
        (status = 200, description = "Configuração fiscal da empresa (vazia se nunca salva)", body = FiscalConfig),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_config(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
) -> Result<impl IntoResponse, ApiError> {

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let config = app_state
        .fiscal_service
        .get_config(&mut *rls_conn, tenant.0)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(config)))
}

// PUT /api/fiscal/config/empresa
#[utoipa::path(
    put,
    path = "/api/fiscal/config/empresa",
    tag = "Fiscal",
    request_body = UpdateFiscalConfigRequest,
    responses(
        (status = 200, description = "Configuração salva", body = FiscalConfig),
        (status = 400, description = "Dados inválidos"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_config(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
    JsonBody(payload): JsonBody<UpdateFiscalConfigRequest>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    // CNPJ, UF e CEP não cabem no derive
    payload.validate_documents()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let updated = app_state
        .fiscal_service
        .update_config(&mut *rls_conn, tenant.0, user.0.id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(updated)))
}

// GET /api/fiscal/config/status
#[utoipa::path(
    get,
    path = "/api/fiscal/config/status",
    tag = "Fiscal",
    responses(
        (status = 200, description = "Checklist do assistente de configuração fiscal", body = OnboardingStatus),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_status(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
) -> Result<impl IntoResponse, ApiError> {

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let status = app_state
        .fiscal_service
        .onboarding_status(&mut *rls_conn, tenant.0)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(status)))
}
