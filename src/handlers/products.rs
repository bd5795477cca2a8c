// src/handlers/products.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        db_utils::get_rls_connection,
        error::{ApiError, AppError},
    },
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale, json::JsonBody, tenancy::TenantContext},
    models::product::{Product, UpdateNcmRequest},
};

// GET /api/fiscal/produtos/pendentes-ncm
#[utoipa::path(
    get,
    path = "/api/fiscal/produtos/pendentes-ncm",
    tag = "Fiscal",
    responses(
        (status = 200, description = "Produtos sem NCM cadastrado", body = Vec<Product>),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_pending_ncm(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
) -> Result<impl IntoResponse, ApiError> {

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let products = app_state
        .fiscal_service
        .list_pending_ncm(&mut *rls_conn, tenant.0)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(products)))
}

// PUT /api/fiscal/produtos/{id}/ncm
#[utoipa::path(
    put,
    path = "/api/fiscal/produtos/{id}/ncm",
    tag = "Fiscal",
    request_body = UpdateNcmRequest,
    responses(
        (status = 200, description = "NCM atualizado", body = Product),
        (status = 400, description = "NCM ou CEST inválido"),
        (status = 404, description = "Produto não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do Produto")),
    security(("api_jwt" = []))
)]
pub async fn update_ncm(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(product_id): Path<Uuid>,
    JsonBody(payload): JsonBody<UpdateNcmRequest>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;
    payload.validate_extra()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let product = app_state
        .fiscal_service
        .update_ncm(&mut *rls_conn, tenant.0, user.0.id, product_id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(product)))
}
