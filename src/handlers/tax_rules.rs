// src/handlers/tax_rules.rs

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
    models::fiscal::{ProductTaxRule, SeedResult, SeedTaxRulesRequest, TaxRuleRequest},
};

fn validate_rule_payload(
    payload: &TaxRuleRequest,
    locale: &Locale,
    app_state: &AppState,
) -> Result<(), ApiError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(locale, &app_state.i18n_store))?;
    payload.validate_rates()
        .map_err(|e| AppError::ValidationError(e).to_api_error(locale, &app_state.i18n_store))
}

// POST /api/fiscal/produtos/{id}/tax-rules
#[utoipa::path(
    post,
    path = "/api/fiscal/produtos/{id}/tax-rules",
    tag = "Fiscal",
    request_body = TaxRuleRequest,
    responses(
        (status = 201, description = "Regra criada (campos omitidos vêm do padrão do regime)", body = ProductTaxRule),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Produto não encontrado"),
        (status = 409, description = "Conflito de regra padrão")
    ),
    params(("id" = Uuid, Path, description = "ID do Produto")),
    security(("api_jwt" = []))
)]
pub async fn create_rule(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(product_id): Path<Uuid>,
    JsonBody(payload): JsonBody<TaxRuleRequest>,
) -> Result<impl IntoResponse, ApiError> {

    validate_rule_payload(&payload, &locale, &app_state)?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let rule = app_state
        .fiscal_service
        .create_rule(&mut *rls_conn, tenant.0, user.0.id, product_id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(rule)))
}

// GET /api/fiscal/produtos/{id}/tax-rules
#[utoipa::path(
    get,
    path = "/api/fiscal/produtos/{id}/tax-rules",
    tag = "Fiscal",
    responses(
        (status = 200, description = "Regras do produto, padrão primeiro", body = Vec<ProductTaxRule>),
        (status = 404, description = "Produto não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do Produto")),
    security(("api_jwt" = []))
)]
pub async fn list_rules(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(product_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let rules = app_state
        .fiscal_service
        .list_rules(&mut *rls_conn, tenant.0, product_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(rules)))
}

// PUT /api/fiscal/produtos/{id}/tax-rules/{rule_id}
#[utoipa::path(
    put,
    path = "/api/fiscal/produtos/{id}/tax-rules/{rule_id}",
    tag = "Fiscal",
    request_body = TaxRuleRequest,
    responses(
        (status = 200, description = "Regra atualizada", body = ProductTaxRule),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Regra não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do Produto"),
        ("rule_id" = Uuid, Path, description = "ID da Regra")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_rule(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path((product_id, rule_id)): Path<(Uuid, Uuid)>,
    JsonBody(payload): JsonBody<TaxRuleRequest>,
) -> Result<impl IntoResponse, ApiError> {

    validate_rule_payload(&payload, &locale, &app_state)?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let rule = app_state
        .fiscal_service
        .update_rule(&mut *rls_conn, tenant.0, user.0.id, product_id, rule_id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(rule)))
}

// DELETE /api/fiscal/produtos/{id}/tax-rules/{rule_id}
#[utoipa::path(
    delete,
    path = "/api/fiscal/produtos/{id}/tax-rules/{rule_id}",
    tag = "Fiscal",
    responses(
        (status = 204, description = "Regra removida"),
        (status = 404, description = "Regra não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do Produto"),
        ("rule_id" = Uuid, Path, description = "ID da Regra")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_rule(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path((product_id, rule_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    app_state
        .fiscal_service
        .delete_rule(&mut *rls_conn, tenant.0, user.0.id, product_id, rule_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// POST /api/fiscal/produtos/tax-rules/seed
#[utoipa::path(
    post,
    path = "/api/fiscal/produtos/tax-rules/seed",
    tag = "Fiscal",
    request_body = SeedTaxRulesRequest,
    responses(
        (status = 200, description = "Resumo do seed", body = SeedResult),
        (status = 400, description = "Nenhum produto com NCM"),
        (status = 409, description = "Outro seed concorrente gravou regras padrão")
    ),
    security(("api_jwt" = []))
)]
pub async fn seed_rules(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
    JsonBody(payload): JsonBody<SeedTaxRulesRequest>,
) -> Result<impl IntoResponse, ApiError> {

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let result = app_state
        .fiscal_service
        .seed_tax_rules(&mut *rls_conn, tenant.0, user.0.id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(result)))
}
