// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // JSON malformado ou com tipos errados; a mensagem do parser vai nos detalhes
    #[error("Corpo da requisição inválido: {0}")]
    InvalidBody(String),

    #[error("Token inválido")]
    InvalidToken,

    #[error("Tenant não identificado")]
    TenantNotResolved,

    #[error("Produto não encontrado")]
    ProductNotFound,

    #[error("Regra fiscal não encontrada")]
    TaxRuleNotFound,

    // Pré-condição do seed: sem NCM não há como gerar regras
    #[error("Nenhum produto com NCM")]
    NoProductsWithNcm,

    #[error("Regra padrão já existe")]
    DefaultRuleConflict,

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidBody(_) | AppError::NoProductsWithNcm => {
                StatusCode::BAD_REQUEST
            }
            AppError::InvalidToken | AppError::TenantNotResolved => StatusCode::UNAUTHORIZED,
            AppError::ProductNotFound | AppError::TaxRuleNotFound => StatusCode::NOT_FOUND,
            AppError::DefaultRuleConflict => StatusCode::CONFLICT,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message_key(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation",
            AppError::InvalidBody(_) => "invalid_body",
            AppError::InvalidToken => "invalid_token",
            AppError::TenantNotResolved => "tenant_not_resolved",
            AppError::ProductNotFound => "product_not_found",
            AppError::TaxRuleNotFound => "tax_rule_not_found",
            AppError::NoProductsWithNcm => "no_products_with_ncm",
            AppError::DefaultRuleConflict => "default_rule_conflict",
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => "internal",
        }
    }

    /// Converte o erro de domínio na resposta HTTP, traduzida para o idioma do cliente.
    pub fn to_api_error(self, locale: &Locale, store: &I18nStore) -> ApiError {
        let status = self.status();
        let error = store.translate(&locale.0, self.message_key());

        let details = match &self {
            // Retorna todos os detalhes da validação, campo a campo
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                Some(json!(details))
            }
            AppError::InvalidBody(reason) => Some(json!(reason)),
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                tracing::error!("Erro Interno do Servidor: {}", self);
                Some(json!(self.to_string()))
            }
            _ => None,
        };

        ApiError { status, error, details }
    }
}

// O erro que efetivamente sai na resposta HTTP
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{ValidationError, ValidationErrors};

    fn pt() -> Locale {
        Locale("pt".to_string())
    }

    #[test]
    fn maps_errors_to_status_codes() {
        assert_eq!(AppError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::TenantNotResolved.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::ProductNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::TaxRuleNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::NoProductsWithNcm.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::DefaultRuleConflict.status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::InternalServerError(anyhow::anyhow!("falhou")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_error_carries_field_details() {
        let mut errors = ValidationErrors::new();
        let mut err = ValidationError::new("ncm");
        err.message = Some("O NCM deve ter 8 dígitos.".into());
        errors.add("ncm", err);

        let api = AppError::ValidationError(errors).to_api_error(&pt(), &I18nStore::new());

        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.error, "Um ou mais campos são inválidos.");
        let details = api.details.expect("detalhes da validação");
        assert_eq!(details["ncm"][0], "O NCM deve ter 8 dígitos.");
    }

    #[test]
    fn internal_error_passes_message_to_client() {
        let api = AppError::InternalServerError(anyhow::anyhow!("conexão recusada"))
            .to_api_error(&Locale("en".to_string()), &I18nStore::new());

        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.error, "An unexpected error occurred.");
        let details = api.details.expect("mensagem do erro");
        assert!(details.as_str().unwrap_or_default().contains("conexão recusada"));
    }

    #[test]
    fn not_found_has_no_details() {
        let api = AppError::ProductNotFound.to_api_error(&pt(), &I18nStore::new());
        assert_eq!(api.error, "Produto não encontrado.");
        assert!(api.details.is_none());
    }
}
