// src/models/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::{validate_cest, validate_ncm};

// Produto do catálogo do ERP, visto pelo módulo fiscal (só os campos fiscais são editados aqui)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    #[schema(ignore)]
    pub tenant_id: Uuid,
    #[schema(example = "Cimento CP II 50kg")]
    pub name: String,
    #[schema(example = "CIM-CP2-50")]
    pub sku: Option<String>,
    #[schema(example = "25232910")]
    pub ncm: Option<String>,
    #[schema(example = "0500200")]
    pub cest: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NcmCoverage {
    pub total: i64,
    pub com_ncm: i64,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNcmRequest {
    #[validate(custom(function = "validate_ncm"))]
    #[schema(example = "25232910")]
    pub ncm: String,

    #[schema(example = "0500200")]
    pub cest: Option<String>,
}

impl UpdateNcmRequest {
    pub fn validate_extra(&self) -> Result<(), validator::ValidationErrors> {
        let mut errors = validator::ValidationErrors::new();
        if let Some(cest) = &self.cest {
            if let Err(e) = validate_cest(cest) {
                errors.add("cest", e);
            }
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ncm_request_validation() {
        let ok = UpdateNcmRequest { ncm: "25232910".into(), cest: Some("0500200".into()) };
        assert!(ok.validate().is_ok());
        assert!(ok.validate_extra().is_ok());

        let bad = UpdateNcmRequest { ncm: "2523".into(), cest: Some("05".into()) };
        assert!(bad.validate().is_err());
        assert!(bad.validate_extra().is_err());
    }
}
