// src/models/fiscal.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::common::validation::{only_digits, validate_cnpj, validate_mva, validate_rate, validate_uf};

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tipo_operacao", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TipoOperacao {
    #[default]
    Venda,
    Devolucao,
}

impl TipoOperacao {
    /// Só "devolucao" é reconhecido; qualquer outro valor é tratado como venda.
    pub fn parse_lenient(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("devolucao") {
            TipoOperacao::Devolucao
        } else {
            TipoOperacao::Venda
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TipoOperacao::Venda => "venda",
            TipoOperacao::Devolucao => "devolucao",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tipo_cliente", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TipoCliente {
    #[default]
    Todos,
    ConsumidorFinal,
    Contribuinte,
}

// --- Configuração Fiscal da Empresa ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FiscalConfig {
    #[schema(ignore)] // O tenant vem do token
    pub tenant_id: Uuid,

    #[schema(example = "Casa das Telhas Materiais de Construção Ltda")]
    pub razao_social: Option<String>,
    #[schema(example = "Casa das Telhas")]
    pub nome_fantasia: Option<String>,
    #[schema(example = "11222333000181")]
    pub cnpj: Option<String>,
    #[schema(example = "110042490114")]
    pub inscricao_estadual: Option<String>,
    #[schema(example = "Rua das Palmeiras, 450 - Centro")]
    pub endereco: Option<String>,
    #[schema(example = "Campinas")]
    pub municipio: Option<String>,
    #[schema(example = "3509502")]
    pub codigo_municipio: Option<String>,
    #[schema(example = "SP")]
    pub uf: Option<String>,
    #[schema(example = "13010000")]
    pub cep: Option<String>,

    /// CRT: 1 = Simples Nacional, 2 = Simples (excesso de sublimite), 3 = Regime Normal, 4 = MEI
    #[schema(example = 1)]
    pub regime_tributario: Option<i16>,

    /// 1 = Produção, 2 = Homologação
    #[schema(example = 2)]
    pub ambiente_nfe: Option<i16>,
    #[schema(example = 1)]
    pub serie_nfe: Option<i32>,
    #[schema(example = 1)]
    pub proximo_numero_nfe: Option<i32>,

    pub onboarding_etapa_atual: i16,
    pub onboarding_completo: bool,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl FiscalConfig {
    /// Configuração vazia (ainda não salva) para um tenant que nunca fez upsert.
    pub fn empty(tenant_id: Uuid) -> Self {
        Self {
            tenant_id,
            razao_social: None,
            nome_fantasia: None,
            cnpj: None,
            inscricao_estadual: None,
            endereco: None,
            municipio: None,
            codigo_municipio: None,
            uf: None,
            cep: None,
            regime_tributario: None,
            ambiente_nfe: None,
            serie_nfe: None,
            proximo_numero_nfe: None,
            onboarding_etapa_atual: 0,
            onboarding_completo: false,
            created_at: None,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFiscalConfigRequest {
    #[validate(length(min = 1, max = 120, message = "A razão social deve ter entre 1 e 120 caracteres."))]
    pub razao_social: Option<String>,

    #[validate(length(max = 120, message = "O nome fantasia deve ter no máximo 120 caracteres."))]
    pub nome_fantasia: Option<String>,

    #[schema(example = "11.222.333/0001-81")]
    pub cnpj: Option<String>,

    #[validate(length(min = 2, max = 14, message = "Inscrição estadual inválida."))]
    pub inscricao_estadual: Option<String>,

    #[validate(length(max = 255))]
    pub endereco: Option<String>,

    pub municipio: Option<String>,

    #[validate(length(equal = 7, message = "O código IBGE do município tem 7 dígitos."))]
    pub codigo_municipio: Option<String>,

    #[schema(example = "SP")]
    pub uf: Option<String>,

    #[schema(example = "13010-000")]
    pub cep: Option<String>,

    #[validate(range(min = 1, max = 4, message = "O CRT deve ser 1, 2, 3 ou 4."))]
    pub regime_tributario: Option<i16>,

    #[validate(range(min = 1, max = 2, message = "Ambiente deve ser 1 (produção) ou 2 (homologação)."))]
    pub ambiente_nfe: Option<i16>,

    #[validate(range(min = 0, max = 999, message = "A série deve estar entre 0 e 999."))]
    pub serie_nfe: Option<i32>,

    #[validate(range(min = 1, message = "O próximo número deve ser positivo."))]
    pub proximo_numero_nfe: Option<i32>,

    #[validate(range(min = 0, max = 5))]
    pub onboarding_etapa_atual: Option<i16>,

    pub onboarding_completo: Option<bool>,
}

impl UpdateFiscalConfigRequest {
    /// Validações de documento que o derive não cobre (dígitos do CNPJ, UF, CEP).
    pub fn validate_documents(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(cnpj) = &self.cnpj {
            if let Err(e) = validate_cnpj(cnpj) {
                errors.add("cnpj", e);
            }
        }
        if let Some(uf) = &self.uf {
            if let Err(e) = validate_uf(uf) {
                errors.add("uf", e);
            }
        }
        if let Some(cep) = &self.cep {
            if only_digits(cep).len() != 8 {
                let mut e = validator::ValidationError::new("cep");
                e.message = Some("O CEP deve ter 8 dígitos.".into());
                errors.add("cep", e);
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Documentos são gravados só com dígitos.
    pub fn normalized(mut self) -> Self {
        self.cnpj = self.cnpj.map(|v| only_digits(&v));
        self.cep = self.cep.map(|v| only_digits(&v));
        self
    }
}

// --- Certificado Digital (somente metadados) ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FiscalCertificate {
    pub id: Uuid,
    #[schema(ignore)]
    pub tenant_id: Uuid,
    #[schema(example = "Certificado A1 2025")]
    pub descricao: String,
    #[schema(example = "11222333000181")]
    pub titular_cnpj: String,
    pub valido_ate: DateTime<Utc>,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCertificateRequest {
    #[validate(length(min = 1, max = 120, message = "A descrição é obrigatória."))]
    pub descricao: String,

    #[validate(custom(function = "validate_cnpj"))]
    pub titular_cnpj: String,

    pub valido_ate: DateTime<Utc>,

    #[serde(default = "default_true")]
    pub ativo: bool,
}

fn default_true() -> bool {
    true
}

// --- Regras Fiscais por Produto ---

/// Códigos e alíquotas de uma regra fiscal. É o que o gerador de regras padrão produz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaxRuleDefaults {
    #[schema(example = "5102")]
    pub cfop_estadual: String,
    #[schema(example = "6102")]
    pub cfop_interestadual: String,

    #[schema(example = "000")]
    pub cst_icms: Option<String>,
    #[schema(example = "0102")]
    pub csosn: Option<String>,

    #[serde(with = "rust_decimal::serde::str")]
    #[schema(value_type = String, example = "18.00")]
    pub aliquota_icms: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    #[schema(value_type = String, example = "12.00")]
    pub aliquota_icms_interestadual: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    #[schema(value_type = String, example = "0.00")]
    pub aliquota_icms_st: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    #[schema(value_type = String, example = "0.00")]
    pub mva_st: Decimal,

    #[schema(example = "01")]
    pub cst_pis: String,
    #[serde(with = "rust_decimal::serde::str")]
    #[schema(value_type = String, example = "0.65")]
    pub aliquota_pis: Decimal,

    #[schema(example = "01")]
    pub cst_cofins: String,
    #[serde(with = "rust_decimal::serde::str")]
    #[schema(value_type = String, example = "3.00")]
    pub aliquota_cofins: Decimal,

    #[schema(example = "99")]
    pub cst_ipi: String,
    #[serde(with = "rust_decimal::serde::str")]
    #[schema(value_type = String, example = "0.00")]
    pub aliquota_ipi: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductTaxRule {
    pub id: Uuid,
    #[schema(ignore)]
    pub tenant_id: Uuid,
    pub product_id: Uuid,

    pub tipo_operacao: TipoOperacao,
    pub tipo_cliente: TipoCliente,
    #[schema(example = "RJ")]
    pub uf_destino: Option<String>,

    #[sqlx(flatten)]
    #[serde(flatten)]
    pub fiscal: TaxRuleDefaults,

    pub is_default: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Dados completos para gravar uma regra (criação, atualização e seed).
#[derive(Debug, Clone)]
pub struct TaxRuleData {
    pub tipo_operacao: TipoOperacao,
    pub tipo_cliente: TipoCliente,
    pub uf_destino: Option<String>,
    pub fiscal: TaxRuleDefaults,
    pub is_default: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaxRuleRequest {
    #[schema(example = "venda")]
    pub tipo_operacao: Option<String>,
    pub tipo_cliente: Option<TipoCliente>,

    /// Ausente mantém a UF atual; `null` torna a regra genérica (todas as UFs).
    #[serde(default, deserialize_with = "explicit_null")]
    #[schema(value_type = Option<String>, example = "RJ")]
    pub uf_destino: Option<Option<String>>,

    #[validate(length(equal = 4, message = "O CFOP tem 4 dígitos."))]
    pub cfop_estadual: Option<String>,
    #[validate(length(equal = 4, message = "O CFOP tem 4 dígitos."))]
    pub cfop_interestadual: Option<String>,

    #[validate(length(equal = 3, message = "O CST de ICMS tem 3 dígitos."))]
    pub cst_icms: Option<String>,
    #[validate(length(equal = 4, message = "O CSOSN tem 4 dígitos."))]
    pub csosn: Option<String>,

    #[schema(value_type = Option<f64>, example = 18.0)]
    pub aliquota_icms: Option<Decimal>,
    #[schema(value_type = Option<f64>, example = 12.0)]
    pub aliquota_icms_interestadual: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub aliquota_icms_st: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub mva_st: Option<Decimal>,

    #[validate(length(equal = 2, message = "O CST de PIS tem 2 dígitos."))]
    pub cst_pis: Option<String>,
    #[schema(value_type = Option<f64>, example = 0.65)]
    pub aliquota_pis: Option<Decimal>,

    #[validate(length(equal = 2, message = "O CST de COFINS tem 2 dígitos."))]
    pub cst_cofins: Option<String>,
    #[schema(value_type = Option<f64>, example = 3.0)]
    pub aliquota_cofins: Option<Decimal>,

    #[validate(length(equal = 2, message = "O CST de IPI tem 2 dígitos."))]
    pub cst_ipi: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub aliquota_ipi: Option<Decimal>,

    pub is_default: Option<bool>,
}

impl TaxRuleRequest {
    /// Alíquotas, MVA, UF de destino e família do código de ICMS (o derive só cobre os tamanhos dos códigos).
    pub fn validate_rates(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let rates = [
            ("aliquotaIcms", &self.aliquota_icms),
            ("aliquotaIcmsInterestadual", &self.aliquota_icms_interestadual),
            ("aliquotaIcmsSt", &self.aliquota_icms_st),
            ("aliquotaPis", &self.aliquota_pis),
            ("aliquotaCofins", &self.aliquota_cofins),
            ("aliquotaIpi", &self.aliquota_ipi),
        ];
        for (field, rate) in rates {
            if let Some(rate) = rate {
                if let Err(e) = validate_rate(rate) {
                    errors.add(field, e);
                }
            }
        }

        if let Some(mva) = &self.mva_st {
            if let Err(e) = validate_mva(mva) {
                errors.add("mvaSt", e);
            }
        }

        if let Some(Some(uf)) = &self.uf_destino {
            if let Err(e) = validate_uf(uf) {
                errors.add("ufDestino", e);
            }
        }

        // Uma regra usa CST de ICMS (Regime Normal) ou CSOSN (Simples), nunca os dois
        if self.cst_icms.is_some() && self.csosn.is_some() {
            let mut e = validator::ValidationError::new("icms_code_family");
            e.message = Some("Informe CST de ICMS ou CSOSN, não ambos.".into());
            errors.add("csosn", e);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Aplica os campos enviados sobre uma base (valores gerados ou a regra já gravada).
    /// CST de ICMS e CSOSN andam juntos: enviar um deles descarta o outro da base.
    pub fn apply_to(&self, base: TaxRuleDefaults) -> TaxRuleDefaults {
        let (cst_icms, csosn) = if self.cst_icms.is_some() || self.csosn.is_some() {
            (self.cst_icms.clone(), self.csosn.clone())
        } else {
            (base.cst_icms, base.csosn)
        };

        TaxRuleDefaults {
            cfop_estadual: self.cfop_estadual.clone().unwrap_or(base.cfop_estadual),
            cfop_interestadual: self.cfop_interestadual.clone().unwrap_or(base.cfop_interestadual),
            cst_icms,
            csosn,
            aliquota_icms: self.aliquota_icms.unwrap_or(base.aliquota_icms),
            aliquota_icms_interestadual: self
                .aliquota_icms_interestadual
                .unwrap_or(base.aliquota_icms_interestadual),
            aliquota_icms_st: self.aliquota_icms_st.unwrap_or(base.aliquota_icms_st),
            mva_st: self.mva_st.unwrap_or(base.mva_st),
            cst_pis: self.cst_pis.clone().unwrap_or(base.cst_pis),
            aliquota_pis: self.aliquota_pis.unwrap_or(base.aliquota_pis),
            cst_cofins: self.cst_cofins.clone().unwrap_or(base.cst_cofins),
            aliquota_cofins: self.aliquota_cofins.unwrap_or(base.aliquota_cofins),
            cst_ipi: self.cst_ipi.clone().unwrap_or(base.cst_ipi),
            aliquota_ipi: self.aliquota_ipi.unwrap_or(base.aliquota_ipi),
        }
    }
}

// Distingue campo ausente (None) de `null` explícito (Some(None))
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// --- Seed de Regras ---

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeedTaxRulesRequest {
    #[schema(example = "venda")]
    pub tipo_operacao: Option<String>,
    #[serde(default)]
    pub overwrite: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeedResult {
    pub created: u32,
    pub skipped: u32,
    /// Quantas das criadas substituíram uma regra padrão existente (overwrite)
    pub replaced: u32,
    pub total_produtos: u32,
}

// --- Checklist de Onboarding ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingStatus {
    pub dados_empresa: bool,
    pub certificado: bool,
    pub config_nfe: bool,
    pub ncm_produtos: bool,
    pub regras_fiscais: bool,
    pub completo: bool,

    pub etapa_atual: i16,
    pub onboarding_completo: bool,

    pub total_produtos: i64,
    pub produtos_com_ncm: i64,
    pub total_regras: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_lenient_only_recognizes_devolucao() {
        assert_eq!(TipoOperacao::parse_lenient("devolucao"), TipoOperacao::Devolucao);
        assert_eq!(TipoOperacao::parse_lenient(" DEVOLUCAO "), TipoOperacao::Devolucao);
        assert_eq!(TipoOperacao::parse_lenient("venda"), TipoOperacao::Venda);
        assert_eq!(TipoOperacao::parse_lenient("transferencia"), TipoOperacao::Venda);
        assert_eq!(TipoOperacao::parse_lenient(""), TipoOperacao::Venda);
    }

    #[test]
    fn config_request_rejects_bad_documents() {
        let req = UpdateFiscalConfigRequest {
            cnpj: Some("11.222.333/0001-00".into()),
            uf: Some("ZZ".into()),
            cep: Some("1301-000".into()),
            ..Default::default()
        };
        let errors = req.validate_documents().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("cnpj"));
        assert!(fields.contains_key("uf"));
        assert!(fields.contains_key("cep"));
    }

    #[test]
    fn config_request_normalizes_documents() {
        let req = UpdateFiscalConfigRequest {
            cnpj: Some("11.222.333/0001-81".into()),
            cep: Some("13010-000".into()),
            ..Default::default()
        };
        assert!(req.validate_documents().is_ok());
        let req = req.normalized();
        assert_eq!(req.cnpj.as_deref(), Some("11222333000181"));
        assert_eq!(req.cep.as_deref(), Some("13010000"));
    }

    #[test]
    fn config_request_range_checks() {
        let req = UpdateFiscalConfigRequest {
            regime_tributario: Some(5),
            ambiente_nfe: Some(3),
            ..Default::default()
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 2);
    }

    #[test]
    fn tax_rule_request_rejects_out_of_range_rates() {
        let req = TaxRuleRequest {
            aliquota_icms: Some(Decimal::new(-1, 0)),
            aliquota_pis: Some(Decimal::new(10001, 2)),
            uf_destino: Some(Some("XX".into())),
            ..Default::default()
        };
        let errors = req.validate_rates().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("aliquotaIcms"));
        assert!(fields.contains_key("aliquotaPis"));
        assert!(fields.contains_key("ufDestino"));
    }

    #[test]
    fn tax_rule_request_overrides_only_sent_fields() {
        let base = TaxRuleDefaults {
            cfop_estadual: "5102".into(),
            cfop_interestadual: "6102".into(),
            cst_icms: Some("000".into()),
            csosn: None,
            aliquota_icms: Decimal::new(1800, 2),
            aliquota_icms_interestadual: Decimal::new(1200, 2),
            aliquota_icms_st: Decimal::new(0, 2),
            mva_st: Decimal::new(0, 2),
            cst_pis: "01".into(),
            aliquota_pis: Decimal::new(65, 2),
            cst_cofins: "01".into(),
            aliquota_cofins: Decimal::new(300, 2),
            cst_ipi: "99".into(),
            aliquota_ipi: Decimal::new(0, 2),
        };
        let req = TaxRuleRequest {
            aliquota_icms: Some(Decimal::new(1700, 2)),
            cfop_estadual: Some("5405".into()),
            ..Default::default()
        };

        let merged = req.apply_to(base.clone());

        assert_eq!(merged.cfop_estadual, "5405");
        assert_eq!(merged.aliquota_icms.to_string(), "17.00");
        assert_eq!(merged.cfop_interestadual, base.cfop_interestadual);
        assert_eq!(merged.aliquota_cofins, base.aliquota_cofins);
    }

    #[test]
    fn rates_serialize_as_decimal_strings() {
        let defaults = TaxRuleDefaults {
            cfop_estadual: "5102".into(),
            cfop_interestadual: "6102".into(),
            cst_icms: Some("000".into()),
            csosn: None,
            aliquota_icms: Decimal::new(1800, 2),
            aliquota_icms_interestadual: Decimal::new(1200, 2),
            aliquota_icms_st: Decimal::new(0, 2),
            mva_st: Decimal::new(0, 2),
            cst_pis: "01".into(),
            aliquota_pis: Decimal::new(65, 2),
            cst_cofins: "01".into(),
            aliquota_cofins: Decimal::new(300, 2),
            cst_ipi: "99".into(),
            aliquota_ipi: Decimal::new(0, 2),
        };
        let json = serde_json::to_value(&defaults).unwrap();
        assert_eq!(json["aliquotaIcms"], "18.00");
        assert_eq!(json["aliquotaPis"], "0.65");
        assert_eq!(json["csosn"], serde_json::Value::Null);
    }

    #[test]
    fn sending_csosn_drops_the_base_cst() {
        let base = crate::services::tax_rules::generate_default_rule(3, TipoOperacao::Venda);
        let req = TaxRuleRequest { csosn: Some("0102".into()), ..Default::default() };

        let merged = req.apply_to(base);

        assert_eq!(merged.csosn.as_deref(), Some("0102"));
        assert_eq!(merged.cst_icms, None);
    }

    #[test]
    fn sending_cst_drops_the_base_csosn() {
        let base = crate::services::tax_rules::generate_default_rule(1, TipoOperacao::Venda);
        let req = TaxRuleRequest { cst_icms: Some("060".into()), ..Default::default() };

        let merged = req.apply_to(base);

        assert_eq!(merged.cst_icms.as_deref(), Some("060"));
        assert_eq!(merged.csosn, None);
    }

    #[test]
    fn both_icms_code_families_are_rejected() {
        let req = TaxRuleRequest {
            cst_icms: Some("000".into()),
            csosn: Some("0102".into()),
            ..Default::default()
        };
        let errors = req.validate_rates().unwrap_err();
        assert!(errors.field_errors().contains_key("csosn"));
    }

    #[test]
    fn mva_above_one_hundred_is_accepted() {
        let req = TaxRuleRequest { mva_st: Some(Decimal::new(14000, 2)), ..Default::default() };
        assert!(req.validate_rates().is_ok());
    }

    #[test]
    fn uf_destino_distinguishes_absent_from_null() {
        let absent: TaxRuleRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.uf_destino, None);

        let cleared: TaxRuleRequest = serde_json::from_str(r#"{"ufDestino": null}"#).unwrap();
        assert_eq!(cleared.uf_destino, Some(None));

        let set: TaxRuleRequest = serde_json::from_str(r#"{"ufDestino": "RJ"}"#).unwrap();
        assert_eq!(set.uf_destino, Some(Some("RJ".to_string())));
    }

    #[test]
    fn seed_request_defaults() {
        let req: SeedTaxRulesRequest = serde_json::from_str("{}").unwrap();
        assert!(req.tipo_operacao.is_none());
        assert!(!req.overwrite);
    }
}
