// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Configuração da empresa ---
        handlers::fiscal_config::get_config,
        handlers::fiscal_config::update_config,
        handlers::fiscal_config::get_status,

        // --- Regras fiscais ---
        handlers::tax_rules::create_rule,
        handlers::tax_rules::list_rules,
        handlers::tax_rules::update_rule,
        handlers::tax_rules::delete_rule,
        handlers::tax_rules::seed_rules,

        // --- NCM ---
        handlers::products::list_pending_ncm,
        handlers::products::update_ncm,

        // --- Certificados ---
        handlers::certificates::list_certificates,
        handlers::certificates::register_certificate,
    ),
    components(
        schemas(
            // --- Fiscal ---
            models::fiscal::TipoOperacao,
            models::fiscal::TipoCliente,
            models::fiscal::FiscalConfig,
            models::fiscal::UpdateFiscalConfigRequest,
            models::fiscal::FiscalCertificate,
            models::fiscal::CreateCertificateRequest,
            models::fiscal::TaxRuleDefaults,
            models::fiscal::ProductTaxRule,
            models::fiscal::TaxRuleRequest,
            models::fiscal::SeedTaxRulesRequest,
            models::fiscal::SeedResult,
            models::fiscal::OnboardingStatus,

            // --- Produtos ---
            models::product::Product,
            models::product::UpdateNcmRequest,
        )
    ),
    tags(
        (name = "Fiscal", description = "Configuração fiscal, regras tributárias e onboarding")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_fiscal_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/fiscal/config/empresa",
            "/api/fiscal/config/status",
            "/api/fiscal/produtos/{id}/tax-rules",
            "/api/fiscal/produtos/{id}/tax-rules/{rule_id}",
            "/api/fiscal/produtos/tax-rules/seed",
            "/api/fiscal/produtos/pendentes-ncm",
            "/api/fiscal/produtos/{id}/ncm",
            "/api/fiscal/certificados",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "rota ausente: {expected}");
        }
    }
}
