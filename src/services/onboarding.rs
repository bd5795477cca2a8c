// src/services/onboarding.rs

use crate::models::{
    fiscal::{FiscalConfig, OnboardingStatus},
    product::NcmCoverage,
};

/// Os números lidos do banco para montar o checklist.
#[derive(Debug, Clone)]
pub struct OnboardingSnapshot {
    pub config: Option<FiscalConfig>,
    pub certificados_ativos: i64,
    pub produtos: NcmCoverage,
    pub total_regras: i64,
}

fn filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// `com_ncm / total >= 0.8`, em aritmética inteira. Sem produtos o passo não está cumprido.
pub fn ncm_coverage_reached(com_ncm: i64, total: i64) -> bool {
    total > 0 && com_ncm * 5 >= total * 4
}

pub fn build_status(snapshot: &OnboardingSnapshot) -> OnboardingStatus {
    let config = snapshot.config.as_ref();

    let dados_empresa = config.is_some_and(|c| {
        filled(&c.razao_social) && filled(&c.cnpj) && filled(&c.inscricao_estadual) && filled(&c.uf)
    });
    let config_nfe = config.is_some_and(|c| c.ambiente_nfe.is_some() && c.serie_nfe.is_some());
    let certificado = snapshot.certificados_ativos > 0;
    let ncm_produtos = ncm_coverage_reached(snapshot.produtos.com_ncm, snapshot.produtos.total);
    let regras_fiscais = snapshot.total_regras > 0;

    OnboardingStatus {
        dados_empresa,
        certificado,
        config_nfe,
        ncm_produtos,
        regras_fiscais,
        completo: dados_empresa && certificado && config_nfe && ncm_produtos && regras_fiscais,
        etapa_atual: config.map(|c| c.onboarding_etapa_atual).unwrap_or(0),
        onboarding_completo: config.is_some_and(|c| c.onboarding_completo),
        total_produtos: snapshot.produtos.total,
        produtos_com_ncm: snapshot.produtos.com_ncm,
        total_regras: snapshot.total_regras,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn complete_config() -> FiscalConfig {
        let mut config = FiscalConfig::empty(Uuid::new_v4());
        config.razao_social = Some("Casa das Telhas Ltda".into());
        config.cnpj = Some("11222333000181".into());
        config.inscricao_estadual = Some("110042490114".into());
        config.uf = Some("SP".into());
        config.ambiente_nfe = Some(2);
        config.serie_nfe = Some(1);
        config.onboarding_etapa_atual = 4;
        config
    }

    #[test]
    fn coverage_boundary_is_inclusive_at_eighty_percent() {
        assert!(ncm_coverage_reached(4, 5));
        assert!(ncm_coverage_reached(80, 100));
        assert!(!ncm_coverage_reached(79_999, 100_000));
        assert!(!ncm_coverage_reached(3, 5));
        assert!(ncm_coverage_reached(10, 10));
    }

    #[test]
    fn tenant_without_products_has_not_covered_ncm() {
        assert!(!ncm_coverage_reached(0, 0));
    }

    #[test]
    fn empty_tenant_has_nothing_done() {
        let status = build_status(&OnboardingSnapshot {
            config: None,
            certificados_ativos: 0,
            produtos: NcmCoverage::default(),
            total_regras: 0,
        });
        assert!(!status.dados_empresa);
        assert!(!status.certificado);
        assert!(!status.config_nfe);
        assert!(!status.ncm_produtos);
        assert!(!status.regras_fiscais);
        assert!(!status.completo);
        assert_eq!(status.etapa_atual, 0);
    }

    #[test]
    fn all_signals_make_it_complete() {
        let status = build_status(&OnboardingSnapshot {
            config: Some(complete_config()),
            certificados_ativos: 1,
            produtos: NcmCoverage { total: 10, com_ncm: 8 },
            total_regras: 8,
        });
        assert!(status.completo);
        assert_eq!(status.etapa_atual, 4);
        assert_eq!(status.produtos_com_ncm, 8);
    }

    #[test]
    fn blank_company_fields_do_not_count() {
        let mut config = complete_config();
        config.inscricao_estadual = Some("   ".into());
        let status = build_status(&OnboardingSnapshot {
            config: Some(config),
            certificados_ativos: 1,
            produtos: NcmCoverage { total: 1, com_ncm: 1 },
            total_regras: 1,
        });
        assert!(!status.dados_empresa);
        assert!(status.config_nfe);
        assert!(!status.completo);
    }

    #[test]
    fn nfe_config_needs_environment_and_series() {
        let mut config = complete_config();
        config.serie_nfe = None;
        let status = build_status(&OnboardingSnapshot {
            config: Some(config),
            certificados_ativos: 0,
            produtos: NcmCoverage { total: 5, com_ncm: 3 },
            total_regras: 0,
        });
        assert!(status.dados_empresa);
        assert!(!status.config_nfe);
        assert!(!status.ncm_produtos);
    }
}
