// src/services/tax_rules.rs

use rust_decimal::Decimal;

use crate::models::fiscal::{SeedResult, TaxRuleDefaults, TipoOperacao};

/// Códigos de CRT tratados como Simples Nacional (Simples, excesso de sublimite e MEI).
const CRT_SIMPLES: [i16; 3] = [1, 2, 4];

// Alíquotas sempre com duas casas ("18.00"), igual ao NUMERIC(5,2) do banco
fn rate(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Gera os valores padrão de uma regra fiscal a partir do regime tributário (CRT)
/// e do tipo de operação. Não há caminho de erro: CRT desconhecido cai no Regime Normal.
pub fn generate_default_rule(crt: i16, tipo_operacao: TipoOperacao) -> TaxRuleDefaults {
    if tipo_operacao == TipoOperacao::Devolucao {
        // Só o CRT 1 usa CSOSN na devolução
        let simples = crt == 1;
        return TaxRuleDefaults {
            cfop_estadual: "5202".into(),
            cfop_interestadual: "6202".into(),
            cst_icms: (!simples).then(|| "090".to_string()),
            csosn: simples.then(|| "0900".to_string()),
            aliquota_icms: rate(0),
            aliquota_icms_interestadual: rate(0),
            aliquota_icms_st: rate(0),
            mva_st: rate(0),
            cst_pis: "49".into(),
            aliquota_pis: rate(0),
            cst_cofins: "49".into(),
            aliquota_cofins: rate(0),
            cst_ipi: "99".into(),
            aliquota_ipi: rate(0),
        };
    }

    if CRT_SIMPLES.contains(&crt) {
        // No Simples ICMS, PIS e COFINS vão na guia unificada (DAS)
        return TaxRuleDefaults {
            cfop_estadual: "5102".into(),
            cfop_interestadual: "6102".into(),
            cst_icms: None,
            csosn: Some("0102".into()),
            aliquota_icms: rate(0),
            aliquota_icms_interestadual: rate(0),
            aliquota_icms_st: rate(0),
            mva_st: rate(0),
            cst_pis: "49".into(),
            aliquota_pis: rate(0),
            cst_cofins: "49".into(),
            aliquota_cofins: rate(0),
            cst_ipi: "99".into(),
            aliquota_ipi: rate(0),
        };
    }

    TaxRuleDefaults {
        cfop_estadual: "5102".into(),
        cfop_interestadual: "6102".into(),
        cst_icms: Some("000".into()),
        csosn: None,
        aliquota_icms: rate(1800),
        aliquota_icms_interestadual: rate(1200),
        aliquota_icms_st: rate(0),
        mva_st: rate(0),
        cst_pis: "01".into(),
        aliquota_pis: rate(65),
        cst_cofins: "01".into(),
        aliquota_cofins: rate(300),
        cst_ipi: "99".into(),
        aliquota_ipi: rate(0),
    }
}

/// O que o seed faz com um produto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedAction {
    /// Nenhuma regra padrão para a operação: cria.
    Create,
    /// Já existe padrão e `overwrite` é falso.
    Skip,
    /// Já existe padrão e `overwrite` é verdadeiro: apaga as padrões e recria.
    Replace,
}

pub fn plan_seed_action(existing_defaults: i64, overwrite: bool) -> SeedAction {
    match (existing_defaults > 0, overwrite) {
        (false, _) => SeedAction::Create,
        (true, false) => SeedAction::Skip,
        (true, true) => SeedAction::Replace,
    }
}

impl SeedResult {
    pub fn record(&mut self, action: SeedAction) {
        self.total_produtos += 1;
        match action {
            SeedAction::Create => self.created += 1,
            SeedAction::Skip => self.skipped += 1,
            SeedAction::Replace => {
                self.created += 1;
                self.replaced += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simples_sale_uses_csosn_0102() {
        for crt in [1, 2, 4] {
            let rule = generate_default_rule(crt, TipoOperacao::Venda);
            assert_eq!(rule.csosn.as_deref(), Some("0102"), "crt {crt}");
            assert_eq!(rule.cst_icms, None, "crt {crt}");
            assert_eq!(rule.aliquota_icms, Decimal::ZERO);
            assert_eq!(rule.aliquota_pis, Decimal::ZERO);
            assert_eq!(rule.aliquota_cofins, Decimal::ZERO);
            assert_eq!(rule.cst_ipi, "99");
            assert_eq!(rule.cfop_estadual, "5102");
            assert_eq!(rule.cfop_interestadual, "6102");
        }
    }

    #[test]
    fn normal_regime_sale_defaults() {
        let rule = generate_default_rule(3, TipoOperacao::Venda);
        assert_eq!(rule.cst_icms.as_deref(), Some("000"));
        assert_eq!(rule.aliquota_icms.to_string(), "18.00");
        assert_eq!(rule.aliquota_icms_interestadual.to_string(), "12.00");
        assert_eq!(rule.csosn, None);
        assert_eq!(rule.cst_pis, "01");
        assert_eq!(rule.aliquota_pis.to_string(), "0.65");
        assert_eq!(rule.cst_cofins, "01");
        assert_eq!(rule.aliquota_cofins.to_string(), "3.00");
    }

    #[test]
    fn unknown_crt_falls_into_normal_regime() {
        assert_eq!(
            generate_default_rule(0, TipoOperacao::Venda),
            generate_default_rule(3, TipoOperacao::Venda)
        );
        assert_eq!(
            generate_default_rule(9, TipoOperacao::Venda),
            generate_default_rule(3, TipoOperacao::Venda)
        );
    }

    #[test]
    fn return_cfops_do_not_depend_on_crt() {
        for crt in [0, 1, 2, 3, 4, 7] {
            let rule = generate_default_rule(crt, TipoOperacao::Devolucao);
            assert_eq!(rule.cfop_estadual, "5202");
            assert_eq!(rule.cfop_interestadual, "6202");
            assert_eq!(rule.aliquota_icms, Decimal::ZERO);
            assert_eq!(rule.aliquota_icms_interestadual, Decimal::ZERO);
            assert_eq!(rule.aliquota_pis, Decimal::ZERO);
            assert_eq!(rule.aliquota_cofins, Decimal::ZERO);
        }
    }

    #[test]
    fn return_code_family_depends_only_on_crt_1() {
        let simples = generate_default_rule(1, TipoOperacao::Devolucao);
        assert_eq!(simples.csosn.as_deref(), Some("0900"));
        assert_eq!(simples.cst_icms, None);

        for crt in [2, 3, 4] {
            let rule = generate_default_rule(crt, TipoOperacao::Devolucao);
            assert_eq!(rule.cst_icms.as_deref(), Some("090"), "crt {crt}");
            assert_eq!(rule.csosn, None, "crt {crt}");
        }
    }

    #[test]
    fn lenient_operation_type_feeds_the_generator() {
        let rule = generate_default_rule(3, TipoOperacao::parse_lenient("qualquer"));
        assert_eq!(rule.cfop_estadual, "5102");
    }

    #[test]
    fn seed_action_decision_table() {
        assert_eq!(plan_seed_action(0, false), SeedAction::Create);
        assert_eq!(plan_seed_action(0, true), SeedAction::Create);
        assert_eq!(plan_seed_action(1, false), SeedAction::Skip);
        assert_eq!(plan_seed_action(1, true), SeedAction::Replace);
        assert_eq!(plan_seed_action(3, true), SeedAction::Replace);
    }

    #[test]
    fn seeding_fully_configured_tenant_without_overwrite_skips_everything() {
        let existing = [1, 1, 2, 1];
        let mut result = SeedResult::default();
        for count in existing {
            result.record(plan_seed_action(count, false));
        }
        assert_eq!(result.created, 0);
        assert_eq!(result.skipped, result.total_produtos);
        assert_eq!(result.total_produtos, 4);
    }

    #[test]
    fn seeding_with_overwrite_recreates_every_existing_default() {
        let existing = [1, 0, 2];
        let mut result = SeedResult::default();
        for count in existing {
            result.record(plan_seed_action(count, true));
        }
        assert_eq!(result.created, 3);
        assert_eq!(result.replaced, 2);
        assert_eq!(result.skipped, 0);
    }
}
