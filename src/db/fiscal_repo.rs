// src/db/fiscal_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::fiscal::{
        CreateCertificateRequest, FiscalCertificate, FiscalConfig, ProductTaxRule, TaxRuleData,
        TipoOperacao, UpdateFiscalConfigRequest,
    },
};

const DEFAULT_RULE_INDEX: &str = "uq_product_tax_rules_default";

// Violação do índice parcial de regra padrão vira 409; o resto segue como erro de banco.
fn map_default_conflict(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() && db_err.constraint() == Some(DEFAULT_RULE_INDEX) {
            return AppError::DefaultRuleConflict;
        }
    }
    e.into()
}

#[derive(Clone, Default)]
pub struct FiscalRepository;

impl FiscalRepository {
    pub fn new() -> Self {
        Self
    }

    // =========================================================================
    //  CONFIGURAÇÃO FISCAL
    // =========================================================================

    pub async fn get_config<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<Option<FiscalConfig>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let config = sqlx::query_as::<_, FiscalConfig>(
            "SELECT * FROM fiscal_configs WHERE tenant_id = $1",
        )
            .bind(tenant_id)
            .fetch_optional(executor)
            .await?;

        Ok(config)
    }

    /// UPSERT: cria na primeira chamada; depois só altera os campos enviados.
    pub async fn upsert_config<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        input: &UpdateFiscalConfigRequest,
    ) -> Result<FiscalConfig, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let config = sqlx::query_as::<_, FiscalConfig>(
            r#"
            INSERT INTO fiscal_configs (
                tenant_id, razao_social, nome_fantasia, cnpj, inscricao_estadual,
                endereco, municipio, codigo_municipio, uf, cep,
                regime_tributario, ambiente_nfe, serie_nfe, proximo_numero_nfe,
                onboarding_etapa_atual, onboarding_completo
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                COALESCE($15, 0), COALESCE($16, FALSE)
            )
            ON CONFLICT (tenant_id)
            DO UPDATE SET
                razao_social = COALESCE($2, fiscal_configs.razao_social),
                nome_fantasia = COALESCE($3, fiscal_configs.nome_fantasia),
                cnpj = COALESCE($4, fiscal_configs.cnpj),
                inscricao_estadual = COALESCE($5, fiscal_configs.inscricao_estadual),
                endereco = COALESCE($6, fiscal_configs.endereco),
                municipio = COALESCE($7, fiscal_configs.municipio),
                codigo_municipio = COALESCE($8, fiscal_configs.codigo_municipio),
                uf = COALESCE($9, fiscal_configs.uf),
                cep = COALESCE($10, fiscal_configs.cep),
                regime_tributario = COALESCE($11, fiscal_configs.regime_tributario),
                ambiente_nfe = COALESCE($12, fiscal_configs.ambiente_nfe),
                serie_nfe = COALESCE($13, fiscal_configs.serie_nfe),
                proximo_numero_nfe = COALESCE($14, fiscal_configs.proximo_numero_nfe),
                onboarding_etapa_atual = COALESCE($15, fiscal_configs.onboarding_etapa_atual),
                onboarding_completo = COALESCE($16, fiscal_configs.onboarding_completo),
                updated_at = NOW()
            RETURNING *
            "#,
        )
            .bind(tenant_id)
            .bind(&input.razao_social)
            .bind(&input.nome_fantasia)
            .bind(&input.cnpj)
            .bind(&input.inscricao_estadual)
            .bind(&input.endereco)
            .bind(&input.municipio)
            .bind(&input.codigo_municipio)
            .bind(&input.uf)
            .bind(&input.cep)
            .bind(input.regime_tributario)
            .bind(input.ambiente_nfe)
            .bind(input.serie_nfe)
            .bind(input.proximo_numero_nfe)
            .bind(input.onboarding_etapa_atual)
            .bind(input.onboarding_completo)
            .fetch_one(executor)
            .await?;

        Ok(config)
    }

    // =========================================================================
    //  CERTIFICADOS
    // =========================================================================

    pub async fn count_active_certificates<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM fiscal_certificates
            WHERE tenant_id = $1 AND ativo AND valido_ate > NOW()
            "#,
        )
            .bind(tenant_id)
            .fetch_one(executor)
            .await?;

        Ok(count)
    }

    pub async fn list_certificates<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<Vec<FiscalCertificate>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let certificates = sqlx::query_as::<_, FiscalCertificate>(
            "SELECT * FROM fiscal_certificates WHERE tenant_id = $1 ORDER BY ativo DESC, valido_ate DESC",
        )
            .bind(tenant_id)
            .fetch_all(executor)
            .await?;

        Ok(certificates)
    }

    pub async fn deactivate_certificates<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "UPDATE fiscal_certificates SET ativo = FALSE WHERE tenant_id = $1 AND ativo",
        )
            .bind(tenant_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn create_certificate<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        input: &CreateCertificateRequest,
        titular_cnpj: &str,
    ) -> Result<FiscalCertificate, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let certificate = sqlx::query_as::<_, FiscalCertificate>(
            r#"
            INSERT INTO fiscal_certificates (tenant_id, descricao, titular_cnpj, valido_ate, ativo)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
            .bind(tenant_id)
            .bind(&input.descricao)
            .bind(titular_cnpj)
            .bind(input.valido_ate)
            .bind(input.ativo)
            .fetch_one(executor)
            .await?;

        Ok(certificate)
    }

    // =========================================================================
    //  REGRAS FISCAIS POR PRODUTO
    // =========================================================================

    pub async fn count_rules<'e, E>(&self, executor: E, tenant_id: Uuid) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM product_tax_rules WHERE tenant_id = $1",
        )
            .bind(tenant_id)
            .fetch_one(executor)
            .await?;

        Ok(count)
    }

    pub async fn list_rules<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        product_id: Uuid,
    ) -> Result<Vec<ProductTaxRule>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rules = sqlx::query_as::<_, ProductTaxRule>(
            r#"
            SELECT * FROM product_tax_rules
            WHERE tenant_id = $1 AND product_id = $2
            ORDER BY is_default DESC, tipo_operacao ASC, uf_destino ASC NULLS FIRST, created_at ASC
            "#,
        )
            .bind(tenant_id)
            .bind(product_id)
            .fetch_all(executor)
            .await?;

        Ok(rules)
    }

    pub async fn find_rule<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        product_id: Uuid,
        rule_id: Uuid,
    ) -> Result<Option<ProductTaxRule>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rule = sqlx::query_as::<_, ProductTaxRule>(
            "SELECT * FROM product_tax_rules WHERE tenant_id = $1 AND product_id = $2 AND id = $3",
        )
            .bind(tenant_id)
            .bind(product_id)
            .bind(rule_id)
            .fetch_optional(executor)
            .await?;

        Ok(rule)
    }

    pub async fn count_default_rules<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        product_id: Uuid,
        tipo_operacao: TipoOperacao,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM product_tax_rules
            WHERE tenant_id = $1 AND product_id = $2 AND tipo_operacao = $3 AND is_default
            "#,
        )
            .bind(tenant_id)
            .bind(product_id)
            .bind(tipo_operacao)
            .fetch_one(executor)
            .await?;

        Ok(count)
    }

    pub async fn delete_default_rules<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        product_id: Uuid,
        tipo_operacao: TipoOperacao,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            DELETE FROM product_tax_rules
            WHERE tenant_id = $1 AND product_id = $2 AND tipo_operacao = $3 AND is_default
            "#,
        )
            .bind(tenant_id)
            .bind(product_id)
            .bind(tipo_operacao)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    /// Rebaixa a regra padrão atual (exceto `keep_id`) antes de outra assumir o posto.
    pub async fn clear_default<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        product_id: Uuid,
        tipo_operacao: TipoOperacao,
        keep_id: Option<Uuid>,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE product_tax_rules
            SET is_default = FALSE, updated_at = NOW()
            WHERE tenant_id = $1 AND product_id = $2 AND tipo_operacao = $3 AND is_default
              AND ($4::uuid IS NULL OR id <> $4)
            "#,
        )
            .bind(tenant_id)
            .bind(product_id)
            .bind(tipo_operacao)
            .bind(keep_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn create_rule<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        product_id: Uuid,
        data: &TaxRuleData,
    ) -> Result<ProductTaxRule, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let f = &data.fiscal;
        sqlx::query_as::<_, ProductTaxRule>(
            r#"
            INSERT INTO product_tax_rules (
                tenant_id, product_id, tipo_operacao, tipo_cliente, uf_destino,
                cfop_estadual, cfop_interestadual, cst_icms, csosn,
                aliquota_icms, aliquota_icms_interestadual, aliquota_icms_st, mva_st,
                cst_pis, aliquota_pis, cst_cofins, aliquota_cofins, cst_ipi, aliquota_ipi,
                is_default
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
            RETURNING *
            "#,
        )
            .bind(tenant_id)
            .bind(product_id)
            .bind(data.tipo_operacao)
            .bind(data.tipo_cliente)
            .bind(&data.uf_destino)
            .bind(&f.cfop_estadual)
            .bind(&f.cfop_interestadual)
            .bind(&f.cst_icms)
            .bind(&f.csosn)
            .bind(f.aliquota_icms)
            .bind(f.aliquota_icms_interestadual)
            .bind(f.aliquota_icms_st)
            .bind(f.mva_st)
            .bind(&f.cst_pis)
            .bind(f.aliquota_pis)
            .bind(&f.cst_cofins)
            .bind(f.aliquota_cofins)
            .bind(&f.cst_ipi)
            .bind(f.aliquota_ipi)
            .bind(data.is_default)
            .fetch_one(executor)
            .await
            .map_err(map_default_conflict)
    }

    pub async fn update_rule<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        rule_id: Uuid,
        data: &TaxRuleData,
    ) -> Result<ProductTaxRule, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let f = &data.fiscal;
        sqlx::query_as::<_, ProductTaxRule>(
            r#"
            UPDATE product_tax_rules SET
                tipo_operacao = $3,
                tipo_cliente = $4,
                uf_destino = $5,
                cfop_estadual = $6,
                cfop_interestadual = $7,
                cst_icms = $8,
                csosn = $9,
                aliquota_icms = $10,
                aliquota_icms_interestadual = $11,
                aliquota_icms_st = $12,
                mva_st = $13,
                cst_pis = $14,
                aliquota_pis = $15,
                cst_cofins = $16,
                aliquota_cofins = $17,
                cst_ipi = $18,
                aliquota_ipi = $19,
                is_default = $20,
                updated_at = NOW()
            WHERE tenant_id = $1 AND id = $2
            RETURNING *
            "#,
        )
            .bind(tenant_id)
            .bind(rule_id)
            .bind(data.tipo_operacao)
            .bind(data.tipo_cliente)
            .bind(&data.uf_destino)
            .bind(&f.cfop_estadual)
            .bind(&f.cfop_interestadual)
            .bind(&f.cst_icms)
            .bind(&f.csosn)
            .bind(f.aliquota_icms)
            .bind(f.aliquota_icms_interestadual)
            .bind(f.aliquota_icms_st)
            .bind(f.mva_st)
            .bind(&f.cst_pis)
            .bind(f.aliquota_pis)
            .bind(&f.cst_cofins)
            .bind(f.aliquota_cofins)
            .bind(&f.cst_ipi)
            .bind(f.aliquota_ipi)
            .bind(data.is_default)
            .fetch_one(executor)
            .await
            .map_err(map_default_conflict)
    }

    pub async fn delete_rule<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        product_id: Uuid,
        rule_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "DELETE FROM product_tax_rules WHERE tenant_id = $1 AND product_id = $2 AND id = $3",
        )
            .bind(tenant_id)
            .bind(product_id)
            .bind(rule_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
