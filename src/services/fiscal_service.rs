// src/services/fiscal_service.rs

use serde_json::json;
use sqlx::{Acquire, Executor, PgConnection, Postgres};
use uuid::Uuid;

use crate::{
    common::{error::AppError, validation::only_digits},
    db::{AuditRepository, FiscalRepository, ProductRepository, TenantRepository},
    models::{
        audit::FiscalAuditEntry,
        fiscal::{
            CreateCertificateRequest, FiscalCertificate, FiscalConfig, OnboardingStatus,
            ProductTaxRule, SeedResult, SeedTaxRulesRequest, TaxRuleData, TaxRuleDefaults,
            TaxRuleRequest, TipoOperacao, UpdateFiscalConfigRequest,
        },
        product::{Product, UpdateNcmRequest},
    },
    services::{
        onboarding::{build_status, OnboardingSnapshot},
        tax_rules::{generate_default_rule, plan_seed_action, SeedAction},
    },
};

const OPERACAO_PADRAO: &str = "venda";

#[derive(Clone)]
pub struct FiscalService {
    fiscal_repo: FiscalRepository,
    product_repo: ProductRepository,
    tenant_repo: TenantRepository,
    audit_repo: AuditRepository,
    /// CRT usado quando nem a configuração fiscal nem o tenant informam o regime
    crt_padrao: i16,
}

impl FiscalService {
    pub fn new(
        fiscal_repo: FiscalRepository,
        product_repo: ProductRepository,
        tenant_repo: TenantRepository,
        audit_repo: AuditRepository,
        crt_padrao: i16,
    ) -> Self {
        Self { fiscal_repo, product_repo, tenant_repo, audit_repo, crt_padrao }
    }

    // =========================================================================
    //  CONFIGURAÇÃO DA EMPRESA
    // =========================================================================

    pub async fn get_config<'e, E>(&self, executor: E, tenant_id: Uuid) -> Result<FiscalConfig, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let config = self.fiscal_repo.get_config(executor, tenant_id).await?;
        Ok(config.unwrap_or_else(|| FiscalConfig::empty(tenant_id)))
    }

    pub async fn update_config<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        user_id: Uuid,
        input: UpdateFiscalConfigRequest,
    ) -> Result<FiscalConfig, AppError>
    where
        E: Acquire<'e, Database = Postgres>,
    {
        let input = input.normalized();
        let mut tx = executor.begin().await?;

        let config = self.fiscal_repo.upsert_config(&mut *tx, tenant_id, &input).await?;

        let entry = FiscalAuditEntry::new(user_id, "fiscal_config.update", "fiscal_config").details(json!({
            "regimeTributario": config.regime_tributario,
            "ambienteNfe": config.ambiente_nfe,
            "onboardingEtapaAtual": config.onboarding_etapa_atual,
        }));
        self.audit_repo.record(&mut *tx, tenant_id, &entry).await?;

        tx.commit().await?;
        Ok(config)
    }

    // =========================================================================
    //  CHECKLIST DE ONBOARDING
    // =========================================================================

    pub async fn onboarding_status<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<OnboardingStatus, AppError>
    where
        E: Acquire<'e, Database = Postgres>,
    {
        // Snapshot consistente das quatro consultas
        let mut tx = executor.begin().await?;

        let snapshot = OnboardingSnapshot {
            config: self.fiscal_repo.get_config(&mut *tx, tenant_id).await?,
            certificados_ativos: self.fiscal_repo.count_active_certificates(&mut *tx, tenant_id).await?,
            produtos: self.product_repo.ncm_coverage(&mut *tx, tenant_id).await?,
            total_regras: self.fiscal_repo.count_rules(&mut *tx, tenant_id).await?,
        };

        tx.commit().await?;
        Ok(build_status(&snapshot))
    }

    // =========================================================================
    //  REGRAS FISCAIS
    // =========================================================================

    /// Regime tributário do tenant: configuração fiscal, depois settings do tenant, depois o padrão configurado.
    async fn resolve_crt(&self, conn: &mut PgConnection, tenant_id: Uuid) -> Result<i16, AppError> {
        let from_config = self
            .fiscal_repo
            .get_config(&mut *conn, tenant_id)
            .await?
            .and_then(|c| c.regime_tributario);
        if let Some(crt) = from_config {
            return Ok(crt);
        }

        if let Some(crt) = self.tenant_repo.find_settings_crt(&mut *conn, tenant_id).await? {
            return Ok(crt);
        }

        tracing::warn!(
            "⚠️ Tenant {} sem regime tributário definido; usando CRT padrão {}",
            tenant_id,
            self.crt_padrao
        );
        Ok(self.crt_padrao)
    }

    async fn ensure_product(
        &self,
        conn: &mut PgConnection,
        tenant_id: Uuid,
        product_id: Uuid,
    ) -> Result<Product, AppError> {
        self.product_repo
            .find_by_id(&mut *conn, tenant_id, product_id)
            .await?
            .ok_or(AppError::ProductNotFound)
    }

    pub async fn list_rules<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        product_id: Uuid,
    ) -> Result<Vec<ProductTaxRule>, AppError>
    where
        E: Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;
        self.ensure_product(&mut tx, tenant_id, product_id).await?;
        let rules = self.fiscal_repo.list_rules(&mut *tx, tenant_id, product_id).await?;
        tx.commit().await?;
        Ok(rules)
    }

    /// Cria uma regra; o que não vier no payload é preenchido pelo gerador de padrões.
    pub async fn create_rule<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        user_id: Uuid,
        product_id: Uuid,
        input: TaxRuleRequest,
    ) -> Result<ProductTaxRule, AppError>
    where
        E: Acquire<'e, Database = Postgres>,
    {
        let tipo_operacao =
            TipoOperacao::parse_lenient(input.tipo_operacao.as_deref().unwrap_or(OPERACAO_PADRAO));

        let mut tx = executor.begin().await?;
        self.ensure_product(&mut tx, tenant_id, product_id).await?;

        let crt = self.resolve_crt(&mut tx, tenant_id).await?;
        let fiscal = input.apply_to(generate_default_rule(crt, tipo_operacao));

        let existing_defaults = self
            .fiscal_repo
            .count_default_rules(&mut *tx, tenant_id, product_id, tipo_operacao)
            .await?;
        // Primeira regra da operação vira padrão automaticamente
        let is_default = input.is_default.unwrap_or(existing_defaults == 0);
        if is_default && existing_defaults > 0 {
            self.fiscal_repo
                .clear_default(&mut *tx, tenant_id, product_id, tipo_operacao, None)
                .await?;
        }

        let data = TaxRuleData {
            tipo_operacao,
            tipo_cliente: input.tipo_cliente.unwrap_or_default(),
            uf_destino: input.uf_destino.clone().flatten(),
            fiscal,
            is_default,
        };
        let rule = self.fiscal_repo.create_rule(&mut *tx, tenant_id, product_id, &data).await?;

        let entry = FiscalAuditEntry::new(user_id, "tax_rule.create", "product_tax_rule")
            .entity(rule.id)
            .details(json!({
                "productId": product_id,
                "tipoOperacao": tipo_operacao.as_str(),
                "isDefault": is_default,
            }));
        self.audit_repo.record(&mut *tx, tenant_id, &entry).await?;

        tx.commit().await?;
        Ok(rule)
    }

    pub async fn update_rule<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        user_id: Uuid,
        product_id: Uuid,
        rule_id: Uuid,
        input: TaxRuleRequest,
    ) -> Result<ProductTaxRule, AppError>
    where
        E: Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let current = self
            .fiscal_repo
            .find_rule(&mut *tx, tenant_id, product_id, rule_id)
            .await?
            .ok_or(AppError::TaxRuleNotFound)?;

        let tipo_operacao = input
            .tipo_operacao
            .as_deref()
            .map(TipoOperacao::parse_lenient)
            .unwrap_or(current.tipo_operacao);
        let is_default = input.is_default.unwrap_or(current.is_default);

        if is_default {
            self.fiscal_repo
                .clear_default(&mut *tx, tenant_id, product_id, tipo_operacao, Some(rule_id))
                .await?;
        }

        let data = TaxRuleData {
            tipo_operacao,
            tipo_cliente: input.tipo_cliente.unwrap_or(current.tipo_cliente),
            // `null` explícito volta a regra para todas as UFs
            uf_destino: match input.uf_destino.clone() {
                Some(uf) => uf,
                None => current.uf_destino,
            },
            fiscal: input.apply_to(current.fiscal),
            is_default,
        };
        let rule = self.fiscal_repo.update_rule(&mut *tx, tenant_id, rule_id, &data).await?;

        let entry = FiscalAuditEntry::new(user_id, "tax_rule.update", "product_tax_rule")
            .entity(rule_id)
            .details(json!({ "productId": product_id, "isDefault": is_default }));
        self.audit_repo.record(&mut *tx, tenant_id, &entry).await?;

        tx.commit().await?;
        Ok(rule)
    }

    pub async fn delete_rule<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        user_id: Uuid,
        product_id: Uuid,
        rule_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let deleted = self.fiscal_repo.delete_rule(&mut *tx, tenant_id, product_id, rule_id).await?;
        if deleted == 0 {
            return Err(AppError::TaxRuleNotFound);
        }

        let entry = FiscalAuditEntry::new(user_id, "tax_rule.delete", "product_tax_rule")
            .entity(rule_id)
            .details(json!({ "productId": product_id }));
        self.audit_repo.record(&mut *tx, tenant_id, &entry).await?;

        tx.commit().await?;
        Ok(())
    }

    // =========================================================================
    //  SEED DE REGRAS PADRÃO
    // =========================================================================

    async fn seed_product(
        &self,
        conn: &mut PgConnection,
        tenant_id: Uuid,
        product_id: Uuid,
        data: &TaxRuleData,
        overwrite: bool,
    ) -> Result<SeedAction, AppError> {
        let existing = self
            .fiscal_repo
            .count_default_rules(&mut *conn, tenant_id, product_id, data.tipo_operacao)
            .await?;

        let action = plan_seed_action(existing, overwrite);
        match action {
            SeedAction::Skip => {}
            SeedAction::Replace => {
                self.fiscal_repo
                    .delete_default_rules(&mut *conn, tenant_id, product_id, data.tipo_operacao)
                    .await?;
                self.fiscal_repo.create_rule(&mut *conn, tenant_id, product_id, data).await?;
            }
            SeedAction::Create => {
                self.fiscal_repo.create_rule(&mut *conn, tenant_id, product_id, data).await?;
            }
        }
        Ok(action)
    }

    /// Gera a regra padrão de cada produto com NCM. Roda numa única transação:
    /// se um produto falhar, nada do lote é gravado.
    pub async fn seed_tax_rules<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        user_id: Uuid,
        input: SeedTaxRulesRequest,
    ) -> Result<SeedResult, AppError>
    where
        E: Acquire<'e, Database = Postgres>,
    {
        let tipo_operacao =
            TipoOperacao::parse_lenient(input.tipo_operacao.as_deref().unwrap_or(OPERACAO_PADRAO));

        let mut tx = executor.begin().await?;

        let products = self.product_repo.list_with_ncm(&mut *tx, tenant_id).await?;
        if products.is_empty() {
            return Err(AppError::NoProductsWithNcm);
        }

        let crt = self.resolve_crt(&mut tx, tenant_id).await?;
        let defaults: TaxRuleDefaults = generate_default_rule(crt, tipo_operacao);
        let data = TaxRuleData {
            tipo_operacao,
            tipo_cliente: Default::default(),
            uf_destino: None,
            fiscal: defaults,
            is_default: true,
        };

        let mut result = SeedResult::default();
        for product in &products {
            let action = self
                .seed_product(&mut tx, tenant_id, product.id, &data, input.overwrite)
                .await
                .inspect_err(|e| {
                    tracing::error!("[fiscal::seed] falha no produto {}: {}", product.id, e)
                })?;
            result.record(action);
        }

        let entry = FiscalAuditEntry::new(user_id, "tax_rule.seed", "product_tax_rule").details(json!({
            "tipoOperacao": tipo_operacao.as_str(),
            "overwrite": input.overwrite,
            "crt": crt,
            "created": result.created,
            "skipped": result.skipped,
            "replaced": result.replaced,
            "totalProdutos": result.total_produtos,
        }));
        self.audit_repo.record(&mut *tx, tenant_id, &entry).await?;

        tx.commit().await?;

        tracing::info!(
            "🌱 Seed de regras fiscais ({}) no tenant {}: {} criadas, {} ignoradas, {} substituídas",
            tipo_operacao.as_str(),
            tenant_id,
            result.created,
            result.skipped,
            result.replaced
        );
        Ok(result)
    }

    // =========================================================================
    //  NCM DOS PRODUTOS
    // =========================================================================

    pub async fn list_pending_ncm<'e, E>(&self, executor: E, tenant_id: Uuid) -> Result<Vec<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.product_repo.list_without_ncm(executor, tenant_id).await
    }

    pub async fn update_ncm<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        user_id: Uuid,
        product_id: Uuid,
        input: UpdateNcmRequest,
    ) -> Result<Product, AppError>
    where
        E: Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let product = self
            .product_repo
            .update_ncm(&mut *tx, tenant_id, product_id, &input.ncm, input.cest.as_deref())
            .await?
            .ok_or(AppError::ProductNotFound)?;

        let entry = FiscalAuditEntry::new(user_id, "product.ncm_update", "product")
            .entity(product_id)
            .details(json!({ "ncm": input.ncm, "cest": input.cest }));
        self.audit_repo.record(&mut *tx, tenant_id, &entry).await?;

        tx.commit().await?;
        Ok(product)
    }

    // =========================================================================
    //  CERTIFICADOS
    // =========================================================================

    pub async fn list_certificates<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<Vec<FiscalCertificate>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.fiscal_repo.list_certificates(executor, tenant_id).await
    }

    /// Registra um certificado. Um novo certificado ativo desativa os anteriores.
    pub async fn register_certificate<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        user_id: Uuid,
        input: CreateCertificateRequest,
    ) -> Result<FiscalCertificate, AppError>
    where
        E: Acquire<'e, Database = Postgres>,
    {
        let titular_cnpj = only_digits(&input.titular_cnpj);
        let mut tx = executor.begin().await?;

        if input.ativo {
            self.fiscal_repo.deactivate_certificates(&mut *tx, tenant_id).await?;
        }
        let certificate = self
            .fiscal_repo
            .create_certificate(&mut *tx, tenant_id, &input, &titular_cnpj)
            .await?;

        let entry = FiscalAuditEntry::new(user_id, "certificate.register", "fiscal_certificate")
            .entity(certificate.id)
            .details(json!({ "validoAte": certificate.valido_ate, "ativo": certificate.ativo }));
        self.audit_repo.record(&mut *tx, tenant_id, &entry).await?;

        tx.commit().await?;
        Ok(certificate)
    }
}
