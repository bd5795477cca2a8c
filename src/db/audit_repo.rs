// src/db/audit_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::audit::FiscalAuditEntry};

// Log de auditoria: append-only, sem leitura
#[derive(Clone, Default)]
pub struct AuditRepository;

impl AuditRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn record<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        entry: &FiscalAuditEntry,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO fiscal_audit_logs (tenant_id, user_id, acao, entidade, entidade_id, detalhes)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
            .bind(tenant_id)
            .bind(entry.user_id)
            .bind(entry.acao)
            .bind(entry.entidade)
            .bind(entry.entidade_id)
            .bind(&entry.detalhes)
            .execute(executor)
            .await?;

        Ok(())
    }
}
