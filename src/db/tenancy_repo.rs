// src/db/tenancy_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::common::error::AppError;

#[derive(Clone, Default)]
pub struct TenantRepository;

impl TenantRepository {
    pub fn new() -> Self {
        Self
    }

    /// CRT guardado nas configurações gerais do tenant (`tenants.settings->>'crt'`).
    /// Valores ausentes ou não numéricos voltam como `None`.
    pub async fn find_settings_crt<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<Option<i16>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let crt = sqlx::query_scalar::<_, Option<i16>>(
            r#"
            SELECT CASE
                WHEN settings->>'crt' ~ '^[1-4]$' THEN (settings->>'crt')::smallint
                ELSE NULL
            END
            FROM tenants
            WHERE id = $1
            "#,
        )
            .bind(tenant_id)
            .fetch_optional(executor)
            .await?;

        Ok(crt.flatten())
    }
}
