// src/db/product_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::product::{NcmCoverage, Product},
};

// Leitura do catálogo de produtos do ERP + manutenção dos campos fiscais
#[derive(Clone, Default)]
pub struct ProductRepository;

impl ProductRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, tenant_id, name, sku, ncm, cest, created_at, updated_at FROM products WHERE tenant_id = $1 AND id = $2",
        )
            .bind(tenant_id)
            .bind(product_id)
            .fetch_optional(executor)
            .await?;

        Ok(product)
    }

    /// Produtos aptos a receber regra fiscal (NCM preenchido).
    pub async fn list_with_ncm<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<Vec<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, tenant_id, name, sku, ncm, cest, created_at, updated_at
            FROM products
            WHERE tenant_id = $1 AND NULLIF(TRIM(ncm), '') IS NOT NULL
            ORDER BY name ASC
            "#,
        )
            .bind(tenant_id)
            .fetch_all(executor)
            .await?;

        Ok(products)
    }

    pub async fn list_without_ncm<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<Vec<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, tenant_id, name, sku, ncm, cest, created_at, updated_at
            FROM products
            WHERE tenant_id = $1 AND NULLIF(TRIM(ncm), '') IS NULL
            ORDER BY name ASC
            "#,
        )
            .bind(tenant_id)
            .fetch_all(executor)
            .await?;

        Ok(products)
    }

    pub async fn ncm_coverage<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<NcmCoverage, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let (total, com_ncm) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT
                COUNT(*),
                COUNT(*) FILTER (WHERE NULLIF(TRIM(ncm), '') IS NOT NULL)
            FROM products
            WHERE tenant_id = $1
            "#,
        )
            .bind(tenant_id)
            .fetch_one(executor)
            .await?;

        Ok(NcmCoverage { total, com_ncm })
    }

    pub async fn update_ncm<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        product_id: Uuid,
        ncm: &str,
        cest: Option<&str>,
    ) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET ncm = $3, cest = COALESCE($4, cest), updated_at = NOW()
            WHERE tenant_id = $1 AND id = $2
            RETURNING id, tenant_id, name, sku, ncm, cest, created_at, updated_at
            "#,
        )
            .bind(tenant_id)
            .bind(product_id)
            .bind(ncm)
            .bind(cest)
            .fetch_optional(executor)
            .await?;

        Ok(product)
    }
}
