// src/config.rs

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    common::i18n::I18nStore,
    db::{AuditRepository, FiscalRepository, ProductRepository, TenantRepository},
    services::{auth::AuthService, fiscal_service::FiscalService},
};

// Configuração lida do ambiente (.env opcional)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub max_connections: u32,
    pub crt_padrao: i16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(get: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = get("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = get("JWT_SECRET").context("JWT_SECRET deve ser definido")?;
        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());

        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v.parse().context("DATABASE_MAX_CONNECTIONS deve ser um número")?,
            None => 5,
        };

        let crt_padrao: i16 = match get("FISCAL_CRT_PADRAO") {
            Some(v) => v.parse().context("FISCAL_CRT_PADRAO deve ser um número")?,
            None => 3,
        };
        anyhow::ensure!((1..=4).contains(&crt_padrao), "FISCAL_CRT_PADRAO deve estar entre 1 e 4");

        Ok(Self { database_url, jwt_secret, bind_addr, max_connections, crt_padrao })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub i18n_store: I18nStore,
    pub auth_service: AuthService,
    pub fiscal_service: FiscalService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::with_pool(db_pool, config))
    }

    /// Monta o gráfico de dependências sobre uma pool já criada.
    pub fn with_pool(db_pool: PgPool, config: &Config) -> Self {
        let fiscal_service = FiscalService::new(
            FiscalRepository::new(),
            ProductRepository::new(),
            TenantRepository::new(),
            AuditRepository::new(),
            config.crt_padrao,
        );

        Self {
            db_pool,
            i18n_store: I18nStore::new(),
            auth_service: AuthService::new(config.jwt_secret.clone()),
            fiscal_service,
        }
    }
}

/// Estado com pool preguiçosa (nenhuma conexão é aberta). Precisa de um runtime tokio.
#[cfg(test)]
pub fn test_state() -> AppState {
    let config = Config {
        database_url: "postgres://localhost/trail_test".to_string(),
        jwt_secret: "segredo-de-teste".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        max_connections: 1,
        crt_padrao: 3,
    };
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_lazy(&config.database_url)
        .expect("URL de banco válida");
    AppState::with_pool(pool, &config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn applies_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/trail"),
            ("JWT_SECRET", "s3gr3d0"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.crt_padrao, 3);
    }

    #[test]
    fn requires_database_url_and_secret() {
        assert!(Config::from_lookup(lookup(&[("JWT_SECRET", "x")])).is_err());
        assert!(Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://x")])).is_err());
    }

    #[test]
    fn rejects_invalid_default_crt() {
        let result = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/trail"),
            ("JWT_SECRET", "s3gr3d0"),
            ("FISCAL_CRT_PADRAO", "7"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/trail"),
            ("JWT_SECRET", "s3gr3d0"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("DATABASE_MAX_CONNECTIONS", "20"),
            ("FISCAL_CRT_PADRAO", "1"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.max_connections, 20);
        assert_eq!(config.crt_padrao, 1);
    }
}
