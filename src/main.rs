//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::{AppState, Config};
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG controla o nível; padrão "info"
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;
    let app_state = AppState::new(&config).await?;

    sqlx::migrate!().run(&app_state.db_pool).await?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app(app_state)).await?;

    Ok(())
}

/// Router completo: rotas fiscais autenticadas, health check e Swagger UI.
fn app(app_state: AppState) -> Router {
    // Todas as rotas fiscais exigem token com tenant
    let fiscal_routes = Router::new()
        .route("/config/empresa"
               ,get(handlers::fiscal_config::get_config)
               .put(handlers::fiscal_config::update_config)
        )
        .route("/config/status", get(handlers::fiscal_config::get_status))
        .route("/produtos/pendentes-ncm", get(handlers::products::list_pending_ncm))
        .route("/produtos/tax-rules/seed", post(handlers::tax_rules::seed_rules))
        .route("/produtos/{id}/ncm", put(handlers::products::update_ncm))
        .route("/produtos/{id}/tax-rules"
               ,post(handlers::tax_rules::create_rule)
               .get(handlers::tax_rules::list_rules)
        )
        .route("/produtos/{id}/tax-rules/{rule_id}"
               ,put(handlers::tax_rules::update_rule)
               .delete(handlers::tax_rules::delete_rule)
        )
        .route("/certificados"
               ,get(handlers::certificates::list_certificates)
               .post(handlers::certificates::register_certificate)
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/fiscal", fiscal_routes)
        .with_state(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_state;

    // Todos os handlers fiscais precisam ser aceitos pelo router
    #[tokio::test]
    async fn builds_router_with_every_fiscal_handler() {
        let _app = app(test_state());
    }
}
