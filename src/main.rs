// src/main.rs

use axum::{
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;

mod common;
mod config;
mod docs;
mod handlers;
mod middleware;
mod models;
mod repos;
mod services;

use crate::config::{AppState, Config};
use crate::docs::ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG manda; sem ela, info
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let config = Config::from_env()?;
    let app_state = AppState::new(&config)?;

    // Atualização periódica dos indicadores (intervalo zero desliga)
    let shutdown = CancellationToken::new();
    let refresh_handle = if config.refresh_interval.is_zero() {
        tracing::info!("Atualização periódica desligada (REFRESH_INTERVAL_SECS=0)");
        None
    } else {
        Some(app_state.refresher.clone().start(shutdown.child_token()))
    };

    let app = build_router(app_state);

    // Inicia o servidor
    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    let signal = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Falha ao escutar o sinal de desligamento: {}", e);
            }
            tracing::info!("Sinal de desligamento recebido");
            signal.cancel();
        })
        .await?;

    if let Some(handle) = refresh_handle {
        handle.stop().await;
    }
    tracing::info!("✅ Servidor encerrado");

    Ok(())
}

pub fn build_router(app_state: AppState) -> Router {
    let dashboard_routes = Router::new()
        .route("/kpis", get(handlers::dashboard::get_kpis))
        .route("/latest", get(handlers::dashboard::get_latest))
        .route("/refresh", post(handlers::dashboard::refresh_now))
        .route("/pedidos-recentes", get(handlers::dashboard::get_recent_orders))
        .route("/filtros", get(handlers::dashboard::get_filter_options));

    // Seção financeira (cada handler exige admin)
    let finance_routes = Router::new()
        .route("/api/balancete", get(handlers::finance::get_balancete))
        .route("/api/contas_pagar/resumo", get(handlers::finance::get_payables_summary))
        .route("/api/financeiro/encerrar-mes", post(handlers::finance::close_month));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/api/dashboard", dashboard_routes)
        .merge(finance_routes)
        .with_state(app_state)
}
