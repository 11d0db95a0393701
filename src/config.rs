// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;

use crate::{
    common::i18n::I18nStore,
    repos::{CrudApi, CrudApiClient},
    services::{dashboard_service::DashboardService, refresh::SnapshotRefresher},
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub crud_api_base_url: String,
    pub bind_addr: String,
    pub http_timeout: Duration,
    // Zero desliga a atualização periódica
    pub refresh_interval: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let crud_api_base_url = env::var("CRUD_API_BASE_URL").context("CRUD_API_BASE_URL deve ser definida")?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let http_timeout = seconds_from_env("HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?;
        let refresh_interval = seconds_from_env("REFRESH_INTERVAL_SECS", DEFAULT_REFRESH_INTERVAL_SECS)?;

        Ok(Self {
            crud_api_base_url,
            bind_addr,
            http_timeout,
            refresh_interval,
        })
    }
}

fn seconds_from_env(name: &str, default: u64) -> anyhow::Result<Duration> {
    match env::var(name) {
        Ok(raw) => {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{name} deve ser um número inteiro de segundos, recebido {raw:?}"))?;
            Ok(Duration::from_secs(secs))
        }
        Err(_) => Ok(Duration::from_secs(default)),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub refresher: Arc<SnapshotRefresher>,
    pub i18n_store: Arc<I18nStore>,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = CrudApiClient::new(&config.crud_api_base_url, config.http_timeout)
            .context("Falha ao criar o cliente HTTP da API CRUD")?;

        tracing::info!("✅ Cliente da API CRUD configurado para {}", config.crud_api_base_url);

        Ok(Self::with_api(Arc::new(client), config.refresh_interval))
    }

    // --- Monta o gráfico de dependências ---
    pub fn with_api(api: Arc<dyn CrudApi>, refresh_interval: Duration) -> Self {
        let dashboard_service = DashboardService::new(api);
        let refresher = SnapshotRefresher::new(dashboard_service.clone(), refresh_interval);

        Self {
            dashboard_service,
            refresher: Arc::new(refresher),
            i18n_store: Arc::new(I18nStore::new()),
        }
    }
}
