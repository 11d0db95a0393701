// src/handlers/dashboard.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    handlers::query::resolve_period,
    middleware::{i18n::Locale, viewer::Viewer},
    models::{
        dashboard::{FilterOptions, KpiView, LatestKpiView, RecentOrders},
        orders::OrderStatus,
        period::Period,
    },
    services::{
        order_filter::{OrderFilter, DEFAULT_RECENT_LIMIT},
        refresh::PublishedReport,
        visibility::mask_for_role,
    },
};

// =============================================================================
//  1. INDICADORES DO PERÍODO
// =============================================================================

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct KpiQuery {
    /// Mês (1-12). Padrão: mês corrente
    #[validate(range(min = 1, max = 12, message = "mês deve estar entre 1 e 12"))]
    pub mes: Option<u32>,

    /// Ano com quatro dígitos. Padrão: ano corrente
    #[validate(range(min = 1000, max = 9999, message = "ano deve ter quatro dígitos"))]
    pub ano: Option<i32>,

    /// Saídas avulsas somadas ao total de saídas
    pub saidas_extras: Option<Decimal>,
}

impl KpiQuery {
    fn period(&self) -> Result<Period, AppError> {
        self.validate()?;
        resolve_period(self.mes, self.ano)
    }
}

fn latest_view(published: &PublishedReport, viewer: &Viewer) -> LatestKpiView {
    LatestKpiView {
        sequence: published.sequence,
        refreshed_at: published.refreshed_at,
        kpis: mask_for_role(&published.report.kpis, viewer.role),
    }
}

// GET /api/dashboard/kpis
#[utoipa::path(
    get,
    path = "/api/dashboard/kpis",
    tag = "Dashboard",
    params(KpiQuery),
    responses(
        (status = 200, description = "Indicadores do período (valores financeiros só para admin)", body = KpiView),
        (status = 400, description = "Período inválido"),
        (status = 502, description = "API CRUD indisponível")
    )
)]
pub async fn get_kpis(
    State(app_state): State<AppState>,
    locale: Locale,
    viewer: Viewer,
    Query(query): Query<KpiQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let period = query
        .period()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let report = app_state
        .dashboard_service
        .period_report(period, query.saidas_extras.unwrap_or(Decimal::ZERO))
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(mask_for_role(&report.kpis, viewer.role))))
}

// GET /api/dashboard/latest
#[utoipa::path(
    get,
    path = "/api/dashboard/latest",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Último resultado da atualização periódica", body = LatestKpiView),
        (status = 404, description = "Nenhum ciclo concluído ainda")
    )
)]
pub async fn get_latest(
    State(app_state): State<AppState>,
    locale: Locale,
    viewer: Viewer,
) -> Result<impl IntoResponse, ApiError> {
    let published = app_state
        .refresher
        .latest()
        .ok_or(AppError::SnapshotUnavailable)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(latest_view(&published, &viewer))))
}

// POST /api/dashboard/refresh
#[utoipa::path(
    post,
    path = "/api/dashboard/refresh",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Ciclo executado na hora", body = LatestKpiView),
        (status = 502, description = "API CRUD indisponível")
    )
)]
pub async fn refresh_now(
    State(app_state): State<AppState>,
    locale: Locale,
    viewer: Viewer,
) -> Result<impl IntoResponse, ApiError> {
    let published = app_state
        .refresher
        .refresh_now()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(latest_view(&published, &viewer))))
}

// =============================================================================
//  2. PEDIDOS RECENTES & FILTROS
// =============================================================================

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecentOrdersQuery {
    #[validate(range(min = 1, max = 12, message = "mês deve estar entre 1 e 12"))]
    pub mes: Option<u32>,
    #[validate(range(min = 1000, max = 9999, message = "ano deve ter quatro dígitos"))]
    pub ano: Option<i32>,
    /// Rótulo exato, ex: "Em Produção"
    pub status: Option<String>,
    pub vendedor: Option<String>,
    pub fornecedor: Option<String>,
    /// Busca por número ou cliente
    pub busca: Option<String>,
    /// Só pedidos em aberto (nem finalizados nem cancelados)
    pub abertos: Option<bool>,
    #[validate(range(min = 1, max = 100, message = "limite deve estar entre 1 e 100"))]
    pub limite: Option<usize>,
}

impl RecentOrdersQuery {
    fn filter(&self) -> OrderFilter {
        OrderFilter {
            status: self
                .status
                .as_deref()
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .map(OrderStatus::from_label),
            seller: self.vendedor.clone(),
            supplier: self.fornecedor.clone(),
            search: self.busca.clone(),
            open_only: self.abertos.unwrap_or(false),
        }
    }
}

// GET /api/dashboard/pedidos-recentes
#[utoipa::path(
    get,
    path = "/api/dashboard/pedidos-recentes",
    tag = "Dashboard",
    params(RecentOrdersQuery),
    responses(
        (status = 200, description = "Pedidos do período, mais recentes primeiro", body = RecentOrders)
    )
)]
pub async fn get_recent_orders(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<RecentOrdersQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let period = query
        .validate()
        .map_err(AppError::from)
        .and_then(|_| resolve_period(query.mes, query.ano))
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let recent = app_state
        .dashboard_service
        .recent_orders(period, &query.filter(), query.limite.unwrap_or(DEFAULT_RECENT_LIMIT))
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(recent)))
}

// GET /api/dashboard/filtros
#[utoipa::path(
    get,
    path = "/api/dashboard/filtros",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Vendedores e fornecedores distintos", body = FilterOptions)
    )
)]
pub async fn get_filter_options(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let options = app_state
        .dashboard_service
        .filter_options()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(options)))
}
