// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Dashboard ---
        handlers::dashboard::get_kpis,
        handlers::dashboard::get_latest,
        handlers::dashboard::refresh_now,
        handlers::dashboard::get_recent_orders,
        handlers::dashboard::get_filter_options,

        // --- Financeiro ---
        handlers::finance::get_balancete,
        handlers::finance::get_payables_summary,
        handlers::finance::close_month,
    ),
    components(
        schemas(
            // --- PERÍODO ---
            models::period::Period,

            // --- PEDIDOS / COMPRAS / CONTAS ---
            models::orders::Order,
            models::purchases::Purchase,
            models::payables::PayableAccount,

            // --- DASHBOARD ---
            models::dashboard::Role,
            models::dashboard::StatusCounts,
            models::dashboard::KpiView,
            models::dashboard::LatestKpiView,
            models::dashboard::FilterOptions,
            models::dashboard::RecentOrders,

            // --- FINANCEIRO ---
            models::dashboard::LedgerEntry,
            models::dashboard::LedgerTotals,
            models::dashboard::BalanceteExport,
            models::dashboard::PayablesSummary,
            models::dashboard::MonthClosing,

            // --- Payloads ---
            handlers::finance::CloseMonthPayload,
        )
    ),
    tags(
        (name = "Dashboard", description = "Indicadores do período, pedidos recentes e filtros"),
        (name = "Financeiro", description = "Balancete, contas a pagar e encerramento do mês (admin)")
    )
)]
pub struct ApiDoc;
