// src/models/dashboard.rs

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    common::money,
    models::{orders::Order, period::Period},
};

// Papel de quem consulta. Admin vê os valores financeiros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
}

impl Role {
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("admin") {
            Role::Admin
        } else {
            Role::Staff
        }
    }
}

// 1. Contagem dos cards de status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub pending: u32,          // Aguardando Aprovação + Aguardando Pagamento
    pub in_production: u32,    // Em Produção
    pub ready_for_pickup: u32, // Disponível para Retirada
    pub finalized: u32,        // Finalizada
}

// 2. Indicadores do período (derivado, nunca persistido)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KpiSnapshot {
    pub period: Period,
    pub status_counts: StatusCounts,
    // Contagem por rótulo (inclui canceladas e desconhecidos), para o gráfico de rosca
    pub status_breakdown: BTreeMap<String, u32>,
    pub revenue: Decimal,
    pub cost: Decimal,
    pub gross_profit: Decimal,
    pub receivables: Decimal,
    pub purchases_outflow: Decimal,
    pub payables_outflow: Decimal,
    pub extra_outflow: Decimal,
    pub total_outflows: Decimal,
    pub net_result: Decimal,
}

impl KpiSnapshot {
    pub fn empty(period: Period) -> Self {
        Self {
            period,
            status_counts: StatusCounts::default(),
            status_breakdown: BTreeMap::new(),
            revenue: Decimal::ZERO,
            cost: Decimal::ZERO,
            gross_profit: Decimal::ZERO,
            receivables: Decimal::ZERO,
            purchases_outflow: Decimal::ZERO,
            payables_outflow: Decimal::ZERO,
            extra_outflow: Decimal::ZERO,
            total_outflows: Decimal::ZERO,
            net_result: Decimal::ZERO,
        }
    }
}

// 3. Linhas do balancete (entradas e saídas)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LedgerEntry {
    pub date: NaiveDate,
    #[schema(example = "Order #1 - Padaria Central")]
    pub label: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LedgerTotals {
    pub inflows: Decimal,
    pub outflows: Decimal,
    pub balance: Decimal,
}

/// Resultado do agregador: indicadores + as duas listas do balancete.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReport {
    pub kpis: KpiSnapshot,
    pub inflows: Vec<LedgerEntry>,
    pub outflows: Vec<LedgerEntry>,
}

impl PeriodReport {
    pub fn ledger_totals(&self) -> LedgerTotals {
        let inflows = money::sum(self.inflows.iter().map(|entry| entry.value), "entradas");
        let outflows = money::sum(self.outflows.iter().map(|entry| entry.value), "saídas");
        LedgerTotals { inflows, outflows, balance: money::sub(inflows, outflows, "saldo") }
    }

    /// Mais recente primeiro (convenção das tabelas). Empates mantêm a ordem.
    pub fn sorted_most_recent_first(mut self) -> Self {
        self.inflows.sort_by(|a, b| b.date.cmp(&a.date));
        self.outflows.sort_by(|a, b| b.date.cmp(&a.date));
        self
    }

    pub fn sorted_oldest_first(mut self) -> Self {
        self.inflows.sort_by_key(|entry| entry.date);
        self.outflows.sort_by_key(|entry| entry.date);
        self
    }
}

// 4. Visão mascarada conforme o papel
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KpiView {
    pub period: Period,
    pub status_counts: StatusCounts,
    pub status_breakdown: BTreeMap<String, u32>,
    pub receivables: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_profit: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_outflows: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_result: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LatestKpiView {
    pub sequence: u64,
    pub refreshed_at: DateTime<Utc>,
    pub kpis: KpiView,
}

// 5. Balancete exportado
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BalanceteExport {
    pub period: Period,
    pub inflows: Vec<LedgerEntry>,
    pub outflows: Vec<LedgerEntry>,
    pub totals: LedgerTotals,
    pub generated_at: DateTime<Utc>,
    pub generated_by: Option<String>,
}

// 6. Totais de contas a pagar do período
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayablesSummary {
    pub period: Period,
    pub total_pending: Decimal,
    pub total_paid: Decimal,
    pub total: Decimal,
    pub pending_count: u32,
    pub paid_count: u32,
}

// 7. Encerramento do mês
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthClosing {
    pub period: Period,
    pub next_period: Period,
    pub closed_at: DateTime<Utc>,
    pub total_revenue: Decimal,
    pub total_cost: Decimal,
    pub transferred_orders: Vec<String>,
    pub failed_orders: Vec<String>,
}

// 8. Opções dos filtros do painel
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub sellers: Vec<String>,
    pub suppliers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentOrders {
    pub period: Period,
    pub total_matching: usize,
    pub orders: Vec<Order>,
}
