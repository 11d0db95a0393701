// src/services/dashboard_service.rs

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    models::{
        dashboard::{BalanceteExport, FilterOptions, MonthClosing, PayablesSummary, PeriodReport, RecentOrders},
        orders::Order,
        payables::PayableAccount,
        period::Period,
        purchases::Purchase,
    },
    repos::CrudApi,
    services::{
        carry_over::plan_carry_over,
        order_filter::{self, OrderFilter},
        payables_summary::summarize_payables,
        period_aggregator::{self, PeriodAggregator},
    },
};

// As três coleções de uma passada. Nada fica guardado entre chamadas.
struct Collections {
    orders: Vec<Order>,
    purchases: Vec<Purchase>,
    payables: Vec<PayableAccount>,
}

#[derive(Clone)]
pub struct DashboardService {
    api: Arc<dyn CrudApi>,
}

impl DashboardService {
    pub fn new(api: Arc<dyn CrudApi>) -> Self {
        Self { api }
    }

    async fn load_collections(&self) -> Result<Collections, AppError> {
        // Agrega só depois que as três chegaram
        let (orders, purchases, payables) = tokio::try_join!(
            self.api.fetch_orders(),
            self.api.fetch_purchases(),
            self.api.fetch_payables(),
        )?;

        Ok(Collections { orders, purchases, payables })
    }

    /// Busca tudo e agrega uma única vez para o período.
    pub async fn period_report(&self, period: Period, extra_outflow: Decimal) -> Result<PeriodReport, AppError> {
        let data = self.load_collections().await?;

        let report = PeriodAggregator::new(period)
            .with_extra_outflow(extra_outflow)
            .aggregate(&data.orders, &data.purchases, &data.payables);

        tracing::info!(
            periodo = %period,
            receita = %report.kpis.revenue,
            saidas = %report.kpis.total_outflows,
            "indicadores do período calculados"
        );
        Ok(report)
    }

    pub async fn balancete(&self, period: Period, generated_by: Option<String>) -> Result<BalanceteExport, AppError> {
        let report = self.period_report(period, Decimal::ZERO).await?.sorted_oldest_first();
        let totals = report.ledger_totals();

        Ok(BalanceteExport {
            period,
            inflows: report.inflows,
            outflows: report.outflows,
            totals,
            generated_at: Utc::now(),
            generated_by,
        })
    }

    pub async fn recent_orders(&self, period: Period, filter: &OrderFilter, limit: usize) -> Result<RecentOrders, AppError> {
        let orders = self.api.fetch_orders().await?;
        let (total_matching, orders) = order_filter::recent_orders(orders, period, filter, limit);

        Ok(RecentOrders { period, total_matching, orders })
    }

    pub async fn filter_options(&self) -> Result<FilterOptions, AppError> {
        let orders = self.api.fetch_orders().await?;
        Ok(order_filter::filter_options(&orders))
    }

    pub async fn payables_summary(&self, period: Period) -> Result<PayablesSummary, AppError> {
        let payables = self.api.fetch_payables().await?;
        Ok(summarize_payables(&payables, period))
    }

    /// Fecha o mês: calcula receita/custo e empurra os pedidos em aberto
    /// para o dia 1 do mês seguinte. Falha em um pedido não aborta os outros.
    pub async fn close_month(&self, period: Period) -> Result<MonthClosing, AppError> {
        let data = self.load_collections().await?;
        let report = period_aggregator::aggregate(&data.orders, &data.purchases, &data.payables, period);

        let plan = plan_carry_over(&data.orders, period).ok_or(AppError::InvalidPeriod {
            month: period.month(),
            year: period.year(),
        })?;

        let mut transferred_orders = Vec::new();
        let mut failed_orders = Vec::new();

        for order in &plan.orders {
            if order.number.trim().is_empty() {
                tracing::warn!(cliente = %order.client, "pedido sem número não pode ser transferido");
                failed_orders.push(format!("sem número ({})", order.client));
                continue;
            }
            match self.api.update_order(order).await {
                Ok(()) => transferred_orders.push(order.number.clone()),
                Err(e) => {
                    tracing::error!(numero = %order.number, error = %e, "falha ao transferir pedido");
                    failed_orders.push(order.number.clone());
                }
            }
        }

        tracing::info!(
            periodo = %plan.from,
            nova_data = %plan.new_date,
            transferidos = transferred_orders.len(),
            falhas = failed_orders.len(),
            "✅ mês encerrado"
        );

        Ok(MonthClosing {
            period,
            next_period: plan.to,
            closed_at: Utc::now(),
            total_revenue: report.kpis.revenue,
            total_cost: report.kpis.cost,
            transferred_orders,
            failed_orders,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::InMemoryCrudApi;
    use chrono::NaiveDate;
    use serde_json::json;

    fn sample_api() -> InMemoryCrudApi {
        InMemoryCrudApi::from_json(
            json!([
                { "numero": "1", "cliente": "Padaria Central", "vendedor": "Ana", "data": "2024-03-10",
                  "status": "Finalizada", "valor_total": 1000, "custo": 400, "valor_entrada": 500, "valor_restante": 500 },
                { "numero": "2", "cliente": "Mercado Sol", "vendedor": "Bruno", "data": "2024-03-12",
                  "status": "Em Produção", "valor_total": 600, "custo": 200, "valor_entrada": 300, "valor_restante": 300 },
                { "numero": "3", "cliente": "Loja Z", "data": "2024-03-14", "status": "Aguardando Aprovação",
                  "valor_total": 90, "valor_restante": 90 },
                "registro quebrado"
            ]),
            json!([
                { "id": 10, "data": "2024-03-03", "item": "Lona", "valor": 120 }
            ]),
            json!([
                { "id": 20, "descricao": "Aluguel", "valor": 300, "vencimento": "2024-03-05", "status": "Pago" },
                { "id": 21, "descricao": "Luz", "valor": 80, "vencimento": "2024-03-20", "status": "Pendente" }
            ]),
        )
    }

    fn march() -> Period {
        Period::new(3, 2024).unwrap()
    }

    #[tokio::test]
    async fn period_report_fetches_all_collections_once() {
        let api = Arc::new(sample_api());
        let service = DashboardService::new(api.clone());

        let report = service.period_report(march(), Decimal::from(50)).await.unwrap();

        assert_eq!(api.fetches.load(std::sync::atomic::Ordering::SeqCst), 3);
        assert_eq!(report.kpis.revenue, Decimal::from(1000));
        assert_eq!(report.kpis.receivables, Decimal::from(390));
        assert_eq!(report.kpis.total_outflows, Decimal::from(470));
        assert_eq!(report.kpis.net_result, Decimal::from(530));
    }

    #[tokio::test]
    async fn upstream_failure_is_propagated() {
        let api = InMemoryCrudApi { unavailable: true, ..Default::default() };
        let service = DashboardService::new(Arc::new(api));

        let err = service.period_report(march(), Decimal::ZERO).await.unwrap_err();
        assert!(matches!(err, AppError::Upstream { status: 503, .. }));
    }

    #[tokio::test]
    async fn balancete_is_sorted_and_totalled() {
        let service = DashboardService::new(Arc::new(sample_api()));

        let export = service.balancete(march(), Some("admin".into())).await.unwrap();

        assert_eq!(export.inflows.len(), 1);
        assert_eq!(export.outflows[0].label, "Purchase #10 - Lona");
        assert_eq!(export.outflows[1].label, "Account #20 - Aluguel");
        assert_eq!(export.totals.balance, Decimal::from(80));
        assert_eq!(export.generated_by.as_deref(), Some("admin"));
    }

    #[tokio::test]
    async fn close_month_moves_open_orders() {
        let api = Arc::new(InMemoryCrudApi { reject_updates: vec!["3".into()], ..sample_api() });
        let service = DashboardService::new(api.clone());

        let closing = service.close_month(march()).await.unwrap();

        assert_eq!(closing.next_period, Period::new(4, 2024).unwrap());
        assert_eq!(closing.total_revenue, Decimal::from(1000));
        assert_eq!(closing.transferred_orders, vec!["2"]);
        assert_eq!(closing.failed_orders, vec!["3"]);

        let updated = api.updated.lock().unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].date, NaiveDate::from_ymd_opt(2024, 4, 1));
    }

    #[tokio::test]
    async fn close_month_uses_flask_ids_and_skips_unnumbered_orders() {
        let api = Arc::new(InMemoryCrudApi::from_json(
            json!([
                { "id": 41, "cliente": "Gráfica Sul", "data": "2024-03-08", "status": "Em Produção", "valor_total": 200 },
                { "cliente": "Sem Número", "data": "2024-03-09", "status": "Aguardando Pagamento", "valor_total": 50 }
            ]),
            json!([]),
            json!([]),
        ));
        let service = DashboardService::new(api.clone());

        let closing = service.close_month(march()).await.unwrap();

        assert_eq!(closing.transferred_orders, vec!["41"]);
        assert_eq!(closing.failed_orders, vec!["sem número (Sem Número)"]);
        assert_eq!(api.updated.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn payables_summary_and_filters() {
        let service = DashboardService::new(Arc::new(sample_api()));

        let summary = service.payables_summary(march()).await.unwrap();
        assert_eq!(summary.total_paid, Decimal::from(300));
        assert_eq!(summary.total_pending, Decimal::from(80));

        let options = service.filter_options().await.unwrap();
        assert_eq!(options.sellers, vec!["Ana", "Bruno"]);

        let recent = service.recent_orders(march(), &OrderFilter::default(), 2).await.unwrap();
        assert_eq!(recent.total_matching, 3);
        assert_eq!(recent.orders[0].number, "3");
    }
}
