// src/services/period_aggregator.rs
//
// Núcleo do painel financeiro: filtra pedidos, compras e contas a pagar pelo
// período e reduz tudo em indicadores + entradas/saídas do balancete.
// Função pura: sem I/O, sem erro, independente da ordem de entrada.

use rust_decimal::Decimal;

use crate::common::money;
use crate::models::{
    dashboard::{KpiSnapshot, LedgerEntry, PeriodReport},
    orders::{Order, OrderStatus},
    payables::{PayableAccount, PayableStatus},
    period::Period,
    purchases::Purchase,
};

#[derive(Debug, Clone, Copy)]
pub struct PeriodAggregator {
    period: Period,
    extra_outflow: Decimal,
}

impl PeriodAggregator {
    pub fn new(period: Period) -> Self {
        Self { period, extra_outflow: Decimal::ZERO }
    }

    /// Saída avulsa informada por fora (somada ao total de saídas).
    pub fn with_extra_outflow(mut self, extra_outflow: Decimal) -> Self {
        self.extra_outflow = extra_outflow;
        self
    }

    pub fn aggregate(
        &self,
        orders: &[Order],
        purchases: &[Purchase],
        payables: &[PayableAccount],
    ) -> PeriodReport {
        let mut kpis = KpiSnapshot::empty(self.period);
        let mut inflows = Vec::new();
        let mut outflows = Vec::new();

        // --- PEDIDOS ---
        for order in orders {
            let Some(date) = order.date else {
                tracing::debug!(numero = %order.number, "pedido sem data válida, fora do período");
                continue;
            };
            if !self.period.contains(date) {
                continue;
            }

            *kpis
                .status_breakdown
                .entry(order.status.label().to_string())
                .or_insert(0) += 1;

            match &order.status {
                OrderStatus::AwaitingApproval | OrderStatus::AwaitingPayment => {
                    kpis.status_counts.pending += 1
                }
                OrderStatus::InProduction => kpis.status_counts.in_production += 1,
                OrderStatus::ReadyForPickup => kpis.status_counts.ready_for_pickup += 1,
                OrderStatus::Finalized => {
                    kpis.status_counts.finalized += 1;
                    kpis.revenue = money::add(kpis.revenue, order.total_value, "receita");
                    kpis.cost = money::add(kpis.cost, order.cost, "custo");
                }
                OrderStatus::Cancelled => {}
                OrderStatus::Unrecognized(label) => {
                    tracing::debug!(numero = %order.number, status = %label, "status desconhecido, fora das contagens");
                }
            }

            if order.status.is_open() {
                kpis.receivables = money::add(kpis.receivables, order.remaining, "a receber");
            }

            if order.status.counts_as_inflow() {
                inflows.push(LedgerEntry {
                    date,
                    label: format!("Order #{} - {}", order.number, order.client),
                    value: order.down_payment,
                });
            }
        }

        // --- COMPRAS ---
        for purchase in purchases {
            let Some(date) = purchase.date.filter(|d| self.period.contains(*d)) else {
                if purchase.date.is_none() {
                    tracing::debug!(id = %purchase.id, "compra sem data válida, fora do período");
                }
                continue;
            };

            kpis.purchases_outflow = money::add(kpis.purchases_outflow, purchase.value, "compras");
            outflows.push(LedgerEntry {
                date,
                label: format!("Purchase #{} - {}", purchase.id, purchase.item),
                value: purchase.value,
            });
        }

        // --- CONTAS PAGAS ---
        for account in payables {
            if account.status != PayableStatus::Paid {
                continue;
            }
            let Some(due_date) = account.due_date.filter(|d| self.period.contains(*d)) else {
                if account.due_date.is_none() {
                    tracing::debug!(id = %account.id, "conta sem vencimento válido, fora do período");
                }
                continue;
            };

            kpis.payables_outflow = money::add(kpis.payables_outflow, account.value, "contas pagas");
            outflows.push(LedgerEntry {
                date: due_date,
                label: format!("Account #{} - {}", account.id, account.description),
                value: account.value,
            });
        }

        kpis.gross_profit = money::sub(kpis.revenue, kpis.cost, "lucro bruto");
        kpis.extra_outflow = self.extra_outflow;
        kpis.total_outflows = money::sum(
            [kpis.purchases_outflow, kpis.payables_outflow, self.extra_outflow],
            "saídas",
        );
        kpis.net_result = money::sub(kpis.revenue, kpis.total_outflows, "resultado");

        PeriodReport { kpis, inflows, outflows }
    }
}

/// Atalho sem saída avulsa.
pub fn aggregate(
    orders: &[Order],
    purchases: &[Purchase],
    payables: &[PayableAccount],
    period: Period,
) -> PeriodReport {
    PeriodAggregator::new(period).aggregate(orders, purchases, payables)
}
