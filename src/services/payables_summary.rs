// src/services/payables_summary.rs

use rust_decimal::Decimal;

use crate::common::money;
use crate::models::{
    dashboard::PayablesSummary,
    payables::{PayableAccount, PayableStatus},
    period::Period,
};

/// Totais da tela de contas a pagar, pelo vencimento.
/// Status desconhecido não entra em nenhum dos dois lados.
pub fn summarize_payables(payables: &[PayableAccount], period: Period) -> PayablesSummary {
    let mut summary = PayablesSummary {
        period,
        total_pending: Decimal::ZERO,
        total_paid: Decimal::ZERO,
        total: Decimal::ZERO,
        pending_count: 0,
        paid_count: 0,
    };

    let in_period = payables
        .iter()
        .filter(|account| account.due_date.is_some_and(|date| period.contains(date)));

    for account in in_period {
        match &account.status {
            PayableStatus::Pending => {
                summary.total_pending = money::add(summary.total_pending, account.value, "pendente");
                summary.pending_count += 1;
            }
            PayableStatus::Paid => {
                summary.total_paid = money::add(summary.total_paid, account.value, "pago");
                summary.paid_count += 1;
            }
            PayableStatus::Unrecognized(label) => {
                tracing::debug!(id = %account.id, status = %label, "conta com status desconhecido fora dos totais");
            }
        }
    }

    summary.total = money::add(summary.total_pending, summary.total_paid, "total");
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn huge_totals_saturate() {
        let payables: Vec<PayableAccount> = serde_json::from_value(json!([
            { "valor": 7e28, "vencimento": "2024-03-01", "status": "Pendente" },
            { "valor": 7e28, "vencimento": "2024-03-02", "status": "Pago" }
        ]))
        .unwrap();

        let summary = summarize_payables(&payables, Period::new(3, 2024).unwrap());

        assert_eq!(summary.pending_count, 1);
        assert_eq!(summary.total, Decimal::MAX);
    }

    #[test]
    fn splits_pending_and_paid_within_period() {
        let payables: Vec<PayableAccount> = serde_json::from_value(json!([
            { "id": 1, "valor": 100, "vencimento": "2024-03-01", "status": "Pendente" },
            { "id": 2, "valor": "R$ 50,50", "vencimento": "2024-03-31", "status": "Pago" },
            { "id": 3, "valor": 70, "vencimento": "2024-03-10", "status": "Pendente" },
            { "id": 4, "valor": 999, "vencimento": "2024-04-01", "status": "Pago" },
            { "id": 5, "valor": 10, "vencimento": "2024-03-11", "status": "Estornado" },
            { "id": 6, "valor": 10, "status": "Pendente" }
        ]))
        .unwrap();

        let summary = summarize_payables(&payables, Period::new(3, 2024).unwrap());

        assert_eq!(summary.total_pending, Decimal::from(170));
        assert_eq!(summary.total_paid, Decimal::new(5050, 2));
        assert_eq!(summary.total, Decimal::new(22050, 2));
        assert_eq!(summary.pending_count, 2);
        assert_eq!(summary.paid_count, 1);
    }
}
