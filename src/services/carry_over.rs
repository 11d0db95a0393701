// src/services/carry_over.rs
//
// Encerramento de mês: pedidos ainda em aberto passam para o dia 1 do mês
// seguinte, para não sumirem do painel.

use chrono::NaiveDate;

use crate::models::{orders::Order, period::Period};

#[derive(Debug, Clone)]
pub struct CarryOverPlan {
    pub from: Period,
    pub to: Period,
    pub new_date: NaiveDate,
    pub orders: Vec<Order>,
}

/// Seleciona os pedidos do período que não estão finalizados nem cancelados
/// e devolve cópias já com a nova data. `None` quando não existe mês seguinte.
pub fn plan_carry_over(orders: &[Order], period: Period) -> Option<CarryOverPlan> {
    let to = period.next()?;
    let new_date = to.first_day()?;

    let moved = orders
        .iter()
        .filter(|order| order.date.is_some_and(|date| period.contains(date)))
        .filter(|order| order.status.is_open())
        .map(|order| Order { date: Some(new_date), ..order.clone() })
        .collect();

    Some(CarryOverPlan { from: period, to, new_date, orders: moved })
}
