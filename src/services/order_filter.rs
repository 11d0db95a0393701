// src/services/order_filter.rs

use std::collections::BTreeSet;

use crate::models::{
    dashboard::FilterOptions,
    orders::{Order, OrderStatus},
    period::Period,
};

pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Filtros da tabela de pedidos. Campo vazio = não filtra.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub seller: Option<String>,
    pub supplier: Option<String>,
    pub search: Option<String>,
    // Só pedidos que ainda vão gerar dinheiro
    pub open_only: bool,
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        if let Some(status) = &self.status {
            if &order.status != status {
                return false;
            }
        }
        if self.open_only && !order.status.is_open() {
            return false;
        }
        if let Some(seller) = non_blank(&self.seller) {
            if !order.seller.to_lowercase().contains(&seller.to_lowercase()) {
                return false;
            }
        }
        if let Some(supplier) = non_blank(&self.supplier) {
            if order.supplier != supplier {
                return false;
            }
        }
        if let Some(term) = non_blank(&self.search) {
            let term = term.to_lowercase();
            let hit = order.number.to_lowercase().contains(&term)
                || order.client.to_lowercase().contains(&term);
            if !hit {
                return false;
            }
        }
        true
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Pedidos do período que passam no filtro, mais recentes primeiro.
/// Devolve também quantos passaram antes do corte.
pub fn recent_orders(orders: Vec<Order>, period: Period, filter: &OrderFilter, limit: usize) -> (usize, Vec<Order>) {
    let mut matching: Vec<Order> = orders
        .into_iter()
        .filter(|order| order.date.is_some_and(|date| period.contains(date)))
        .filter(|order| filter.matches(order))
        .collect();

    matching.sort_by(|a, b| b.date.cmp(&a.date));
    let total = matching.len();
    matching.truncate(limit);
    (total, matching)
}

pub fn filter_options(orders: &[Order]) -> FilterOptions {
    let distinct = |pick: fn(&Order) -> &str| -> Vec<String> {
        orders
            .iter()
            .map(pick)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    };

    FilterOptions {
        sellers: distinct(|order| order.seller.as_str()),
        suppliers: distinct(|order| order.supplier.as_str()),
    }
}
