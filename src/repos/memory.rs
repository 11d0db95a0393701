// src/repos/memory.rs
//
// API CRUD em memória para os testes dos serviços e handlers.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    common::{error::AppError, lenient},
    models::{orders::Order, payables::PayableAccount, purchases::Purchase},
    repos::CrudApi,
};

#[derive(Default)]
pub struct InMemoryCrudApi {
    pub orders: Mutex<Vec<Order>>,
    pub purchases: Mutex<Vec<Purchase>>,
    pub payables: Mutex<Vec<PayableAccount>>,
    pub updated: Mutex<Vec<Order>>,
    // Pedidos cujo PUT deve falhar
    pub reject_updates: Vec<String>,
    pub unavailable: bool,
    pub fetches: AtomicUsize,
}

impl InMemoryCrudApi {
    /// Monta a partir de JSON no formato da API, passando pela mesma decodificação.
    pub fn from_json(orders: Value, purchases: Value, payables: Value) -> Self {
        let list = |value: Value| match value {
            Value::Array(items) => items,
            _ => Vec::new(),
        };
        Self {
            orders: Mutex::new(lenient::decode_list(list(orders), "pedido")),
            purchases: Mutex::new(lenient::decode_list(list(purchases), "compra")),
            payables: Mutex::new(lenient::decode_list(list(payables), "conta a pagar")),
            ..Default::default()
        }
    }

    fn check(&self, path: &str) -> Result<(), AppError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(AppError::Upstream { status: 503, path: path.to_string() });
        }
        Ok(())
    }
}

#[async_trait]
impl CrudApi for InMemoryCrudApi {
    async fn fetch_orders(&self) -> Result<Vec<Order>, AppError> {
        self.check("/api/orders")?;
        Ok(self.orders.lock().unwrap().clone())
    }

    async fn fetch_purchases(&self) -> Result<Vec<Purchase>, AppError> {
        self.check("/api/compras")?;
        Ok(self.purchases.lock().unwrap().clone())
    }

    async fn fetch_payables(&self) -> Result<Vec<PayableAccount>, AppError> {
        self.check("/api/contas_pagar")?;
        Ok(self.payables.lock().unwrap().clone())
    }

    async fn update_order(&self, order: &Order) -> Result<(), AppError> {
        if self.reject_updates.contains(&order.number) {
            return Err(AppError::Upstream { status: 500, path: format!("/api/orders/{}", order.number) });
        }
        let mut orders = self.orders.lock().unwrap();
        if let Some(stored) = orders.iter_mut().find(|stored| stored.number == order.number) {
            *stored = order.clone();
        }
        self.updated.lock().unwrap().push(order.clone());
        Ok(())
    }
}
