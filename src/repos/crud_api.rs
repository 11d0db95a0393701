// src/repos/crud_api.rs

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    common::{error::AppError, lenient},
    models::{orders::Order, payables::PayableAccount, purchases::Purchase},
};

/// O que o painel precisa da API CRUD. Ler as três coleções e,
/// no encerramento do mês, regravar a data de um pedido.
#[async_trait]
pub trait CrudApi: Send + Sync {
    async fn fetch_orders(&self) -> Result<Vec<Order>, AppError>;
    async fn fetch_purchases(&self) -> Result<Vec<Purchase>, AppError>;
    async fn fetch_payables(&self) -> Result<Vec<PayableAccount>, AppError>;
    async fn update_order(&self, order: &Order) -> Result<(), AppError>;
}

// Cliente HTTP. Sem retry: timeout e erro sobem para quem chamou.
#[derive(Clone)]
pub struct CrudApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl CrudApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str, kind: &str) -> Result<Vec<T>, AppError> {
        let response = self.http.get(self.url(path)).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(path, status = status.as_u16(), "API CRUD devolveu erro");
            return Err(AppError::Upstream { status: status.as_u16(), path: path.to_string() });
        }

        let items: Vec<Value> = response.json().await?;
        tracing::debug!(path, total = items.len(), "lista recebida da API CRUD");
        Ok(lenient::decode_list(items, kind))
    }
}

const MAX_LOGGED_BODY_CHARS: usize = 300;

fn excerpt(body: &str) -> &str {
    match body.char_indices().nth(MAX_LOGGED_BODY_CHARS) {
        Some((cut, _)) => &body[..cut],
        None => body,
    }
}

#[async_trait]
impl CrudApi for CrudApiClient {
    // =========================================================================
    //  PEDIDOS
    // =========================================================================

    async fn fetch_orders(&self) -> Result<Vec<Order>, AppError> {
        self.get_list("/api/orders", "pedido").await
    }

    async fn update_order(&self, order: &Order) -> Result<(), AppError> {
        let path = format!("/api/orders/{}", order.number);
        let response = self.http.put(self.url(&path)).json(order).send().await?;

        let status = response.status();
        if !status.is_success() {
            // A API explica a recusa no corpo (ex: "Campos obrigatórios faltando: vendedor")
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                path = %path,
                status = status.as_u16(),
                resposta = excerpt(&body),
                "API CRUD recusou a atualização do pedido"
            );
            return Err(AppError::Upstream { status: status.as_u16(), path });
        }
        Ok(())
    }

    // =========================================================================
    //  COMPRAS
    // =========================================================================

    async fn fetch_purchases(&self) -> Result<Vec<Purchase>, AppError> {
        self.get_list("/api/compras", "compra").await
    }

    // =========================================================================
    //  CONTAS A PAGAR
    // =========================================================================

    async fn fetch_payables(&self) -> Result<Vec<PayableAccount>, AppError> {
        self.get_list("/api/contas_pagar", "conta a pagar").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let client = CrudApiClient::new("http://localhost:5000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.url("/api/orders"), "http://localhost:5000/api/orders");
    }

    #[test]
    fn logged_error_bodies_are_cut_on_char_boundaries() {
        let short = r#"{"error": "Campos obrigatórios faltando: vendedor"}"#;
        assert_eq!(excerpt(short), short);

        let long = "ç".repeat(MAX_LOGGED_BODY_CHARS + 50);
        assert_eq!(excerpt(&long).chars().count(), MAX_LOGGED_BODY_CHARS);
    }
}
