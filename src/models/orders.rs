// src/models/orders.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

use crate::common::lenient;

// --- Enums ---

/// Ciclo de vida de uma ordem de serviço. O rótulo em português é o que
/// trafega na API; rótulos desconhecidos são preservados.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    AwaitingApproval,
    AwaitingPayment,
    InProduction,
    ReadyForPickup,
    Finalized,
    Cancelled,
    Unrecognized(String),
}

impl OrderStatus {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Aguardando Aprovação" => OrderStatus::AwaitingApproval,
            "Aguardando Pagamento" => OrderStatus::AwaitingPayment,
            "Em Produção" => OrderStatus::InProduction,
            "Disponível para Retirada" => OrderStatus::ReadyForPickup,
            "Finalizada" => OrderStatus::Finalized,
            "Cancelada" => OrderStatus::Cancelled,
            other => OrderStatus::Unrecognized(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            OrderStatus::AwaitingApproval => "Aguardando Aprovação",
            OrderStatus::AwaitingPayment => "Aguardando Pagamento",
            OrderStatus::InProduction => "Em Produção",
            OrderStatus::ReadyForPickup => "Disponível para Retirada",
            OrderStatus::Finalized => "Finalizada",
            OrderStatus::Cancelled => "Cancelada",
            OrderStatus::Unrecognized(label) => label,
        }
    }

    /// Ainda vai gerar dinheiro: nem finalizada nem cancelada.
    pub fn is_open(&self) -> bool {
        !matches!(self, OrderStatus::Finalized | OrderStatus::Cancelled)
    }

    /// Entra no balancete como entrada (o sinal já foi recebido).
    pub fn counts_as_inflow(&self) -> bool {
        matches!(self, OrderStatus::Finalized | OrderStatus::ReadyForPickup)
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Unrecognized(String::new())
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = lenient::text(deserializer)?;
        Ok(OrderStatus::from_label(&label))
    }
}

// --- Structs ---

/// Ordem de serviço, no formato da API CRUD (`/api/orders`).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    // A API Flask manda a chave primária como "id"
    #[serde(rename = "numero", alias = "id", default, deserialize_with = "lenient::id")]
    #[schema(example = "1024")]
    pub number: String,

    #[serde(rename = "cliente", default, deserialize_with = "lenient::text")]
    #[schema(example = "Padaria Central")]
    pub client: String,

    #[serde(rename = "vendedor", default, deserialize_with = "lenient::text")]
    pub seller: String,

    #[serde(rename = "data", default, deserialize_with = "lenient::date")]
    #[schema(example = "2024-03-10")]
    pub date: Option<NaiveDate>,

    #[serde(default)]
    #[schema(value_type = String, example = "Em Produção")]
    pub status: OrderStatus,

    #[serde(default, deserialize_with = "lenient::tags")]
    pub material: Vec<String>,

    #[serde(rename = "fornecedor", default, deserialize_with = "lenient::text")]
    pub supplier: String,

    #[serde(rename = "custo", default, deserialize_with = "lenient::money")]
    #[schema(example = "400.00")]
    pub cost: Decimal,

    #[serde(rename = "valor_total", default, deserialize_with = "lenient::money")]
    #[schema(example = "1000.00")]
    pub total_value: Decimal,

    // Sinal pago na aprovação; não é necessariamente 50% do total
    #[serde(rename = "valor_entrada", default, deserialize_with = "lenient::money")]
    pub down_payment: Decimal,

    // total - entrada, calculado pela API
    #[serde(rename = "valor_restante", default, deserialize_with = "lenient::money")]
    pub remaining: Decimal,

    #[serde(rename = "forma_pagamento", default, deserialize_with = "lenient::text")]
    #[schema(example = "PIX")]
    pub payment_method: String,
}
