// src/models/payables.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

use crate::common::lenient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayableStatus {
    Pending, // Pendente
    Paid,    // Pago
    Unrecognized(String),
}

impl PayableStatus {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Pendente" => PayableStatus::Pending,
            "Pago" => PayableStatus::Paid,
            other => PayableStatus::Unrecognized(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PayableStatus::Pending => "Pendente",
            PayableStatus::Paid => "Pago",
            PayableStatus::Unrecognized(label) => label,
        }
    }
}

impl Default for PayableStatus {
    fn default() -> Self {
        PayableStatus::Unrecognized(String::new())
    }
}

impl Serialize for PayableStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for PayableStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = lenient::text(deserializer)?;
        Ok(PayableStatus::from_label(&label))
    }
}

/// Conta a pagar (`/api/contas_pagar`). Só vira saída depois de paga,
/// no mês do vencimento.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PayableAccount {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,

    #[serde(rename = "descricao", default, deserialize_with = "lenient::text")]
    #[schema(example = "Aluguel do galpão")]
    pub description: String,

    #[serde(rename = "fornecedor", default, deserialize_with = "lenient::text")]
    pub supplier: String,

    #[serde(rename = "valor", default, deserialize_with = "lenient::money")]
    pub value: Decimal,

    // Algumas rotas antigas mandam "data_vencimento"
    #[serde(
        rename = "vencimento",
        alias = "data_vencimento",
        default,
        deserialize_with = "lenient::date"
    )]
    pub due_date: Option<NaiveDate>,

    #[serde(rename = "categoria", default, deserialize_with = "lenient::text")]
    pub category: String,

    #[serde(rename = "forma_pagamento", default, deserialize_with = "lenient::text")]
    pub payment_method: String,

    #[serde(default)]
    #[schema(value_type = String, example = "Pendente")]
    pub status: PayableStatus,

    #[serde(rename = "observacao", default, deserialize_with = "lenient::text")]
    pub note: String,
}
