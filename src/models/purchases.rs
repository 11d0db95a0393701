// src/models/purchases.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::common::lenient;

/// Compra de insumo (`/api/compras`). Não tem status: sempre é saída no mês.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Purchase {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,

    #[serde(rename = "data", default, deserialize_with = "lenient::date")]
    pub date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "lenient::text")]
    #[schema(example = "Lona 440g")]
    pub item: String,

    #[serde(rename = "fornecedor", default, deserialize_with = "lenient::text")]
    pub supplier: String,

    #[serde(rename = "valor", default, deserialize_with = "lenient::money")]
    pub value: Decimal,

    #[serde(rename = "observacao", default, deserialize_with = "lenient::text")]
    pub note: String,
}
