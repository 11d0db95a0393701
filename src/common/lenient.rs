// src/common/lenient.rs
//
// Decodificação tolerante dos JSONs da API CRUD.
// Data ruim vira "sem data", valor ruim vira zero, item ruim da lista é
// descartado. Nada aqui devolve erro por causa de um campo mal formatado.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

// =========================================================================
//  PARSERS
// =========================================================================

/// Aceita número puro ("1234.56") ou formato brasileiro ("R$ 1.234,56").
pub fn parse_money(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches("R$")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    // Com vírgula, o ponto é separador de milhar
    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else {
        cleaned
    };

    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .ok()
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(moment) = DateTime::parse_from_rfc3339(raw) {
        return Some(moment.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(moment) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(moment.date());
        }
    }
    // Flask serializa colunas DATE como "Sun, 10 Mar 2024 00:00:00 GMT"
    if let Ok(moment) = DateTime::parse_from_rfc2822(raw) {
        return Some(moment.date_naive());
    }
    NaiveDate::parse_from_str(raw, "%d/%m/%Y").ok()
}

fn money_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => {
            let text = number.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .ok()
        }
        Value::String(text) => parse_money(text),
        _ => None,
    }
}

// =========================================================================
//  DESERIALIZERS (usados com #[serde(deserialize_with = ...)])
// =========================================================================

pub fn money<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let parsed = value.as_ref().and_then(money_from_value);

    if parsed.is_none() {
        if let Some(raw) = value.as_ref().filter(|v| !v.is_null()) {
            tracing::debug!(valor = %raw, "valor monetário inválido, usando zero");
        }
    }

    Ok(parsed.unwrap_or(Decimal::ZERO))
}

pub fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let parsed = match &value {
        Some(Value::String(raw)) => parse_date(raw),
        _ => None,
    };

    if parsed.is_none() {
        match &value {
            None | Some(Value::Null) => {}
            Some(Value::String(raw)) if raw.trim().is_empty() => {}
            Some(raw) => tracing::warn!(data = %raw, "data inválida, registro fica fora dos filtros de período"),
        }
    }

    Ok(parsed)
}

/// Identificadores chegam como número ou texto; guardamos sempre texto.
pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => text,
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    })
}

pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => text,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    })
}

/// Material: um texto separado por vírgulas ou uma lista.
pub fn tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let split = |text: &str| -> Vec<String> {
        text.split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    };

    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => split(&text),
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(text) => Some(text.trim().to_string()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .filter(|tag| !tag.is_empty())
            .collect(),
        _ => Vec::new(),
    })
}

// =========================================================================
//  LISTAS
// =========================================================================

/// Decodifica item a item; o que não for objeto ou não decodificar é pulado.
pub fn decode_list<T: DeserializeOwned>(items: Vec<Value>, kind: &str) -> Vec<T> {
    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            if !item.is_object() {
                tracing::warn!(kind, index, "item da lista não é um objeto, ignorado");
                return None;
            }
            serde_json::from_value(item)
                .map_err(|e| tracing::warn!(kind, index, error = %e, "item da lista ignorado"))
                .ok()
        })
        .collect();

    if decoded.len() < total {
        tracing::info!(kind, total, aceitos = decoded.len(), "lista recebida com itens descartados");
    }
    decoded
}
