// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

// Erros do domínio/serviço. Os handlers convertem para ApiError (com idioma).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Período inválido: mês {month}, ano {year}")]
    InvalidPeriod { month: u32, year: i32 },

    #[error("Acesso restrito a administradores")]
    Forbidden,

    #[error("Nenhum resumo publicado ainda")]
    SnapshotUnavailable,

    // A API CRUD respondeu, mas com status de erro
    #[error("API CRUD respondeu {status} em {path}")]
    Upstream { status: u16, path: String },

    // Falha de rede, timeout ou corpo que não é uma lista JSON
    #[error("Falha na requisição à API CRUD: {0}")]
    UpstreamRequest(#[from] reqwest::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

// O erro que de fato vai para o cliente HTTP.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<serde_json::Value>,
}

impl AppError {
    fn message_key(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation",
            AppError::InvalidPeriod { .. } => "invalid_period",
            AppError::Forbidden => "forbidden",
            AppError::SnapshotUnavailable => "snapshot_unavailable",
            AppError::Upstream { .. } | AppError::UpstreamRequest(_) => "upstream",
            AppError::InternalServerError(_) => "internal",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidPeriod { .. } => StatusCode::BAD_REQUEST,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::SnapshotUnavailable => StatusCode::NOT_FOUND,
            AppError::Upstream { .. } | AppError::UpstreamRequest(_) => StatusCode::BAD_GATEWAY,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Traduz o erro para a resposta HTTP no idioma pedido pelo cliente.
    pub fn to_api_error(&self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let status = self.status();

        if status.is_server_error() {
            // O `tracing` loga a mensagem detalhada que o `thiserror` montou.
            tracing::error!("Erro ao atender requisição: {}", self);
        }

        let details = match self {
            // Devolve todos os detalhes da validação, campo a campo
            AppError::ValidationError(errors) => {
                let mut fields = serde_json::Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    fields.insert(field.to_string(), json!(messages));
                }
                Some(serde_json::Value::Object(fields))
            }
            AppError::InvalidPeriod { month, year } => Some(json!({ "mes": month, "ano": year })),
            _ => None,
        };

        ApiError {
            status,
            error: i18n.translate(&locale.0, self.message_key()),
            details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}
