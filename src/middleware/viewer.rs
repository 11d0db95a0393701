// src/middleware/viewer.rs

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{common::error::AppError, models::dashboard::Role};

// A sessão é resolvida antes de chegar aqui; o proxy repassa papel e usuário.
const ROLE_HEADER: &str = "x-user-role";
const USER_HEADER: &str = "x-user-name";

/// Quem está olhando o painel. Sem cabeçalho = menor privilégio.
#[derive(Debug, Clone)]
pub struct Viewer {
    pub role: Role,
    pub username: Option<String>,
}

impl Viewer {
    pub fn require_admin(&self) -> Result<(), AppError> {
        match self.role {
            Role::Admin => Ok(()),
            Role::Staff => Err(AppError::Forbidden),
        }
    }
}

impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        let role = header(ROLE_HEADER)
            .map(|raw| Role::from_label(&raw))
            .unwrap_or(Role::Staff);

        Ok(Viewer {
            role,
            username: header(USER_HEADER),
        })
    }
}
