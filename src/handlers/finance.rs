// src/handlers/finance.rs
//
// Seção financeira: só administradores.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    handlers::query::resolve_period,
    middleware::{i18n::Locale, viewer::Viewer},
    models::{
        dashboard::{BalanceteExport, MonthClosing, PayablesSummary},
        period::Period,
    },
};

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PeriodQuery {
    #[validate(range(min = 1, max = 12, message = "mês deve estar entre 1 e 12"))]
    pub mes: Option<u32>,
    #[validate(range(min = 1000, max = 9999, message = "ano deve ter quatro dígitos"))]
    pub ano: Option<i32>,
}

impl PeriodQuery {
    fn period(&self) -> Result<Period, AppError> {
        self.validate()?;
        resolve_period(self.mes, self.ano)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CloseMonthPayload {
    #[validate(range(min = 1, max = 12, message = "mês deve estar entre 1 e 12"))]
    #[schema(example = 3)]
    pub mes: u32,

    #[validate(range(min = 1000, max = 9999, message = "ano deve ter quatro dígitos"))]
    #[schema(example = 2024)]
    pub ano: i32,
}

// GET /api/balancete
#[utoipa::path(
    get,
    path = "/api/balancete",
    tag = "Financeiro",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Entradas e saídas do período, em ordem de data, com totais", body = BalanceteExport),
        (status = 403, description = "Apenas administradores")
    )
)]
pub async fn get_balancete(
    State(app_state): State<AppState>,
    locale: Locale,
    viewer: Viewer,
    Query(query): Query<PeriodQuery>,
) -> Result<impl IntoResponse, ApiError> {
    viewer
        .require_admin()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let period = query
        .period()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let export = app_state
        .dashboard_service
        .balancete(period, viewer.username.clone())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(export)))
}

// GET /api/contas_pagar/resumo
#[utoipa::path(
    get,
    path = "/api/contas_pagar/resumo",
    tag = "Financeiro",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Totais pendente/pago das contas com vencimento no período", body = PayablesSummary),
        (status = 403, description = "Apenas administradores")
    )
)]
pub async fn get_payables_summary(
    State(app_state): State<AppState>,
    locale: Locale,
    viewer: Viewer,
    Query(query): Query<PeriodQuery>,
) -> Result<impl IntoResponse, ApiError> {
    viewer
        .require_admin()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let period = query
        .period()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let summary = app_state
        .dashboard_service
        .payables_summary(period)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(summary)))
}

// POST /api/financeiro/encerrar-mes
#[utoipa::path(
    post,
    path = "/api/financeiro/encerrar-mes",
    tag = "Financeiro",
    request_body = CloseMonthPayload,
    responses(
        (status = 200, description = "Mês encerrado; pedidos em aberto transferidos", body = MonthClosing),
        (status = 403, description = "Apenas administradores")
    )
)]
pub async fn close_month(
    State(app_state): State<AppState>,
    locale: Locale,
    viewer: Viewer,
    Json(payload): Json<CloseMonthPayload>,
) -> Result<impl IntoResponse, ApiError> {
    viewer
        .require_admin()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let period = Period::new(payload.mes, payload.ano)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let closing = app_state
        .dashboard_service
        .close_month(period)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(closing)))
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::{build_router, config::AppState, repos::InMemoryCrudApi};

    fn sample_api() -> InMemoryCrudApi {
        InMemoryCrudApi::from_json(
            json!([
                { "numero": "1", "cliente": "Padaria Central", "data": "2024-03-10", "status": "Finalizada",
                  "valor_total": 1000, "custo": 400, "valor_entrada": 500, "valor_restante": 500 },
                { "numero": "2", "cliente": "Mercado Sol", "data": "2024-03-12", "status": "Disponível para Retirada",
                  "valor_total": 600, "custo": 200, "valor_entrada": 300, "valor_restante": 300 },
                { "numero": "3", "cliente": "Loja Z", "data": "2024-03-14", "status": "Cancelada", "valor_total": 90 }
            ]),
            json!([{ "id": 10, "data": "2024-03-03", "item": "Lona", "valor": 120 }]),
            json!([
                { "id": 20, "descricao": "Aluguel", "valor": 300, "vencimento": "2024-03-05", "status": "Pago" },
                { "id": 21, "descricao": "Luz", "valor": 80, "vencimento": "2024-03-20", "status": "Pendente" }
            ]),
        )
    }

    async fn call(api: Arc<InMemoryCrudApi>, request: Request<Body>) -> (StatusCode, Value) {
        let app: Router = build_router(AppState::with_api(api, Duration::from_secs(30)));
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, body)
    }

    fn as_admin(method: &str, uri: &str, body: Body) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("x-user-role", "admin")
            .header("x-user-name", "marina")
            .header("content-type", "application/json")
            .body(body)
            .unwrap()
    }

    #[tokio::test]
    async fn staff_cannot_open_the_finance_section() {
        let api = Arc::new(sample_api());
        for uri in ["/api/balancete?mes=3&ano=2024", "/api/contas_pagar/resumo?mes=3&ano=2024"] {
            let request = Request::builder()
                .uri(uri)
                .header("x-user-role", "staff")
                .body(Body::empty())
                .unwrap();
            let (status, body) = call(api.clone(), request).await;

            assert_eq!(status, StatusCode::FORBIDDEN);
            assert_eq!(body["error"], "Apenas administradores podem acessar esta informação.");
        }
        assert_eq!(api.fetches.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn balancete_lists_entries_oldest_first_with_totals() {
        let (status, body) = call(
            Arc::new(sample_api()),
            as_admin("GET", "/api/balancete?mes=3&ano=2024", Body::empty()),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["generatedBy"], "marina");

        let inflows = body["inflows"].as_array().unwrap();
        assert_eq!(inflows.len(), 2);
        assert_eq!(inflows[0]["label"], "Order #1 - Padaria Central");
        assert_eq!(inflows[1]["label"], "Order #2 - Mercado Sol");

        let outflows = body["outflows"].as_array().unwrap();
        assert_eq!(outflows[0]["date"], "2024-03-03");
        assert_eq!(outflows[1]["date"], "2024-03-05");

        assert_eq!(body["totals"]["inflows"].as_f64(), Some(800.0));
        assert_eq!(body["totals"]["outflows"].as_f64(), Some(420.0));
        assert_eq!(body["totals"]["balance"].as_f64(), Some(380.0));
    }

    #[tokio::test]
    async fn payables_summary_splits_pending_and_paid() {
        let (status, body) = call(
            Arc::new(sample_api()),
            as_admin("GET", "/api/contas_pagar/resumo?mes=3&ano=2024", Body::empty()),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalPending"].as_f64(), Some(80.0));
        assert_eq!(body["totalPaid"].as_f64(), Some(300.0));
        assert_eq!(body["pendingCount"], 1);
        assert_eq!(body["paidCount"], 1);
    }

    #[tokio::test]
    async fn closing_the_month_moves_open_orders() {
        let api = Arc::new(sample_api());
        let payload = json!({ "mes": 3, "ano": 2024 }).to_string();

        let (status, body) = call(api.clone(), as_admin("POST", "/api/financeiro/encerrar-mes", Body::from(payload))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["nextPeriod"], json!({ "year": 2024, "month": 4 }));
        assert_eq!(body["transferredOrders"], json!(["2"]));
        assert_eq!(body["totalRevenue"].as_f64(), Some(1000.0));

        let updated = api.updated.lock().unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].date.map(|d| d.to_string()), Some("2024-04-01".to_string()));
    }

    #[tokio::test]
    async fn closing_the_month_validates_the_payload() {
        let payload = json!({ "mes": 0, "ano": 2024 }).to_string();
        let (status, body) = call(
            Arc::new(sample_api()),
            as_admin("POST", "/api/financeiro/encerrar-mes", Body::from(payload)),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["details"]["mes"].is_array());
    }
}
