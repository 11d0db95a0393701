// src/services/refresh.rs
//
// Atualização periódica dos indicadores do mês corrente.
// Cada ciclo pega um número de sequência antes de buscar os dados; só publica
// se for mais novo que o último publicado. Assim uma resposta atrasada nunca
// sobrescreve uma mais recente.

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::{
    common::error::AppError,
    models::{dashboard::PeriodReport, period::Period},
    services::dashboard_service::DashboardService,
};

#[derive(Debug, Clone)]
pub struct PublishedReport {
    pub sequence: u64,
    pub refreshed_at: DateTime<Utc>,
    pub report: PeriodReport,
}

pub type LatestReport = Option<Arc<PublishedReport>>;

pub struct SnapshotRefresher {
    service: DashboardService,
    interval: Duration,
    // None = sempre o mês corrente (acompanha a virada do mês)
    fixed_period: Option<Period>,
    next_sequence: AtomicU64,
    latest: watch::Sender<LatestReport>,
}

impl SnapshotRefresher {
    pub fn new(service: DashboardService, interval: Duration) -> Self {
        let (latest, _) = watch::channel(None);
        Self {
            service,
            interval,
            fixed_period: None,
            next_sequence: AtomicU64::new(0),
            latest,
        }
    }

    #[cfg(test)]
    pub fn with_period(mut self, period: Period) -> Self {
        self.fixed_period = Some(period);
        self
    }

    #[cfg(test)]
    pub fn subscribe(&self) -> watch::Receiver<LatestReport> {
        self.latest.subscribe()
    }

    pub fn latest(&self) -> LatestReport {
        self.latest.borrow().clone()
    }

    /// Roda um ciclo agora (também usado pelo endpoint de refresh manual).
    pub async fn refresh_now(&self) -> Result<Arc<PublishedReport>, AppError> {
        let sequence = self.next_sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let period = self.fixed_period.unwrap_or_else(Period::current);

        // Painel mostra os lançamentos mais recentes primeiro
        let report = self
            .service
            .period_report(period, Decimal::ZERO)
            .await?
            .sorted_most_recent_first();
        let candidate = Arc::new(PublishedReport {
            sequence,
            refreshed_at: Utc::now(),
            report,
        });

        if !self.publish(candidate.clone()) {
            debug!(sequence, "resultado fora de ordem descartado");
        }
        Ok(candidate)
    }

    fn publish(&self, candidate: Arc<PublishedReport>) -> bool {
        self.latest.send_if_modified(|current| {
            let newer = current
                .as_ref()
                .is_none_or(|published| candidate.sequence > published.sequence);
            if newer {
                *current = Some(candidate.clone());
            }
            newer
        })
    }

    pub fn start(self: Arc<Self>, shutdown: CancellationToken) -> RefreshHandle {
        let token = shutdown.clone();
        let task = tokio::spawn(async move {
            info!(intervalo = ?self.interval, "🔄 atualização periódica iniciada");
            let mut ticker = interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = self.refresh_now().await {
                            error!(error = %e, "falha ao atualizar indicadores");
                        }
                    }
                    _ = shutdown.cancelled() => {
                        info!("atualização periódica recebeu sinal de parada");
                        break;
                    }
                }
            }
            info!("atualização periódica encerrada");
        });

        RefreshHandle { token, task }
    }
}

/// Para a tarefa ao sair da tela / desligar o servidor.
pub struct RefreshHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    pub async fn stop(self) {
        self.token.cancel();
        if let Err(e) = self.task.await {
            error!(error = %e, "tarefa de atualização terminou com erro");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::InMemoryCrudApi;
    use serde_json::json;

    fn refresher(api: InMemoryCrudApi) -> SnapshotRefresher {
        let service = DashboardService::new(Arc::new(api));
        SnapshotRefresher::new(service, Duration::from_secs(30)).with_period(Period::new(3, 2024).unwrap())
    }

    fn one_order() -> InMemoryCrudApi {
        InMemoryCrudApi::from_json(
            json!([{ "numero": "1", "data": "2024-03-10", "status": "Finalizada", "valor_total": 1000, "custo": 400 }]),
            json!([]),
            json!([]),
        )
    }

    fn published(sequence: u64, refresher: &SnapshotRefresher) -> Arc<PublishedReport> {
        let report = refresher.latest().map(|p| p.report.clone()).unwrap_or_else(|| PeriodReport {
            kpis: crate::models::dashboard::KpiSnapshot::empty(Period::new(3, 2024).unwrap()),
            inflows: vec![],
            outflows: vec![],
        });
        Arc::new(PublishedReport { sequence, refreshed_at: Utc::now(), report })
    }

    #[tokio::test]
    async fn refresh_now_publishes_latest() {
        let refresher = refresher(one_order());
        assert!(refresher.latest().is_none());

        let first = refresher.refresh_now().await.unwrap();
        let second = refresher.refresh_now().await.unwrap();

        assert_eq!(first.sequence, 1);
        assert_eq!(second.sequence, 2);
        let latest = refresher.latest().unwrap();
        assert_eq!(latest.sequence, 2);
        assert_eq!(latest.report.kpis.revenue, Decimal::from(1000));
    }

    #[tokio::test]
    async fn stale_results_are_discarded() {
        let refresher = refresher(one_order());

        assert!(refresher.publish(published(5, &refresher)));
        assert!(!refresher.publish(published(3, &refresher)));
        assert!(!refresher.publish(published(5, &refresher)));
        assert_eq!(refresher.latest().unwrap().sequence, 5);
        assert!(refresher.publish(published(6, &refresher)));
    }

    #[tokio::test]
    async fn failed_cycle_keeps_previous_snapshot() {
        let refresher = refresher(InMemoryCrudApi { unavailable: true, ..Default::default() });

        assert!(refresher.refresh_now().await.is_err());
        assert!(refresher.latest().is_none());
    }

    #[tokio::test]
    async fn periodic_task_publishes_and_stops_on_cancel() {
        let refresher = Arc::new(refresher(one_order()));
        let mut updates = refresher.subscribe();

        let handle = refresher.clone().start(CancellationToken::new());

        // O primeiro tick do interval é imediato
        tokio::time::timeout(Duration::from_secs(5), updates.changed())
            .await
            .expect("nenhuma publicação recebida")
            .unwrap();
        assert_eq!(updates.borrow().as_ref().unwrap().sequence, 1);

        tokio::time::timeout(Duration::from_secs(5), handle.stop())
            .await
            .expect("tarefa não parou após o cancelamento");
    }
}
