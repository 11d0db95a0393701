// src/services/visibility.rs

use crate::models::dashboard::{KpiSnapshot, KpiView, Role};

/// Aplica o papel depois da agregação: o cálculo é o mesmo para todos,
/// só o que aparece muda. Quem não é admin vê contagens e o "para entrar".
pub fn mask_for_role(snapshot: &KpiSnapshot, role: Role) -> KpiView {
    let reveal = role == Role::Admin;
    let shown = |value| reveal.then_some(value);

    KpiView {
        period: snapshot.period,
        status_counts: snapshot.status_counts.clone(),
        status_breakdown: snapshot.status_breakdown.clone(),
        receivables: snapshot.receivables,
        revenue: shown(snapshot.revenue),
        cost: shown(snapshot.cost),
        gross_profit: shown(snapshot.gross_profit),
        total_outflows: shown(snapshot.total_outflows),
        net_result: shown(snapshot.net_result),
    }
}
