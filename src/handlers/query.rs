// src/handlers/query.rs

use crate::{common::error::AppError, models::period::Period};

/// `mes`/`ano` ausentes = mês corrente.
pub fn resolve_period(mes: Option<u32>, ano: Option<i32>) -> Result<Period, AppError> {
    let current = Period::current();
    Period::new(mes.unwrap_or(current.month()), ano.unwrap_or(current.year()))
}
