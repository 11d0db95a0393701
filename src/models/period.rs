// src/models/period.rs

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use crate::common::error::AppError;

/// Janela (mês, ano) usada em todos os filtros de período.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, ToSchema)]
pub struct Period {
    // Ordem dos campos importa para o Ord: ano primeiro
    #[schema(example = 2024)]
    year: i32,
    #[schema(example = 3)]
    month: u32,
}

impl Period {
    pub fn new(month: u32, year: i32) -> Result<Self, AppError> {
        if !(1..=12).contains(&month) || !(1000..=9999).contains(&year) {
            return Err(AppError::InvalidPeriod { month, year });
        }
        Ok(Self { year, month })
    }

    /// Mês corrente no fuso local.
    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month() }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn next(&self) -> Option<Self> {
        match self.month {
            12 => Self::new(1, self.year + 1).ok(),
            month => Self::new(month + 1, self.year).ok(),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
