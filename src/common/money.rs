// src/common/money.rs
//
// Somas de dinheiro que nunca estouram. Dois valores válidos da API podem
// somar além de Decimal::MAX; nesse caso o total satura e fica um aviso no log.

use rust_decimal::Decimal;

pub fn add(total: Decimal, value: Decimal, what: &str) -> Decimal {
    total.checked_add(value).unwrap_or_else(|| {
        tracing::warn!(campo = what, total = %total, valor = %value, "soma estourou o limite decimal, total saturado");
        total.saturating_add(value)
    })
}

pub fn sub(total: Decimal, value: Decimal, what: &str) -> Decimal {
    total.checked_sub(value).unwrap_or_else(|| {
        tracing::warn!(campo = what, total = %total, valor = %value, "subtração estourou o limite decimal, resultado saturado");
        total.saturating_sub(value)
    })
}

/// Soma de uma lista inteira (ex: totais do balancete).
pub fn sum<I>(values: I, what: &str) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().fold(Decimal::ZERO, |total, value| add(total, value, what))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_sums_are_exact() {
        assert_eq!(add(Decimal::new(1050, 2), Decimal::new(25, 1), "x"), Decimal::from(13));
        assert_eq!(sub(Decimal::from(10), Decimal::from(25), "x"), Decimal::from(-15));
        assert_eq!(sum([Decimal::ONE, Decimal::TWO, Decimal::TEN], "x"), Decimal::from(13));
        assert_eq!(sum(Vec::new(), "x"), Decimal::ZERO);
    }

    #[test]
    fn overflow_saturates_instead_of_panicking() {
        let huge = Decimal::from_scientific("7e28").unwrap();

        assert_eq!(add(huge, huge, "receita"), Decimal::MAX);
        assert_eq!(add(-huge, -huge, "receita"), Decimal::MIN);
        assert_eq!(sub(-huge, huge, "lucro"), Decimal::MIN);
        assert_eq!(sum([huge, huge, Decimal::ONE], "entradas"), Decimal::MAX);
    }
}
