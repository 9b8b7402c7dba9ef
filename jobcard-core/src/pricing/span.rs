//! Linear girth gradient: zero at girth 1, the end price at the maximum girth.

use tracing::debug;

use crate::config::{money::round2, DEFAULT_MAX_GIRTH};
use crate::error::{JobCardError, Result};
use crate::model::{FoldRates, RateTable};

/// Build a rate table for girths `1..=max_girth`.
///
/// Girth `g` is priced `end_price × (g−1)/(max_girth−1)`, rounded to 2
/// decimals, and the same price is given to every fold in `folds`.
pub fn span_girth_prices_to_max(end_price: f64, max_girth: u32, folds: &[u32]) -> Result<RateTable> {
    if !end_price.is_finite() {
        return Err(JobCardError::InvalidEndPrice { value: end_price });
    }
    if max_girth < 2 {
        return Err(JobCardError::InvalidMaxGirth { max_girth });
    }

    debug!(
        "Spanning girths 1..={} to end price {} over {} fold(s)",
        max_girth,
        end_price,
        folds.len()
    );

    let span = f64::from(max_girth - 1);
    let table = (1..=max_girth)
        .map(|girth| {
            let ratio = f64::from(girth - 1) / span;
            let price = round2(end_price * ratio);
            let row: FoldRates = folds.iter().map(|&fold| (fold, price)).collect();
            (girth, row)
        })
        .collect();

    Ok(table)
}

/// [`span_girth_prices_to_max`] over the default girth range.
pub fn span_girth_prices_to_default_max(end_price: f64, folds: &[u32]) -> Result<RateTable> {
    span_girth_prices_to_max(end_price, DEFAULT_MAX_GIRTH, folds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::money::approx_eq;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_span_scenario_b() {
        let rates = span_girth_prices_to_max(120.0, 1200, &[1, 2]).unwrap();
        assert_eq!(rates.get(1, 1), Some(0.0));
        assert_eq!(rates.get(1, 2), Some(0.0));
        assert_eq!(rates.get(1200, 1), Some(120.0));
        assert_eq!(rates.get(1200, 2), Some(120.0));
        assert_eq!(rates.get(600, 1), Some(59.95));
    }

    #[test]
    fn test_span_covers_every_girth() {
        let rates = span_girth_prices_to_max(50.0, 300, &[0, 1, 2, 3]).unwrap();
        assert_eq!(rates.len(), 300);
        assert_eq!(rates.girths().collect::<Vec<_>>(), (1..=300).collect::<Vec<_>>());
        for (_, row) in rates.iter() {
            assert_eq!(row.keys().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        }
    }

    #[test]
    fn test_span_end_price_rounded() {
        let rates = span_girth_prices_to_max(10.456, 10, &[1]).unwrap();
        assert_eq!(rates.get(10, 1), Some(10.46));
        assert_eq!(rates.get(1, 1), Some(0.0));
    }

    #[test]
    fn test_span_monotonic_non_decreasing() {
        for end_price in [0.0, 0.01, 7.5, 120.0, 999.99] {
            for max_girth in [2, 3, 17, 1200] {
                let rates = span_girth_prices_to_max(end_price, max_girth, &[1]).unwrap();
                let prices: Vec<f64> = rates.iter().map(|(_, row)| row[&1]).collect();
                assert!(prices.windows(2).all(|w| w[0] <= w[1]));
                assert_eq!(prices[0], 0.0);
                assert!(approx_eq(*prices.last().unwrap(), round2(end_price)));
            }
        }
    }

    #[test]
    fn test_span_fold_independent() {
        let rates = span_girth_prices_to_max(80.0, 50, &[1, 5, 9]).unwrap();
        for (_, row) in rates.iter() {
            let first = row[&1];
            assert!(row.values().all(|&p| p == first));
        }
    }

    #[test]
    fn test_span_min_girth() {
        let rates = span_girth_prices_to_max(9.0, 2, &[1]).unwrap();
        assert_eq!(rates.get(1, 1), Some(0.0));
        assert_eq!(rates.get(2, 1), Some(9.0));
    }

    #[test]
    fn test_span_rejects_girth_one_and_zero() {
        for max_girth in [0, 1] {
            let err = span_girth_prices_to_max(10.0, max_girth, &[1]).unwrap_err();
            assert!(err.is_invalid_gradient());
            assert!(matches!(err, JobCardError::InvalidMaxGirth { .. }));
        }
    }

    #[test]
    fn test_span_rejects_non_finite_price() {
        for end_price in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = span_girth_prices_to_max(end_price, 1200, &[1]).unwrap_err();
            assert!(err.is_invalid_gradient());
        }
    }

    #[test]
    fn test_span_empty_folds_still_has_rows() {
        let rates = span_girth_prices_to_max(10.0, 5, &[]).unwrap();
        assert_eq!(rates.len(), 5);
        assert!(rates.row(3).unwrap().is_empty());
    }

    #[test]
    fn test_span_default_max() {
        let rates = span_girth_prices_to_default_max(120.0, &[1]).unwrap();
        assert_eq!(rates.max_girth(), Some(1200));
    }
}
