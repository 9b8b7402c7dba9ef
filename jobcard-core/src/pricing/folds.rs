//! Per-fold price increments on top of the flat base.

use tracing::debug;

use crate::config::{money::round2, FLAT_FOLD};
use crate::error::{JobCardError, Result};
use crate::model::{FoldRates, RateTable};

/// Rewrite fold columns as `base + fold × increment`.
///
/// The base of each girth is its fold-0 price (0 when absent) and is copied
/// through unchanged. The result holds exactly the folds in `folds`, which
/// must include 0, for every girth of `existing`.
pub fn apply_fold_multipliers(existing: &RateTable, increment: f64, folds: &[u32]) -> Result<RateTable> {
    if !increment.is_finite() {
        return Err(JobCardError::InvalidFoldIncrement { value: increment });
    }
    if !folds.contains(&FLAT_FOLD) {
        return Err(JobCardError::MissingFlatFold);
    }

    debug!(
        "Applying fold increment {} to {} girth(s) over {} fold(s)",
        increment,
        existing.len(),
        folds.len()
    );

    let table = existing
        .iter()
        .map(|(girth, row)| {
            let base = row.get(&FLAT_FOLD).copied().unwrap_or(0.0);
            let new_row: FoldRates = folds
                .iter()
                .map(|&fold| {
                    let price = if fold == FLAT_FOLD {
                        base
                    } else {
                        round2(base + f64::from(fold) * increment)
                    };
                    (fold, price)
                })
                .collect();
            (girth, new_row)
        })
        .collect();

    Ok(table)
}
