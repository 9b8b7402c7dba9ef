//! Snapshot edits of material pricing.
//!
//! Every operation borrows the current value and returns a new, complete
//! one; callers replace their stored snapshot wholesale.

use tracing::debug;

use super::{apply_fold_multipliers, span_girth_prices_to_max};
use crate::config::{money, PricingConfig, CHUNK_STEP, FLAT_FOLD};
use crate::error::{JobCardError, Result};
use crate::model::{MaterialPricing, PricingMatrix, RateTable};

impl MaterialPricing {
    /// A new material: default folds, every girth priced 0.
    pub fn new_default(config: &PricingConfig) -> Self {
        let folds = config.default_folds();
        let rates = RateTable::filled(config.max_girth, &folds, 0.0);
        Self {
            base_rate_multiplier: config.base_rate_multiplier,
            folds,
            rates,
        }
    }

    /// The flat fold followed by the material's folds.
    pub fn folds_with_flat(&self) -> Vec<u32> {
        std::iter::once(FLAT_FOLD)
            .chain(self.folds.iter().copied().filter(|&f| f != FLAT_FOLD))
            .collect()
    }

    /// Set the price of one cell.
    pub fn with_price(&self, girth: u32, fold: u32, price: f64) -> Result<Self> {
        if !money::is_valid_price(price) {
            return Err(JobCardError::InvalidPrice { value: price });
        }
        if fold != FLAT_FOLD && !self.folds.contains(&fold) {
            return Err(JobCardError::UnknownFold { fold });
        }

        let mut next = self.clone();
        let row = next
            .rates
            .row_mut(girth)
            .ok_or(JobCardError::UnknownGirth { girth })?;
        row.insert(fold, price);
        Ok(next)
    }

    /// Raise every price by `percent`, rounded to 2 decimals.
    ///
    /// A negative percent lowers prices; below -100 would make them negative
    /// and is rejected.
    pub fn with_bulk_increase(&self, percent: f64) -> Result<Self> {
        if !percent.is_finite() || percent < -100.0 {
            return Err(JobCardError::InvalidPercent { value: percent });
        }

        let factor = 1.0 + percent / 100.0;
        let mut next = self.clone();
        for (_, row) in next.rates.iter_mut() {
            for price in row.values_mut() {
                *price = money::round2(*price * factor);
            }
        }
        debug!("Applied {}% increase to {} girth(s)", percent, next.rates.len());
        Ok(next)
    }

    /// Add the next fold (one past the highest), priced 0 at every girth.
    pub fn with_added_fold(&self) -> Self {
        let next_fold = self.folds.iter().max().map_or(1, |&max| max + 1);
        let mut next = self.clone();
        next.folds.push(next_fold);
        for (_, row) in next.rates.iter_mut() {
            row.insert(next_fold, 0.0);
        }
        debug!("Added fold {}", next_fold);
        next
    }

    /// Remove the last fold and its prices. The only remaining fold cannot be removed.
    pub fn with_last_fold_removed(&self) -> Result<Self> {
        if self.folds.len() <= 1 {
            return Err(JobCardError::LastFold);
        }

        let mut next = self.clone();
        if let Some(last) = next.folds.pop() {
            for (_, row) in next.rates.iter_mut() {
                row.remove(&last);
            }
            debug!("Removed fold {}", last);
        }
        Ok(next)
    }

    /// Replace the rate table with a linear gradient up to `end_price` at `max_girth`.
    ///
    /// The flat fold is included so the gradient becomes the base for
    /// [`MaterialPricing::with_fold_increment`].
    pub fn with_span(&self, end_price: f64, max_girth: u32) -> Result<Self> {
        let rates = span_girth_prices_to_max(end_price, max_girth, &self.folds_with_flat())?;
        Ok(Self {
            rates,
            ..self.clone()
        })
    }

    /// Reprice every fold as `flat + fold × increment`.
    pub fn with_fold_increment(&self, increment: f64) -> Result<Self> {
        let rates = apply_fold_multipliers(&self.rates, increment, &self.folds_with_flat())?;
        Ok(Self {
            rates,
            ..self.clone()
        })
    }

    /// Girths shown in the chunked view: every multiple of `step`.
    pub fn chunked_girths(&self, step: u32) -> Vec<u32> {
        let step = step.max(1);
        self.rates.girths().filter(|g| g % step == 0).collect()
    }

    /// [`MaterialPricing::chunked_girths`] with the default step.
    pub fn default_chunked_girths(&self) -> Vec<u32> {
        self.chunked_girths(CHUNK_STEP)
    }
}

impl PricingMatrix {
    /// Add a material with a default zero-priced table.
    pub fn with_material(&self, name: &str, config: &PricingConfig) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(JobCardError::EmptyMaterialName);
        }
        if self.material(name).is_some() {
            return Err(JobCardError::DuplicateMaterial {
                name: name.to_string(),
            });
        }

        let mut next = self.clone();
        next.materials_mut()
            .insert(name.to_string(), MaterialPricing::new_default(config));
        debug!("Added material '{}'", name);
        Ok(next)
    }

    /// Delete a material by name.
    pub fn without_material(&self, name: &str) -> Result<Self> {
        let mut next = self.clone();
        next.materials_mut()
            .remove(name)
            .ok_or_else(|| JobCardError::UnknownMaterial {
                name: name.to_string(),
            })?;
        debug!("Deleted material '{}'", name);
        Ok(next)
    }

    /// Replace one material with the result of an edit.
    pub fn update_material<F>(&self, name: &str, edit: F) -> Result<Self>
    where
        F: FnOnce(&MaterialPricing) -> Result<MaterialPricing>,
    {
        let current = self
            .material(name)
            .ok_or_else(|| JobCardError::UnknownMaterial {
                name: name.to_string(),
            })?;
        let updated = edit(current)?;

        let mut next = self.clone();
        next.materials_mut().insert(name.to_string(), updated);
        Ok(next)
    }
}
