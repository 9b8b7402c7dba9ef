//! Starter pricing matrix used before anything has been saved.

use crate::config::DEFAULT_BASE_RATE_MULTIPLIER;
use crate::model::{FoldRates, MaterialPricing, PricingMatrix, RateTable};

/// Folds of every seed material.
const SEED_FOLDS: [u32; 3] = [1, 2, 3];

/// Seed girths with the fold 1 price; each further fold adds 1.
const SEED_MATERIALS: [(&str, [(u32, f64); 3]); 2] = [
    ("Euramax", [(100, 10.0), (200, 11.0), (300, 12.0)]),
    ("Colorsteel", [(100, 9.0), (200, 10.0), (300, 11.0)]),
];

impl PricingMatrix {
    /// The starter matrix: Euramax and Colorsteel, folds 1 to 3, girths 100, 200 and 300.
    pub fn seed() -> Self {
        let mut matrix = Self::new();
        for (name, rows) in SEED_MATERIALS {
            let rates: RateTable = rows
                .iter()
                .map(|&(girth, first_fold_price)| {
                    let row: FoldRates = SEED_FOLDS
                        .iter()
                        .map(|&fold| (fold, first_fold_price + f64::from(fold - 1)))
                        .collect();
                    (girth, row)
                })
                .collect();

            matrix.materials_mut().insert(
                name.to_string(),
                MaterialPricing {
                    base_rate_multiplier: DEFAULT_BASE_RATE_MULTIPLIER,
                    folds: SEED_FOLDS.to_vec(),
                    rates,
                },
            );
        }
        matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_matrix;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_seed_materials() {
        let matrix = PricingMatrix::seed();
        assert_eq!(matrix.names().collect::<Vec<_>>(), vec!["Colorsteel", "Euramax"]);

        let euramax = matrix.material("Euramax").unwrap();
        assert_eq!(euramax.folds, vec![1, 2, 3]);
        assert_eq!(euramax.rates.girths().collect::<Vec<_>>(), vec![100, 200, 300]);
        assert_eq!(euramax.rates.get(100, 1), Some(10.0));
        assert_eq!(euramax.rates.get(300, 3), Some(14.0));

        let colorsteel = matrix.material("Colorsteel").unwrap();
        assert_eq!(colorsteel.rates.get(200, 2), Some(11.0));
        assert_eq!(colorsteel.rates.get(300, 3), Some(13.0));
    }

    #[test]
    fn test_seed_validates_with_sparse_girth_warning() {
        let result = validate_matrix(&PricingMatrix::seed());
        assert!(result.passed, "{:?}", result.errors);
        assert!(result.warnings.iter().any(|w| w.contains("not contiguous")));
    }

    #[test]
    fn test_seed_round_trips_through_json() {
        let seed = PricingMatrix::seed();
        let json = seed.to_json_pretty().unwrap();
        assert_eq!(PricingMatrix::from_json(&json).unwrap(), seed);
    }
}
