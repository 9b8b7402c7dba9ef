//! Advisory validation of parsed job items and pricing matrices.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::config::{money, FLAT_FOLD};
use crate::model::{JobItemRecord, MaterialPricing, PricingMatrix};

static ORDER_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^SO\d+$").unwrap());

/// Validation result with warnings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        if !other.passed {
            self.passed = false;
        }
    }
}

/// Check parsed job items. Only produces warnings; parsing is lenient by
/// design of the format, so nothing here fails a document.
pub fn validate_jobs(records: &[JobItemRecord]) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if records.is_empty() {
        result.add_warning("No order items found");
        return result;
    }

    let orders: BTreeSet<&str> = records
        .iter()
        .map(|r| r.order.as_str())
        .filter(|o| !o.is_empty())
        .collect();
    if orders.len() > 1 {
        result.add_warning(format!(
            "Items reference {} different orders: {}",
            orders.len(),
            orders.iter().copied().collect::<Vec<_>>().join(", ")
        ));
    }

    for (idx, record) in records.iter().enumerate() {
        let item_num = idx + 1;

        if record.order.is_empty() {
            result.add_warning(format!("Item {}: Missing order number", item_num));
        } else if !ORDER_ID_RE.is_match(&record.order) {
            result.add_warning(format!(
                "Item {}: Order number '{}' is not of the form SO<digits>",
                item_num, record.order
            ));
        }

        if record.item.is_empty() {
            result.add_warning(format!("Item {}: Missing item name", item_num));
        }

        if record.total_pieces.is_none() {
            result.add_warning(format!("Item {}: Total pieces unknown", item_num));
        }

        if record.material.is_empty() {
            result.add_warning(format!("Item {}: Missing material", item_num));
        }

        if record.quantities.is_empty() {
            result.add_warning(format!("Item {}: No quantity lines", item_num));
        }
    }

    result
}

/// Check one material's rate table for completeness and sane prices.
pub fn validate_material(name: &str, material: &MaterialPricing) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if material.folds.contains(&FLAT_FOLD) {
        result.add_error(format!(
            "Material '{}': Fold list must not contain the flat fold 0",
            name
        ));
    }
    if !material.folds.windows(2).all(|w| w[0] < w[1]) {
        result.add_error(format!(
            "Material '{}': Folds are not strictly increasing ({:?})",
            name, material.folds
        ));
    }

    let mut expected_girth = 1;
    let mut gap_reported = false;
    let mut extra_folds = BTreeSet::new();

    for (girth, row) in material.rates.iter() {
        if girth == 0 {
            result.add_error(format!("Material '{}': Girth 0 is not a valid girth", name));
        } else if girth != expected_girth && !gap_reported {
            result.add_warning(format!(
                "Material '{}': Girths are not contiguous from 1 (expected {}, found {})",
                name, expected_girth, girth
            ));
            gap_reported = true;
        }
        expected_girth = girth + 1;

        for fold in &material.folds {
            if !row.contains_key(fold) {
                result.add_error(format!(
                    "Material '{}', Girth {}: Missing price for fold {}",
                    name, girth, fold
                ));
            }
        }

        for (&fold, &price) in row {
            if !money::is_valid_price(price) {
                result.add_error(format!(
                    "Material '{}', Girth {}, Fold {}: Invalid price {}",
                    name, girth, fold, price
                ));
            }
            if fold != FLAT_FOLD && !material.folds.contains(&fold) {
                extra_folds.insert(fold);
            }
        }
    }

    if !extra_folds.is_empty() {
        result.add_warning(format!(
            "Material '{}': Rate table has prices for undefined folds {:?}",
            name, extra_folds
        ));
    }

    result
}

/// Check every material of a matrix.
pub fn validate_matrix(matrix: &PricingMatrix) -> ValidationResult {
    let mut result = ValidationResult::ok();

    for (name, material) in matrix.iter() {
        result.merge(validate_material(name, material));
    }

    result
}

/// Quick check that returns only pass/fail.
pub fn quick_validate(matrix: &PricingMatrix) -> bool {
    validate_matrix(matrix).passed
}
