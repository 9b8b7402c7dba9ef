//! Validation module.

mod validate;

pub use validate::{quick_validate, validate_jobs, validate_material, validate_matrix, ValidationResult};
