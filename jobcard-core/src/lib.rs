//! jobcard-core - Core library for job card parsing and material pricing.
//!
//! This library turns the text extracted from a job card into job item
//! records, and builds and edits girth × fold pricing matrices.
//!
//! # Example
//!
//! ```
//! use jobcard_core::{apply_fold_multipliers, parse_job_text, span_girth_prices_to_max};
//!
//! let text = "Order item:\nWidget\nOrder: SO1234\nMaterial: Steel\nSheet width: 1200 mm\nBends: 2";
//! let jobs = parse_job_text(text);
//! assert_eq!(jobs[0].order, "SO1234");
//!
//! let rates = span_girth_prices_to_max(120.0, 1200, &[0]).unwrap();
//! let rates = apply_fold_multipliers(&rates, 2.5, &[0, 1, 2]).unwrap();
//! assert_eq!(rates.get(1200, 2), Some(125.0));
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod pricing;
pub mod validation;

// Re-exports for convenience
pub use config::{LengthUnit, PricingConfig};
pub use error::{ErrorKind, JobCardError, Result};
pub use model::{FoldRates, JobItemRecord, MaterialPricing, PricingMatrix, QuantityLine, RateTable};
pub use parser::{parse_job_block, parse_job_file, parse_job_text};
pub use pricing::{apply_fold_multipliers, span_girth_prices_to_max};
pub use validation::{validate_jobs, validate_matrix, ValidationResult};

