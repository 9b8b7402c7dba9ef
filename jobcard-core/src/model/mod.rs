//! Data model types for job cards and pricing matrices.

mod job;
mod pricing;

pub use job::{JobItemRecord, QuantityLine};
pub use pricing::{FoldRates, MaterialPricing, PricingMatrix, RateTable, RawRateTable};
