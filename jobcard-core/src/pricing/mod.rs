//! Pricing matrix generation and editing.

mod editor;
mod folds;
mod seed;
mod span;

pub use folds::apply_fold_multipliers;
pub use span::{span_girth_prices_to_max, span_girth_prices_to_default_max};
