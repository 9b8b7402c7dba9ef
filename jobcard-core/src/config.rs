//! Configuration constants and settings for parsing and pricing.

/// Token that starts every line-item block in an extracted job card.
pub const ITEM_DELIMITER: &str = "Order item:";

/// Default maximum girth in mm covered by a rate table.
pub const DEFAULT_MAX_GIRTH: u32 = 1200;

/// Number of folds a new material starts with (folds 1..=N).
pub const DEFAULT_FOLD_COUNT: u32 = 10;

/// Fold count of a flat, unfolded sheet. Its price is the base for every other fold.
pub const FLAT_FOLD: u32 = 0;

/// Girth step of the chunked table view.
pub const CHUNK_STEP: u32 = 100;

/// Default bulk price increase in percent.
pub const DEFAULT_BULK_PERCENT: f64 = 5.0;

/// Base rate multiplier given to new materials.
pub const DEFAULT_BASE_RATE_MULTIPLIER: f64 = 1.0;

/// Price comparison epsilon.
pub const EPS: f64 = 0.0001;

/// Unit of a length or width on a job card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthUnit {
    #[default]
    Millimeters,
    Centimeters,
    Meters,
}

impl LengthUnit {
    /// Parse a unit suffix as it appears on a job card.
    pub fn from_suffix(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mm" => Some(LengthUnit::Millimeters),
            "cm" => Some(LengthUnit::Centimeters),
            "m" => Some(LengthUnit::Meters),
            _ => None,
        }
    }

    /// Get the conversion factor from this unit to millimeters.
    pub fn to_mm_factor(&self) -> f64 {
        match self {
            LengthUnit::Millimeters => 1.0,
            LengthUnit::Centimeters => 10.0,
            LengthUnit::Meters => 1000.0,
        }
    }
}

/// Parse a "magnitude unit" string such as `"500 mm"` into millimeters.
pub fn parse_length_mm(s: &str) -> Option<f64> {
    let s = s.trim();
    let split = s.find(|c: char| !(c.is_ascii_digit() || c == '.'))?;
    let magnitude: f64 = s[..split].parse().ok()?;
    let unit = LengthUnit::from_suffix(&s[split..])?;
    Some(magnitude * unit.to_mm_factor())
}

/// Shape of newly created rate tables.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingConfig {
    /// Largest girth row in a new table.
    pub max_girth: u32,
    /// Number of folds a new material starts with.
    pub default_fold_count: u32,
    /// Base rate multiplier for new materials.
    pub base_rate_multiplier: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            max_girth: DEFAULT_MAX_GIRTH,
            default_fold_count: DEFAULT_FOLD_COUNT,
            base_rate_multiplier: DEFAULT_BASE_RATE_MULTIPLIER,
        }
    }
}

impl PricingConfig {
    /// Create a configuration with a custom maximum girth.
    pub fn new(max_girth: u32) -> Self {
        Self {
            max_girth,
            ..Default::default()
        }
    }

    /// The folds a new material starts with.
    pub fn default_folds(&self) -> Vec<u32> {
        (1..=self.default_fold_count).collect()
    }
}

/// Helpers for two-decimal money values.
pub mod money {
    use super::EPS;

    /// Round to 2 decimal places.
    #[inline]
    pub fn round2(value: f64) -> f64 {
        (value * 100.0).round() / 100.0
    }

    /// Check if two prices are approximately equal.
    #[inline]
    pub fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    /// A usable cell price: finite and not negative.
    #[inline]
    pub fn is_valid_price(value: f64) -> bool {
        value.is_finite() && value >= 0.0
    }
}
