//! Pricing matrix types: material name → fold columns and girth × fold rate table.

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

use crate::error::{JobCardError, Result};

/// Prices of one girth row, keyed by fold count (0 = flat).
pub type FoldRates = BTreeMap<u32, f64>;

/// Rate table as persisted: keys are text and not yet checked.
pub type RawRateTable = BTreeMap<String, BTreeMap<String, f64>>;

/// Girth (mm) → fold → price.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "RawRateTable")]
pub struct RateTable(BTreeMap<u32, FoldRates>);

impl RateTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with girths `1..=max_girth`, every fold in `folds` set to `price`.
    pub fn filled(max_girth: u32, folds: &[u32], price: f64) -> Self {
        (1..=max_girth)
            .map(|girth| (girth, folds.iter().map(|&fold| (fold, price)).collect()))
            .collect()
    }

    /// Convert a persisted table, normalizing numeric-text keys to integers.
    ///
    /// Girths must be positive; fold keys may be 0 (flat).
    pub fn from_raw(raw: &RawRateTable) -> Result<Self> {
        let mut rows = BTreeMap::new();
        for (girth_key, fold_map) in raw {
            let girth = parse_key(girth_key, "rate table girth")?;
            if girth == 0 {
                return Err(JobCardError::DataIntegrity {
                    key: girth_key.clone(),
                    context: "rate table girth".to_string(),
                });
            }
            let mut row = FoldRates::new();
            for (fold_key, &price) in fold_map {
                let fold = parse_key(fold_key, "rate table fold")?;
                row.insert(fold, price);
            }
            rows.insert(girth, row);
        }
        Ok(Self(rows))
    }

    /// Price of one cell.
    pub fn get(&self, girth: u32, fold: u32) -> Option<f64> {
        self.0.get(&girth).and_then(|row| row.get(&fold)).copied()
    }

    /// One girth row.
    pub fn row(&self, girth: u32) -> Option<&FoldRates> {
        self.0.get(&girth)
    }

    /// Mutable access to one girth row.
    pub fn row_mut(&mut self, girth: u32) -> Option<&mut FoldRates> {
        self.0.get_mut(&girth)
    }

    /// Insert or replace a whole girth row.
    pub fn insert_row(&mut self, girth: u32, row: FoldRates) {
        self.0.insert(girth, row);
    }

    /// Girth keys in ascending order.
    pub fn girths(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.keys().copied()
    }

    /// Rows in ascending girth order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &FoldRates)> {
        self.0.iter().map(|(&girth, row)| (girth, row))
    }

    /// Mutable rows in ascending girth order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (u32, &mut FoldRates)> {
        self.0.iter_mut().map(|(&girth, row)| (girth, row))
    }

    /// Largest girth present.
    pub fn max_girth(&self) -> Option<u32> {
        self.0.keys().next_back().copied()
    }

    /// Number of girth rows.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(u32, FoldRates)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (u32, FoldRates)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl TryFrom<RawRateTable> for RateTable {
    type Error = JobCardError;

    fn try_from(raw: RawRateTable) -> Result<Self> {
        Self::from_raw(&raw)
    }
}

impl Serialize for RateTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

/// Parse a girth or fold key. Accepts `"100"`, `" 100 "` and integral `"100.0"`.
fn parse_key(key: &str, context: &str) -> Result<u32> {
    let trimmed = key.trim();
    if let Ok(value) = trimmed.parse::<u32>() {
        return Ok(value);
    }
    match trimmed.parse::<f64>() {
        Ok(value)
            if value.fract() == 0.0
                && value.is_sign_positive()
                && value <= f64::from(u32::MAX) =>
        {
            Ok(value as u32)
        }
        _ => Err(JobCardError::DataIntegrity {
            key: key.to_string(),
            context: context.to_string(),
        }),
    }
}

/// Pricing for one material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialPricing {
    /// Carried scalar; not used by the generators.
    pub base_rate_multiplier: f64,
    /// Fold counts currently defined, excluding the flat fold 0.
    pub folds: Vec<u32>,
    /// Girth × fold rate table.
    pub rates: RateTable,
}

/// Persisted form of [`MaterialPricing`] before key normalization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMaterialPricing {
    #[serde(default = "default_multiplier")]
    base_rate_multiplier: f64,
    #[serde(default)]
    folds: Vec<u32>,
    #[serde(default)]
    rates: RawRateTable,
}

fn default_multiplier() -> f64 {
    crate::config::DEFAULT_BASE_RATE_MULTIPLIER
}

/// Material name → pricing, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PricingMatrix {
    materials: BTreeMap<String, MaterialPricing>,
}

impl PricingMatrix {
    /// Create an empty matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a matrix from its persisted JSON form.
    ///
    /// Malformed JSON is a [`JobCardError::Json`]; a non-numeric girth or fold
    /// key is a [`JobCardError::DataIntegrity`].
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, RawMaterialPricing> = serde_json::from_str(json)?;
        let mut materials = BTreeMap::new();
        for (name, material) in raw {
            let rates = RateTable::from_raw(&material.rates).map_err(|e| match e {
                JobCardError::DataIntegrity { key, context } => JobCardError::DataIntegrity {
                    key,
                    context: format!("{} of material '{}'", context, name),
                },
                other => other,
            })?;
            materials.insert(
                name,
                MaterialPricing {
                    base_rate_multiplier: material.base_rate_multiplier,
                    folds: material.folds,
                    rates,
                },
            );
        }
        Ok(Self { materials })
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Look up a material.
    pub fn material(&self, name: &str) -> Option<&MaterialPricing> {
        self.materials.get(name)
    }

    /// Material names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.materials.keys().map(|s| s.as_str())
    }

    /// All materials in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MaterialPricing)> {
        self.materials.iter().map(|(name, m)| (name.as_str(), m))
    }

    /// Number of materials.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// True when no materials are defined.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub(crate) fn materials_mut(&mut self) -> &mut BTreeMap<String, MaterialPricing> {
        &mut self.materials
    }
}
