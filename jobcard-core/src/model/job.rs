//! Job item record representing one line item of a job card.

use serde::{Deserialize, Serialize};

use crate::config::parse_length_mm;

/// One quantity line of a job item: `count x length`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityLine {
    /// Number of pieces cut at this length.
    pub count: u32,
    /// Length with unit suffix, e.g. `"500 mm"`.
    pub length: String,
}

impl QuantityLine {
    /// Create a new quantity line.
    pub fn new(count: u32, length: impl Into<String>) -> Self {
        Self {
            count,
            length: length.into(),
        }
    }

    /// Length converted to millimeters, if the unit is known.
    pub fn length_mm(&self) -> Option<f64> {
        parse_length_mm(&self.length)
    }
}

/// A single parsed line item.
///
/// Every field has a lenient default: absent text fields are empty and an
/// absent piece count is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobItemRecord {
    /// Order identifier, e.g. `SO1234`.
    pub order: String,
    /// Item name (first line of the block).
    pub item: String,
    /// Free-text reference.
    #[serde(rename = "ref")]
    pub reference: String,
    /// Declared piece count; `None` when missing or unparseable.
    pub total_pieces: Option<u32>,
    /// Material name, whitespace-normalized.
    pub material: String,
    /// Sheet width with unit, e.g. `"1200 mm"`.
    pub sheet_width: String,
    /// Bend count, `"N"` or `"N+N"`.
    pub bends: String,
    /// Quantity lines in source order.
    pub quantities: Vec<QuantityLine>,
}

impl JobItemRecord {
    /// Sum of the counts of all quantity lines.
    pub fn quantity_pieces(&self) -> u64 {
        self.quantities.iter().map(|q| u64::from(q.count)).sum()
    }

    /// Total cut length in millimeters over all quantity lines with a known unit.
    pub fn total_length_mm(&self) -> f64 {
        self.quantities
            .iter()
            .filter_map(|q| q.length_mm().map(|mm| mm * f64::from(q.count)))
            .sum()
    }
}
