//! Quantity section parsing: `count x length` lines.

use regex::Regex;
use std::sync::LazyLock;

use super::fields::normalize_whitespace;
use crate::model::QuantityLine;

static QUANTITY_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)[ \t]*[xX][ \t]*(\d+(?:\.\d+)?[ \t]*(?:mm|cm|m)\b)").unwrap()
});

/// Parse one quantity line such as `3 x 500 mm`.
pub fn parse_quantity_line(line: &str) -> Option<QuantityLine> {
    let caps = QUANTITY_LINE_RE.captures(line)?;
    let count = caps.get(1)?.as_str().parse().ok()?;
    let length = normalize_whitespace(caps.get(2)?.as_str());
    Some(QuantityLine { count, length })
}

/// Parse every line of a quantity section, dropping lines that do not match.
pub fn parse_quantity_section(section: &str) -> Vec<QuantityLine> {
    section
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let parsed = parse_quantity_line(line);
            if parsed.is_none() {
                tracing::trace!("Skipping quantity line: {:?}", line);
            }
            parsed
        })
        .collect()
}
