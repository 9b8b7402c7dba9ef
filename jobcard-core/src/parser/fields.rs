//! Labelled-field extraction for job item blocks.
//!
//! Each field is described by a [`FieldRule`]: the label that introduces it
//! and the boundary that ends its value. One generic routine,
//! [`capture_field`], applies a rule to a block and returns the trimmed value
//! or `None`. A missing label only ever affects its own field.

use regex::Regex;
use std::sync::LazyLock;

static ORDER_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Order:").unwrap());
static REF_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Ref:").unwrap());
static TOTAL_PIECES_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Total pieces in [^\n]*?:").unwrap());
static MATERIAL_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Material:").unwrap());
static SHEET_WIDTH_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Sheet width:").unwrap());
static QUANTITY_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Quantity:").unwrap());
static BENDS_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Bends:").unwrap());

/// Any known label; used to stop a value before the next field starts.
static ANY_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Order:|Ref:|Total pieces in [^\n]*?:|Material:|Sheet width:|Quantity:|Bends:")
        .unwrap()
});

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(\S+)").unwrap());
static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(\d+)").unwrap());
static LENGTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+(?:\.\d+)?\s*(?:mm|cm|m)\b)").unwrap());
static BEND_COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+(?:\+\d+)?)").unwrap());

/// A labelled field of a job item block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Order,
    Ref,
    TotalPieces,
    Material,
    SheetWidth,
    Quantity,
    Bends,
}

impl Field {
    /// Pattern matching this field's label.
    fn label_regex(&self) -> &'static Regex {
        match self {
            Field::Order => &ORDER_LABEL_RE,
            Field::Ref => &REF_LABEL_RE,
            Field::TotalPieces => &TOTAL_PIECES_LABEL_RE,
            Field::Material => &MATERIAL_LABEL_RE,
            Field::SheetWidth => &SHEET_WIDTH_LABEL_RE,
            Field::Quantity => &QUANTITY_LABEL_RE,
            Field::Bends => &BENDS_LABEL_RE,
        }
    }

    /// Label as it appears on a job card.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Order => "Order:",
            Field::Ref => "Ref:",
            Field::TotalPieces => "Total pieces in job:",
            Field::Material => "Material:",
            Field::SheetWidth => "Sheet width:",
            Field::Quantity => "Quantity:",
            Field::Bends => "Bends:",
        }
    }
}

/// Shape of a value that ends where its own pattern stops matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// A whitespace-bounded token.
    Token,
    /// A run of digits.
    Digits,
    /// A magnitude followed by `mm`, `cm` or `m`.
    Length,
    /// `N` or `N+N`.
    BendCount,
}

impl ValueShape {
    fn regex(&self) -> &'static Regex {
        match self {
            ValueShape::Token => &TOKEN_RE,
            ValueShape::Digits => &DIGITS_RE,
            ValueShape::Length => &LENGTH_RE,
            ValueShape::BendCount => &BEND_COUNT_RE,
        }
    }
}

/// Where a field's value ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// End of the first non-blank line after the label, or an earlier known label.
    EndOfLine,
    /// Start of the given field's label; falls back to the next known label,
    /// then to the end of the block.
    Before(Field),
    /// The value's own pattern.
    Shape(ValueShape),
}

/// One entry of the field grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: Field,
    pub boundary: Boundary,
}

/// The labelled-field grammar of a job item block.
pub static FIELD_RULES: [FieldRule; 7] = [
    FieldRule {
        field: Field::Order,
        boundary: Boundary::Shape(ValueShape::Token),
    },
    FieldRule {
        field: Field::Ref,
        boundary: Boundary::EndOfLine,
    },
    FieldRule {
        field: Field::TotalPieces,
        boundary: Boundary::Shape(ValueShape::Digits),
    },
    FieldRule {
        field: Field::Material,
        boundary: Boundary::Before(Field::SheetWidth),
    },
    FieldRule {
        field: Field::SheetWidth,
        boundary: Boundary::Shape(ValueShape::Length),
    },
    FieldRule {
        field: Field::Quantity,
        boundary: Boundary::Before(Field::Bends),
    },
    FieldRule {
        field: Field::Bends,
        boundary: Boundary::Shape(ValueShape::BendCount),
    },
];

/// Look up the rule for a field.
pub fn rule_for(field: Field) -> Option<&'static FieldRule> {
    FIELD_RULES.iter().find(|rule| rule.field == field)
}

/// Capture a field's value from a block.
///
/// Only the first occurrence of the label is considered. Returns `None` when
/// the label is absent, the value does not match, or the value is empty.
pub fn capture_field<'a>(block: &'a str, rule: &FieldRule) -> Option<&'a str> {
    let label = rule.field.label_regex().find(block)?;
    let rest = &block[label.end()..];

    let value = match rule.boundary {
        Boundary::Shape(shape) => {
            let caps = shape.regex().captures(rest)?;
            let value = caps.get(1)?.as_str();
            cut_at_label(value)
        }
        Boundary::EndOfLine => {
            let rest = rest.trim_start();
            let line = rest.split('\n').next().unwrap_or("");
            cut_at_label(line)
        }
        Boundary::Before(terminator) => {
            let end = terminator
                .label_regex()
                .find(rest)
                .or_else(|| ANY_LABEL_RE.find(rest))
                .map(|m| m.start())
                .unwrap_or(rest.len());
            &rest[..end]
        }
    };

    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// First non-blank line of a block, stopping at any known label.
pub fn first_line(block: &str) -> Option<&str> {
    let line = block.lines().map(str::trim).find(|l| !l.is_empty())?;
    let value = cut_at_label(line).trim();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Truncate text at the first known label.
fn cut_at_label(text: &str) -> &str {
    match ANY_LABEL_RE.find(text) {
        Some(m) => &text[..m.start()],
        None => text,
    }
}

/// Collapse runs of whitespace, newlines included, into single spaces.
pub(crate) fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
