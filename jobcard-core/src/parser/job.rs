//! Job card parser: extracted text → job item records.

use std::path::Path;
use tracing::{debug, trace};

use super::blocks::split_job_blocks;
use super::fields::{capture_field, first_line, normalize_whitespace, Field, FIELD_RULES};
use super::quantity::parse_quantity_section;
use crate::error::{JobCardError, Result};
use crate::model::JobItemRecord;

/// Parse one line-item block into a record.
///
/// Never fails: each field falls back to its default on its own.
pub fn parse_job_block(block: &str) -> JobItemRecord {
    let mut record = JobItemRecord {
        item: first_line(block).unwrap_or_default().to_string(),
        ..Default::default()
    };

    for rule in &FIELD_RULES {
        let Some(value) = capture_field(block, rule) else {
            trace!("No value for {} in block", rule.field.label());
            continue;
        };
        match rule.field {
            Field::Order => record.order = value.to_string(),
            Field::Ref => record.reference = value.to_string(),
            Field::TotalPieces => record.total_pieces = value.parse().ok(),
            Field::Material => record.material = normalize_whitespace(value),
            Field::SheetWidth => record.sheet_width = normalize_whitespace(value),
            Field::Quantity => record.quantities = parse_quantity_section(value),
            Field::Bends => record.bends = value.to_string(),
        }
    }

    record
}

/// Parse the full extracted text of a job card.
///
/// Returns one record per `Order item:` block in document order; text without
/// any block gives an empty list.
pub fn parse_job_text(text: &str) -> Vec<JobItemRecord> {
    let text = text.replace("\r\n", "\n");
    let blocks = split_job_blocks(&text);
    debug!("Found {} job item block(s)", blocks.len());
    blocks.into_iter().map(parse_job_block).collect()
}

/// Read an extracted-text file and parse it.
pub fn parse_job_file(path: &Path) -> Result<Vec<JobItemRecord>> {
    if !path.exists() {
        return Err(JobCardError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    Ok(parse_job_text(&content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuantityLine;
    use pretty_assertions::assert_eq;

    const SCENARIO_A: &str = "Order item:\nWidget\nOrder: SO1234\nRef: R1\nTotal pieces in job: 5\nMaterial: Steel\nSheet width: 1200 mm\nQuantity:\n3 x 500 mm\n2 x 700 mm\nBends: 2+1";

    fn widget() -> JobItemRecord {
        JobItemRecord {
            order: "SO1234".to_string(),
            item: "Widget".to_string(),
            reference: "R1".to_string(),
            total_pieces: Some(5),
            material: "Steel".to_string(),
            sheet_width: "1200 mm".to_string(),
            bends: "2+1".to_string(),
            quantities: vec![QuantityLine::new(3, "500 mm"), QuantityLine::new(2, "700 mm")],
        }
    }

    /// Lay a record out the way an extracted job card block reads.
    fn render_block(record: &JobItemRecord) -> String {
        let mut block = format!(
            "\n{}\nOrder: {}\nRef: {}\nTotal pieces in job: {}\nMaterial: {}\nSheet width: {}\nQuantity:\n",
            record.item,
            record.order,
            record.reference,
            record.total_pieces.map(|n| n.to_string()).unwrap_or_default(),
            record.material,
            record.sheet_width,
        );
        for q in &record.quantities {
            block.push_str(&format!("{} x {}\n", q.count, q.length));
        }
        block.push_str(&format!("Bends: {}\n", record.bends));
        block
    }

    #[test]
    fn test_parse_scenario_a() {
        let records = parse_job_text(SCENARIO_A);
        assert_eq!(records, vec![widget()]);
    }

    #[test]
    fn test_parse_no_delimiter_is_empty() {
        assert!(parse_job_text("Job card\nOrder: SO1\nMaterial: Steel\n").is_empty());
        assert!(parse_job_text("").is_empty());
    }

    #[test]
    fn test_parse_crlf_text() {
        let records = parse_job_text(&SCENARIO_A.replace('\n', "\r\n"));
        assert_eq!(records, vec![widget()]);
    }

    #[test]
    fn test_render_then_parse_round_trips() {
        let records = [
            widget(),
            JobItemRecord {
                order: "SO77".to_string(),
                item: "Barge board 200".to_string(),
                reference: "North side".to_string(),
                total_pieces: Some(14),
                material: "Colorsteel Endura Ironsand".to_string(),
                sheet_width: "900 mm".to_string(),
                bends: "4".to_string(),
                quantities: vec![
                    QuantityLine::new(10, "3600 mm"),
                    QuantityLine::new(4, "1200 mm"),
                ],
            },
        ];
        for record in records {
            assert_eq!(parse_job_block(&render_block(&record)), record);
        }
    }

    #[test]
    fn test_material_newlines_collapse() {
        let block = "\nFlashing\nMaterial: Colorsteel\nEndura\nSheet width: 600 mm\n";
        let record = parse_job_block(block);
        assert_eq!(record.material, "Colorsteel Endura");
        assert_eq!(record.sheet_width, "600 mm");
    }

    #[test]
    fn test_each_missing_label_only_defaults_its_field() {
        let full = widget();
        let block = render_block(&full);
        let cases: [(&str, fn(&mut JobItemRecord)); 7] = [
            ("Order: ", |r| r.order.clear()),
            ("Ref: ", |r| r.reference.clear()),
            ("Total pieces in job: ", |r| r.total_pieces = None),
            ("Material: ", |r| r.material.clear()),
            ("Sheet width: ", |r| r.sheet_width.clear()),
            ("Quantity:", |r| r.quantities.clear()),
            ("Bends: ", |r| r.bends.clear()),
        ];

        for (label, clear) in cases {
            let start = block.find(label).unwrap();
            let end = start + block[start..].find('\n').unwrap();
            let mut without = block.clone();
            without.replace_range(start..=end, "");
            if label == "Quantity:" {
                // The quantity lines go with their label.
                without = without.replace("3 x 500 mm\n2 x 700 mm\n", "");
            }

            let mut expected = full.clone();
            clear(&mut expected);
            assert_eq!(parse_job_block(&without), expected, "without {:?}", label);
        }
    }

    #[test]
    fn test_total_pieces_unparseable_is_unknown() {
        let record = parse_job_block("\nX\nTotal pieces in job: ?\n");
        assert_eq!(record.total_pieces, None);
        assert_eq!(record.item, "X");
    }

    #[test]
    fn test_parsed_piece_total_does_not_overflow() {
        let record =
            parse_job_block("\nX\nQuantity:\n4000000000 x 5 mm\n4000000000 x 5 mm\nBends: 1");
        assert_eq!(record.quantities.len(), 2);
        assert_eq!(record.quantity_pieces(), 8_000_000_000);
    }

    #[test]
    fn test_multiple_blocks_keep_document_order() {
        let text = "Customer copy\nOrder item:\nA\nOrder: SO1\nOrder item:\nB\nOrder: SO1\nOrder item:\nC\nOrder: SO1\n";
        let items: Vec<_> = parse_job_text(text).into_iter().map(|r| r.item).collect();
        assert_eq!(items, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_parse_job_file_missing() {
        let err = parse_job_file(Path::new("/nonexistent/job.txt")).unwrap_err();
        assert!(matches!(err, JobCardError::FileNotFound { .. }));
    }
}
