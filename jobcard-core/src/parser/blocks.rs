//! Segmentation of extracted text into line-item blocks.

use crate::config::ITEM_DELIMITER;

/// Split extracted text into one block per `Order item:` marker.
///
/// Text before the first marker is a preamble and is dropped. No marker
/// gives an empty list.
pub fn split_job_blocks(text: &str) -> Vec<&str> {
    text.split(ITEM_DELIMITER).skip(1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_no_delimiter() {
        assert!(split_job_blocks("Job card\nCustomer: ACME\n").is_empty());
        assert!(split_job_blocks("").is_empty());
    }

    #[test]
    fn test_split_drops_preamble() {
        let blocks = split_job_blocks("Header\nOrder item:\nA\nOrder item:\nB\n");
        assert_eq!(blocks, vec!["\nA\n", "\nB\n"]);
    }

    #[test]
    fn test_split_delimiter_at_start() {
        let blocks = split_job_blocks("Order item: Gutter");
        assert_eq!(blocks, vec![" Gutter"]);
    }

    #[test]
    fn test_split_trailing_delimiter_yields_empty_block() {
        let blocks = split_job_blocks("Order item:\nA\nOrder item:");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1], "");
    }
}
