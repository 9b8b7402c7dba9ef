//! Job card text parser module.

mod blocks;
mod fields;
mod job;
mod quantity;

pub use blocks::split_job_blocks;
pub use fields::{capture_field, first_line, rule_for, Boundary, Field, FieldRule, ValueShape, FIELD_RULES};
pub use job::{parse_job_block, parse_job_file, parse_job_text};
pub use quantity::{parse_quantity_line, parse_quantity_section};
