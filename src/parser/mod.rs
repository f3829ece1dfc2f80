//! RAW1.01 parsing functionality

pub mod field_parser;
mod header_parser;
pub mod range_parser;

// Re-export the parsing functions
pub use field_parser::{decode_field, decode_record};
pub use header_parser::{check_signature, parse_header};
pub use range_parser::{parse_range, parse_samples, parse_supplemental, scan_range_offsets};
