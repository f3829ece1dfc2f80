//! Tabular views of decoded datasets

pub mod range_table;

pub use range_table::{range_table, ranges_in_tilt_window};
