//! Utility functions for file handling and axis synthesis

pub mod file_utils;
pub mod misc;

pub use file_utils::read_binary_file_mmap;
pub use misc::{linear_axis, spanning_axis};

#[cfg(test)]
pub(crate) mod fixtures;
