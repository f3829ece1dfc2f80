//! Decoder for Bruker RAW1.01 X-ray diffraction files.
//!
//! A file is a fixed global header followed by a sequence of ranges. Each range
//! carries its own header, an optional typed supplemental header and a block of
//! 32-bit float counts. Single scans decode to a 1D [`Dataset`]; area detector
//! acquisitions decode to a zero-padded 2D map with a synthesized tilt axis.
//!
//! ```no_run
//! use rawxrd::{Dataset, IntegrationAxis, Region};
//!
//! let dataset = Dataset::open("sample.raw")?;
//! let profile = dataset.integrate(&Region::All, IntegrationAxis::Angular)?;
//! println!("{} points", profile.len());
//! # Ok::<(), rawxrd::Error>(())
//! ```

pub mod dataset;
pub mod error;
pub mod parser;
pub mod processing;
pub mod types;
pub mod utils;

#[cfg(feature = "python")]
pub mod python;

pub use dataset::{
    AreaMap, Dataset, DecodeOptions, IntegrationAxis, Intensity, Region, nearest_index,
};
pub use error::{Error, Result, SchemaError};
pub use types::{
    AreaDetectorHeader, FileHeader, Range, RangeHeader, Record, SupplementalHeader,
    SupplementalKind,
};
