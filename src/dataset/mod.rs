//! Decoded measurement: headers, axes and intensity

pub mod algebra;
pub mod assembler;

pub use algebra::{IntegrationAxis, Region, nearest_index};
pub use assembler::{AreaMap, DecodeOptions, assemble, assemble_area_map};

use crate::error::Result;
use crate::types::header::FileHeader;
use crate::types::range::Range;
use crate::types::record::Record;
use crate::utils::file_utils::read_binary_file_mmap;
use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

/// Counts of a dataset: one scan, or one row per range for area detector data.
#[derive(Debug, Clone, PartialEq)]
pub enum Intensity {
    Scan(Array1<f32>),
    Map(Array2<f32>),
}

impl Intensity {
    /// `(rows, columns)`; a scan is a single row.
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Intensity::Scan(scan) => (1, scan.len()),
            Intensity::Map(map) => map.dim(),
        }
    }

    pub fn as_map(&self) -> ArrayView2<'_, f32> {
        match self {
            Intensity::Scan(scan) => scan.view().insert_axis(Axis(0)),
            Intensity::Map(map) => map.view(),
        }
    }

    pub fn as_scan(&self) -> Option<&Array1<f32>> {
        match self {
            Intensity::Scan(scan) => Some(scan),
            Intensity::Map(_) => None,
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Intensity::Map(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub(crate) source: String,
    pub(crate) header: FileHeader,
    pub(crate) ranges: Vec<Range>,
    pub(crate) angular: Array1<f64>,
    pub(crate) tilt: Option<Array1<f64>>,
    pub(crate) intensity: Intensity,
}

impl Dataset {
    /// Memory-maps and decodes a RAW1.01 file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, &DecodeOptions::default())
    }

    pub fn open_with<P: AsRef<Path>>(path: P, options: &DecodeOptions) -> Result<Self> {
        let path = path.as_ref();
        let mmap = read_binary_file_mmap(path)?;
        let source = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        assemble(&mmap, source, options)
    }

    pub fn from_bytes(bytes: &[u8], source: impl Into<String>) -> Result<Self> {
        Self::from_bytes_with(bytes, source, &DecodeOptions::default())
    }

    pub fn from_bytes_with(
        bytes: &[u8],
        source: impl Into<String>,
        options: &DecodeOptions,
    ) -> Result<Self> {
        assemble(bytes, source.into(), options)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    pub fn angular_axis(&self) -> &Array1<f64> {
        &self.angular
    }

    /// `None` for a single scan.
    pub fn tilt_axis(&self) -> Option<&Array1<f64>> {
        self.tilt.as_ref()
    }

    pub fn intensity(&self) -> &Intensity {
        &self.intensity
    }

    /// Human readable overview of the file.
    pub fn summary(&self) -> String {
        let header = &self.header;
        let mut out = String::new();
        let _ = writeln!(out, "Source: {}", self.source);
        let _ = writeln!(out, "  Version: {}", header.version);
        let _ = writeln!(
            out,
            "  Measured: {} {}",
            header.measure_date, header.measure_time
        );
        if !header.sample_id.is_empty() {
            let _ = writeln!(out, "  Sample: {}", header.sample_id);
        }
        let _ = writeln!(out, "  Anode: {}", header.anode);
        let _ = writeln!(
            out,
            "  Ranges: {} of {} declared",
            header.range_count,
            header.declared_range_count()
        );

        let (rows, columns) = self.intensity.shape();
        let _ = writeln!(out, "  Intensity: {rows} x {columns}");
        if let (Some(first), Some(last)) = (self.angular.first(), self.angular.last()) {
            let _ = writeln!(out, "  2theta: {first:.4} .. {last:.4}");
        }
        if let Some((first, last)) = self.tilt.as_ref().and_then(|t| t.first().zip(t.last())) {
            let _ = writeln!(out, "  Tilt: {first:.4} .. {last:.4}");
        }

        for range in self.ranges.iter().take(5) {
            let kind = range
                .supplemental_kind()
                .map_or_else(|| "none".to_string(), |kind| kind.to_string());
            let _ = writeln!(
                out,
                "  Range {}: {} steps from {:.4} by {:.4}, supplemental {kind}",
                range.index,
                range.steps(),
                range.header.start_2th,
                range.header.step_size
            );
        }
        if self.ranges.len() > 5 {
            let _ = writeln!(out, "  ... and {} more ranges", self.ranges.len() - 5);
        }
        out
    }

    /// Every decoded header field plus the axes, as pretty-printed JSON.
    pub fn metadata_json(&self) -> Result<String> {
        let metadata = Metadata {
            source: &self.source,
            header: &self.header.record,
            ranges: self
                .ranges
                .iter()
                .map(|range| RangeMetadata {
                    index: range.index,
                    offset: range.offset,
                    header: &range.header.record,
                    supplemental: range.supplemental.as_ref().map(|s| s.record()),
                })
                .collect(),
            angular: self.angular.to_vec(),
            tilt: self.tilt.as_ref().map(Array1::to_vec),
            shape: self.intensity.shape(),
        };
        Ok(serde_json::to_string_pretty(&metadata)?)
    }
}

#[derive(Serialize)]
struct Metadata<'a> {
    source: &'a str,
    header: &'a Record,
    ranges: Vec<RangeMetadata<'a>>,
    angular: Vec<f64>,
    tilt: Option<Vec<f64>>,
    shape: (usize, usize),
}

#[derive(Serialize)]
struct RangeMetadata<'a> {
    index: usize,
    offset: usize,
    header: &'a Record,
    supplemental: Option<&'a Record>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fixtures::{RangeSpec, file_bytes};
    use ndarray::array;

    #[test]
    fn scan_views_as_single_row() {
        let intensity = Intensity::Scan(array![1.0, 2.0, 3.0]);
        assert_eq!(intensity.shape(), (1, 3));
        assert_eq!(intensity.as_map(), array![[1.0, 2.0, 3.0]]);
        assert!(!intensity.is_map());
    }

    #[test]
    fn summary_lists_ranges() {
        let bytes = file_bytes(&[RangeSpec::scan(10.0, 1.0, vec![1.0; 5])]);
        let dataset = Dataset::from_bytes(&bytes, "scan.raw").unwrap();
        let summary = dataset.summary();
        assert!(summary.starts_with("Source: scan.raw"));
        assert!(summary.contains("Anode: Cu"));
        assert!(summary.contains("Ranges: 1 of 1 declared"));
        assert!(summary.contains("Range 0: 5 steps from 10.0000 by 1.0000, supplemental none"));
    }

    #[test]
    fn metadata_json_carries_records_and_axes() {
        let bytes = file_bytes(&[RangeSpec::area(20.0, 0.5, vec![1.0, 2.0], 30.0, -10.0, 10.0)]);
        let dataset = Dataset::from_bytes(&bytes, "map.raw").unwrap();
        let json: serde_json::Value = serde_json::from_str(&dataset.metadata_json().unwrap()).unwrap();

        assert_eq!(json["source"], "map.raw");
        assert_eq!(json["header"]["anode"], "Cu");
        assert_eq!(json["ranges"][0]["header"]["steps"], 2);
        assert_eq!(json["ranges"][0]["supplemental"]["type"], 200);
        assert_eq!(json["ranges"][0]["supplemental"]["prog"], "GADDS");
        assert_eq!(json["angular"], serde_json::json!([20.0, 20.5]));
        assert_eq!(json["tilt"], serde_json::json!([150.0]));
        assert_eq!(json["shape"], serde_json::json!([1, 2]));
    }
}
