//! Decode pass: global header, every range, then the scan or area map

use crate::dataset::{Dataset, Intensity};
use crate::error::{Error, Result};
use crate::parser::{parse_header, parse_range, scan_range_offsets};
use crate::types::layouts::FILE_HEADER_LEN;
use crate::types::range::Range;
use crate::types::supplemental::SupplementalKind;
use crate::utils::misc::spanning_axis;
use bon::Builder;
use itertools::Itertools;
use log::{info, warn};
use ndarray::{Array1, Array2, ArrayView1, s};
use rayon::prelude::*;
use std::cmp::Reverse;

#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
pub struct DecodeOptions {
    /// Decode ranges on the rayon pool after a header-only offset scan.
    #[builder(default)]
    pub parallel: bool,
}

/// Rectangular reconstruction of an area detector acquisition.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaMap {
    pub angular: Array1<f64>,
    pub tilt: Array1<f64>,
    pub intensity: Array2<f32>,
}

pub fn assemble(buffer: &[u8], source: String, options: &DecodeOptions) -> Result<Dataset> {
    let mut header = parse_header(buffer)?;
    let declared = header.range_count as usize;

    let ranges = if options.parallel {
        decode_parallel(buffer, declared, &source)?
    } else {
        decode_sequential(buffer, declared, &source)?
    };
    header.range_count = ranges.len() as u32;

    let first = ranges.first().ok_or(Error::EmptyDataset)?;
    let (angular, tilt, intensity) =
        if first.supplemental_kind() == Some(SupplementalKind::AreaDetector) {
            let map = assemble_area_map(&ranges)?;
            (map.angular, Some(map.tilt), Intensity::Map(map.intensity))
        } else {
            let scan = Array1::from(first.counts.clone());
            (first.angular_axis(), None, Intensity::Scan(scan))
        };

    info!(
        "{source}: {} of {declared} ranges, intensity {:?}",
        ranges.len(),
        intensity.shape()
    );

    Ok(Dataset {
        source,
        header,
        ranges,
        angular,
        tilt,
        intensity,
    })
}

fn decode_sequential(buffer: &[u8], count: usize, source: &str) -> Result<Vec<Range>> {
    let mut ranges = Vec::with_capacity(count.min(1024));
    let mut cursor = FILE_HEADER_LEN;
    for index in 0..count {
        let (range, next) = parse_range(buffer, cursor, index)?;
        cursor = next;
        if has_data(&range, source) {
            ranges.push(range);
        }
    }
    Ok(ranges)
}

/// Ranges come back in file order regardless of which thread decoded them.
fn decode_parallel(buffer: &[u8], count: usize, source: &str) -> Result<Vec<Range>> {
    let offsets = scan_range_offsets(buffer, FILE_HEADER_LEN, count)?;
    let decoded = offsets
        .into_par_iter()
        .enumerate()
        .map(|(index, offset)| {
            parse_range(buffer, offset, index)
                .map(|(range, _)| has_data(&range, source).then_some(range))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(decoded.into_iter().flatten().collect())
}

fn has_data(range: &Range, source: &str) -> bool {
    if range.header.steps == 0 {
        warn!("{source}: range {} has no steps, dropping it", range.index);
        return false;
    }
    true
}

/// Pads ranges of differing length into one matrix, one row per range.
///
/// Rows shorter than the longest range are zero-filled on the right. The angular axis
/// follows the longest range (first one on ties); the tilt axis spans the per-range
/// tilt values evenly.
pub fn assemble_area_map(ranges: &[Range]) -> Result<AreaMap> {
    let tilts = ranges
        .iter()
        .map(|range| {
            range.tilt().ok_or_else(|| Error::InconsistentRanges {
                index: range.index,
                reason: "no area detector supplemental header".to_string(),
            })
        })
        .collect::<Result<Vec<f64>>>()?;

    let (_, longest) = ranges
        .iter()
        .enumerate()
        .max_by_key(|(position, range)| (range.counts.len(), Reverse(*position)))
        .ok_or(Error::EmptyDataset)?;
    let max_len = longest.counts.len();

    let mut intensity = Array2::<f32>::zeros((ranges.len(), max_len));
    for (mut row, range) in intensity.rows_mut().into_iter().zip(ranges) {
        row.slice_mut(s![..range.counts.len()])
            .assign(&ArrayView1::from(&range.counts[..]));
    }

    let (min_tilt, max_tilt) = tilts
        .iter()
        .copied()
        .minmax()
        .into_option()
        .ok_or(Error::EmptyDataset)?;

    Ok(AreaMap {
        angular: longest.angular_axis(),
        tilt: spanning_axis(min_tilt, max_tilt, ranges.len()),
        intensity,
    })
}
