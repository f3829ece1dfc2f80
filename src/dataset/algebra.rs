//! Combining datasets, coordinate lookup and region integration

use crate::dataset::{Dataset, Intensity};
use crate::error::{Error, Result};
use log::debug;
use ndarray::{Array1, ArrayView1, Axis, concatenate, s};
use std::ops::Add;
use std::str::FromStr;

/// Index box over the intensity matrix. `x` runs along the angular axis (columns),
/// `y` along the tilt axis (rows). Bounds are half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    All,
    Box {
        x1: usize,
        y1: usize,
        x2: usize,
        y2: usize,
    },
}

impl Region {
    pub fn from_bounds(bounds: &[usize]) -> Result<Self> {
        match *bounds {
            [x1, y1, x2, y2] => Ok(Region::Box { x1, y1, x2, y2 }),
            _ => Err(Error::InvalidRegion(format!(
                "{} bounds given",
                bounds.len()
            ))),
        }
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Region::All);
        }
        let bounds = s
            .split(',')
            .map(|part| part.trim().parse::<usize>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| Error::InvalidRegion(s.to_string()))?;
        Region::from_bounds(&bounds).map_err(|_| Error::InvalidRegion(s.to_string()))
    }
}

/// Axis kept by an integration; the other one is summed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationAxis {
    Angular,
    Tilt,
}

impl FromStr for IntegrationAxis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "angular" | "x" | "2theta" => Ok(IntegrationAxis::Angular),
            "tilt" | "y" | "psi" => Ok(IntegrationAxis::Tilt),
            _ => Err(Error::InvalidAxis(s.to_string())),
        }
    }
}

/// Index of the entry closest to `value`; the first one wins on ties.
///
/// A single-element axis always resolves to index 0. NaN and infinite queries
/// have no nearest entry and are rejected.
pub fn nearest_index(axis: ArrayView1<'_, f64>, value: f64) -> Result<usize> {
    if !value.is_finite() {
        return Err(Error::NonFiniteQuery(value));
    }
    let mut best: Option<(usize, f64)> = None;
    for (index, &entry) in axis.iter().enumerate() {
        let distance = (entry - value).abs();
        match best {
            Some((_, closest)) if distance >= closest => {}
            _ => best = Some((index, distance)),
        }
    }
    best.map(|(index, _)| index).ok_or(Error::EmptyAxis)
}

impl Dataset {
    /// Concatenates `other` to the right of this dataset.
    ///
    /// Both tilt axes must be identical, or both datasets must be single scans.
    pub fn combine(&self, other: &Dataset) -> Result<Dataset> {
        let (tilt, intensity) = match (&self.tilt, &other.tilt, &self.intensity, &other.intensity)
        {
            (Some(left), Some(right), Intensity::Map(a), Intensity::Map(b)) if left == right => {
                let map = concatenate(Axis(1), &[a.view(), b.view()])
                    .map_err(|_| Error::AxisMismatch)?;
                (Some(left.clone()), Intensity::Map(map))
            }
            (None, None, Intensity::Scan(a), Intensity::Scan(b)) => {
                let scan = concatenate(Axis(0), &[a.view(), b.view()])
                    .map_err(|_| Error::AxisMismatch)?;
                (None, Intensity::Scan(scan))
            }
            _ => return Err(Error::AxisMismatch),
        };

        let angular = concatenate(Axis(0), &[self.angular.view(), other.angular.view()])
            .map_err(|_| Error::AxisMismatch)?;
        let ranges = self.ranges.iter().chain(&other.ranges).cloned().collect::<Vec<_>>();
        let mut header = self.header.clone();
        header.range_count = ranges.len() as u32;

        debug!(
            "combined {} and {} into {:?}",
            self.source,
            other.source,
            intensity.shape()
        );

        Ok(Dataset {
            source: format!("{} & {}", self.source, other.source),
            header,
            ranges,
            angular,
            tilt,
            intensity,
        })
    }

    /// Resolves coordinates to indices, each axis independently.
    pub fn index_of(
        &self,
        angular: Option<f64>,
        tilt: Option<f64>,
    ) -> Result<(Option<usize>, Option<usize>)> {
        let angular_index = angular
            .map(|value| nearest_index(self.angular.view(), value))
            .transpose()?;
        let tilt_index = match (tilt, &self.tilt) {
            (None, _) => None,
            (Some(value), Some(axis)) => Some(nearest_index(axis.view(), value)?),
            (Some(_), None) => return Err(Error::InvalidAxis("tilt".to_string())),
        };
        Ok((angular_index, tilt_index))
    }

    /// Axis values at the given indices, `None` when an index is out of range.
    pub fn coordinates_at(&self, angular: usize, tilt: Option<usize>) -> Option<(f64, Option<f64>)> {
        let x = *self.angular.get(angular)?;
        let y = match tilt {
            Some(index) => Some(*self.tilt.as_ref()?.get(index)?),
            None => None,
        };
        Some((x, y))
    }

    /// Sums the intensity inside `region` over the axis not kept.
    ///
    /// A single scan is treated as a one-row matrix.
    pub fn integrate(&self, region: &Region, axis: IntegrationAxis) -> Result<Array1<f64>> {
        let map = self.intensity.as_map();
        let (rows, columns) = map.dim();
        let (x1, y1, x2, y2) = match *region {
            Region::All => (0, 0, columns, rows),
            Region::Box { x1, y1, x2, y2 } => {
                let x2 = x2.min(columns);
                let y2 = y2.min(rows);
                (x1.min(x2), y1.min(y2), x2, y2)
            }
        };

        let selection = map.slice(s![y1..y2, x1..x2]).mapv(f64::from);
        let line = match axis {
            IntegrationAxis::Angular => selection.sum_axis(Axis(0)),
            IntegrationAxis::Tilt => selection.sum_axis(Axis(1)),
        };
        Ok(line)
    }
}

impl Add<&Dataset> for &Dataset {
    type Output = Result<Dataset>;

    fn add(self, other: &Dataset) -> Self::Output {
        self.combine(other)
    }
}
