use crate::error::SchemaError;
use crate::types::record::Record;
use crate::types::supplemental::{SupplementalHeader, SupplementalKind};
use crate::utils::misc::linear_axis;
use bon::Builder;
use ndarray::Array1;

/// Fixed header of one scan range.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct RangeHeader {
    /// Size of this header in bytes; the supplemental region starts right after it.
    pub header_len: u32,
    pub steps: u32,
    pub start_theta: f64,
    pub start_2th: f64,
    pub drive_chi: f64,
    pub step_size: f64,
    pub step_time: f64,
    pub detector: u32,
    pub generator_voltage: u32,
    pub generator_current: u32,
    pub wavelength: f64,
    /// Size of the supplemental region in bytes, padding included.
    pub sup_len: u32,
    pub record: Record,
}

impl TryFrom<Record> for RangeHeader {
    type Error = SchemaError;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        Ok(RangeHeader::builder()
            .header_len(record.u32("header_len")?)
            .steps(record.u32("steps")?)
            .start_theta(record.f64("start_theta")?)
            .start_2th(record.f64("start_2th")?)
            .drive_chi(record.f64("drive_chi")?)
            .step_size(record.f64("step_size")?)
            .step_time(record.f64("step_time")?)
            .detector(record.u32("dec_code")?)
            .generator_voltage(record.u32("gen_v")?)
            .generator_current(record.u32("gen_a")?)
            .wavelength(record.f64("lambda")?)
            .sup_len(record.u32("sup_len")?)
            .record(record)
            .build())
    }
}

/// One decoded scan range.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct Range {
    /// Position of the range in the file, counting dropped ranges.
    pub index: usize,
    /// Byte offset of the range header.
    pub offset: usize,
    pub header: RangeHeader,
    pub supplemental: Option<SupplementalHeader>,
    pub counts: Vec<f32>,
}

impl Range {
    pub fn steps(&self) -> usize {
        self.header.steps as usize
    }

    pub fn supplemental_kind(&self) -> Option<SupplementalKind> {
        self.supplemental.as_ref().map(SupplementalHeader::kind)
    }

    /// Tilt coordinate, present for area detector ranges only.
    pub fn tilt(&self) -> Option<f64> {
        self.supplemental
            .as_ref()
            .and_then(SupplementalHeader::as_area_detector)
            .map(|area| area.tilt())
    }

    /// 2theta positions of this range's samples.
    pub fn angular_axis(&self) -> Array1<f64> {
        linear_axis(self.header.start_2th, self.header.step_size, self.steps())
    }
}
