//! Supplemental range headers
//!
//! The record kind is selected by the 4-byte `type` tag at the start of the
//! supplemental region. The set of tags is closed; anything else is rejected.

use crate::error::SchemaError;
use crate::types::layouts::{
    SUPP_100, SUPP_110, SUPP_120, SUPP_130, SUPP_140, SUPP_150, SUPP_190, SUPP_200,
};
use crate::types::record::Record;
use crate::types::schema::HeaderSchema;
use bon::Builder;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupplementalKind {
    Oscillation,
    Psd,
    Quantitative,
    Qci,
    Comment,
    ExcludedRegion,
    EvaOffsets,
    AreaDetector,
}

impl SupplementalKind {
    pub const ALL: [SupplementalKind; 8] = [
        SupplementalKind::Oscillation,
        SupplementalKind::Psd,
        SupplementalKind::Quantitative,
        SupplementalKind::Qci,
        SupplementalKind::Comment,
        SupplementalKind::ExcludedRegion,
        SupplementalKind::EvaOffsets,
        SupplementalKind::AreaDetector,
    ];

    pub const fn tag(self) -> u32 {
        match self {
            SupplementalKind::Oscillation => 100,
            SupplementalKind::Psd => 110,
            SupplementalKind::Quantitative => 120,
            SupplementalKind::Qci => 130,
            SupplementalKind::Comment => 140,
            SupplementalKind::ExcludedRegion => 150,
            SupplementalKind::EvaOffsets => 190,
            SupplementalKind::AreaDetector => 200,
        }
    }

    pub fn schema(self) -> &'static HeaderSchema {
        match self {
            SupplementalKind::Oscillation => &SUPP_100,
            SupplementalKind::Psd => &SUPP_110,
            SupplementalKind::Quantitative => &SUPP_120,
            SupplementalKind::Qci => &SUPP_130,
            SupplementalKind::Comment => &SUPP_140,
            SupplementalKind::ExcludedRegion => &SUPP_150,
            SupplementalKind::EvaOffsets => &SUPP_190,
            SupplementalKind::AreaDetector => &SUPP_200,
        }
    }
}

/// Fails with the unrecognised tag.
impl TryFrom<u32> for SupplementalKind {
    type Error = u32;

    fn try_from(tag: u32) -> Result<Self, Self::Error> {
        match tag {
            100 => Ok(SupplementalKind::Oscillation),
            110 => Ok(SupplementalKind::Psd),
            120 => Ok(SupplementalKind::Quantitative),
            130 => Ok(SupplementalKind::Qci),
            140 => Ok(SupplementalKind::Comment),
            150 => Ok(SupplementalKind::ExcludedRegion),
            190 => Ok(SupplementalKind::EvaOffsets),
            200 => Ok(SupplementalKind::AreaDetector),
            other => Err(other),
        }
    }
}

impl fmt::Display for SupplementalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SupplementalKind::Oscillation => "oscillation",
            SupplementalKind::Psd => "psd",
            SupplementalKind::Quantitative => "quantitative",
            SupplementalKind::Qci => "qci",
            SupplementalKind::Comment => "comment",
            SupplementalKind::ExcludedRegion => "excluded region",
            SupplementalKind::EvaOffsets => "eva offsets",
            SupplementalKind::AreaDetector => "area detector",
        };
        write!(f, "{name} ({})", self.tag())
    }
}

/// Integration parameters written for each frame slice of an area detector scan.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct AreaDetectorHeader {
    pub integration_start: f64,
    pub integration_end: f64,
    pub chi_start: f64,
    pub chi_end: f64,
    pub normalization: u32,
    pub program: String,
    pub act_2th: f64,
    pub act_omega: f64,
    pub act_phi: f64,
    pub act_psi: f64,
    pub record: Record,
}

impl AreaDetectorHeader {
    /// Tilt coordinate of the range: `90 - psi + (90 + chi_start - (chi_start - chi_end) / 2)`.
    pub fn tilt(&self) -> f64 {
        90.0 - self.act_psi + (90.0 + self.chi_start - (self.chi_start - self.chi_end) / 2.0)
    }
}

impl TryFrom<Record> for AreaDetectorHeader {
    type Error = SchemaError;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        Ok(AreaDetectorHeader::builder()
            .integration_start(record.f64("int_start")?)
            .integration_end(record.f64("int_end")?)
            .chi_start(record.f64("chi_start")?)
            .chi_end(record.f64("chi_end")?)
            .normalization(record.u32("norm")?)
            .program(record.text("prog")?.to_string())
            .act_2th(record.f64("act_2th")?)
            .act_omega(record.f64("act_omega")?)
            .act_phi(record.f64("act_phi")?)
            .act_psi(record.f64("act_psi")?)
            .record(record)
            .build())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SupplementalHeader {
    Oscillation(Record),
    Psd(Record),
    Quantitative(Record),
    Qci(Record),
    Comment(Record),
    ExcludedRegion(Record),
    EvaOffsets(Record),
    AreaDetector(AreaDetectorHeader),
}

impl SupplementalHeader {
    pub fn kind(&self) -> SupplementalKind {
        match self {
            SupplementalHeader::Oscillation(_) => SupplementalKind::Oscillation,
            SupplementalHeader::Psd(_) => SupplementalKind::Psd,
            SupplementalHeader::Quantitative(_) => SupplementalKind::Quantitative,
            SupplementalHeader::Qci(_) => SupplementalKind::Qci,
            SupplementalHeader::Comment(_) => SupplementalKind::Comment,
            SupplementalHeader::ExcludedRegion(_) => SupplementalKind::ExcludedRegion,
            SupplementalHeader::EvaOffsets(_) => SupplementalKind::EvaOffsets,
            SupplementalHeader::AreaDetector(_) => SupplementalKind::AreaDetector,
        }
    }

    pub fn record(&self) -> &Record {
        match self {
            SupplementalHeader::Oscillation(record)
            | SupplementalHeader::Psd(record)
            | SupplementalHeader::Quantitative(record)
            | SupplementalHeader::Qci(record)
            | SupplementalHeader::Comment(record)
            | SupplementalHeader::ExcludedRegion(record)
            | SupplementalHeader::EvaOffsets(record) => record,
            SupplementalHeader::AreaDetector(area) => &area.record,
        }
    }

    pub fn as_area_detector(&self) -> Option<&AreaDetectorHeader> {
        match self {
            SupplementalHeader::AreaDetector(area) => Some(area),
            _ => None,
        }
    }
}
