//! Synthetic RAW1.01 buffers for unit tests

use crate::types::layouts::FILE_HEADER_LEN;

pub const RANGE_HEADER_LEN: usize = 304;

pub struct RangeSpec {
    pub start_2th: f64,
    pub step_size: f64,
    pub counts: Vec<f32>,
    pub supplemental: Vec<u8>,
    pub sup_len: usize,
}

impl RangeSpec {
    pub fn scan(start_2th: f64, step_size: f64, counts: Vec<f32>) -> Self {
        Self {
            start_2th,
            step_size,
            counts,
            supplemental: Vec::new(),
            sup_len: 0,
        }
    }

    pub fn area(
        start_2th: f64,
        step_size: f64,
        counts: Vec<f32>,
        psi: f32,
        chi_start: f32,
        chi_end: f32,
    ) -> Self {
        let mut record = vec![0u8; 72];
        record[0..4].copy_from_slice(&200u32.to_le_bytes());
        record[4..8].copy_from_slice(&72u32.to_le_bytes());
        record[24..28].copy_from_slice(&chi_start.to_le_bytes());
        record[28..32].copy_from_slice(&chi_end.to_le_bytes());
        record[36..43].copy_from_slice(b"GADDS\0\0");
        record[68..72].copy_from_slice(&psi.to_le_bytes());
        Self::scan(start_2th, step_size, counts).with_supplemental(record)
    }

    pub fn with_supplemental(mut self, record: Vec<u8>) -> Self {
        self.sup_len = record.len();
        self.supplemental = record;
        self
    }

    pub fn with_sup_len(mut self, sup_len: usize) -> Self {
        self.sup_len = sup_len;
        self
    }
}

pub fn range_bytes(spec: &RangeSpec) -> Vec<u8> {
    let mut header = vec![0u8; RANGE_HEADER_LEN];
    header[0..4].copy_from_slice(&(RANGE_HEADER_LEN as u32).to_le_bytes());
    header[4..8].copy_from_slice(&(spec.counts.len() as u32).to_le_bytes());
    header[16..24].copy_from_slice(&spec.start_2th.to_le_bytes());
    header[176..184].copy_from_slice(&spec.step_size.to_le_bytes());
    header[256..260].copy_from_slice(&(spec.sup_len as u32).to_le_bytes());

    let mut supplemental = spec.supplemental.clone();
    supplemental.resize(spec.sup_len, 0);

    let mut bytes = header;
    bytes.extend(supplemental);
    bytes.extend(spec.counts.iter().flat_map(|count| count.to_le_bytes()));
    bytes
}

pub fn file_bytes(ranges: &[RangeSpec]) -> Vec<u8> {
    let mut bytes = vec![0u8; FILE_HEADER_LEN];
    bytes[..8].copy_from_slice(b"RAW1.01\0");
    bytes[12..16].copy_from_slice(&(ranges.len() as u32).to_le_bytes());
    bytes[608..610].copy_from_slice(b"Cu");
    for range in ranges {
        bytes.extend(range_bytes(range));
    }
    bytes
}
