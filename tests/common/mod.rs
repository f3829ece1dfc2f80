//! Builders for synthetic RAW1.01 files

#![allow(dead_code)]

pub const FILE_HEADER_LEN: usize = 712;
pub const RANGE_HEADER_LEN: usize = 304;

pub struct TestRange {
    start_2th: f64,
    step_size: f64,
    counts: Vec<f32>,
    supplemental: Vec<u8>,
}

impl TestRange {
    pub fn scan(start_2th: f64, step_size: f64, counts: &[f32]) -> Self {
        Self {
            start_2th,
            step_size,
            counts: counts.to_vec(),
            supplemental: Vec::new(),
        }
    }

    /// Range carrying a type-200 area detector header.
    pub fn area(start_2th: f64, step_size: f64, counts: &[f32], psi: f32) -> Self {
        let mut record = vec![0u8; 72];
        record[0..4].copy_from_slice(&200u32.to_le_bytes());
        record[4..8].copy_from_slice(&72u32.to_le_bytes());
        record[24..28].copy_from_slice(&(-10.0f32).to_le_bytes());
        record[28..32].copy_from_slice(&10.0f32.to_le_bytes());
        record[36..41].copy_from_slice(b"GADDS");
        record[68..72].copy_from_slice(&psi.to_le_bytes());
        Self {
            supplemental: record,
            ..Self::scan(start_2th, step_size, counts)
        }
    }

    /// Range carrying a type-140 comment header.
    pub fn commented(start_2th: f64, step_size: f64, counts: &[f32], comment: &str) -> Self {
        let mut record = Vec::new();
        record.extend_from_slice(&140u32.to_le_bytes());
        record.extend_from_slice(&((8 + comment.len()) as u32).to_le_bytes());
        record.extend_from_slice(comment.as_bytes());
        Self {
            supplemental: record,
            ..Self::scan(start_2th, step_size, counts)
        }
    }

    fn write(&self, out: &mut Vec<u8>) {
        let mut header = vec![0u8; RANGE_HEADER_LEN];
        header[0..4].copy_from_slice(&(RANGE_HEADER_LEN as u32).to_le_bytes());
        header[4..8].copy_from_slice(&(self.counts.len() as u32).to_le_bytes());
        header[16..24].copy_from_slice(&self.start_2th.to_le_bytes());
        header[176..184].copy_from_slice(&self.step_size.to_le_bytes());
        header[192..196].copy_from_slice(&1.5f32.to_le_bytes());
        header[256..260].copy_from_slice(&(self.supplemental.len() as u32).to_le_bytes());
        out.extend(header);
        out.extend_from_slice(&self.supplemental);
        out.extend(self.counts.iter().flat_map(|count| count.to_le_bytes()));
    }
}

#[derive(Default)]
pub struct RawFileBuilder {
    sample_id: String,
    ranges: Vec<TestRange>,
}

impl RawFileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample_id(mut self, sample_id: &str) -> Self {
        self.sample_id = sample_id.to_string();
        self
    }

    pub fn range(mut self, range: TestRange) -> Self {
        self.ranges.push(range);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; FILE_HEADER_LEN];
        bytes[..8].copy_from_slice(b"RAW1.01\0");
        bytes[12..16].copy_from_slice(&(self.ranges.len() as u32).to_le_bytes());
        let sample = self.sample_id.as_bytes();
        bytes[326..326 + sample.len()].copy_from_slice(sample);
        bytes[608..610].copy_from_slice(b"Cu");
        for range in &self.ranges {
            range.write(&mut bytes);
        }
        bytes
    }
}
