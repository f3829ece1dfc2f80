use crate::error::SchemaError;
use crate::types::record::Record;
use bon::Builder;

/// Global file header. `range_count` is the number of ranges kept after decoding;
/// the count stored on disk stays available in `record`.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct FileHeader {
    pub version: String,
    pub file_status: u32,
    pub range_count: u32,
    pub measure_date: String,
    pub measure_time: String,
    pub user: String,
    pub site: String,
    pub sample_id: String,
    pub comment: String,
    pub anode: String,
    pub alpha_average: f64,
    pub alpha_1: f64,
    pub alpha_2: f64,
    pub alpha_ratio: f64,
    pub measurement_time: f64,
    pub record: Record,
}

impl FileHeader {
    /// Range count as declared in the file.
    pub fn declared_range_count(&self) -> u32 {
        self.record.u32("range_cnt").unwrap_or(self.range_count)
    }
}

impl TryFrom<Record> for FileHeader {
    type Error = SchemaError;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        Ok(FileHeader::builder()
            .version(record.text("version")?.to_string())
            .file_status(record.u32("file_status")?)
            .range_count(record.u32("range_cnt")?)
            .measure_date(record.text("m_date")?.to_string())
            .measure_time(record.text("m_time")?.to_string())
            .user(record.text("user")?.to_string())
            .site(record.text("site")?.to_string())
            .sample_id(record.text("sample_id")?.to_string())
            .comment(record.text("comment")?.to_string())
            .anode(record.text("anode")?.to_string())
            .alpha_average(record.f64("alpha_ave")?)
            .alpha_1(record.f64("alpha_1")?)
            .alpha_2(record.f64("alpha_2")?)
            .alpha_ratio(record.f64("alpha_ratio")?)
            .measurement_time(record.f64("mea_time")?)
            .record(record)
            .build())
    }
}
