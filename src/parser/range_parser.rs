//! Range records: fixed header, optional supplemental header, f32 samples

use crate::error::{Error, Result};
use crate::parser::field_parser::{decode_field, decode_record, required_field};
use crate::types::layouts::RANGE_HEADER;
use crate::types::range::{Range, RangeHeader};
use crate::types::record::Record;
use crate::types::schema::FieldDescriptor;
use crate::types::supplemental::{AreaDetectorHeader, SupplementalHeader, SupplementalKind};
use log::debug;
use winnow::{Parser, binary::le_f32, binary::le_u32, combinator::repeat, error::ContextError};

/// Parses the range starting at `offset`, returning it with the offset just past its samples.
pub fn parse_range(buffer: &[u8], offset: usize, index: usize) -> Result<(Range, usize)> {
    let header = RangeHeader::try_from(decode_record(buffer, offset, &RANGE_HEADER)?)?;
    check_header_len(offset, header.header_len as usize)?;

    let sup_start = offset + header.header_len as usize;
    let supplemental = parse_supplemental(buffer, sup_start, header.sup_len as usize)?;

    // sup_len covers padding some record kinds leave after their fields
    let data_start = sup_start + header.sup_len as usize;
    let steps = header.steps as usize;
    let counts = parse_samples(buffer, data_start, steps)?;

    debug!(
        "range {index} at offset {offset}: {steps} steps, supplemental {}",
        supplemental
            .as_ref()
            .map(|sup| sup.kind().to_string())
            .unwrap_or_else(|| "none".to_string())
    );

    let range = Range::builder()
        .index(index)
        .offset(offset)
        .header(header)
        .maybe_supplemental(supplemental)
        .counts(counts)
        .build();
    Ok((range, data_start + steps * 4))
}

/// Decodes the supplemental record at `offset`, or `None` when the range declares none.
///
/// Fields are read only from the `sup_len` bytes the range declares; a record that
/// does not fit is `TruncatedRecord`.
pub fn parse_supplemental(
    buffer: &[u8],
    offset: usize,
    sup_len: usize,
) -> Result<Option<SupplementalHeader>> {
    if sup_len == 0 {
        return Ok(None);
    }

    let end = offset.saturating_add(sup_len);
    let region = buffer.get(..end).unwrap_or(buffer);

    let tag = peek_tag(region, offset)?;
    let kind = SupplementalKind::try_from(tag)
        .map_err(|tag| Error::UnknownSupplementalHeaderType { tag, offset })?;
    let record = decode_record(region, offset, kind.schema())?;

    let header = match kind {
        SupplementalKind::Oscillation => SupplementalHeader::Oscillation(record),
        SupplementalKind::Psd => SupplementalHeader::Psd(record),
        SupplementalKind::Quantitative => SupplementalHeader::Quantitative(record),
        SupplementalKind::Qci => SupplementalHeader::Qci(record),
        SupplementalKind::Comment => SupplementalHeader::Comment(record),
        SupplementalKind::ExcludedRegion => SupplementalHeader::ExcludedRegion(record),
        SupplementalKind::EvaOffsets => SupplementalHeader::EvaOffsets(record),
        SupplementalKind::AreaDetector => {
            SupplementalHeader::AreaDetector(AreaDetectorHeader::try_from(record)?)
        }
    };
    Ok(Some(header))
}

/// Reads `steps` little-endian f32 samples starting at `offset`.
pub fn parse_samples(buffer: &[u8], offset: usize, steps: usize) -> Result<Vec<f32>> {
    let needed = steps.saturating_mul(4);
    let truncated = || Error::TruncatedRecord {
        record: "samples".to_string(),
        field: "counts".to_string(),
        offset,
        needed,
        available: buffer.len().saturating_sub(offset),
    };

    let mut input = offset
        .checked_add(needed)
        .and_then(|end| buffer.get(offset..end))
        .ok_or_else(truncated)?;
    repeat(steps, le_f32::<_, ContextError>)
        .parse_next(&mut input)
        .map_err(|_| truncated())
}

/// Walks the range headers only, returning the start offset of each of `count` ranges.
pub fn scan_range_offsets(buffer: &[u8], start: usize, count: usize) -> Result<Vec<usize>> {
    let header_len = required_field(&RANGE_HEADER, "header_len")?;
    let steps = required_field(&RANGE_HEADER, "steps")?;
    let sup_len = required_field(&RANGE_HEADER, "sup_len")?;
    let empty = Record::new(RANGE_HEADER.name());

    let read = |offset: usize, field: &FieldDescriptor| -> Result<usize> {
        let value = decode_field(buffer, offset, field, RANGE_HEADER.name(), &empty)?;
        Ok(value.as_u64().unwrap_or_default() as usize)
    };

    let mut offsets = Vec::with_capacity(count.min(1024));
    let mut cursor = start;
    for _ in 0..count {
        offsets.push(cursor);
        let range_header_len = read(cursor, header_len)?;
        check_header_len(cursor, range_header_len)?;
        cursor += range_header_len + read(cursor, sup_len)? + read(cursor, steps)? * 4;
    }
    Ok(offsets)
}

/// A range header must at least cover its own fields, so every range moves the cursor.
fn check_header_len(offset: usize, header_len: usize) -> Result<()> {
    let needed = RANGE_HEADER.byte_len();
    if header_len < needed {
        return Err(Error::TruncatedRecord {
            record: RANGE_HEADER.name().to_string(),
            field: "header_len".to_string(),
            offset,
            needed,
            available: header_len,
        });
    }
    Ok(())
}

fn peek_tag(buffer: &[u8], offset: usize) -> Result<u32> {
    let mut input = buffer.get(offset..).unwrap_or_default();
    le_u32::<_, ContextError>
        .parse_next(&mut input)
        .map_err(|_| Error::TruncatedRecord {
            record: "supplemental".to_string(),
            field: "type".to_string(),
            offset,
            needed: 4,
            available: buffer.len().saturating_sub(offset),
        })
}
