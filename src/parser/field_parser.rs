//! Schema-driven field decoding

use crate::error::{Error, Result, SchemaError};
use crate::types::record::{DecodedField, FieldValue, Record};
use crate::types::schema::{FieldDescriptor, FieldKind, HeaderSchema};
use winnow::{
    Parser,
    binary::{le_f32, le_f64, le_i16, le_i32, le_i64, le_u16, le_u32, le_u64},
    error::ContextError,
};

/// Decodes one field of the record starting at `base`.
///
/// `decoded` holds the fields of the same record decoded so far; a trailing text field
/// reads its length from there.
pub fn decode_field(
    buffer: &[u8],
    base: usize,
    field: &FieldDescriptor,
    schema: &str,
    decoded: &Record,
) -> Result<FieldValue> {
    let start = base + field.offset;
    let width = match field.kind {
        FieldKind::Trailing { length_field } => trailing_len(field, length_field, schema, decoded)?,
        kind => kind.width().unwrap_or_default(),
    };

    let bytes = start
        .checked_add(width)
        .and_then(|end| buffer.get(start..end))
        .ok_or_else(|| Error::TruncatedRecord {
            record: schema.to_string(),
            field: field.name.to_string(),
            offset: start,
            needed: width,
            available: buffer.len().saturating_sub(start),
        })?;

    parse_value(field.kind, bytes).map_err(|_| Error::TruncatedRecord {
        record: schema.to_string(),
        field: field.name.to_string(),
        offset: start,
        needed: width,
        available: bytes.len(),
    })
}

/// Decodes every field of `schema` in offset order.
pub fn decode_record(buffer: &[u8], base: usize, schema: &HeaderSchema) -> Result<Record> {
    let mut record = Record::new(schema.name());
    for field in schema.fields_by_offset() {
        let value = decode_field(buffer, base, field, schema.name(), &record)?;
        record.push(DecodedField {
            name: field.name,
            label: field.label,
            offset: field.offset,
            value,
        });
    }
    Ok(record)
}

/// Looks up a field every layout of this kind must declare.
pub fn required_field<'a>(schema: &'a HeaderSchema, name: &str) -> Result<&'a FieldDescriptor> {
    schema.field(name).ok_or_else(|| {
        Error::Schema(SchemaError::MissingField {
            schema: schema.name().to_string(),
            field: name.to_string(),
        })
    })
}

fn trailing_len(
    field: &FieldDescriptor,
    length_field: &str,
    schema: &str,
    decoded: &Record,
) -> Result<usize> {
    let record_len = decoded.u32(length_field)? as usize;
    record_len
        .checked_sub(field.offset)
        .ok_or_else(|| Error::TruncatedRecord {
            record: schema.to_string(),
            field: field.name.to_string(),
            offset: field.offset,
            needed: field.offset,
            available: record_len,
        })
}

fn parse_value(kind: FieldKind, mut bytes: &[u8]) -> std::result::Result<FieldValue, ContextError> {
    let input = &mut bytes;
    let value = match kind {
        FieldKind::U16 => FieldValue::Unsigned(le_u16::<_, ContextError>.parse_next(input)?.into()),
        FieldKind::I16 => FieldValue::Signed(le_i16::<_, ContextError>.parse_next(input)?.into()),
        FieldKind::U32 => FieldValue::Unsigned(le_u32::<_, ContextError>.parse_next(input)?.into()),
        FieldKind::I32 => FieldValue::Signed(le_i32::<_, ContextError>.parse_next(input)?.into()),
        FieldKind::U64 => FieldValue::Unsigned(le_u64::<_, ContextError>.parse_next(input)?),
        FieldKind::I64 => FieldValue::Signed(le_i64::<_, ContextError>.parse_next(input)?),
        FieldKind::F32 => FieldValue::Float(le_f32::<_, ContextError>.parse_next(input)?.into()),
        FieldKind::F64 => FieldValue::Float(le_f64::<_, ContextError>.parse_next(input)?),
        FieldKind::Bytes(_) | FieldKind::Trailing { .. } => FieldValue::Text(decode_text(input)),
    };
    Ok(value)
}

/// Text with NUL padding and surrounding whitespace removed.
fn decode_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_matches(|c: char| c == '\0' || c.is_whitespace())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> HeaderSchema {
        HeaderSchema::from_codes(
            "test",
            &[
                ("type", "Record type", "<I", 0),
                ("length", "record length", "<I", 4),
                ("delta", "delta", "<h", 8),
                ("scale", "scale", "<d", 10),
                ("name", "name", "6", 18),
                ("note", "note", "??", 24),
            ],
        )
        .unwrap()
    }

    fn record_bytes(note: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&140u32.to_le_bytes());
        bytes.extend_from_slice(&((24 + note.len()) as u32).to_le_bytes());
        bytes.extend_from_slice(&(-3i16).to_le_bytes());
        bytes.extend_from_slice(&2.5f64.to_le_bytes());
        bytes.extend_from_slice(b" Cu\0\0\0");
        bytes.extend_from_slice(note);
        bytes
    }

    #[test]
    fn decodes_every_kind() {
        let mut buffer = vec![0xAA; 3];
        buffer.extend(record_bytes(b"peak list\0\0"));
        let record = decode_record(&buffer, 3, &schema()).unwrap();

        assert_eq!(record.get("type"), Some(&FieldValue::Unsigned(140)));
        assert_eq!(record.get("delta"), Some(&FieldValue::Signed(-3)));
        assert_eq!(record.f64("scale").unwrap(), 2.5);
        assert_eq!(record.text("name").unwrap(), "Cu");
        assert_eq!(record.text("note").unwrap(), "peak list");
        let names: Vec<_> = record.fields().iter().map(|f| f.name).collect();
        assert_eq!(names, ["type", "length", "delta", "scale", "name", "note"]);
    }

    #[test]
    fn reading_past_the_end_is_truncated() {
        let buffer = record_bytes(b"abc");
        let short = &buffer[..14];
        match decode_record(short, 0, &schema()) {
            Err(Error::TruncatedRecord { field, offset, needed, available, .. }) => {
                assert_eq!(field, "scale");
                assert_eq!(offset, 10);
                assert_eq!(needed, 8);
                assert_eq!(available, 4);
            }
            other => panic!("expected TruncatedRecord, got {other:?}"),
        }
    }

    #[test]
    fn trailing_length_beyond_buffer_is_truncated() {
        let mut buffer = record_bytes(b"abcdef");
        buffer.truncate(buffer.len() - 2);
        assert!(matches!(
            decode_record(&buffer, 0, &schema()),
            Err(Error::TruncatedRecord { field, .. }) if field == "note"
        ));
    }

    #[test]
    fn trailing_field_without_length_is_schema_error() {
        let schema = HeaderSchema::from_codes("bare", &[("note", "note", "??", 0)]).unwrap();
        assert!(matches!(
            decode_record(b"text", 0, &schema),
            Err(Error::Schema(SchemaError::MissingField { .. }))
        ));
    }
}
