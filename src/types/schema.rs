//! Fixed-offset record schemas
//!
//! A [`HeaderSchema`] is an immutable table of [`FieldDescriptor`]s. The tables used by
//! the decoder live in [`crate::types::layouts`] as statics; owned schemas can also be
//! built at runtime from struct-style type codes or by merging two schemas.

use crate::error::SchemaError;
use itertools::Itertools;
use std::borrow::Cow;
use std::collections::HashSet;
use std::str::FromStr;

/// Encoded type of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F32,
    F64,
    /// Fixed-length byte string, decoded as trimmed text.
    Bytes(usize),
    /// Text running to the end of the record. Its length is `length_field - offset`,
    /// so the named length field has to be decoded first.
    Trailing { length_field: &'static str },
}

impl FieldKind {
    /// Encoded width in bytes, `None` for trailing text.
    pub const fn width(&self) -> Option<usize> {
        match self {
            FieldKind::U16 | FieldKind::I16 => Some(2),
            FieldKind::U32 | FieldKind::I32 | FieldKind::F32 => Some(4),
            FieldKind::U64 | FieldKind::I64 | FieldKind::F64 => Some(8),
            FieldKind::Bytes(len) => Some(*len),
            FieldKind::Trailing { .. } => None,
        }
    }
}

/// Parses the little-endian struct codes used in instrument documentation
/// (`<I`, `<f`, `<d`, ...), a decimal byte count, or `??` for trailing text.
impl FromStr for FieldKind {
    type Err = SchemaError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let kind = match code {
            "<H" => FieldKind::U16,
            "<h" => FieldKind::I16,
            "<I" => FieldKind::U32,
            "<i" => FieldKind::I32,
            "<Q" => FieldKind::U64,
            "<q" => FieldKind::I64,
            "<f" => FieldKind::F32,
            "<d" => FieldKind::F64,
            "??" => FieldKind::Trailing {
                length_field: "length",
            },
            other => match other.parse::<usize>() {
                Ok(len) if len > 0 => FieldKind::Bytes(len),
                _ => return Err(SchemaError::UnknownFieldType(other.to_string())),
            },
        };
        Ok(kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Byte offset relative to the start of the record.
    pub offset: usize,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind, offset: usize) -> Self {
        Self {
            name,
            label,
            kind,
            offset,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSchema {
    name: Cow<'static, str>,
    fields: Cow<'static, [FieldDescriptor]>,
}

impl HeaderSchema {
    /// Wraps a static table. Field names are checked by [`HeaderSchema::validate`].
    pub const fn from_static(name: &'static str, fields: &'static [FieldDescriptor]) -> Self {
        Self {
            name: Cow::Borrowed(name),
            fields: Cow::Borrowed(fields),
        }
    }

    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Result<Self, SchemaError> {
        let schema = Self {
            name: Cow::Owned(name.into()),
            fields: Cow::Owned(fields),
        };
        schema.validate()?;
        Ok(schema)
    }

    /// Builds a schema from `(name, label, type code, offset)` rows.
    pub fn from_codes(
        name: impl Into<String>,
        rows: &[(&'static str, &'static str, &str, usize)],
    ) -> Result<Self, SchemaError> {
        let fields = rows
            .iter()
            .map(|&(field, label, code, offset)| {
                Ok(FieldDescriptor::new(field, label, code.parse()?, offset))
            })
            .collect::<Result<Vec<_>, SchemaError>>()?;
        Self::new(name, fields)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Fields ordered by byte offset. Ties keep declaration order.
    pub fn fields_by_offset(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().sorted_by_key(|field| field.offset)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn offset(&self, name: &str) -> Option<usize> {
        self.field(name).map(|field| field.offset)
    }

    pub fn label(&self, name: &str) -> Option<&'static str> {
        self.field(name).map(|field| field.label)
    }

    pub fn kind(&self, name: &str) -> Option<FieldKind> {
        self.field(name).map(|field| field.kind)
    }

    /// Bytes covered by the fixed-width fields.
    pub fn byte_len(&self) -> usize {
        self.fields
            .iter()
            .map(|field| field.offset + field.kind.width().unwrap_or(0))
            .max()
            .unwrap_or(0)
    }

    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::with_capacity(self.fields.len());
        for field in self.fields.iter() {
            if !seen.insert(field.name) {
                return Err(SchemaError::DuplicateField {
                    schema: self.name.to_string(),
                    field: field.name.to_string(),
                });
            }
        }

        let max_offset = self.fields.iter().map(|field| field.offset).max();
        for field in self.fields.iter() {
            if matches!(field.kind, FieldKind::Trailing { .. }) && Some(field.offset) != max_offset {
                return Err(SchemaError::TrailingFieldNotLast {
                    schema: self.name.to_string(),
                    field: field.name.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Combines two schemas into one, failing if they share a field name.
    pub fn merge(&self, other: &HeaderSchema) -> Result<HeaderSchema, SchemaError> {
        if let Some(field) = self.fields.iter().find(|field| other.field(field.name).is_some()) {
            return Err(SchemaError::DuplicateField {
                schema: format!("{}+{}", self.name, other.name),
                field: field.name.to_string(),
            });
        }
        let fields = self.fields.iter().chain(other.fields.iter()).copied().collect();
        HeaderSchema::new(format!("{}+{}", self.name, other.name), fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_codes_parse() {
        assert_eq!("<I".parse::<FieldKind>().unwrap(), FieldKind::U32);
        assert_eq!("<d".parse::<FieldKind>().unwrap(), FieldKind::F64);
        assert_eq!("72".parse::<FieldKind>().unwrap(), FieldKind::Bytes(72));
        assert!(matches!(
            "??".parse::<FieldKind>().unwrap(),
            FieldKind::Trailing { length_field: "length" }
        ));
    }

    #[test]
    fn unknown_type_code_is_schema_error() {
        assert_eq!(
            "<x".parse::<FieldKind>(),
            Err(SchemaError::UnknownFieldType("<x".into()))
        );
        assert!("0".parse::<FieldKind>().is_err());
    }

    #[test]
    fn iteration_follows_offsets() {
        let schema = HeaderSchema::from_codes(
            "test",
            &[("c", "C", "<f", 8), ("a", "A", "<I", 0), ("b", "B", "<I", 4)],
        )
        .unwrap();
        let names: Vec<_> = schema.fields_by_offset().map(|f| f.name).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(schema.byte_len(), 12);
        assert_eq!(schema.label("b"), Some("B"));
    }

    #[test]
    fn duplicate_names_rejected() {
        let err = HeaderSchema::from_codes("dup", &[("a", "A", "<I", 0), ("a", "A", "<I", 4)]);
        assert!(matches!(err, Err(SchemaError::DuplicateField { .. })));
    }

    #[test]
    fn merge_fails_on_collision() {
        let left = HeaderSchema::from_codes("left", &[("a", "A", "<I", 0)]).unwrap();
        let right = HeaderSchema::from_codes("right", &[("b", "B", "<I", 4)]).unwrap();
        let merged = left.merge(&right).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.offset("b"), Some(4));

        let clash = HeaderSchema::from_codes("clash", &[("a", "A", "<f", 8)]).unwrap();
        assert!(matches!(
            left.merge(&clash),
            Err(SchemaError::DuplicateField { field, .. }) if field == "a"
        ));
    }

    #[test]
    fn trailing_field_must_be_last() {
        let err = HeaderSchema::from_codes(
            "bad",
            &[("length", "L", "<I", 4), ("text", "T", "??", 8), ("after", "A", "<I", 12)],
        );
        assert!(matches!(err, Err(SchemaError::TrailingFieldNotLast { .. })));
    }
}
