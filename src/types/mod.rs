//! Type definitions for the RAW1.01 file format

pub mod header;
pub mod layouts;
pub mod range;
pub mod record;
pub mod schema;
pub mod supplemental;

// Re-export the main types for convenience
pub use header::FileHeader;
pub use range::{Range, RangeHeader};
pub use record::{DecodedField, FieldValue, Record};
pub use schema::{FieldDescriptor, FieldKind, HeaderSchema};
pub use supplemental::{AreaDetectorHeader, SupplementalHeader, SupplementalKind};
