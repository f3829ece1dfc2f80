use crate::error::{Error, Result};
use crate::parser::field_parser::decode_record;
use crate::types::header::FileHeader;
use crate::types::layouts::{FILE_HEADER, SIGNATURE, SIGNATURE_LEN};

/// Checks that the 8-byte version field holds the RAW1.01 signature.
pub fn check_signature(buffer: &[u8]) -> Result<()> {
    let version = &buffer[..buffer.len().min(SIGNATURE_LEN)];
    if version.len() < SIGNATURE_LEN || !version.starts_with(SIGNATURE) {
        return Err(Error::InvalidFormat {
            found: String::from_utf8_lossy(version).into_owned(),
        });
    }
    Ok(())
}

/// Parses the 712-byte global header at the start of the file.
pub fn parse_header(buffer: &[u8]) -> Result<FileHeader> {
    check_signature(buffer)?;
    let record = decode_record(buffer, 0, &FILE_HEADER)?;
    Ok(FileHeader::try_from(record)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::layouts::FILE_HEADER_LEN;

    fn header_bytes() -> Vec<u8> {
        let mut bytes = vec![0u8; FILE_HEADER_LEN];
        bytes[..8].copy_from_slice(b"RAW1.01\0");
        bytes[12..16].copy_from_slice(&3u32.to_le_bytes());
        bytes[16..26].copy_from_slice(b"10/14/26\0\0");
        bytes[326..335].copy_from_slice(b"sample-7 ");
        bytes[608..610].copy_from_slice(b"Cu");
        bytes[616..624].copy_from_slice(&1.5418f64.to_le_bytes());
        bytes
    }

    #[test]
    fn parses_global_fields() {
        let header = parse_header(&header_bytes()).unwrap();
        assert_eq!(header.version, "RAW1.01");
        assert_eq!(header.range_count, 3);
        assert_eq!(header.measure_date, "10/14/26");
        assert_eq!(header.sample_id, "sample-7");
        assert_eq!(header.anode, "Cu");
        assert_eq!(header.alpha_average, 1.5418);
        assert_eq!(header.record.len(), FILE_HEADER.len());
    }

    #[test]
    fn rejects_other_signatures() {
        let mut bytes = header_bytes();
        bytes[..8].copy_from_slice(b"RAW2.00\0");
        assert!(matches!(parse_header(&bytes), Err(Error::InvalidFormat { .. })));
        assert!(matches!(check_signature(b"RAW1.0"), Err(Error::InvalidFormat { .. })));
        assert!(matches!(check_signature(b""), Err(Error::InvalidFormat { .. })));
    }

    #[test]
    fn short_header_is_truncated() {
        let bytes = header_bytes();
        assert!(matches!(
            parse_header(&bytes[..600]),
            Err(Error::TruncatedRecord { .. })
        ));
    }
}
