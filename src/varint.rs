//! CompactSize variable-length integers and fixed-width little-endian reads.

use crate::error::{AnnotationError, AnnotationResult};

const FIELD: &str = "compact size";

/// Decode the CompactSize integer starting at `offset`.
///
/// Returns the value and the number of bytes it occupies. Non-minimal
/// encodings are accepted as-is.
pub fn decode(buffer: &[u8], offset: usize) -> AnnotationResult<(u64, usize)> {
    let first = *buffer
        .get(offset)
        .ok_or_else(|| AnnotationError::truncated(FIELD, offset, 1, buffer.len()))?;

    let width = match first {
        0..=0xfc => return Ok((u64::from(first), 1)),
        0xfd => 2,
        0xfe => 4,
        0xff => 8,
    };

    let consumed = 1 + width;
    let payload = offset
        .checked_add(consumed)
        .and_then(|end| buffer.get(offset + 1..end))
        .ok_or_else(|| AnnotationError::truncated(FIELD, offset, consumed as u64, buffer.len()))?;

    let mut le = [0u8; 8];
    le[..width].copy_from_slice(payload);
    Ok((u64::from_le_bytes(le), consumed))
}

/// Read a 4-byte little-endian integer from a slice of exactly four bytes.
pub fn read_u32_le(bytes: &[u8]) -> u32 {
    let mut le = [0u8; 4];
    le.copy_from_slice(bytes);
    u32::from_le_bytes(le)
}

/// Read an 8-byte little-endian integer from a slice of exactly eight bytes.
pub fn read_u64_le(bytes: &[u8]) -> u64 {
    let mut le = [0u8; 8];
    le.copy_from_slice(bytes);
    u64::from_le_bytes(le)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_byte_values() {
        assert_eq!(decode(&[0x00], 0).unwrap(), (0, 1));
        assert_eq!(decode(&[0xfc], 0).unwrap(), (252, 1));
        assert_eq!(decode(&[0xaa, 0x01], 1).unwrap(), (1, 1));
    }

    #[test]
    fn test_prefixed_thresholds() {
        assert_eq!(decode(&[0xfd, 0x00, 0x01], 0).unwrap(), (256, 3));
        assert_eq!(decode(&[0xfd, 0xfd, 0x00], 0).unwrap(), (253, 3));
        assert_eq!(decode(&[0xfd, 0xff, 0xff], 0).unwrap(), (0xffff, 3));

        assert_eq!(
            decode(&[0xfe, 0x00, 0x00, 0x01, 0x00], 0).unwrap(),
            (0x1_0000, 5)
        );
        assert_eq!(
            decode(&[0xfe, 0xff, 0xff, 0xff, 0xff], 0).unwrap(),
            (0xffff_ffff, 5)
        );

        assert_eq!(
            decode(&[0xff, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00], 0).unwrap(),
            (0x1_0000_0000, 9)
        );
        assert_eq!(decode(&[0xff; 9], 0).unwrap(), (u64::MAX, 9));
    }

    #[test]
    fn test_non_minimal_encoding_is_reported_verbatim() {
        assert_eq!(decode(&[0xfd, 0x01, 0x00], 0).unwrap(), (1, 3));
    }

    #[test]
    fn test_truncated_input() {
        assert!(matches!(
            decode(&[], 0),
            Err(AnnotationError::TruncatedInput { needed: 1, .. })
        ));
        assert!(matches!(
            decode(&[0x01], 1),
            Err(AnnotationError::TruncatedInput { offset: 1, .. })
        ));
        assert!(matches!(
            decode(&[0xfd, 0x00], 0),
            Err(AnnotationError::TruncatedInput {
                needed: 3,
                available: 2,
                ..
            })
        ));
        assert!(decode(&[0xfe, 0x00, 0x00, 0x00], 0).is_err());
        assert!(decode(&[0xff, 0, 0, 0, 0, 0, 0, 0], 0).is_err());
    }

    #[test]
    fn test_fixed_width_reads() {
        assert_eq!(read_u32_le(&[0x01, 0x00, 0x00, 0x00]), 1);
        assert_eq!(read_u32_le(&[0xfd, 0xff, 0xff, 0xff]), 0xffff_fffd);
        assert_eq!(
            read_u64_le(&[0x88, 0x13, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
            5000
        );
    }
}
