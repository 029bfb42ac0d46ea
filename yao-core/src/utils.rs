//! Bit, byte and hex conversions.
//!
//! Bit vectors are least-significant-bit first throughout: index 0 holds the
//! bit of weight 1.

/// Errors that can occur while converting between encodings.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum ConversionError {
    #[error("invalid hex string: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Converts a `u64` into its bits, LSB first, without trailing zeros.
pub fn u64_to_bits(value: u64) -> Vec<bool> {
    let len = (u64::BITS - value.leading_zeros()) as usize;
    (0..len).map(|i| (value >> i) & 1 == 1).collect()
}

/// Converts a hex string into bits, LSB first.
///
/// The string is read as one big-endian number, so the last hex digit holds
/// the lowest four bits. An optional `0x` prefix and an odd number of digits
/// are accepted.
pub fn hex_to_bits(s: &str) -> Result<Vec<bool>, ConversionError> {
    let s = s.trim();
    let s = s.strip_prefix("0x").unwrap_or(s);
    let padded;
    let s = if s.len() % 2 == 1 {
        padded = format!("0{s}");
        padded.as_str()
    } else {
        s
    };

    let bytes = hex::decode(s)?;
    Ok(bytes
        .iter()
        .rev()
        .flat_map(|byte| (0..8).map(move |i| (byte >> i) & 1 == 1))
        .collect())
}

/// Converts bits, LSB first, into a big-endian hex string.
pub fn bits_to_hex(bits: &[bool]) -> String {
    let mut bytes = bits_to_bytes(bits);
    bytes.reverse();
    hex::encode(bytes)
}

/// Packs bits, LSB first, into bytes. The first byte holds bits `0..8`.
pub fn bits_to_bytes(bits: &[bool]) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |acc, (i, bit)| acc | ((*bit as u8) << i))
        })
        .collect()
}

/// Unpacks bytes into bits, LSB first.
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<bool> {
    bytes
        .iter()
        .flat_map(|byte| (0..8).map(move |i| (byte >> i) & 1 == 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, vec![])]
    #[case(1, vec![true])]
    #[case(6, vec![false, true, true])]
    fn test_u64_to_bits(#[case] value: u64, #[case] expected: Vec<bool>) {
        assert_eq!(u64_to_bits(value), expected);
    }

    #[test]
    fn test_hex_to_bits() {
        let bits = hex_to_bits("a").unwrap();
        assert_eq!(bits, vec![false, true, false, true, false, false, false, false]);

        let bits = hex_to_bits("0x0100").unwrap();
        assert_eq!(bits.len(), 16);
        assert!(bits[8]);
        assert_eq!(bits.iter().filter(|b| **b).count(), 1);
    }

    #[test]
    fn test_hex_to_bits_rejects_garbage() {
        assert!(hex_to_bits("zz").is_err());
    }

    #[test]
    fn test_bits_to_hex() {
        assert_eq!(bits_to_hex(&hex_to_bits("beef").unwrap()), "beef");
        assert_eq!(bits_to_hex(&[true, false, true]), "05");
    }

    #[test]
    fn test_bytes_bits() {
        let bits = bytes_to_bits(&[0x81, 0x02]);
        assert!(bits[0] && bits[7] && bits[9]);
        assert_eq!(bits_to_bytes(&bits), vec![0x81, 0x02]);
    }
}
