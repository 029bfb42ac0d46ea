use yao_core::utils::{hex_to_bits, u64_to_bits};

use crate::error::SessionError;

/// A party's private input.
///
/// Numbers and hex strings are converted to bits least significant bit first
/// and zero-padded to the party's input size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Raw bits, which must match the input size exactly.
    Bits(Vec<bool>),
    /// An unsigned number.
    Number(u64),
    /// A big-endian hex string, with or without `0x` prefix.
    Hex(String),
}

impl From<Vec<bool>> for Input {
    fn from(bits: Vec<bool>) -> Self {
        Input::Bits(bits)
    }
}

impl From<&[bool]> for Input {
    fn from(bits: &[bool]) -> Self {
        Input::Bits(bits.to_vec())
    }
}

impl From<u64> for Input {
    fn from(n: u64) -> Self {
        Input::Number(n)
    }
}

impl Input {
    /// Converts the input into exactly `size` bits.
    pub(crate) fn into_bits(self, size: usize) -> Result<Vec<bool>, SessionError> {
        let mut bits = match self {
            Input::Bits(bits) => {
                if bits.len() != size {
                    return Err(SessionError::LengthMismatch {
                        what: "input",
                        expected: size,
                        actual: bits.len(),
                    });
                }
                return Ok(bits);
            }
            Input::Number(n) => u64_to_bits(n),
            Input::Hex(s) => hex_to_bits(&s)?,
        };

        // High zero bits beyond the input size carry no information.
        let significant = bits.iter().rposition(|bit| *bit).map_or(0, |pos| pos + 1);
        if significant > size {
            return Err(SessionError::LengthMismatch {
                what: "input",
                expected: size,
                actual: significant,
            });
        }

        bits.resize(size, false);
        Ok(bits)
    }
}
