use serde::{Deserialize, Serialize};
use yao_core::{aes::FixedKeyAes, Block};

use crate::encoding::Label;

/// Key material for one row of a garbled table.
///
/// `pad` masks the output label, `check` lets the Evaluator detect a row
/// which was not encrypted under its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMaterial {
    /// One-time pad for the output label.
    pub pad: Block,
    /// Check value stored in the clear next to the masked label.
    pub check: Block,
}

/// Derives the key material for the row keyed by input labels `a` and `b`
/// of gate `gid`.
///
/// `k = H(t1, H(t0, a) ⊕ b)` where `H` is the fixed-key AES TCCR hash and the
/// tweaks `t0..t3` are unique to the gate, so rows can not be moved between
/// gates. The pad and the check value are `H(t2, k)` and `H(t3, k)`.
#[inline]
pub fn table_key(cipher: &FixedKeyAes, a: &Label, b: &Label, gid: usize) -> KeyMaterial {
    let base = (gid as u128) << 2;
    let [t0, t1, t2, t3] = std::array::from_fn(|i| Block::from_u128(base | i as u128));

    let k = cipher.tccr(t1, cipher.tccr(t0, a.to_inner()) ^ b.to_inner());

    KeyMaterial {
        pad: cipher.tccr(t2, k),
        check: cipher.tccr(t3, k),
    }
}

/// Returns the table row selected by the permute bits of the two input labels.
#[inline]
pub(crate) fn row_index(a: &Label, b: &Label) -> usize {
    2 * a.permute_bit() + b.permute_bit()
}

/// A single encrypted row of a garbled table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedRow {
    pub(crate) label: Block,
    pub(crate) check: Block,
}

impl EncryptedRow {
    pub(crate) fn encrypt(key: &KeyMaterial, label: Label) -> Self {
        Self {
            label: label.to_inner() ^ key.pad,
            check: key.check,
        }
    }

    /// Decrypts the row, returning `None` if it was not encrypted under `key`.
    pub(crate) fn decrypt(&self, key: &KeyMaterial) -> Option<Label> {
        (self.check == key.check).then(|| Label::new(self.label ^ key.pad))
    }

    /// Returns the row as an opaque byte blob.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes[..16].copy_from_slice(&self.label.to_bytes());
        bytes[16..].copy_from_slice(&self.check.to_bytes());
        bytes
    }
}

/// Garbled truth table of a non-linear gate.
///
/// Rows are indexed by `2 * pa + pb` where `pa` and `pb` are the permute
/// bits of the two input labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GarbledTable {
    gate: usize,
    rows: [EncryptedRow; 4],
}

impl GarbledTable {
    pub(crate) fn new(gate: usize, rows: [EncryptedRow; 4]) -> Self {
        Self { gate, rows }
    }

    /// Returns the id of the gate this table belongs to.
    pub fn gate(&self) -> usize {
        self.gate
    }

    /// Returns the rows of the table.
    pub fn rows(&self) -> &[EncryptedRow; 4] {
        &self.rows
    }

    #[cfg(test)]
    pub(crate) fn rows_mut(&mut self) -> &mut [EncryptedRow; 4] {
        &mut self.rows
    }
}
