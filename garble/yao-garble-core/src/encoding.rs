//! Wire labels and the free-XOR global offset.

use std::ops::{BitXor, BitXorAssign};

use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};
use yao_core::Block;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Global binary offset used by the Free-XOR technique to create wire label
/// pairs where W_1 = W_0 ^ Delta.
///
/// In accordance with the (p&p) Point-and-Permute technique, the LSB of Delta is set to 1 so
/// the permute bit of W_1 is the inverse of W_0.
///
/// Delta is a per-session secret. It is never serialized and is wiped when dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Delta(Block);

impl Delta {
    /// Creates new random Delta
    pub fn random<R: Rng + CryptoRng + ?Sized>(rng: &mut R) -> Self {
        let mut block = Block::random(rng);
        block.set_lsb();
        Self(block)
    }

    /// Returns the inner block
    #[inline]
    pub fn as_block(&self) -> &Block {
        &self.0
    }
}

impl std::fmt::Debug for Delta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Delta(..)")
    }
}

/// A 128-bit wire label.
///
/// The least significant bit is the permute bit, which selects the garbled
/// table row independently of the logical value the label stands for.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Zeroize)]
pub struct Label(Block);

impl Label {
    /// Length of a label in bytes
    pub const LEN: usize = Block::LEN;

    /// Creates a new label
    #[inline]
    pub fn new(value: Block) -> Self {
        Self(value)
    }

    /// Creates a new random label
    #[inline]
    pub fn random<R: Rng + CryptoRng + ?Sized>(rng: &mut R) -> Self {
        Self(Block::random(rng))
    }

    /// Returns inner block
    #[inline]
    pub fn to_inner(self) -> Block {
        self.0
    }

    /// Returns the permute bit of the label
    #[inline]
    pub fn permute_bit(&self) -> usize {
        self.0.lsb()
    }

    /// Returns the label bytes
    #[inline]
    pub fn to_bytes(self) -> [u8; 16] {
        self.0.to_bytes()
    }
}

impl From<[u8; 16]> for Label {
    fn from(bytes: [u8; 16]) -> Self {
        Self(Block::new(bytes))
    }
}

impl BitXor<Label> for Label {
    type Output = Label;

    #[inline]
    fn bitxor(self, rhs: Label) -> Self::Output {
        Label(self.0 ^ rhs.0)
    }
}

impl BitXor<&Delta> for Label {
    type Output = Label;

    #[inline]
    fn bitxor(self, rhs: &Delta) -> Self::Output {
        Label(self.0 ^ rhs.0)
    }
}

impl BitXor<Block> for Label {
    type Output = Label;

    #[inline]
    fn bitxor(self, rhs: Block) -> Self::Output {
        Label(self.0 ^ rhs)
    }
}

impl BitXorAssign<&Delta> for Label {
    #[inline]
    fn bitxor_assign(&mut self, rhs: &Delta) {
        self.0 ^= rhs.0;
    }
}

/// Both labels of a wire, indexed by the logical bit they encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Zeroize)]
pub struct LabelPair([Label; 2]);

impl LabelPair {
    /// Creates the pair `[low, low ^ delta]`.
    pub fn from_low(low: Label, delta: &Delta) -> Self {
        Self([low, low ^ delta])
    }

    /// Returns the label encoding `bit`.
    #[inline]
    pub fn select(&self, bit: bool) -> Label {
        self.0[bit as usize]
    }

    /// Returns the label encoding 0.
    pub fn low(&self) -> Label {
        self.0[0]
    }

    /// Returns the label encoding 1.
    pub fn high(&self) -> Label {
        self.0[1]
    }
}
