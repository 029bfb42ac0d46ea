//! 128-bit blocks.

use cipher::{consts::U16, generic_array::GenericArray};
use core::ops::{BitXor, BitXorAssign};
use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// A block of 128 bits
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Zeroize)]
pub struct Block([u8; 16]);

impl Block {
    /// The length of a block in bytes
    pub const LEN: usize = 16;
    /// A zero block
    pub const ZERO: Self = Self([0; 16]);

    /// Create a new block
    #[inline]
    pub fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Returns the byte representation of the block
    #[inline]
    pub fn to_bytes(self) -> [u8; 16] {
        self.0
    }

    /// Generate a random block using the provided RNG
    #[inline]
    pub fn random<R: Rng + CryptoRng + ?Sized>(rng: &mut R) -> Self {
        Self::new(rng.gen())
    }

    /// Creates a block encoding `n` in big-endian byte order.
    ///
    /// Used to build hash tweaks from gate and wire indices.
    #[inline]
    pub fn from_u128(n: u128) -> Self {
        Self(n.to_be_bytes())
    }

    /// Sets the least significant bit of the block
    #[inline]
    pub fn set_lsb(&mut self) {
        self.0[0] |= 1;
    }

    /// Returns the least significant bit of the block
    #[inline]
    pub fn lsb(&self) -> usize {
        ((self.0[0] & 1) == 1) as usize
    }
}

impl From<[u8; 16]> for Block {
    #[inline]
    fn from(bytes: [u8; 16]) -> Self {
        Block::new(bytes)
    }
}

impl From<Block> for GenericArray<u8, U16> {
    #[inline]
    fn from(b: Block) -> Self {
        b.0.into()
    }
}

impl AsRef<[u8]> for Block {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl BitXor for Block {
    type Output = Self;

    #[inline]
    fn bitxor(self, other: Self) -> Self::Output {
        Self(std::array::from_fn(|i| self.0[i] ^ other.0[i]))
    }
}

impl BitXorAssign for Block {
    #[inline(always)]
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = *self ^ rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_lsb() {
        let zero = [0; 16];
        let mut one = [0; 16];
        one[0] = 1;
        let mut three = [0; 16];
        three[0] = 3;

        let mut b = Block::new(zero);
        b.set_lsb();
        assert_eq!(Block::new(one), b);

        // no-op when the bit is already set
        let mut b = Block::new(three);
        b.set_lsb();
        assert_eq!(Block::new(three), b);
    }

    #[test]
    fn test_lsb() {
        let a = Block::new([0; 16]);
        assert_eq!(a.lsb(), 0);

        let mut one = [0; 16];
        one[0] = 1;
        assert_eq!(Block::new(one).lsb(), 1);

        let mut two = [0; 16];
        two[0] = 2;
        assert_eq!(Block::new(two).lsb(), 0);
    }

    #[test]
    fn test_xor_is_self_inverse() {
        use rand::SeedableRng;
        use rand_chacha::ChaCha12Rng;

        let mut rng = ChaCha12Rng::seed_from_u64(0);
        let a = Block::random(&mut rng);
        let b = Block::random(&mut rng);

        assert_eq!(a ^ b ^ b, a);
        assert_eq!(a ^ a, Block::ZERO);

        let mut c = a;
        c ^= b;
        assert_eq!(c, a ^ b);
    }

    #[test]
    fn test_from_u128_is_big_endian() {
        let b = Block::from_u128(1);
        assert_eq!(b.to_bytes()[15], 1);
        assert_eq!(b.lsb(), 0);
    }
}
