//! Fixed-width integer encodings on top of [`Memory`].
//!
//! Two byte orders coexist in the same memory: the wide environment builtins lay out
//! 128-, 160- and 256-bit values big-endian, while the native 64-bit loads and stores use
//! little-endian words.

use primitive_types::{H160, U256};

use crate::Memory;

/// Width to which a 256-bit value is cropped when stored in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum CropWidth {
    /// 16 bytes (128-bit values such as balances).
    Half,
    /// 20 bytes (addresses).
    Address,
    /// All 32 bytes.
    Full,
}

impl CropWidth {
    /// Number of bytes covered.
    pub const fn bytes(self) -> usize {
        match self {
            Self::Half => 16,
            Self::Address => 20,
            Self::Full => 32,
        }
    }

    /// Largest value representable with this width.
    pub fn max_value(self) -> U256 {
        U256::MAX >> (256 - 8 * self.bytes())
    }
}

impl Memory {
    /// Reads a big-endian value of the given width. The value occupies the low-order bytes of
    /// the result.
    pub fn read_u256(&self, offset: u64, width: CropWidth) -> U256 {
        U256::from_big_endian(&self.read(offset, width.bytes()))
    }

    /// Writes the low-order `width` bytes of `value` big-endian, overwriting exactly that many
    /// bytes.
    pub fn write_u256(&mut self, offset: u64, value: U256, width: CropWidth) {
        let mut bytes = [0; 32];
        value.to_big_endian(&mut bytes);
        self.write(offset, &bytes[32 - width.bytes()..]);
    }

    /// Reads an 8-byte little-endian word.
    pub fn read_word(&self, offset: u64) -> u64 {
        let mut bytes = [0; 8];
        bytes.copy_from_slice(&self.read(offset, 8));
        u64::from_le_bytes(bytes)
    }

    /// Writes an 8-byte little-endian word.
    pub fn write_word(&mut self, offset: u64, value: u64) {
        self.write(offset, &value.to_le_bytes());
    }
}

/// Places an address into the low-order bytes of a word.
pub fn address_into_u256(address: H160) -> U256 {
    let mut buffer = [0; 32];
    buffer[12..].copy_from_slice(address.as_bytes());
    U256::from_big_endian(&buffer)
}

/// Takes the low-order 20 bytes of a word as an address.
pub fn u256_into_address(value: U256) -> H160 {
    let mut buffer = [0; 32];
    value.to_big_endian(&mut buffer);
    H160::from_slice(&buffer[12..])
}
