use primitive_types::{H160, U256};
use tracing::debug;

use crate::{codec::address_into_u256, BuiltinInterpreter, CropWidth, Memory};

impl BuiltinInterpreter<'_> {
    /// Checks the access against the ceiling and grows the memory size.
    pub(crate) fn access_memory(&mut self, offset: u64, size: u64) -> bool {
        let allowed = self.state.memory.access(offset.into(), size.into());
        if !allowed {
            debug!(offset, size, "memory access refused");
        }
        allowed
    }

    /// Reads `len` bytes after checking the access. A refused access reads nothing.
    pub(crate) fn read_payload(&mut self, offset: u64, len: u64) -> Vec<u8> {
        if self.access_memory(offset, len) {
            self.state.memory.read(offset, checked_len(len))
        } else {
            vec![]
        }
    }

    pub(crate) fn read_u256(&mut self, offset: u64, width: CropWidth) -> U256 {
        if self.access_memory(offset, width.bytes() as u64) {
            self.state.memory.read_u256(offset, width)
        } else {
            U256::zero()
        }
    }

    pub(crate) fn read_u128(&mut self, offset: u64) -> U256 {
        self.read_u256(offset, CropWidth::Half)
    }

    pub(crate) fn read_address(&mut self, offset: u64) -> U256 {
        self.read_u256(offset, CropWidth::Address)
    }

    /// Writes `value` cropped to `width` and returns zero, the result of all writing
    /// environment builtins.
    pub(crate) fn write_u256(&mut self, offset: u64, value: U256, width: CropWidth) -> U256 {
        if self.access_memory(offset, width.bytes() as u64) {
            self.state.memory.write_u256(offset, value, width);
        }
        U256::zero()
    }

    pub(crate) fn write_u128(&mut self, offset: u64, value: impl Into<U256>) -> U256 {
        self.write_u256(offset, value.into(), CropWidth::Half)
    }

    pub(crate) fn write_address(&mut self, offset: u64, address: H160) -> U256 {
        self.write_u256(offset, address_into_u256(address), CropWidth::Address)
    }
}

/// Copies `len` bytes of `source` starting at `source_offset` to memory at `offset`.
/// `source` is treated as followed by infinitely many zero bytes.
///
/// The destination must have passed [`BuiltinInterpreter::access_memory()`].
pub(crate) fn copy_zero_extended(
    memory: &mut Memory,
    offset: u64,
    source: &[u8],
    source_offset: u64,
    len: u64,
) {
    let bytes = zero_extended(source, source_offset, checked_len(len));
    memory.write(offset, &bytes);
}

/// Converts a length that passed [`Memory::access()`].
#[allow(clippy::cast_possible_truncation)]
fn checked_len(len: u64) -> usize {
    debug_assert!(len <= crate::MEMORY_ACCESS_CEILING);
    len as usize
}

fn zero_extended(source: &[u8], offset: u64, len: usize) -> Vec<u8> {
    let mut result = vec![0; len];
    if let Some(available) = usize::try_from(offset)
        .ok()
        .and_then(|offset| source.get(offset..))
    {
        let copied = available.len().min(len);
        result[..copied].copy_from_slice(&available[..copied]);
    }
    result
}

/// Checks that `offset..offset + len` lies within a buffer of `buffer_len` bytes.
pub(crate) fn range_in_bounds(offset: u64, len: u64, buffer_len: usize) -> bool {
    offset
        .checked_add(len)
        .is_some_and(|end| end <= buffer_len as u64)
}
