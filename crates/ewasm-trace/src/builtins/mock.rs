//! Deterministic stand-ins for chain state the interpreter cannot see.
//!
//! Each mocked value is derived from a Keccak-256 digest of a domain tag and the queried
//! argument, so equal queries give equal answers on both sides of a comparison and
//! different queries almost certainly differ.

use primitive_types::U256;
use sha3::{Digest, Keccak256};

use crate::{codec::address_into_u256, Environment};

/// Mask applied to mocked sizes and offsets; keeps them small enough to be copied.
const SIZE_MASK: u64 = 0xfff;

/// Base of mocked block hashes.
const BLOCK_HASH_BASE: u64 = 0xaaaa_aaaa;

/// Base of mocked addresses of created contracts.
const CREATED_ADDRESS_BASE: u64 = 0xcc_cccc;

fn digest(domain: &[u8], value: U256, counter: Option<u64>) -> U256 {
    let mut bytes = [0; 32];
    value.to_big_endian(&mut bytes);
    let mut hasher = Keccak256::new();
    hasher.update(domain);
    hasher.update(bytes);
    if let Some(counter) = counter {
        hasher.update(counter.to_be_bytes());
    }
    U256::from_big_endian(&hasher.finalize())
}

/// Size of the code at `address`, in `0..4096`.
pub(crate) fn external_code_size(address: U256) -> u64 {
    digest(b"extcodesize", address, None).low_u64() & SIZE_MASK
}

/// Code at `address`: [`external_code_size()`] bytes of a Keccak-256 stream keyed by the
/// address.
pub(crate) fn external_code(address: U256) -> Vec<u8> {
    let len = usize::try_from(external_code_size(address)).unwrap_or_default();
    let mut code = Vec::with_capacity(len + 32);
    let mut counter = 0;
    while code.len() < len {
        let mut block = [0; 32];
        digest(b"extcode", address, Some(counter)).to_big_endian(&mut block);
        code.extend_from_slice(&block);
        counter += 1;
    }
    code.truncate(len);
    code
}

/// Balance of `address`. The executing contract reports its configured balance.
pub(crate) fn external_balance(environment: &Environment, address: U256) -> U256 {
    if address == address_into_u256(environment.address) {
        environment.balance.into()
    } else {
        digest(b"balance", address, None) & U256::from(u128::MAX)
    }
}

/// Hash of block `number`, or `None` unless it is one of the 256 blocks preceding
/// `current`.
///
/// In range the hash is `0xaaaaaaaa + number - current - 256`.
pub(crate) fn block_hash(number: u64, current: u64) -> Option<U256> {
    let (number, current) = (U256::from(number), U256::from(current));
    if number >= current || number + 256 < current {
        return None;
    }
    Some(U256::from(BLOCK_HASH_BASE) + number - current - 256)
}

/// Address of a contract created from `len` bytes of init code.
pub(crate) fn created_address(len: u64) -> U256 {
    U256::from(CREATED_ADDRESS_BASE) + len
}

pub(crate) fn data_size(name: U256) -> U256 {
    digest(b"datasize", name, None) & U256::from(SIZE_MASK)
}

pub(crate) fn data_offset(name: U256) -> U256 {
    digest(b"dataoffset", name, None) & U256::from(SIZE_MASK)
}
