use ewasm_trace::{CropWidth, Memory, MEMORY_ACCESS_CEILING};
use pretty_assertions::assert_eq;
use primitive_types::U256;
use proptest::prelude::*;

fn width() -> impl Strategy<Value = CropWidth> {
    prop_oneof![
        Just(CropWidth::Half),
        Just(CropWidth::Address),
        Just(CropWidth::Full),
    ]
}

proptest! {
    #[test]
    fn small_accesses_grow_size(offset: u64, size in 0..=MEMORY_ACCESS_CEILING, previous: u64) {
        let mut memory = Memory::default();
        prop_assert!(memory.access(previous.into(), U256::zero()));

        prop_assert!(memory.access(offset.into(), size.into()));
        let end = U256::from(offset) + size;
        prop_assert_eq!(memory.size(), end.max(previous.into()));
    }

    #[test]
    fn large_accesses_are_refused(offset: u64, size in MEMORY_ACCESS_CEILING + 1..) {
        let mut memory = Memory::default();
        prop_assert!(memory.access(1.into(), 1.into()));
        prop_assert!(!memory.access(offset.into(), size.into()));
        prop_assert_eq!(memory.size(), U256::from(2));
    }

    #[test]
    fn size_saturates(offset: [u64; 4]) {
        let mut memory = Memory::default();
        let offset = U256(offset);
        prop_assert!(memory.access(offset, MEMORY_ACCESS_CEILING.into()));
        prop_assert_eq!(memory.size(), offset.saturating_add(MEMORY_ACCESS_CEILING.into()));
    }

    #[test]
    fn cropped_values_survive_memory(offset in 0..0x1_0000_u64, value: [u64; 4], width in width()) {
        let mut memory = Memory::default();
        let value = U256(value);
        memory.write_u256(offset, value, width);
        prop_assert_eq!(memory.read_u256(offset, width), value & width.max_value());
        prop_assert_eq!(memory.read_byte(offset + width.bytes() as u64), 0);
        if offset > 0 {
            prop_assert_eq!(memory.read_byte(offset - 1), 0);
        }
    }

    #[test]
    fn words_are_little_endian(offset: u64, value: u64) {
        let mut memory = Memory::default();
        memory.write_word(offset, value);
        prop_assert_eq!(memory.read_byte(offset), value.to_le_bytes()[0]);
        prop_assert_eq!(memory.read_byte(offset.wrapping_add(7)), value.to_le_bytes()[7]);
        prop_assert_eq!(memory.read_word(offset), value);
    }
}

#[test]
fn access_just_above_ceiling() {
    let mut memory = Memory::default();
    assert!(!memory.access(U256::zero(), 0x1_0000.into()));
    assert_eq!(memory.size(), U256::zero());
    assert!(memory.access(U256::zero(), 0xffff.into()));
    assert_eq!(memory.size(), 0xffff.into());
}

#[test]
fn wide_values_are_big_endian() {
    let mut memory = Memory::default();
    memory.write_u256(0, 0x0102.into(), CropWidth::Half);
    assert_eq!(memory.read(14, 2), [1, 2]);
    assert_eq!(memory.read_word(8), 0x0201_0000_0000_0000);
}
