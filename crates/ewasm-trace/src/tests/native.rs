use primitive_types::U256;

use super::{eval, value};
use crate::{Builtin, ExecutionEnd, InterpreterState, Trap};

#[test]
fn arithmetic_wraps_at_64_bits() {
    let mut state = InterpreterState::default();
    assert_eq!(value(&mut state, Builtin::I64Add, &[u64::MAX, 2]), 1.into());
    assert_eq!(value(&mut state, Builtin::I64Sub, &[1, 2]), u64::MAX.into());
    assert_eq!(
        value(&mut state, Builtin::I64Mul, &[1 << 63, 2]),
        U256::zero()
    );
    assert_eq!(value(&mut state, Builtin::I64DivU, &[17, 5]), 3.into());
    assert_eq!(value(&mut state, Builtin::I64RemU, &[17, 5]), 2.into());
    assert!(state.trace().is_empty());
}

#[test]
fn wide_arguments_are_truncated() {
    let mut state = InterpreterState::default();
    let wide = (U256::one() << 128) + 5;
    assert_eq!(
        state.eval_builtin(Builtin::I64Add, &[wide, 1.into()]),
        Ok(6.into())
    );
    assert_eq!(
        state.eval_builtin(Builtin::I32WrapI64, &[U256::MAX]),
        Ok(u32::MAX.into())
    );
    assert_eq!(
        value(&mut state, Builtin::I64ExtendI32U, &[0x1_0000_0007]),
        7.into()
    );
}

#[test]
fn bitwise_operations() {
    let mut state = InterpreterState::default();
    assert_eq!(value(&mut state, Builtin::I64And, &[0b1100, 0b1010]), 0b1000.into());
    assert_eq!(value(&mut state, Builtin::I64Or, &[0b1100, 0b1010]), 0b1110.into());
    assert_eq!(value(&mut state, Builtin::I64Xor, &[0b1100, 0b1010]), 0b0110.into());
    assert_eq!(value(&mut state, Builtin::I64Shl, &[1, 63]), (1_u64 << 63).into());
    // Shift amounts are taken modulo 64.
    assert_eq!(value(&mut state, Builtin::I64Shl, &[1, 65]), 2.into());
    assert_eq!(value(&mut state, Builtin::I64ShrU, &[1 << 63, 127]), 1.into());
    assert_eq!(
        value(&mut state, Builtin::I64Rotl, &[(1 << 63) | 1, 1]),
        3.into()
    );
    assert_eq!(
        value(&mut state, Builtin::I64Rotr, &[3, 1]),
        ((1_u64 << 63) | 1).into()
    );
}

#[test]
fn comparisons_and_bit_counts() {
    let mut state = InterpreterState::default();
    let cases = [
        (Builtin::I64Eq, [3, 3], 1),
        (Builtin::I64Eq, [3, 4], 0),
        (Builtin::I64Ne, [3, 4], 1),
        (Builtin::I64LtU, [3, 4], 1),
        (Builtin::I64LtU, [4, 4], 0),
        (Builtin::I64GtU, [u64::MAX, 4], 1),
        (Builtin::I64LeU, [4, 4], 1),
        (Builtin::I64GeU, [3, 4], 0),
    ];
    for (builtin, args, expected) in cases {
        assert_eq!(value(&mut state, builtin, &args), expected.into(), "{builtin}");
    }

    assert_eq!(value(&mut state, Builtin::I64Eqz, &[0]), 1.into());
    assert_eq!(value(&mut state, Builtin::I64Eqz, &[9]), 0.into());
    assert_eq!(value(&mut state, Builtin::I64Clz, &[1]), 63.into());
    assert_eq!(value(&mut state, Builtin::I64Clz, &[0]), 64.into());
    assert_eq!(value(&mut state, Builtin::I64Ctz, &[8]), 3.into());
    assert_eq!(value(&mut state, Builtin::I64Popcnt, &[0xff00_ff]), 16.into());
}

#[test]
fn drops_and_nop_return_zero() {
    let mut state = InterpreterState::default();
    assert_eq!(value(&mut state, Builtin::Nop, &[]), U256::zero());
    assert_eq!(value(&mut state, Builtin::I32Drop, &[5]), U256::zero());
    assert_eq!(value(&mut state, Builtin::I64Drop, &[5]), U256::zero());
    assert!(state.trace().is_empty());
}

#[test]
fn division_by_zero_traps() {
    for builtin in [Builtin::I64DivU, Builtin::I64RemU] {
        let mut state = InterpreterState::default();
        assert_eq!(
            eval(&mut state, builtin, &[7, 0]),
            Err(ExecutionEnd::Trapped(Trap::DivisionByZero))
        );
        assert_eq!(
            state.trace().to_string(),
            format!("{}(0x7, 0x0)\n", builtin.name())
        );
    }
}

#[test]
fn loads_and_stores_are_little_endian() {
    let mut state = InterpreterState::default();
    value(&mut state, Builtin::I64Store, &[16, 0x0102_0304_0506_0708]);
    assert_eq!(state.memory().read(16, 8), [8, 7, 6, 5, 4, 3, 2, 1]);
    assert_eq!(state.memory().size(), 24.into());
    assert_eq!(
        value(&mut state, Builtin::I64Load, &[16]),
        0x0102_0304_0506_0708_u64.into()
    );

    value(&mut state, Builtin::I64Store8, &[17, 0xabcd]);
    value(&mut state, Builtin::I32Store8, &[40, 0x1ff]);
    assert_eq!(state.memory().read_byte(17), 0xcd);
    assert_eq!(state.memory().read_byte(40), 0xff);
    assert_eq!(state.memory().size(), 41.into());
    assert_eq!(
        value(&mut state, Builtin::I64Load, &[16]),
        0x0102_0304_0506_cd08_u64.into()
    );
    // Memory writes are not part of the trace.
    assert!(state.trace().is_empty());
}

#[test]
fn loads_from_unwritten_memory() {
    let mut state = InterpreterState::default();
    assert_eq!(value(&mut state, Builtin::I64Load, &[u64::MAX]), U256::zero());
    assert_eq!(state.memory().size(), U256::from(u64::MAX) + 8);
}

#[test]
#[should_panic(expected = "wrong number of arguments for builtin i64.add")]
fn arity_mismatch_panics() {
    let mut state = InterpreterState::default();
    let _ = state.eval_builtin(Builtin::I64Add, &[U256::one()]);
}
