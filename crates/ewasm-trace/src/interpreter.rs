use ewasm_trace_interface::Instruction;
use primitive_types::U256;
use tracing::{debug, trace};

use crate::{builtins::mock, Builtin, CropWidth, Environment, InterpreterState, Trap};

/// Gas reported by `eth.getGasLeft`.
const MOCKED_GAS_LEFT: u64 = 0x99;

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionEnd {
    /// `eth.finish` returned the contained data.
    Finished(Vec<u8>),
    /// `eth.revert` reverted with the contained data.
    Reverted(Vec<u8>),
    /// `eth.selfDestruct` was executed.
    SelfDestructed,
    /// A builtin trapped.
    Trapped(Trap),
    /// The trace reached [`Settings::max_trace_size`](crate::Settings).
    TraceLimitReached,
}

/// Evaluates builtins against an [`InterpreterState`].
///
/// Since this is meant for differential fuzzing, evaluation only models a single contract,
/// does no gas accounting and deliberately deviates from real semantics:
///
/// - Memory accesses larger than [`MEMORY_ACCESS_CEILING`](crate::MEMORY_ACCESS_CEILING)
///   are refused; reads yield placeholder values and writes are dropped.
/// - Block hashes, external balances, external code and object data are deterministic
///   functions of their arguments.
/// - Calls and contract creation are not executed, only recorded.
///
/// What matters is that equivalent executions produce the same trace and non-equivalent ones
/// most likely do not.
#[derive(Debug)]
pub struct BuiltinInterpreter<'a> {
    pub(crate) state: &'a mut InterpreterState,
}

impl<'a> BuiltinInterpreter<'a> {
    /// Borrows the state for evaluating builtins.
    pub fn new(state: &'a mut InterpreterState) -> Self {
        Self { state }
    }

    /// Evaluates `builtin` with the given arguments and returns its result.
    ///
    /// Builtins with an observable effect append exactly one record to the trace.
    /// Arguments of the native builtins are truncated to their low 64 bits.
    ///
    /// # Errors
    ///
    /// Returns how the run ended if `builtin` terminated it. The state is left as it was at
    /// the point of termination.
    ///
    /// # Panics
    ///
    /// Panics if the number of arguments does not match the arity of `builtin`. This means
    /// that the instruction stream is malformed.
    pub fn eval_builtin(
        &mut self,
        builtin: Builtin,
        arguments: &[U256],
    ) -> Result<U256, ExecutionEnd> {
        assert_eq!(
            arguments.len(),
            builtin.arity(),
            "wrong number of arguments for builtin {builtin}"
        );
        trace!(%builtin, ?arguments, "evaluating builtin");

        let arg: Vec<u64> = arguments.iter().map(U256::low_u64).collect();
        let result = self.dispatch(builtin, arguments, &arg);
        if let Err(end) = &result {
            debug!(%builtin, ?end, "execution ended");
        }
        result
    }

    fn dispatch(
        &mut self,
        builtin: Builtin,
        arguments: &[U256],
        arg: &[u64],
    ) -> Result<U256, ExecutionEnd> {
        use Builtin as B;

        Ok(match builtin {
            B::Nop | B::I32Drop | B::I64Drop => U256::zero(),
            B::Unreachable => {
                self.state.log_trace(Instruction::Invalid, vec![], vec![])?;
                return Err(ExecutionEnd::Trapped(Trap::Unreachable));
            }

            B::I32WrapI64 | B::I64ExtendI32U => (arg[0] & u64::from(u32::MAX)).into(),

            B::I64Add => arg[0].wrapping_add(arg[1]).into(),
            B::I64Sub => arg[0].wrapping_sub(arg[1]).into(),
            B::I64Mul => arg[0].wrapping_mul(arg[1]).into(),
            B::I64DivU => match arg[0].checked_div(arg[1]) {
                Some(quotient) => quotient.into(),
                None => return Err(self.trap(builtin, arguments, Trap::DivisionByZero)),
            },
            B::I64RemU => match arg[0].checked_rem(arg[1]) {
                Some(remainder) => remainder.into(),
                None => return Err(self.trap(builtin, arguments, Trap::DivisionByZero)),
            },
            B::I64And => (arg[0] & arg[1]).into(),
            B::I64Or => (arg[0] | arg[1]).into(),
            B::I64Xor => (arg[0] ^ arg[1]).into(),
            B::I64Shl => (arg[0] << (arg[1] % 64)).into(),
            B::I64ShrU => (arg[0] >> (arg[1] % 64)).into(),
            B::I64Rotl => arg[0].rotate_left(shift_amount(arg[1])).into(),
            B::I64Rotr => arg[0].rotate_right(shift_amount(arg[1])).into(),
            B::I64Eq => flag(arg[0] == arg[1]),
            B::I64Ne => flag(arg[0] != arg[1]),
            B::I64Eqz => flag(arg[0] == 0),
            B::I64LtU => flag(arg[0] < arg[1]),
            B::I64GtU => flag(arg[0] > arg[1]),
            B::I64LeU => flag(arg[0] <= arg[1]),
            B::I64GeU => flag(arg[0] >= arg[1]),
            B::I64Clz => arg[0].leading_zeros().into(),
            B::I64Ctz => arg[0].trailing_zeros().into(),
            B::I64Popcnt => arg[0].count_ones().into(),

            B::I64Load => {
                if self.access_memory(arg[0], 8) {
                    self.state.memory.read_word(arg[0]).into()
                } else {
                    U256::zero()
                }
            }
            B::I64Store => {
                if self.access_memory(arg[0], 8) {
                    self.state.memory.write_word(arg[0], arg[1]);
                }
                U256::zero()
            }
            B::I64Store8 | B::I32Store8 => {
                if self.access_memory(arg[0], 1) {
                    self.state.memory.write_byte(arg[0], arg[1].to_le_bytes()[0]);
                }
                U256::zero()
            }

            B::DataSize => mock::data_size(arguments[0]),
            B::DataOffset => mock::data_offset(arguments[0]),

            B::GetAddress => self.write_address(arg[0], self.env().address),
            B::GetExternalBalance => {
                let address = self.read_address(arg[0]);
                let balance = mock::external_balance(self.env(), address);
                self.write_u128(arg[1], balance)
            }
            B::GetBlockHash => match mock::block_hash(arg[0], self.env().block_number) {
                Some(hash) => self.write_u256(arg[1], hash, CropWidth::Full),
                None => U256::one(),
            },
            B::GetCallDataSize => self.env().calldata.len().into(),
            B::GetCaller => self.write_address(arg[0], self.env().caller),
            B::GetCallValue => self.write_u128(arg[0], self.env().call_value),
            B::GetCodeSize => self.env().code.len().into(),
            B::GetBlockCoinbase => self.write_address(arg[0], self.env().coinbase),
            B::GetBlockDifficulty => {
                self.write_u256(arg[0], self.env().difficulty, CropWidth::Full)
            }
            B::GetExternalCodeSize => {
                let address = self.read_address(arg[0]);
                mock::external_code_size(address).into()
            }
            B::GetGasLeft => MOCKED_GAS_LEFT.into(),
            B::GetBlockGasLimit => self.env().gas_limit.into(),
            B::GetTxGasPrice => self.write_u128(arg[0], self.env().gas_price),
            B::GetBlockNumber => self.env().block_number.into(),
            B::GetTxOrigin => self.write_address(arg[0], self.env().origin),
            B::GetReturnDataSize => self.env().return_data.len().into(),
            B::GetBlockTimestamp => self.env().timestamp.into(),

            B::CallDataCopy => self.call_data_copy(builtin, arguments, arg)?,
            B::CodeCopy => self.code_copy(arg),
            B::ExternalCodeCopy => self.external_code_copy(arg),
            B::ReturnDataCopy => self.return_data_copy(builtin, arguments, arg)?,

            B::StorageStore => self.storage_store(arg)?,
            B::StorageLoad => self.storage_load(arg),

            B::Call => self.call(Instruction::Call, arg)?,
            B::CallCode => self.call(Instruction::CallCode, arg)?,
            B::CallDelegate => self.call_without_value(Instruction::DelegateCall, arg)?,
            B::CallStatic => self.call_without_value(Instruction::StaticCall, arg)?,
            B::Create => self.create(arg)?,

            B::Log => self.log(builtin, arguments, arg)?,
            B::Finish => return Err(self.finish(arg)),
            B::Revert => return Err(self.revert(arg)),
            B::SelfDestruct => return Err(self.self_destruct(arg)),
        })
    }

    pub(crate) fn env(&self) -> &Environment {
        &self.state.environment
    }

    /// Records a trap of `builtin` and returns the resulting end of execution.
    pub(crate) fn trap(
        &mut self,
        builtin: Builtin,
        arguments: &[U256],
        trap: Trap,
    ) -> ExecutionEnd {
        match self
            .state
            .log_pseudo(builtin.name(), arguments.to_vec(), vec![])
        {
            Ok(()) => ExecutionEnd::Trapped(trap),
            Err(end) => end,
        }
    }
}

fn flag(value: bool) -> U256 {
    U256::from(u8::from(value))
}

#[allow(clippy::cast_possible_truncation)]
fn shift_amount(value: u64) -> u32 {
    (value % 64) as u32
}
