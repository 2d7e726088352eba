use std::{collections::BTreeMap, fmt};

use ewasm_trace_interface::Trace;
use primitive_types::{H160, U256};

use crate::{memory::ROW_SIZE, Builtin, BuiltinCall, BuiltinInterpreter, ExecutionEnd, Memory};

/// Mocked execution environment queried by the `eth.*` builtins.
///
/// None of these values are consulted from a real chain; they only need to be equal on both
/// sides of a differential comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// Address of the executing contract.
    pub address: H160,
    /// Caller of the executing contract.
    pub caller: H160,
    /// Transaction origin.
    pub origin: H160,
    /// Block beneficiary.
    pub coinbase: H160,
    /// Balance of the executing contract.
    pub balance: u128,
    /// Value sent with the call.
    pub call_value: u128,
    /// Transaction gas price.
    pub gas_price: u128,
    /// Block difficulty.
    pub difficulty: U256,
    /// Block gas limit.
    pub gas_limit: u64,
    /// Current block number.
    pub block_number: u64,
    /// Current block timestamp.
    pub timestamp: u64,
    /// Input data of the call.
    pub calldata: Vec<u8>,
    /// Code of the executing contract.
    pub code: Vec<u8>,
    /// Return data of the last call.
    pub return_data: Vec<u8>,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            address: H160::from_low_u64_be(0x1111_1111),
            balance: 0x2222_2222,
            origin: H160::from_low_u64_be(0x3333_3333),
            caller: H160::from_low_u64_be(0x4444_4444),
            call_value: 0x5555_5555,
            gas_price: 0x6666_6666,
            coinbase: H160::from_low_u64_be(0x7777_7777),
            timestamp: 0x8888_8888,
            block_number: 1024,
            difficulty: U256::from(0x0999_9999),
            gas_limit: 4_000_000,
            calldata: vec![],
            code: vec![],
            return_data: vec![0; 32],
        }
    }
}

/// [`InterpreterState`] settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Number of trace records after which the run is stopped. Zero means unlimited.
    pub max_trace_size: usize,
}

/// Interpreter context of a single run: memory, storage and the trace.
///
/// The surrounding interpreter owns the state and lends it to one builtin evaluation at a
/// time. States must not be shared between runs; call [`reset()`](Self::reset) or create a
/// new one instead.
#[derive(Debug, Clone, Default)]
pub struct InterpreterState {
    pub(crate) memory: Memory,
    pub(crate) storage: BTreeMap<U256, U256>,
    pub(crate) trace: Trace,
    pub(crate) environment: Environment,
    pub(crate) settings: Settings,
}

impl InterpreterState {
    /// Creates a fresh state for one run.
    pub fn new(environment: Environment, settings: Settings) -> Self {
        Self {
            memory: Memory::default(),
            storage: BTreeMap::new(),
            trace: Trace::default(),
            environment,
            settings,
        }
    }

    /// Evaluates a single builtin. See [`BuiltinInterpreter::eval_builtin()`].
    ///
    /// # Errors
    ///
    /// Returns how the run ended if the builtin terminated it.
    ///
    /// # Panics
    ///
    /// Panics if the number of arguments does not match the arity of `builtin`.
    pub fn eval_builtin(
        &mut self,
        builtin: Builtin,
        arguments: &[U256],
    ) -> Result<U256, ExecutionEnd> {
        BuiltinInterpreter::new(self).eval_builtin(builtin, arguments)
    }

    /// Evaluates a validated builtin call.
    ///
    /// # Errors
    ///
    /// Returns how the run ended if the builtin terminated it.
    pub fn eval_call(&mut self, call: &BuiltinCall) -> Result<U256, ExecutionEnd> {
        self.eval_builtin(call.builtin(), call.arguments())
    }

    /// Memory of the run.
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Mutable access to memory, e.g. for the surrounding interpreter's own loads and stores.
    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// Contract storage written by the run.
    pub fn storage(&self) -> &BTreeMap<U256, U256> {
        &self.storage
    }

    /// Trace recorded so far.
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Mocked environment.
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Settings of the run.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Clears memory, storage and the trace so the state can be used for another run.
    pub fn reset(&mut self) {
        self.memory.clear();
        self.storage.clear();
        self.trace.clear();
    }

    /// Renders the trace followed by non-zero memory and storage.
    pub fn dump(&self) -> StateDump<'_> {
        StateDump(self)
    }
}

/// Human-readable dump of an [`InterpreterState`], created by [`InterpreterState::dump()`].
#[derive(Debug)]
pub struct StateDump<'a>(&'a InterpreterState);

impl fmt::Display for StateDump<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        writeln!(formatter, "Trace:")?;
        for record in &state.trace {
            writeln!(formatter, "  {record}")?;
        }
        writeln!(formatter, "Memory dump:")?;
        for (offset, row) in state.memory.nonzero_rows() {
            write!(formatter, "  {offset:#x}: ")?;
            debug_assert_eq!(row.len(), ROW_SIZE);
            for byte in row {
                write!(formatter, "{byte:02x}")?;
            }
            writeln!(formatter)?;
        }
        writeln!(formatter, "Storage dump:")?;
        for (key, value) in &state.storage {
            writeln!(formatter, "  {key:#x}: {value:#x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_can_move_between_threads() {
        fn assert_send<T: Send>() {}
        assert_send::<InterpreterState>();
    }

    #[test]
    fn default_environment_is_distinct() {
        let environment = Environment::default();
        let addresses = [
            environment.address,
            environment.caller,
            environment.origin,
            environment.coinbase,
        ];
        for (i, address) in addresses.iter().enumerate() {
            assert!(!address.is_zero());
            assert!(!addresses[i + 1..].contains(address));
        }
    }

    #[test]
    fn eval_call_matches_eval_builtin() {
        let call = BuiltinCall::new("i64.rotl", vec![1.into(), 4.into()]).unwrap();
        let mut state = InterpreterState::default();
        assert_eq!(state.eval_call(&call), Ok(16.into()));
        assert_eq!(
            state.eval_builtin(Builtin::I64Rotl, call.arguments()),
            Ok(16.into())
        );
    }
}
