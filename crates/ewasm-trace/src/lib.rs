//! # EWasm builtin interpreter
//!
//! Evaluates the builtins of an EWasm-flavoured instruction set against a single
//! [`InterpreterState`] and records every observable operation in its [`Trace`].
//!
//! The interpreter is driven by an external interpreter that owns control flow and calls
//! [`InterpreterState::eval_builtin()`] once per builtin instruction. It is meant for
//! differential fuzzing: the recorded trace, not the results alone, is compared between two
//! independently produced interpretations of the same program.
//!
//! ```
//! use ewasm_trace::{Builtin, ExecutionEnd, InterpreterState};
//! use primitive_types::U256;
//!
//! let mut state = InterpreterState::default();
//! state.eval_builtin(Builtin::I64Store, &[U256::zero(), 0x2a.into()]).unwrap();
//! let end = state.eval_builtin(Builtin::Finish, &[U256::zero(), 8.into()]);
//!
//! assert_eq!(end, Err(ExecutionEnd::Finished(vec![0x2a, 0, 0, 0, 0, 0, 0, 0])));
//! assert_eq!(state.trace().to_string(), "RETURN() [2a00000000000000]\n");
//! ```

pub use ewasm_trace_interface::{Instruction, Trace, TraceRecord, TraceTag};

pub use self::{
    builtin::{Builtin, BuiltinCall},
    codec::{address_into_u256, u256_into_address, CropWidth},
    error::{BuiltinError, Trap},
    interpreter::{BuiltinInterpreter, ExecutionEnd},
    logger::TRACE_LIMIT_LABEL,
    memory::{Memory, MEMORY_ACCESS_CEILING},
    state::{Environment, InterpreterState, Settings, StateDump},
};

mod builtin;
mod builtins;
mod codec;
mod error;
mod interpreter;
mod logger;
mod memory;
mod state;
#[cfg(test)]
mod tests;
