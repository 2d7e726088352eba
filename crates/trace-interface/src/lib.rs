//! # EWasm Trace Interface
//!
//! This crate defines the execution trace produced by the EWasm builtin interpreter.
//! The trace is the artifact a differential fuzzer compares: two runs over equivalent
//! programs must produce identical traces, while runs over non-equivalent programs
//! should diverge.
//!
//! A [`Trace`] is an ordered list of [`TraceRecord`]s. Each record is tagged either with a
//! canonical [`Instruction`] or with a free-form pseudo-instruction label, and carries the
//! arguments of the operation together with an optional data payload.
//!
//! ## Why is this a separate crate?
//!
//! The comparator only needs to read traces. Keeping the record types apart from the
//! interpreter lets it depend on a crate that changes only when the trace format does.
//! Any change to how records are rendered changes trace compatibility, so it must be
//! versioned together with the comparator.
//!
//! ```
//! use ewasm_trace_interface::{Instruction, Trace, TraceRecord};
//! use primitive_types::U256;
//!
//! let mut trace = Trace::default();
//! trace.push(TraceRecord::instruction(
//!     Instruction::SStore,
//!     vec![U256::from(1), U256::from(0xff)],
//!     vec![],
//! ));
//! trace.push(TraceRecord::pseudo("i64.div_u", vec![U256::from(7), U256::zero()], vec![]));
//!
//! assert_eq!(trace.to_string(), "SSTORE(0x1, 0xff)\ni64.div_u(0x7, 0x0)\n");
//! ```

pub use self::{instruction::*, trace::*};

mod instruction;
mod trace;
