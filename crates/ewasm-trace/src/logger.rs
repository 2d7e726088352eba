use ewasm_trace_interface::{Instruction, TraceRecord};
use primitive_types::U256;
use tracing::debug;

use crate::{ExecutionEnd, InterpreterState};

/// Label of the record appended when the trace reaches [`Settings::max_trace_size`](crate::Settings).
pub const TRACE_LIMIT_LABEL: &str = "Trace size limit reached.";

impl InterpreterState {
    /// Appends a record tagged with a canonical instruction.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionEnd::TraceLimitReached`] if the trace is full after appending.
    pub fn log_trace(
        &mut self,
        instruction: Instruction,
        arguments: Vec<U256>,
        data: Vec<u8>,
    ) -> Result<(), ExecutionEnd> {
        self.append_record(TraceRecord::instruction(instruction, arguments, data))
    }

    /// Appends a record tagged with a pseudo-instruction label.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionEnd::TraceLimitReached`] if the trace is full after appending.
    pub fn log_pseudo(
        &mut self,
        label: impl Into<String>,
        arguments: Vec<U256>,
        data: Vec<u8>,
    ) -> Result<(), ExecutionEnd> {
        self.append_record(TraceRecord::pseudo(label, arguments, data))
    }

    fn append_record(&mut self, record: TraceRecord) -> Result<(), ExecutionEnd> {
        self.trace.push(record);

        let limit = self.settings.max_trace_size;
        if limit > 0 && self.trace.len() >= limit {
            self.trace
                .push(TraceRecord::pseudo(TRACE_LIMIT_LABEL, vec![], vec![]));
            debug!(limit, "trace size limit reached");
            return Err(ExecutionEnd::TraceLimitReached);
        }
        Ok(())
    }
}
