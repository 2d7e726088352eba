use arbitrary::Arbitrary;
use ewasm_trace::{BuiltinCall, ExecutionEnd, InterpreterState};

/// Straight-line sequence of builtin calls, as an external interpreter would issue them.
#[derive(Arbitrary, Debug)]
pub struct BuiltinProgram {
    pub calls: Vec<BuiltinCall>,
}

impl BuiltinProgram {
    /// Evaluates the calls until one of them ends the run.
    pub fn run(&self, state: &mut InterpreterState) -> Option<ExecutionEnd> {
        self.calls.iter().find_map(|call| state.eval_call(call).err())
    }

    /// The same program with every builtin resolved again from its name.
    pub fn reparsed(&self) -> Self {
        let calls = self
            .calls
            .iter()
            .map(|call| {
                BuiltinCall::new(call.builtin().name(), call.arguments().to_vec())
                    .expect("builtin names resolve to themselves")
            })
            .collect();
        Self { calls }
    }
}
