use primitive_types::U256;

use crate::{Builtin, ExecutionEnd, InterpreterState};

mod native;

/// Evaluates `builtin` with small arguments.
fn eval(state: &mut InterpreterState, builtin: Builtin, args: &[u64]) -> Result<U256, ExecutionEnd> {
    let args: Vec<U256> = args.iter().copied().map(U256::from).collect();
    state.eval_builtin(builtin, &args)
}

/// Evaluates a builtin that is expected not to end the run.
fn value(state: &mut InterpreterState, builtin: Builtin, args: &[u64]) -> U256 {
    eval(state, builtin, args).unwrap_or_else(|end| panic!("{builtin} ended execution: {end:?}"))
}
