use ewasm_trace::InterpreterState;
use ewasm_trace_afl_fuzz::BuiltinProgram;
use pretty_assertions::assert_eq;

fn main() {
    afl::fuzz!(|data: &[u8]| {
        if let Ok(program) = arbitrary::Unstructured::new(data).arbitrary::<BuiltinProgram>() {
            // Two runs of equivalent programs on fresh states must leave identical traces,
            // whether builtins are given directly or looked up by name.
            let mut state = InterpreterState::default();
            let end = program.run(&mut state);

            let mut reparsed_state = InterpreterState::default();
            let reparsed_end = program.reparsed().run(&mut reparsed_state);

            assert_eq!(end, reparsed_end);
            assert_eq!(state.trace(), reparsed_state.trace());
            assert_eq!(state.memory(), reparsed_state.memory());
            assert_eq!(state.storage(), reparsed_state.storage());
        }
    });
}
