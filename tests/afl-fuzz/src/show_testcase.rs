use std::{env, fs};

use anyhow::Context as _;
use ewasm_trace::InterpreterState;
use ewasm_trace_afl_fuzz::BuiltinProgram;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ewasm_trace=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let filename = env::args()
        .nth(1)
        .context("Please provide the test case to show as argument.")?;
    let bytes = fs::read(&filename).with_context(|| format!("Failed to read {filename}"))?;

    let program: BuiltinProgram = arbitrary::Unstructured::new(&bytes)
        .arbitrary()
        .context("Test case does not decode to a program")?;

    for call in &program.calls {
        println!("{call}");
    }
    println!();

    let mut state = InterpreterState::default();
    match program.run(&mut state) {
        Some(end) => println!("Execution ended: {end:?}"),
        None => println!("Execution did not end"),
    }
    print!("{}", state.dump());
    Ok(())
}
