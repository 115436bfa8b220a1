// Thin CLI driver around the library.
// All inference logic lives in src/lib.rs and its modules; this binary only
// parses two numbers, runs the compiled-in XOR model, and maps the typed
// result onto process exit codes:
//   0 - success (label printed to stdout)
//   1 - usage or parse error
//   2 - arity mismatch
//   3 - non-finite input
use std::process::ExitCode;

use parity_net::{xor_model, PredictError};

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 2 {
        eprintln!("usage: parity-net <a> <b>");
        return ExitCode::from(1);
    }

    let (a, b) = match (args[0].parse::<f64>(), args[1].parse::<f64>()) {
        (Ok(a), Ok(b)) => (a, b),
        _ => {
            eprintln!("usage: parity-net <a> <b>  (both arguments must be decimal numbers)");
            return ExitCode::from(1);
        }
    };

    match xor_model().predict(&[a, b]) {
        Ok(label) => {
            println!("{label}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("prediction failed: {err}");
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Exit-code convention owned by this driver, not by the core.
fn exit_code(err: &PredictError) -> u8 {
    match err {
        PredictError::ArityMismatch { .. } => 2,
        PredictError::NonFiniteInput { .. } => 3,
    }
}
