use std::{fs, process};

use clap::Parser;
use foxl::interpreter::{evaluator::core::Interpreter, parser::core::parse_source};

/// foxl runs FoxL scripts: small dynamically-typed programs with
/// variables, functions, arrays, console I/O, and file inclusion.
#[derive(Parser, Debug)]
#[command(name = "foxl", version, about, long_about = None)]
struct Args {
    /// Path to the script to run.
    script: String,

    /// Log evaluation errors and continue with the next top-level
    /// statement instead of stopping at the first one.
    #[arg(short, long)]
    keep_going: bool,
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(error) if error.use_stderr() => {
            // Usage problems exit 1; clap's default of 2 is not part of
            // the interpreter's contract.
            eprintln!("{error}");
            process::exit(1);
        },
        Err(help_or_version) => {
            print!("{help_or_version}");
            process::exit(0);
        },
    };

    let source = fs::read_to_string(&args.script).unwrap_or_else(|_| {
                                                     eprintln!("Error: Could not open file {}",
                                                               args.script);
                                                     process::exit(1);
                                                 });

    let statements = match parse_source(&source) {
        Ok(statements) => statements,
        Err(error) => {
            eprintln!("{error}");
            process::exit(1);
        },
    };

    let mut interpreter = Interpreter::new();
    let mut failed = false;

    for statement in &statements {
        if let Err(error) = interpreter.exec_toplevel(statement) {
            eprintln!("{error}");
            if !args.keep_going {
                process::exit(1);
            }
            failed = true;
        }
    }

    if failed {
        process::exit(1);
    }
}
