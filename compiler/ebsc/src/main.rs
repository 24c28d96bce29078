//! EBS command-line tool.

use std::io::IsTerminal;
use std::path::Path;

use ebs_eval::stdout_handler;
use ebsc::commands::{compile_file, exec_file, lex_file, parse_file, run_file};
use ebsc::{init_tracing, DriverError, RunOptions};

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = args[1].as_str();
    let result = match command {
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        "version" | "--version" | "-v" => {
            println!("EBS {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        _ => dispatch(command, &args[2..]),
    };

    if let Err(error) = result {
        let color = std::io::stderr().is_terminal();
        let mut stderr = std::io::stderr().lock();
        // Nothing more to do if stderr itself is gone.
        let _ = error.report(&mut stderr, color);
        std::process::exit(1);
    }
}

fn dispatch(command: &str, rest: &[String]) -> Result<(), DriverError> {
    let mut options = RunOptions::from_env();
    let positional = options.apply_args(rest)?;

    match command {
        "run" => run_file(one_file(command, &positional)?, &options, stdout_handler()).map(drop),
        "exec" => exec_file(one_file(command, &positional)?, &options, stdout_handler()).map(drop),
        "parse" => parse_file(one_file(command, &positional)?, &mut std::io::stdout().lock()),
        "lex" => lex_file(one_file(command, &positional)?, &mut std::io::stdout().lock()),
        "compile" => {
            let written = compile_file(one_file(command, &positional)?, options.output.as_deref())?;
            println!("wrote {}", written.display());
            Ok(())
        }
        _ if Path::new(command)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("ebs")) =>
        {
            run_file(command, &options, stdout_handler()).map(drop)
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn one_file<'a>(command: &str, positional: &'a [String]) -> Result<&'a str, DriverError> {
    match positional {
        [path] => Ok(path.as_str()),
        [] => Err(DriverError::Usage(format!(
            "missing file path\nUsage: ebs {command} <file>"
        ))),
        _ => Err(DriverError::Usage(format!(
            "'{command}' takes one file, got {}",
            positional.len()
        ))),
    }
}

fn print_usage() {
    println!("EBS script engine");
    println!();
    println!("Usage: ebs <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.ebs>       Run a script");
    println!("  parse <file.ebs>     Parse and display block and statement info");
    println!("  lex <file.ebs>       Tokenize and display tokens");
    println!("  compile <file.ebs>   Write a compiled program image");
    println!("  exec <file.ebc>      Run a compiled program image");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  --max-depth <n>      Named block call depth limit (run, exec)");
    println!("  -o <path>            Output path (compile)");
    println!();
    println!("Environment:");
    println!("  RUST_LOG             Enable logging, e.g. RUST_LOG=ebs_eval=debug");
    println!("  EBS_LOG_TREE=1       Indented log output");
    println!("  EBS_MAX_CALL_DEPTH   Default for --max-depth");
    println!();
    println!("Examples:");
    println!("  ebs run main.ebs");
    println!("  ebs main.ebs --max-depth 64");
    println!("  ebs compile main.ebs -o main.ebc && ebs exec main.ebc");
}
