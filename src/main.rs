/*
 * ==========================================================================
 * LAZYSCRIPT - Bindings that remember how they were made.
 * ==========================================================================
 *
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 *
 * License:
 * This file is part of the LAZYSCRIPT programming language project.
 *
 * LAZYSCRIPT is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use lazyscript::{DiagnosticPrinter, InterpreterConfig, Program, Request, ScriptError, Value};

/// LAZYSCRIPT runs a script, then keeps its state open for interactive
/// commands.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Script to load and execute before the prompt opens.
    file: Option<PathBuf>,

    /// JSON file with interpreter limits.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Exit after running FILE instead of opening the prompt.
    #[arg(long)]
    no_repl: bool,
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Only initialize if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() {
    init_tracing();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => InterpreterConfig::from_json_file(path).unwrap_or_else(|e| {
            eprintln!("{}", DiagnosticPrinter::new("<config>", "").render(&e));
            process::exit(1);
        }),
        None => InterpreterConfig::default(),
    };

    let mut program = match &args.file {
        Some(path) => load(path, config),
        None => Program::with_config(Vec::new(), config),
    };

    if args.no_repl {
        return;
    }

    if let Err(e) = repl(&mut program) {
        eprintln!("I/O error: {}", e);
        process::exit(1);
    }
}

/// Parses and runs a script file, exiting on any failure.
fn load(path: &Path, config: InterpreterConfig) -> Program {
    let file_name = path.display().to_string();
    let source = fs::read_to_string(path).unwrap_or_else(|_| {
        eprintln!(
            "Failed to read the input file '{}'. Perhaps this file does not exist?",
            file_name
        );
        process::exit(1);
    });
    let printer = DiagnosticPrinter::new(file_name, source.as_str());

    let mut program = Program::from_source_with_config(&source, config).unwrap_or_else(|e| {
        printer.print(&e);
        process::exit(1);
    });

    if let Err(e) = program.execute() {
        printer.print(&e);
        process::exit(1);
    }

    program
}

fn repl(program: &mut Program) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        write!(stdout, ">>> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            writeln!(stdout)?;
            return Ok(());
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "exit" || line == "quit" {
            return Ok(());
        }

        match run_line(program, line) {
            Ok(Value::Void) => {}
            Ok(value) => writeln!(stdout, "<<< {}", value)?,
            Err(e) => eprintln!("{}", DiagnosticPrinter::new("<input>", line).render(&e)),
        }
    }
}

/// A command if the line is one, otherwise source code.
fn run_line(program: &mut Program, line: &str) -> Result<Value, ScriptError> {
    match Request::parse_command(line)? {
        Some(request) => program.execute_request(request),
        None => program.eval_source(line),
    }
}
