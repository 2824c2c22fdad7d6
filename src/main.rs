mod completer;
mod io;

use clap::{Arg, Command};
use completer::EnvHelper;
use io::{LineReader, ReplInput};
use lisp_interpreter::errors::{Error, ErrorKind, Result};
use lisp_interpreter::lexer::paren_balance;
use lisp_interpreter::{render, Interpreter, Parser};
use rustyline::error::ReadlineError;
use tracing::Level;

fn main() {
    let matches = Command::new("lisp")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Interactive evaluator for a small Lisp dialect")
        .arg(
            Arg::new("eval")
                .short('e')
                .long("eval")
                .value_name("EXPR")
                .takes_value(true)
                .multiple_occurrences(true)
                .help("Evaluate EXPR, print the results and exit"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .multiple_occurrences(true)
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)"),
        )
        .arg(
            Arg::new("prompt")
                .long("prompt")
                .value_name("TEXT")
                .takes_value(true)
                .default_value(">> ")
                .help("Prompt shown by the interactive loop"),
        )
        .get_matches();

    init_logging(matches.occurrences_of("verbose"));

    let interpreter = Interpreter::new();

    if let Some(sources) = matches.values_of("eval") {
        let mut failed = false;
        for src in sources {
            if let Err(e) = eval_and_print(&interpreter, src) {
                report_error(&e);
                failed = true;
            }
        }
        std::process::exit(if failed { 1 } else { 0 });
    }

    repl(&interpreter, matches.value_of("prompt").unwrap_or(">> "));
}

fn init_logging(verbosity: u64) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn repl(interpreter: &Interpreter, prompt: &str) {
    let helper = EnvHelper::new(interpreter.global().downgrade());
    let mut input = ReplInput::new(prompt, helper);
    let mut source = String::new();

    loop {
        input.set_pending(!source.is_empty());
        match input.read_line() {
            Ok(line) => source.push_str(&line),
            Err(e) => match e.kind() {
                ErrorKind::ReadlineError(ReadlineError::Interrupted) => {
                    source.clear();
                    continue;
                }
                ErrorKind::ReadlineError(ReadlineError::Eof) => break,
                _ => {
                    report_error(&e);
                    break;
                }
            },
        }

        if source.trim().is_empty() {
            source.clear();
            continue;
        }

        if paren_balance(&source) > 0 {
            continue;
        }

        if let Err(e) = eval_and_print(interpreter, &source) {
            report_error(&e);
        }
        source.clear();
    }
    println!();
}

/// evaluate all top-level forms in `src`, printing each result
fn eval_and_print(interpreter: &Interpreter, src: &str) -> Result<()> {
    for expr in Parser::new(src) {
        let value = interpreter.eval(&expr?)?;
        println!("{}", render(&value));
    }
    Ok(())
}

fn report_error(e: &Error) {
    tracing::debug!(error = ?e.kind(), "evaluation failed");
    eprintln!("{}", e);
}
