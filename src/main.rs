// std imports
use std::io::{Read, stdin};
use std::path::PathBuf;
use std::process::exit;
// library imports
use clap::{Parser, Subcommand};
use indoc::indoc;
use thiserror::Error;
// our imports
use parcomb::lex::CharLexer;
use parcomb::{arith, bindings, json, parse};

const USAGE: &str = indoc! {r#"
    EXAMPLES:
        parcomb json data.json
        echo '{"a": [1, 2.5]}' | parcomb json -
        parcomb math "(1 + 1) * 5" "2 + 3 + 4"
        parcomb bind x = true y = false

    `json` reads a JSON document from a file, or from stdin when the file is `-` or
    missing, and prints it back in canonical form. `math` parses and evaluates each
    expression. `bind` parses a list of `name = true|false` bindings.
"#};

#[derive(Parser)]
#[command(name = "parcomb")]
#[command(about = "Parse JSON, arithmetic and bindings with a combinator engine")]
#[command(after_help = USAGE)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a JSON document and print it in canonical form
    Json {
        /// Path to the document, or `-` for stdin
        file: Option<PathBuf>,
        /// Accept a document followed by other input, and warn about it
        #[arg(long)]
        allow_trailing: bool,
    },
    /// Parse and evaluate arithmetic expressions
    Math {
        #[arg(required = true)]
        exprs: Vec<String>,
    },
    /// Parse `name = true|false` bindings
    Bind {
        #[arg(required = true)]
        text: Vec<String>,
    },
}

#[derive(Debug, Error)]
enum Error {
    #[error("{0}")]
    Parse(#[from] parse::Error),
    #[error("{0}")]
    Eval(#[from] arith::EvalError),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

type Result<T, E = Error> = std::result::Result<T, E>;

fn read_input(file: Option<PathBuf>) -> Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut text = String::new();
            stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn run_json(file: Option<PathBuf>, allow_trailing: bool) -> Result<()> {
    let text = read_input(file)?;
    if !allow_trailing {
        println!("{}", json::parse(&text)?);
        return Ok(());
    }
    let parsed = parse::parse_prefix(&json::value(), &CharLexer, &text)?;
    if let Some(first) = parsed.rest.first() {
        eprintln!(
            "Warning: ignoring {} tokens after the document, starting with '{first}'",
            parsed.rest.len()
        );
    }
    println!("{}", parsed.value);
    Ok(())
}

fn run_math(expr: &str) -> Result<()> {
    let expr = arith::parse(expr)?;
    let value = expr.eval()?;
    println!("{expr} = {value}");
    Ok(())
}

fn run_bind(text: &str) -> Result<()> {
    for binding in bindings::parse(text)? {
        println!("{binding}");
    }
    Ok(())
}

fn log_error<T, E: std::fmt::Display>(res: Result<T, E>) -> Option<T> {
    match res {
        Ok(value) => Some(value),
        Err(err) => {
            eprintln!("Error: {err}");
            None
        }
    }
}

fn handle_error<T, E: std::fmt::Display>(res: Result<T, E>) -> T {
    match res {
        Ok(value) => value,
        Err(err) => {
            eprintln!("Error: {err}");
            exit(1);
        }
    }
}

fn main() {
    let args = Args::parse();

    match args.command {
        Command::Json {
            file,
            allow_trailing,
        } => handle_error(run_json(file, allow_trailing)),
        Command::Math { exprs } => {
            // Keep going after a bad expression, but still fail at the end.
            let failed = exprs
                .iter()
                .filter(|expr| log_error(run_math(expr)).is_none())
                .count();
            if failed > 0 {
                exit(1);
            }
        }
        Command::Bind { text } => handle_error(run_bind(&text.join(" "))),
    }
}
