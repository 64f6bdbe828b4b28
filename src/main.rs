//! exprc - arithmetic expression checker
//!
//! Thin driver over the `exprfront` library.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use exprfront::feedback::{token_reports, ValidationReport};
use exprfront::frontend::parser::DEFAULT_MAX_DEPTH;
use exprfront::{render_token_table, render_tree, tokenize, validate_with_depth, Validation};

/// Arithmetic expression checker
#[derive(Parser, Debug)]
#[command(name = "exprc")]
#[command(version)]
#[command(about = "Tokenize, parse and validate arithmetic expressions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Maximum nesting depth accepted by the parser
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

/// Where the expression text comes from
#[derive(clap::Args, Debug)]
struct Input {
    /// Expression text (reads stdin when neither this nor --file is given)
    #[arg(value_name = "EXPR", conflicts_with = "file")]
    expr: Option<String>,

    /// Read the expression from a file
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the token list
    Tokens(Input),
    /// Print the syntax tree
    Parse(Input),
    /// Report whether the expression is valid
    Check(Input),
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(2);
        }
    }
}

/// Returns `Ok(false)` when the input was rejected
fn run(cli: &Cli) -> Result<bool> {
    match &cli.command {
        Commands::Tokens(input) => {
            let source = read_input(input)?;
            print_tokens(&source, cli.json)
        }
        Commands::Parse(input) => {
            let source = read_input(input)?;
            Ok(print_tree(&source, cli))
        }
        Commands::Check(input) => {
            let source = read_input(input)?;
            Ok(check(&source, cli))
        }
    }
}

fn read_input(input: &Input) -> Result<String> {
    let source = match (&input.expr, &input.file) {
        (Some(expr), _) => expr.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        (None, None) => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };
    info!("read {} characters of input", source.chars().count());
    Ok(source)
}

fn print_tokens(source: &str, json: bool) -> Result<bool> {
    if json {
        match token_reports(source) {
            Ok(reports) => {
                println!("{}", serde_json::to_string_pretty(&reports)?);
                Ok(true)
            }
            Err(e) => {
                let report = ValidationReport::from_validation(source, Validation::Invalid(e));
                println!("{}", report.to_json_pretty());
                Ok(false)
            }
        }
    } else {
        match tokenize(source) {
            Ok(tokens) => {
                print!("{}", render_token_table(&tokens));
                Ok(true)
            }
            Err(e) => {
                eprintln!("Lexer error: {}", e);
                Ok(false)
            }
        }
    }
}

fn print_tree(source: &str, cli: &Cli) -> bool {
    let validation = validate_with_depth(source, cli.max_depth);
    let valid = validation.is_valid();

    if cli.json {
        println!("{}", ValidationReport::from_validation(source, validation).to_json_pretty());
    } else {
        match validation.ast() {
            Some(ast) => print!("{}", render_tree(ast)),
            None => eprintln!("Parse error: {}", validation.error_message().unwrap_or_default()),
        }
    }

    valid
}

fn check(source: &str, cli: &Cli) -> bool {
    let report = ValidationReport::with_max_depth(source, cli.max_depth);

    if cli.json {
        println!("{}", report.to_json());
    } else if let Some(error) = &report.error {
        println!("invalid: {}", error.message);
    } else {
        println!("valid");
    }

    report.valid
}
