use std::{fs, io, io::Write, path::{Path, PathBuf}, process};

use clap::Parser;
use vapor::error::{self, Diagnostic};

/// Scans and parses Vapor expressions, printing each tree in prefix form.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Also print every scanned token.
    #[arg(short, long)]
    tokens: bool,

    /// Script to run. Starts an interactive prompt when left out.
    script: Option<PathBuf>,
}

/// Driver code.
fn main() {
    let args = Args::parse();

    match &args.script {
        Some(path) => run_file(path, &args),
        None => run_repl(&args),
    }
}

/// Runs the source code at the given file path.
fn run_file(path: &Path, args: &Args) {
    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Failed to read '{}': {}", path.display(), e);
        process::exit(1);
    });

    run(&source, args);
}

/// Runs the interactive prompt until the input ends.
fn run_repl(args: &Args) {
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            return;
        }

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => return,  // End of input.
            Ok(_) => run(&line, args),
            Err(e) => {
                eprintln!("Failed to read line: {}", e);
                return;
            },
        }
    }
}

/// Scans and parses one source string, reporting every diagnostic.
/// The tree is only printed when nothing went wrong.
fn run(source: &str, args: &Args) {
    // Lexical analysis.
    let (tokens, lex_errors) = vapor::scan(source);
    for lex_error in &lex_errors {
        error::report(&Diagnostic::from(lex_error));
    }

    if args.tokens {
        for token in &tokens {
            println!("{}", token);
        }
    }

    // Syntax analysis.
    let (expr, parse_errors) = vapor::parse(tokens);
    for parse_error in &parse_errors {
        error::report(&Diagnostic::from(parse_error));
    }

    if let Some(expr) = expr {
        if lex_errors.is_empty() {
            println!("{}", vapor::print(&expr));
        }
    }
}
