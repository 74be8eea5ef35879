//! # vapor
//!
//! Front end for the Vapor expression language: a scanner turning source text into tokens, a
//! recursive descent parser turning tokens into an expression tree, and a printer rendering
//! that tree in prefix form.
//!
//! ```
//! let (tokens, lex_errors) = vapor::scan("-123 * (45.67)");
//! assert!(lex_errors.is_empty());
//!
//! let (expr, parse_errors) = vapor::parse(tokens);
//! assert!(parse_errors.is_empty());
//! assert_eq!(Some(String::from("(* (- 123) (group 45.67))")), expr.as_ref().map(vapor::print));
//! ```

/// Lexical and syntax errors, and the `[line N] Error...` diagnostics built from them.
pub mod error;
/// Expression tree nodes.
pub mod expr;
/// Recursive descent parsing of tokens into an expression tree.
pub mod parser;
/// Prefix rendering of expression trees.
pub mod printer;
/// Character-level scanning of source text into tokens.
pub mod scanner;
/// Token types, literal values and the token record.
pub mod token;

use crate::{
    error::{LexError, ParseError},
    expr::Expr,
    parser::Parser,
    scanner::Scanner,
    token::Token,
};

/// Scans `source` into tokens. The token vector always ends with `Eof`, even when errors were found.
pub fn scan(source: &str) -> (Vec<Token>, Vec<LexError>) {
    Scanner::new(source).scan_tokens()
}

/// Parses one expression from `tokens`, synchronizing after errors to report as many as possible.
/// The tree is only returned when there were no errors.
pub fn parse(tokens: Vec<Token>) -> (Option<Expr>, Vec<ParseError>) {
    Parser::new(tokens).parse_with_recovery()
}

/// Renders an expression tree in fully parenthesized prefix form.
pub fn print(expr: &Expr) -> String {
    printer::print(expr)
}
