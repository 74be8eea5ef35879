use std::{error::Error, fmt};

use crate::token::{Token, TokenType};

/// Errors raised while scanning. Scanning always carries on past them.
#[derive(Clone, Debug, PartialEq)]
pub enum LexError {
    UnexpectedCharacter {
        character: char,
        line: usize,
    },
    UnterminatedString {
        line: usize,  // Line the input ended on.
    },
}

impl LexError {
    pub fn line(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { line, .. } | Self::UnterminatedString { line } => *line,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::UnexpectedCharacter { .. } => "Unexpected character.",
            Self::UnterminatedString { .. } => "Unterminated string.",
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Diagnostic::from(self).fmt(f)
    }
}

impl Error for LexError {}

/// Errors raised while parsing. Each carries the token the parser was looking at.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseError {
    /// No grammar rule starts with `token`.
    UnexpectedToken {
        token: Token,
    },
    /// A required token (e.g. the `)` closing a grouping) was missing.
    ExpectedToken {
        expected: TokenType,
        token: Token,
        message: &'static str,
    },
    NestingTooDeep {
        token: Token,
    },
}

impl ParseError {
    pub fn token(&self) -> &Token {
        match self {
            Self::UnexpectedToken { token }
            | Self::ExpectedToken { token, .. }
            | Self::NestingTooDeep { token } => token,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::UnexpectedToken { .. } => "Expect expression.",
            Self::ExpectedToken { message, .. } => *message,
            Self::NestingTooDeep { .. } => "Expression nested too deeply.",
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Diagnostic::from(self).fmt(f)
    }
}

impl Error for ParseError {}

/// A user-facing error line: `[line <N>] Error<location>: <message>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub location: String,  // "", " at end" or " at '<lexeme>'".
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}] Error{}: {}", self.line, self.location, self.message)
    }
}

impl From<&LexError> for Diagnostic {
    fn from(error: &LexError) -> Self {
        Self {
            line: error.line(),
            location: String::new(),
            message: String::from(error.message()),
        }
    }
}

impl From<&ParseError> for Diagnostic {
    fn from(error: &ParseError) -> Self {
        let token = error.token();
        let location = if token.type_ == TokenType::Eof {
            String::from(" at end")
        } else {
            format!(" at '{}'", token.lexeme)
        };

        Self {
            line: token.line,
            location,
            message: String::from(error.message()),
        }
    }
}

/// Writes a diagnostic to stderr. The library itself never prints; this is for the shell.
pub fn report(diagnostic: &Diagnostic) {
    eprintln!("{}", diagnostic);
}
