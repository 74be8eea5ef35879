use crate::{token::{Token, TokenType, Literal}, error::LexError};

pub struct Scanner<'a> {
    source: &'a str,  // Source code.
    tokens: Vec<Token>,  // Tokens that have been scanned from source code.
    errors: Vec<LexError>,  // Everything that went wrong, in source order.
    start: usize,  // Byte offset of the start of the current lexeme.
    current: usize,  // Byte offset of the *next* character to be scanned.
    line: usize,  // Keeps track of the current line number.
    start_line: usize,  // Line the current lexeme started on.
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            errors: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
            start_line: 1,
        }
    }

    /// Interface function.
    /// Scans the whole source. Errors never stop the scan, so the token vector always ends with exactly one `Eof`.
    pub fn scan_tokens(mut self) -> (Vec<Token>, Vec<LexError>) {
        while !self.is_at_end() {
            // We are at the beginning of the next lexeme.
            self.start = self.current;
            self.start_line = self.line;
            self.scan_token();
        }

        self.tokens.push(Token::new(TokenType::Eof, "", Literal::Nil, self.line));

        (self.tokens, self.errors)
    }

    /// Attempts to build a token from the current character(s) in the source code.
    fn scan_token(&mut self) {
        let Some(c) = self.advance() else {
            return;
        };

        match c {
            // Single-character tokens.
            '(' => self.add_token(TokenType::LeftParen),
            ')' => self.add_token(TokenType::RightParen),
            '{' => self.add_token(TokenType::LeftBrace),
            '}' => self.add_token(TokenType::RightBrace),
            ',' => self.add_token(TokenType::Comma),
            '.' => self.add_token(TokenType::Dot),
            '-' => self.add_token(TokenType::Minus),
            '+' => self.add_token(TokenType::Plus),
            ';' => self.add_token(TokenType::Semicolon),
            '*' => self.add_token(TokenType::Star),

            // One or two character tokens. The longer match wins.
            '!' => {
                let type_ = if self.match_next('=') { TokenType::BangEqual } else { TokenType::Bang };
                self.add_token(type_);
            },
            '=' => {
                let type_ = if self.match_next('=') { TokenType::EqualEqual } else { TokenType::Equal };
                self.add_token(type_);
            },
            '>' => {
                let type_ = if self.match_next('=') { TokenType::GreaterEqual } else { TokenType::Greater };
                self.add_token(type_);
            },
            '<' => {
                let type_ = if self.match_next('=') { TokenType::LessEqual } else { TokenType::Less };
                self.add_token(type_);
            },
            '/' => {
                if self.match_next('/') {
                    // It is a comment. Ignore all characters until the end of the line, leaving the `\n` for the main loop.
                    while self.peek().map_or(false, |c| c != '\n') {
                        self.advance();
                    }
                } else {
                    self.add_token(TokenType::Slash);
                }
            },

            // Literals.
            '"' => self.string(),
            '0'..='9' => self.number(),

            // Identifiers or keywords.
            'a'..='z' | 'A'..='Z' | '_' => self.word(),

            // Ignore these hidden characters.
            ' ' | '\r' | '\t' => (),

            // Increment line number.
            '\n' => self.line += 1,

            other => {
                // Record the error and carry on with the next character.
                self.errors.push(LexError::UnexpectedCharacter {
                    character: other,
                    line: self.line,
                });
            },
        };
    }

    /// Processes string literals. Newlines inside the quotes are allowed.
    fn string(&mut self) {
        while let Some(c) = self.peek() {
            if c == '"' {
                break;
            }
            if c == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            // We have reached the end and there was no closing `"`.
            self.errors.push(LexError::UnterminatedString { line: self.line });
            return;
        }

        // Consume the closing `"`.
        self.advance();
        let literal = Literal::String_(self.source[self.start + 1..self.current - 1].to_owned());
        self.add_token_with_literal(TokenType::String_, literal);
    }

    /// Processes number literals. A `.` only belongs to the number if a digit follows it.
    fn number(&mut self) {
        self.consume_digits();

        if self.peek() == Some('.') && self.peek_next().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
            // Fractional part.
            self.consume_digits();
        }

        // Only ASCII digits with at most one interior `.` got here, which `f64` always accepts.
        let value: f64 = self.source[self.start..self.current].parse().unwrap_or_default();
        self.add_token_with_literal(TokenType::Number, Literal::Number(value));
    }

    fn consume_digits(&mut self) {
        while self.peek().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    /// Processes identifiers and keywords.
    fn word(&mut self) {
        while self.peek().map_or(false, |c| c.is_ascii_alphanumeric() || c == '_') {
            self.advance();
        }

        let lexeme = &self.source[self.start..self.current];
        let type_ = TokenType::keyword(lexeme).unwrap_or(TokenType::Identifier);
        self.add_token(type_);
    }

    /// Consumes and returns the next character, if there is one.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.current += c.len_utf8();
        Some(c)
    }

    /// Checks if next character is `expected`. If so, consume it and return true.
    fn match_next(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.current += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// Returns the next character if there is one.
    fn peek(&self) -> Option<char> {
        self.source[self.current..].chars().next()
    }

    /// Returns the character after next if there is one.
    fn peek_next(&self) -> Option<char> {
        self.source[self.current..].chars().nth(1)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    /// Adds a token that does not represent a literal value.
    fn add_token(&mut self, token_type: TokenType) {
        self.add_token_with_literal(token_type, Literal::Nil);
    }

    /// Adds an entire token.
    fn add_token_with_literal(&mut self, token_type: TokenType, literal: Literal) {
        self.tokens.push(Token::new(
            token_type,
            &self.source[self.start..self.current],
            literal,
            self.start_line,
        ));
    }
}

#[cfg(test)]
mod tests {
    use crate::{token::{Token, TokenType, Literal}, error::LexError};

    use super::Scanner;

    fn scan(source: &str) -> (Vec<Token>, Vec<LexError>) {
        Scanner::new(source).scan_tokens()
    }

    fn types(source: &str) -> Vec<TokenType> {
        scan(source).0.into_iter().map(|token| token.type_).collect()
    }

    #[test]
    fn one_char_tokens() {
        let source = "( ) { } , . - + ; / *";
        assert_eq!((vec![
            Token { type_: TokenType::LeftParen, lexeme: String::from("("), literal: Literal::Nil, line: 1 },
            Token { type_: TokenType::RightParen, lexeme: String::from(")"), literal: Literal::Nil, line: 1 },
            Token { type_: TokenType::LeftBrace, lexeme: String::from("{"), literal: Literal::Nil, line: 1 },
            Token { type_: TokenType::RightBrace, lexeme: String::from("}"), literal: Literal::Nil, line: 1 },
            Token { type_: TokenType::Comma, lexeme: String::from(","), literal: Literal::Nil, line: 1 },
            Token { type_: TokenType::Dot, lexeme: String::from("."), literal: Literal::Nil, line: 1 },
            Token { type_: TokenType::Minus, lexeme: String::from("-"), literal: Literal::Nil, line: 1 },
            Token { type_: TokenType::Plus, lexeme: String::from("+"), literal: Literal::Nil, line: 1 },
            Token { type_: TokenType::Semicolon, lexeme: String::from(";"), literal: Literal::Nil, line: 1 },
            Token { type_: TokenType::Slash, lexeme: String::from("/"), literal: Literal::Nil, line: 1 },
            Token { type_: TokenType::Star, lexeme: String::from("*"), literal: Literal::Nil, line: 1 },
            Token { type_: TokenType::Eof, lexeme: String::from(""), literal: Literal::Nil, line: 1 },
        ], vec![]), scan(source));
    }

    #[test]
    fn one_two_char_tokens() {
        let source = "! != = == > >= < <=";
        assert_eq!(vec![
            TokenType::Bang, TokenType::BangEqual,
            TokenType::Equal, TokenType::EqualEqual,
            TokenType::Greater, TokenType::GreaterEqual,
            TokenType::Less, TokenType::LessEqual,
            TokenType::Eof,
        ], types(source));
    }

    #[test]
    fn longest_match_without_spaces() {
        assert_eq!(vec![TokenType::BangEqual, TokenType::Equal, TokenType::Eof], types("!=="));
        assert_eq!(vec![TokenType::LessEqual, TokenType::Greater, TokenType::Eof], types("<=>"));
    }

    #[test]
    fn literals() {
        let source = "\"abc\" 123 \"abc123\" 123.5 \"\"";
        assert_eq!((vec![
            Token { type_: TokenType::String_, lexeme: String::from("\"abc\""), literal: Literal::String_(String::from("abc")), line: 1 },
            Token { type_: TokenType::Number, lexeme: String::from("123"), literal: Literal::Number(123.0), line: 1 },
            Token { type_: TokenType::String_, lexeme: String::from("\"abc123\""), literal: Literal::String_(String::from("abc123")), line: 1 },
            Token { type_: TokenType::Number, lexeme: String::from("123.5"), literal: Literal::Number(123.5), line: 1 },
            Token { type_: TokenType::String_, lexeme: String::from("\"\""), literal: Literal::String_(String::from("")), line: 1 },
            Token { type_: TokenType::Eof, lexeme: String::from(""), literal: Literal::Nil, line: 1 },
        ], vec![]), scan(source));
    }

    #[test]
    fn numbers_need_digits_on_both_sides_of_the_dot() {
        let (tokens, errors) = scan(".5");
        assert!(errors.is_empty());
        assert_eq!(vec![
            Token::new(TokenType::Dot, ".", Literal::Nil, 1),
            Token::new(TokenType::Number, "5", Literal::Number(5.0), 1),
            Token::new(TokenType::Eof, "", Literal::Nil, 1),
        ], tokens);

        let (tokens, errors) = scan("5.");
        assert!(errors.is_empty());
        assert_eq!(vec![
            Token::new(TokenType::Number, "5", Literal::Number(5.0), 1),
            Token::new(TokenType::Dot, ".", Literal::Nil, 1),
            Token::new(TokenType::Eof, "", Literal::Nil, 1),
        ], tokens);
    }

    #[test]
    fn number_values() {
        for (text, value) in [("0", 0.0), ("007", 7.0), ("3.14159", 3.14159), ("45.67", 45.67), ("1234567890.5", 1234567890.5)] {
            let (tokens, errors) = scan(text);
            assert!(errors.is_empty());
            assert_eq!(2, tokens.len());
            assert_eq!(Token::new(TokenType::Number, text, Literal::Number(value), 1), tokens[0]);
        }
    }

    #[test]
    fn line_count() {
        let source = "12\n23";
        assert_eq!((vec![
            Token { type_: TokenType::Number, lexeme: String::from("12"), literal: Literal::Number(12.0), line: 1 },
            Token { type_: TokenType::Number, lexeme: String::from("23"), literal: Literal::Number(23.0), line: 2 },
            Token { type_: TokenType::Eof, lexeme: String::from(""), literal: Literal::Nil, line: 2 },
        ], vec![]), scan(source));
    }

    #[test]
    fn comments() {
        assert_eq!((vec![
            Token::new(TokenType::Number, "1", Literal::Number(1.0), 2),
            Token::new(TokenType::Eof, "", Literal::Nil, 2),
        ], vec![]), scan("// comment\n1"));

        // A comment running into the end of input.
        assert_eq!(vec![TokenType::Number, TokenType::Eof], types("1 // trailing"));
        assert_eq!(vec![TokenType::Slash, TokenType::Number, TokenType::Eof], types("/ 2"));
    }

    #[test]
    fn whitespace_only() {
        assert_eq!((vec![
            Token::new(TokenType::Eof, "", Literal::Nil, 3),
        ], vec![]), scan(" \t\r\n\n "));
    }

    #[test]
    fn multi_line_string() {
        let (tokens, errors) = scan("\"a\nb\" x");
        assert!(errors.is_empty());
        assert_eq!(vec![
            Token::new(TokenType::String_, "\"a\nb\"", Literal::String_(String::from("a\nb")), 1),
            Token::new(TokenType::Identifier, "x", Literal::Nil, 2),
            Token::new(TokenType::Eof, "", Literal::Nil, 2),
        ], tokens);
    }

    #[test]
    fn unterminated_string() {
        let source = "\"abc\nabc\nabc";
        assert_eq!((vec![
            Token::new(TokenType::Eof, "", Literal::Nil, 3),
        ], vec![LexError::UnterminatedString { line: 3 }]), scan(source));

        let (tokens, errors) = scan("\"unterminated");
        assert_eq!(vec![Token::new(TokenType::Eof, "", Literal::Nil, 1)], tokens);
        assert_eq!(vec![LexError::UnterminatedString { line: 1 }], errors);
    }

    #[test]
    fn unexpected_characters_do_not_stop_scanning() {
        let (tokens, errors) = scan("1 @ 2\n# 3");
        assert_eq!(vec![
            Token::new(TokenType::Number, "1", Literal::Number(1.0), 1),
            Token::new(TokenType::Number, "2", Literal::Number(2.0), 1),
            Token::new(TokenType::Number, "3", Literal::Number(3.0), 2),
            Token::new(TokenType::Eof, "", Literal::Nil, 2),
        ], tokens);
        assert_eq!(vec![
            LexError::UnexpectedCharacter { character: '@', line: 1 },
            LexError::UnexpectedCharacter { character: '#', line: 2 },
        ], errors);
    }

    #[test]
    fn non_ascii_input() {
        let (tokens, errors) = scan("\"héllo\" é 1");
        assert_eq!(vec![
            Token::new(TokenType::String_, "\"héllo\"", Literal::String_(String::from("héllo")), 1),
            Token::new(TokenType::Number, "1", Literal::Number(1.0), 1),
            Token::new(TokenType::Eof, "", Literal::Nil, 1),
        ], tokens);
        assert_eq!(vec![LexError::UnexpectedCharacter { character: 'é', line: 1 }], errors);
    }

    #[test]
    fn identifiers() {
        let source = "a a2 _b forest";
        assert_eq!((vec![
            Token { type_: TokenType::Identifier, lexeme: String::from("a"), literal: Literal::Nil, line: 1 },
            Token { type_: TokenType::Identifier, lexeme: String::from("a2"), literal: Literal::Nil, line: 1 },
            Token { type_: TokenType::Identifier, lexeme: String::from("_b"), literal: Literal::Nil, line: 1 },
            Token { type_: TokenType::Identifier, lexeme: String::from("forest"), literal: Literal::Nil, line: 1 },
            Token { type_: TokenType::Eof, lexeme: String::from(""), literal: Literal::Nil, line: 1 },
        ], vec![]), scan(source));
    }

    #[test]
    fn keywords() {
        let source = "and class else false for fun if nil or print return super this true var while";
        assert_eq!(vec![
            TokenType::And, TokenType::Class, TokenType::Else, TokenType::False,
            TokenType::For, TokenType::Fun, TokenType::If, TokenType::Nil,
            TokenType::Or, TokenType::Print, TokenType::Return, TokenType::Super,
            TokenType::This, TokenType::True, TokenType::Var, TokenType::While,
            TokenType::Eof,
        ], types(source));
    }
}
