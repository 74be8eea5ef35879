use crate::error::ParseError;
use crate::expr::Expr;
use crate::token::{Token, TokenType, Literal};

/// How many groupings and unary operators may be nested inside one another.
/// Each level costs a handful of stack frames, so this keeps hostile input from overflowing the stack.
pub const MAX_NESTING: usize = 128;

/// Tokens that start a new construct, where parsing can safely resume after an error.
const SYNC_POINTS: [TokenType; 8] = [
    TokenType::Class, TokenType::Fun, TokenType::Var, TokenType::For,
    TokenType::If, TokenType::While, TokenType::Print, TokenType::Return,
];

/// Recursive descent parser for single expressions.
///
/// The token vector always ends with an `Eof` token and `current_index` never moves past it,
/// so `peek()` is always valid.
pub struct Parser {
    tokens: Vec<Token>,
    current_index: usize,
    depth: usize,  // Current grouping/unary nesting.
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map_or(true, |token| token.type_ != TokenType::Eof) {
            let line = tokens.last().map_or(1, |token| token.line);
            tokens.push(Token::new(TokenType::Eof, "", Literal::Nil, line));
        }

        Self {
            tokens,
            current_index: 0,
            depth: 0,
        }
    }

    /// Parses one expression starting at the current token.
    /// Tokens after the expression are left alone; `is_at_end()` tells whether anything remains.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        self.depth = 0;
        self.expression()
    }

    /// Parses one expression, collecting as many errors as possible.
    ///
    /// On the first error the parser synchronizes and keeps parsing whatever follows until it
    /// runs out of tokens, only to find further errors. The tree is returned only if nothing went wrong.
    pub fn parse_with_recovery(&mut self) -> (Option<Expr>, Vec<ParseError>) {
        let first = match self.parse() {
            Ok(expr) => return (Some(expr), Vec::new()),
            Err(error) => error,
        };

        let mut errors = vec![first];
        self.synchronize();

        while !self.is_at_end() {
            // Successful parses here only move the cursor forward.
            if let Err(error) = self.parse() {
                errors.push(error);
                self.synchronize();
            }
        }

        (None, errors)
    }

    /// Returns whether only the `Eof` token is left.
    pub fn is_at_end(&self) -> bool {
        self.peek().type_ == TokenType::Eof
    }

    // expression -> equality
    fn expression(&mut self) -> Result<Expr, ParseError> {
        self.equality()
    }

    // equality -> comparison ( ("!=" | "==") comparison)*
    fn equality(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.comparison()?;

        while let Some(operator) = self.check_and_consume(&[TokenType::BangEqual, TokenType::EqualEqual]) {
            let right = self.comparison()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    // comparison -> term ( (">" | ">=" | "<" | "<=") term)*
    fn comparison(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.term()?;

        while let Some(operator) = self.check_and_consume(&[TokenType::Greater, TokenType::GreaterEqual, TokenType::Less, TokenType::LessEqual]) {
            let right = self.term()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    // term -> factor ( ("-" | "+") factor)*
    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.factor()?;

        while let Some(operator) = self.check_and_consume(&[TokenType::Minus, TokenType::Plus]) {
            let right = self.factor()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    // factor -> unary ( ("/" | "*") unary)*
    fn factor(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.unary()?;

        while let Some(operator) = self.check_and_consume(&[TokenType::Slash, TokenType::Star]) {
            let right = self.unary()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    // unary -> ("!" | "-") unary |
    //          primary
    // Right-associative through direct recursion.
    fn unary(&mut self) -> Result<Expr, ParseError> {
        if let Some(operator) = self.check_and_consume(&[TokenType::Bang, TokenType::Minus]) {
            self.enter()?;
            let right = self.unary()?;
            self.depth -= 1;

            Ok(Expr::Unary {
                operator,
                right: Box::new(right),
            })
        } else {
            self.primary()
        }
    }

    // primary -> NUMBER | STRING | "true" | "false" | "nil" |
    //            "(" expression ")"
    fn primary(&mut self) -> Result<Expr, ParseError> {
        if self.check_and_consume(&[TokenType::True]).is_some() {
            Ok(Expr::Literal { value: Literal::Bool(true) })

        } else if self.check_and_consume(&[TokenType::False]).is_some() {
            Ok(Expr::Literal { value: Literal::Bool(false) })

        } else if self.check_and_consume(&[TokenType::Nil]).is_some() {
            Ok(Expr::Literal { value: Literal::Nil })

        } else if let Some(token) = self.check_and_consume(&[TokenType::Number, TokenType::String_]) {
            Ok(Expr::Literal { value: token.literal })

        } else if self.check(TokenType::LeftParen) {
            self.enter()?;
            self.advance();
            let expr = self.expression()?;
            self.expect(TokenType::RightParen, "Expect ')' after expression.")?;
            self.depth -= 1;

            Ok(Expr::Grouping { expression: Box::new(expr) })

        } else {
            Err(ParseError::UnexpectedToken { token: self.peek().clone() })
        }
    }

    /// Steps one nesting level deeper, failing once `MAX_NESTING` is reached.
    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::NestingTooDeep { token: self.peek().clone() });
        }
        self.depth += 1;
        Ok(())
    }

    /// Discards tokens until a likely start of a new construct.
    /// Always makes progress unless already at the end.
    fn synchronize(&mut self) {
        if self.is_at_end() {
            return;
        }
        self.advance();

        while !self.is_at_end() {
            if self.previous().type_ == TokenType::Semicolon || SYNC_POINTS.contains(&self.peek().type_) {
                return;
            }
            self.advance();
        }
    }

    /// Consumes and returns the current token. Stays put on `Eof`.
    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.current_index += 1;
        }
        token
    }

    /// Returns `true` if the current token has type `expected_type`, without consuming it.
    fn check(&self, expected_type: TokenType) -> bool {
        self.peek().type_ == expected_type
    }

    /// Returns `Some(Token)` and advances if the current token's type is one of the `expected_types`.
    fn check_and_consume(&mut self, expected_types: &[TokenType]) -> Option<Token> {
        if expected_types.iter().any(|type_| self.check(*type_)) {
            Some(self.advance())
        } else {
            None
        }
    }

    fn expect(&mut self, expected: TokenType, message: &'static str) -> Result<Token, ParseError> {
        self.check_and_consume(&[expected]).ok_or_else(|| ParseError::ExpectedToken {
            expected,
            token: self.peek().clone(),
            message,
        })
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current_index]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current_index.saturating_sub(1)]
    }
}
