// Cell expression parser - converts tokens to an expression tree

use super::error::{ParseError, ParseResult};
use super::lexer::Lexer;
use super::token::{Spanned, Token};
use crate::expression::{Expression, Operator};
use chrono::NaiveDateTime;
use log::{debug, trace};

pub struct Parser<'a> {
    text: &'a str,
    tokens: Vec<Spanned>,
    position: usize,
}

impl<'a> Parser<'a> {
    pub fn new(text: &'a str) -> Self {
        let tokens = Lexer::new(text).tokenize();
        Parser {
            text,
            tokens,
            position: 0,
        }
    }

    /// Parse the whole cell
    pub fn parse(&mut self) -> ParseResult<Expression> {
        // A lone dash is the DMN marker for "any value"
        if self.text.trim().is_empty() || self.text.trim() == "-" {
            return Ok(Expression::Empty);
        }

        let expr = self.parse_disjunction()?;

        if !self.match_token(&Token::Eof) {
            return Err(self.unexpected());
        }

        Ok(expr)
    }

    /// Parse comma-separated alternatives
    fn parse_disjunction(&mut self) -> ParseResult<Expression> {
        let mut alternatives = vec![self.parse_alternative()?];

        while self.match_token(&Token::Comma) {
            self.advance();
            alternatives.push(self.parse_alternative()?);
        }

        Expression::disjunction_of(alternatives).ok_or_else(|| self.error("expected an expression"))
    }

    /// Parse a single alternative: range, comparison or plain value
    fn parse_alternative(&mut self) -> ParseResult<Expression> {
        match self.current_token() {
            Token::LeftBracket => self.parse_range(),
            Token::LeftParen if self.is_range_ahead() => self.parse_range(),
            _ => self.parse_comparison(),
        }
    }

    /// Check whether the parenthesis at the cursor opens a range
    fn is_range_ahead(&mut self) -> bool {
        let start = self.position;
        self.advance();
        let is_range = self.parse_bound().is_ok() && self.match_token(&Token::DotDot);
        self.position = start; // Back up
        is_range
    }

    /// Parse a range such as `[1..5)`
    fn parse_range(&mut self) -> ParseResult<Expression> {
        let lower_inclusive = match self.current_token() {
            Token::LeftBracket => true,
            Token::LeftParen => false,
            _ => return Err(self.unexpected()),
        };
        self.advance();

        let lower = self.parse_bound()?;
        self.expect_token(Token::DotDot)?;
        let upper = self.parse_bound()?;

        let upper_inclusive = match self.current_token() {
            Token::RightBracket => true,
            Token::RightParen => false,
            _ => return Err(self.expected("']' or ')'")),
        };
        self.advance();

        Ok(Expression::range(lower_inclusive, lower, upper, upper_inclusive))
    }

    /// Parse a range bound, which must be a literal or variable
    fn parse_bound(&mut self) -> ParseResult<Expression> {
        let offset = self.current_offset();
        let bound = self.parse_primary()?;

        if bound.is_literal() {
            Ok(bound)
        } else {
            Err(self.error_at("range bounds must be literals or variables", offset))
        }
    }

    /// Parse a unary comparison, `not(...)`, or a plain value
    fn parse_comparison(&mut self) -> ParseResult<Expression> {
        let operator = match self.current_token() {
            Token::Less => Operator::Lt,
            Token::LessEqual => Operator::Le,
            Token::Greater => Operator::Gt,
            Token::GreaterEqual => Operator::Ge,
            Token::Not => {
                self.advance();
                self.expect_token(Token::LeftParen)?;
                let negated = self.parse_disjunction()?;
                self.expect_token(Token::RightParen)?;
                return Ok(Expression::unary(Operator::Not, negated));
            }
            _ => return self.parse_or(),
        };
        self.advance();

        let operand = self.parse_or()?;
        Ok(Expression::unary(operator, operand))
    }

    /// Parse OR expression
    fn parse_or(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_and()?;

        while self.match_token(&Token::Or) {
            self.advance();
            let right = self.parse_and()?;
            left = Expression::binary(left, Operator::Or, right);
        }

        Ok(left)
    }

    /// Parse AND expression
    fn parse_and(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_addition()?;

        while self.match_token(&Token::And) {
            self.advance();
            let right = self.parse_addition()?;
            left = Expression::binary(left, Operator::And, right);
        }

        Ok(left)
    }

    /// Parse addition/subtraction expression
    fn parse_addition(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_multiplication()?;

        loop {
            let operator = match self.current_token() {
                Token::Plus => Operator::Add,
                Token::Minus => Operator::Sub,
                _ => break,
            };
            self.advance();

            let right = self.parse_multiplication()?;
            left = Expression::binary(left, operator, right);
        }

        Ok(left)
    }

    /// Parse multiplication/division expression
    fn parse_multiplication(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_exponent()?;

        loop {
            let operator = match self.current_token() {
                Token::Star => Operator::Mul,
                Token::Slash => Operator::Div,
                _ => break,
            };
            self.advance();

            let right = self.parse_exponent()?;
            left = Expression::binary(left, operator, right);
        }

        Ok(left)
    }

    /// Parse exponentiation, which associates to the right
    fn parse_exponent(&mut self) -> ParseResult<Expression> {
        let base = self.parse_primary()?;

        if self.match_token(&Token::StarStar) {
            self.advance();
            let exponent = self.parse_exponent()?;
            return Ok(Expression::binary(base, Operator::Exp, exponent));
        }

        Ok(base)
    }

    /// Parse primary expression
    fn parse_primary(&mut self) -> ParseResult<Expression> {
        match self.current_token() {
            Token::Number(n) => {
                let literal = self.number_literal(&n)?;
                self.advance();
                Ok(literal)
            }
            Token::Minus => {
                self.advance();
                match self.current_token() {
                    Token::Number(n) => {
                        let literal = self.number_literal(&format!("-{}", n))?;
                        self.advance();
                        Ok(literal)
                    }
                    _ => Err(self.expected("a number after '-'")),
                }
            }
            Token::String(s) => {
                self.advance();
                Ok(Expression::StringLiteral(s))
            }
            Token::True => {
                self.advance();
                Ok(Expression::BooleanLiteral(true))
            }
            Token::False => {
                self.advance();
                Ok(Expression::BooleanLiteral(false))
            }
            Token::Identifier(name) if name == "date" && self.is_date_ahead() => {
                self.parse_date_literal()
            }
            Token::Identifier(name) => {
                self.advance();
                Ok(Expression::VariableLiteral(name))
            }
            Token::LeftParen => {
                self.advance();
                let expr = self.parse_or()?;
                self.expect_token(Token::RightParen)?;
                Ok(expr)
            }
            Token::UnterminatedString => Err(self.error("unterminated string literal")),
            _ => Err(self.unexpected()),
        }
    }

    /// Check for `date and time(` at the cursor
    fn is_date_ahead(&self) -> bool {
        self.peek_token(1) == Token::And
            && self.peek_token(2) == Token::Identifier("time".to_string())
            && self.peek_token(3) == Token::LeftParen
    }

    /// Parse `date and time("<ISO-8601 timestamp>")`
    fn parse_date_literal(&mut self) -> ParseResult<Expression> {
        // date, and, time, (
        for _ in 0..4 {
            self.advance();
        }

        let value = match self.current_token() {
            Token::String(s) => s
                .parse::<NaiveDateTime>()
                .map_err(|e| self.error(&format!("invalid date and time \"{}\": {}", s, e)))?,
            _ => return Err(self.expected("a date-time string")),
        };
        self.advance();
        self.expect_token(Token::RightParen)?;

        Ok(Expression::DateLiteral(value))
    }

    fn number_literal(&self, n: &str) -> ParseResult<Expression> {
        if n.contains('.') {
            n.parse::<f64>()
                .map(Expression::DoubleLiteral)
                .map_err(|_| self.error(&format!("invalid number {}", n)))
        } else {
            n.parse::<i64>()
                .map(Expression::IntegerLiteral)
                .map_err(|_| self.error(&format!("integer {} is out of range", n)))
        }
    }

    // Helper methods

    /// Get current token
    fn current_token(&self) -> Token {
        self.peek_token(0)
    }

    /// Get the token `n` positions ahead of the cursor
    fn peek_token(&self, n: usize) -> Token {
        self.tokens
            .get(self.position + n)
            .map(|s| s.token.clone())
            .unwrap_or(Token::Eof)
    }

    fn current_offset(&self) -> usize {
        self.tokens
            .get(self.position)
            .or_else(|| self.tokens.last())
            .map_or(0, |s| s.offset)
    }

    /// Advance to next token
    fn advance(&mut self) {
        if self.position < self.tokens.len() - 1 {
            self.position += 1;
        }
    }

    /// Check if current token matches
    fn match_token(&self, token: &Token) -> bool {
        self.current_token() == *token
    }

    /// Expect a specific token
    fn expect_token(&mut self, token: Token) -> ParseResult<()> {
        if self.current_token() == token {
            self.advance();
            Ok(())
        } else {
            Err(self.expected(&token.describe()))
        }
    }

    fn error(&self, message: &str) -> ParseError {
        self.error_at(message, self.current_offset())
    }

    fn error_at(&self, message: &str, position: usize) -> ParseError {
        ParseError {
            text: self.text.to_string(),
            message: message.to_string(),
            position,
        }
    }

    fn expected(&self, what: &str) -> ParseError {
        self.error(&format!(
            "expected {}, found {}",
            what,
            self.current_token().describe()
        ))
    }

    fn unexpected(&self) -> ParseError {
        self.error(&format!("unexpected {}", self.current_token().describe()))
    }
}

/// Parse the text of a single cell
pub fn parse(text: &str) -> ParseResult<Expression> {
    let result = Parser::new(text).parse();

    match &result {
        Ok(expr) => trace!("parsed cell {:?} as {:?}", text, expr),
        Err(err) => debug!("{}", err),
    }

    result
}
