use crate::errors::*;
use crate::expression::Expression;
use crate::lexer::{Lexer, PositionalToken, Token};
use std::iter::Peekable;

/// Recursive descent parser over a single cursor into the source text.
///
/// Each call to `parse_expression` consumes exactly one top-level form and
/// leaves the cursor right behind it, so a sequence of forms is read by
/// calling it repeatedly (or by iterating over the parser).
pub struct Parser<'a> {
    input: Peekable<Lexer<'a>>,
    cursor: usize,
}

impl<'a> Parser<'a> {
    pub fn new(src: &'a str) -> Self {
        Parser {
            input: Lexer::new(src).peekable(),
            cursor: 0,
        }
    }

    /// byte offset just past the last consumed token
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn is_exhausted(&mut self) -> bool {
        self.input.peek().is_none()
    }

    pub fn parse_expression(&mut self) -> Result<Expression> {
        match self.next_token() {
            None => Err(ErrorKind::UnexpectedEof.into()),
            Some(Token::Atom(s)) => Ok(Expression::from_literal(s)),
            Some(Token::ListOpen) => self.parse_list_open(),
            Some(t) => Err(ErrorKind::UnexpectedToken {
                found: t.into(),
                expected: "<expression>".into(),
            }
            .into()),
        }
    }

    fn parse_list_open(&mut self) -> Result<Expression> {
        let mut list = vec![];
        loop {
            match self.peek_token() {
                None => return Err(ErrorKind::UnclosedList.into()),
                Some(Token::ListClose) => break,
                Some(_) => list.push(self.parse_expression()?),
            }
        }
        self.expect_token(Token::ListClose)?;
        Ok(Expression::List(list))
    }

    fn peek_token(&mut self) -> Option<&Token> {
        self.input.peek().map(|pt| &pt.token)
    }

    fn next_token(&mut self) -> Option<Token> {
        let PositionalToken { end_idx, token, .. } = self.input.next()?;
        self.cursor = end_idx;
        Some(token)
    }

    fn expect_token(&mut self, token: Token) -> Result<()> {
        match self.next_token() {
            Some(ref t) if t == &token => Ok(()),
            Some(t) => Err(ErrorKind::UnexpectedToken {
                found: t.into(),
                expected: String::from(token),
            }
            .into()),
            None => Err(ErrorKind::UnclosedList.into()),
        }
    }
}

impl<'a> Iterator for Parser<'a> {
    type Item = Result<Expression>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_exhausted() {
            None
        } else {
            Some(self.parse_expression())
        }
    }
}

/// Parse the first expression in `src`.
pub fn parse(src: &str) -> Result<Expression> {
    Parser::new(src).parse_expression()
}

/// Parse every top-level expression in `src`.
pub fn parse_all(src: &str) -> Result<Vec<Expression>> {
    Parser::new(src).collect()
}
