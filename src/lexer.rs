use std::iter::Peekable;
use std::str::CharIndices;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    ListOpen,
    ListClose,
    /// any run of characters that is neither whitespace nor a parenthesis
    Atom(String),
}

impl From<char> for Token {
    fn from(ch: char) -> Self {
        match ch {
            '(' => Token::ListOpen,
            ')' => Token::ListClose,
            _ => Token::Atom(ch.to_string()),
        }
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        match token {
            Token::ListOpen => "(".to_string(),
            Token::ListClose => ")".to_string(),
            Token::Atom(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionalToken {
    pub start_idx: usize,
    pub end_idx: usize,
    pub token: Token,
}

impl From<PositionalToken> for Token {
    fn from(token: PositionalToken) -> Self {
        token.token
    }
}

impl From<(usize, char)> for PositionalToken {
    fn from((i, ch): (usize, char)) -> Self {
        PositionalToken {
            start_idx: i,
            end_idx: i + ch.len_utf8(),
            token: ch.into(),
        }
    }
}

/// Splits source text into tokens on demand. Byte offsets are kept so the
/// parser can report how far it has consumed the input.
pub struct Lexer<'a> {
    chars: Peekable<CharIndices<'a>>,
    len: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            chars: input.char_indices().peekable(),
            len: input.len(),
        }
    }

    /// read whitespace and return true if there is more input afterwards
    fn skip_whitespace(&mut self) -> bool {
        loop {
            match self.chars.peek() {
                Some((_, ch)) if ch.is_whitespace() => {
                    self.chars.next();
                }
                Some(_) => return true,
                None => return false,
            }
        }
    }

    fn read_atom(&mut self) -> Option<PositionalToken> {
        let mut buf = String::new();
        let (start_idx, _) = *self.chars.peek()?;
        let end_idx = loop {
            match self.chars.peek() {
                None => break self.len,
                Some(&(idx, ch)) if ch.is_whitespace() || is_special_char(ch) => break idx,
                Some(&(_, ch)) => {
                    buf.push(ch);
                    self.chars.next();
                }
            }
        };
        Some(PositionalToken {
            start_idx,
            end_idx,
            token: Token::Atom(buf),
        })
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = PositionalToken;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.skip_whitespace() {
            return None;
        }
        match self.chars.peek()?.1 {
            '(' | ')' => self.chars.next().map(PositionalToken::from),
            _ => self.read_atom(),
        }
    }
}

fn is_special_char(ch: char) -> bool {
    match ch {
        '(' | ')' => true,
        _ => false,
    }
}

/// Number of lists left open at the end of `input`. Negative when there are
/// more closing than opening parentheses.
pub fn paren_balance(input: &str) -> isize {
    Lexer::new(input).fold(0, |level, pt| match pt.token {
        Token::ListOpen => level + 1,
        Token::ListClose => level - 1,
        Token::Atom(_) => level,
    })
}
