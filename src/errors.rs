use crate::expression::Expression;
use crate::symbol::Symbol;
use rustyline::error::ReadlineError;

pub type Result<T> = std::result::Result<T, Error>;

/// number of context entries shown when an error is displayed
const MAX_CONTEXT: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("Unexpected end of input")]
    UnexpectedEof,
    #[error("Missing closing parenthesis")]
    UnclosedList,
    #[error("Found token '{found}' but expected {expected}")]
    UnexpectedToken { found: String, expected: String },

    #[error("Unbound symbol: {symbol} (in environment {env})")]
    Unbound { symbol: Symbol, env: String },
    #[error("Arity Error: {0}")]
    ArityError(String),
    #[error("Type Error: {0}")]
    TypeError(String),
    #[error("Attempt to call a non-procedure: {0}")]
    NotAProcedure(String),

    #[error("IO Error: {0}")]
    IoError(std::io::Error),
    #[error("Readline Error: {0}")]
    ReadlineError(ReadlineError),
}

impl ErrorKind {
    pub fn is_syntax_error(&self) -> bool {
        match self {
            ErrorKind::UnexpectedEof
            | ErrorKind::UnclosedList
            | ErrorKind::UnexpectedToken { .. } => true,
            _ => false,
        }
    }
}

// here we can add some context to the error
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    context: Vec<Expression>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Error {
            kind,
            context: vec![],
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }

    /// forms that were being evaluated when the error passed through, innermost first
    pub fn context(&self) -> &[Expression] {
        &self.context
    }

    pub fn with_context(mut self, expr: Expression) -> Self {
        self.context.push(expr);
        self
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if !self.context.is_empty() {
            writeln!(f, "Context:")?;
        }
        if self.context.len() > MAX_CONTEXT {
            writeln!(f, "    ... {} more", self.context.len() - MAX_CONTEXT)?;
        }
        for x in self.context.iter().take(MAX_CONTEXT).rev() {
            let mut sr = x.to_string();
            if sr.chars().count() > 75 {
                sr = sr.chars().take(70).collect::<String>() + " ...";
            }
            writeln!(f, "    {}", sr)?;
        }
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for Error {}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::new(kind)
    }
}

impl From<std::io::Error> for Error {
    fn from(ioe: std::io::Error) -> Self {
        Error::new(ErrorKind::IoError(ioe))
    }
}

impl From<ReadlineError> for Error {
    fn from(rle: ReadlineError) -> Self {
        Error::new(ErrorKind::ReadlineError(rle))
    }
}
