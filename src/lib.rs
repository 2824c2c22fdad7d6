//! An evaluator for a small Lisp dialect.
//!
//! Source text is parsed into [`Expression`] trees which are evaluated against
//! a chain of lexical environments. Procedures are either builtin primitives
//! or closures created by `lambda`, which capture the environment they were
//! created in by reference.
//!
//! ```
//! use lisp_interpreter::{render, Interpreter};
//!
//! let interpreter = Interpreter::new();
//! let result = interpreter
//!     .eval_str("(define add (lambda (a b) (+ a b))) (add 4 5)")
//!     .unwrap();
//! assert_eq!("9", render(&result));
//! ```

#[macro_use]
mod macros;

pub mod environment;
pub mod envref;
pub mod errors;
pub mod expression;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod primitives;
pub mod symbol;
pub mod syntax;

#[cfg(test)]
mod tests;

pub use environment::{default_env, EnvRef, Environment};
pub use envref::GraphLock;
pub use errors::{Error, ErrorKind, Result};
pub use expression::{Expression, Procedure};
pub use interpreter::{apply, eval};
pub use parser::{parse, parse_all, Parser};
pub use symbol::Symbol;

use expression::Ref;

/// Evaluate an already parsed expression in `env`.
pub fn evaluate(expr: &Expression, env: &EnvRef) -> Result<Expression> {
    eval(expr, env)
}

/// The textual form of an expression, as shown by the REPL.
pub fn render(expr: &Expression) -> String {
    expr.to_string()
}

/// Owns the global environment that top-level forms are evaluated in.
///
/// Clones share the environment and its lock. Every top-level evaluation
/// holds the lock for its whole duration, so concurrent callers (with the
/// `thread-safe` feature) see each other's forms as indivisible.
#[derive(Clone)]
pub struct Interpreter {
    global: EnvRef,
    lock: Ref<GraphLock>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter {
            global: default_env(),
            lock: Ref::new(GraphLock::default()),
        }
    }

    /// The global environment. Evaluating against it directly bypasses the
    /// interpreter's lock.
    pub fn global(&self) -> &EnvRef {
        &self.global
    }

    pub fn eval(&self, expr: &Expression) -> Result<Expression> {
        let _guard = self.lock.acquire();
        self.eval_locked(expr)
    }

    /// Parse every top-level form in `src` and evaluate them in order.
    /// Returns the value of the last form, or the empty list if there is none.
    ///
    /// Parsing happens form by form, so forms before a syntax error have
    /// already been evaluated when the error is returned. The lock is held
    /// across all forms.
    pub fn eval_str(&self, src: &str) -> Result<Expression> {
        let _guard = self.lock.acquire();
        let mut result = Expression::nil();
        for expr in Parser::new(src) {
            result = self.eval_locked(&expr?)?;
        }
        Ok(result)
    }

    fn eval_locked(&self, expr: &Expression) -> Result<Expression> {
        tracing::debug!(form = %expr, "eval");
        eval(expr, &self.global)
    }
}
