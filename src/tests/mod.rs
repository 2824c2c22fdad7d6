mod environment;
mod evaluator;

use crate::environment::{default_env, EnvRef};
use crate::errors::{ErrorKind, Result};
use crate::expression::Expression;
use crate::parser::parse_all;
use crate::eval;

fn run<T: AsRef<str>>(src: T) -> Result<Expression> {
    run_in_env(src, &default_env())
}

fn run_in_env<T: AsRef<str>>(src: T, env: &EnvRef) -> Result<Expression> {
    let mut result = Expression::nil();
    for expr in parse_all(src.as_ref())? {
        result = eval(&expr, env)?;
    }
    Ok(result)
}

fn run_err<T: AsRef<str>>(src: T) -> ErrorKind {
    run(src).unwrap_err().into_kind()
}

fn num(x: f64) -> Expression {
    Expression::Number(x)
}

fn sym(name: &str) -> Expression {
    Expression::Symbol(name.into())
}
