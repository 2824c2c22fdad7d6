use crate::environment::{EnvRef, Environment};
use crate::errors::*;
use crate::expression::{Args, Expression, Procedure};
use crate::symbol;
use crate::syntax::{
    assignment_parts, cond_clause, definition_parts, expect_min_operands, expect_operands,
    lambda_parts,
};

/// Evaluate `expr` in `env`.
///
/// simple version without tail calls: every nested evaluation and every
/// procedure call recurses on the native stack, so sufficiently deep
/// non-tail recursion in user programs overflows it.
pub fn eval(expr: &Expression, env: &EnvRef) -> Result<Expression> {
    match expr {
        Expression::Symbol(s) => env.lookup(s),
        Expression::Number(_) | Expression::Procedure(_) | Expression::Native(_) => {
            Ok(expr.clone())
        }
        Expression::List(list) => eval_list(list, env).map_err(|e| e.with_context(expr.clone())),
    }
}

fn eval_list(list: &[Expression], env: &EnvRef) -> Result<Expression> {
    let (head, operands) = match list.split_first() {
        None => return Ok(Expression::nil()),
        Some(x) => x,
    };

    if let Expression::Symbol(s) = head {
        match s.name() {
            symbol::QUOTE => return quote(operands),
            symbol::DEFINE => return define(operands, env),
            symbol::SETVAR => return setvar(operands, env),
            symbol::IF => return if_form(operands, env),
            symbol::LAMBDA => return lambda(operands, env),
            symbol::BEGIN => return begin(operands, env),
            symbol::COND => return cond(operands, env),
            _ => {}
        }
    }

    let proc = eval(head, env)?;
    let args: Args = operands
        .iter()
        .map(|arg| eval(arg, env))
        .collect::<Result<_>>()?;
    apply(&proc, args)
}

/// Call a procedure with already evaluated arguments.
pub fn apply(proc: &Expression, args: Args) -> Result<Expression> {
    match proc {
        Expression::Native(func) => func(args),
        Expression::Procedure(p) => {
            if args.len() != p.params().len() {
                return Err(ErrorKind::ArityError(format!(
                    "{} expects {} argument(s) but got {}",
                    p.name(),
                    p.params().len(),
                    args.len()
                ))
                .into());
            }

            let local_env: EnvRef = Environment::new_child(p.env().clone(), p.name()).into();
            tracing::trace!(procedure = %p.name(), args = args.len(), "apply");
            for (param, arg) in p.params().iter().zip(args) {
                local_env.define(param.clone(), arg);
            }
            eval(p.body_ex(), &local_env)
        }
        _ => Err(ErrorKind::NotAProcedure(proc.to_string()).into()),
    }
}

fn quote(operands: &[Expression]) -> Result<Expression> {
    expect_operands(symbol::QUOTE, operands, 1)?;
    Ok(operands[0].clone())
}

fn define(operands: &[Expression], env: &EnvRef) -> Result<Expression> {
    let (name, value) = definition_parts(operands)?;
    let value = eval(&value, env)?;
    Ok(env.define(name, value))
}

fn setvar(operands: &[Expression], env: &EnvRef) -> Result<Expression> {
    let (name, value) = assignment_parts(operands)?;
    let value = eval(value, env)?;
    tracing::trace!(symbol = %name, "set!");
    Ok(env.update(name, value))
}

fn if_form(operands: &[Expression], env: &EnvRef) -> Result<Expression> {
    expect_operands(symbol::IF, operands, 3)?;
    if eval(&operands[0], env)?.is_true() {
        eval(&operands[1], env)
    } else {
        eval(&operands[2], env)
    }
}

fn lambda(operands: &[Expression], env: &EnvRef) -> Result<Expression> {
    let (params, body) = lambda_parts(operands)?;
    Procedure::build(params, body, env).map(Expression::Procedure)
}

fn begin(operands: &[Expression], env: &EnvRef) -> Result<Expression> {
    expect_min_operands(symbol::BEGIN, operands, 1)?;
    let last = operands.len() - 1;
    for expr in &operands[..last] {
        eval(expr, env)?;
    }
    eval(&operands[last], env)
}

fn cond(operands: &[Expression], env: &EnvRef) -> Result<Expression> {
    for clause in operands {
        let (test, actions) = cond_clause(clause)?;
        let result = match test {
            None => return begin(actions, env),
            Some(test) => eval(test, env)?,
        };
        if result.is_true() {
            if actions.is_empty() {
                return Ok(result);
            }
            return begin(actions, env);
        }
    }
    Ok(Expression::nil())
}
