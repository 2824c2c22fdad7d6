use crate::errors::*;
use crate::expression::Expression;
use crate::symbol::{self, Symbol};

pub fn expect_operands(form: &str, operands: &[Expression], n: usize) -> Result<()> {
    if operands.len() == n {
        Ok(())
    } else {
        Err(ErrorKind::ArityError(format!(
            "{} expects {} operand(s) but got {}",
            form,
            n,
            operands.len()
        ))
        .into())
    }
}

pub fn expect_min_operands(form: &str, operands: &[Expression], n: usize) -> Result<()> {
    if operands.len() >= n {
        Ok(())
    } else {
        Err(ErrorKind::ArityError(format!(
            "{} expects at least {} operand(s) but got {}",
            form,
            n,
            operands.len()
        ))
        .into())
    }
}

/// Turn a body of one or more expressions into a single expression.
pub fn sequence_to_expression(body: &[Expression]) -> Expression {
    match body {
        [single] => single.clone(),
        _ => {
            let mut seq = Vec::with_capacity(body.len() + 1);
            seq.push(Expression::Symbol(symbol::BEGIN.into()));
            seq.extend_from_slice(body);
            Expression::List(seq)
        }
    }
}

/// Split the operands of `define` into the bound name and the value expression.
///
/// ```text
/// (define x 5)               => x, 5
/// (define (f a b) (+ a b))   => f, (lambda (a b) (+ a b))
/// ```
pub fn definition_parts(operands: &[Expression]) -> Result<(Symbol, Expression)> {
    match operands.first() {
        Some(Expression::List(signature)) => {
            expect_min_operands(symbol::DEFINE, operands, 2)?;
            let (name, params) = signature.split_first().ok_or_else(|| {
                ErrorKind::TypeError("procedure definition without a name".into())
            })?;
            let name = name.try_as_symbol()?.clone();
            let body = sequence_to_expression(&operands[1..]);
            let lambda = lisp!((lambda, @params.to_vec(), @body));
            Ok((name, lambda))
        }
        _ => {
            expect_operands(symbol::DEFINE, operands, 2)?;
            Ok((operands[0].try_as_symbol()?.clone(), operands[1].clone()))
        }
    }
}

/// Split the operands of `set!` into the assigned name and the value expression.
pub fn assignment_parts(operands: &[Expression]) -> Result<(Symbol, &Expression)> {
    expect_operands(symbol::SETVAR, operands, 2)?;
    Ok((operands[0].try_as_symbol()?.clone(), &operands[1]))
}

/// Split the operands of `lambda` into the parameter list and the body.
pub fn lambda_parts(operands: &[Expression]) -> Result<(&Expression, Expression)> {
    expect_min_operands(symbol::LAMBDA, operands, 2)?;
    Ok((&operands[0], sequence_to_expression(&operands[1..])))
}

/// A `cond` clause: the test (`None` for `else`) and the actions.
pub fn cond_clause(clause: &Expression) -> Result<(Option<&Expression>, &[Expression])> {
    let clause = clause.try_as_list()?;
    let (test, actions) = clause
        .split_first()
        .ok_or_else(|| ErrorKind::ArityError("empty cond clause".into()))?;
    if test.is_named_symbol(symbol::ELSE) {
        Ok((None, actions))
    } else {
        Ok((Some(test), actions))
    }
}
